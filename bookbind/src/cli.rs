use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for bookbind
#[derive(Parser, Debug)]
#[command(author, version, about = "bookbind: a book assembler")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to the book configuration file. Defaults to `book.toml` in the
  /// book root, falling back to built-in defaults when absent.
  #[arg(short = 'c', long = "config")]
  pub config: Option<PathBuf>,
}

/// All supported subcommands for the bookbind CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new bookbind configuration file.
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "book.toml")]
    output: PathBuf,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Scan chapter directories and write the table of contents artifact.
  Toc {
    /// Book root directory containing the chapter directories.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
  },

  /// Assemble the whole book into a single HTML document.
  Html {
    /// Book root directory containing the chapter directories.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Output file for the assembled document.
    #[arg(short, long, default_value = "book.html")]
    output: PathBuf,
  },

  /// Generate the EPUB package documents (OPF manifest, NCX, TOC page).
  Epub {
    /// Book root directory containing the chapter directories.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Output directory for the package documents.
    #[arg(short = 'd', long, default_value = "OEBPS")]
    output_dir: PathBuf,
  },

  /// Run the full pipeline: toc, then html, then epub.
  Build {
    /// Book root directory containing the chapter directories.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Output file for the assembled HTML document.
    #[arg(short, long, default_value = "book.html")]
    output: PathBuf,

    /// Output directory for the EPUB package documents.
    #[arg(short = 'd', long, default_value = "OEBPS")]
    output_dir: PathBuf,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
