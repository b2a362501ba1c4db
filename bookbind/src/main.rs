use std::{fs, path::Path};

use bookbind_config::{BookConfig, DEFAULT_CONFIG};
use bookbind_toc::{Toc, TocBuilder};
use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init { output, force } => init_config(output, *force),

    Commands::Toc { root } => {
      let config = load_config(&cli, root)?;
      build_toc(&config, root)?;
      Ok(())
    },

    Commands::Html { root, output } => {
      let config = load_config(&cli, root)?;
      let toc = load_toc(&config, root)?;
      write_html(&config, &toc, root, output)
    },

    Commands::Epub { root, output_dir } => {
      let config = load_config(&cli, root)?;
      let toc = load_toc(&config, root)?;
      write_epub(&config, &toc, root, output_dir)
    },

    Commands::Build {
      root,
      output,
      output_dir,
    } => {
      let config = load_config(&cli, root)?;
      let toc = build_toc(&config, root)?;
      write_html(&config, &toc, root, output)?;
      write_epub(&config, &toc, root, output_dir)
    },
  }
}

/// Write the default configuration file.
fn init_config(output: &Path, force: bool) -> Result<()> {
  // Check if file already exists and that we're not forcing overwrite
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  // Create parent directories if needed
  if let Some(parent) = output.parent() {
    if !parent.exists() && !parent.as_os_str().is_empty() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }
  }

  fs::write(output, DEFAULT_CONFIG).wrap_err_with(|| {
    format!("Failed to write configuration file: {}", output.display())
  })?;

  info!(
    "Configuration file created successfully. Edit it to describe your book."
  );
  Ok(())
}

/// Load configuration from the path given on the command line, or from
/// `book.toml` under the book root, or fall back to built-in defaults.
fn load_config(cli: &Cli, root: &Path) -> Result<BookConfig> {
  let config = match &cli.config {
    Some(path) => BookConfig::from_file(path).wrap_err_with(|| {
      format!("Failed to load configuration file: {}", path.display())
    })?,
    None => BookConfig::load_or_default(root)?,
  };
  Ok(config)
}

/// Scan the chapter directories, then persist the TOC artifact next to the
/// sources so the render commands can pick it up later.
fn build_toc(config: &BookConfig, root: &Path) -> Result<Toc> {
  info!("Scanning chapter directories in {}", root.display());

  let toc = TocBuilder::new(root)
    .with_appendix_part(config.appendix_part)
    .build()
    .wrap_err("Failed to build table of contents")?;

  let toc_path = root.join(&config.toc_file);
  toc.save(&toc_path).wrap_err_with(|| {
    format!("Failed to write TOC artifact: {}", toc_path.display())
  })?;

  info!(
    "Wrote {} with {} chapters",
    toc_path.display(),
    toc.entries.len()
  );
  Ok(toc)
}

/// Read the persisted TOC artifact back from the book root.
fn load_toc(config: &BookConfig, root: &Path) -> Result<Toc> {
  let toc_path = root.join(&config.toc_file);
  let toc = Toc::load(&toc_path).wrap_err_with(|| {
    format!(
      "Failed to read TOC artifact {} (run `bookbind toc` first?)",
      toc_path.display()
    )
  })?;
  Ok(toc)
}

/// Assemble the single-document HTML output.
fn write_html(
  config: &BookConfig,
  toc: &Toc,
  root: &Path,
  output: &Path,
) -> Result<()> {
  let html = bookbind_html::render_book(config, toc, root)
    .wrap_err("Failed to assemble HTML document")?;

  if let Some(parent) = output.parent() {
    if !parent.exists() && !parent.as_os_str().is_empty() {
      fs::create_dir_all(parent)?;
    }
  }
  fs::write(output, html)?;

  info!("Wrote {}", output.display());
  Ok(())
}

/// Generate the three EPUB package documents under `output_dir`.
fn write_epub(
  config: &BookConfig,
  toc: &Toc,
  root: &Path,
  output_dir: &Path,
) -> Result<()> {
  fs::create_dir_all(output_dir).wrap_err_with(|| {
    format!("Failed to create output directory: {}", output_dir.display())
  })?;

  let documents: [(&str, String); 3] = [
    (
      "content.opf",
      bookbind_epub::render_opf(config, toc, root)
        .wrap_err("Failed to render OPF manifest")?,
    ),
    (
      "toc.ncx",
      bookbind_epub::render_ncx(config, toc)
        .wrap_err("Failed to render NCX navigation")?,
    ),
    (
      "toc.xhtml",
      bookbind_epub::render_toc_page(config, toc)
        .wrap_err("Failed to render EPUB TOC page")?,
    ),
  ];

  for (name, contents) in documents {
    let path = output_dir.join(name);
    fs::write(&path, contents)?;
    info!("Wrote {}", path.display());
  }

  Ok(())
}
