use std::{io, path::PathBuf};

use bookbind_markdown::MarkdownError;
use thiserror::Error;

/// Errors produced while building or loading a table of contents.
#[derive(Debug, Error)]
pub enum TocError {
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Markdown error: {0}")]
  Markdown(#[from] MarkdownError),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error(
    "chapter directory {} does not match the `<part>_<chapter>` naming \
     convention",
    .dir.display()
  )]
  BadChapterDir { dir: PathBuf },

  #[error(
    "chapter {} has no identifiable top-level heading; cannot derive a \
     name and anchor id",
    .path.display()
  )]
  MissingTitle { path: PathBuf },

  #[error(
    "duplicate anchor id `{id}`; ids must be unique across the whole book"
  )]
  DuplicateId { id: String },
}
