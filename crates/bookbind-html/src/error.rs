use std::io;

use bookbind_markdown::MarkdownError;
use thiserror::Error;

/// Errors produced while assembling the single-document output.
#[derive(Debug, Error)]
pub enum RenderError {
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Markdown error: {0}")]
  Markdown(#[from] MarkdownError),

  #[error("Template error: {0}")]
  Template(String),
}

impl From<tera::Error> for RenderError {
  fn from(e: tera::Error) -> Self {
    Self::Template(e.to_string())
  }
}
