use std::io;

use thiserror::Error;

/// Errors produced while rendering EPUB package documents.
#[derive(Debug, Error)]
pub enum EpubError {
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Template error: {0}")]
  Template(String),
}

impl From<tera::Error> for EpubError {
  fn from(e: tera::Error) -> Self {
    Self::Template(e.to_string())
  }
}
