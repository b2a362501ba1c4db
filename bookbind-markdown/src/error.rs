use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors produced while processing a chapter source.
#[derive(Debug, Error)]
pub enum MarkdownError {
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error(
    "chapter {} has no top-level heading; every chapter needs a `# Title` \
     to derive its name and anchor id",
    .path.display()
  )]
  MissingTitle { path: PathBuf },
}
