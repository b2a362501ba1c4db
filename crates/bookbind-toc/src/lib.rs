//! # bookbind-toc
//!
//! Table-of-contents model and builder for book assembly. Scans chapter
//! directories, derives part/chapter ordering keys from their names,
//! classifies each entry, extracts per-chapter metadata through
//! [`bookbind_markdown`], and produces the ordered TOC that every renderer
//! consumes. The TOC is persisted as a human-readable JSON artifact between
//! the build and render phases.

mod builder;
mod error;
mod toc;

pub use crate::{
  builder::TocBuilder,
  error::TocError,
  toc::{ChapterEntry, Classification, Subsection, Toc},
};
