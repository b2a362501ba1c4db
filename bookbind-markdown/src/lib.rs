//! # bookbind-markdown
//!
//! Markdown chapter processor for book assembly. Renders a chapter's
//! Markdown source to HTML ("Extra" dialect semantics: tables, footnotes,
//! fenced code, definition lists), extracts its title and anchor id from
//! the rendered first-level heading, and wraps the body in a microformat
//! section shell for downstream styling.
//!
//! ## Quick Start
//!
//! ```rust
//! use bookbind_markdown::{ChapterProcessor, ProcessorOptions};
//!
//! let processor = ChapterProcessor::new(ProcessorOptions::default());
//! let doc = processor
//!   .process("# Introduction\n\nHello.\n", "1_01_intro", 1, 1)
//!   .expect("chapter has a title heading");
//!
//! assert_eq!(doc.id, "introduction");
//! assert_eq!(doc.name, "Introduction");
//! ```

mod error;
pub mod extract;
mod processor;
mod types;
pub mod utils;

pub use crate::{
  error::MarkdownError,
  processor::{ChapterProcessor, ProcessorOptions},
  types::{ChapterDoc, Heading},
};
