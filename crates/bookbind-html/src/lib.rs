//! # bookbind-html
//!
//! Assembles the whole book into one navigable HTML document: fixed front
//! matter, a table of contents with nested subsection links, every
//! chapter's full content in TOC order, and fixed back matter. The output
//! is the web and print/PDF target.
//!
//! The renderer is driven entirely by the persisted TOC artifact plus the
//! chapter sources; Markdown chapters are re-rendered here, pre-rendered
//! markup chapters are included verbatim.

mod assembler;
mod error;

pub use crate::{assembler::render_book, error::RenderError};
