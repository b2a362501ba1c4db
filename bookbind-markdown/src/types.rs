//! Types for the bookbind-markdown public API.
use serde::{Deserialize, Serialize};

/// A heading found in a rendered chapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading text (inline content, no markup).
  pub text:  String,
  /// Heading level (1-6).
  pub level: u8,
  /// Anchor ID carried by the heading element. Empty when the element has
  /// no `id` attribute.
  pub id:    String,
}

/// A fully processed chapter: extracted metadata plus the wrapped HTML body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChapterDoc {
  /// Stable anchor ID taken from the chapter's top-level heading.
  pub id: String,

  /// Display name taken from the chapter's top-level heading text.
  pub name: String,

  /// Rendered HTML body, wrapped in the chapter section shell.
  pub html: String,
}
