//! Table-of-contents data model and JSON round-trip.
//!
//! The serialized TOC is the sole interchange artifact between the build
//! phase and the renderers; nothing is shared in memory across that
//! boundary.
use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::TocError;

/// Classification of a TOC entry, controlling numbering and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
  /// Preface material; part number 0.
  Frontmatter,
  /// Part divider; chapter number 0 within a non-zero part.
  Part,
  /// Regular numbered chapter.
  Chapter,
  /// Appendix chapter.
  Appendix,
}

impl Classification {
  /// Classify an entry from its ordering keys. Pure in
  /// `(part, chapter, appendix_part)`.
  #[must_use]
  pub const fn classify(part: u32, chapter: u32, appendix_part: u32) -> Self {
    if part == 0 {
      Self::Frontmatter
    } else if chapter == 0 {
      Self::Part
    } else if part == appendix_part {
      Self::Appendix
    } else {
      Self::Chapter
    }
  }

  /// Lowercase name as used in CSS classes and the TOC JSON.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Frontmatter => "frontmatter",
      Self::Part => "part",
      Self::Chapter => "chapter",
      Self::Appendix => "appendix",
    }
  }
}

/// A subsection of a chapter, sourced from an `h2` heading with an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subsection {
  /// Display name.
  pub name: String,
  /// Anchor id within the chapter document.
  pub id:   String,
}

/// One chapter's metadata in the table of contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChapterEntry {
  /// Source path relative to the book root (e.g. `1_01_intro/index.md`).
  pub src: String,

  /// Output path relative to the content root (e.g. `1_01_intro/index.xhtml`).
  pub file: String,

  /// Stable anchor id, unique across the book.
  pub id: String,

  /// Display name.
  pub name: String,

  /// Entry classification.
  pub class: Classification,

  /// Part ordering key from the directory name.
  pub part: u32,

  /// Chapter ordering key from the directory name.
  pub chapter: u32,

  /// Subsection entries, omitted from the JSON when the chapter has none.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub children: Option<Vec<Subsection>>,
}

impl ChapterEntry {
  /// Directory portion of the source path.
  #[must_use]
  pub fn dir(&self) -> &str {
    Path::new(&self.src)
      .parent()
      .and_then(Path::to_str)
      .unwrap_or("")
  }

  /// Whether the source is Markdown (as opposed to pre-rendered markup).
  #[must_use]
  pub fn is_markdown(&self) -> bool {
    Path::new(&self.src)
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
  }
}

/// An ordered table of contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Toc {
  /// Entries in reading order.
  pub entries: Vec<ChapterEntry>,
}

impl Toc {
  /// Serialize with human-readable formatting. Path separators are never
  /// escaped by serde_json, matching the artifact the renderers expect.
  ///
  /// # Errors
  ///
  /// Returns an error when serialization fails.
  pub fn to_json_pretty(&self) -> Result<String, TocError> {
    let mut json = serde_json::to_string_pretty(self)?;
    json.push('\n');
    Ok(json)
  }

  /// Parse a TOC from its JSON representation.
  ///
  /// # Errors
  ///
  /// Returns an error when the JSON does not match the TOC schema.
  pub fn from_json(json: &str) -> Result<Self, TocError> {
    Ok(serde_json::from_str(json)?)
  }

  /// Write the TOC JSON artifact to disk.
  ///
  /// # Errors
  ///
  /// Returns an error when serialization or the write fails.
  pub fn save(&self, path: &Path) -> Result<(), TocError> {
    fs::write(path, self.to_json_pretty()?)?;
    Ok(())
  }

  /// Read a TOC JSON artifact back from disk.
  ///
  /// # Errors
  ///
  /// Returns an error when the file cannot be read or parsed.
  pub fn load(path: &Path) -> Result<Self, TocError> {
    let json = fs::read_to_string(path)?;
    Self::from_json(&json)
  }

  /// Check the TOC invariants: every chapter and subsection id is non-empty
  /// and unique across the whole book.
  ///
  /// # Errors
  ///
  /// Returns [`TocError::MissingTitle`] or [`TocError::DuplicateId`] on the
  /// first violation found.
  pub fn validate(&self) -> Result<(), TocError> {
    let mut seen: HashSet<&str> = HashSet::new();

    for entry in &self.entries {
      if entry.id.is_empty() || entry.name.is_empty() {
        return Err(TocError::MissingTitle {
          path: entry.src.clone().into(),
        });
      }
      if !seen.insert(&entry.id) {
        return Err(TocError::DuplicateId {
          id: entry.id.clone(),
        });
      }

      for child in entry.children.iter().flatten() {
        if !seen.insert(&child.id) {
          return Err(TocError::DuplicateId {
            id: child.id.clone(),
          });
        }
      }
    }

    Ok(())
  }
}
