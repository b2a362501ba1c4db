//! TOC construction from a book source tree.
//!
//! One directory per chapter, named `<part>_<chapter>[_suffix]`, containing
//! either `index.md` (processed through the Markdown pipeline) or
//! `index.xhtml` (pre-rendered markup, included opaquely at render time but
//! still mined for its title and subsection anchors).
use std::{
  fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use bookbind_markdown::{ChapterProcessor, extract, utils};
use log::{debug, info};
use regex::Regex;

use crate::{
  error::TocError,
  toc::{ChapterEntry, Classification, Subsection, Toc},
};

/// Two leading numeric groups of a chapter directory name.
static CHAPTER_DIR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\d)_(\d+)").unwrap_or_else(|e| {
    log::error!("Failed to compile CHAPTER_DIR_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// Builds a [`Toc`] by scanning chapter directories under a book root.
pub struct TocBuilder {
  root:          PathBuf,
  processor:     ChapterProcessor,
  appendix_part: u32,
}

impl TocBuilder {
  /// Create a builder for the book rooted at `root`.
  #[must_use]
  pub fn new(root: &Path) -> Self {
    Self {
      root:          root.to_path_buf(),
      processor:     ChapterProcessor::default(),
      appendix_part: 9,
    }
  }

  /// Use a custom chapter processor.
  #[must_use]
  pub fn with_processor(mut self, processor: ChapterProcessor) -> Self {
    self.processor = processor;
    self
  }

  /// Override the part number classified as appendix material.
  #[must_use]
  pub const fn with_appendix_part(mut self, part: u32) -> Self {
    self.appendix_part = part;
    self
  }

  /// Scan, classify, and assemble the table of contents.
  ///
  /// Entries are explicitly sorted by `(part, chapter)`; directory listing
  /// order is never trusted. The assembled TOC is validated before it is
  /// returned.
  ///
  /// # Errors
  ///
  /// Fails on unreadable sources, a chapter directory that does not match
  /// the naming convention, a chapter without a top-level heading, or an
  /// anchor id collision.
  pub fn build(&self) -> Result<Toc, TocError> {
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(&self.root)? {
      let dir = dir_entry?.path();
      if !dir.is_dir() {
        continue;
      }

      let Some(index) = find_index(&dir) else {
        // Not a chapter directory (assets, css, build output).
        continue;
      };

      entries.push(self.build_entry(&dir, &index)?);
    }

    entries.sort_by_key(|entry| (entry.part, entry.chapter));
    info!("assembled TOC with {} chapters", entries.len());

    let toc = Toc { entries };
    toc.validate()?;
    Ok(toc)
  }

  /// Build the TOC entry for one chapter directory.
  fn build_entry(
    &self,
    dir: &Path,
    index: &Path,
  ) -> Result<ChapterEntry, TocError> {
    let dir_name = dir
      .file_name()
      .and_then(|n| n.to_str())
      .unwrap_or_default();

    let (part, chapter) = parse_dir_name(dir_name).ok_or_else(|| {
      TocError::BadChapterDir {
        dir: dir.to_path_buf(),
      }
    })?;
    let class = Classification::classify(part, chapter, self.appendix_part);

    let (id, name, body) = if is_markdown(index) {
      let doc = self.processor.process_file(index, &self.root, part, chapter)?;
      (doc.id, doc.name, doc.html)
    } else {
      // Pre-rendered markup: no Markdown pass, metadata comes straight
      // from the markup itself.
      let html = fs::read_to_string(index)?;
      let title = extract::title_heading(&html)
        .filter(|h| !h.id.is_empty() && !h.text.is_empty())
        .ok_or_else(|| TocError::MissingTitle {
          path: index.to_path_buf(),
        })?;
      (title.id, title.text, html)
    };

    let children: Vec<Subsection> = extract::subsection_headings(&body)
      .into_iter()
      .map(|h| Subsection {
        name: h.text,
        id:   h.id,
      })
      .collect();

    debug!(
      "chapter {dir_name}: id={id} class={} children={}",
      class.as_str(),
      children.len()
    );

    let index_name = index
      .file_name()
      .and_then(|n| n.to_str())
      .unwrap_or_default();

    Ok(ChapterEntry {
      src: format!("{dir_name}/{index_name}"),
      file: format!("{dir_name}/index.xhtml"),
      id,
      name,
      class,
      part,
      chapter,
      children: if children.is_empty() {
        None
      } else {
        Some(children)
      },
    })
  }
}

/// Locate the chapter index file inside a directory, Markdown preferred.
fn find_index(dir: &Path) -> Option<PathBuf> {
  for candidate in ["index.md", "index.xhtml"] {
    let path = dir.join(candidate);
    if path.is_file() {
      return Some(path);
    }
  }
  None
}

/// Extract `(part, chapter)` from a chapter directory name.
fn parse_dir_name(name: &str) -> Option<(u32, u32)> {
  let caps = CHAPTER_DIR_RE.captures(name)?;
  let part = caps.get(1)?.as_str().parse().ok()?;
  let chapter = caps.get(2)?.as_str().parse().ok()?;
  Some((part, chapter))
}

fn is_markdown(path: &Path) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
mod tests {
  use super::parse_dir_name;

  #[test]
  fn dir_names_parse_two_numeric_groups() {
    assert_eq!(parse_dir_name("1_01_intro"), Some((1, 1)));
    assert_eq!(parse_dir_name("0_00_start"), Some((0, 0)));
    assert_eq!(parse_dir_name("9_12"), Some((9, 12)));
    assert_eq!(parse_dir_name("notes"), None);
    assert_eq!(parse_dir_name("_1_2"), None);
  }
}
