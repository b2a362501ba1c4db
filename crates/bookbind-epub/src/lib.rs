//! # bookbind-epub
//!
//! Renders the three EPUB package documents from the persisted TOC and the
//! book configuration: the OPF manifest/spine (`content.opf`), the NCX
//! navigation map (`toc.ncx`), and the in-book table-of-contents page
//! (`toc.xhtml`). Zipping the package into an `.epub` is out of scope.

mod error;
mod manifest;
mod navigation;
mod toc_page;

use bookbind_toc::{ChapterEntry, Classification};
use tera::Tera;

pub use crate::{
  error::EpubError,
  manifest::render_opf,
  navigation::render_ncx,
  toc_page::render_toc_page,
};

/// Render a single embedded template with the given context.
///
/// Autoescaping is disabled; every context value is escaped at construction
/// time so XML and XHTML outputs behave identically.
pub(crate) fn render_template(
  name: &str,
  source: &str,
  context: &tera::Context,
) -> Result<String, EpubError> {
  let mut tera = Tera::default();
  tera.autoescape_on(vec![]);
  tera.add_raw_template(name, source)?;
  Ok(tera.render(name, context)?)
}

/// Escape a string for XML text content.
pub(crate) fn xml_text(s: &str) -> String {
  html_escape::encode_text(s).into_owned()
}

/// Escape a string for a double-quoted XML attribute value.
pub(crate) fn xml_attr(s: &str) -> String {
  html_escape::encode_double_quoted_attribute(s).into_owned()
}

/// Display label for a TOC entry. Only `chapter`-classified entries carry a
/// number prefix; front matter, part dividers, and appendices keep their
/// bare names.
pub(crate) fn numbered_label(
  entry: &ChapterEntry,
  chapter_number: u32,
) -> String {
  if entry.class == Classification::Chapter {
    format!("{chapter_number}. {}", entry.name)
  } else {
    entry.name.clone()
  }
}
