//! In-book table-of-contents page (XHTML) rendering.
use bookbind_config::BookConfig;
use bookbind_toc::{Classification, Toc};
use serde::Serialize;

use crate::{EpubError, numbered_label, render_template, xml_attr, xml_text};

const TOC_PAGE_TEMPLATE: &str = include_str!("../templates/toc.xhtml");

/// One list row of the TOC page. Fields are pre-escaped.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct TocItem {
  href:     String,
  label:    String,
  children: Vec<TocItem>,
}

/// Render the TOC page mirroring the NCX navigation map, with the same
/// chapter-only numbering.
///
/// # Errors
///
/// Returns an error when template rendering fails.
pub fn render_toc_page(
  config: &BookConfig,
  toc: &Toc,
) -> Result<String, EpubError> {
  let mut context = tera::Context::new();
  context.insert("title", &xml_text(&config.title));
  context.insert("items", &build_items(toc));

  render_template("toc.xhtml", TOC_PAGE_TEMPLATE, &context)
}

fn build_items(toc: &Toc) -> Vec<TocItem> {
  let mut chapter_number = 0;
  let mut items = Vec::with_capacity(toc.entries.len());

  for entry in &toc.entries {
    if entry.class == Classification::Chapter {
      chapter_number += 1;
    }

    let children = entry
      .children
      .iter()
      .flatten()
      .map(|child| TocItem {
        href:     xml_attr(&format!("content/{}#{}", entry.file, child.id)),
        label:    xml_text(&child.name),
        children: Vec::new(),
      })
      .collect();

    items.push(TocItem {
      href: xml_attr(&format!("content/{}#{}", entry.file, entry.id)),
      label: xml_text(&numbered_label(entry, chapter_number)),
      children,
    });
  }

  items
}
