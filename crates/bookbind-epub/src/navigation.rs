//! NCX navigation map rendering.
use bookbind_config::BookConfig;
use bookbind_toc::{Classification, Toc};
use serde::Serialize;

use crate::{EpubError, numbered_label, render_template, xml_attr, xml_text};

const NCX_TEMPLATE: &str = include_str!("../templates/toc.ncx");

/// One `<navPoint>`: a chapter, or a nested subsection. Fields are
/// pre-escaped.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct NavPoint {
  id:         String,
  play_order: usize,
  label:      String,
  src:        String,
  children:   Vec<NavPoint>,
}

#[derive(Debug, Serialize)]
struct AuthorContext {
  name: String,
}

/// Render the NCX navigation document.
///
/// `playOrder` is a single counter over every chapter and subsection in
/// document order, starting at 1. Chapter labels carry a number prefix only
/// for `chapter`-classified entries.
///
/// # Errors
///
/// Returns an error when template rendering fails.
pub fn render_ncx(config: &BookConfig, toc: &Toc) -> Result<String, EpubError> {
  let authors: Vec<AuthorContext> = config
    .authors
    .iter()
    .map(|author| AuthorContext {
      name: xml_text(&author.name),
    })
    .collect();

  let mut context = tera::Context::new();
  context.insert("identifier", &xml_attr(&config.identifier));
  context.insert("title", &xml_text(&config.title));
  context.insert("authors", &authors);
  context.insert("nav_points", &build_nav_map(toc));

  render_template("toc.ncx", NCX_TEMPLATE, &context)
}

/// Assemble the navigation map with contiguous play-order numbering.
fn build_nav_map(toc: &Toc) -> Vec<NavPoint> {
  let mut play_order = 0;
  let mut chapter_number = 0;
  let mut points = Vec::with_capacity(toc.entries.len());

  for entry in &toc.entries {
    if entry.class == Classification::Chapter {
      chapter_number += 1;
    }
    play_order += 1;
    let parent_order = play_order;

    let children: Vec<NavPoint> = entry
      .children
      .iter()
      .flatten()
      .map(|child| {
        play_order += 1;
        NavPoint {
          id:         xml_attr(&child.id),
          play_order,
          label:      xml_text(&child.name),
          src:        xml_attr(&format!("content/{}#{}", entry.file, child.id)),
          children:   Vec::new(),
        }
      })
      .collect();

    points.push(NavPoint {
      id: xml_attr(&entry.id),
      play_order: parent_order,
      label: xml_text(&numbered_label(entry, chapter_number)),
      src: xml_attr(&format!("content/{}#{}", entry.file, entry.id)),
      children,
    });
  }

  points
}
