//! Single-document assembly.
use std::{fs, path::Path};

use bookbind_config::BookConfig;
use bookbind_markdown::{ChapterProcessor, ProcessorOptions};
use bookbind_toc::{ChapterEntry, Toc};
use log::debug;
use serde::Serialize;
use tera::Tera;

use crate::error::RenderError;

const BOOK_TEMPLATE: &str = include_str!("../templates/book.html");

/// One row of the document's table of contents. Fields are pre-escaped.
#[derive(Debug, Clone, Serialize)]
struct TocRow {
  class:    &'static str,
  id:       String,
  name:     String,
  children: Vec<TocChild>,
}

#[derive(Debug, Clone, Serialize)]
struct TocChild {
  id:   String,
  name: String,
}

/// Render the whole book as one HTML document.
///
/// Chapter sources are resolved against `root`, the same way the TOC
/// builder found them.
///
/// # Errors
///
/// Fails when a chapter or include file cannot be read, a Markdown chapter
/// no longer has a title heading, or template rendering fails.
pub fn render_book(
  config: &BookConfig,
  toc: &Toc,
  root: &Path,
) -> Result<String, RenderError> {
  let processor = ChapterProcessor::new(ProcessorOptions {
    appendix_part: config.appendix_part,
    ..ProcessorOptions::default()
  });

  let chapters = toc
    .entries
    .iter()
    .map(|entry| chapter_html(&processor, entry, root))
    .collect::<Result<Vec<_>, _>>()?;

  let rows: Vec<TocRow> = toc
    .entries
    .iter()
    .map(|entry| TocRow {
      class:    entry.class.as_str(),
      id:       attr(&entry.id),
      name:     text(&entry.name),
      children: entry
        .children
        .iter()
        .flatten()
        .map(|child| TocChild {
          id:   attr(&child.id),
          name: text(&child.name),
        })
        .collect(),
    })
    .collect();

  let stylesheets: Vec<String> =
    config.html.stylesheets.iter().map(|s| attr(s)).collect();

  let mut context = tera::Context::new();
  context.insert("title", &text(&config.title));
  context.insert("stylesheets", &stylesheets);
  context.insert("toc", &rows);
  context.insert("chapters", &chapters);
  context
    .insert("front_matter", &read_includes(&config.html.front_includes, root)?);
  context
    .insert("back_matter", &read_includes(&config.html.back_includes, root)?);

  let mut tera = Tera::default();
  tera.autoescape_on(vec![]);
  tera.add_raw_template("book.html", BOOK_TEMPLATE)?;
  Ok(tera.render("book.html", &context)?)
}

/// Full HTML for one chapter: Markdown sources go through the chapter
/// pipeline, pre-rendered markup is an opaque include.
fn chapter_html(
  processor: &ChapterProcessor,
  entry: &ChapterEntry,
  root: &Path,
) -> Result<String, RenderError> {
  let path = root.join(&entry.src);

  if entry.is_markdown() {
    let doc = processor.process_file(&path, root, entry.part, entry.chapter)?;
    Ok(doc.html)
  } else {
    debug!("including markup chapter verbatim: {}", entry.src);
    Ok(fs::read_to_string(&path)?)
  }
}

/// Concatenate raw HTML include files in order.
fn read_includes(paths: &[String], root: &Path) -> Result<String, RenderError> {
  let mut html = String::new();
  for path in paths {
    html.push_str(&fs::read_to_string(root.join(path))?);
    html.push('\n');
  }
  Ok(html)
}

fn text(s: &str) -> String {
  html_escape::encode_text(s).into_owned()
}

fn attr(s: &str) -> String {
  html_escape::encode_double_quoted_attribute(s).into_owned()
}
