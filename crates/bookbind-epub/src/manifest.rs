//! OPF package manifest and spine rendering.
use std::{
  collections::BTreeSet,
  path::{Path, PathBuf},
};

use bookbind_config::BookConfig;
use bookbind_toc::Toc;
use log::debug;
use serde::Serialize;
use walkdir::WalkDir;

use crate::{EpubError, render_template, xml_attr, xml_text};

const OPF_TEMPLATE: &str = include_str!("../templates/content.opf");

/// One `<item>` of the OPF manifest. Fields are pre-escaped.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct ManifestItem {
  id:         String,
  href:       String,
  media_type: String,
}

impl ManifestItem {
  fn new(id: &str, href: &str, media_type: &str) -> Self {
    Self {
      id:         xml_attr(id),
      href:       xml_attr(href),
      media_type: media_type.to_string(),
    }
  }
}

#[derive(Debug, Serialize)]
struct AuthorContext {
  name:    String,
  file_as: String,
}

/// Render the OPF package document (metadata, manifest, spine, guide).
///
/// The manifest lists the fixed front items from the configuration, every
/// chapter file, and every image found under each chapter's `images/`
/// directory at `root`, deduplicated across chapters.
///
/// # Errors
///
/// Returns an error when template rendering fails.
pub fn render_opf(
  config: &BookConfig,
  toc: &Toc,
  root: &Path,
) -> Result<String, EpubError> {
  let mut manifest = vec![
    ManifestItem::new(
      "Cover",
      &config.epub.cover_image,
      media_type_for(&config.epub.cover_image),
    ),
    ManifestItem::new("ncx", "toc.ncx", "application/x-dtbncx+xml"),
    ManifestItem::new("epub-css", &config.epub.stylesheet, "text/css"),
  ];

  for font in &config.epub.fonts {
    manifest.push(ManifestItem::new(
      &asset_id(font),
      font,
      media_type_for(font),
    ));
  }

  manifest.push(ManifestItem::new(
    "coverpage",
    &config.epub.cover_page,
    "application/xhtml+xml",
  ));
  manifest.push(ManifestItem::new(
    "copyright",
    &config.epub.copyright_page,
    "application/xhtml+xml",
  ));
  manifest.push(ManifestItem::new(
    "table-of-contents",
    "toc.xhtml",
    "application/xhtml+xml",
  ));

  for entry in &toc.entries {
    manifest.push(ManifestItem::new(
      &entry.id,
      &format!("content/{}", entry.file),
      "application/xhtml+xml",
    ));
  }

  manifest.extend(collect_chapter_images(toc, root));

  let mut spine: Vec<String> =
    vec!["copyright".to_string(), "table-of-contents".to_string()];
  spine.extend(toc.entries.iter().map(|entry| xml_attr(&entry.id)));

  let authors: Vec<AuthorContext> = config
    .authors
    .iter()
    .map(|author| AuthorContext {
      name:    xml_text(&author.name),
      file_as: xml_attr(author.file_as()),
    })
    .collect();

  let mut context = tera::Context::new();
  context.insert("title", &xml_text(&config.title));
  context.insert("language", &xml_text(&config.language));
  context.insert("identifier", &xml_text(&config.identifier));
  context.insert("identifier_id", &xml_attr(&config.identifier_id));
  context.insert("publisher", &xml_text(&config.publisher));
  context.insert("subject", &xml_text(&config.subject));
  context.insert("date", &xml_text(&config.date));
  context.insert("description", &xml_text(&config.description));
  context.insert("authors", &authors);
  context.insert("manifest", &manifest);
  context.insert("spine", &spine);
  context.insert("cover_page", &xml_attr(&config.epub.cover_page));

  render_template("content.opf", OPF_TEMPLATE, &context)
}

/// Scan every chapter's `images/` directory, deduplicating shared assets by
/// source path. Item ids are `<chapterId>_<imageFilename>`.
fn collect_chapter_images(toc: &Toc, root: &Path) -> Vec<ManifestItem> {
  let mut seen: BTreeSet<PathBuf> = BTreeSet::new();
  let mut items = Vec::new();

  for entry in &toc.entries {
    let dir = entry.dir();
    let images_dir = root.join(dir).join("images");
    if !images_dir.is_dir() {
      continue;
    }

    for file in WalkDir::new(&images_dir)
      .min_depth(1)
      .max_depth(1)
      .sort_by_file_name()
      .into_iter()
      .filter_map(Result::ok)
      .filter(|e| e.file_type().is_file())
    {
      let path = file.into_path();
      if !seen.insert(path.clone()) {
        continue;
      }

      let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        continue;
      };

      items.push(ManifestItem::new(
        &format!("{}_{name}", entry.id),
        &format!("content/{dir}/images/{name}"),
        media_type_for(name),
      ));
    }
  }

  debug!("manifested {} chapter images", items.len());
  items
}

/// Media type from a file extension, `jpg` normalized to `jpeg`.
fn media_type_for(href: &str) -> &'static str {
  let ext = Path::new(href)
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase)
    .unwrap_or_default();

  match ext.as_str() {
    "jpg" | "jpeg" => "image/jpeg",
    "png" => "image/png",
    "gif" => "image/gif",
    "svg" => "image/svg+xml",
    "css" => "text/css",
    "otf" => "application/vnd.ms-opentype",
    "ttf" => "application/x-font-ttf",
    "xhtml" | "html" => "application/xhtml+xml",
    "ncx" => "application/x-dtbncx+xml",
    _ => "application/octet-stream",
  }
}

/// Manifest id for a configured asset href, from its file stem.
fn asset_id(href: &str) -> String {
  let stem = Path::new(href)
    .file_stem()
    .and_then(|s| s.to_str())
    .unwrap_or("asset");

  stem
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric(), "-")
}
