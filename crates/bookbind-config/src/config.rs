//! Book configuration loaded from `book.toml`.
use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default configuration written by `bookbind init`.
pub const DEFAULT_CONFIG: &str = include_str!("../templates/book.toml");

fn default_title() -> String {
  "Untitled Book".to_string()
}

fn default_language() -> String {
  "en-us".to_string()
}

fn default_identifier() -> String {
  "urn:isbn:0000000000000".to_string()
}

fn default_identifier_id() -> String {
  "BookId".to_string()
}

const fn default_appendix_part() -> u32 {
  9
}

fn default_toc_file() -> String {
  "toc.json".to_string()
}

fn default_epub_stylesheet() -> String {
  "css/epub.css".to_string()
}

fn default_cover_image() -> String {
  "images/cover.jpg".to_string()
}

fn default_cover_page() -> String {
  "content/00_start/cover.xhtml".to_string()
}

fn default_copyright_page() -> String {
  "content/00_start/copyright.xhtml".to_string()
}

/// One book author.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Author {
  /// Display name, e.g. "Lee Brandt".
  pub name: String,

  /// Sorting form for the OPF `opf:file-as` attribute, e.g. "Brandt, Lee".
  #[serde(default)]
  pub file_as: Option<String>,
}

impl Author {
  /// The sorting form, falling back to the display name.
  #[must_use]
  pub fn file_as(&self) -> &str {
    self.file_as.as_deref().unwrap_or(&self.name)
  }
}

/// Settings for the single-document HTML output.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct HtmlConfig {
  /// Stylesheet hrefs linked from the document head.
  #[serde(default)]
  pub stylesheets: Vec<String>,

  /// Raw HTML files inserted before the table of contents, in order
  /// (cover, title page, copyright). Paths relative to the book root.
  #[serde(default)]
  pub front_includes: Vec<String>,

  /// Raw HTML files appended after the last chapter.
  #[serde(default)]
  pub back_includes: Vec<String>,
}

/// Settings for the EPUB package outputs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EpubConfig {
  /// Cover image href inside the package.
  #[serde(default = "default_cover_image")]
  pub cover_image: String,

  /// Stylesheet href inside the package.
  #[serde(default = "default_epub_stylesheet")]
  pub stylesheet: String,

  /// Embedded font hrefs inside the package.
  #[serde(default)]
  pub fonts: Vec<String>,

  /// Cover page href inside the package.
  #[serde(default = "default_cover_page")]
  pub cover_page: String,

  /// Copyright page href inside the package.
  #[serde(default = "default_copyright_page")]
  pub copyright_page: String,
}

impl Default for EpubConfig {
  fn default() -> Self {
    Self {
      cover_image:    default_cover_image(),
      stylesheet:     default_epub_stylesheet(),
      fonts:          Vec::new(),
      cover_page:     default_cover_page(),
      copyright_page: default_copyright_page(),
    }
  }
}

/// Configuration for one book, normally loaded from `book.toml` at the book
/// root.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BookConfig {
  /// Book title, used in every output head/metadata block.
  #[serde(default = "default_title")]
  pub title: String,

  /// Publication language tag.
  #[serde(default = "default_language")]
  pub language: String,

  /// Unique identifier, usually `urn:isbn:...`.
  #[serde(default = "default_identifier")]
  pub identifier: String,

  /// XML id of the identifier element, referenced by the OPF
  /// `unique-identifier` attribute.
  #[serde(default = "default_identifier_id")]
  pub identifier_id: String,

  /// Publisher name.
  #[serde(default)]
  pub publisher: String,

  /// Subject heading.
  #[serde(default)]
  pub subject: String,

  /// Publication date (YYYY-MM-DD).
  #[serde(default)]
  pub date: String,

  /// Back-cover description.
  #[serde(default)]
  pub description: String,

  /// Authors in credit order.
  #[serde(default)]
  pub authors: Vec<Author>,

  /// Part number whose chapters are classified as appendices.
  #[serde(default = "default_appendix_part")]
  pub appendix_part: u32,

  /// Path of the TOC JSON artifact, relative to the book root.
  #[serde(default = "default_toc_file")]
  pub toc_file: String,

  /// Single-document HTML settings.
  #[serde(default)]
  pub html: HtmlConfig,

  /// EPUB package settings.
  #[serde(default)]
  pub epub: EpubConfig,
}

impl Default for BookConfig {
  fn default() -> Self {
    Self {
      title:         default_title(),
      language:      default_language(),
      identifier:    default_identifier(),
      identifier_id: default_identifier_id(),
      publisher:     String::new(),
      subject:       String::new(),
      date:          String::new(),
      description:   String::new(),
      authors:       Vec::new(),
      appendix_part: default_appendix_part(),
      toc_file:      default_toc_file(),
      html:          HtmlConfig::default(),
      epub:          EpubConfig::default(),
    }
  }
}

impl BookConfig {
  /// Load configuration from a TOML file.
  ///
  /// # Errors
  ///
  /// Returns an error when the file cannot be read or parsed.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path.as_ref())?;
    let config = toml::from_str(&content)?;
    Ok(config)
  }

  /// Load `book.toml` from the book root, falling back to defaults when the
  /// file does not exist.
  ///
  /// # Errors
  ///
  /// Returns an error when the file exists but cannot be read or parsed.
  pub fn load_or_default(root: &Path) -> Result<Self, ConfigError> {
    let path = root.join("book.toml");
    if path.is_file() {
      Self::from_file(&path)
    } else {
      log::debug!("no book.toml at {}, using defaults", root.display());
      Ok(Self::default())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_config_template_parses() {
    let config: BookConfig =
      toml::from_str(DEFAULT_CONFIG).expect("template must parse");
    assert_eq!(config.appendix_part, 9);
    assert!(!config.title.is_empty());
  }

  #[test]
  fn minimal_config_uses_defaults() {
    let config: BookConfig =
      toml::from_str("title = \"API Security\"\n").expect("parse");
    assert_eq!(config.title, "API Security");
    assert_eq!(config.language, "en-us");
    assert_eq!(config.toc_file, "toc.json");
    assert!(config.authors.is_empty());
  }

  #[test]
  fn authors_parse_with_file_as() {
    let config: BookConfig = toml::from_str(
      r#"
title = "Book"

[[authors]]
name = "Lee Brandt"
file_as = "Brandt, Lee"

[[authors]]
name = "Ada"
"#,
    )
    .expect("parse");

    assert_eq!(config.authors.len(), 2);
    assert_eq!(config.authors[0].file_as(), "Brandt, Lee");
    assert_eq!(config.authors[1].file_as(), "Ada");
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let config = BookConfig::load_or_default(tmp.path()).expect("load");
    assert_eq!(config, BookConfig::default());
  }
}
