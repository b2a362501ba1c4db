//! Chapter Markdown processing pipeline.
//!
//! A chapter is rendered twice. The first pass exists only to recover the
//! chapter's name and anchor id from its rendered `h1`; the second pass
//! renders the body with that heading stripped from the source, so the
//! section shell can re-emit the title without duplicating it.
use std::{
  collections::HashSet,
  fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use comrak::{Options, markdown_to_html};
use kuchikikiki::parse_html;
use log::debug;
use regex::Regex;
use tendril::TendrilSink;

use crate::{
  error::MarkdownError,
  extract,
  types::ChapterDoc,
  utils,
};

/// Matches a heading that carries a trailing `{#anchor}` attribute in the
/// rendered HTML, e.g. `<h2>Scopes {#scopes}</h2>`.
static HEADER_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"<h([1-6])>(.*?)\s*\{#([a-zA-Z0-9_-]+)\}(.*?)</h[1-6]>")
    .unwrap_or_else(|e| {
      log::error!("Failed to compile HEADER_ANCHOR_RE regex: {e}");
      utils::never_matching_regex()
    })
});

/// Options for configuring the chapter processor.
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
  /// Literal token replaced with the chapter's directory path relative to
  /// the book root, so chapter sources can reference sibling assets
  /// portably.
  pub dir_token: String,

  /// Part number whose chapters are styled as appendices.
  pub appendix_part: u32,
}

impl Default for ProcessorOptions {
  fn default() -> Self {
    Self {
      dir_token:     "__DIR__".to_string(),
      appendix_part: 9,
    }
  }
}

/// Renders chapter Markdown to HTML and extracts chapter metadata.
#[derive(Debug, Clone, Default)]
pub struct ChapterProcessor {
  options: ProcessorOptions,
}

impl ChapterProcessor {
  /// Create a new `ChapterProcessor` with the given options.
  #[must_use]
  pub fn new(options: ProcessorOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &ProcessorOptions {
    &self.options
  }

  /// Render Markdown to HTML with heading anchors resolved.
  ///
  /// Explicit `{#id}` anchors are honored; headings without one get a
  /// slugified id, made unique within the document.
  #[must_use]
  pub fn render_html(&self, markdown: &str) -> String {
    let html = markdown_to_html(markdown, &comrak_options());
    let html = apply_explicit_anchors(&html);
    ensure_heading_ids(&html)
  }

  /// Process one chapter's Markdown source into a [`ChapterDoc`].
  ///
  /// `dir` is the chapter's source directory relative to the book root;
  /// `part` and `chapter` are the ordering keys from the directory name.
  ///
  /// # Errors
  ///
  /// Returns [`MarkdownError::MissingTitle`] when the source has no
  /// top-level heading to derive the chapter name and anchor id from.
  pub fn process(
    &self,
    markdown: &str,
    dir: &str,
    part: u32,
    _chapter: u32,
  ) -> Result<ChapterDoc, MarkdownError> {
    // First pass: recover the title heading from the rendered markup.
    let html = self.render_html(markdown);
    let title = extract::title_heading(&html)
      .filter(|h| !h.id.is_empty() && !h.text.is_empty())
      .ok_or_else(|| MarkdownError::MissingTitle {
        path: PathBuf::from(dir),
      })?;

    // Strip the title line so the section shell doesn't duplicate it, and
    // resolve the directory token before the final render.
    let stripped = strip_title_line(markdown);
    let resolved = stripped.replace(&self.options.dir_token, dir);
    let body = self.render_html(&resolved);

    let class = self.section_class(part);
    debug!("processed chapter '{}' (class {class})", title.id);

    let id_attr = html_escape::encode_double_quoted_attribute(&title.id);
    let name_text = html_escape::encode_text(&title.text);
    let html = format!(
      "<section class=\"h-entry {class}\" id=\"{id_attr}\">\n  <h1 \
       class=\"p-name\">{name_text}</h1>\n  <data class=\"p-uid\" \
       value=\"{id_attr}\"></data>\n\n  <div \
       class=\"e-content\">\n{body}  </div>\n</section>\n"
    );

    Ok(ChapterDoc {
      id: title.id,
      name: title.text,
      html,
    })
  }

  /// Process a chapter source file, deriving the directory token from its
  /// location under `root`.
  ///
  /// # Errors
  ///
  /// Returns an error when the file cannot be read or has no top-level
  /// heading.
  pub fn process_file(
    &self,
    path: &Path,
    root: &Path,
    part: u32,
    chapter: u32,
  ) -> Result<ChapterDoc, MarkdownError> {
    let markdown = fs::read_to_string(path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let rel = dir.strip_prefix(root).unwrap_or(dir);

    self
      .process(&markdown, &rel.to_string_lossy(), part, chapter)
      .map_err(|err| match err {
        MarkdownError::MissingTitle { .. } => MarkdownError::MissingTitle {
          path: path.to_path_buf(),
        },
        other => other,
      })
  }

  /// Section shell class for a chapter of the given part.
  fn section_class(&self, part: u32) -> &'static str {
    if part == 0 {
      "frontmatter"
    } else if part == self.options.appendix_part {
      "appendix"
    } else {
      "chapter"
    }
  }
}

/// Comrak options approximating the Markdown "Extra" dialect: tables,
/// footnotes, fenced code, definition lists, with raw HTML passed through.
fn comrak_options() -> Options<'static> {
  let mut options = Options::default();
  options.extension.table = true;
  options.extension.footnotes = true;
  options.extension.strikethrough = true;
  options.extension.description_lists = true;
  options.extension.superscript = true;
  options.render.r#unsafe = true;
  options
}

/// Remove the first level-1 `# Title` line of the source, skipping fenced
/// code blocks so a `#` comment inside one is never mistaken for the title.
fn strip_title_line(markdown: &str) -> String {
  let mut in_fence = false;
  let mut stripped = false;
  let mut out = String::with_capacity(markdown.len());

  for line in markdown.lines() {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
      in_fence = !in_fence;
    } else if !stripped && !in_fence && line.starts_with("# ") && line.len() > 2
    {
      stripped = true;
      continue;
    }
    out.push_str(line);
    out.push('\n');
  }

  out
}

/// Convert trailing `{#id}` heading anchors into proper `id` attributes.
fn apply_explicit_anchors(html: &str) -> String {
  HEADER_ANCHOR_RE
    .replace_all(html, |caps: &regex::Captures| {
      let level = &caps[1];
      let prefix = &caps[2];
      let id = &caps[3];
      let suffix = &caps[4];
      format!("<h{level} id=\"{id}\">{prefix}{suffix}</h{level}>")
    })
    .into_owned()
}

/// Give every heading an id, slugified from its text when no explicit
/// anchor is present. Ids are made unique within the document with a
/// numeric suffix.
fn ensure_heading_ids(html: &str) -> String {
  let document = parse_html().one(html);
  let mut seen: HashSet<String> = HashSet::new();

  if let Ok(matches) = document.select("h1, h2, h3, h4, h5, h6") {
    for el in matches {
      let mut attrs = el.attributes.borrow_mut();
      if let Some(existing) = attrs.get("id") {
        seen.insert(existing.to_string());
        continue;
      }

      let base = utils::slugify(&el.as_node().text_contents());
      if base.is_empty() {
        continue;
      }

      let mut id = base.clone();
      let mut n = 1;
      while !seen.insert(id.clone()) {
        n += 1;
        id = format!("{base}-{n}");
      }
      attrs.insert("id", id);
    }
  }

  serialize_body(&document)
}

/// Serialize only the children of `<body>`, dropping the document wrapper
/// elements html5ever adds around fragments.
fn serialize_body(document: &kuchikikiki::NodeRef) -> String {
  let mut out = Vec::new();
  if let Ok(body) = document.select_first("body") {
    for child in body.as_node().children() {
      if child.serialize(&mut out).is_err() {
        log::error!("failed to serialize HTML fragment");
      }
    }
  }
  String::from_utf8(out).unwrap_or_default()
}
