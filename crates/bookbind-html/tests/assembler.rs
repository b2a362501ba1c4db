use std::fs;
use std::path::Path;

use bookbind_config::BookConfig;
use bookbind_html::render_book;
use bookbind_toc::TocBuilder;

fn write_chapter(root: &Path, dir: &str, markdown: &str) {
  let chapter_dir = root.join(dir);
  fs::create_dir_all(&chapter_dir).expect("create chapter dir");
  fs::write(chapter_dir.join("index.md"), markdown).expect("write chapter");
}

#[test]
fn document_contains_toc_and_chapters_in_order() {
  let tmp = tempfile::tempdir().expect("temp dir");
  let root = tmp.path();
  write_chapter(root, "0_01_preface", "# Preface\n\nWelcome.\n");
  write_chapter(
    root,
    "1_01_intro",
    "# Introduction\n\nBody.\n\n## Scopes\n\nDetail.\n",
  );

  let toc = TocBuilder::new(root).build().expect("build toc");
  let config = BookConfig {
    title: "API Security".to_string(),
    ..BookConfig::default()
  };

  let html = render_book(&config, &toc, root).expect("render book");

  assert!(html.contains("<title>API Security</title>"));
  assert!(html.contains(
    r##"<li class="frontmatter"><a href="#preface">Preface</a>"##
  ));
  assert!(html.contains(
    r##"<li class="chapter"><a href="#introduction">Introduction</a>"##
  ));
  assert!(html.contains(r##"<a href="#scopes">Scopes</a>"##));

  // TOC section precedes the chapter bodies; preface body precedes intro.
  let toc_pos = html.find(r#"<section id="toc""#).expect("toc section");
  let preface_link = html.find(r##"href="#preface""##).expect("preface link");
  let preface_body = html
    .find(r#"<section class="h-entry frontmatter" id="preface">"#)
    .expect("preface body");
  let intro_body = html
    .find(r#"<section class="h-entry chapter" id="introduction">"#)
    .expect("intro body");
  assert!(preface_link < preface_body);
  assert!(toc_pos < preface_body && preface_body < intro_body);
}

#[test]
fn front_and_back_includes_land_at_fixed_positions() {
  let tmp = tempfile::tempdir().expect("temp dir");
  let root = tmp.path();
  write_chapter(root, "1_01_only", "# Only Chapter\n\nx\n");

  fs::create_dir_all(root.join("0_00_pdf")).expect("create includes dir");
  fs::write(root.join("0_00_pdf/cover.html"), "<div id=\"cover\">C</div>\n")
    .expect("write cover");
  fs::write(root.join("0_00_pdf/back.html"), "<div id=\"back\">B</div>\n")
    .expect("write back");

  let toc = TocBuilder::new(root).build().expect("build toc");
  let config = BookConfig {
    html: bookbind_config::HtmlConfig {
      stylesheets:    vec!["css/book.css".to_string()],
      front_includes: vec!["0_00_pdf/cover.html".to_string()],
      back_includes:  vec!["0_00_pdf/back.html".to_string()],
    },
    ..BookConfig::default()
  };

  let html = render_book(&config, &toc, root).expect("render book");

  assert!(html.contains(r#"<link rel="stylesheet" href="css/book.css"/>"#));

  let cover = html.find(r#"<div id="cover">"#).expect("cover include");
  let toc_pos = html.find(r#"<section id="toc""#).expect("toc section");
  let chapter = html.find(r#"id="only-chapter""#).expect("chapter");
  let back = html.find(r#"<div id="back">"#).expect("back include");
  assert!(cover < toc_pos && toc_pos < chapter && chapter < back);
}

#[test]
fn markup_chapters_are_included_verbatim() {
  let tmp = tempfile::tempdir().expect("temp dir");
  let root = tmp.path();
  let dir = root.join("0_01_cover");
  fs::create_dir_all(&dir).expect("create dir");
  fs::write(
    dir.join("index.xhtml"),
    "<section id=\"cover\"><h1 id=\"cover-title\">Cover</h1><!-- raw --></section>\n",
  )
  .expect("write markup chapter");

  let toc = TocBuilder::new(root).build().expect("build toc");
  let html =
    render_book(&BookConfig::default(), &toc, root).expect("render book");

  // Included byte-for-byte, comment and all; no Markdown pass applied.
  assert!(html.contains("<!-- raw -->"));
}

#[test]
fn rendered_document_survives_toc_round_trip() {
  let tmp = tempfile::tempdir().expect("temp dir");
  let root = tmp.path();
  write_chapter(root, "0_01_preface", "# Preface\n\nWelcome.\n");
  write_chapter(
    root,
    "1_01_intro",
    "# Introduction\n\nBody.\n\n## Scopes\n\nDetail.\n",
  );

  let toc = TocBuilder::new(root).build().expect("build toc");
  let config = BookConfig::default();
  let direct = render_book(&config, &toc, root).expect("render book");

  let json_path = root.join("toc.json");
  toc.save(&json_path).expect("save toc");
  let reloaded = bookbind_toc::Toc::load(&json_path).expect("load toc");

  assert_eq!(
    render_book(&config, &reloaded, root).expect("render book"),
    direct
  );
}

#[test]
fn missing_include_fails_fast() {
  let tmp = tempfile::tempdir().expect("temp dir");
  let root = tmp.path();
  write_chapter(root, "1_01_only", "# Only\n\nx\n");

  let toc = TocBuilder::new(root).build().expect("build toc");
  let config = BookConfig {
    html: bookbind_config::HtmlConfig {
      front_includes: vec!["missing/cover.html".to_string()],
      ..bookbind_config::HtmlConfig::default()
    },
    ..BookConfig::default()
  };

  assert!(render_book(&config, &toc, root).is_err());
}
