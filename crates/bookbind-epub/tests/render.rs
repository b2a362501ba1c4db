use std::fs;
use std::path::Path;

use bookbind_config::{Author, BookConfig};
use bookbind_epub::{render_ncx, render_opf, render_toc_page};
use bookbind_toc::{ChapterEntry, Classification, Subsection, Toc};

fn config() -> BookConfig {
  BookConfig {
    title: "API Security".to_string(),
    identifier: "urn:isbn:9781387814190".to_string(),
    identifier_id: "ApiSecurity".to_string(),
    publisher: "Okta".to_string(),
    authors: vec![
      Author {
        name:    "Lee Brandt".to_string(),
        file_as: Some("Brandt, Lee".to_string()),
      },
      Author {
        name:    "Keith Casey".to_string(),
        file_as: Some("Casey, Keith".to_string()),
      },
    ],
    ..BookConfig::default()
  }
}

fn chapter(
  dir: &str,
  id: &str,
  name: &str,
  class: Classification,
  part: u32,
  number: u32,
  children: Option<Vec<Subsection>>,
) -> ChapterEntry {
  ChapterEntry {
    src: format!("{dir}/index.md"),
    file: format!("{dir}/index.xhtml"),
    id: id.to_string(),
    name: name.to_string(),
    class,
    part,
    chapter: number,
    children,
  }
}

fn sample_toc() -> Toc {
  Toc {
    entries: vec![
      chapter(
        "0_01_preface",
        "preface",
        "Preface",
        Classification::Frontmatter,
        0,
        1,
        None,
      ),
      chapter(
        "1_01_intro",
        "introduction",
        "Introduction",
        Classification::Chapter,
        1,
        1,
        Some(vec![Subsection {
          name: "Scopes & Claims".to_string(),
          id:   "scopes-claims".to_string(),
        }]),
      ),
      chapter(
        "1_02_tls",
        "transport-security",
        "Transport Security",
        Classification::Chapter,
        1,
        2,
        None,
      ),
    ],
  }
}

#[test]
fn opf_lists_chapters_in_manifest_and_spine() {
  let tmp = tempfile::tempdir().expect("temp dir");
  let opf = render_opf(&config(), &sample_toc(), tmp.path()).expect("render");

  assert!(opf.contains(r#"unique-identifier="ApiSecurity""#));
  assert!(opf.contains("<dc:title>API Security</dc:title>"));
  assert!(opf.contains(
    r#"<dc:creator opf:file-as="Brandt, Lee" opf:role="aut">Lee Brandt</dc:creator>"#
  ));
  assert!(opf.contains(
    r#"<item id="introduction" media-type="application/xhtml+xml" href="content/1_01_intro/index.xhtml"></item>"#
  ));

  // Spine: fixed front entries first, then chapters in TOC order.
  let copyright = opf.find(r#"<itemref idref="copyright"/>"#).expect("copyright");
  let toc_ref = opf
    .find(r#"<itemref idref="table-of-contents"/>"#)
    .expect("toc ref");
  let preface = opf.find(r#"<itemref idref="preface"/>"#).expect("preface");
  let intro = opf
    .find(r#"<itemref idref="introduction"/>"#)
    .expect("introduction");
  assert!(copyright < toc_ref && toc_ref < preface && preface < intro);
}

#[test]
fn opf_manifests_each_image_once() {
  let tmp = tempfile::tempdir().expect("temp dir");
  let root = tmp.path();

  let images = root.join("1_01_intro/images");
  fs::create_dir_all(&images).expect("create images dir");
  fs::write(images.join("flow.png"), b"png").expect("write image");
  fs::write(images.join("cover.jpg"), b"jpg").expect("write image");

  // Second chapter sharing the same asset directory via an identical dir
  // path must not duplicate the manifest entries.
  let mut toc = sample_toc();
  let mut twin = toc.entries[1].clone();
  twin.id = "introduction-redux".to_string();
  twin.chapter = 3;
  toc.entries.push(twin);

  let opf = render_opf(&config(), &toc, root).expect("render");

  assert_eq!(opf.matches("images/flow.png").count(), 1);
  assert!(opf.contains(
    r#"<item id="introduction_cover.jpg" media-type="image/jpeg" href="content/1_01_intro/images/cover.jpg"></item>"#
  ));
}

#[test]
fn ncx_play_order_is_contiguous_from_one() {
  let ncx = render_ncx(&config(), &sample_toc()).expect("render");

  // 3 chapters + 1 subsection = play orders 1..=4, each exactly once.
  for n in 1..=4 {
    assert_eq!(
      ncx.matches(&format!(r#"playOrder="{n}""#)).count(),
      1,
      "playOrder {n} must appear exactly once"
    );
  }
  assert!(!ncx.contains(r#"playOrder="5""#));

  assert!(ncx.contains("<text>Preface</text>"));
  assert!(ncx.contains("<text>1. Introduction</text>"));
  assert!(ncx.contains("<text>2. Transport Security</text>"));
  assert!(ncx.contains("<text>Scopes &amp; Claims</text>"));
  assert!(ncx.contains(
    r#"<content src="content/1_01_intro/index.xhtml#scopes-claims" />"#
  ));
}

#[test]
fn toc_page_mirrors_navigation() {
  let page = render_toc_page(&config(), &sample_toc()).expect("render");

  assert!(page.contains("<title>API Security Table of Contents</title>"));
  assert!(page.contains(
    r#"<a href="content/1_01_intro/index.xhtml#introduction">1. Introduction</a>"#
  ));
  assert!(page.contains(
    r#"<a href="content/1_01_intro/index.xhtml#scopes-claims">Scopes &amp; Claims</a>"#
  ));
  // Frontmatter is unnumbered.
  assert!(page.contains(r#">Preface</a>"#));
  assert!(!page.contains("1. Preface"));
}

#[test]
fn renderer_output_survives_json_round_trip() {
  let tmp = tempfile::tempdir().expect("temp dir");
  let root: &Path = tmp.path();
  let config = config();
  let toc = sample_toc();

  let direct_opf = render_opf(&config, &toc, root).expect("render");
  let direct_ncx = render_ncx(&config, &toc).expect("render");
  let direct_page = render_toc_page(&config, &toc).expect("render");

  let json = toc.to_json_pretty().expect("serialize");
  let reloaded = Toc::from_json(&json).expect("deserialize");

  assert_eq!(render_opf(&config, &reloaded, root).expect("render"), direct_opf);
  assert_eq!(render_ncx(&config, &reloaded).expect("render"), direct_ncx);
  assert_eq!(
    render_toc_page(&config, &reloaded).expect("render"),
    direct_page
  );
}
