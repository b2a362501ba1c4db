//! Heading extraction over rendered HTML.
//!
//! The title/id channel for a chapter is its rendered markup, not the
//! Markdown source: the first `h1` supplies the chapter name and anchor id,
//! and `h2` elements with ids supply the subsection entries. Parsing is
//! best-effort; malformed fragments never raise, they just yield fewer
//! headings.
use kuchikikiki::parse_html;
use tendril::TendrilSink;

use crate::types::Heading;

/// Return the first `h1` of the fragment as a [`Heading`], if any.
///
/// The id is empty when the element carries no `id` attribute; callers that
/// need a usable anchor must treat that as a validation failure.
#[must_use]
pub fn title_heading(html: &str) -> Option<Heading> {
  let document = parse_html().one(html);

  let Ok(mut matches) = document.select("h1") else {
    return None;
  };

  matches.next().map(|el| {
    let id = el
      .attributes
      .borrow()
      .get("id")
      .map(ToString::to_string)
      .unwrap_or_default();

    Heading {
      text: el.as_node().text_contents().trim().to_string(),
      level: 1,
      id,
    }
  })
}

/// Return every `h2` carrying a non-empty `id`, in document order.
#[must_use]
pub fn subsection_headings(html: &str) -> Vec<Heading> {
  let document = parse_html().one(html);

  let Ok(matches) = document.select("h2") else {
    return Vec::new();
  };

  let mut headings = Vec::new();
  for el in matches {
    let id = el
      .attributes
      .borrow()
      .get("id")
      .map(ToString::to_string)
      .unwrap_or_default();
    if id.is_empty() {
      continue;
    }

    headings.push(Heading {
      text: el.as_node().text_contents().trim().to_string(),
      level: 2,
      id,
    });
  }

  headings
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_h1_wins() {
    let html = r##"<h1 id="intro">Introduction</h1><p>x</p><h1 id="other">Other</h1>"##;
    let title = title_heading(html).expect("h1 present");
    assert_eq!(title.text, "Introduction");
    assert_eq!(title.id, "intro");
  }

  #[test]
  fn h1_without_id_yields_empty_id() {
    let title = title_heading("<h1>Untitled</h1>").expect("h1 present");
    assert_eq!(title.text, "Untitled");
    assert_eq!(title.id, "");
  }

  #[test]
  fn no_h1_yields_none() {
    assert!(title_heading("<p>no headings here</p>").is_none());
  }

  #[test]
  fn malformed_fragment_is_tolerated() {
    // Unclosed tags and stray brackets must not panic.
    let title = title_heading("<h1 id=\"a\">Broken <b>markup</h1><p><");
    assert_eq!(title.expect("h1 present").id, "a");
  }

  #[test]
  fn subsections_require_ids() {
    let html = r##"
      <h2 id="first">First</h2>
      <h2>No anchor</h2>
      <h2 id="second">Second</h2>
    "##;
    let subs = subsection_headings(html);
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].id, "first");
    assert_eq!(subs[1].text, "Second");
  }
}
