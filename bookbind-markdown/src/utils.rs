//! Small shared helpers.
use regex::Regex;

/// Slugify a string for use as an anchor ID.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-")
    .trim_matches('-')
    .to_string()
}

/// A regex that matches nothing, used as a fallback when a static pattern
/// somehow fails to compile.
///
/// # Panics
///
/// Panics if the fallback pattern itself fails to compile, which should
/// never happen.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn never_matching_regex() -> Regex {
  // Asserts something impossible, so it can never match any input.
  Regex::new(r"[^\s\S]").unwrap()
}
