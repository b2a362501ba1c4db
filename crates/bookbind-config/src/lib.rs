//! # bookbind-config
//!
//! Book-level configuration for bookbind: bibliographic metadata (title,
//! identifier, authors), asset references (stylesheets, fonts, cover), and
//! the fixed front/back matter include lists. Loaded from a `book.toml` at
//! the book root.

mod config;
mod error;

pub use crate::{
  config::{Author, BookConfig, EpubConfig, HtmlConfig, DEFAULT_CONFIG},
  error::ConfigError,
};
