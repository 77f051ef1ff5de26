//! Types for the folio-render public API.
use serde::Serialize;

use crate::output::Rendered;

/// A heading of a rendered document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Header {
  /// Heading text, without markup.
  pub text:  String,
  /// Heading level (1-6).
  pub level: u8,
  /// Anchor ID of the heading.
  pub id:    String,
}

/// Result of rendering one document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderedDocument {
  /// The rendered output tree.
  pub tree: Rendered,

  /// Headings in document order (for `ToC`, navigation, etc).
  pub headers: Vec<Header>,

  /// Text of the first H1, if any.
  pub title: Option<String>,
}

impl RenderedDocument {
  /// Serialize the output tree to HTML.
  #[must_use]
  pub fn html(&self) -> String {
    self.tree.to_html()
  }
}
