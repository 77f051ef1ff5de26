//! Configuration for a [`DocumentRenderer`](crate::DocumentRenderer).
//!
//! # Examples
//!
//! ```
//! use folio_render::{HeadingIds, RenderOptions, TableMode};
//!
//! let options = RenderOptions::builder()
//!   .highlight_code(false)
//!   .heading_ids(HeadingIds::Suffixed)
//!   .table_mode(TableMode::Strict)
//!   .build();
//!
//! assert!(options.gfm);
//! assert!(!options.highlight_code);
//! ```
use serde::{Deserialize, Serialize};

use crate::{slug::HeadingIds, table::TableMode};

/// Options for parsing and rendering a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
  /// Enable GitHub Flavored Markdown (tables, strikethrough, autolinks,
  /// task lists, footnotes).
  pub gfm: bool,

  /// Turn fenced ```` ```table ```` blocks holding JSON into tables.
  pub structured_tables: bool,

  /// Highlight code spans and blocks.
  pub highlight_code: bool,

  /// Theme for the highlight stylesheet.
  pub highlight_theme: Option<String>,

  /// Language assumed for code without one. `None` keeps the backend default.
  pub default_language: Option<String>,

  /// How repeated heading IDs are handled.
  pub heading_ids: HeadingIds,

  /// Whether ragged tables are rendered or rejected.
  pub table_mode: TableMode,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      gfm:               true,
      structured_tables: true,
      highlight_code:    cfg!(feature = "syntect"),
      highlight_theme:   None,
      default_language:  None,
      heading_ids:       HeadingIds::Verbatim,
      table_mode:        TableMode::Lenient,
    }
  }
}

impl RenderOptions {
  #[must_use]
  pub fn builder() -> RenderOptionsBuilder {
    RenderOptionsBuilder::new()
  }
}

/// Builder for constructing `RenderOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct RenderOptionsBuilder {
  options: RenderOptions,
}

impl RenderOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  #[must_use]
  pub const fn structured_tables(mut self, enabled: bool) -> Self {
    self.options.structured_tables = enabled;
    self
  }

  #[must_use]
  pub const fn highlight_code(mut self, enabled: bool) -> Self {
    self.options.highlight_code = enabled;
    self
  }

  #[must_use]
  pub fn highlight_theme<S: Into<String>>(mut self, theme: Option<S>) -> Self {
    self.options.highlight_theme = theme.map(Into::into);
    self
  }

  #[must_use]
  pub fn default_language<S: Into<String>>(
    mut self,
    language: Option<S>,
  ) -> Self {
    self.options.default_language = language.map(Into::into);
    self
  }

  #[must_use]
  pub const fn heading_ids(mut self, policy: HeadingIds) -> Self {
    self.options.heading_ids = policy;
    self
  }

  #[must_use]
  pub const fn table_mode(mut self, mode: TableMode) -> Self {
    self.options.table_mode = mode;
    self
  }

  #[must_use]
  pub fn build(self) -> RenderOptions {
    self.options
  }
}
