//! Errors surfaced by a render call.
//!
//! The pipeline performs no local recovery: any of these aborts the render
//! and is returned to the caller.
use crate::highlight::SyntaxError;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error("Code highlighting failed: {0}")]
  Highlight(#[from] SyntaxError),

  #[error("Table row {row} has {found} cells, expected {expected}")]
  RaggedTable {
    row:      usize,
    expected: usize,
    found:    usize,
  },

  #[error("Renderer for '{node_type}' failed: {message}")]
  Renderer { node_type: String, message: String },

  #[error("Document is nested more than {limit} levels deep")]
  NestingTooDeep { limit: usize },
}

impl RenderError {
  /// Error for a custom renderer that rejected its input.
  pub fn renderer(
    node_type: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self::Renderer {
      node_type: node_type.into(),
      message:   message.into(),
    }
  }
}
