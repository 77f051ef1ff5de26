//! Code highlighting.
//!
//! Tokenizing is delegated to a [`SyntaxHighlighter`] backend. The only backend
//! shipped is **Syntect** (feature `syntect`), using Sublime Text syntax
//! definitions extended by two-face.
//!
//! [`highlight`] is the single point where backend output becomes
//! [`TrustedHtml`] and bypasses output escaping.
pub mod error;
pub mod types;

#[cfg(feature = "syntect")] mod syntect;

pub use error::{SyntaxError, SyntaxResult};
#[cfg(feature = "syntect")]
pub use syntect::{
  CLASS_STYLE,
  DEFAULT_THEME,
  SyntectHighlighter,
  create_syntect_manager,
};
pub use types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager};

use crate::output::TrustedHtml;

/// Create the default syntax manager based on available features.
///
/// # Errors
///
/// Returns [`SyntaxError::NoBackendAvailable`] when built without a backend.
pub fn create_default_manager() -> SyntaxResult<SyntaxManager> {
  #[cfg(feature = "syntect")]
  {
    Ok(create_syntect_manager())
  }

  #[cfg(not(feature = "syntect"))]
  {
    Err(SyntaxError::NoBackendAvailable)
  }
}

/// Highlight the raw text of a code span.
///
/// The backend's markup is trusted as-is; no escaping happens here.
///
/// # Errors
///
/// Tokenizer failures are returned unchanged. There is no plain-text fallback.
pub fn highlight(
  manager: &SyntaxManager,
  raw_text: &str,
  language: Option<&str>,
) -> SyntaxResult<TrustedHtml> {
  manager
    .highlight_code(raw_text, language)
    .map(TrustedHtml::new)
}
