//! The tokenizer seam and the manager that resolves languages for it.
use std::collections::HashMap;

use super::error::{SyntaxError, SyntaxResult};

/// Languages that name the plain-text grammar of most backends.
const PLAIN_LANGUAGES: [&str; 3] = ["text", "plain", "plaintext"];

/// A pluggable tokenizer.
///
/// Implementations turn source text into highlighted markup. The markup they
/// return is injected into the output without further escaping, so every
/// implementation must escape the source text it embeds.
pub trait SyntaxHighlighter: Send + Sync {
  /// Name of this backend, for logs.
  fn name(&self) -> &'static str;

  /// Language names and extensions this backend has grammars for.
  fn supported_languages(&self) -> Vec<String>;

  /// Theme names accepted by [`SyntaxHighlighter::stylesheet`].
  fn available_themes(&self) -> Vec<String>;

  /// Check if a language is supported (case-insensitive).
  fn supports_language(&self, language: &str) -> bool {
    self
      .supported_languages()
      .iter()
      .any(|lang| lang.eq_ignore_ascii_case(language))
  }

  /// Check if a theme is available (case-insensitive).
  fn has_theme(&self, theme: &str) -> bool {
    self
      .available_themes()
      .iter()
      .any(|t| t.eq_ignore_ascii_case(theme))
  }

  /// Tokenize `code` as `language` and return escaped, highlighted markup.
  ///
  /// # Errors
  ///
  /// Returns an error if the tokenizer fails.
  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String>;

  /// CSS that styles the markup produced by [`SyntaxHighlighter::highlight`].
  ///
  /// # Errors
  ///
  /// Returns an error if the theme is unknown or cannot be converted.
  fn stylesheet(&self, theme: &str) -> SyntaxResult<String>;

  /// Detect language from a file extension.
  fn language_from_extension(&self, extension: &str) -> Option<String>;
}

/// Configuration for syntax highlighting.
#[derive(Debug, Clone)]
pub struct SyntaxConfig {
  /// Theme used for stylesheets when none is requested.
  pub default_theme: Option<String>,

  /// Language assumed for code spans that do not declare one.
  pub default_language: Option<String>,

  /// Language aliases for mapping common names to supported languages.
  pub language_aliases: HashMap<String, String>,

  /// Whether to fall back to plain text for unsupported languages.
  pub fallback_to_plain: bool,
}

impl Default for SyntaxConfig {
  fn default() -> Self {
    let language_aliases = [
      ("js", "javascript"),
      ("jsx", "javascript"),
      ("mjs", "javascript"),
      ("ts", "typescript"),
      ("tsx", "typescript"),
      ("py", "python"),
      ("rb", "ruby"),
      ("rs", "rust"),
      ("sh", "bash"),
      ("shell", "bash"),
      ("zsh", "bash"),
      ("yml", "yaml"),
      ("md", "markdown"),
      ("mdx", "markdown"),
    ]
    .into_iter()
    .map(|(alias, language)| (alias.to_string(), language.to_string()))
    .collect();

    Self {
      default_theme: None,
      default_language: Some("javascript".to_string()),
      language_aliases,
      fallback_to_plain: true,
    }
  }
}

/// High-level syntax highlighting manager.
///
/// Wraps a backend with language alias resolution and plain-text fallback
/// for languages the backend has no grammar for.
pub struct SyntaxManager {
  highlighter: Box<dyn SyntaxHighlighter>,
  config:      SyntaxConfig,
}

impl SyntaxManager {
  /// Create a new syntax manager with the given highlighter and config.
  #[must_use]
  pub fn new(
    highlighter: Box<dyn SyntaxHighlighter>,
    config: SyntaxConfig,
  ) -> Self {
    Self {
      highlighter,
      config,
    }
  }

  /// Create a new syntax manager with the default configuration.
  #[must_use]
  pub fn with_highlighter(highlighter: Box<dyn SyntaxHighlighter>) -> Self {
    Self::new(highlighter, SyntaxConfig::default())
  }

  #[must_use]
  pub fn highlighter(&self) -> &dyn SyntaxHighlighter {
    self.highlighter.as_ref()
  }

  #[must_use]
  pub const fn config(&self) -> &SyntaxConfig {
    &self.config
  }

  pub fn config_mut(&mut self) -> &mut SyntaxConfig {
    &mut self.config
  }

  /// Resolve a language name using aliases.
  #[must_use]
  pub fn resolve_language(&self, language: &str) -> String {
    let lowered = language.to_lowercase();
    self
      .config
      .language_aliases
      .get(&lowered)
      .cloned()
      .unwrap_or(lowered)
  }

  /// Highlight code, resolving the language and falling back to plain text
  /// when the backend has no grammar for it.
  ///
  /// `None` uses the configured default language.
  ///
  /// # Errors
  ///
  /// Returns [`SyntaxError::UnsupportedLanguage`] when neither the language
  /// nor a plain-text grammar is available, or whatever error the backend
  /// raises while tokenizing.
  pub fn highlight_code(
    &self,
    code: &str,
    language: Option<&str>,
  ) -> SyntaxResult<String> {
    let requested = language
      .or(self.config.default_language.as_deref())
      .unwrap_or("text");
    let resolved = self.resolve_language(requested);

    if self.highlighter.supports_language(&resolved) {
      log::trace!("Highlighting {} bytes as {resolved}", code.len());
      return self.highlighter.highlight(code, &resolved);
    }

    if self.config.fallback_to_plain {
      if let Some(plain) = PLAIN_LANGUAGES
        .into_iter()
        .find(|plain| self.highlighter.supports_language(plain))
      {
        log::debug!(
          "{} has no grammar for '{resolved}', highlighting as {plain}",
          self.highlighter.name()
        );
        return self.highlighter.highlight(code, plain);
      }
    }

    Err(SyntaxError::UnsupportedLanguage(resolved))
  }

  /// Stylesheet for `theme`, or for the configured default theme.
  ///
  /// # Errors
  ///
  /// Returns [`SyntaxError::ThemeNotFound`] if no theme is given and none is
  /// configured, or the backend's error for an unknown theme.
  pub fn stylesheet(&self, theme: Option<&str>) -> SyntaxResult<String> {
    let theme = theme
      .or(self.config.default_theme.as_deref())
      .ok_or_else(|| SyntaxError::ThemeNotFound(String::new()))?;
    self.highlighter.stylesheet(theme)
  }
}

impl std::fmt::Debug for SyntaxManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SyntaxManager")
      .field("highlighter", &self.highlighter.name())
      .field("config", &self.config)
      .finish()
  }
}
