/// Result type for syntax highlighting operations.
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Failures of the external tokenizer or its setup.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
  #[error("No syntax definition for language '{0}'")]
  UnsupportedLanguage(String),

  #[error("Theme '{0}' is not available")]
  ThemeNotFound(String),

  #[error("Tokenizer failed on {language} code: {message}")]
  Tokenizer { language: String, message: String },

  #[error("Could not build stylesheet for theme '{theme}': {message}")]
  Stylesheet { theme: String, message: String },

  #[error(
    "No syntax highlighting backend available. Enable the 'syntect' feature \
     or turn off code highlighting."
  )]
  NoBackendAvailable,
}
