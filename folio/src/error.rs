use std::{io, path::PathBuf};

use folio_render::RenderError;
use thiserror::Error;

/// Top-level error type for the folio binary.
#[derive(Debug, Error)]
pub enum FolioError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Failed to read {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to render {}: {source}", path.display())]
  Render {
    path:   PathBuf,
    #[source]
    source: RenderError,
  },

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML serialization error: {0}")]
  TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
