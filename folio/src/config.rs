use std::{
  fs,
  path::{Path, PathBuf},
};

use folio_render::{RenderOptions, TableMode};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
  cli::{Cli, Commands, OutputFormat},
  error::{FolioError, Result},
};

/// Configuration for the folio CLI.
///
/// Fields are typically loaded from a TOML or JSON config file, but can also
/// be set via CLI arguments. Rendering options live in the `[render]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory rendered documents are written to. Stdout when unset.
  pub output_dir: Option<PathBuf>,

  /// Output format for rendered documents.
  pub format: OutputFormat,

  /// Number of threads to use for parallel rendering.
  pub jobs: Option<usize>,

  /// Options handed to the document renderer.
  pub render: RenderOptions,
}

impl Config {
  /// Load configuration from a file.
  ///
  /// The format is chosen by extension: `.toml` or `.json`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      FolioError::Config(format!(
        "Failed to read config file: {}: {e}",
        path.display()
      ))
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("json") => {
        serde_json::from_str(&content).map_err(|e| {
          FolioError::Config(format!(
            "Failed to parse JSON config from {}: {e}",
            path.display()
          ))
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|e| {
          FolioError::Config(format!(
            "Failed to parse TOML config from {}: {e}",
            path.display()
          ))
        })
      },
      Some(_) => {
        Err(FolioError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(FolioError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load the config file named on the command line, if any, and apply the
  /// flags of the `render` or `stylesheet` subcommand on top.
  ///
  /// # Errors
  ///
  /// Returns an error if the config file cannot be loaded.
  pub fn load(cli: &Cli) -> Result<Self> {
    let mut config = match &cli.config_file {
      Some(path) => {
        debug!("Loading configuration from {}", path.display());
        Self::from_file(path)?
      },
      None => Self::default(),
    };
    config.merge_with_cli(&cli.command);
    Ok(config)
  }

  /// Override configuration values with command line flags.
  pub fn merge_with_cli(&mut self, command: &Commands) {
    match command {
      Commands::Render {
        output_dir,
        format,
        theme,
        no_highlight,
        strict_tables,
        heading_ids,
        jobs,
        ..
      } => {
        if let Some(output_dir) = output_dir {
          self.output_dir = Some(output_dir.clone());
        }
        if let Some(format) = format {
          self.format = *format;
        }
        if let Some(theme) = theme {
          self.render.highlight_theme = Some(theme.clone());
        }
        if *no_highlight {
          self.render.highlight_code = false;
        }
        if *strict_tables {
          self.render.table_mode = TableMode::Strict;
        }
        if let Some(heading_ids) = heading_ids {
          self.render.heading_ids = *heading_ids;
        }
        if jobs.is_some() {
          self.jobs = *jobs;
        }
      },
      Commands::Stylesheet { theme, .. } => {
        if let Some(theme) = theme {
          self.render.highlight_theme = Some(theme.clone());
        }
      },
      Commands::Init { .. } => {},
    }
  }

  /// Options for the document renderer.
  #[must_use]
  pub fn render_options(&self) -> RenderOptions {
    self.render.clone()
  }

  /// Write a configuration file holding every default value.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unknown or the file cannot be written.
  pub fn generate_default_config(format: &str, path: &Path) -> Result<()> {
    let defaults = Self::default();
    let content = match format {
      "toml" => toml::to_string_pretty(&defaults)?,
      "json" => serde_json::to_string_pretty(&defaults)?,
      other => {
        return Err(FolioError::Config(format!(
          "Unsupported config format: {other}"
        )));
      },
    };

    fs::write(path, content).map_err(|e| {
      FolioError::Config(format!(
        "Failed to write default config to {}: {e}",
        path.display()
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}
