use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use folio_render::HeadingIds;
use serde::{Deserialize, Serialize};

/// Command line interface for folio
#[derive(Parser, Debug)]
#[command(author, version, about = "folio: render Markdown documents to HTML")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON). Command line flags override
  /// values from the file.
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,
}

/// Output written for each rendered document.
#[derive(
  ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// Serialized HTML.
  #[default]
  Html,
  /// The output tree, headers and title as JSON.
  Json,
}

impl OutputFormat {
  /// File extension for documents written in this format.
  #[must_use]
  pub const fn extension(self) -> &'static str {
    match self {
      Self::Html => "html",
      Self::Json => "json",
    }
  }
}

/// All supported subcommands for the folio CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render Markdown documents.
  Render {
    /// Markdown files to render.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory to write `<stem>.html` or `<stem>.json` files to. Documents
    /// are printed to stdout when omitted.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'F', long, value_enum)]
    format: Option<OutputFormat>,

    /// Theme for code highlighting.
    #[arg(short, long)]
    theme: Option<String>,

    /// Emit code as plain escaped text.
    #[arg(long = "no-highlight", action = clap::ArgAction::SetTrue)]
    no_highlight: bool,

    /// Reject tables whose rows do not match the header length.
    #[arg(long = "strict-tables", action = clap::ArgAction::SetTrue)]
    strict_tables: bool,

    /// How repeated heading IDs are handled.
    #[arg(long = "heading-ids", value_enum)]
    heading_ids: Option<HeadingIds>,

    /// Number of threads to use for parallel rendering.
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,
  },

  /// Print or write the CSS for highlighted code.
  Stylesheet {
    /// Theme to generate the stylesheet for.
    #[arg(short, long)]
    theme: Option<String>,

    /// File to write the stylesheet to.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Initialize a new folio configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "folio.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
