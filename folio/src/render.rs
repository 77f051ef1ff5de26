//! Batch rendering of Markdown files.
use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use folio_render::{DocumentRenderer, RenderedDocument};
use log::{debug, error, info};
use rayon::prelude::*;

use crate::{
  cli::OutputFormat,
  config::Config,
  error::{FolioError, Result},
};

/// A rendered input file.
#[derive(Debug)]
pub struct RenderedFile {
  pub input:    PathBuf,
  /// Where the output was written; `None` when it is printed instead.
  pub output:   Option<PathBuf>,
  pub contents: String,
}

/// Outcome of rendering a batch of files.
#[derive(Debug, Default)]
pub struct BatchReport {
  pub rendered: Vec<RenderedFile>,
  pub failed:   Vec<FolioError>,
}

impl BatchReport {
  #[must_use]
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }
}

/// Serialize a rendered document in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_document(
  document: &RenderedDocument,
  format: OutputFormat,
) -> Result<String> {
  match format {
    OutputFormat::Html => Ok(document.html()),
    OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
  }
}

/// Output path for `input` inside `output_dir`.
#[must_use]
pub fn output_path(
  input: &Path,
  output_dir: &Path,
  format: OutputFormat,
) -> PathBuf {
  let stem = input
    .file_stem()
    .map_or_else(|| "index".into(), |stem| stem.to_string_lossy());
  output_dir.join(format!("{stem}.{}", format.extension()))
}

/// Render one file, writing it to the output directory if configured.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or if rendering
/// fails.
pub fn render_file(
  renderer: &DocumentRenderer,
  config: &Config,
  input: &Path,
) -> Result<RenderedFile> {
  let source = fs::read_to_string(input).map_err(|e| {
    FolioError::Read {
      path:   input.to_path_buf(),
      source: e,
    }
  })?;

  let document = renderer.render(&source, None).map_err(|e| {
    FolioError::Render {
      path:   input.to_path_buf(),
      source: e,
    }
  })?;
  debug!(
    "Rendered {} ({} headers)",
    input.display(),
    document.headers.len()
  );

  let contents = format_document(&document, config.format)?;
  let output = match &config.output_dir {
    Some(dir) => {
      let path = output_path(input, dir, config.format);
      fs::write(&path, &contents)?;
      Some(path)
    },
    None => None,
  };

  Ok(RenderedFile {
    input: input.to_path_buf(),
    output,
    contents,
  })
}

/// Render every input in parallel.
///
/// A failing document does not stop the others; failures are collected in the
/// report in input order.
///
/// # Errors
///
/// Returns an error before rendering anything if two inputs would be written
/// to the same output file, or if the output directory cannot be created.
pub fn render_batch(config: &Config, inputs: &[PathBuf]) -> Result<BatchReport> {
  if let Some(dir) = &config.output_dir {
    check_output_paths(inputs, dir, config.format)?;
    fs::create_dir_all(dir)?;
    info!("Output directory: {}", dir.display());
  }

  let renderer = DocumentRenderer::new(config.render_options());
  let results: Vec<Result<RenderedFile>> = inputs
    .par_iter()
    .map(|input| render_file(&renderer, config, input))
    .collect();

  let mut report = BatchReport::default();
  for result in results {
    match result {
      Ok(file) => report.rendered.push(file),
      Err(e) => {
        error!("{e}");
        report.failed.push(e);
      },
    }
  }
  Ok(report)
}

/// Fail if any two inputs map to the same file in `output_dir`.
fn check_output_paths(
  inputs: &[PathBuf],
  output_dir: &Path,
  format: OutputFormat,
) -> Result<()> {
  let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
  for input in inputs {
    let output = output_path(input, output_dir, format);
    if let Some(previous) = claimed.insert(output.clone(), input) {
      return Err(FolioError::Config(format!(
        "{} and {} would both be written to {}",
        previous.display(),
        input.display(),
        output.display()
      )));
    }
  }
  Ok(())
}
