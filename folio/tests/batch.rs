#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::fs;

use folio::{
  cli::OutputFormat,
  config::Config,
  error::FolioError,
  render::render_batch,
};
use folio_render::{RenderOptions, TableMode};
use tempfile::tempdir;

fn plain_config() -> Config {
  Config {
    render: RenderOptions::builder().highlight_code(false).build(),
    ..Config::default()
  }
}

#[test]
fn test_batch_writes_html_files() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let output_dir = temp_dir.path().join("out");
  let input = temp_dir.path().join("guide.md");
  fs::write(&input, "# Guide\n\nSee [home](/).\n")
    .expect("Failed to write guide.md in test");

  let config = Config {
    output_dir: Some(output_dir.clone()),
    ..plain_config()
  };
  let report = render_batch(&config, &[input]).expect("batch runs");
  assert!(report.is_success());

  let html = fs::read_to_string(output_dir.join("guide.html"))
    .expect("Failed to read output in test");
  assert!(html.starts_with("<h1 id=\"guide\">"));
  assert!(html.contains("<a data-nav=\"internal\" href=\"/\">home</a>"));
}

#[test]
fn test_batch_json_output() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input = temp_dir.path().join("api.md");
  fs::write(&input, "# API\n\n## Methods\n")
    .expect("Failed to write api.md in test");

  let config = Config {
    format: OutputFormat::Json,
    ..plain_config()
  };
  let report = render_batch(&config, &[input]).expect("batch runs");
  let value: serde_json::Value =
    serde_json::from_str(&report.rendered[0].contents).expect("valid json");

  assert_eq!(value["title"], "API");
  assert_eq!(value["headers"][1]["id"], "methods");
  assert!(report.rendered[0].output.is_none());
}

#[test]
fn test_failures_do_not_stop_other_documents() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let good = temp_dir.path().join("good.md");
  let ragged = temp_dir.path().join("ragged.md");
  let missing = temp_dir.path().join("missing.md");
  fs::write(&good, "fine\n").expect("Failed to write good.md in test");
  fs::write(
    &ragged,
    "```table\n{\"headers\": [\"a\", \"b\"], \"rows\": [[\"1\"]]}\n```\n",
  )
  .expect("Failed to write ragged.md in test");

  let mut config = plain_config();
  config.render.table_mode = TableMode::Strict;

  let report =
    render_batch(&config, &[good, ragged, missing]).expect("batch runs");
  assert_eq!(report.rendered.len(), 1);
  assert_eq!(report.failed.len(), 2);
  assert!(matches!(report.failed[0], FolioError::Render { .. }));
  assert!(matches!(report.failed[1], FolioError::Read { .. }));
}

#[test]
fn test_colliding_outputs_are_refused() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let output_dir = temp_dir.path().join("out");
  let mut inputs = Vec::new();
  for dir in ["a", "b"] {
    let dir = temp_dir.path().join(dir);
    fs::create_dir_all(&dir).expect("Failed to create input dir in test");
    let input = dir.join("intro.md");
    fs::write(&input, "# Intro\n").expect("Failed to write intro.md in test");
    inputs.push(input);
  }

  let config = Config {
    output_dir: Some(output_dir.clone()),
    ..plain_config()
  };
  let err = render_batch(&config, &inputs).expect_err("outputs collide");
  assert!(matches!(err, FolioError::Config(_)));
  assert!(!output_dir.join("intro.html").exists());
}

#[test]
fn test_same_stem_without_output_dir_is_fine() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let mut inputs = Vec::new();
  for dir in ["a", "b"] {
    let dir = temp_dir.path().join(dir);
    fs::create_dir_all(&dir).expect("Failed to create input dir in test");
    let input = dir.join("intro.md");
    fs::write(&input, "# Intro\n").expect("Failed to write intro.md in test");
    inputs.push(input);
  }

  let report = render_batch(&plain_config(), &inputs).expect("batch runs");
  assert_eq!(report.rendered.len(), 2);
}
