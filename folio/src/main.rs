use std::{fs, io::Write};

use color_eyre::eyre::{Context, Result, bail};
use folio::{
  cli::{Cli, Commands},
  config::Config,
  render::render_batch,
};
use folio_render::DocumentRenderer;
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      // Check if file already exists and that we're not forcing overwrite
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
      {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;
      Ok(())
    },

    Commands::Stylesheet { output, .. } => {
      let config = Config::load(&cli)?;
      let renderer = DocumentRenderer::new(config.render_options());
      let css = renderer
        .stylesheet()
        .wrap_err("Failed to generate highlight stylesheet")?;

      if let Some(path) = output {
        fs::write(path, css).wrap_err_with(|| {
          format!("Failed to write stylesheet: {}", path.display())
        })?;
        info!("Stylesheet written to {}", path.display());
      } else {
        write_stdout(&css)?;
      }
      Ok(())
    },

    Commands::Render { inputs, .. } => {
      let config = Config::load(&cli)?;

      let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
      rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build_global()?;

      let report = render_batch(&config, inputs)?;
      for file in &report.rendered {
        match &file.output {
          Some(path) => info!("{} -> {}", file.input.display(), path.display()),
          None => write_stdout(&file.contents)?,
        }
      }

      if !report.is_success() {
        bail!(
          "{} of {} documents failed to render",
          report.failed.len(),
          inputs.len()
        );
      }
      Ok(())
    },
  }
}

fn write_stdout(contents: &str) -> Result<()> {
  let mut stdout = std::io::stdout().lock();
  stdout.write_all(contents.as_bytes())?;
  if !contents.ends_with('\n') {
    stdout.write_all(b"\n")?;
  }
  Ok(())
}
