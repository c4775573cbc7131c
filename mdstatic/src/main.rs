use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use mdstatic_core::{ConversionResult, Converter};

mod cli;
mod config;
mod error;

use cli::Cli;
use config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  let request = Config::load(&cli)
    .and_then(Config::into_request)
    .wrap_err("Invalid configuration")?;

  let runtime = tokio::runtime::Builder::new_multi_thread()
    .build()
    .wrap_err("Failed to start async runtime")?;

  let Ok(result) = runtime.block_on(Converter::new().convert(request)) else {
    bail!("Conversion was cancelled");
  };

  match result {
    ConversionResult::Success {
      output_directory_path,
    } => {
      info!("Documentation generated in {}", output_directory_path.display());
      Ok(())
    },
    ConversionResult::Failure(failure) => {
      Err(failure).wrap_err("Failed to convert documentation")
    },
  }
}
