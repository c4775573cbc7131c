use std::{
  fs,
  path::{Path, PathBuf},
};

use log::info;
use mdstatic_core::ConversionRequest;
use serde::Deserialize;

use crate::{cli::Cli, error::ConfigError};

/// File names searched for in the working directory, in order.
const CONFIG_FILENAMES: [&str; 3] =
  ["mdstatic.toml", ".mdstatic.toml", ".config/mdstatic.toml"];

/// Settings gathered from config files and the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Directory containing the Markdown documents.
  pub input_dir: Option<PathBuf>,

  /// Stylesheet embedded into every page.
  pub stylesheet: Option<PathBuf>,

  /// Directory receiving the generated site.
  pub output_dir: Option<PathBuf>,
}

impl Config {
  /// Load a TOML configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, is not TOML, or contains
  /// unknown keys.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {e}",
        path.display()
      ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("toml") => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {e}",
            path.display()
          ))
        })
      },
      _ => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
    }
  }

  /// Build the effective configuration.
  ///
  /// Sources in increasing priority: a config file discovered in the working
  /// directory, the explicitly given `config_files` in order, then the
  /// command line flags.
  ///
  /// # Errors
  ///
  /// Returns an error if any config file fails to load.
  pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
    let discovered = Self::find_config_file();
    Self::load_from(discovered.as_deref(), &cli.config_files, cli)
  }

  fn load_from(
    discovered: Option<&Path>,
    config_files: &[PathBuf],
    cli: &Cli,
  ) -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if let Some(path) = discovered {
      info!("Using discovered config file: {}", path.display());
      config.merge(Self::from_file(path)?);
    }

    for path in config_files {
      config.merge(Self::from_file(path)?);
    }
    if config_files.len() > 1 {
      info!("Loaded and merged {} config files", config_files.len());
    }

    config.merge(Self::from_cli(cli));
    Ok(config)
  }

  /// Settings given directly on the command line.
  #[must_use]
  pub fn from_cli(cli: &Cli) -> Self {
    Self {
      input_dir:  cli.input.clone(),
      stylesheet: cli.stylesheet.clone(),
      output_dir: cli.output.clone(),
    }
  }

  /// Overlay `other` on top of `self`; values set in `other` win.
  pub fn merge(&mut self, other: Self) {
    if other.input_dir.is_some() {
      self.input_dir = other.input_dir;
    }
    if other.stylesheet.is_some() {
      self.stylesheet = other.stylesheet;
    }
    if other.output_dir.is_some() {
      self.output_dir = other.output_dir;
    }
  }

  /// Search the working directory for a config file.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir)
  }

  fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Turn the merged settings into a conversion request.
  ///
  /// # Errors
  ///
  /// Returns an error naming the first setting that is still missing.
  pub fn into_request(self) -> Result<ConversionRequest, ConfigError> {
    let input_dir = self.input_dir.ok_or(ConfigError::Missing {
      key:  "input_dir",
      flag: "--input",
    })?;
    let stylesheet = self.stylesheet.ok_or(ConfigError::Missing {
      key:  "stylesheet",
      flag: "--stylesheet",
    })?;
    let output_dir = self.output_dir.ok_or(ConfigError::Missing {
      key:  "output_dir",
      flag: "--output",
    })?;
    Ok(ConversionRequest::new(input_dir, stylesheet, output_dir))
  }
}
