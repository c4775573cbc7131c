use std::path::PathBuf;

use clap::Parser;

/// Command line interface for mdstatic
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Turn a directory of Markdown documents into a static HTML site"
)]
pub struct Cli {
  /// Directory containing the Markdown documents
  #[arg(short, long, value_name = "DIR")]
  pub input: Option<PathBuf>,

  /// Stylesheet to embed into every generated page
  #[arg(short, long, value_name = "FILE")]
  pub stylesheet: Option<PathBuf>,

  /// Directory receiving the generated site and its report
  #[arg(short, long, value_name = "DIR")]
  pub output: Option<PathBuf>,

  /// Path to configuration file(s) (TOML, can be specified multiple times)
  /// Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,
}

impl Cli {
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
