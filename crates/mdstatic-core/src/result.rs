use std::{
  io,
  path::{Path, PathBuf},
};

use thiserror::Error;

/// The three inputs of a single conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
  /// Directory holding the Markdown source tree.
  pub target_dir: PathBuf,

  /// Stylesheet embedded into every generated page.
  pub css_file: PathBuf,

  /// Directory under which the workspace and the report are created.
  pub output_dir: PathBuf,
}

impl ConversionRequest {
  #[must_use]
  pub fn new(
    target_dir: impl Into<PathBuf>,
    css_file: impl Into<PathBuf>,
    output_dir: impl Into<PathBuf>,
  ) -> Self {
    Self {
      target_dir: target_dir.into(),
      css_file:   css_file.into(),
      output_dir: output_dir.into(),
    }
  }
}

/// Outcome of a conversion that ran to completion.
#[derive(Debug)]
pub enum ConversionResult {
  /// Every document was converted; the site lives in
  /// `output_directory_path`.
  Success { output_directory_path: PathBuf },

  /// The conversion stopped at the first failure.
  Failure(ConversionFailure),
}

impl ConversionResult {
  #[must_use]
  pub const fn is_success(&self) -> bool {
    matches!(self, Self::Success { .. })
  }

  /// Absolute path of the generated site, if the conversion succeeded.
  #[must_use]
  pub fn output_directory_path(&self) -> Option<&Path> {
    match self {
      Self::Success {
        output_directory_path,
      } => Some(output_directory_path),
      Self::Failure(_) => None,
    }
  }

  #[must_use]
  pub const fn failure(&self) -> Option<&ConversionFailure> {
    match self {
      Self::Success { .. } => None,
      Self::Failure(failure) => Some(failure),
    }
  }
}

impl From<Result<PathBuf, ConversionFailure>> for ConversionResult {
  fn from(result: Result<PathBuf, ConversionFailure>) -> Self {
    match result {
      Ok(output_directory_path) => {
        Self::Success {
          output_directory_path,
        }
      },
      Err(failure) => Self::Failure(failure),
    }
  }
}

/// Reasons a conversion can fail.
#[derive(Debug, Error)]
pub enum ConversionFailure {
  #[error("target directory does not exist or is not a directory")]
  InvalidTargetDirectoryPathSpecified,

  #[error("stylesheet file was not found or could not be read")]
  CssFileNotFound,

  #[error("output directory could not be created or is not a directory")]
  InvalidOutputDirectoryPathSpecified,

  /// A file already occupies the HTML path of a document. `file_name` is the
  /// document's path relative to the workspace root.
  #[error("failed to create HTML file for {file_name}: the path is taken")]
  FailedToCreateHtmlFile { file_name: String },

  #[error("I/O error: {0}")]
  IoErrorOccurred(#[source] io::Error),

  #[error("access denied: {0}")]
  SecurityErrorOccurred(#[source] io::Error),
}

impl From<io::Error> for ConversionFailure {
  fn from(err: io::Error) -> Self {
    if err.kind() == io::ErrorKind::PermissionDenied {
      Self::SecurityErrorOccurred(err)
    } else {
      Self::IoErrorOccurred(err)
    }
  }
}
