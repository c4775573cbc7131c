//! Input validation. Checks run in a fixed order (target, stylesheet,
//! output) and the first one that fails decides the result.

use std::{
  fs,
  path::{Path, PathBuf},
};

use crate::{
  diagnostics::{ConversionEvent, DiagnosticSink},
  result::{ConversionFailure, ConversionRequest},
};

/// Inputs that passed validation, with the stylesheet already loaded.
#[derive(Debug, Clone)]
pub struct ValidatedInputs {
  pub target_dir: PathBuf,
  pub stylesheet: String,
  pub output_dir: PathBuf,
}

/// Validate a request.
///
/// The output directory is created (with parents) when missing. Nothing else
/// touches the filesystem.
///
/// # Errors
///
/// Returns the failure matching the first input that does not check out.
pub fn validate(
  request: &ConversionRequest,
  sink: &dyn DiagnosticSink,
) -> Result<ValidatedInputs, ConversionFailure> {
  if !request.target_dir.is_dir() {
    return Err(ConversionFailure::InvalidTargetDirectoryPathSpecified);
  }

  let stylesheet = read_stylesheet(&request.css_file)?;
  sink.event(&ConversionEvent::StylesheetLoaded {
    path:  &request.css_file,
    bytes: stylesheet.len(),
  });

  prepare_output_dir(&request.output_dir, sink)?;

  Ok(ValidatedInputs {
    target_dir: request.target_dir.clone(),
    stylesheet,
    output_dir: request.output_dir.clone(),
  })
}

/// Read the stylesheet as text. Invalid UTF-8 is replaced, never rejected.
fn read_stylesheet(path: &Path) -> Result<String, ConversionFailure> {
  if !path.is_file() {
    return Err(ConversionFailure::CssFileNotFound);
  }

  fs::read(path)
    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    .map_err(|_| ConversionFailure::CssFileNotFound)
}

fn prepare_output_dir(
  path: &Path,
  sink: &dyn DiagnosticSink,
) -> Result<(), ConversionFailure> {
  if let Err(error) = fs::create_dir_all(path) {
    sink.event(&ConversionEvent::OutputDirectoryUnavailable {
      path,
      error: &error,
    });
  }

  if path.is_dir() {
    Ok(())
  } else {
    Err(ConversionFailure::InvalidOutputDirectoryPathSpecified)
  }
}
