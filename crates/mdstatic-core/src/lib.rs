//! Conversion of a directory of interlinked Markdown documents into a
//! self-contained static HTML site.
//!
//! The source tree is copied into a fresh `docs_*` workspace inside the output
//! directory. Every `.md` file there is rendered, its links to other
//! documents are pointed at the generated pages, the stylesheet is embedded,
//! and the Markdown file is replaced by its `.html` sibling. A report listing
//! each conversion is written next to the workspace.
//!
//! ```no_run
//! # async fn run() -> Result<(), mdstatic_core::Cancelled> {
//! use mdstatic_core::ConversionResult;
//!
//! match mdstatic_core::convert("docs", "style.css", "out").await? {
//!   ConversionResult::Success {
//!     output_directory_path,
//!   } => println!("site in {}", output_directory_path.display()),
//!   ConversionResult::Failure(failure) => eprintln!("{failure}"),
//! }
//! # Ok(())
//! # }
//! ```
use std::path::PathBuf;

pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod inject;
pub mod inventory;
pub mod links;
pub mod materialize;
pub mod render;
pub mod report;
pub mod result;
pub mod validate;
pub mod workspace;

pub use crate::{
  convert::{CancelHandle, Converter},
  diagnostics::{ConversionEvent, DiagnosticSink, LogSink, NullSink},
  error::Cancelled,
  render::{MarkdownRenderer, RenderOptions},
  result::{ConversionFailure, ConversionRequest, ConversionResult},
};

/// Convert `target_dir` into a site under `output_dir`, embedding `css_file`.
///
/// Shorthand for [`Converter::convert`] with default settings.
///
/// # Errors
///
/// Returns [`Cancelled`] if the returned future is dropped and the
/// conversion stops early, or the runtime shuts down underneath it.
pub async fn convert(
  target_dir: impl Into<PathBuf>,
  css_file: impl Into<PathBuf>,
  output_dir: impl Into<PathBuf>,
) -> Result<ConversionResult, Cancelled> {
  Converter::new()
    .convert(ConversionRequest::new(target_dir, css_file, output_dir))
    .await
}
