//! Progress and diagnostic events emitted while a conversion runs.
//!
//! The engine never prints on its own. Every noteworthy step is handed to a
//! [`DiagnosticSink`]; [`LogSink`] forwards them to the `log` facade and is
//! what [`crate::Converter`] uses unless told otherwise.

use std::{io, path::Path};

use log::{debug, error, info, trace, warn};

use crate::result::{ConversionRequest, ConversionResult};

/// A single step of a conversion worth reporting.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum ConversionEvent<'a> {
  Started {
    request: &'a ConversionRequest,
  },
  StylesheetLoaded {
    path:  &'a Path,
    bytes: usize,
  },
  OutputDirectoryUnavailable {
    path:  &'a Path,
    error: &'a io::Error,
  },
  WorkspaceCreated {
    path: &'a Path,
  },
  WorkspaceStaged {
    path: &'a Path,
  },
  InventoryBuilt {
    documents: usize,
  },
  DocumentStarted {
    source: &'a Path,
  },
  LinkRewritten {
    source: &'a Path,
    from:   &'a str,
    to:     &'a str,
  },
  LinkKept {
    source: &'a Path,
    href:   &'a str,
  },
  DocumentWritten {
    source: &'a Path,
    output: &'a Path,
  },
  SourceDeleteFailed {
    source: &'a Path,
    error:  &'a io::Error,
  },
  ReportAlreadyExists {
    path: &'a Path,
  },
  ReportWritten {
    path:    &'a Path,
    entries: usize,
  },
  Cancelled,
  Finished {
    result: &'a ConversionResult,
  },
}

impl ConversionEvent<'_> {
  /// Stable name of the event kind, handy for filtering.
  #[must_use]
  pub const fn name(&self) -> &'static str {
    match self {
      Self::Started { .. } => "started",
      Self::StylesheetLoaded { .. } => "stylesheet-loaded",
      Self::OutputDirectoryUnavailable { .. } => "output-directory-unavailable",
      Self::WorkspaceCreated { .. } => "workspace-created",
      Self::WorkspaceStaged { .. } => "workspace-staged",
      Self::InventoryBuilt { .. } => "inventory-built",
      Self::DocumentStarted { .. } => "document-started",
      Self::LinkRewritten { .. } => "link-rewritten",
      Self::LinkKept { .. } => "link-kept",
      Self::DocumentWritten { .. } => "document-written",
      Self::SourceDeleteFailed { .. } => "source-delete-failed",
      Self::ReportAlreadyExists { .. } => "report-already-exists",
      Self::ReportWritten { .. } => "report-written",
      Self::Cancelled => "cancelled",
      Self::Finished { .. } => "finished",
    }
  }
}

/// Receiver for [`ConversionEvent`]s.
///
/// Sinks are shared with the blocking worker thread, hence `Send + Sync`.
pub trait DiagnosticSink: Send + Sync {
  fn event(&self, event: &ConversionEvent<'_>);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
  fn event(&self, event: &ConversionEvent<'_>) {
    match *event {
      ConversionEvent::Started { request } => {
        info!(
          "Converting {} into {}",
          request.target_dir.display(),
          request.output_dir.display()
        );
      },
      ConversionEvent::StylesheetLoaded { path, bytes } => {
        debug!("Loaded stylesheet {} ({bytes} bytes)", path.display());
      },
      ConversionEvent::OutputDirectoryUnavailable { path, error } => {
        debug!("Could not create {}: {error}", path.display());
      },
      ConversionEvent::WorkspaceCreated { path } => {
        debug!("Created workspace {}", path.display());
      },
      ConversionEvent::WorkspaceStaged { path } => {
        debug!("Copied source tree into {}", path.display());
      },
      ConversionEvent::InventoryBuilt { documents } => {
        info!("Found {documents} markdown documents");
      },
      ConversionEvent::DocumentStarted { source } => {
        debug!("Converting {}", source.display());
      },
      ConversionEvent::LinkRewritten { source, from, to } => {
        trace!("{}: rewrote link {from} -> {to}", source.display());
      },
      ConversionEvent::LinkKept { source, href } => {
        trace!("{}: left link {href} untouched", source.display());
      },
      ConversionEvent::DocumentWritten { output, .. } => {
        debug!("Wrote {}", output.display());
      },
      ConversionEvent::SourceDeleteFailed { source, error } => {
        warn!("Could not remove {}: {error}", source.display());
      },
      ConversionEvent::ReportAlreadyExists { path } => {
        warn!("Report {} already exists, appending to it", path.display());
      },
      ConversionEvent::ReportWritten { path, entries } => {
        debug!("Wrote report {} with {entries} entries", path.display());
      },
      ConversionEvent::Cancelled => warn!("Conversion cancelled"),
      ConversionEvent::Finished { result } => {
        match result {
          ConversionResult::Success {
            output_directory_path,
          } => info!("Site written to {}", output_directory_path.display()),
          ConversionResult::Failure(failure) => {
            error!("Conversion failed: {failure}");
          },
        }
      },
    }
  }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
  fn event(&self, _event: &ConversionEvent<'_>) {}
}
