//! The conversion pipeline and its async entry point.

use std::{
  panic,
  path::{Path, PathBuf},
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
};

use crate::{
  diagnostics::{ConversionEvent, DiagnosticSink, LogSink},
  error::{Abort, Cancelled},
  inject,
  inventory::DocumentInventory,
  links::LinkResolver,
  materialize,
  render::MarkdownRenderer,
  report,
  result::{ConversionFailure, ConversionRequest, ConversionResult},
  validate::validate,
  workspace::Workspace,
};

/// Cooperative cancellation flag shared between a caller and a running
/// conversion.
///
/// The pipeline checks it before staging the workspace, before each document
/// and before writing the report. A document already being converted is
/// finished first.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cancel(&self) {
    self.0.store(true, Ordering::SeqCst);
  }

  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::SeqCst)
  }

  fn check(&self) -> Result<(), Cancelled> {
    if self.is_cancelled() {
      Err(Cancelled)
    } else {
      Ok(())
    }
  }
}

/// Raises the flag when the awaiting future is dropped early.
struct CancelOnDrop(Option<CancelHandle>);

impl CancelOnDrop {
  fn disarm(mut self) {
    self.0 = None;
  }
}

impl Drop for CancelOnDrop {
  fn drop(&mut self) {
    if let Some(handle) = self.0.take() {
      handle.cancel();
    }
  }
}

/// Converts a directory of Markdown documents into a static HTML site.
#[derive(Clone)]
pub struct Converter {
  sink:     Arc<dyn DiagnosticSink>,
  renderer: MarkdownRenderer,
}

impl Default for Converter {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for Converter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Converter")
      .field("renderer", &self.renderer)
      .finish_non_exhaustive()
  }
}

impl Converter {
  /// A converter reporting through the `log` facade.
  #[must_use]
  pub fn new() -> Self {
    Self::with_sink(Arc::new(LogSink))
  }

  #[must_use]
  pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
    Self {
      sink,
      renderer: MarkdownRenderer::default(),
    }
  }

  #[must_use]
  pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
    self.renderer = renderer;
    self
  }

  /// Run a conversion on tokio's blocking pool.
  ///
  /// Dropping the returned future cancels the conversion at its next check.
  ///
  /// # Errors
  ///
  /// Returns [`Cancelled`] if the conversion was cancelled.
  ///
  /// # Panics
  ///
  /// Re-raises a panic of the conversion worker.
  pub async fn convert(
    &self,
    request: ConversionRequest,
  ) -> Result<ConversionResult, Cancelled> {
    self.convert_with_cancel(request, CancelHandle::new()).await
  }

  /// Like [`Converter::convert`], with a caller-owned cancellation handle.
  ///
  /// # Errors
  ///
  /// Returns [`Cancelled`] if `cancel` was raised before the conversion
  /// finished.
  pub async fn convert_with_cancel(
    &self,
    request: ConversionRequest,
    cancel: CancelHandle,
  ) -> Result<ConversionResult, Cancelled> {
    let guard = CancelOnDrop(Some(cancel.clone()));
    let converter = self.clone();
    let joined = tokio::task::spawn_blocking(move || {
      converter.convert_blocking(&request, &cancel)
    })
    .await;
    guard.disarm();

    match joined {
      Ok(result) => result,
      Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
      Err(_) => Err(Cancelled),
    }
  }

  /// Run a conversion on the current thread.
  ///
  /// # Errors
  ///
  /// Returns [`Cancelled`] if `cancel` was raised before the conversion
  /// finished.
  pub fn convert_blocking(
    &self,
    request: &ConversionRequest,
    cancel: &CancelHandle,
  ) -> Result<ConversionResult, Cancelled> {
    self.sink.event(&ConversionEvent::Started { request });

    let result = match self.run(request, cancel) {
      Ok(output_directory_path) => {
        ConversionResult::Success {
          output_directory_path,
        }
      },
      Err(Abort::Failed(failure)) => ConversionResult::Failure(failure),
      Err(Abort::Cancelled(cancelled)) => {
        self.sink.event(&ConversionEvent::Cancelled);
        return Err(cancelled);
      },
    };

    self.sink.event(&ConversionEvent::Finished { result: &result });
    Ok(result)
  }

  fn run(
    &self,
    request: &ConversionRequest,
    cancel: &CancelHandle,
  ) -> Result<PathBuf, Abort> {
    let sink = self.sink.as_ref();
    let inputs = validate(request, sink)?;
    cancel.check()?;

    let workspace = Workspace::create(&inputs.output_dir)?;
    sink.event(&ConversionEvent::WorkspaceCreated {
      path: workspace.root(),
    });
    workspace.stage(&inputs.target_dir)?;
    sink.event(&ConversionEvent::WorkspaceStaged {
      path: workspace.root(),
    });

    let inventory = DocumentInventory::collect(workspace.root())?;
    sink.event(&ConversionEvent::InventoryBuilt {
      documents: inventory.len(),
    });

    let resolver = LinkResolver::new(&inventory);
    for source in inventory.documents() {
      cancel.check()?;
      self.convert_document(source, &resolver, &workspace, &inputs.stylesheet)?;
    }

    cancel.check()?;
    report::write_report(&inputs.output_dir, &workspace, &inventory, sink)?;

    Ok(workspace.root().to_path_buf())
  }

  fn convert_document(
    &self,
    source: &Path,
    resolver: &LinkResolver<'_>,
    workspace: &Workspace,
    stylesheet: &str,
  ) -> Result<PathBuf, ConversionFailure> {
    let sink = self.sink.as_ref();
    sink.event(&ConversionEvent::DocumentStarted { source });

    let document = self.renderer.render_file(source)?;
    resolver.rewrite(&document, source, sink);
    inject::inject(&document, stylesheet);

    let html = materialize::serialize(&document)?;
    let output = materialize::materialize(source, &html, workspace, sink)?;
    sink.event(&ConversionEvent::DocumentWritten {
      source,
      output: &output,
    });
    Ok(output)
  }
}
