#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
mod common;

use std::{
  sync::{Arc, Mutex, mpsc},
  task::Poll,
  time::Duration,
};

use common::{linked_docs, workspaces};
use mdstatic_core::{
  CancelHandle,
  Cancelled,
  ConversionEvent,
  Converter,
  DiagnosticSink,
  NullSink,
};

const WAIT: Duration = Duration::from_secs(30);

/// Forwards every event name and holds the worker at the first document
/// until released.
struct GatedSink {
  events:  mpsc::Sender<String>,
  release: Mutex<mpsc::Receiver<()>>,
}

impl DiagnosticSink for GatedSink {
  fn event(&self, event: &ConversionEvent<'_>) {
    let _ = self.events.send(event.name().to_owned());
    if matches!(event, ConversionEvent::DocumentStarted { .. }) {
      let _ = self.release.lock().expect("release lock poisoned").recv();
    }
  }
}

fn wait_for(events: &mpsc::Receiver<String>, name: &str) {
  loop {
    let next = events
      .recv_timeout(WAIT)
      .unwrap_or_else(|_| panic!("no {name} event"));
    if next == name {
      return;
    }
  }
}

#[tokio::test]
async fn converts_on_the_blocking_pool() {
  let fx = linked_docs();
  let result = Converter::with_sink(Arc::new(NullSink))
    .convert(fx.request())
    .await
    .expect("conversion was not cancelled");

  let site = result
    .output_directory_path()
    .expect("conversion succeeded");
  assert!(site.join("README.html").is_file());
}

#[tokio::test]
async fn free_function_uses_default_converter() {
  let fx = linked_docs();
  let result = mdstatic_core::convert(&fx.source, &fx.css, &fx.output)
    .await
    .expect("conversion was not cancelled");
  assert!(result.is_success());
}

#[tokio::test]
async fn raised_handle_cancels() {
  let fx = linked_docs();
  let cancel = CancelHandle::new();
  cancel.cancel();

  let outcome = Converter::with_sink(Arc::new(NullSink))
    .convert_with_cancel(fx.request(), cancel)
    .await;
  assert!(matches!(outcome, Err(Cancelled)));
  assert!(workspaces(&fx.output).is_empty());
}

#[tokio::test]
async fn completed_conversion_does_not_raise_the_handle() {
  let fx = linked_docs();
  let cancel = CancelHandle::new();
  let outcome = Converter::with_sink(Arc::new(NullSink))
    .convert_with_cancel(fx.request(), cancel.clone())
    .await;
  assert!(outcome.is_ok());
  assert!(!cancel.is_cancelled());
}

#[tokio::test]
async fn dropping_the_future_cancels_the_worker() {
  let fx = linked_docs();
  let (events_tx, events) = mpsc::channel();
  let (release, release_rx) = mpsc::channel();
  let converter = Converter::with_sink(Arc::new(GatedSink {
    events:  events_tx,
    release: Mutex::new(release_rx),
  }));
  let cancel = CancelHandle::new();

  let mut pending =
    Box::pin(converter.convert_with_cancel(fx.request(), cancel.clone()));
  let first_poll =
    std::future::poll_fn(|cx| Poll::Ready(pending.as_mut().poll(cx))).await;
  assert!(first_poll.is_pending());

  wait_for(&events, "document-started");
  drop(pending);
  assert!(cancel.is_cancelled());

  release.send(()).expect("worker is waiting");
  wait_for(&events, "cancelled");

  let created = workspaces(&fx.output);
  assert_eq!(created.len(), 1);
  let name = created[0]
    .file_name()
    .unwrap()
    .to_string_lossy()
    .into_owned();
  assert!(!fx.output.join(format!("{name}.txt")).exists());
  assert!(created[0].join("README.html").is_file());
  assert!(created[0].join("document1.md").is_file());
}
