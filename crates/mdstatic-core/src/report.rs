//! The conversion report: one line per converted document, written next to
//! the workspace as `<workspace name>.txt`.

use std::{
  fs::OpenOptions,
  io::{self, BufWriter, Write},
  path::{Path, PathBuf},
};

use crate::{
  diagnostics::{ConversionEvent, DiagnosticSink},
  inventory::DocumentInventory,
  materialize::html_path_for,
  workspace::Workspace,
};

/// Separator between the Markdown and HTML path of a report line.
pub const ARROW: &str = " → ";

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Where the report of `workspace` goes.
#[must_use]
pub fn report_path(output_dir: &Path, workspace: &Workspace) -> PathBuf {
  output_dir.join(format!("{}.txt", workspace.name()))
}

/// Format a single report line, line ending included.
#[must_use]
pub fn format_entry(markdown: &str, html: &str) -> String {
  format!("{markdown}{ARROW}{html}{LINE_ENDING}")
}

/// Render the whole report in inventory order. Paths are relative to the
/// workspace root.
#[must_use]
pub fn render_report(
  workspace: &Workspace,
  inventory: &DocumentInventory,
) -> String {
  inventory
    .documents()
    .iter()
    .map(|document| {
      format_entry(
        &workspace.relative_display(document),
        &workspace.relative_display(&html_path_for(document)),
      )
    })
    .collect()
}

/// Write the report into `output_dir`.
///
/// The report file is expected to be new. If it somehow exists already, a
/// warning is emitted and the entries are appended.
///
/// # Errors
///
/// Returns an error if the report cannot be opened or written.
pub fn write_report(
  output_dir: &Path,
  workspace: &Workspace,
  inventory: &DocumentInventory,
  sink: &dyn DiagnosticSink,
) -> io::Result<PathBuf> {
  let path = report_path(output_dir, workspace);

  let file = match OpenOptions::new().write(true).create_new(true).open(&path)
  {
    Ok(file) => file,
    Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
      sink.event(&ConversionEvent::ReportAlreadyExists { path: &path });
      OpenOptions::new().append(true).open(&path)?
    },
    Err(err) => return Err(err),
  };

  let mut writer = BufWriter::new(file);
  writer.write_all(render_report(workspace, inventory).as_bytes())?;
  writer.flush()?;

  sink.event(&ConversionEvent::ReportWritten {
    path:    &path,
    entries: inventory.len(),
  });
  Ok(path)
}
