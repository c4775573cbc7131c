use std::{
  fs::{self, OpenOptions},
  io::{self, Write},
  path::{Path, PathBuf},
};

use kuchikikiki::NodeRef;

use crate::{
  diagnostics::{ConversionEvent, DiagnosticSink},
  inventory::is_bare_markdown_name,
  result::ConversionFailure,
  workspace::Workspace,
};

/// Sibling path of a Markdown document with the extension replaced by
/// `.html`. A document named `.md` becomes `.html`.
#[must_use]
pub fn html_path_for(source: &Path) -> PathBuf {
  if is_bare_markdown_name(source) {
    source.with_file_name(".html")
  } else {
    source.with_extension("html")
  }
}

/// Serialize a document tree to HTML bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize(document: &NodeRef) -> io::Result<Vec<u8>> {
  let mut buf = Vec::new();
  document.serialize(&mut buf)?;
  Ok(buf)
}

/// Write the page for `source` next to it and remove the Markdown file.
///
/// The HTML file must not exist yet. A source that cannot be removed is
/// reported to `sink` but does not fail the conversion.
///
/// # Errors
///
/// Returns [`ConversionFailure::FailedToCreateHtmlFile`] if the HTML path is
/// taken, or a classified I/O failure if writing fails.
pub fn materialize(
  source: &Path,
  html: &[u8],
  workspace: &Workspace,
  sink: &dyn DiagnosticSink,
) -> Result<PathBuf, ConversionFailure> {
  let output = html_path_for(source);

  let mut file = match OpenOptions::new()
    .write(true)
    .create_new(true)
    .open(&output)
  {
    Ok(file) => file,
    Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
      return Err(ConversionFailure::FailedToCreateHtmlFile {
        file_name: workspace.relative_display(source),
      });
    },
    Err(err) => return Err(err.into()),
  };

  file.write_all(html)?;
  file.flush()?;

  if let Err(error) = fs::remove_file(source) {
    sink.event(&ConversionEvent::SourceDeleteFailed {
      source,
      error: &error,
    });
  }

  Ok(output)
}
