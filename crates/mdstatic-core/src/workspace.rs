use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use crate::result::ConversionFailure;

/// Name prefix of every workspace directory.
pub const WORKSPACE_PREFIX: &str = "docs_";

/// A uniquely named directory inside the output directory holding a copy of
/// the source tree. Conversion happens in place here, so the original tree is
/// never modified.
///
/// The directory outlives the conversion: on success it is the generated
/// site, on failure it is left behind for inspection.
#[derive(Debug, Clone)]
pub struct Workspace {
  root: PathBuf,
  name: String,
}

impl Workspace {
  /// Create a fresh, empty workspace under `output_dir`.
  ///
  /// # Errors
  ///
  /// Returns an error if the directory cannot be created or resolved.
  pub fn create(output_dir: &Path) -> io::Result<Self> {
    let dir = tempfile::Builder::new()
      .prefix(WORKSPACE_PREFIX)
      .tempdir_in(output_dir)?
      .keep();

    let root = fs::canonicalize(&dir)?;
    let name = root
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .ok_or_else(|| {
        io::Error::other(format!(
          "workspace {} has no file name",
          root.display()
        ))
      })?;

    Ok(Self { root, name })
  }

  /// Copy the contents of `target_dir` into the workspace, preserving the
  /// relative structure. Non-Markdown files are copied byte for byte.
  ///
  /// # Errors
  ///
  /// Returns the classified failure of the first file that could not be
  /// copied.
  pub fn stage(&self, target_dir: &Path) -> Result<u64, ConversionFailure> {
    let options = fs_extra::dir::CopyOptions::new().content_only(true);
    Ok(fs_extra::dir::copy(target_dir, &self.root, &options)?)
  }

  /// Canonical absolute path of the workspace.
  #[must_use]
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Final path component, e.g. `docs_a1B2c3`.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// `path` relative to the workspace root, `/`-separated.
  ///
  /// Paths outside the workspace are returned unchanged.
  #[must_use]
  pub fn relative_display(&self, path: &Path) -> String {
    let relative = path.strip_prefix(&self.root).unwrap_or(path);
    relative
      .components()
      .map(|component| component.as_os_str().to_string_lossy())
      .collect::<Vec<_>>()
      .join("/")
  }
}
