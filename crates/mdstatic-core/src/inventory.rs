use std::{
  collections::HashSet,
  fs,
  io,
  path::{Path, PathBuf},
};

use walkdir::WalkDir;

/// Every Markdown document of a workspace, by canonical path.
///
/// Built once before any document is converted and never changed
/// afterwards, so link resolution does not depend on conversion order.
#[derive(Debug, Clone, Default)]
pub struct DocumentInventory {
  documents: Vec<PathBuf>,
  index:     HashSet<PathBuf>,
}

impl DocumentInventory {
  /// Walk `root` and collect every regular file with an `.md` extension
  /// (case-insensitive). Traversal order is sorted by file name so runs are
  /// reproducible.
  ///
  /// # Errors
  ///
  /// Returns an error if the tree cannot be walked or a document path cannot
  /// be canonicalized.
  pub fn collect(root: &Path) -> io::Result<Self> {
    let mut inventory = Self::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
      let entry = entry?;
      let path = entry.path();
      if is_markdown_file(path) {
        inventory.insert(fs::canonicalize(path)?);
      }
    }

    Ok(inventory)
  }

  fn insert(&mut self, canonical: PathBuf) {
    if self.index.insert(canonical.clone()) {
      self.documents.push(canonical);
    }
  }

  /// Documents in traversal order.
  #[must_use]
  pub fn documents(&self) -> &[PathBuf] {
    &self.documents
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.documents.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }

  /// Look up a canonical path.
  #[must_use]
  pub fn get(&self, canonical: &Path) -> Option<&Path> {
    self.index.get(canonical).map(PathBuf::as_path)
  }

  #[must_use]
  pub fn contains(&self, canonical: &Path) -> bool {
    self.index.contains(canonical)
  }
}

/// Whether `path` is a regular file with an `.md` extension in any case.
#[must_use]
pub fn is_markdown_file(path: &Path) -> bool {
  path.is_file() && has_markdown_extension(path)
}

/// Whether the file name of `path` ends in `.md` in any case. A bare `.md`
/// counts, although [`Path::extension`] sees no extension there.
#[must_use]
pub fn has_markdown_extension(path: &Path) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
    || is_bare_markdown_name(path)
}

/// Whether the file name of `path` is exactly `.md` in any case.
#[must_use]
pub fn is_bare_markdown_name(path: &Path) -> bool {
  path
    .file_name()
    .is_some_and(|name| name.eq_ignore_ascii_case(".md"))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Tests can unwrap")]

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn collects_markdown_in_any_case_and_skips_the_rest() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("sub/deeper")).unwrap();
    fs::create_dir_all(root.join("dir.md")).unwrap();
    for file in [
      "README.md",
      "NOTES.MD",
      "text.txt",
      "page.html",
      "sub/document3.md",
      "sub/書類4.md",
      "sub/deeper/x.Md",
      "sub/.md",
      ".mdx",
    ] {
      fs::write(root.join(file), "x").unwrap();
    }

    let inventory = DocumentInventory::collect(root).unwrap();
    let canonical_root = fs::canonicalize(root).unwrap();
    let names: Vec<_> = inventory
      .documents()
      .iter()
      .map(|doc| doc.strip_prefix(&canonical_root).unwrap().to_path_buf())
      .collect();

    assert_eq!(names, [
      PathBuf::from("NOTES.MD"),
      PathBuf::from("README.md"),
      PathBuf::from("sub/.md"),
      PathBuf::from("sub/deeper/x.Md"),
      PathBuf::from("sub/document3.md"),
      PathBuf::from("sub/書類4.md"),
    ]);
    assert!(inventory.contains(&canonical_root.join("sub/document3.md")));
    assert!(!inventory.contains(&canonical_root.join("text.txt")));
  }

  #[test]
  fn bare_md_file_name_is_markdown() {
    assert!(has_markdown_extension(Path::new("/w/.md")));
    assert!(has_markdown_extension(Path::new("/w/.MD")));
    assert!(has_markdown_extension(Path::new("/w/a.md")));
    assert!(!has_markdown_extension(Path::new("/w/.mdx")));
    assert!(!has_markdown_extension(Path::new("/w/md")));
    assert!(!is_bare_markdown_name(Path::new("/w/a.md")));
  }

  #[test]
  fn empty_tree_gives_empty_inventory() {
    let dir = tempdir().unwrap();
    let inventory = DocumentInventory::collect(dir.path()).unwrap();
    assert!(inventory.is_empty());
    assert_eq!(inventory.len(), 0);
  }

  #[test]
  fn duplicate_canonical_paths_are_kept_once() {
    let mut inventory = DocumentInventory::default();
    inventory.insert(PathBuf::from("/w/a.md"));
    inventory.insert(PathBuf::from("/w/a.md"));
    assert_eq!(inventory.len(), 1);
    assert_eq!(
      inventory.get(Path::new("/w/a.md")),
      Some(Path::new("/w/a.md"))
    );
  }
}
