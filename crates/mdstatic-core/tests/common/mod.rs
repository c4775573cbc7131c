#![allow(dead_code, reason = "Not every test binary uses every helper")]
use std::{
  fs,
  path::{Path, PathBuf},
  sync::Mutex,
};

use kuchikikiki::NodeRef;
use mdstatic_core::{ConversionEvent, ConversionRequest, DiagnosticSink};
use tempfile::{TempDir, tempdir};
use tendril::TendrilSink;

pub const STYLESHEET: &str = "body { font-family: sans-serif; }\n";

pub const PNG_BYTES: &[u8] =
  &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

const README: &str = "# 目次

- [目次](README.md)
- [document1](document1.md)
- [ドキュメント2](ドキュメント2.md)
- [document3](sub/document3.md)
- [書類4](sub/書類4.md)
- [text1](text1.txt)
- [テキスト2](テキスト2.txt)
- [text3](sub/text3.txt)
- [平文4](sub/平文4.txt)
- [example](https://example.com)
- [./document1](./document1.md)
- [./sub/document3](./sub/document3.md)
- [missing](存在しないファイル.md)
- [missing sub](sub/存在しないファイル.md)
- [image](res/example_image.png)
";

const SUB_DOCUMENT: &str = "# 書類4

- [README](../README.md)
- [document3](document3.md)
- [./document3](./document3.md)
- [text1](../text1.txt)
- [missing](存在しないファイル.md)
";

/// A scratch area with a Markdown tree, a stylesheet and an output path.
pub struct Fixture {
  _dir:       TempDir,
  pub source: PathBuf,
  pub css:    PathBuf,
  pub output: PathBuf,
}

impl Fixture {
  pub fn request(&self) -> ConversionRequest {
    ConversionRequest::new(&self.source, &self.css, &self.output)
  }
}

fn write(root: &Path, relative: &str, contents: impl AsRef<[u8]>) {
  let path = root.join(relative);
  fs::create_dir_all(path.parent().expect("fixture path has a parent"))
    .expect("Failed to create fixture dir in test");
  fs::write(path, contents).expect("Failed to write fixture file in test");
}

/// Build a fixture from `(relative path, contents)` pairs.
pub fn fixture(files: &[(&str, &[u8])]) -> Fixture {
  let dir = tempdir().expect("Failed to create temp dir in test");
  let source = dir.path().join("docs");
  fs::create_dir_all(&source).expect("Failed to create docs dir in test");
  for (relative, contents) in files {
    write(&source, relative, contents);
  }

  let css = dir.path().join("style.css");
  fs::write(&css, STYLESHEET).expect("Failed to write stylesheet in test");

  Fixture {
    output: dir.path().join("out"),
    _dir: dir,
    source,
    css,
  }
}

/// Interlinked documents with non-ASCII names, plain text files and an
/// image.
pub fn linked_docs() -> Fixture {
  fixture(&[
    ("README.md", README.as_bytes()),
    ("document1.md", "# document1\n\n[back](README.md)\n".as_bytes()),
    ("ドキュメント2.md", "# ドキュメント2\n".as_bytes()),
    ("text1.txt", "text1".as_bytes()),
    ("テキスト2.txt", "テキスト2".as_bytes()),
    ("test.html", "<p>hand written</p>".as_bytes()),
    ("sub/document3.md", "# document3\n".as_bytes()),
    ("sub/書類4.md", SUB_DOCUMENT.as_bytes()),
    ("sub/text3.txt", "text3".as_bytes()),
    ("sub/平文4.txt", "平文4".as_bytes()),
    ("res/example_image.png", PNG_BYTES),
  ])
}

/// Records the name of every event it sees.
#[derive(Default)]
pub struct RecordingSink(Mutex<Vec<String>>);

impl RecordingSink {
  pub fn names(&self) -> Vec<String> {
    self.0.lock().expect("sink lock poisoned").clone()
  }
}

impl DiagnosticSink for RecordingSink {
  fn event(&self, event: &ConversionEvent<'_>) {
    self
      .0
      .lock()
      .expect("sink lock poisoned")
      .push(event.name().to_owned());
  }
}

pub fn parse_page(path: &Path) -> NodeRef {
  let html = fs::read_to_string(path).expect("Failed to read page in test");
  kuchikikiki::parse_html().one(html)
}

/// `(text, decoded href)` of every anchor in a generated page.
pub fn anchors(path: &Path) -> Vec<(String, String)> {
  parse_page(path)
    .select("a")
    .expect("valid selector")
    .map(|anchor| {
      let href = anchor
        .attributes
        .borrow()
        .get("href")
        .map(mdstatic_core::links::decode_href)
        .unwrap_or_default();
      (anchor.as_node().text_contents(), href)
    })
    .collect()
}

/// Names of the `docs_*` workspaces under `output`.
pub fn workspaces(output: &Path) -> Vec<PathBuf> {
  let Ok(entries) = fs::read_dir(output) else {
    return Vec::new();
  };
  entries
    .filter_map(Result::ok)
    .map(|entry| entry.path())
    .filter(|path| {
      path.is_dir()
        && path
          .file_name()
          .is_some_and(|name| name.to_string_lossy().starts_with("docs_"))
    })
    .collect()
}
