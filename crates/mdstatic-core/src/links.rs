//! Rewriting of links between Markdown documents.
//!
//! An anchor is rewritten only when its target resolves to a document in the
//! [`DocumentInventory`]. Everything else (external URLs, missing files,
//! assets, fragments) is left exactly as rendered.

use std::{
  fs,
  path::{Path, PathBuf},
};

use kuchikikiki::NodeRef;
use markup5ever::local_name;
use percent_encoding::percent_decode_str;

use crate::{
  diagnostics::{ConversionEvent, DiagnosticSink},
  inventory::DocumentInventory,
};

/// An `href` found in a rendered document, in raw and decoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
  pub raw:     String,
  pub decoded: String,
}

impl LinkReference {
  #[must_use]
  pub fn new(raw: impl Into<String>) -> Self {
    let raw = raw.into();
    let decoded = decode_href(&raw);
    Self { raw, decoded }
  }

  /// Candidate filesystem paths relative to `base_dir`, raw form first.
  #[must_use]
  pub fn candidates(&self, base_dir: &Path) -> [PathBuf; 2] {
    [base_dir.join(&self.raw), base_dir.join(&self.decoded)]
  }
}

/// Decode an `href` the way HTML form data is decoded: `+` becomes a space,
/// then percent escapes are expanded. Invalid UTF-8 is replaced.
#[must_use]
pub fn decode_href(raw: &str) -> String {
  let spaced = raw.replace('+', " ");
  percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// The `href` pointing at the converted page of a Markdown link: the last
/// three characters (the `.md` suffix in any case) become `.html`.
#[must_use]
pub fn html_href_for(raw: &str) -> String {
  let cut = raw.char_indices().rev().nth(2).map_or(0, |(index, _)| index);
  format!("{}.html", &raw[..cut])
}

/// Resolves link references against a document inventory.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
  inventory: &'a DocumentInventory,
}

impl<'a> LinkResolver<'a> {
  #[must_use]
  pub const fn new(inventory: &'a DocumentInventory) -> Self {
    Self { inventory }
  }

  /// The inventory document `link` points at when it appears in `source`.
  ///
  /// Each candidate is canonicalized; one that does not exist or cannot be
  /// resolved simply does not match.
  #[must_use]
  pub fn resolve(&self, source: &Path, link: &LinkReference) -> Option<&'a Path> {
    let base_dir = source.parent()?;
    link.candidates(base_dir).iter().find_map(|candidate| {
      let canonical = fs::canonicalize(candidate).ok()?;
      self.inventory.get(&canonical)
    })
  }

  /// Rewrite every anchor of `document` that links to an inventory
  /// document. Returns the number of rewritten anchors.
  pub fn rewrite(
    &self,
    document: &NodeRef,
    source: &Path,
    sink: &dyn DiagnosticSink,
  ) -> usize {
    let mut rewritten = 0;
    for anchor in document.select("a[href]").into_iter().flatten() {
      let mut attributes = anchor.attributes.borrow_mut();
      let Some(raw) = attributes.get(local_name!("href")).map(str::to_owned)
      else {
        continue;
      };

      let link = LinkReference::new(raw);
      if self.resolve(source, &link).is_some() {
        let href = html_href_for(&link.raw);
        sink.event(&ConversionEvent::LinkRewritten {
          source,
          from: &link.raw,
          to: &href,
        });
        attributes.insert(local_name!("href"), href);
        rewritten += 1;
      } else {
        sink.event(&ConversionEvent::LinkKept {
          source,
          href: &link.raw,
        });
      }
    }

    rewritten
  }
}
