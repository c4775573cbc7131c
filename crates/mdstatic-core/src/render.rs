//! Markdown to HTML rendering.
use std::{fs, io, path::Path};

use comrak::{Arena, options::Options, parse_document};
use kuchikikiki::NodeRef;
use tendril::TendrilSink;

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
  /// GitHub-flavored extensions: tables, strikethrough, task lists,
  /// autolinks and footnotes.
  pub gfm: bool,

  /// Pass raw HTML embedded in Markdown through instead of dropping it.
  pub raw_html: bool,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      gfm:      true,
      raw_html: true,
    }
  }
}

/// Renders Markdown text into a parsed HTML document.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
  options: RenderOptions,
}

impl MarkdownRenderer {
  #[must_use]
  pub const fn new(options: RenderOptions) -> Self {
    Self { options }
  }

  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  /// Render Markdown into an HTML fragment.
  ///
  /// # Errors
  ///
  /// Returns an error if the formatter fails to write the output.
  pub fn render_fragment(&self, markdown: &str) -> io::Result<String> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, markdown, &options);

    let mut html = String::new();
    comrak::format_html(root, &options, &mut html).map_err(|_| {
      io::Error::other("failed to format rendered markdown")
    })?;
    Ok(html)
  }

  /// Render Markdown into a full HTML document tree with `html`, `head` and
  /// `body` elements; the rendered fragment becomes the body content.
  ///
  /// # Errors
  ///
  /// Returns an error if rendering fails.
  pub fn render_document(&self, markdown: &str) -> io::Result<NodeRef> {
    let fragment = self.render_fragment(markdown)?;
    Ok(kuchikikiki::parse_html().one(fragment.as_str()))
  }

  /// Read a Markdown file and render it. Invalid UTF-8 is replaced.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or rendered.
  pub fn render_file(&self, path: &Path) -> io::Result<NodeRef> {
    let bytes = fs::read(path)?;
    self.render_document(&String::from_utf8_lossy(&bytes))
  }

  fn comrak_options(&self) -> Options<'static> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    options.render.r#unsafe = self.options.raw_html;
    options
  }
}
