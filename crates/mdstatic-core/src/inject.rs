use kuchikikiki::{Attribute, ElementData, ExpandedName, NodeDataRef, NodeRef};
use markup5ever::{LocalName, QualName, local_name, ns};

/// Class added to every page body.
pub const BODY_CLASS: &str = "markdown-body";

/// `content` of the viewport meta tag.
pub const VIEWPORT_CONTENT: &str = "width=device-width, initial-scale=1";

/// Decorate a rendered document: append a viewport meta tag and a `<style>`
/// element holding `stylesheet` to `<head>`, then add [`BODY_CLASS`] to
/// `<body>`.
pub fn inject(document: &NodeRef, stylesheet: &str) {
  if let Ok(head) = document.select_first("head") {
    let head = head.as_node();
    head.append(element(local_name!("meta"), &[
      ("name", "viewport"),
      ("content", VIEWPORT_CONTENT),
    ]));

    let style = element(local_name!("style"), &[]);
    style.append(NodeRef::new_text(stylesheet));
    head.append(style);
  }

  if let Ok(body) = document.select_first("body") {
    add_class(&body, BODY_CLASS);
  }
}

/// Append `class` to the element's class list unless it is already there.
fn add_class(element: &NodeDataRef<ElementData>, class: &str) {
  let mut attributes = element.attributes.borrow_mut();
  let merged = match attributes.get(local_name!("class")) {
    Some(existing) if existing.split_ascii_whitespace().any(|c| c == class) => {
      return;
    },
    Some(existing) if !existing.trim().is_empty() => {
      format!("{} {class}", existing.trim())
    },
    _ => class.to_owned(),
  };
  attributes.insert(local_name!("class"), merged);
}

fn element(name: LocalName, attributes: &[(&str, &str)]) -> NodeRef {
  NodeRef::new_element(
    QualName::new(None, ns!(html), name),
    attributes.iter().map(|&(key, value)| {
      (ExpandedName::new("", key), Attribute {
        prefix: None,
        value:  value.to_owned(),
      })
    }),
  )
}
