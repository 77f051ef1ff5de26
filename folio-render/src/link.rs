//! Link target classification.
//!
//! The target string alone decides how a link is rendered:
//!
//! - `/docs/intro` is routed by the host ([`Tag::NavLink`]).
//! - `#section-2` is a plain anchor that scrolls within the page.
//! - Anything else, including a missing target, opens in a new browsing
//!   context with `rel="noopener noreferrer"`.
use serde::Serialize;

use crate::output::{Attributes, Element, Rendered, Tag};

/// `rel` value forced on external links.
pub const EXTERNAL_REL: &str = "noopener noreferrer";

/// Rendering strategy for a link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LinkClass {
  InternalPath,
  InPageAnchor,
  External,
}

/// Classify a link target. The first matching rule wins.
///
/// ```
/// use folio_render::{LinkClass, classify};
///
/// assert_eq!(classify(Some("/docs/intro")), LinkClass::InternalPath);
/// assert_eq!(classify(Some("#section-2")), LinkClass::InPageAnchor);
/// assert_eq!(classify(Some("https://example.com")), LinkClass::External);
/// assert_eq!(classify(None), LinkClass::External);
/// ```
#[must_use]
pub fn classify(href: Option<&str>) -> LinkClass {
  match href {
    Some(href) if href.starts_with('/') => LinkClass::InternalPath,
    Some(href) if href.starts_with('#') => LinkClass::InPageAnchor,
    _ => LinkClass::External,
  }
}

/// Build the element for a link.
///
/// All passed attributes are kept. External links additionally get
/// `target="_blank"` and [`EXTERNAL_REL`], replacing any author value.
#[must_use]
pub fn link_element(
  href: Option<&str>,
  attrs: &Attributes,
  children: Vec<Rendered>,
) -> Element {
  let class = classify(href);
  let tag = match class {
    LinkClass::InternalPath => Tag::NavLink,
    LinkClass::InPageAnchor | LinkClass::External => {
      Tag::Html("a".to_string())
    },
  };

  let mut element = Element::with_tag(tag).children(children);
  if let Some(href) = href {
    element.attrs.set("href", href);
  }
  element.attrs.merge(attrs);

  if class == LinkClass::External {
    element.attrs.set("target", "_blank");
    element.attrs.set("rel", EXTERNAL_REL);
  }
  element
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_classify_internal_path() {
    assert_eq!(classify(Some("/docs/intro")), LinkClass::InternalPath);
    assert_eq!(classify(Some("/")), LinkClass::InternalPath);
    // Protocol-relative URLs start with a slash too.
    assert_eq!(classify(Some("//cdn.example.com")), LinkClass::InternalPath);
  }

  #[test]
  fn test_classify_in_page_anchor() {
    assert_eq!(classify(Some("#section-2")), LinkClass::InPageAnchor);
    assert_eq!(classify(Some("#")), LinkClass::InPageAnchor);
  }

  #[test]
  fn test_classify_external() {
    for href in [
      "https://example.com",
      "http://example.com/#frag",
      "mailto:someone@example.com",
      "docs/relative",
      "./relative",
      "",
    ] {
      assert_eq!(classify(Some(href)), LinkClass::External, "{href}");
    }
    assert_eq!(classify(None), LinkClass::External);
  }

  #[test]
  fn test_internal_link_keeps_attributes() {
    let attrs: Attributes = [("class", "nav")].into_iter().collect();
    let element =
      link_element(Some("/blog"), &attrs, vec![Rendered::text("Blog")]);
    assert_eq!(element.tag, Tag::NavLink);
    assert_eq!(element.attrs.get("href"), Some("/blog"));
    assert_eq!(element.attrs.get("class"), Some("nav"));
    assert!(!element.attrs.contains("target"));
  }

  #[test]
  fn test_anchor_link_has_no_target() {
    let element = link_element(Some("#usage"), &Attributes::new(), Vec::new());
    assert_eq!(element.tag, Tag::Html("a".to_string()));
    assert!(!element.attrs.contains("target"));
    assert!(!element.attrs.contains("rel"));
  }

  #[test]
  fn test_external_link_forces_target_and_rel() {
    let attrs: Attributes =
      [("target", "_self"), ("rel", "opener")].into_iter().collect();
    let element = link_element(Some("https://example.com"), &attrs, Vec::new());
    assert_eq!(element.attrs.get("target"), Some("_blank"));
    assert_eq!(element.attrs.get("rel"), Some(EXTERNAL_REL));
  }

  #[test]
  fn test_link_without_target_is_external() {
    let element = link_element(None, &Attributes::new(), Vec::new());
    assert!(!element.attrs.contains("href"));
    assert_eq!(element.attrs.get("target"), Some("_blank"));
  }
}
