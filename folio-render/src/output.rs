//! The rendered output tree handed to the presentation layer.
//!
//! Everything in this tree is escaped on serialization except
//! [`Rendered::Trusted`], which can only be produced by the code highlighter
//! adapter (see [`crate::highlight::highlight`]).
use std::fmt;

use serde::{Serialize, Serializer};

/// Element names that never carry content or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "wbr"];

/// Ordered attribute list.
///
/// Setting an existing key replaces its value in place, so the first position
/// of a key is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  /// Value of `key`, if present.
  #[must_use]
  pub fn get(&self, key: &str) -> Option<&str> {
    self
      .0
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }

  #[must_use]
  pub fn contains(&self, key: &str) -> bool {
    self.0.iter().any(|(k, _)| k == key)
  }

  /// Insert or replace `key`.
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
    let key = key.into();
    let value = value.into();
    if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
      slot.1 = value;
    } else {
      self.0.push((key, value));
    }
  }

  /// Insert `key` only when it is not present yet.
  pub fn set_default(
    &mut self,
    key: impl Into<String>,
    value: impl Into<String>,
  ) {
    let key = key.into();
    if !self.contains(&key) {
      self.0.push((key, value.into()));
    }
  }

  pub fn remove(&mut self, key: &str) -> Option<String> {
    let index = self.0.iter().position(|(k, _)| k == key)?;
    Some(self.0.remove(index).1)
  }

  /// Copy every entry of `other` over this list.
  pub fn merge(&mut self, other: &Self) {
    for (key, value) in other.iter() {
      self.set(key, value);
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut attrs = Self::new();
    for (key, value) in iter {
      attrs.set(key, value);
    }
    attrs
  }
}

impl Serialize for Attributes {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(self.iter())
  }
}

/// What an [`Element`] is rendered as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
  /// A plain HTML element.
  Html(String),
  /// The host's client-side navigation link. Routing is the host's job.
  NavLink,
}

impl Tag {
  /// Name written to markup.
  #[must_use]
  pub fn name(&self) -> &str {
    match self {
      Self::Html(name) => name,
      Self::NavLink => "a",
    }
  }
}

impl Serialize for Tag {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Html(name) => serializer.serialize_str(name),
      Self::NavLink => serializer.serialize_str("NavLink"),
    }
  }
}

/// Markup that is injected without escaping.
///
/// Only the highlighter adapter constructs this type; the backend that produced
/// the markup is responsible for escaping the source text it tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
  pub(crate) const fn new(markup: String) -> Self {
    Self(markup)
  }

  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
  pub tag:      Tag,
  pub attrs:    Attributes,
  pub children: Vec<Rendered>,
}

impl Element {
  /// A plain HTML element with no attributes or children.
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self::with_tag(Tag::Html(name.into()))
  }

  #[must_use]
  pub const fn with_tag(tag: Tag) -> Self {
    Self {
      tag,
      attrs: Attributes::new(),
      children: Vec::new(),
    }
  }

  #[must_use]
  pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.attrs.set(key, value);
    self
  }

  #[must_use]
  pub fn attrs(mut self, attrs: &Attributes) -> Self {
    self.attrs.merge(attrs);
    self
  }

  #[must_use]
  pub fn child(mut self, child: impl Into<Rendered>) -> Self {
    self.children.push(child.into());
    self
  }

  #[must_use]
  pub fn children(mut self, children: impl IntoIterator<Item = Rendered>) -> Self {
    self.children.extend(children);
    self
  }
}

/// A node of the rendered output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rendered {
  Element(Element),
  /// Text, escaped on output.
  Text(String),
  /// Markup written verbatim.
  Trusted(TrustedHtml),
  /// Siblings without a wrapping element.
  Fragment(Vec<Self>),
}

impl From<Element> for Rendered {
  fn from(element: Element) -> Self {
    Self::Element(element)
  }
}

impl Rendered {
  #[must_use]
  pub fn text(value: impl Into<String>) -> Self {
    Self::Text(value.into())
  }

  /// The element, if this node is one.
  #[must_use]
  pub const fn as_element(&self) -> Option<&Element> {
    match self {
      Self::Element(element) => Some(element),
      _ => None,
    }
  }

  /// Serialize this tree to HTML.
  #[must_use]
  pub fn to_html(&self) -> String {
    let mut out = String::new();
    self.write_html(&mut out);
    out
  }

  fn write_html(&self, out: &mut String) {
    match self {
      Self::Text(text) => out.push_str(&html_escape::encode_text(text)),
      Self::Trusted(markup) => out.push_str(markup.as_str()),
      Self::Fragment(children) => {
        for child in children {
          child.write_html(out);
        }
      },
      Self::Element(element) => {
        let name = element.tag.name();
        out.push('<');
        out.push_str(name);
        if element.tag == Tag::NavLink {
          out.push_str(" data-nav=\"internal\"");
        }
        for (key, value) in element.attrs.iter() {
          out.push(' ');
          out.push_str(key);
          out.push_str("=\"");
          out.push_str(&html_escape::encode_double_quoted_attribute(value));
          out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&name) {
          return;
        }
        for child in &element.children {
          child.write_html(out);
        }
        out.push_str("</");
        out.push_str(name);
        out.push('>');
      },
    }
  }
}

impl fmt::Display for Rendered {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_html())
  }
}
