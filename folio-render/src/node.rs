//! The typed document tree produced by the parser adapter.
//!
//! Nodes are immutable once built. Every node carries a [`NodeKind`] payload
//! and an ordered list of children; the payload-free [`NodeType`] derived from
//! it is the key renderers are registered under.
use std::fmt;

use crate::{output::Attributes, table::TableData};

/// Deepest nesting a document may reach, counting the root as level 0.
///
/// Parsing and rendering both fail with
/// [`RenderError::NestingTooDeep`](crate::RenderError::NestingTooDeep) past
/// this depth, so recursion over a tree stays within a thread's stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// One element of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
  pub kind:     NodeKind,
  pub children: Vec<Self>,
}

/// Semantic kind of a node, with the attributes specific to that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
  Document,
  Paragraph,
  Heading {
    level: u8,
  },
  Text(String),
  Emphasis,
  Strong,
  Strikethrough,
  Link {
    href:  Option<String>,
    title: Option<String>,
    attrs: Attributes,
  },
  Image {
    src:   String,
    alt:   String,
    title: Option<String>,
    attrs: Attributes,
  },
  /// A code span, or the inner element of a code block.
  Code {
    literal:  String,
    language: Option<String>,
    attrs:    Attributes,
  },
  /// Wrapper around the `Code` node of a fenced or indented block.
  Pre,
  Table(TableData<Node>),
  /// A table cell; its children are the cell's inline content.
  TableCell,
  BlockQuote,
  List {
    ordered: bool,
    start:   Option<usize>,
  },
  ListItem,
  ThematicBreak,
  SoftBreak,
  LineBreak,
  /// Raw markup written by the author. Rendered as escaped text.
  Html(String),
  /// Any parser node without a dedicated variant.
  Other {
    tag: String,
  },
}

/// Key identifying which renderer handles a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
  Document,
  Paragraph,
  H1,
  H2,
  H3,
  H4,
  H5,
  H6,
  Text,
  Emphasis,
  Strong,
  Strikethrough,
  Link,
  Image,
  Code,
  Pre,
  Table,
  TableCell,
  BlockQuote,
  OrderedList,
  UnorderedList,
  ListItem,
  ThematicBreak,
  SoftBreak,
  LineBreak,
  Html,
  Other(String),
}

impl NodeType {
  /// All six heading keys, in level order.
  pub const HEADINGS: [Self; 6] =
    [Self::H1, Self::H2, Self::H3, Self::H4, Self::H5, Self::H6];

  /// Heading key for a level in `1..=6`.
  #[must_use]
  pub const fn heading(level: u8) -> Option<Self> {
    match level {
      1 => Some(Self::H1),
      2 => Some(Self::H2),
      3 => Some(Self::H3),
      4 => Some(Self::H4),
      5 => Some(Self::H5),
      6 => Some(Self::H6),
      _ => None,
    }
  }

  /// Host tag name for this node type.
  #[must_use]
  pub fn as_str(&self) -> &str {
    match self {
      Self::Document => "root",
      Self::Paragraph => "p",
      Self::H1 => "h1",
      Self::H2 => "h2",
      Self::H3 => "h3",
      Self::H4 => "h4",
      Self::H5 => "h5",
      Self::H6 => "h6",
      Self::Text => "text",
      Self::Emphasis => "em",
      Self::Strong => "strong",
      Self::Strikethrough => "del",
      Self::Link => "a",
      Self::Image => "img",
      Self::Code => "code",
      Self::Pre => "pre",
      Self::Table => "Table",
      Self::TableCell => "td",
      Self::BlockQuote => "blockquote",
      Self::OrderedList => "ol",
      Self::UnorderedList => "ul",
      Self::ListItem => "li",
      Self::ThematicBreak => "hr",
      Self::SoftBreak => "softbreak",
      Self::LineBreak => "br",
      Self::Html => "html",
      Self::Other(tag) => tag,
    }
  }
}

impl From<&str> for NodeType {
  /// Resolve a tag name, accepting both element names and component names
  /// (`img`/`Image`, `table`/`Table`, `a`/`link`).
  fn from(tag: &str) -> Self {
    match tag {
      "root" | "document" => Self::Document,
      "p" | "paragraph" => Self::Paragraph,
      "h1" => Self::H1,
      "h2" => Self::H2,
      "h3" => Self::H3,
      "h4" => Self::H4,
      "h5" => Self::H5,
      "h6" => Self::H6,
      "text" => Self::Text,
      "em" | "emphasis" => Self::Emphasis,
      "strong" => Self::Strong,
      "del" | "strikethrough" => Self::Strikethrough,
      "a" | "link" => Self::Link,
      "img" | "image" | "Image" => Self::Image,
      "code" => Self::Code,
      "pre" => Self::Pre,
      "table" | "Table" => Self::Table,
      "td" | "th" => Self::TableCell,
      "blockquote" => Self::BlockQuote,
      "ol" => Self::OrderedList,
      "ul" => Self::UnorderedList,
      "li" => Self::ListItem,
      "hr" => Self::ThematicBreak,
      "softbreak" => Self::SoftBreak,
      "br" => Self::LineBreak,
      "html" => Self::Html,
      other => Self::Other(other.to_string()),
    }
  }
}

impl fmt::Display for NodeType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Node {
  /// Create a node without children.
  #[must_use]
  pub const fn new(kind: NodeKind) -> Self {
    Self {
      kind,
      children: Vec::new(),
    }
  }

  /// Create a node with the given children.
  #[must_use]
  pub const fn with_children(kind: NodeKind, children: Vec<Self>) -> Self {
    Self { kind, children }
  }

  /// A text leaf.
  #[must_use]
  pub fn text(value: impl Into<String>) -> Self {
    Self::new(NodeKind::Text(value.into()))
  }

  /// A heading whose only child is `text`.
  #[must_use]
  pub fn heading(level: u8, text: impl Into<String>) -> Self {
    Self::with_children(NodeKind::Heading { level }, vec![Self::text(text)])
  }

  /// A link with no extra attributes.
  #[must_use]
  pub fn link(href: Option<&str>, children: Vec<Self>) -> Self {
    Self::with_children(
      NodeKind::Link {
        href:  href.map(str::to_string),
        title: None,
        attrs: Attributes::new(),
      },
      children,
    )
  }

  /// A code span without a language.
  #[must_use]
  pub fn code(literal: impl Into<String>) -> Self {
    Self::new(NodeKind::Code {
      literal:  literal.into(),
      language: None,
      attrs:    Attributes::new(),
    })
  }

  /// Registry key for this node.
  #[must_use]
  pub fn node_type(&self) -> NodeType {
    match &self.kind {
      NodeKind::Document => NodeType::Document,
      NodeKind::Paragraph => NodeType::Paragraph,
      NodeKind::Heading { level } => {
        NodeType::heading(*level)
          .unwrap_or_else(|| NodeType::Other(format!("h{level}")))
      },
      NodeKind::Text(_) => NodeType::Text,
      NodeKind::Emphasis => NodeType::Emphasis,
      NodeKind::Strong => NodeType::Strong,
      NodeKind::Strikethrough => NodeType::Strikethrough,
      NodeKind::Link { .. } => NodeType::Link,
      NodeKind::Image { .. } => NodeType::Image,
      NodeKind::Code { .. } => NodeType::Code,
      NodeKind::Pre => NodeType::Pre,
      NodeKind::Table(_) => NodeType::Table,
      NodeKind::TableCell => NodeType::TableCell,
      NodeKind::BlockQuote => NodeType::BlockQuote,
      NodeKind::List { ordered: true, .. } => NodeType::OrderedList,
      NodeKind::List { ordered: false, .. } => NodeType::UnorderedList,
      NodeKind::ListItem => NodeType::ListItem,
      NodeKind::ThematicBreak => NodeType::ThematicBreak,
      NodeKind::SoftBreak => NodeType::SoftBreak,
      NodeKind::LineBreak => NodeType::LineBreak,
      NodeKind::Html(_) => NodeType::Html,
      NodeKind::Other { tag } => NodeType::Other(tag.clone()),
    }
  }

  /// Plain text of this node and its descendants, without markup.
  ///
  /// Images and raw markup contribute nothing, breaks become a single space.
  #[must_use]
  pub fn text_content(&self) -> String {
    let mut text = String::new();
    self.collect_text(&mut text);
    text
  }

  fn collect_text(&self, out: &mut String) {
    match &self.kind {
      NodeKind::Text(value) => out.push_str(value),
      NodeKind::Code { literal, .. } => out.push_str(literal),
      NodeKind::SoftBreak | NodeKind::LineBreak => out.push(' '),
      NodeKind::Image { .. } | NodeKind::Html(_) => return,
      _ => {},
    }
    for child in &self.children {
      child.collect_text(out);
    }
  }

  /// Pre-order iterator over this node and all of its descendants.
  ///
  /// The cells of a table are visited after its children, headers first.
  pub fn descendants(&self) -> impl Iterator<Item = &Self> {
    let mut stack = vec![self];
    std::iter::from_fn(move || {
      let node = stack.pop()?;
      stack.extend(node.nested().rev());
      Some(node)
    })
  }

  /// Levels below this node. A leaf has depth 0; table cells sit one level
  /// below their table.
  #[must_use]
  pub fn depth(&self) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(self, 0)];
    while let Some((node, depth)) = stack.pop() {
      deepest = deepest.max(depth);
      stack.extend(node.nested().map(|child| (child, depth + 1)));
    }
    deepest
  }

  /// Children, then table cells.
  fn nested(&self) -> impl DoubleEndedIterator<Item = &Self> {
    let cells = match &self.kind {
      NodeKind::Table(data) => {
        Some(data.headers.iter().chain(data.rows.iter().flatten()))
      },
      _ => None,
    };
    self.children.iter().chain(cells.into_iter().flatten())
  }
}
