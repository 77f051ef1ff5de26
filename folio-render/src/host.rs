//! Host default rendering for node types without a registered renderer.
//!
//! This is the plain HTML mapping a presentation layer applies to a tag it has
//! no component for. Raw markup from the source is escaped like any text.
use crate::{
  node::NodeKind,
  output::{Element, Rendered},
  registry::Props,
  table::materialize,
};

/// Render `props` with the plain element for its node kind.
#[must_use]
pub fn render_default(props: Props<'_>) -> Rendered {
  let Props {
    node,
    children,
    table,
  } = props;

  match &node.kind {
    NodeKind::Document | NodeKind::TableCell | NodeKind::Other { .. } => {
      Rendered::Fragment(children)
    },
    NodeKind::Paragraph => wrap("p", children),
    NodeKind::Heading { level } => wrap(&format!("h{level}"), children),
    NodeKind::Text(value) => Rendered::text(value.clone()),
    NodeKind::Emphasis => wrap("em", children),
    NodeKind::Strong => wrap("strong", children),
    NodeKind::Strikethrough => wrap("del", children),
    NodeKind::Link { href, title, attrs } => {
      let mut link = Element::new("a");
      if let Some(href) = href {
        link.attrs.set("href", href);
      }
      if let Some(title) = title {
        link.attrs.set("title", title);
      }
      link.attrs(attrs).children(children).into()
    },
    NodeKind::Image {
      src,
      alt,
      title,
      attrs,
    } => {
      let mut image = Element::new("img").attr("src", src).attr("alt", alt);
      if let Some(title) = title {
        image.attrs.set("title", title);
      }
      image.attrs(attrs).into()
    },
    NodeKind::Code { literal, attrs, .. } => {
      Element::new("code")
        .attrs(attrs)
        .child(Rendered::text(literal.clone()))
        .into()
    },
    NodeKind::Pre => wrap("pre", children),
    NodeKind::Table(_) => {
      table.map_or_else(
        || Rendered::Fragment(Vec::new()),
        |table| materialize(table).into(),
      )
    },
    NodeKind::BlockQuote => wrap("blockquote", children),
    NodeKind::List { ordered: true, start } => {
      let mut list = Element::new("ol");
      if let Some(start) = start.filter(|start| *start != 1) {
        list.attrs.set("start", start.to_string());
      }
      list.children(children).into()
    },
    NodeKind::List { ordered: false, .. } => wrap("ul", children),
    NodeKind::ListItem => wrap("li", children),
    NodeKind::ThematicBreak => Element::new("hr").into(),
    NodeKind::SoftBreak => Rendered::text("\n"),
    NodeKind::LineBreak => Element::new("br").into(),
    NodeKind::Html(markup) => Rendered::text(markup.clone()),
  }
}

fn wrap(name: &str, children: Vec<Rendered>) -> Rendered {
  Element::new(name).children(children).into()
}
