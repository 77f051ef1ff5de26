//! The default renderers: headings, images, links, code and tables.
use log::trace;

use crate::{
  error::{RenderError, RenderResult},
  highlight::{self, SyntaxError},
  host,
  link::link_element,
  node::NodeKind,
  output::{Element, Rendered},
  registry::{NodeRenderer, Props},
  renderer::RenderContext,
  table::{check_shape, materialize},
};

/// Class of the empty anchor placed at the start of every heading.
pub const ANCHOR_CLASS: &str = "anchor";

/// Class given to every image.
pub const IMAGE_CLASS: &str = "rounded-lg";

/// `<hN id="slug"><a class="anchor" href="#slug"></a>…</hN>`
#[derive(Debug, Clone, Copy)]
pub struct HeadingRenderer {
  level: u8,
}

impl HeadingRenderer {
  #[must_use]
  pub const fn new(level: u8) -> Self {
    Self { level }
  }
}

impl NodeRenderer for HeadingRenderer {
  fn render(
    &self,
    props: Props<'_>,
    cx: &RenderContext<'_>,
  ) -> RenderResult<Rendered> {
    let slug = cx.heading_id(props.node);
    let anchor = Element::new("a")
      .attr("href", format!("#{slug}"))
      .attr("class", ANCHOR_CLASS);

    Ok(
      Element::new(format!("h{}", self.level))
        .attr("id", slug)
        .child(anchor)
        .children(props.children)
        .into(),
    )
  }
}

/// `<img class="rounded-lg" src alt>`, author attributes applied last.
#[derive(Debug, Clone, Copy)]
pub struct ImageRenderer;

impl NodeRenderer for ImageRenderer {
  fn render(
    &self,
    props: Props<'_>,
    _cx: &RenderContext<'_>,
  ) -> RenderResult<Rendered> {
    let NodeKind::Image {
      src,
      alt,
      title,
      attrs,
    } = &props.node.kind
    else {
      return Ok(host::render_default(props));
    };

    let mut image = Element::new("img")
      .attr("class", IMAGE_CLASS)
      .attr("src", src)
      .attr("alt", alt);
    if let Some(title) = title {
      image.attrs.set("title", title);
    }
    Ok(image.attrs(attrs).into())
  }
}

/// Links, dispatched through [`crate::link::classify`].
#[derive(Debug, Clone, Copy)]
pub struct LinkRenderer;

impl NodeRenderer for LinkRenderer {
  fn render(
    &self,
    props: Props<'_>,
    _cx: &RenderContext<'_>,
  ) -> RenderResult<Rendered> {
    let NodeKind::Link { href, title, attrs } = &props.node.kind else {
      return Ok(host::render_default(props));
    };

    let mut element = link_element(href.as_deref(), attrs, props.children);
    if let Some(title) = title {
      element.attrs.set_default("title", title);
    }
    Ok(element.into())
  }
}

/// `<code>` whose content is the highlighter's markup.
///
/// With highlighting turned off the raw text is emitted as escaped text.
#[derive(Debug, Clone, Copy)]
pub struct CodeRenderer;

impl NodeRenderer for CodeRenderer {
  fn render(
    &self,
    props: Props<'_>,
    cx: &RenderContext<'_>,
  ) -> RenderResult<Rendered> {
    let NodeKind::Code {
      literal,
      language,
      attrs,
    } = &props.node.kind
    else {
      return Ok(host::render_default(props));
    };

    let content = if cx.options().highlight_code {
      let manager = cx
        .syntax()
        .ok_or(RenderError::Highlight(SyntaxError::NoBackendAvailable))?;
      Rendered::Trusted(highlight::highlight(
        manager,
        literal,
        language.as_deref(),
      )?)
    } else {
      Rendered::text(literal.clone())
    };

    Ok(Element::new("code").attrs(attrs).child(content).into())
  }
}

/// Tables, built by [`crate::table::materialize`].
#[derive(Debug, Clone, Copy)]
pub struct TableRenderer;

impl NodeRenderer for TableRenderer {
  fn render(
    &self,
    mut props: Props<'_>,
    cx: &RenderContext<'_>,
  ) -> RenderResult<Rendered> {
    let Some(table) = props.table.take() else {
      trace!("Table node without table data, using host default");
      return Ok(host::render_default(props));
    };
    check_shape(&table, cx.options().table_mode)?;
    Ok(materialize(table).into())
  }
}
