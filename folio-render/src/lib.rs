//! # folio-render
//!
//! Renders Markdown documents into an output tree with overridable
//! per-element renderers.
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_render::{DocumentRenderer, RenderOptions};
//!
//! let options = RenderOptions::builder().highlight_code(false).build();
//! let renderer = DocumentRenderer::new(options);
//! let doc = renderer
//!   .render("# API Reference\n\nSee [the guide](/guide).", None)
//!   .expect("rendering succeeds");
//!
//! assert!(doc.html().starts_with("<h1 id=\"api-reference\">"));
//! assert_eq!(doc.title.as_deref(), Some("API Reference"));
//! ```
//!
//! ## Features
//!
//! - **Heading anchors** with deterministic slugs
//! - **Link policy**: site paths, in-page anchors and external targets are
//!   rendered differently
//! - **Highlighted code** through a pluggable [`SyntaxHighlighter`] backend
//! - **Structured tables** from GFM pipe tables or ```` ```table ```` JSON
//!   blocks
//! - **Overrides**: any node type can be rendered by caller-supplied code
//!
//! ## Overrides
//!
//! ```rust
//! use folio_render::{
//!   DocumentRenderer,
//!   Element,
//!   RenderOptions,
//!   Rendered,
//!   RendererOverrides,
//! };
//!
//! let overrides = RendererOverrides::new().with("code", |props, _cx| {
//!   let key = Rendered::text(props.node.text_content());
//!   Ok(Rendered::from(Element::new("kbd").child(key)))
//! });
//!
//! let renderer =
//!   DocumentRenderer::new(RenderOptions::builder().highlight_code(false).build());
//! let doc = renderer
//!   .render("Press `x`", Some(&overrides))
//!   .expect("rendering succeeds");
//! assert_eq!(doc.html(), "<p>Press <kbd>x</kbd></p>");
//! ```
mod builtins;
mod error;
pub mod highlight;
pub mod host;
pub mod link;
pub mod node;
mod options;
pub mod output;
pub mod parse;
pub mod registry;
mod renderer;
pub mod slug;
pub mod table;
mod types;
mod utils;

pub use crate::{
  builtins::{
    ANCHOR_CLASS,
    CodeRenderer,
    HeadingRenderer,
    IMAGE_CLASS,
    ImageRenderer,
    LinkRenderer,
    TableRenderer,
  },
  error::{RenderError, RenderResult},
  highlight::{
    SyntaxConfig,
    SyntaxError,
    SyntaxHighlighter,
    SyntaxManager,
    SyntaxResult,
  },
  link::{LinkClass, classify},
  node::{MAX_NESTING_DEPTH, Node, NodeKind, NodeType},
  options::{RenderOptions, RenderOptionsBuilder},
  output::{Attributes, Element, Rendered, Tag, TrustedHtml},
  registry::{
    NodeRenderer,
    Props,
    Registry,
    RendererOrigin,
    RendererOverrides,
  },
  renderer::{DocumentRenderer, RenderContext, extract_headers},
  slug::{HeadingIds, slugify},
  table::{TableData, TableMode},
  types::{Header, RenderedDocument},
};
