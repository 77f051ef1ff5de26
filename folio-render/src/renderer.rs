//! The document renderer: parse, build the registry, walk the tree.
//!
//! Every call to [`DocumentRenderer::render`] builds its own [`Registry`] and
//! [`RenderContext`]; nothing carries over between calls, so one renderer can
//! be shared across threads rendering different documents.
use std::{collections::HashMap, sync::Arc};

use log::{debug, trace};

use crate::{
  error::{RenderError, RenderResult},
  highlight::{SyntaxManager, SyntaxResult, create_default_manager},
  host,
  node::{MAX_NESTING_DEPTH, Node, NodeKind},
  options::RenderOptions,
  output::Rendered,
  parse::parse_document,
  registry::{Props, Registry, RendererOverrides},
  slug::{SlugTracker, slugify},
  types::{Header, RenderedDocument},
};

/// State shared by the renderers of a single render call.
#[derive(Debug)]
pub struct RenderContext<'a> {
  options:     &'a RenderOptions,
  syntax:      Option<&'a SyntaxManager>,
  heading_ids: HashMap<*const Node, String>,
}

impl<'a> RenderContext<'a> {
  /// Context for rendering `tree`, with every heading ID assigned up front.
  #[must_use]
  pub fn new(
    options: &'a RenderOptions,
    syntax: Option<&'a SyntaxManager>,
    tree: &Node,
  ) -> Self {
    let heading_ids = index_headings(tree, options)
      .into_iter()
      .map(|(node, header)| (std::ptr::from_ref(node), header.id))
      .collect();
    Self {
      options,
      syntax,
      heading_ids,
    }
  }

  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    self.options
  }

  /// The syntax manager, if highlighting is available.
  #[must_use]
  pub const fn syntax(&self) -> Option<&SyntaxManager> {
    self.syntax
  }

  /// Anchor ID of `heading`, a node of the tree being rendered.
  ///
  /// This is the ID listed for it in [`RenderedDocument::headers`], whichever
  /// renderers handle the other headings. A node from outside the tree gets
  /// its plain slug.
  #[must_use]
  pub fn heading_id(&self, heading: &Node) -> String {
    self
      .heading_ids
      .get(&std::ptr::from_ref(heading))
      .cloned()
      .unwrap_or_else(|| slugify(&heading.text_content()))
  }
}

/// Renders documents to output trees.
///
/// Can be cheaply cloned since it uses `Arc` internally for the syntax manager.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
  options: RenderOptions,
  syntax:  Option<Arc<SyntaxManager>>,
}

impl DocumentRenderer {
  /// Create a renderer using the default highlighting backend.
  ///
  /// If no backend is available the renderer is still created; rendering code
  /// then fails unless `highlight_code` is off.
  #[must_use]
  pub fn new(options: RenderOptions) -> Self {
    let syntax = if options.highlight_code {
      match create_default_manager() {
        Ok(manager) => Some(manager),
        Err(e) => {
          log::warn!("Syntax highlighting unavailable: {e}");
          None
        },
      }
    } else {
      None
    };
    Self::build(options, syntax)
  }

  /// Create a renderer with a specific syntax manager.
  #[must_use]
  pub fn with_syntax_manager(
    options: RenderOptions,
    manager: SyntaxManager,
  ) -> Self {
    Self::build(options, Some(manager))
  }

  fn build(options: RenderOptions, syntax: Option<SyntaxManager>) -> Self {
    let syntax = syntax.map(|mut manager| {
      if let Some(language) = &options.default_language {
        manager.config_mut().default_language = Some(language.clone());
      }
      if let Some(theme) = &options.highlight_theme {
        manager.config_mut().default_theme = Some(theme.clone());
      }
      Arc::new(manager)
    });
    Self { options, syntax }
  }

  /// Access renderer options.
  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  #[must_use]
  pub fn syntax_manager(&self) -> Option<&SyntaxManager> {
    self.syntax.as_deref()
  }

  /// Parse `source` into a node tree with this renderer's options.
  ///
  /// # Errors
  ///
  /// Fails when the document nests deeper than [`MAX_NESTING_DEPTH`].
  pub fn parse(&self, source: &str) -> RenderResult<Node> {
    parse_document(source, &self.options)
  }

  /// Parse and render a document.
  ///
  /// # Errors
  ///
  /// Returns the first error raised by any renderer, including highlighter
  /// failures, or [`RenderError::NestingTooDeep`] for a document nested past
  /// [`MAX_NESTING_DEPTH`]. Nothing is recovered locally.
  pub fn render(
    &self,
    source: &str,
    overrides: Option<&RendererOverrides>,
  ) -> RenderResult<RenderedDocument> {
    let tree = self.parse(source)?;
    self.render_tree(&tree, overrides)
  }

  /// Render an already parsed node tree.
  ///
  /// # Errors
  ///
  /// See [`DocumentRenderer::render`].
  pub fn render_tree(
    &self,
    tree: &Node,
    overrides: Option<&RendererOverrides>,
  ) -> RenderResult<RenderedDocument> {
    if tree.depth() > MAX_NESTING_DEPTH {
      return Err(RenderError::NestingTooDeep {
        limit: MAX_NESTING_DEPTH,
      });
    }

    let registry = Registry::build(overrides);
    debug!("Rendering with registry {registry:?}");

    let cx = RenderContext::new(&self.options, self.syntax.as_deref(), tree);
    let rendered = render_node(tree, &registry, &cx)?;
    let (headers, title) = extract_headers(tree, &self.options);

    Ok(RenderedDocument {
      tree: rendered,
      headers,
      title,
    })
  }

  /// CSS for the highlight markup, using the configured theme.
  ///
  /// # Errors
  ///
  /// Fails when no backend is available or the theme is unknown.
  pub fn stylesheet(&self) -> SyntaxResult<String> {
    match self.syntax_manager() {
      Some(manager) => {
        manager.stylesheet(self.options.highlight_theme.as_deref())
      },
      None => create_default_manager()?
        .stylesheet(self.options.highlight_theme.as_deref()),
    }
  }
}

/// Render `node` after its children, dispatching on its type.
fn render_node(
  node: &Node,
  registry: &Registry,
  cx: &RenderContext<'_>,
) -> RenderResult<Rendered> {
  let children = node
    .children
    .iter()
    .map(|child| render_node(child, registry, cx))
    .collect::<RenderResult<Vec<_>>>()?;

  let table = match &node.kind {
    NodeKind::Table(data) => {
      Some(data.try_map_ref(|cell| render_node(cell, registry, cx))?)
    },
    _ => None,
  };

  let props = Props {
    node,
    children,
    table,
  };

  let node_type = node.node_type();
  match registry.get(&node_type) {
    Some(renderer) => {
      trace!("Dispatching '{node_type}' to registry");
      renderer.render(props, cx)
    },
    None => Ok(host::render_default(props)),
  }
}

/// Collect headings and the document title from a node tree.
///
/// Headings are listed in [`Node::descendants`] order, table cells included,
/// with the same IDs [`RenderContext::heading_id`] hands to the renderers.
#[must_use]
pub fn extract_headers(
  tree: &Node,
  options: &RenderOptions,
) -> (Vec<Header>, Option<String>) {
  let headers: Vec<Header> = index_headings(tree, options)
    .into_iter()
    .map(|(_, header)| header)
    .collect();
  let title = headers
    .iter()
    .find(|header| header.level == 1)
    .map(|header| header.text.clone());
  (headers, title)
}

/// Every heading of `tree` paired with its header entry.
fn index_headings<'t>(
  tree: &'t Node,
  options: &RenderOptions,
) -> Vec<(&'t Node, Header)> {
  let mut slugs = SlugTracker::new(options.heading_ids);
  tree
    .descendants()
    .filter_map(|node| {
      let NodeKind::Heading { level } = node.kind else {
        return None;
      };
      let text = node.text_content();
      let id = slugs.assign(&text);
      Some((node, Header {
        text: text.trim().to_string(),
        level,
        id,
      }))
    })
    .collect()
}
