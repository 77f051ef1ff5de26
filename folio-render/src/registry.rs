//! Renderer lookup by node type.
//!
//! A [`Registry`] is built for every render call from a fresh set of built-in
//! renderers with the caller's [`RendererOverrides`] merged on top. Types with
//! no entry fall through to the host defaults in [`crate::host`].
use std::{collections::HashMap, fmt, sync::Arc};

use log::debug;

use crate::{
  builtins::{
    CodeRenderer,
    HeadingRenderer,
    ImageRenderer,
    LinkRenderer,
    TableRenderer,
  },
  error::RenderResult,
  node::{Node, NodeType},
  output::Rendered,
  renderer::RenderContext,
  table::TableData,
};

/// Input handed to a renderer.
#[derive(Debug)]
pub struct Props<'a> {
  /// The node being rendered.
  pub node:     &'a Node,
  /// The node's children, already rendered.
  pub children: Vec<Rendered>,
  /// Rendered cells, for table nodes.
  pub table:    Option<TableData<Rendered>>,
}

/// Converts one node, with its rendered children, into output.
pub trait NodeRenderer: Send + Sync {
  /// # Errors
  ///
  /// Any error aborts the whole render call.
  fn render(
    &self,
    props: Props<'_>,
    cx: &RenderContext<'_>,
  ) -> RenderResult<Rendered>;
}

impl<F> NodeRenderer for F
where
  F: Fn(Props<'_>, &RenderContext<'_>) -> RenderResult<Rendered> + Send + Sync,
{
  fn render(
    &self,
    props: Props<'_>,
    cx: &RenderContext<'_>,
  ) -> RenderResult<Rendered> {
    self(props, cx)
  }
}

/// A renderer shared between override maps and registries.
pub type SharedRenderer = Arc<dyn NodeRenderer>;

/// Caller-supplied renderers, keyed by node type.
///
/// # Examples
///
/// ```
/// use folio_render::{Element, Rendered, RendererOverrides};
///
/// let overrides = RendererOverrides::new().with("code", |props, _cx| {
///   Ok(Rendered::from(Element::new("kbd").children(props.children)))
/// });
/// assert_eq!(overrides.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RendererOverrides {
  entries: HashMap<NodeType, SharedRenderer>,
}

impl RendererOverrides {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a closure renderer for `node_type`, replacing any previous entry.
  #[must_use]
  pub fn with<F>(mut self, node_type: impl Into<NodeType>, renderer: F) -> Self
  where
    F: Fn(Props<'_>, &RenderContext<'_>) -> RenderResult<Rendered>
      + Send
      + Sync
      + 'static,
  {
    self.entries.insert(node_type.into(), Arc::new(renderer));
    self
  }

  /// Add a shared renderer for `node_type`, returning the one it replaces.
  pub fn insert(
    &mut self,
    node_type: impl Into<NodeType>,
    renderer: SharedRenderer,
  ) -> Option<SharedRenderer> {
    self.entries.insert(node_type.into(), renderer)
  }

  #[must_use]
  pub fn get(&self, node_type: &NodeType) -> Option<&SharedRenderer> {
    self.entries.get(node_type)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&NodeType, &SharedRenderer)> {
    self.entries.iter()
  }
}

impl fmt::Debug for RendererOverrides {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut keys: Vec<&NodeType> = self.entries.keys().collect();
    keys.sort();
    f.debug_struct("RendererOverrides")
      .field("node_types", &keys)
      .finish()
  }
}

/// Where a registry entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererOrigin {
  Builtin,
  Override,
}

/// The effective renderer table for one render call.
pub struct Registry {
  entries: HashMap<NodeType, (SharedRenderer, RendererOrigin)>,
}

impl Registry {
  /// Built-in renderers only.
  #[must_use]
  pub fn defaults() -> Self {
    let mut entries: HashMap<NodeType, (SharedRenderer, RendererOrigin)> =
      HashMap::new();
    let mut builtin = |node_type: NodeType, renderer: SharedRenderer| {
      entries.insert(node_type, (renderer, RendererOrigin::Builtin));
    };

    for (level, node_type) in (1u8..).zip(NodeType::HEADINGS) {
      builtin(node_type, Arc::new(HeadingRenderer::new(level)));
    }
    builtin(NodeType::Image, Arc::new(ImageRenderer));
    builtin(NodeType::Link, Arc::new(LinkRenderer));
    builtin(NodeType::Code, Arc::new(CodeRenderer));
    builtin(NodeType::Table, Arc::new(TableRenderer));

    Self { entries }
  }

  /// Built-ins with `overrides` merged on top; overrides win per node type.
  #[must_use]
  pub fn build(overrides: Option<&RendererOverrides>) -> Self {
    let mut registry = Self::defaults();
    if let Some(overrides) = overrides {
      for (node_type, renderer) in overrides.iter() {
        debug!("Overriding renderer for '{node_type}'");
        registry.entries.insert(
          node_type.clone(),
          (Arc::clone(renderer), RendererOrigin::Override),
        );
      }
    }
    registry
  }

  #[must_use]
  pub fn get(&self, node_type: &NodeType) -> Option<&SharedRenderer> {
    self.entries.get(node_type).map(|(renderer, _)| renderer)
  }

  #[must_use]
  pub fn origin(&self, node_type: &NodeType) -> Option<RendererOrigin> {
    self.entries.get(node_type).map(|(_, origin)| *origin)
  }

  /// Node types with a registered renderer, sorted.
  #[must_use]
  pub fn node_types(&self) -> Vec<&NodeType> {
    let mut keys: Vec<&NodeType> = self.entries.keys().collect();
    keys.sort();
    keys
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut map = f.debug_map();
    for node_type in self.node_types() {
      map.entry(node_type, &self.origin(node_type));
    }
    map.finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::output::Element;

  fn kbd(props: Props<'_>, _cx: &RenderContext<'_>) -> RenderResult<Rendered> {
    Ok(Rendered::from(Element::new("kbd").children(props.children)))
  }

  #[test]
  fn test_defaults_cover_builtin_types() {
    let registry = Registry::defaults();
    let expected = [
      NodeType::H1,
      NodeType::H2,
      NodeType::H3,
      NodeType::H4,
      NodeType::H5,
      NodeType::H6,
      NodeType::Link,
      NodeType::Image,
      NodeType::Code,
      NodeType::Table,
    ];
    for node_type in &expected {
      assert_eq!(
        registry.origin(node_type),
        Some(RendererOrigin::Builtin),
        "{node_type}"
      );
    }
    assert_eq!(registry.node_types().len(), expected.len());
    assert!(registry.get(&NodeType::Paragraph).is_none());
  }

  #[test]
  fn test_override_replaces_only_its_key() {
    let custom: SharedRenderer = Arc::new(kbd);
    let mut overrides = RendererOverrides::new();
    overrides.insert("code", Arc::clone(&custom));

    let registry = Registry::build(Some(&overrides));
    let code = registry.get(&NodeType::Code).expect("code entry");
    assert!(Arc::ptr_eq(code, &custom));
    assert_eq!(
      registry.origin(&NodeType::Code),
      Some(RendererOrigin::Override)
    );

    for node_type in registry.node_types() {
      if *node_type != NodeType::Code {
        assert_eq!(registry.origin(node_type), Some(RendererOrigin::Builtin));
      }
    }
  }

  #[test]
  fn test_override_adds_new_keys() {
    let overrides = RendererOverrides::new().with("p", kbd).with("Callout", kbd);
    let registry = Registry::build(Some(&overrides));
    assert_eq!(
      registry.origin(&NodeType::Paragraph),
      Some(RendererOrigin::Override)
    );
    assert_eq!(
      registry.origin(&NodeType::Other("Callout".to_string())),
      Some(RendererOrigin::Override)
    );
  }

  #[test]
  fn test_each_build_is_fresh() {
    let first = Registry::build(None);
    let second = Registry::build(None);
    let a = first.get(&NodeType::Link).expect("link entry");
    let b = second.get(&NodeType::Link).expect("link entry");
    assert!(!Arc::ptr_eq(a, b));
  }

  #[test]
  fn test_overrides_are_not_mutated_by_build() {
    let overrides = RendererOverrides::new().with(NodeType::H1, kbd);
    let _registry = Registry::build(Some(&overrides));
    assert_eq!(overrides.len(), 1);
    assert!(overrides.get(&NodeType::H2).is_none());
  }
}
