//! Builds the document tree from Markdown source with comrak.
use comrak::{
  Arena,
  nodes::{AstNode, ListType, NodeValue},
  options::Options,
  parse_document as comrak_parse,
};
use log::{trace, warn};
use serde_json::Value;

use crate::{
  error::{RenderError, RenderResult},
  node::{MAX_NESTING_DEPTH, Node, NodeKind},
  options::RenderOptions,
  output::Attributes,
  table::TableData,
};

/// Info string that marks a fenced block as a JSON table.
pub const TABLE_BLOCK_INFO: &str = "table";

/// Parse `source` into a [`Node`] tree.
///
/// Anything comrak accepts produces a tree, as long as it nests no deeper than
/// [`MAX_NESTING_DEPTH`].
///
/// # Errors
///
/// Returns [`RenderError::NestingTooDeep`] for a document nested past the
/// limit, such as a few hundred `>` markers in a row.
pub fn parse_document(
  source: &str,
  options: &RenderOptions,
) -> RenderResult<Node> {
  let parser = Parser::new(options);
  let arena = Arena::new();
  let root = comrak_parse(&arena, source, &parser.comrak);
  Ok(
    parser
      .convert(root, 0)?
      .unwrap_or_else(|| Node::new(NodeKind::Document)),
  )
}

struct Parser<'o> {
  options: &'o RenderOptions,
  comrak:  Options<'static>,
}

impl<'o> Parser<'o> {
  fn new(options: &'o RenderOptions) -> Self {
    let mut comrak = Options::default();
    if options.gfm {
      comrak.extension.table = true;
      comrak.extension.strikethrough = true;
      comrak.extension.tasklist = true;
      comrak.extension.autolink = true;
    }
    comrak.extension.front_matter_delimiter = Some("---".to_string());
    Self { options, comrak }
  }

  /// Converted children of `node`, which sits at `depth`.
  fn children<'a>(
    &self,
    node: &'a AstNode<'a>,
    depth: usize,
  ) -> RenderResult<Vec<Node>> {
    node
      .children()
      .filter_map(|child| self.convert(child, depth + 1).transpose())
      .collect()
  }

  /// Map one comrak node at `depth` and its subtree. `None` drops the node.
  fn convert<'a>(
    &self,
    node: &'a AstNode<'a>,
    depth: usize,
  ) -> RenderResult<Option<Node>> {
    if depth > MAX_NESTING_DEPTH {
      return Err(RenderError::NestingTooDeep {
        limit: MAX_NESTING_DEPTH,
      });
    }

    let kind = match &node.data.borrow().value {
      NodeValue::FrontMatter(_) => return Ok(None),
      NodeValue::Document => NodeKind::Document,
      NodeValue::Paragraph => NodeKind::Paragraph,
      NodeValue::Heading(heading) => {
        NodeKind::Heading {
          level: heading.level,
        }
      },
      NodeValue::Text(text) => return Ok(Some(Node::text(text.to_string()))),
      NodeValue::Emph => NodeKind::Emphasis,
      NodeValue::Strong => NodeKind::Strong,
      NodeValue::Strikethrough => NodeKind::Strikethrough,
      NodeValue::Link(link) => {
        NodeKind::Link {
          href:  non_empty(&link.url),
          title: non_empty(&link.title),
          attrs: Attributes::new(),
        }
      },
      NodeValue::Image(link) => {
        let alt = Node::with_children(
          NodeKind::Paragraph,
          self.children(node, depth)?,
        )
        .text_content();
        return Ok(Some(Node::new(NodeKind::Image {
          src: link.url.to_string(),
          alt,
          title: non_empty(&link.title),
          attrs: Attributes::new(),
        })));
      },
      NodeValue::Code(code) => {
        return Ok(Some(Node::new(NodeKind::Code {
          literal:  code.literal.to_string(),
          language: None,
          attrs:    Attributes::new(),
        })));
      },
      NodeValue::CodeBlock(block) => {
        return self
          .code_block(&block.info, &block.literal, depth)
          .map(Some);
      },
      NodeValue::HtmlBlock(block) => {
        return Ok(Some(Node::new(NodeKind::Html(block.literal.to_string()))));
      },
      NodeValue::HtmlInline(markup) => {
        return Ok(Some(Node::new(NodeKind::Html(markup.to_string()))));
      },
      NodeValue::Table(..) => return self.table(node, depth).map(Some),
      NodeValue::BlockQuote => NodeKind::BlockQuote,
      NodeValue::List(list) => {
        let ordered = list.list_type == ListType::Ordered;
        NodeKind::List {
          ordered,
          start: ordered.then_some(list.start),
        }
      },
      NodeValue::Item(_) | NodeValue::TaskItem(..) => NodeKind::ListItem,
      NodeValue::ThematicBreak => NodeKind::ThematicBreak,
      NodeValue::SoftBreak => NodeKind::SoftBreak,
      NodeValue::LineBreak => NodeKind::LineBreak,
      other => {
        trace!("Keeping '{}' as a generic node", other.xml_node_name());
        NodeKind::Other {
          tag: other.xml_node_name().to_string(),
        }
      },
    };

    Ok(Some(Node::with_children(kind, self.children(node, depth)?)))
  }

  /// `<pre><code>` for a fenced or indented block, or a table for a
  /// ```` ```table ```` block holding valid JSON.
  fn code_block(
    &self,
    info: &str,
    literal: &str,
    depth: usize,
  ) -> RenderResult<Node> {
    let language = info.split_whitespace().next().map(str::to_string);

    if self.options.structured_tables
      && language.as_deref() == Some(TABLE_BLOCK_INFO)
    {
      match serde_json::from_str::<TableData<Value>>(literal) {
        Ok(data) => {
          let cells = data
            .try_map_ref(|value| self.inline_cell(&cell_text(value), depth))?;
          return Ok(Node::new(NodeKind::Table(cells)));
        },
        Err(e) => {
          warn!("Malformed table block, rendering it as code: {e}");
        },
      }
    }

    let mut attrs = Attributes::new();
    if let Some(language) = &language {
      attrs.set("class", format!("language-{language}"));
    }
    let code = Node::new(NodeKind::Code {
      literal: literal.to_string(),
      language,
      attrs,
    });
    Ok(Node::with_children(NodeKind::Pre, vec![code]))
  }

  /// Normalize a GFM table at `depth` into header and body cells.
  fn table<'a>(
    &self,
    node: &'a AstNode<'a>,
    depth: usize,
  ) -> RenderResult<Node> {
    let mut data = TableData::default();
    for row in node.children() {
      let is_header = match &row.data.borrow().value {
        NodeValue::TableRow(header) => *header,
        _ => continue,
      };
      let cells = row
        .children()
        .map(|cell| -> RenderResult<Node> {
          Ok(Node::with_children(
            NodeKind::TableCell,
            self.children(cell, depth + 1)?,
          ))
        })
        .collect::<RenderResult<Vec<Node>>>()?;
      if is_header && data.headers.is_empty() {
        data.headers = cells;
      } else {
        data.rows.push(cells);
      }
    }
    Ok(Node::new(NodeKind::Table(data)))
  }

  /// A table cell from a string of inline Markdown, for a table at `depth`.
  fn inline_cell(&self, text: &str, depth: usize) -> RenderResult<Node> {
    let cell_depth = depth + 1;
    let arena = Arena::new();
    let root = comrak_parse(&arena, text, &self.comrak);
    let mut children = Vec::new();
    for block in root.children() {
      if matches!(block.data.borrow().value, NodeValue::Paragraph) {
        children.extend(self.children(block, cell_depth)?);
      } else if let Some(node) = self.convert(block, cell_depth + 1)? {
        children.push(node);
      }
    }
    Ok(Node::with_children(NodeKind::TableCell, children))
  }
}

fn non_empty(value: &str) -> Option<String> {
  (!value.is_empty()).then(|| value.to_string())
}

fn cell_text(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    Value::Null => String::new(),
    other => other.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::node::NodeType;

  fn parse(source: &str) -> Node {
    parse_document(source, &RenderOptions::default()).expect("parses")
  }

  fn first(tree: &Node, node_type: &NodeType) -> Option<Node> {
    tree
      .descendants()
      .find(|node| node.node_type() == *node_type)
      .cloned()
  }

  #[test]
  fn test_heading_and_inline_markup() {
    let tree = parse("## Hello *world*\n");
    let heading = first(&tree, &NodeType::H2).expect("heading");
    assert_eq!(heading.text_content(), "Hello world");
    assert!(first(&heading, &NodeType::Emphasis).is_some());
  }

  #[test]
  fn test_fenced_code_block_language() {
    let tree = parse("```rust title\nfn main() {}\n```\n");
    let pre = first(&tree, &NodeType::Pre).expect("pre");
    let NodeKind::Code {
      literal,
      language,
      attrs,
    } = &pre.children[0].kind
    else {
      panic!("expected code inside pre");
    };
    assert_eq!(literal, "fn main() {}\n");
    assert_eq!(language.as_deref(), Some("rust"));
    assert_eq!(attrs.get("class"), Some("language-rust"));
  }

  #[test]
  fn test_links_and_images() {
    let tree = parse("[a](/docs \"Docs\") ![alt *text*](/a.png)\n");
    let link = first(&tree, &NodeType::Link).expect("link");
    assert!(matches!(
      &link.kind,
      NodeKind::Link { href: Some(href), title: Some(title), .. }
        if href == "/docs" && title == "Docs"
    ));
    let image = first(&tree, &NodeType::Image).expect("image");
    assert!(matches!(
      &image.kind,
      NodeKind::Image { src, alt, .. } if src == "/a.png" && alt == "alt text"
    ));
  }

  #[test]
  fn test_empty_link_has_no_href() {
    let tree = parse("[nothing]()\n");
    let link = first(&tree, &NodeType::Link).expect("link");
    assert!(matches!(link.kind, NodeKind::Link { href: None, .. }));
  }

  #[test]
  fn test_structured_table_block() {
    let tree = parse(
      "```table\n{\"headers\": [\"Name\", \"Age\"], \"rows\": [[\"**Ann**\", \
       42]]}\n```\n",
    );
    let table = first(&tree, &NodeType::Table).expect("table");
    let NodeKind::Table(data) = &table.kind else {
      panic!("expected table data");
    };
    assert_eq!(data.headers.len(), 2);
    assert_eq!(data.rows[0][1].text_content(), "42");
    assert!(first(&data.rows[0][0], &NodeType::Strong).is_some());
  }

  #[test]
  fn test_malformed_table_block_stays_code() {
    let tree = parse("```table\n{not json\n```\n");
    assert!(first(&tree, &NodeType::Table).is_none());
    assert!(first(&tree, &NodeType::Code).is_some());
  }

  #[test]
  fn test_structured_tables_can_be_disabled() {
    let options = RenderOptions::builder().structured_tables(false).build();
    let tree =
      parse_document("```table\n{\"headers\": [\"a\"]}\n```\n", &options)
        .expect("parses");
    assert!(first(&tree, &NodeType::Table).is_none());
  }

  #[test]
  fn test_gfm_table_is_normalized() {
    let tree = parse("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n");
    let table = first(&tree, &NodeType::Table).expect("table");
    let NodeKind::Table(data) = &table.kind else {
      panic!("expected table data");
    };
    assert_eq!(data.headers.len(), 2);
    assert_eq!(data.rows.len(), 2);
    assert_eq!(data.rows[1][0].text_content(), "3");
  }

  #[test]
  fn test_front_matter_is_dropped() {
    let tree = parse("---\ntitle: x\n---\n\n# Body\n");
    assert!(!tree.text_content().contains("title"));
    assert!(first(&tree, &NodeType::H1).is_some());
  }

  #[test]
  fn test_ordered_list_start() {
    let tree = parse("3. three\n4. four\n");
    let list = first(&tree, &NodeType::OrderedList).expect("list");
    assert!(matches!(list.kind, NodeKind::List {
      ordered: true,
      start:   Some(3),
    }));
    assert_eq!(list.children.len(), 2);
  }

  #[test]
  fn test_raw_html_is_kept_as_html_node() {
    let tree = parse("<div>hi</div>\n");
    assert!(
      tree
        .descendants()
        .any(|node| matches!(&node.kind, NodeKind::Html(markup) if markup.contains("<div>")))
    );
  }

  #[test]
  fn test_nested_blockquotes_within_limit() {
    let tree = parse(&format!("{}x\n", ">".repeat(100)));
    assert_eq!(
      tree
        .descendants()
        .filter(|node| node.kind == NodeKind::BlockQuote)
        .count(),
      100
    );
    assert!(tree.depth() <= MAX_NESTING_DEPTH);
  }

  #[test]
  fn test_deeply_nested_blockquotes_are_rejected() {
    let source = format!("{}x", ">".repeat(5_000));
    let err = parse_document(&source, &RenderOptions::default())
      .expect_err("nesting past the limit");
    assert!(matches!(err, RenderError::NestingTooDeep {
      limit: MAX_NESTING_DEPTH,
    }));
  }

  #[test]
  fn test_deep_nesting_inside_table_cell_is_rejected() {
    let cell = ">".repeat(MAX_NESTING_DEPTH + 10);
    let source =
      format!("```table\n{{\"headers\": [\"{cell} x\"], \"rows\": []}}\n```\n");
    assert!(matches!(
      parse_document(&source, &RenderOptions::default()),
      Err(RenderError::NestingTooDeep { .. })
    ));
  }
}
