#![allow(clippy::expect_used, reason = "Fine in tests")]
use folio_render::{
  DocumentRenderer,
  Element,
  HeadingIds,
  MAX_NESTING_DEPTH,
  NodeType,
  Props,
  RenderContext,
  RenderError,
  RenderOptions,
  Rendered,
  RendererOverrides,
  SyntaxError,
  SyntaxHighlighter,
  SyntaxManager,
  SyntaxResult,
  TableMode,
};

/// Wraps the whole snippet in one span; fails on code containing `boom`.
struct StubHighlighter;

impl SyntaxHighlighter for StubHighlighter {
  fn name(&self) -> &'static str {
    "Stub"
  }

  fn supported_languages(&self) -> Vec<String> {
    vec!["javascript".to_string(), "rust".to_string()]
  }

  fn available_themes(&self) -> Vec<String> {
    vec!["stub".to_string()]
  }

  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String> {
    if code.contains("boom") {
      return Err(SyntaxError::Tokenizer {
        language: language.to_string(),
        message:  "unexpected token".to_string(),
      });
    }
    Ok(format!(
      "<span class=\"tok-{language}\">{}</span>",
      html_escape::encode_text(code)
    ))
  }

  fn stylesheet(&self, _theme: &str) -> SyntaxResult<String> {
    Ok(".tok-rust { color: orange }".to_string())
  }

  fn language_from_extension(&self, _extension: &str) -> Option<String> {
    None
  }
}

fn stubbed(options: RenderOptions) -> DocumentRenderer {
  DocumentRenderer::with_syntax_manager(
    options,
    SyntaxManager::with_highlighter(Box::new(StubHighlighter)),
  )
}

fn highlighted() -> DocumentRenderer {
  stubbed(RenderOptions::builder().highlight_code(true).build())
}

fn render(renderer: &DocumentRenderer, source: &str) -> String {
  renderer
    .render(source, None)
    .expect("rendering succeeds")
    .html()
}

#[test]
fn renders_heading_with_anchor() {
  let html = render(&highlighted(), "## API Reference\n");
  assert_eq!(
    html,
    "<h2 id=\"api-reference\"><a href=\"#api-reference\" \
     class=\"anchor\"></a>API Reference</h2>"
  );
}

#[test]
fn heading_with_inline_markup_uses_flat_text() {
  let html = render(&highlighted(), "# Hello *World* & Friends\n");
  assert!(html.starts_with("<h1 id=\"hello-world-and-friends\">"));
  assert!(html.contains("<em>World</em>"));
}

#[test]
fn duplicate_headings_keep_identical_ids_by_default() {
  let doc = highlighted()
    .render("## Setup\n\n## Setup\n", None)
    .expect("rendering succeeds");
  assert_eq!(doc.headers[0].id, "setup");
  assert_eq!(doc.headers[1].id, "setup");
}

#[test]
fn duplicate_headings_suffixed_when_configured() {
  let renderer = stubbed(
    RenderOptions::builder()
      .highlight_code(true)
      .heading_ids(HeadingIds::Suffixed)
      .build(),
  );
  let html = render(&renderer, "## Setup\n\n## Setup\n");
  assert!(html.contains("<h2 id=\"setup\">"));
  assert!(html.contains("<h2 id=\"setup-1\">"));
}

#[test]
fn links_follow_target_policy() {
  let html = render(
    &highlighted(),
    "[docs](/docs/intro) [top](#top) [ext](https://example.com)\n",
  );
  assert!(html.contains("<a data-nav=\"internal\" href=\"/docs/intro\">docs</a>"));
  assert!(html.contains("<a href=\"#top\">top</a>"));
  assert!(html.contains(
    "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener \
     noreferrer\">ext</a>"
  ));
}

#[test]
fn images_get_rounded_class() {
  let html = render(&highlighted(), "![A cat](/cat.png)\n");
  assert_eq!(
    html,
    "<p><img class=\"rounded-lg\" src=\"/cat.png\" alt=\"A cat\"></p>"
  );
}

#[test]
fn code_is_injected_as_highlighted_markup() {
  let html = render(&highlighted(), "```rust\nlet x = 1 < 2;\n```\n");
  assert_eq!(
    html,
    "<pre><code class=\"language-rust\"><span class=\"tok-rust\">let x = 1 \
     &lt; 2;\n</span></code></pre>"
  );
}

#[test]
fn inline_code_uses_default_language() {
  let html = render(&highlighted(), "Run `npm i`\n");
  assert_eq!(
    html,
    "<p>Run <code><span class=\"tok-javascript\">npm i</span></code></p>"
  );
}

#[test]
fn highlighter_failure_fails_the_render() {
  let err = highlighted()
    .render("Intro\n\n```js\nboom\n```\n", None)
    .expect_err("tokenizer failure propagates");
  assert!(matches!(
    err,
    RenderError::Highlight(SyntaxError::Tokenizer { .. })
  ));
}

#[test]
fn raw_html_is_escaped() {
  let html = render(&highlighted(), "<script>alert(1)</script>\n");
  assert!(!html.contains("<script>"));
  assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn structured_table_renders_inline_markdown() {
  let source = "```table\n{\"headers\": [\"Name\", \"Notes\"], \"rows\": \
                [[\"`ls`\", \"*list*\"]]}\n```\n";
  let html = render(&highlighted(), source);
  assert_eq!(
    html,
    "<table><thead><tr><th>Name</th><th>Notes</th></tr></thead><tbody><tr><td><code><span \
     class=\"tok-javascript\">ls</span></code></td><td><em>list</em></td></tr></tbody></table>"
  );
}

#[test]
fn gfm_table_uses_same_materializer() {
  let html = render(&highlighted(), "| a | b |\n|---|---|\n| 1 | 2 |\n");
  assert_eq!(
    html,
    "<table><thead><tr><th>a</th><th>b</th></tr></thead><tbody><tr><td>1</\
     td><td>2</td></tr></tbody></table>"
  );
}

#[test]
fn ragged_rows_render_as_given_in_lenient_mode() {
  let source =
    "```table\n{\"headers\": [\"a\", \"b\"], \"rows\": [[\"1\"], [\"2\", \
     \"3\", \"4\"]]}\n```\n";
  let html = render(&highlighted(), source);
  assert!(html.contains("<tr><td>1</td></tr>"));
  assert!(html.contains("<tr><td>2</td><td>3</td><td>4</td></tr>"));
}

#[test]
fn ragged_rows_fail_in_strict_mode() {
  let renderer = stubbed(
    RenderOptions::builder()
      .highlight_code(true)
      .table_mode(TableMode::Strict)
      .build(),
  );
  let source =
    "```table\n{\"headers\": [\"a\", \"b\"], \"rows\": [[\"1\"]]}\n```\n";
  let err = renderer.render(source, None).expect_err("ragged row rejected");
  assert!(matches!(err, RenderError::RaggedTable { row: 0, .. }));
}

#[test]
fn empty_table_has_empty_body() {
  let html = render(&highlighted(), "```table\n{\"headers\": []}\n```\n");
  assert_eq!(html, "<table><thead><tr></tr></thead><tbody></tbody></table>");
}

#[test]
fn code_override_replaces_only_code() {
  let overrides = RendererOverrides::new().with(
    "code",
    |props: Props<'_>, _cx: &RenderContext<'_>| {
      let text = Rendered::text(props.node.text_content());
      Ok(Rendered::from(Element::new("samp").child(text)))
    },
  );
  let doc = highlighted()
    .render("# Title\n\nUse `x` and ```js\nboom\n```\n", Some(&overrides))
    .expect("override bypasses the highlighter");
  let html = doc.html();
  assert!(html.contains("<samp>x</samp>"));
  assert!(html.starts_with("<h1 id=\"title\"><a href=\"#title\" class=\"anchor\">"));
}

#[test]
fn override_can_wrap_builtin_output() {
  let overrides = RendererOverrides::new().with(
    NodeType::Image,
    |props: Props<'_>, _cx: &RenderContext<'_>| {
      Ok(Rendered::from(
        Element::new("figure").children(props.children),
      ))
    },
  );
  let html = highlighted()
    .render("![x](/x.png)\n", Some(&overrides))
    .expect("rendering succeeds")
    .html();
  assert_eq!(html, "<p><figure></figure></p>");
}

#[test]
fn overrides_do_not_leak_between_calls() {
  let renderer = highlighted();
  let overrides = RendererOverrides::new().with(
    "p",
    |props: Props<'_>, _cx: &RenderContext<'_>| {
      Ok(Rendered::from(Element::new("div").children(props.children)))
    },
  );
  let with = render_with(&renderer, "hi\n", &overrides);
  let without = render(&renderer, "hi\n");
  assert_eq!(with, "<div>hi</div>");
  assert_eq!(without, "<p>hi</p>");
}

fn render_with(
  renderer: &DocumentRenderer,
  source: &str,
  overrides: &RendererOverrides,
) -> String {
  renderer
    .render(source, Some(overrides))
    .expect("rendering succeeds")
    .html()
}

#[test]
fn rendering_is_deterministic() {
  let renderer = highlighted();
  let source = "# A\n\n## A\n\n[x](https://x.dev) `y`\n";
  let first = renderer.render(source, None).expect("rendering succeeds");
  let second = renderer.render(source, None).expect("rendering succeeds");
  assert_eq!(first, second);
}

#[test]
fn disabled_highlighting_emits_escaped_text() {
  let renderer = DocumentRenderer::new(
    RenderOptions::builder().highlight_code(false).build(),
  );
  let html = render(&renderer, "`<b>`\n");
  assert_eq!(html, "<p><code>&lt;b&gt;</code></p>");
}

#[test]
fn stylesheet_comes_from_backend() {
  let renderer = stubbed(
    RenderOptions::builder()
      .highlight_theme(Some("stub"))
      .build(),
  );
  let css = renderer.stylesheet().expect("stub stylesheet");
  assert!(css.contains(".tok-rust"));
}

#[test]
fn deeply_nested_quotes_fail_cleanly() {
  let source = format!("{}x", ">".repeat(5_000));
  let err = highlighted()
    .render(&source, None)
    .expect_err("nesting past the limit");
  assert!(matches!(err, RenderError::NestingTooDeep {
    limit: MAX_NESTING_DEPTH,
  }));

  // The renderer is still usable afterwards.
  let html = render(&highlighted(), &format!("{}x\n", ">".repeat(50)));
  assert_eq!(html.matches("<blockquote>").count(), 50);
}

#[test]
fn suffixed_headers_match_anchors_under_heading_override() {
  let renderer = stubbed(
    RenderOptions::builder()
      .heading_ids(HeadingIds::Suffixed)
      .build(),
  );
  let overrides = RendererOverrides::new().with(
    "h2",
    |props: Props<'_>, _cx: &RenderContext<'_>| {
      Ok(Rendered::from(Element::new("h2").children(props.children)))
    },
  );
  let doc = renderer
    .render("## Setup\n\n### Setup\n", Some(&overrides))
    .expect("rendering succeeds");
  let id = &doc.headers[1].id;
  assert_eq!(id, "setup-1");
  assert!(doc.html().contains(&format!("<h3 id=\"{id}\">")));
}
