// tests/rendering.rs
//! Whole-tree rendering through the public renderer.

use notion2markdown::{Block, MarkdownRenderer, Rendered, RendererRegistry};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn text(id: &str, kind: &str, text: &str) -> Block {
    Block::with_text(id, kind, text)
}

fn sample_tree() -> Vec<Block> {
    vec![
        text("h", "heading_1", "Roadmap"),
        text("t", "toggle", "Q3").with_children(vec![
            text("b1", "bulleted_list_item", "ship it"),
            text("t2", "toggle", "details").with_children(vec![text("p", "paragraph", "deep")]),
        ]),
        Block::new(
            "c",
            "code",
            json!({ "rich_text": [{ "plain_text": "fn main() {}" }], "language": "rust" }),
        ),
        Block::new("d", "divider", json!({})),
        text("n", "numbered_list_item", "first"),
        text("n2", "numbered_list_item", "second"),
    ]
}

#[test]
fn renders_a_mixed_tree() {
    let expected = "\
# Roadmap

<details>
<summary>Q3</summary>

  - ship it
  <details>
  <summary>details</summary>

    deep

  </details>

</details>

```rust
fn main() {}
```

---

1. first
1. second
";
    assert_eq!(MarkdownRenderer::default().render(&sample_tree(), 0), expected);
}

#[test]
fn rendering_is_deterministic() {
    let renderer = MarkdownRenderer::default();
    let tree = sample_tree();
    let first = renderer.render(&tree, 0);
    for _ in 0..5 {
        assert_eq!(renderer.render(&tree, 0), first);
    }
    assert_eq!(
        MarkdownRenderer::default().render(&sample_tree(), 0),
        first
    );
}

#[test]
fn empty_input_is_empty_output() {
    let renderer = MarkdownRenderer::default();
    assert_eq!(renderer.render(&[], 0), "");
    assert_eq!(renderer.render(&[], 3), "");
}

#[test]
fn every_opened_toggle_is_closed() {
    let nested = text("t1", "toggle", "a").with_children(vec![
        text("t2", "toggle", "b").with_children(vec![text("t3", "toggle", "c")]),
        Block::new(
            "h",
            "heading_2",
            json!({ "rich_text": [{ "plain_text": "folded" }], "is_toggleable": true }),
        )
        .with_children(vec![text("p", "paragraph", "inside")]),
    ]);

    let markdown = MarkdownRenderer::default().render(&[nested], 0);
    assert_eq!(
        markdown.matches("<details>").count(),
        markdown.matches("</details>").count()
    );
    assert_eq!(markdown.matches("</details>").count(), 4);
    assert!(markdown.contains("<summary><strong>## folded</strong></summary>"));
}

#[test]
fn start_indent_shifts_every_line() {
    let markdown = MarkdownRenderer::default().render(&[text("p", "paragraph", "x")], 2);
    assert_eq!(markdown, "    x\n\n");
}

#[test]
fn unknown_kinds_fall_back() {
    let callout = text("c", "callout", "Heads up");
    let embed = Block::new("e", "embed", json!({ "url": "https://example.com" }));

    let labelled = MarkdownRenderer::default().render(&[callout.clone(), embed.clone()], 0);
    assert_eq!(labelled, "Heads up *(callout)*\n\n*[embed]*\n\n");

    let quiet = MarkdownRenderer::default()
        .with_unsupported_comments(false)
        .render(&[callout, embed], 0);
    assert_eq!(quiet, "Heads up\n\n");
}

#[test]
fn custom_registry_overrides_a_kind() {
    let mut registry = RendererRegistry::standard();
    registry.register("callout", |block: &Block| {
        Rendered::text(format!("> 💡 {}\n\n", block.rich_text().unwrap_or_default()))
    });
    let renderer = MarkdownRenderer::new(Arc::new(registry));

    assert_eq!(
        renderer.render(&[text("c", "callout", "Tip")], 0),
        "> 💡 Tip\n\n"
    );
}

#[test]
fn image_block_uses_caption_or_default_alt() {
    let captioned = Block::new(
        "i1",
        "image",
        json!({
            "type": "external",
            "external": { "url": "https://example.com/a.png" },
            "caption": [{ "plain_text": "Diagram" }],
        }),
    );
    let bare = Block::new(
        "i2",
        "image",
        json!({ "type": "file", "file": { "url": "https://files.example.com/b.png" } }),
    );

    assert_eq!(
        MarkdownRenderer::default().render(&[captioned, bare], 0),
        "![Diagram](https://example.com/a.png)\n\n![Imagen](https://files.example.com/b.png)\n\n"
    );
}
