// src/assembly/artifact.rs
//! Composes one page's Markdown document.

use super::properties::compose_properties_section;
use super::title::{extract_tags, extract_title};
use super::format_timestamp;
use crate::fetch::{FetchResult, FetchStats};
use crate::formatting::MarkdownRenderer;
use crate::model::{Block, Page};
use crate::output::artifact_filename;
use crate::types::PageId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

/// What goes into a page document besides title, metadata and content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Prepend a YAML front matter block.
    pub front_matter: bool,
    /// Add a `## Properties` section.
    pub include_properties: bool,
}

/// A named, fully rendered Markdown document and the page data behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedArtifact {
    pub name: String,
    pub body: String,
    pub source_id: PageId,
    pub title: String,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub stats: Option<FetchStats>,
}

impl RenderedArtifact {
    /// The same artifact under another filename.
    pub fn renamed(self, name: String) -> Self {
        Self { name, ..self }
    }
}

/// Builds the artifact for `page` with `blocks` as its content.
pub fn assemble_artifact(
    page: &Page,
    blocks: &[Block],
    options: &AssemblyOptions,
    renderer: &MarkdownRenderer,
) -> RenderedArtifact {
    compose(page, blocks, None, options, renderer)
}

/// Like [`assemble_artifact`], also recording the traversal statistics in
/// the metadata block.
pub fn assemble_from_fetch(
    page: &Page,
    fetched: &FetchResult,
    options: &AssemblyOptions,
    renderer: &MarkdownRenderer,
) -> RenderedArtifact {
    compose(page, &fetched.tree, Some(fetched.stats()), options, renderer)
}

fn compose(
    page: &Page,
    blocks: &[Block],
    stats: Option<FetchStats>,
    options: &AssemblyOptions,
    renderer: &MarkdownRenderer,
) -> RenderedArtifact {
    let title = extract_title(page);
    let mut body = String::new();

    if options.front_matter {
        body.push_str(&front_matter(page, &title));
    }
    body.push_str(&format!("# {}\n\n", title));
    body.push_str(&metadata_section(page, stats.as_ref()));

    if options.include_properties {
        body.push_str(&compose_properties_section(page));
    }

    if blocks.is_empty() {
        body.push_str("*This page has no block content.*\n");
    } else {
        body.push_str("## Content\n\n");
        body.push_str(&renderer.render(blocks, 0));
    }

    log::debug!("Assembled page '{}': {} bytes", title, body.len());

    RenderedArtifact {
        name: artifact_filename(&title, page.id.as_str()),
        body,
        source_id: page.id.clone(),
        title,
        created_time: page.created_time,
        last_edited_time: page.last_edited_time,
        url: page.url.clone(),
        tags: extract_tags(page),
        stats,
    }
}

fn yaml_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn front_matter(page: &Page, title: &str) -> String {
    let mut out = String::from("---\n");
    let _ = writeln!(out, "title: {}", yaml_quote(title));
    let _ = writeln!(out, "notion_id: {}", yaml_quote(page.id.as_str()));
    if let Some(created) = page.created_time {
        let _ = writeln!(out, "created: {}", yaml_quote(&created.to_rfc3339()));
    }
    if let Some(edited) = page.last_edited_time {
        let _ = writeln!(out, "updated: {}", yaml_quote(&edited.to_rfc3339()));
    }
    if let Some(url) = &page.url {
        let _ = writeln!(out, "notion_url: {}", yaml_quote(url));
    }
    out.push_str("---\n\n");
    out
}

fn metadata_section(page: &Page, stats: Option<&FetchStats>) -> String {
    let mut out = String::from("## Metadata\n\n");
    let _ = writeln!(out, "- **Notion ID:** `{}`", page.id);
    if let Some(url) = &page.url {
        let _ = writeln!(out, "- **URL:** [Open in Notion]({})", url);
    }
    if let Some(created) = page.created_time {
        let _ = writeln!(out, "- **Created:** {}", format_timestamp(created));
    }
    if let Some(edited) = page.last_edited_time {
        let _ = writeln!(out, "- **Last edited:** {}", format_timestamp(edited));
    }
    if let Some(stats) = stats {
        let _ = writeln!(out, "- **Total blocks:** {}", stats.total_count);
        let _ = writeln!(out, "- **Max depth:** {}", stats.max_depth_reached);
        let _ = writeln!(out, "- **API calls:** {}", stats.request_count);
        if stats.failed_branches > 0 {
            let _ = writeln!(out, "- **Failed branches:** {}", stats.failed_branches);
        }
    }
    out.push_str("\n---\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page() -> Page {
        Page::new("1f2e3d4c-5b6a-7980-abcd-ef0123456789")
            .with_property("Name", json!({ "type": "title", "title": [{ "plain_text": "Say \"hi\"" }] }))
            .with_url("https://www.notion.so/hi")
            .with_timestamps(Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()), None)
    }

    #[test]
    fn front_matter_escapes_quotes() {
        let fm = front_matter(&page(), "Say \"hi\"");
        assert_eq!(
            fm,
            "---\ntitle: \"Say \\\"hi\\\"\"\nnotion_id: \"1f2e3d4c-5b6a-7980-abcd-ef0123456789\"\ncreated: \"2024-01-02T03:04:05+00:00\"\nnotion_url: \"https://www.notion.so/hi\"\n---\n\n"
        );
    }

    #[test]
    fn metadata_omits_absent_fields() {
        let section = metadata_section(&Page::new("abc"), None);
        assert_eq!(section, "## Metadata\n\n- **Notion ID:** `abc`\n\n---\n\n");
    }
}
