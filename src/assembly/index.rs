// src/assembly/index.rs
//! The index document that links every exported page.

use super::artifact::RenderedArtifact;
use super::format_timestamp;
use crate::constants::INDEX_FILENAME;
use std::fmt::Write;

/// A named document that is not tied to a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexArtifact {
    pub name: String,
    pub body: String,
}

/// Lists `artifacts` under their final filenames, preceded by totals and
/// followed by every collected error message.
pub fn build_index(artifacts: &[RenderedArtifact], errors: &[String]) -> IndexArtifact {
    let total_blocks: usize = artifacts
        .iter()
        .filter_map(|a| a.stats.map(|s| s.total_count))
        .sum();
    let api_calls: usize = artifacts
        .iter()
        .filter_map(|a| a.stats.map(|s| s.request_count))
        .sum();

    let mut body = String::from("# Exported Pages\n\n");
    let _ = writeln!(body, "**Summary:**");
    let _ = writeln!(body, "- Pages: {}", artifacts.len());
    let _ = writeln!(body, "- Total blocks: {}", total_blocks);
    let _ = writeln!(body, "- API calls: {}", api_calls);
    body.push('\n');

    body.push_str("## Pages\n\n");
    if artifacts.is_empty() {
        body.push_str("*No pages were exported.*\n\n");
    }
    for (position, artifact) in artifacts.iter().enumerate() {
        let _ = writeln!(
            body,
            "{}. **[{}](./{})**",
            position + 1,
            artifact.title,
            artifact.name
        );
        if let Some(created) = artifact.created_time {
            let _ = writeln!(body, "   - Created: {}", format_timestamp(created));
        }
        if let Some(edited) = artifact.last_edited_time {
            let _ = writeln!(body, "   - Last edited: {}", format_timestamp(edited));
        }
        let _ = writeln!(body, "   - ID: `{}`", artifact.source_id);
        body.push('\n');
    }

    if !errors.is_empty() {
        body.push_str("## Errors\n\n");
        for error in errors {
            let _ = writeln!(body, "- {}", error);
        }
        body.push('\n');
    }

    IndexArtifact {
        name: INDEX_FILENAME.to_string(),
        body,
    }
}
