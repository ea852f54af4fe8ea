// src/assembly/mod.rs
//! Turns a page and its rendered block tree into named Markdown documents.

mod artifact;
mod index;
mod properties;
mod title;

pub use artifact::{assemble_artifact, assemble_from_fetch, AssemblyOptions, RenderedArtifact};
pub use index::{build_index, IndexArtifact};
pub use properties::{compose_properties_section, render_property_value};
pub use title::{extract_tags, extract_title};

use chrono::{DateTime, Utc};

/// Human-readable timestamp used in metadata lines and the index.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
