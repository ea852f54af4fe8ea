// src/export/mod.rs
//! Batch export of many pages into a directory of Markdown files.

mod exporter;
mod types;

pub use exporter::Exporter;
pub use types::{ExportReport, ExportRequest, PageSelection, RunSummary};
