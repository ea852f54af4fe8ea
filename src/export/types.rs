// src/export/types.rs
//! Inputs and outputs of a batch export.

use crate::assembly::{IndexArtifact, RenderedArtifact};
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::output::OutputReport;
use crate::types::{DatabaseId, PageId};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Which pages a run exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page a database query returns.
    Database(DatabaseId),
    /// Exactly these pages, in this order.
    Pages(Vec<PageId>),
}

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub selection: PageSelection,
    pub output_dir: PathBuf,
    /// Pages processed at once; `None` processes all of them together.
    pub concurrency: Option<usize>,
    /// Upper bound for one page's retrieve, fetch and assemble.
    pub page_timeout: Option<Duration>,
    /// Where to write the JSON run summary, if anywhere.
    pub summary_path: Option<PathBuf>,
}

impl ExportRequest {
    pub fn new(selection: PageSelection) -> Self {
        Self {
            selection,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            concurrency: None,
            page_timeout: None,
            summary_path: None,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_page_timeout(mut self, page_timeout: Option<Duration>) -> Self {
        self.page_timeout = page_timeout;
        self
    }

    pub fn with_summary_path(mut self, summary_path: Option<PathBuf>) -> Self {
        self.summary_path = summary_path;
        self
    }
}

/// Counts and messages of one run, serialized as the JSON summary file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub pages_found: usize,
    pub pages_processed: usize,
    pub pages_failed: usize,
    pub total_blocks: usize,
    pub api_calls: usize,
    pub files_written: usize,
    pub records_saved: usize,
    pub errors: Vec<String>,
    pub output_dir: PathBuf,
}

impl RunSummary {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct ExportReport {
    /// Page documents under their final, de-duplicated names.
    pub artifacts: Vec<RenderedArtifact>,
    pub index: IndexArtifact,
    pub output: OutputReport,
    pub summary: RunSummary,
}
