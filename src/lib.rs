// src/lib.rs
//! notion2markdown library: exports Notion pages, with their nested block
//! trees, as Markdown documents.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `FetchError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ExportConfig`
//! - **Domain model**: `Block`, `Page`, ids and validated newtypes
//! - **API client**: `BlockSource`, `NotionRepository`, `NotionHttpClient`
//! - **Fetching**: `TreeFetcher`, `FetchOptions`, `FetchResult`
//! - **Formatting**: `MarkdownRenderer`, `RendererRegistry`
//! - **Assembly and export**: `assemble_artifact`, `build_index`, `Exporter`
//! - **Persistence**: `ArtifactStore`, `MemoryArtifactStore`, `PgArtifactStore`

pub mod analytics;
pub mod api;
pub mod assembly;
mod config;
pub mod constants;
mod error;
pub mod export;
pub mod fetch;
pub mod formatting;
pub mod model;
pub mod output;
pub mod store;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, FetchError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ExportConfig};

// --- Domain Model ---
pub use crate::model::{Block, Page};
pub use crate::types::{ApiKey, BlockId, DatabaseId, Id, PageId, ValidatedUrl};

// --- API Client ---
pub use crate::api::{BlockSource, NotionHttpClient, NotionRepository};

// --- Fetching ---
pub use crate::analytics::{count_blocks, flatten, measure_content, ContentSummary};
pub use crate::fetch::{
    is_meaningful, BranchFailure, FetchOptions, FetchResult, FetchStats, FlatFetchResult,
    TreeFetcher,
};

// --- Formatting ---
pub use crate::formatting::{BlockConverter, MarkdownRenderer, Rendered, RendererRegistry};

// --- Assembly ---
pub use crate::assembly::{
    assemble_artifact, assemble_from_fetch, build_index, AssemblyOptions, IndexArtifact,
    RenderedArtifact,
};

// --- Export ---
pub use crate::export::{ExportReport, ExportRequest, Exporter, PageSelection, RunSummary};

// --- Persistence ---
#[cfg(feature = "postgres")]
pub use crate::store::PgArtifactStore;
pub use crate::store::{ArtifactStore, MemoryArtifactStore, StoredRecord};
