// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! Business logic depends on the traits here, never on HTTP details. The
//! fetch engine only needs [`BlockSource`]; the batch exporter needs the
//! wider [`NotionRepository`].

pub mod client;
mod pagination;
pub mod parser;
mod types;

use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::{BlockId, DatabaseId, PageId};

pub use client::NotionHttpClient;
pub use pagination::fetch_all_pages;
pub use types::{NotionApiErrorResponse, PaginatedResponse, PaginationResult};

/// Anything that can list the direct children of a block.
///
/// Implementations return the complete, ordered child list of `parent`; any
/// pagination happens behind this call. Errors are opaque to callers.
#[async_trait::async_trait]
pub trait BlockSource: Send + Sync {
    async fn children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError>;
}

/// The wider workspace surface used when exporting whole databases.
#[async_trait::async_trait]
pub trait NotionRepository: BlockSource {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError>;
    async fn query_database(&self, database: &DatabaseId) -> Result<Vec<Page>, AppError>;
}
