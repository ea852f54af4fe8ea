// src/store/mod.rs
//! Persistence of rendered artifacts, keyed by the source page id.

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use memory::MemoryArtifactStore;
#[cfg(feature = "postgres")]
pub use postgres::PgArtifactStore;

use crate::assembly::RenderedArtifact;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// A persisted artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRecord {
    pub id: Uuid,
    /// The Notion page id; unique across the store.
    pub external_id: String,
    pub title: String,
    pub content: String,
    pub source_url: Option<String>,
    pub source_created_time: Option<DateTime<Utc>>,
    pub source_last_edited_time: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where artifacts are saved.
///
/// `upsert` is keyed by the artifact's source id: saving the same page twice
/// updates the existing record instead of adding a second one.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn upsert(&self, artifact: &RenderedArtifact) -> Result<StoredRecord, AppError>;
    async fn find_by_external_id(&self, external_id: &str)
        -> Result<Option<StoredRecord>, AppError>;
    /// Records whose title or content contains `query`, ignoring case,
    /// most recently updated first.
    async fn search(&self, query: &str) -> Result<Vec<StoredRecord>, AppError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
    /// All records, most recently updated first.
    async fn list(&self) -> Result<Vec<StoredRecord>, AppError>;
}

/// Extra artifact data kept in the record's JSON metadata column.
pub fn record_metadata(artifact: &RenderedArtifact) -> Value {
    serde_json::json!({
        "filename": artifact.name,
        "stats": artifact.stats,
    })
}
