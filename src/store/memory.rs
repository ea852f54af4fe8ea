// src/store/memory.rs
//! In-process artifact store, for tests and dry runs.

use super::{record_metadata, ArtifactStore, StoredRecord};
use crate::assembly::RenderedArtifact;
use crate::error::AppError;
use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    records: RwLock<IndexMap<String, StoredRecord>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn newest_first(mut records: Vec<StoredRecord>) -> Vec<StoredRecord> {
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        records
    }
}

#[async_trait::async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn upsert(&self, artifact: &RenderedArtifact) -> Result<StoredRecord, AppError> {
        let now = Utc::now();
        let mut records = self.records.write();
        let external_id = artifact.source_id.as_str().to_string();

        let (id, created_at) = match records.get(&external_id) {
            Some(existing) => (existing.id, existing.created_at),
            None => (Uuid::new_v4(), now),
        };

        let record = StoredRecord {
            id,
            external_id: external_id.clone(),
            title: artifact.title.clone(),
            content: artifact.body.clone(),
            source_url: artifact.url.clone(),
            source_created_time: artifact.created_time,
            source_last_edited_time: artifact.last_edited_time,
            tags: artifact.tags.clone(),
            metadata: record_metadata(artifact),
            created_at,
            updated_at: now,
        };
        records.insert(external_id, record.clone());
        Ok(record)
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<StoredRecord>, AppError> {
        Ok(self.records.read().get(external_id).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<StoredRecord>, AppError> {
        let needle = query.to_lowercase();
        let matches = self
            .records
            .read()
            .values()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(Self::newest_first(matches))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.write();
        let key = records
            .iter()
            .find(|(_, record)| record.id == id)
            .map(|(key, _)| key.clone());
        Ok(match key {
            Some(key) => records.shift_remove(&key).is_some(),
            None => false,
        })
    }

    async fn list(&self) -> Result<Vec<StoredRecord>, AppError> {
        let all = self.records.read().values().cloned().collect();
        Ok(Self::newest_first(all))
    }
}
