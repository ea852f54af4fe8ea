// src/store/postgres.rs
//! Postgres-backed artifact store over the `markdown_pages` table.

use super::{record_metadata, ArtifactStore, StoredRecord};
use crate::assembly::RenderedArtifact;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

const MIGRATION: &str = include_str!("../../migrations/0001_markdown_pages.sql");

const COLUMNS: &str = "id, notion_page_id, title, content, notion_url, notion_created_time, \
     notion_last_edited_time, tags, metadata, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct MarkdownPageRow {
    id: Uuid,
    notion_page_id: String,
    title: String,
    content: String,
    notion_url: Option<String>,
    notion_created_time: Option<DateTime<Utc>>,
    notion_last_edited_time: Option<DateTime<Utc>>,
    tags: Vec<String>,
    metadata: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MarkdownPageRow> for StoredRecord {
    fn from(row: MarkdownPageRow) -> Self {
        Self {
            id: row.id,
            external_id: row.notion_page_id,
            title: row.title,
            content: row.content,
            source_url: row.notion_url,
            source_created_time: row.notion_created_time,
            source_last_edited_time: row.notion_last_edited_time,
            tags: row.tags,
            metadata: row.metadata,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgArtifactStore {
    pool: PgPool,
}

impl PgArtifactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the table and its indexes when missing.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::raw_sql(MIGRATION).execute(&self.pool).await?;
        Ok(())
    }
}

/// `%query%` with LIKE wildcards in the query escaped.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait::async_trait]
impl ArtifactStore for PgArtifactStore {
    async fn upsert(&self, artifact: &RenderedArtifact) -> Result<StoredRecord, AppError> {
        let sql = format!(
            r#"
            INSERT INTO markdown_pages
                (notion_page_id, title, content, notion_url, notion_created_time,
                 notion_last_edited_time, tags, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (notion_page_id) DO UPDATE
                SET title = EXCLUDED.title,
                    content = EXCLUDED.content,
                    notion_url = EXCLUDED.notion_url,
                    notion_created_time = EXCLUDED.notion_created_time,
                    notion_last_edited_time = EXCLUDED.notion_last_edited_time,
                    tags = EXCLUDED.tags,
                    metadata = EXCLUDED.metadata,
                    updated_at = now()
            RETURNING {}
            "#,
            COLUMNS
        );

        let row: MarkdownPageRow = sqlx::query_as(&sql)
            .bind(artifact.source_id.as_str())
            .bind(&artifact.title)
            .bind(&artifact.body)
            .bind(&artifact.url)
            .bind(artifact.created_time)
            .bind(artifact.last_edited_time)
            .bind(&artifact.tags)
            .bind(record_metadata(artifact))
            .fetch_one(&self.pool)
            .await?;

        log::debug!("Upserted markdown page {}", row.notion_page_id);
        Ok(row.into())
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<StoredRecord>, AppError> {
        let sql = format!("SELECT {} FROM markdown_pages WHERE notion_page_id = $1", COLUMNS);
        let row: Option<MarkdownPageRow> = sqlx::query_as(&sql)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn search(&self, query: &str) -> Result<Vec<StoredRecord>, AppError> {
        let sql = format!(
            "SELECT {} FROM markdown_pages \
             WHERE title ILIKE $1 OR content ILIKE $1 \
             ORDER BY updated_at DESC",
            COLUMNS
        );
        let rows: Vec<MarkdownPageRow> = sqlx::query_as(&sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM markdown_pages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<StoredRecord>, AppError> {
        let sql = format!(
            "SELECT {} FROM markdown_pages ORDER BY updated_at DESC",
            COLUMNS
        );
        let rows: Vec<MarkdownPageRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
