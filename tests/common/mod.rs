// tests/common/mod.rs
//! Shared fixtures: an in-process Notion workspace with scripted answers.

#![allow(dead_code)]

use notion2markdown::{
    AppError, Block, BlockId, BlockSource, DatabaseId, NotionErrorCode, NotionRepository, Page,
    PageId,
};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Answers `children` from a fixed table and records every request.
///
/// Ids with no entry answer with `object_not_found`; ids registered with
/// [`ScriptedSource::failing`] answer with a server error.
#[derive(Default)]
pub struct ScriptedSource {
    children: HashMap<String, Vec<Block>>,
    failing: HashMap<String, String>,
    pages: HashMap<String, Page>,
    database: Vec<Page>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, parent: &str, blocks: Vec<Block>) -> Self {
        self.children.insert(parent.to_string(), blocks);
        self
    }

    pub fn failing(mut self, parent: &str, message: &str) -> Self {
        self.failing.insert(parent.to_string(), message.to_string());
        self
    }

    /// Registers a retrievable page that is also listed by the database.
    pub fn with_page(mut self, page: Page) -> Self {
        self.database.push(page.clone());
        self.pages.insert(page.id.as_str().to_string(), page);
        self
    }

    /// Lists a page in the database without making it retrievable.
    pub fn with_listed_only(mut self, page: Page) -> Self {
        self.database.push(page);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotionApi {
            code: NotionErrorCode::ObjectNotFound,
            message: format!("Could not find block with ID: {}", id),
            status: 404,
            request_id: None,
        }
    }
}

#[async_trait::async_trait]
impl BlockSource for ScriptedSource {
    async fn children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
        let id = parent.as_str();
        self.requests.lock().push(id.to_string());

        if let Some(message) = self.failing.get(id) {
            return Err(AppError::NotionApi {
                code: NotionErrorCode::InternalError,
                message: message.clone(),
                status: 500,
                request_id: None,
            });
        }
        self.children
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait::async_trait]
impl NotionRepository for ScriptedSource {
    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        self.pages
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| Self::not_found(id.as_str()))
    }

    async fn query_database(&self, _database: &DatabaseId) -> Result<Vec<Page>, AppError> {
        Ok(self.database.clone())
    }
}

pub fn paragraph(id: &str, text: &str) -> Block {
    Block::with_text(id, "paragraph", text)
}

/// A block that reports unfetched children.
pub fn parent(id: &str, kind: &str, text: &str) -> Block {
    Block::with_text(id, kind, text).with_has_more(true)
}

/// A page whose `Name` title property is `title`.
pub fn titled_page(id: &str, title: &str) -> Page {
    Page::new(id).with_property(
        "Name",
        serde_json::json!({
            "id": "title",
            "type": "title",
            "title": [{ "type": "text", "plain_text": title }],
        }),
    )
}
