use crate::types::PageId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Notion page as returned by the pages and database-query endpoints.
///
/// Properties stay raw JSON keyed by property name, in the order the API
/// returned them; assembly interprets the handful of types it renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Page {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PageId::new(id),
            properties: IndexMap::new(),
            created_time: None,
            last_edited_time: None,
            url: None,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_timestamps(
        mut self,
        created_time: Option<DateTime<Utc>>,
        last_edited_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_time = created_time;
        self.last_edited_time = last_edited_time;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_property_order_from_the_wire() {
        let body = r#"{
            "object": "page",
            "id": "p-1",
            "url": "https://www.notion.so/p-1",
            "archived": true,
            "created_time": "2024-01-01T00:00:00.000Z",
            "properties": {
                "Zeta": { "type": "number", "number": 1 },
                "Alpha": { "type": "title", "title": [] },
                "Mid": { "type": "checkbox", "checkbox": true }
            }
        }"#;

        let page: Page = serde_json::from_str(body).unwrap();
        let names: Vec<&str> = page.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(page.properties["Alpha"]["type"], "title");
        assert_eq!(page.url.as_deref(), Some("https://www.notion.so/p-1"));
        assert!(page.last_edited_time.is_none());
    }
}
