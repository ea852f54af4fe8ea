// src/assembly/title.rs
//! Title and tag extraction from a page's property map.

use crate::constants::{ID_PREFIX_CHARS, PREFERRED_TITLE_PROPERTIES};
use crate::model::{rich_text, Page};
use serde_json::Value;

/// Text of a property's `title` or `rich_text` runs, if non-empty.
fn property_text(property: &Value) -> Option<String> {
    ["title", "rich_text"]
        .iter()
        .filter_map(|key| property.get(*key))
        .filter_map(rich_text::plain_text)
        .find(|text| !text.is_empty())
}

/// The page title.
///
/// Preferred property names are tried first, in order; then every property
/// in API order; finally a label built from the id prefix.
pub fn extract_title(page: &Page) -> String {
    PREFERRED_TITLE_PROPERTIES
        .iter()
        .filter_map(|name| page.properties.get(*name))
        .find_map(property_text)
        .or_else(|| page.properties.values().find_map(property_text))
        .unwrap_or_else(|| format!("Untitled {}", page.id.prefix(ID_PREFIX_CHARS)))
}

/// Option names of every `select` and `multi_select` property, first
/// occurrence wins.
pub fn extract_tags(page: &Page) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for property in page.properties.values() {
        let names: Vec<&str> = match property.get("type").and_then(Value::as_str) {
            Some("select") => property
                .get("select")
                .and_then(|option| option.get("name"))
                .and_then(Value::as_str)
                .into_iter()
                .collect(),
            Some("multi_select") => property
                .get("multi_select")
                .and_then(Value::as_array)
                .map(|options| {
                    options
                        .iter()
                        .filter_map(|option| option.get("name").and_then(Value::as_str))
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        for name in names {
            let name = name.trim();
            if !name.is_empty() && !tags.iter().any(|tag| tag == name) {
                tags.push(name.to_string());
            }
        }
    }
    tags
}
