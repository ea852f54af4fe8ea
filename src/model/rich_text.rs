// src/model/rich_text.rs
//! Plain-text extraction from Notion rich-text arrays.

use serde_json::Value;

/// Joins the runs of a rich-text array into one trimmed string.
///
/// Each run contributes its `plain_text`, falling back to `text.content`.
/// Returns `None` when `value` is not an array at all, so callers can tell
/// "no rich text" apart from "blank rich text".
pub fn plain_text(value: &Value) -> Option<String> {
    let runs = value.as_array()?;
    let joined: String = runs.iter().map(run_text).collect();
    Some(joined.trim().to_string())
}

fn run_text(run: &Value) -> &str {
    run.get("plain_text")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            run.get("text")
                .and_then(|text| text.get("content"))
                .and_then(Value::as_str)
        })
        .unwrap_or("")
}

/// Builds a single-run rich-text array, the shape Notion uses for plain text.
pub fn runs(text: &str) -> Value {
    serde_json::json!([{
        "type": "text",
        "plain_text": text,
        "text": { "content": text }
    }])
}
