// src/assembly/properties.rs
//! Formats page property values for the optional properties section.

use crate::model::{rich_text, Page};
use serde_json::Value;

/// Formats one property value, or `None` when its type is not rendered or
/// the value is empty.
pub fn render_property_value(property: &Value) -> Option<String> {
    let kind = property.get("type")?.as_str()?;
    let value = property.get(kind)?;

    let rendered = match kind {
        "title" | "rich_text" => rich_text::plain_text(value)?,
        "number" => match value {
            Value::Number(n) => n.to_string(),
            _ => return None,
        },
        "select" | "status" => value.get("name")?.as_str()?.to_string(),
        "multi_select" => value
            .as_array()?
            .iter()
            .filter_map(|option| option.get("name").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(", "),
        "date" => {
            let start = value.get("start")?.as_str()?;
            match value.get("end").and_then(Value::as_str) {
                Some(end) => format!("{} → {}", start, end),
                None => start.to_string(),
            }
        }
        "checkbox" => (if value.as_bool()? { "Yes" } else { "No" }).to_string(),
        "url" => {
            let url = value.as_str()?;
            format!("[{}]({})", url, url)
        }
        "email" => {
            let email = value.as_str()?;
            format!("[{}](mailto:{})", email, email)
        }
        "phone_number" => value.as_str()?.to_string(),
        _ => return None,
    };

    (!rendered.trim().is_empty()).then_some(rendered)
}

/// `## Properties` with one `### name` subsection per rendered property.
/// Title properties are left out since the title heads the document.
pub fn compose_properties_section(page: &Page) -> String {
    let mut out = String::new();
    for (name, property) in &page.properties {
        if property.get("type").and_then(Value::as_str) == Some("title") {
            continue;
        }
        if let Some(value) = render_property_value(property) {
            out.push_str(&format!("### {}\n\n{}\n\n", name, value));
        }
    }

    if out.is_empty() {
        return out;
    }
    format!("## Properties\n\n{}", out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_supported_types() {
        let cases = [
            (json!({ "type": "number", "number": 42 }), Some("42")),
            (json!({ "type": "number", "number": null }), None),
            (json!({ "type": "select", "select": { "name": "High" } }), Some("High")),
            (json!({ "type": "status", "status": { "name": "Done" } }), Some("Done")),
            (
                json!({ "type": "multi_select", "multi_select": [{ "name": "a" }, { "name": "b" }] }),
                Some("a, b"),
            ),
            (
                json!({ "type": "date", "date": { "start": "2024-05-01", "end": null } }),
                Some("2024-05-01"),
            ),
            (json!({ "type": "checkbox", "checkbox": false }), Some("No")),
            (
                json!({ "type": "url", "url": "https://example.com" }),
                Some("[https://example.com](https://example.com)"),
            ),
            (
                json!({ "type": "email", "email": "a@b.test" }),
                Some("[a@b.test](mailto:a@b.test)"),
            ),
            (json!({ "type": "phone_number", "phone_number": "+1 555" }), Some("+1 555")),
            (json!({ "type": "people", "people": [] }), None),
            (json!({ "type": "rich_text", "rich_text": [] }), None),
        ];

        for (property, expected) in cases {
            assert_eq!(
                render_property_value(&property).as_deref(),
                expected,
                "{property}"
            );
        }
    }

    #[test]
    fn date_ranges_show_both_ends() {
        let property = json!({ "type": "date", "date": { "start": "2024-05-01", "end": "2024-05-03" } });
        assert_eq!(
            render_property_value(&property).as_deref(),
            Some("2024-05-01 → 2024-05-03")
        );
    }

    #[test]
    fn section_skips_title_and_empty_values() {
        let page = Page::new("p")
            .with_property("Name", json!({ "type": "title", "title": [{ "plain_text": "T" }] }))
            .with_property("Priority", json!({ "type": "select", "select": { "name": "High" } }))
            .with_property("Owner", json!({ "type": "people", "people": [] }));
        assert_eq!(
            compose_properties_section(&page),
            "## Properties\n\n### Priority\n\nHigh\n\n"
        );

        assert_eq!(compose_properties_section(&Page::new("p")), "");
    }
}
