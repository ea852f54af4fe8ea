// src/formatting/converters.rs
//! Per-kind block converters.
//!
//! Converters see a single block and return unindented Markdown; nesting and
//! section closing are the renderer's job. Blank text yields nothing.

use super::registry::Rendered;
use crate::model::{rich_text, Block};
use crate::types::ValidatedUrl;
use serde_json::Value;

/// Alt text used when an image has no caption.
pub const DEFAULT_IMAGE_ALT: &str = "Imagen";

/// Closing marker of a collapsible section.
pub const SECTION_CLOSE: &str = "</details>\n\n";

fn text_of(block: &Block) -> Option<String> {
    block.rich_text().filter(|text| !text.is_empty())
}

pub fn paragraph(block: &Block) -> Rendered {
    match text_of(block) {
        Some(text) => Rendered::text(format!("{}\n\n", text)),
        None => Rendered::empty(),
    }
}

/// `level` is 1 to 3. A toggleable heading opens a section instead.
pub fn heading(block: &Block, level: usize) -> Rendered {
    let Some(text) = text_of(block) else {
        return Rendered::empty();
    };
    let prefix = "#".repeat(level);
    if block.flag("is_toggleable") {
        Rendered::section(format!(
            "<details>\n<summary><strong>{} {}</strong></summary>\n\n",
            prefix, text
        ))
    } else {
        Rendered::text(format!("{} {}\n\n", prefix, text))
    }
}

pub fn bulleted_list_item(block: &Block) -> Rendered {
    match text_of(block) {
        Some(text) => Rendered::text(format!("- {}\n", text)),
        None => Rendered::empty(),
    }
}

/// Every item is written as `1.`; Markdown renderers number them.
pub fn numbered_list_item(block: &Block) -> Rendered {
    match text_of(block) {
        Some(text) => Rendered::text(format!("1. {}\n", text)),
        None => Rendered::empty(),
    }
}

pub fn to_do(block: &Block) -> Rendered {
    let Some(text) = text_of(block) else {
        return Rendered::empty();
    };
    let checkbox = if block.flag("checked") { "[x]" } else { "[ ]" };
    Rendered::text(format!("- {} {}\n", checkbox, text))
}

pub fn quote(block: &Block) -> Rendered {
    match text_of(block) {
        Some(text) => Rendered::text(format!("> {}\n\n", text)),
        None => Rendered::empty(),
    }
}

/// Always emits fences, even around an empty body.
pub fn code(block: &Block) -> Rendered {
    let language = block.str_field("language").unwrap_or("");
    match text_of(block) {
        Some(code) => Rendered::text(format!("```{}\n{}\n```\n\n", language, code)),
        None => Rendered::text(format!("```{}\n\n```\n\n", language)),
    }
}

pub fn divider(_block: &Block) -> Rendered {
    Rendered::text("---\n\n")
}

pub fn toggle(block: &Block) -> Rendered {
    match text_of(block) {
        Some(text) => Rendered::section(format!(
            "<details>\n<summary>{}</summary>\n\n",
            text
        )),
        None => Rendered::empty(),
    }
}

pub fn image(block: &Block) -> Rendered {
    let data = block.payload();
    if !data.is_object() {
        return Rendered::text("<!-- Image without data -->\n\n");
    }

    let url_at = |key: &str| {
        data.get(key)
            .and_then(|source| source.get("url"))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    };

    let url = match data.get("type").and_then(Value::as_str) {
        Some("external") => url_at("external"),
        Some("file") => url_at("file"),
        _ => None,
    };

    let Some(url) = url else {
        if let Some(upload_id) = data
            .get("file_upload")
            .and_then(|upload| upload.get("id"))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
        {
            return Rendered::text(format!(
                "<!-- Uploaded image (requires download): {} -->\n\n",
                upload_id
            ));
        }
        return Rendered::text("<!-- Image without a valid URL -->\n\n");
    };

    if ValidatedUrl::parse(url).is_err() {
        return Rendered::text("<!-- Image without a valid URL -->\n\n");
    }

    let alt = data
        .get("caption")
        .and_then(rich_text::plain_text)
        .filter(|caption| !caption.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_ALT.to_string());

    Rendered::text(format!("![{}]({})\n\n", alt, url))
}

/// Fallback for kinds without a registered converter.
///
/// With `comments` the kind is made visible; without, only text survives.
pub fn unsupported(block: &Block, comments: bool) -> Rendered {
    match (text_of(block), comments) {
        (Some(text), true) => Rendered::text(format!("{} *({})*\n\n", text, block.kind())),
        (Some(text), false) => Rendered::text(format!("{}\n\n", text)),
        (None, true) => Rendered::text(format!("*[{}]*\n\n", block.kind())),
        (None, false) => Rendered::empty(),
    }
}
