// src/formatting/registry.rs
//! The kind → converter table consulted by the renderer.
//!
//! A registry is built once, optionally extended with `register`, and then
//! handed to a [`MarkdownRenderer`](super::MarkdownRenderer). Rendering only
//! ever reads it.

use super::converters;
use crate::model::Block;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Output of one converter for one block, before indentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// The text opened a collapsible section that the renderer must close
    /// after the block's children.
    pub opens_section: bool,
}

impl Rendered {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            opens_section: false,
        }
    }

    pub fn section(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            opens_section: true,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// A pure conversion from one block to its Markdown.
pub type BlockConverter = Arc<dyn Fn(&Block) -> Rendered + Send + Sync>;

#[derive(Clone, Default)]
pub struct RendererRegistry {
    converters: IndexMap<String, BlockConverter>,
}

impl RendererRegistry {
    /// A registry with no converters; every kind falls through to the
    /// generic handler.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in converters for the common Notion block kinds.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry
            .register("paragraph", converters::paragraph)
            .register("heading_1", |b: &Block| converters::heading(b, 1))
            .register("heading_2", |b: &Block| converters::heading(b, 2))
            .register("heading_3", |b: &Block| converters::heading(b, 3))
            .register("bulleted_list_item", converters::bulleted_list_item)
            .register("numbered_list_item", converters::numbered_list_item)
            .register("to_do", converters::to_do)
            .register("quote", converters::quote)
            .register("code", converters::code)
            .register("divider", converters::divider)
            .register("toggle", converters::toggle)
            .register("image", converters::image);
        registry
    }

    /// Adds or replaces the converter for `kind`.
    pub fn register<F>(&mut self, kind: impl Into<String>, converter: F) -> &mut Self
    where
        F: Fn(&Block) -> Rendered + Send + Sync + 'static,
    {
        self.converters.insert(kind.into(), Arc::new(converter));
        self
    }

    pub fn get(&self, kind: &str) -> Option<&BlockConverter> {
        self.converters.get(kind)
    }

    pub fn supports(&self, kind: &str) -> bool {
        self.converters.contains_key(kind)
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .finish()
    }
}
