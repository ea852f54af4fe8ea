// src/formatting/mod.rs
//! Renders block trees into Markdown.

pub mod converters;
mod registry;
mod renderer;

pub use registry::{BlockConverter, Rendered, RendererRegistry};
pub use renderer::MarkdownRenderer;
