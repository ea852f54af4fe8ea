// src/formatting/renderer.rs
//! Block rendering engine: converts block trees to Markdown.
//!
//! Rendering walks the tree with an explicit work stack. Visiting a block
//! emits its converter output at the block's indentation, schedules a close
//! marker if it opened a section, and then schedules its children one level
//! deeper, so the close marker comes out after the last child.

use super::converters::{self, SECTION_CLOSE};
use super::registry::{Rendered, RendererRegistry};
use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, INDENT_SPACES};
use crate::model::Block;
use std::sync::Arc;

enum Step<'b> {
    Visit(&'b Block, usize),
    Close(usize),
}

/// Deterministic tree-to-Markdown renderer.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    registry: Arc<RendererRegistry>,
    indent_unit: usize,
    unsupported_comments: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(Arc::new(RendererRegistry::standard()))
    }
}

impl MarkdownRenderer {
    pub fn new(registry: Arc<RendererRegistry>) -> Self {
        Self {
            registry,
            indent_unit: INDENT_SPACES,
            unsupported_comments: true,
        }
    }

    /// Spaces per nesting level.
    pub fn with_indent_unit(mut self, indent_unit: usize) -> Self {
        self.indent_unit = indent_unit;
        self
    }

    /// Whether blocks of unregistered kinds are labelled with their kind.
    pub fn with_unsupported_comments(mut self, enabled: bool) -> Self {
        self.unsupported_comments = enabled;
        self
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Renders `blocks` and their descendants, starting at `indent_level`.
    pub fn render(&self, blocks: &[Block], indent_level: usize) -> String {
        let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
        let mut steps: Vec<Step<'_>> = blocks
            .iter()
            .rev()
            .map(|block| Step::Visit(block, indent_level))
            .collect();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(block, level) => {
                    let rendered = self.convert(block);
                    self.push_indented(&mut output, &rendered.text, level);
                    if rendered.opens_section {
                        steps.push(Step::Close(level));
                    }
                    steps.extend(
                        block
                            .children()
                            .iter()
                            .rev()
                            .map(|child| Step::Visit(child, level + 1)),
                    );
                }
                Step::Close(level) => self.push_indented(&mut output, SECTION_CLOSE, level),
            }
        }

        output
    }

    /// Converts a single block without its children.
    pub fn convert(&self, block: &Block) -> Rendered {
        match self.registry.get(block.kind()) {
            Some(converter) => converter(block),
            None => converters::unsupported(block, self.unsupported_comments),
        }
    }

    /// Appends `text`, prefixing every non-blank line with the indentation
    /// for `level`.
    fn push_indented(&self, output: &mut String, text: &str, level: usize) {
        let indent = " ".repeat(self.indent_unit * level);
        for line in text.split_inclusive('\n') {
            if !line.trim().is_empty() {
                output.push_str(&indent);
            }
            output.push_str(line);
        }
    }
}
