// src/analytics/mod.rs
//! Content measurement and statistics for block trees.
//!
//! All walks use an explicit stack of sibling iterators, so they visit in
//! pre-order (parent, then its whole subtree, then the next sibling).

use crate::model::Block;
use indexmap::IndexMap;
use serde::Serialize;

/// Counts blocks recursively.
pub fn count_blocks(blocks: &[Block]) -> usize {
    let mut count = 0;
    walk(blocks, |_, _| count += 1);
    count
}

/// Borrows every block of the tree in pre-order.
pub fn flatten(blocks: &[Block]) -> Vec<&Block> {
    let mut flat = Vec::new();
    walk(blocks, |block, _| flat.push(block));
    flat
}

/// Tally of blocks per kind, in the order kinds are first seen.
pub fn count_by_kind(blocks: &[Block]) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    walk(blocks, |block, _| {
        *counts.entry(block.kind().to_string()).or_default() += 1;
    });
    counts
}

/// Deepest level holding a block (0 = top level), `None` for an empty tree.
pub fn deepest_level(blocks: &[Block]) -> Option<usize> {
    let mut deepest = None;
    walk(blocks, |_, depth| {
        deepest = Some(deepest.map_or(depth, |d: usize| d.max(depth)));
    });
    deepest
}

/// Quick statistics for user-facing progress messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentSummary {
    pub total_blocks: usize,
    pub deepest_level: usize,
    pub kinds: IndexMap<String, usize>,
}

/// Measures basic content statistics for a block tree.
pub fn measure_content(blocks: &[Block]) -> ContentSummary {
    ContentSummary {
        total_blocks: count_blocks(blocks),
        deepest_level: deepest_level(blocks).unwrap_or(0),
        kinds: count_by_kind(blocks),
    }
}

fn walk<'a>(blocks: &'a [Block], mut visit: impl FnMut(&'a Block, usize)) {
    let mut stack = vec![blocks.iter()];
    while let Some(level) = stack.last_mut() {
        match level.next() {
            Some(block) => {
                visit(block, stack.len() - 1);
                if !block.children().is_empty() {
                    stack.push(block.children().iter());
                }
            }
            None => {
                stack.pop();
            }
        }
    }
}
