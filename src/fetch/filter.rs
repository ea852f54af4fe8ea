// src/fetch/filter.rs
//! The emptiness predicate applied to freshly fetched child lists.

use crate::model::Block;

/// Kinds whose content is their rich text; everything else (media embeds,
/// dividers, kinds this crate does not know) always counts as content.
const TEXT_CHECKED_KINDS: [&str; 6] = [
    "paragraph",
    "heading_1",
    "heading_2",
    "heading_3",
    "bulleted_list_item",
    "numbered_list_item",
];

/// Whether a block carries anything worth keeping.
pub fn is_meaningful(block: &Block) -> bool {
    if block.has_more() || !TEXT_CHECKED_KINDS.contains(&block.kind()) {
        return true;
    }
    block.rich_text().is_some_and(|text| !text.is_empty())
}

/// Applies the predicate to a child list unless empty blocks are wanted.
pub fn retain_meaningful(mut blocks: Vec<Block>, include_empty: bool) -> Vec<Block> {
    if !include_empty {
        blocks.retain(is_meaningful);
    }
    blocks
}
