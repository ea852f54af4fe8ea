// src/fetch/fetcher.rs
//! Depth-first retrieval of a block tree.
//!
//! The traversal keeps an explicit stack of partially built levels instead of
//! recursing, so a deep tree costs heap, not call stack. Each level owns the
//! block being expanded, the siblings still to visit and the siblings already
//! finished; when its queue runs dry the level is folded into its parent.

use super::filter::retain_meaningful;
use super::types::{BranchFailure, FetchOptions, FetchResult, FlatFetchResult};
use crate::analytics::count_blocks;
use crate::api::BlockSource;
use crate::error::FetchError;
use crate::model::Block;
use crate::types::BlockId;

/// Fetches complete block trees from a [`BlockSource`].
pub struct TreeFetcher<'a, S: ?Sized> {
    source: &'a S,
}

/// One level of the tree under construction.
struct PendingLevel {
    /// The block whose children this level holds; `None` for the root list.
    parent: Option<Block>,
    depth: usize,
    queue: std::vec::IntoIter<Block>,
    finished: Vec<Block>,
}

impl PendingLevel {
    fn new(parent: Option<Block>, depth: usize, children: Vec<Block>) -> Self {
        let finished = Vec::with_capacity(children.len());
        Self {
            parent,
            depth,
            queue: children.into_iter(),
            finished,
        }
    }
}

impl<'a, S> TreeFetcher<'a, S>
where
    S: BlockSource + ?Sized,
{
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Tree mode: the children of `root_id`, expanded depth-first.
    ///
    /// Only a failure of the root request is fatal. A failed nested request
    /// leaves that block unexpanded and is reported in `branch_failures`,
    /// unless `options.strict` is set.
    pub async fn fetch_tree(
        &self,
        root_id: &BlockId,
        options: &FetchOptions,
    ) -> Result<FetchResult, FetchError> {
        let mut request_count = 1;
        let roots = self
            .source
            .children(root_id)
            .await
            .map_err(|e| FetchError::Root {
                root_id: root_id.to_string(),
                source: Box::new(e),
            })?;

        let mut max_depth_reached = 0;
        let mut branch_failures = Vec::new();
        let mut stack = vec![PendingLevel::new(
            None,
            0,
            retain_meaningful(roots, options.include_empty),
        )];

        let tree = loop {
            let next = match stack.last_mut() {
                Some(level) => level.queue.next().map(|block| (block, level.depth)),
                None => break Vec::new(),
            };

            let Some((block, depth)) = next else {
                match fold_finished_level(&mut stack) {
                    Some(tree) => break tree,
                    None => continue,
                }
            };

            if !(block.has_more() && depth < options.max_depth) {
                push_finished(&mut stack, block);
                continue;
            }

            if !options.inter_request_delay.is_zero() {
                tokio::time::sleep(options.inter_request_delay).await;
            }

            request_count += 1;
            match self.source.children(block.id()).await {
                Ok(children) => {
                    max_depth_reached = max_depth_reached.max(depth + 1);
                    let children = retain_meaningful(children, options.include_empty);
                    log::debug!(
                        "Expanded block {} at depth {} ({} children)",
                        block.id(),
                        depth,
                        children.len()
                    );
                    stack.push(PendingLevel::new(Some(block), depth + 1, children));
                }
                Err(err) => {
                    if options.strict {
                        return Err(FetchError::Branch {
                            block_id: block.id().to_string(),
                            depth,
                            source: Box::new(err),
                        });
                    }
                    log::warn!(
                        "Failed to fetch children of block {} at depth {}: {}",
                        block.id(),
                        depth,
                        err
                    );
                    branch_failures.push(BranchFailure {
                        block_id: block.id().clone(),
                        depth,
                        message: err.to_string(),
                    });
                    push_finished(&mut stack, block);
                }
            }
        };

        let total_count = count_blocks(&tree);
        log::debug!(
            "Fetched {} blocks under {} ({} requests, depth {}, {} failed branches)",
            total_count,
            root_id,
            request_count,
            max_depth_reached,
            branch_failures.len()
        );

        Ok(FetchResult {
            tree,
            total_count,
            max_depth_reached,
            request_count,
            branch_failures,
        })
    }

    /// Flat mode: tree mode followed by a pre-order flattening in which each
    /// block is detached from its children.
    pub async fn fetch_flat(
        &self,
        root_id: &BlockId,
        options: &FetchOptions,
    ) -> Result<FlatFetchResult, FetchError> {
        let result = self.fetch_tree(root_id, options).await?;
        let stats = result.stats();
        Ok(FlatFetchResult {
            blocks: flatten_owned(result.tree),
            stats,
            branch_failures: result.branch_failures,
        })
    }
}

fn push_finished(stack: &mut [PendingLevel], block: Block) {
    if let Some(level) = stack.last_mut() {
        level.finished.push(block);
    }
}

/// Pops the exhausted top level and attaches its list to its parent block,
/// which then joins the level below. Returns the root list once the root
/// level itself is exhausted.
fn fold_finished_level(stack: &mut Vec<PendingLevel>) -> Option<Vec<Block>> {
    let done = stack.pop()?;
    match done.parent {
        None => Some(done.finished),
        Some(parent) => {
            let expanded = parent.with_children(done.finished);
            match stack.last_mut() {
                Some(level) => {
                    level.finished.push(expanded);
                    None
                }
                None => Some(vec![expanded]),
            }
        }
    }
}

/// Pre-order flattening that takes ownership, detaching every block.
fn flatten_owned(tree: Vec<Block>) -> Vec<Block> {
    let mut flat = Vec::new();
    let mut stack = vec![tree.into_iter()];
    while let Some(level) = stack.last_mut() {
        match level.next() {
            Some(block) => {
                let (block, children) = block.detach();
                flat.push(block);
                stack.push(children.into_iter());
            }
            None => {
                stack.pop();
            }
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<Block> {
        vec![
            Block::with_text("a", "paragraph", "a").with_children(vec![
                Block::with_text("a1", "paragraph", "a1")
                    .with_children(vec![Block::with_text("a1x", "paragraph", "a1x")]),
                Block::with_text("a2", "paragraph", "a2"),
            ]),
            Block::with_text("b", "paragraph", "b"),
        ]
    }

    #[test]
    fn flatten_owned_is_pre_order_and_detached() {
        let flat = flatten_owned(tree());
        let ids: Vec<&str> = flat.iter().map(|b| b.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "a1", "a1x", "a2", "b"]);
        assert!(flat.iter().all(|b| !b.is_expanded()));
    }

    #[test]
    fn folding_attaches_children_to_parent() {
        let parent = Block::with_text("p", "toggle", "p").with_has_more(true);
        let mut stack = vec![
            PendingLevel::new(None, 0, Vec::new()),
            PendingLevel::new(Some(parent), 1, Vec::new()),
        ];
        push_finished(&mut stack, Block::with_text("c", "paragraph", "c"));

        assert_eq!(fold_finished_level(&mut stack), None);
        let root = fold_finished_level(&mut stack).unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].children()[0].id().as_str(), "c");
        assert!(stack.is_empty());
    }
}
