// src/fetch/types.rs
//! Options and results of a block-tree traversal.

use crate::constants::{DEFAULT_INTER_REQUEST_DELAY_MS, DEFAULT_MAX_FETCH_DEPTH};
use crate::model::Block;
use crate::types::BlockId;
use serde::Serialize;
use std::time::Duration;

/// Knobs for one traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Nodes at this depth are never expanded. Depth 0 is the root's children.
    pub max_depth: usize,
    /// Keep blank text blocks. When false they are dropped before traversal.
    pub include_empty: bool,
    /// Pause before each nested children request. Zero disables it.
    pub inter_request_delay: Duration,
    /// Turn the first branch failure into a fatal error.
    pub strict: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_FETCH_DEPTH,
            include_empty: true,
            inter_request_delay: Duration::from_millis(DEFAULT_INTER_REQUEST_DELAY_MS),
            strict: false,
        }
    }
}

impl FetchOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_include_empty(mut self, include_empty: bool) -> Self {
        self.include_empty = include_empty;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.inter_request_delay = delay;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// A non-root children request that failed and was absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchFailure {
    /// The block left without children.
    pub block_id: BlockId,
    /// Depth of that block (its children would have sat one level deeper).
    pub depth: usize,
    pub message: String,
}

/// Counters describing one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    pub total_count: usize,
    pub max_depth_reached: usize,
    pub request_count: usize,
    pub failed_branches: usize,
}

/// Output of tree mode.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub tree: Vec<Block>,
    pub total_count: usize,
    pub max_depth_reached: usize,
    pub request_count: usize,
    pub branch_failures: Vec<BranchFailure>,
}

impl FetchResult {
    pub fn stats(&self) -> FetchStats {
        FetchStats {
            total_count: self.total_count,
            max_depth_reached: self.max_depth_reached,
            request_count: self.request_count,
            failed_branches: self.branch_failures.len(),
        }
    }

    /// True when every attempted children request succeeded.
    pub fn is_complete(&self) -> bool {
        self.branch_failures.is_empty()
    }
}

/// Output of flat mode: pre-order blocks, each detached from its children.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatFetchResult {
    pub blocks: Vec<Block>,
    pub stats: FetchStats,
    pub branch_failures: Vec<BranchFailure>,
}
