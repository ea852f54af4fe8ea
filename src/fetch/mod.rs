// src/fetch/mod.rs
//! Recursive, depth- and rate-bounded retrieval of block trees.

mod fetcher;
pub mod filter;
mod types;

pub use fetcher::TreeFetcher;
pub use filter::is_meaningful;
pub use types::{BranchFailure, FetchOptions, FetchResult, FetchStats, FlatFetchResult};
