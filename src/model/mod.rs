// src/model/mod.rs
//! Domain entities: pages and the block trees that make up their content.

mod block;
mod page;
pub mod rich_text;

pub use block::Block;
pub use page::Page;
