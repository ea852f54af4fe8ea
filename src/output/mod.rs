// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! Planning (which files, with what names) is pure; `deliver` is the only
//! function that performs I/O.

mod paths;
mod types;
mod writer;

pub use paths::{artifact_filename, id_prefix, slugify, unique_filename};
pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan,
    OutputReport,
};
pub use writer::deliver;
