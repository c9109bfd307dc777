//! The two platform tasks that make up the workflow.

pub mod finalize;
pub mod initialize;
pub mod runtime;

pub use finalize::{FinalizeOutcome, SkipReason};
