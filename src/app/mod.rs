pub mod api;
pub mod cli;
pub mod config;
mod context;
pub mod tasks;
pub mod workflow;

pub use context::{AppContext, PlatformContext};
