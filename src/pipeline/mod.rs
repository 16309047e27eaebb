//! Pipeline entry point for bot operations.
//!
//! - `run_publish`: Fetch recent papers, filter against the watermark, post

pub mod publish;

pub use publish::{PublishOutcome, run_publish};
