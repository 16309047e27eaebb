//! Storage abstraction for the publish watermark.
//!
//! The watermark is the highest paper id successfully posted. It is read
//! once per run and advanced after every successful post, so a crash loses
//! at most the in-flight paper.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::FileWatermarkStore;

/// Trait for watermark persistence backends.
#[async_trait]
pub trait WatermarkStore: Send + Sync {
    /// Load the stored watermark.
    ///
    /// Returns 0 when no prior state exists or the stored value is
    /// unreadable; never fails.
    async fn load(&self) -> u64;

    /// Persist a new watermark, overwriting the previous value.
    async fn save(&self, id: u64) -> Result<()>;
}
