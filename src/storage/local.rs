//! Local file watermark storage.
//!
//! The state file holds the decimal watermark integer and nothing else.
//! Single-instance execution is assumed; there is no file locking.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::storage::WatermarkStore;

/// Watermark store backed by a single text file.
#[derive(Debug, Clone)]
pub struct FileWatermarkStore {
    path: PathBuf,
}

impl FileWatermarkStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl WatermarkStore for FileWatermarkStore {
    async fn load(&self) -> u64 {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("State file {:?} does not exist, starting at 0", self.path);
                return 0;
            }
            Err(e) => {
                log::error!("Failed to read state file {:?}: {}", self.path, e);
                return 0;
            }
        };

        match content.trim().parse::<u64>() {
            Ok(id) => {
                log::info!("Loaded watermark {} from {:?}", id, self.path);
                id
            }
            Err(e) => {
                log::error!("Unparsable watermark in {:?}: {}", self.path, e);
                0
            }
        }
    }

    async fn save(&self, id: u64) -> Result<()> {
        self.write_bytes(id.to_string().as_bytes()).await?;
        log::info!("Saved watermark {} to {:?}", id, self.path);
        Ok(())
    }
}
