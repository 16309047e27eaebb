// src/services/mastodon.rs

//! Mastodon status publishing client.
//!
//! A thin wrapper over the single "post text status" operation. Rate-limit
//! pacing lives in the publish pipeline, not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::MastodonConfig;
use crate::error::{AppError, Result};

const POST_TIMEOUT_SECS: u64 = 30;

/// Publisher of status messages.
#[async_trait]
pub trait StatusPublisher: Send + Sync {
    /// Post a single text status.
    async fn post_status(&self, text: &str) -> Result<()>;
}

/// HTTP client for the Mastodon status API.
pub struct MastodonClient {
    config: MastodonConfig,
    client: Client,
}

impl MastodonClient {
    /// Create a new client for the configured instance.
    pub fn new(config: MastodonConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ratsinfo-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(POST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { config, client })
    }

    /// Endpoint for posting statuses on the configured instance.
    fn statuses_url(&self) -> String {
        format!(
            "{}/api/v1/statuses",
            self.config.instance_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl StatusPublisher for MastodonClient {
    async fn post_status(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.statuses_url())
            .bearer_auth(&self.config.access_token)
            .form(&[("status", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::publish(
                "statuses",
                format!("{}: {}", status, body.trim()),
            ));
        }

        Ok(())
    }
}
