// src/services/papers.rs

//! Paper-listing API client.
//!
//! Fetches papers created within a trailing time window from the OParl
//! papers endpoint. No pagination, no caching, no retry.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;

use crate::config::ApiConfig;
use crate::error::Result;
use crate::models::{Paper, PaperListing};

/// Source of recently created papers.
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Fetch papers created within the trailing window.
    async fn fetch_recent(&self) -> Result<Vec<Paper>>;
}

/// HTTP client for the OParl papers endpoint.
pub struct OparlClient {
    config: ApiConfig,
    client: Client,
}

impl OparlClient {
    /// Create a new client with the given API configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Request URL with the `filter[created]` window applied.
    fn request_url(&self, since: &str) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.config.papers_url)?;
        url.query_pairs_mut().append_pair("filter[created]", since);
        Ok(url)
    }

    async fn fetch(&self) -> Result<Vec<Paper>> {
        let since = (Utc::now() - chrono::Duration::hours(self.config.window_hours as i64))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();
        let url = self.request_url(&since)?;

        log::info!("Fetching recent papers from {}", url);
        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let listing: PaperListing = serde_json::from_str(&text)?;
        Ok(listing.data)
    }
}

#[async_trait]
impl PaperSource for OparlClient {
    /// Fetch recent papers, degrading to an empty list on any failure.
    ///
    /// A failed poll only means this run finds nothing new; the next
    /// scheduled invocation covers the same window again.
    async fn fetch_recent(&self) -> Result<Vec<Paper>> {
        match self.fetch().await {
            Ok(papers) => {
                log::info!("Fetched {} paper(s)", papers.len());
                Ok(papers)
            }
            Err(e) => {
                log::error!("Failed to fetch papers: {}", e);
                Ok(Vec::new())
            }
        }
    }
}
