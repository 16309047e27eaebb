// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable supplying the Mastodon access token.
pub const ENV_ACCESS_TOKEN: &str = "MASTODON_ACCESS_TOKEN";

/// Environment variable supplying the Mastodon instance base URL.
pub const ENV_INSTANCE_URL: &str = "MASTODON_INSTANCE_URL";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Paper-listing API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Mastodon account settings
    #[serde(default)]
    pub mastodon: MastodonConfig,

    /// Posting behavior settings
    #[serde(default)]
    pub bot: BotConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply environment overrides for the Mastodon account.
    ///
    /// The access token never lives in the config file on a real deployment;
    /// it arrives through the environment.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(ENV_ACCESS_TOKEN) {
            self.mastodon.access_token = token;
        }
        if let Ok(url) = std::env::var(ENV_INSTANCE_URL) {
            self.mastodon.instance_url = url;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.papers_url.trim().is_empty() {
            return Err(AppError::validation("api.papers_url is empty"));
        }
        url::Url::parse(&self.api.papers_url)
            .map_err(|e| AppError::validation(format!("api.papers_url is invalid: {e}")))?;
        if self.api.window_hours == 0 {
            return Err(AppError::validation("api.window_hours must be > 0"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        url::Url::parse(&self.mastodon.instance_url)
            .map_err(|e| AppError::validation(format!("mastodon.instance_url is invalid: {e}")))?;
        if self.bot.state_file.trim().is_empty() {
            return Err(AppError::validation("bot.state_file is empty"));
        }
        Ok(())
    }
}

/// Paper-listing API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// OParl papers endpoint
    #[serde(default = "defaults::papers_url")]
    pub papers_url: String,

    /// Trailing window for the created filter, in hours
    #[serde(default = "defaults::window_hours")]
    pub window_hours: u64,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            papers_url: defaults::papers_url(),
            window_hours: defaults::window_hours(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Mastodon account settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MastodonConfig {
    /// Instance base URL
    #[serde(default = "defaults::instance_url")]
    pub instance_url: String,

    /// Access token; normally supplied via `MASTODON_ACCESS_TOKEN`
    #[serde(default)]
    pub access_token: String,
}

impl Default for MastodonConfig {
    fn default() -> Self {
        Self {
            instance_url: defaults::instance_url(),
            access_token: String::new(),
        }
    }
}

/// Posting behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// File holding the highest posted paper id
    #[serde(default = "defaults::state_file")]
    pub state_file: String,

    /// Pause between posts in seconds
    #[serde(default = "defaults::post_delay")]
    pub post_delay_secs: u64,

    /// Hashtag line appended to every status
    #[serde(default = "defaults::hashtags")]
    pub hashtags: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            state_file: defaults::state_file(),
            post_delay_secs: defaults::post_delay(),
            hashtags: defaults::hashtags(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn papers_url() -> String {
        "https://ratsinformation.leipzig.de/allris_leipzig_public/oparl/papers".into()
    }
    pub fn window_hours() -> u64 {
        24
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; ratsinfo-bot/0.1)".into()
    }

    // Mastodon defaults
    pub fn instance_url() -> String {
        "https://gruene.social".into()
    }

    // Bot defaults
    pub fn state_file() -> String {
        "last_posted_id.txt".into()
    }
    pub fn post_delay() -> u64 {
        60
    }
    pub fn hashtags() -> Vec<String> {
        vec!["#leipzig".into(), "#leipzigerstadtrat".into()]
    }
}
