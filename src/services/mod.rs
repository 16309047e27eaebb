// src/services/mod.rs

//! External service clients.

pub mod mastodon;
pub mod papers;

pub use mastodon::{MastodonClient, StatusPublisher};
pub use papers::{OparlClient, PaperSource};
