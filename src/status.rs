// src/status.rs

//! Status message composition.
//!
//! Renders a paper into the multi-line announcement text. Every optional
//! field is included only when present in the source record; a field that
//! fails to parse is dropped from the message, never an error.

use chrono::{DateTime, NaiveDateTime};

use crate::models::Paper;

/// Build the announcement text for a single paper.
pub fn build_status(paper: &Paper, hashtags: &[String]) -> String {
    let mut lines = vec![format!("🗂️ Titel: \"{}\"", paper.title())];

    if let Some(paper_type) = &paper.paper_type {
        lines.push(format!("📄 Typ: {}", paper_type));
    }

    if let Some(raw) = &paper.created {
        match format_created(raw) {
            Some(created) => lines.push(format!("📅 Bereitgestellt am: {}", created)),
            None => log::warn!("Invalid creation timestamp: {}", raw),
        }
    }

    if let Some(web) = &paper.web {
        lines.push(format!("🔗 ALLRIS: {}", web));
    }

    if let Some(access_url) = paper.access_url() {
        lines.push(format!("🌐 PDF: {}", access_url));
    }

    if !hashtags.is_empty() {
        lines.push(hashtags.join(" "));
    }

    lines.join("\n")
}

/// Parse an ISO-8601 timestamp and render it as `DD.MM.YYYY HH:MM`.
///
/// Accepts both offset-carrying and naive timestamps; returns None when the
/// value parses as neither.
fn format_created(raw: &str) -> Option<String> {
    let formatted = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        dt.format("%d.%m.%Y %H:%M")
    } else {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .ok()?
            .format("%d.%m.%Y %H:%M")
    };
    Some(formatted.to_string())
}
