// src/pipeline/publish.rs

//! Publishing pipeline.
//!
//! One linear pass per invocation: fetch recent papers, drop everything at
//! or below the watermark, post the rest oldest-first, persisting the
//! watermark after every successful post.

use std::time::Duration;

use crate::config::Config;
use crate::models::Paper;
use crate::services::{PaperSource, StatusPublisher};
use crate::status::build_status;
use crate::storage::WatermarkStore;
use crate::utils::url::extract_paper_id;

/// Summary of a publish run.
#[derive(Debug, Default)]
pub struct PublishOutcome {
    /// Papers returned by the source
    pub fetched: usize,
    /// Papers at or below the watermark
    pub skipped: usize,
    /// Papers posted successfully
    pub published: usize,
    /// Papers whose post attempt failed
    pub failed: usize,
    /// Watermark after the run
    pub watermark: u64,
    /// The source itself failed; nothing was attempted
    pub fetch_failed: bool,
}

/// Run one full fetch-filter-publish cycle.
///
/// Papers are posted in ascending id order, so older eligible papers are
/// always announced before newer ones regardless of feed order. A failed
/// post does not advance the watermark; the paper is retried on the next
/// run.
pub async fn run_publish(
    config: &Config,
    source: &dyn PaperSource,
    publisher: &dyn StatusPublisher,
    store: &dyn WatermarkStore,
) -> PublishOutcome {
    let mut outcome = PublishOutcome::default();

    let mut watermark = store.load().await;
    outcome.watermark = watermark;

    let papers = match source.fetch_recent().await {
        Ok(papers) => papers,
        Err(e) => {
            log::error!("Aborting run, paper fetch failed: {}", e);
            outcome.fetch_failed = true;
            return outcome;
        }
    };
    outcome.fetched = papers.len();

    // Keep only papers beyond the watermark, oldest first.
    let mut pending: Vec<(u64, &Paper)> = Vec::new();
    for paper in &papers {
        let id = extract_paper_id(&paper.id);
        if id <= watermark {
            log::debug!(
                "Skipping \"{}\" (id {} <= watermark {})",
                paper.title(),
                id,
                watermark
            );
            outcome.skipped += 1;
            continue;
        }
        pending.push((id, paper));
    }
    pending.sort_by_key(|(id, _)| *id);

    log::info!("{} new paper(s) to post", pending.len());

    let delay = Duration::from_secs(config.bot.post_delay_secs);
    for (id, paper) in pending {
        let status = build_status(paper, &config.bot.hashtags);

        match publisher.post_status(&status).await {
            Ok(()) => {
                if let Err(e) = store.save(id).await {
                    log::error!("Failed to save watermark {}: {}", id, e);
                }
                watermark = id;
                outcome.published += 1;
                log::info!("Posted \"{}\" (id {})", paper.title(), id);
            }
            Err(e) => {
                outcome.failed += 1;
                log::error!("Failed to post paper with id {}: {}", id, e);
            }
        }

        // Pacing between posts, required by the instance rate limit.
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    outcome.watermark = watermark;
    outcome
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::{AppError, Result};

    fn make_paper(id: u64) -> Paper {
        Paper {
            id: format!("https://example.com/vo0050.asp?id={}", id),
            name: Some(format!("Vorlage {}", id)),
            ..Paper::default()
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.bot.post_delay_secs = 0;
        config
    }

    /// Source returning a fixed list, or an error when `papers` is None.
    struct StubSource {
        papers: Option<Vec<Paper>>,
    }

    #[async_trait]
    impl PaperSource for StubSource {
        async fn fetch_recent(&self) -> Result<Vec<Paper>> {
            match &self.papers {
                Some(papers) => Ok(papers.clone()),
                None => Err(AppError::Io(std::io::Error::other("connection refused"))),
            }
        }
    }

    /// Publisher recording every accepted status; fails when the status
    /// contains the configured marker.
    #[derive(Default)]
    struct RecordingPublisher {
        posted: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl StatusPublisher for RecordingPublisher {
        async fn post_status(&self, text: &str) -> Result<()> {
            if let Some(marker) = &self.fail_on {
                if text.contains(marker.as_str()) {
                    return Err(AppError::publish("statuses", "503 Service Unavailable"));
                }
            }
            self.posted.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct MemoryStore {
        value: AtomicU64,
        fail_saves: bool,
    }

    impl MemoryStore {
        fn at(value: u64) -> Self {
            Self {
                value: AtomicU64::new(value),
                fail_saves: false,
            }
        }
    }

    #[async_trait]
    impl WatermarkStore for MemoryStore {
        async fn load(&self) -> u64 {
            self.value.load(Ordering::SeqCst)
        }

        async fn save(&self, id: u64) -> Result<()> {
            if self.fail_saves {
                return Err(AppError::Io(std::io::Error::other("read-only file system")));
            }
            self.value.store(id, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_publishes_beyond_watermark_in_ascending_order() {
        let source = StubSource {
            papers: Some(vec![make_paper(7), make_paper(3), make_paper(9)]),
        };
        let publisher = RecordingPublisher::default();
        let store = MemoryStore::at(5);

        let outcome = run_publish(&test_config(), &source, &publisher, &store).await;

        let posted = publisher.posted.lock().unwrap();
        assert_eq!(posted.len(), 2);
        assert!(posted[0].contains("Vorlage 7"));
        assert!(posted[1].contains("Vorlage 9"));

        assert_eq!(outcome.fetched, 3);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.published, 2);
        assert_eq!(outcome.failed, 0);
        assert_eq!(outcome.watermark, 9);
        assert_eq!(store.load().await, 9);
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_run() {
        let source = StubSource { papers: None };
        let publisher = RecordingPublisher::default();
        let store = MemoryStore::at(5);

        let outcome = run_publish(&test_config(), &source, &publisher, &store).await;

        assert!(outcome.fetch_failed);
        assert_eq!(outcome.published, 0);
        assert!(publisher.posted.lock().unwrap().is_empty());
        assert_eq!(store.load().await, 5);
        assert_eq!(outcome.watermark, 5);
    }

    #[tokio::test]
    async fn test_failed_post_does_not_advance_watermark() {
        let source = StubSource {
            papers: Some(vec![make_paper(7), make_paper(9)]),
        };
        let publisher = RecordingPublisher {
            fail_on: Some("Vorlage 9".into()),
            ..RecordingPublisher::default()
        };
        let store = MemoryStore::at(5);

        let outcome = run_publish(&test_config(), &source, &publisher, &store).await;

        assert_eq!(outcome.published, 1);
        assert_eq!(outcome.failed, 1);
        assert_eq!(store.load().await, 7);
    }

    #[tokio::test]
    async fn test_unparsable_id_skipped_once_watermark_positive() {
        let paper = Paper {
            id: "https://example.com/vo0050.asp?mode=view".into(),
            name: Some("Ohne Kennung".into()),
            ..Paper::default()
        };
        let source = StubSource {
            papers: Some(vec![paper]),
        };
        let publisher = RecordingPublisher::default();
        let store = MemoryStore::at(1);

        let outcome = run_publish(&test_config(), &source, &publisher, &store).await;

        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.published, 0);
        assert!(publisher.posted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_watermark_save_failure_does_not_stop_run() {
        let source = StubSource {
            papers: Some(vec![make_paper(7), make_paper(9)]),
        };
        let publisher = RecordingPublisher::default();
        let store = MemoryStore {
            value: AtomicU64::new(5),
            fail_saves: true,
        };

        let outcome = run_publish(&test_config(), &source, &publisher, &store).await;

        assert_eq!(outcome.published, 2);
        assert_eq!(outcome.watermark, 9);
        // Persisted state is stale, next run re-filters from the old value.
        assert_eq!(store.load().await, 5);
    }

    #[tokio::test]
    async fn test_empty_fetch_publishes_nothing() {
        let source = StubSource {
            papers: Some(Vec::new()),
        };
        let publisher = RecordingPublisher::default();
        let store = MemoryStore::at(5);

        let outcome = run_publish(&test_config(), &source, &publisher, &store).await;

        assert!(!outcome.fetch_failed);
        assert_eq!(outcome.fetched, 0);
        assert_eq!(outcome.published, 0);
        assert_eq!(outcome.watermark, 5);
    }
}
