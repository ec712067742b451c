use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Per-source deadline used by `fetch_all`.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// A single content item pulled from a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Plain text; markup is stripped by the source.
    pub summary: String,
    pub published: Option<DateTime<Utc>>,
    /// Name of the feed this item came from.
    pub source: String,
    /// Platform the feed is filed under.
    pub platform: String,
}

/// Errors that can occur while fetching a feed.
#[derive(Debug)]
pub enum FeedError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-success status.
    Http { status: u16 },
    /// The body was not a feed we understand.
    Parse(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "network error: {msg}"),
            FeedError::Http { status } => write!(f, "feed returned HTTP {status}"),
            FeedError::Parse(msg) => write!(f, "feed parse error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

#[async_trait]
pub trait ContentFeedSource: Send + Sync {
    /// Display name of the feed.
    fn name(&self) -> &str;

    /// Fetches the current items, newest first.
    async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError>;
}

/// Outcome of fetching several sources at once.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub items: Vec<FeedItem>,
    /// One message per failed source.
    pub errors: Vec<String>,
}

/// Fetches every source concurrently. A failing or slow source is reported
/// in `errors` and does not hide the others.
pub async fn fetch_all(sources: &[Arc<dyn ContentFeedSource>], timeout: Duration) -> FetchReport {
    let fetches = sources.iter().map(|source| async move {
        let result = tokio::time::timeout(timeout, source.fetch()).await;
        (source.name().to_string(), result)
    });

    let mut report = FetchReport::default();
    for (name, result) in futures::future::join_all(fetches).await {
        match result {
            Ok(Ok(items)) => {
                info!("Feed '{}' returned {} items", name, items.len());
                report.items.extend(items);
            }
            Ok(Err(e)) => {
                warn!("Feed '{}' failed: {}", name, e);
                report.errors.push(format!("{name}: {e}"));
            }
            Err(_) => {
                warn!("Feed '{}' timed out after {:?}", name, timeout);
                report.errors.push(format!("{name}: timed out"));
            }
        }
    }

    sort_newest_first(&mut report.items);
    report
}

/// Undated items sink to the bottom, keeping their relative order.
pub fn sort_newest_first(items: &mut [FeedItem]) {
    items.sort_by(|a, b| b.published.cmp(&a.published));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StaticFeed, feed_item};

    struct BrokenFeed;

    #[async_trait]
    impl ContentFeedSource for BrokenFeed {
        fn name(&self) -> &str {
            "broken"
        }

        async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError> {
            Err(FeedError::Http { status: 503 })
        }
    }

    struct SlowFeed;

    #[async_trait]
    impl ContentFeedSource for SlowFeed {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_sort_newest_first_puts_undated_last() {
        let mut items = vec![
            feed_item("undated", None),
            feed_item("old", Some("2024-01-01T00:00:00Z")),
            feed_item("new", Some("2025-06-01T00:00:00Z")),
        ];
        sort_newest_first(&mut items);
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old", "undated"]);
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_good_feeds_when_one_fails() {
        let sources: Vec<Arc<dyn ContentFeedSource>> = vec![
            Arc::new(StaticFeed::new("good", vec![feed_item("a", None)])),
            Arc::new(BrokenFeed),
        ];
        let report = fetch_all(&sources, FETCH_TIMEOUT).await;
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("broken:"));
        assert!(report.errors[0].contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_all_reports_timeouts() {
        let sources: Vec<Arc<dyn ContentFeedSource>> = vec![Arc::new(SlowFeed)];
        let report = fetch_all(&sources, Duration::from_millis(20)).await;
        assert!(report.items.is_empty());
        assert_eq!(report.errors, vec!["slow: timed out".to_string()]);
    }
}
