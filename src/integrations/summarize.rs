use std::fmt;

use async_trait::async_trait;
use log::warn;

use super::feed::FeedItem;

/// Errors that can occur while summarizing.
/// Variants carry enough info to decide whether a retry makes sense.
#[derive(Debug)]
pub enum SummarizeError {
    /// Service misconfigured (missing API key, bad URL). Not retryable.
    Config(String),
    /// Network-level failure. Retryable.
    Network(String),
    /// API returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the response. Not retryable.
    Parse(String),
}

impl SummarizeError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SummarizeError::Network(_) => true,
            SummarizeError::Api { status, .. } => *status >= 500 || *status == 429,
            SummarizeError::Config(_) | SummarizeError::Parse(_) => false,
        }
    }
}

impl fmt::Display for SummarizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummarizeError::Config(msg) => write!(f, "config error: {msg}"),
            SummarizeError::Network(msg) => write!(f, "network error: {msg}"),
            SummarizeError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SummarizeError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SummarizeError {}

#[async_trait]
pub trait SummarizationService: Send + Sync {
    fn name(&self) -> &str;

    /// Produces a short plain-text summary of one item.
    async fn summarize(&self, item: &FeedItem) -> Result<String, SummarizeError>;
}

/// Stand-in used when no API key is configured.
pub struct DisabledSummarizer {
    reason: String,
}

impl DisabledSummarizer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SummarizationService for DisabledSummarizer {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn summarize(&self, _item: &FeedItem) -> Result<String, SummarizeError> {
        Err(SummarizeError::Config(self.reason.clone()))
    }
}

/// Calls `summarizer` up to `attempts` times, retrying only retryable errors.
pub async fn summarize_with_retry(
    summarizer: &dyn SummarizationService,
    item: &FeedItem,
    attempts: u32,
) -> Result<String, SummarizeError> {
    let mut attempt = 1;
    loop {
        match summarizer.summarize(item).await {
            Err(e) if e.is_retryable() && attempt < attempts => {
                warn!(
                    "Summary attempt {}/{} via {} failed: {}",
                    attempt,
                    attempts,
                    summarizer.name(),
                    e
                );
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Builds the user prompt sent to the model for one item.
pub fn item_prompt(item: &FeedItem) -> String {
    let mut prompt = format!("Title: {}\nSource: {}\n", item.title, item.source);
    if let Some(published) = item.published {
        prompt.push_str(&format!("Published: {}\n", published.to_rfc3339()));
    }
    if !item.link.is_empty() {
        prompt.push_str(&format!("Link: {}\n", item.link));
    }
    prompt.push('\n');
    prompt.push_str(item.summary.trim());
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::feed_item;
    use std::sync::Mutex;

    /// Hands out queued results in order, then succeeds.
    struct ScriptedSummarizer {
        results: Mutex<Vec<Result<String, SummarizeError>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedSummarizer {
        fn new(mut results: Vec<Result<String, SummarizeError>>) -> Self {
            results.reverse();
            Self {
                results: Mutex::new(results),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl SummarizationService for ScriptedSummarizer {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn summarize(&self, _item: &FeedItem) -> Result<String, SummarizeError> {
            *self.calls.lock().unwrap() += 1;
            self.results.lock().unwrap().pop().unwrap_or(Ok("done".into()))
        }
    }

    #[test]
    fn test_disabled_summarizer_returns_config_error() {
        let summarizer = DisabledSummarizer::new("no API key");
        let item = feed_item("x", None);
        let result = tokio_test::block_on(summarizer.summarize(&item));
        match result {
            Err(SummarizeError::Config(msg)) => assert_eq!(msg, "no API key"),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_retryable_classification() {
        assert!(SummarizeError::Network("reset".into()).is_retryable());
        assert!(SummarizeError::Api { status: 429, message: String::new() }.is_retryable());
        assert!(SummarizeError::Api { status: 502, message: String::new() }.is_retryable());
        assert!(!SummarizeError::Api { status: 401, message: String::new() }.is_retryable());
        assert!(!SummarizeError::Parse("bad".into()).is_retryable());
    }

    #[test]
    fn test_retry_recovers_from_transient_error() {
        let summarizer = ScriptedSummarizer::new(vec![Err(SummarizeError::Network("reset".into()))]);
        let item = feed_item("x", None);
        let result = tokio_test::block_on(summarize_with_retry(&summarizer, &item, 2));
        assert_eq!(result.unwrap(), "done");
        assert_eq!(summarizer.calls(), 2);
    }

    #[test]
    fn test_retry_stops_on_permanent_error() {
        let summarizer = ScriptedSummarizer::new(vec![Err(SummarizeError::Api {
            status: 401,
            message: "Unauthorized".into(),
        })]);
        let item = feed_item("x", None);
        let result = tokio_test::block_on(summarize_with_retry(&summarizer, &item, 3));
        assert!(matches!(result, Err(SummarizeError::Api { status: 401, .. })));
        assert_eq!(summarizer.calls(), 1);
    }

    #[test]
    fn test_retry_gives_up_after_attempts() {
        let summarizer = ScriptedSummarizer::new(vec![
            Err(SummarizeError::Api { status: 503, message: String::new() }),
            Err(SummarizeError::Api { status: 503, message: String::new() }),
        ]);
        let item = feed_item("x", None);
        let result = tokio_test::block_on(summarize_with_retry(&summarizer, &item, 2));
        assert!(matches!(result, Err(SummarizeError::Api { status: 503, .. })));
        assert_eq!(summarizer.calls(), 2);
    }

    #[test]
    fn test_item_prompt_includes_metadata() {
        let item = feed_item("Court rules on appeal", Some("2025-03-04T10:00:00Z"));
        let prompt = item_prompt(&item);
        assert!(prompt.starts_with("Title: Court rules on appeal\nSource: test-feed\n"));
        assert!(prompt.contains("Published: 2025-03-04T10:00:00+00:00"));
        assert!(prompt.ends_with("Body of Court rules on appeal"));
    }
}
