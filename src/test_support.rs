//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::app::App;
use crate::core::shell::{PageConfig, RenderHost};
use crate::core::state::{SessionDefaults, SessionState};
use crate::integrations::{
    ContentFeedSource, DisabledSummarizer, FeedError, FeedItem,
};

/// A host that remembers everything the shell sent it.
#[derive(Default)]
pub struct RecordingHost {
    pub configs: Vec<PageConfig>,
    pub styles: Vec<String>,
}

impl RenderHost for RecordingHost {
    fn set_page_config(&mut self, config: &PageConfig) {
        self.configs.push(config.clone());
    }

    fn inject_styles(&mut self, css: &str) {
        self.styles.push(css.to_string());
    }
}

/// A feed that always returns the same items.
pub struct StaticFeed {
    name: String,
    items: Vec<FeedItem>,
}

impl StaticFeed {
    pub fn new(name: &str, items: Vec<FeedItem>) -> Self {
        Self {
            name: name.to_string(),
            items,
        }
    }
}

#[async_trait]
impl ContentFeedSource for StaticFeed {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError> {
        Ok(self.items.clone())
    }
}

/// Builds a feed item on the default platform. `published` is RFC 3339.
pub fn feed_item(title: &str, published: Option<&str>) -> FeedItem {
    FeedItem {
        title: title.to_string(),
        link: format!("https://example.com/{}", title.replace(' ', "-")),
        summary: format!("Body of {title}"),
        published: published.map(|p| {
            DateTime::parse_from_rfc3339(p)
                .expect("valid RFC 3339 timestamp")
                .with_timezone(&Utc)
        }),
        source: "test-feed".to_string(),
        platform: "Home".to_string(),
    }
}

/// Creates a test App with no feeds and a disabled summarizer.
pub fn test_app() -> App {
    App::new(
        SessionState::new(),
        SessionDefaults::default(),
        Vec::new(),
        Vec::new(),
        Arc::new(DisabledSummarizer::new("disabled in tests")),
    )
}

/// Creates a test App with a single static feed.
pub fn test_app_with_feed(items: Vec<FeedItem>) -> App {
    let mut app = test_app();
    app.sources = vec![Arc::new(StaticFeed::new("static", items))];
    app
}
