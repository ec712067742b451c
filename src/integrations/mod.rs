//! # External Collaborators
//!
//! Network-facing services the dashboard consumes. Each sits behind a trait
//! so the core and the views can be tested without a network.
//!
//! - [`feed`]: `ContentFeedSource`, where content items come from
//! - [`summarize`]: `SummarizationService`, LLM summaries of single items

pub mod feed;
pub mod providers;
pub mod summarize;

pub use feed::{ContentFeedSource, FeedError, FeedItem, FetchReport, fetch_all};
pub use providers::{OpenRouterSummarizer, RssFeedSource};
pub use summarize::{
    DisabledSummarizer, SummarizationService, SummarizeError, summarize_with_retry,
};
