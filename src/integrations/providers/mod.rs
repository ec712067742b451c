pub mod openrouter;
pub mod rss;

pub use openrouter::OpenRouterSummarizer;
pub use rss::RssFeedSource;
