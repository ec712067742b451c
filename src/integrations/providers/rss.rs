//! RSS 2.0 feed source.
//!
//! Fetches the document with reqwest and maps `<channel><item>` elements into
//! `FeedItem`s. Descriptions are reduced to plain text and `pubDate` is read
//! as RFC 2822.

use std::borrow::Cow;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use serde::Deserialize;

use crate::integrations::feed::{ContentFeedSource, FeedError, FeedItem, sort_newest_first};

// ============================================================================
// RSS Document Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct RssDocument {
    channel: RssChannel,
}

#[derive(Deserialize, Debug)]
struct RssChannel {
    #[serde(default)]
    title: String,
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Deserialize, Debug)]
struct RssItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "pubDate", default)]
    pub_date: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Removes markup, decodes entities and collapses whitespace.
///
/// A `<` only opens a tag when a letter, `/` or `!` follows it, so prose
/// like "a < b" survives. Entities are decoded after tags are gone, once.
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' if !in_tag
                && chars
                    .peek()
                    .is_some_and(|n| n.is_ascii_alphabetic() || *n == '/' || *n == '!') =>
            {
                in_tag = true;
            }
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    let decoded = decode_entities(&out);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes numeric references and HTML5 named entities. Text with a bare
/// `&` or an unknown entity is returned as-is.
fn decode_entities(text: &str) -> Cow<'_, str> {
    match unescape_with(text, resolve_html5_entity) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("Leaving entities undecoded: {}", e);
            Cow::Borrowed(text)
        }
    }
}

fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc2822(raw.trim()) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            debug!("Unparseable pubDate {:?}: {}", raw, e);
            None
        }
    }
}

/// Parses an RSS 2.0 document into items, newest first.
pub fn parse_rss(body: &str, source: &str, platform: &str) -> Result<Vec<FeedItem>, FeedError> {
    let doc: RssDocument =
        quick_xml::de::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))?;
    debug!(
        "Parsed channel {:?} with {} items",
        doc.channel.title,
        doc.channel.items.len()
    );

    let mut items: Vec<FeedItem> = doc
        .channel
        .items
        .into_iter()
        .filter(|item| !item.title.trim().is_empty() || !item.link.trim().is_empty())
        .map(|item| FeedItem {
            title: strip_html(&item.title),
            link: item.link.trim().to_string(),
            summary: strip_html(&item.description),
            published: item.pub_date.as_deref().and_then(parse_pub_date),
            source: source.to_string(),
            platform: platform.to_string(),
        })
        .collect();

    sort_newest_first(&mut items);
    Ok(items)
}

// ============================================================================
// Source Implementation
// ============================================================================

pub struct RssFeedSource {
    name: String,
    url: String,
    platform: String,
    client: reqwest::Client,
}

impl RssFeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            platform: platform.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ContentFeedSource for RssFeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<FeedItem>, FeedError> {
        info!("Fetching feed '{}' from {}", self.name, self.url);

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, concat!("shorthand/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Feed '{}' returned HTTP {}", self.name, status);
            return Err(FeedError::Http { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        debug!("Feed '{}' body: {} bytes", self.name, body.len());

        parse_rss(&body, &self.name, &self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Legal Wire</title>
    <link>https://example.com</link>
    <description>Latest cases</description>
    <item>
      <title>Older story</title>
      <link>https://example.com/older</link>
      <description><![CDATA[<p>First <b>paragraph</b></p>]]></description>
      <pubDate>Mon, 03 Mar 2025 09:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Newer story</title>
      <link> https://example.com/newer </link>
      <description>Plain &amp; simple</description>
      <pubDate>Tue, 04 Mar 2025 09:00:00 +0000</pubDate>
    </item>
    <item>
      <title>No date</title>
      <link>https://example.com/nodate</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_rss_orders_newest_first() {
        let items = parse_rss(SAMPLE, "wire", "Home").unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer story", "Older story", "No date"]);
        assert_eq!(items[0].link, "https://example.com/newer");
        assert_eq!(items[0].source, "wire");
        assert_eq!(items[0].platform, "Home");
    }

    #[test]
    fn test_parse_rss_strips_markup() {
        let items = parse_rss(SAMPLE, "wire", "Home").unwrap();
        let older = items.iter().find(|i| i.title == "Older story").unwrap();
        assert_eq!(older.summary, "First paragraph");
        let newer = items.iter().find(|i| i.title == "Newer story").unwrap();
        assert_eq!(newer.summary, "Plain & simple");
    }

    #[test]
    fn test_parse_rss_rejects_garbage() {
        let result = parse_rss("this is not xml", "wire", "Home");
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_strip_html_collapses_whitespace() {
        assert_eq!(strip_html("<div>\n  a   <br/>b\n</div>"), "a b");
    }

    #[test]
    fn test_strip_html_decodes_references_once() {
        let raw = "<p>It&#8217;s a &#x201C;case&#x201D; &mdash; &amp;lt;b&amp;gt;</p>";
        assert_eq!(strip_html(raw), "It\u{2019}s a \u{201C}case\u{201D} \u{2014} &lt;b&gt;");
    }

    #[test]
    fn test_strip_html_keeps_comparison_signs() {
        assert_eq!(strip_html("a < b and c > d"), "a < b and c > d");
        assert_eq!(strip_html("x <3 y"), "x <3 y");
    }

    #[test]
    fn test_strip_html_keeps_bare_ampersand() {
        assert_eq!(strip_html("AT&T <b>wins</b>"), "AT&T wins");
    }

    #[test]
    fn test_parse_rss_decodes_description_entities() {
        let body = r#"<rss version="2.0"><channel><title>T</title>
  <item>
    <title>Quoted</title>
    <link>https://example.com/q</link>
    <description><![CDATA[<p>It&#8217;s a &#x201C;case&#x201D; &mdash; &amp;lt;b&amp;gt;</p>]]></description>
  </item>
</channel></rss>"#;
        let items = parse_rss(body, "wire", "Home").unwrap();
        assert_eq!(items[0].summary, "It\u{2019}s a \u{201C}case\u{201D} \u{2014} &lt;b&gt;");
    }

    #[test]
    fn test_bad_pub_date_is_none() {
        assert!(parse_pub_date("yesterday").is_none());
        assert!(parse_pub_date("Tue, 04 Mar 2025 09:00:00 +0000").is_some());
    }
}
