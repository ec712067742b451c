//! Built-in views.

use chrono::{DateTime, Utc};

use crate::core::router::{RenderContext, SummaryStatus, View, ViewRenderer, ViewTone};
use crate::core::state::DEFAULT_PLATFORM;
use crate::integrations::FeedItem;

pub const CASE_SEARCH_PAGE: &str = "Case Search";
pub const SESSION_PAGE: &str = "Session";

/// Items shown for `platform`. The default platform shows every item.
pub fn visible_items<'a>(items: &'a [FeedItem], platform: &str) -> Vec<&'a FeedItem> {
    items
        .iter()
        .filter(|item| platform == DEFAULT_PLATFORM || item.platform == platform)
        .collect()
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "undated".to_string())
}

/// Latest items for the active platform, plus the summary panel.
pub struct CaseSearchView;

impl ViewRenderer for CaseSearchView {
    fn render(&self, ctx: &RenderContext<'_>) -> View {
        let platform = ctx.session.current_platform();
        let mut view = View::new(format!("{CASE_SEARCH_PAGE} · {platform}"));
        let items = visible_items(ctx.items, platform);

        if items.is_empty() {
            if ctx.is_loading {
                view.push("Loading feeds...", ViewTone::Muted);
            } else {
                view.push(
                    format!("No items for {platform}. Press r to refresh."),
                    ViewTone::Muted,
                );
            }
        }

        for (i, item) in items.iter().enumerate() {
            let selected = ctx.selected_item == Some(i);
            let marker = if selected { ">" } else { " " };
            let tone = if selected { ViewTone::Accent } else { ViewTone::Normal };
            view.push(format!("{marker} {}", item.title), tone);
            view.push(
                format!("    {} · {}", item.source, format_timestamp(item.published)),
                ViewTone::Muted,
            );
        }

        for error in ctx.feed_errors {
            view.push(format!("! {error}"), ViewTone::Error);
        }

        match ctx.summary {
            SummaryStatus::Idle => {}
            SummaryStatus::Pending { title, .. } => {
                view.blank();
                view.push(format!("Summary: {title}"), ViewTone::Accent);
                view.push("Summarizing...", ViewTone::Muted);
            }
            SummaryStatus::Ready { title, text } => {
                view.blank();
                view.push(format!("Summary: {title}"), ViewTone::Accent);
                for line in text.lines() {
                    view.push(line, ViewTone::Normal);
                }
            }
            SummaryStatus::Failed { title, error } => {
                view.blank();
                view.push(format!("Summary: {title}"), ViewTone::Accent);
                view.push(format!("Summary failed: {error}"), ViewTone::Error);
            }
        }

        view
    }
}

/// What the session currently holds.
pub struct SessionView;

impl ViewRenderer for SessionView {
    fn render(&self, ctx: &RenderContext<'_>) -> View {
        let mut view = View::new(SESSION_PAGE);
        let started = DateTime::<Utc>::from_timestamp(ctx.session.created_at, 0);

        view.push(format!("Session  {}", ctx.session.id), ViewTone::Accent);
        view.push(format!("Started  {}", format_timestamp(started)), ViewTone::Muted);
        view.push(format!("Title    {}", ctx.page_config.title), ViewTone::Normal);
        view.push(format!("Layout   {}", ctx.page_config.layout.label()), ViewTone::Normal);
        view.push(format!("Platforms {}", ctx.platforms.join(", ")), ViewTone::Normal);
        view.blank();
        for (key, value) in ctx.session.entries() {
            view.push(format!("{key} = {value}"), ViewTone::Normal);
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shell::PageConfig;
    use crate::core::state::{SessionDefaults, SessionState};
    use crate::test_support::feed_item;

    fn ctx<'a>(
        session: &'a SessionState,
        config: &'a PageConfig,
        items: &'a [FeedItem],
        summary: &'a SummaryStatus,
    ) -> RenderContext<'a> {
        RenderContext {
            session,
            page_config: config,
            platforms: &[],
            items,
            selected_item: Some(0),
            feed_errors: &[],
            is_loading: false,
            summary,
        }
    }

    #[test]
    fn test_visible_items_filters_by_platform() {
        let mut reddit = feed_item("r", None);
        reddit.platform = "Reddit".to_string();
        let items = vec![feed_item("h", None), reddit];
        assert_eq!(visible_items(&items, "Home").len(), 2);
        let only = visible_items(&items, "Reddit");
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].title, "r");
        assert!(visible_items(&items, "News").is_empty());
    }

    #[test]
    fn test_case_search_marks_selected_item() {
        let mut session = SessionState::new();
        session.initialize(&SessionDefaults::default());
        let config = PageConfig::default();
        let items = vec![feed_item("first", None), feed_item("second", None)];
        let view = CaseSearchView.render(&ctx(&session, &config, &items, &SummaryStatus::Idle));
        assert_eq!(view.heading, "Case Search · Home");
        assert_eq!(view.lines[0].text, "> first");
        assert_eq!(view.lines[0].tone, ViewTone::Accent);
        assert_eq!(view.lines[2].text, "  second");
        assert_eq!(view.lines[1].text, "    test-feed · undated");
    }

    #[test]
    fn test_case_search_empty_state() {
        let session = SessionState::new();
        let config = PageConfig::default();
        let view = CaseSearchView.render(&ctx(&session, &config, &[], &SummaryStatus::Idle));
        assert_eq!(view.lines.len(), 1);
        assert!(view.lines[0].text.contains("Press r to refresh"));
    }

    #[test]
    fn test_case_search_shows_summary_failure() {
        let session = SessionState::new();
        let config = PageConfig::default();
        let summary = SummaryStatus::Failed {
            title: "first".to_string(),
            error: "config error: no key".to_string(),
        };
        let items = vec![feed_item("first", None)];
        let view = CaseSearchView.render(&ctx(&session, &config, &items, &summary));
        let last = view.lines.last().unwrap();
        assert_eq!(last.tone, ViewTone::Error);
        assert_eq!(last.text, "Summary failed: config error: no key");
    }

    #[test]
    fn test_session_view_lists_values() {
        let mut session = SessionState::new();
        session.initialize(&SessionDefaults::default());
        let config = PageConfig::default();
        let view = SessionView.render(&ctx(&session, &config, &[], &SummaryStatus::Idle));
        let texts: Vec<_> = view.lines.iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"currentPage = Case Search"));
        assert!(texts.contains(&"currentPlatform = Home"));
        assert!(texts.contains(&"Layout   wide"));
    }
}
