//! # Actions
//!
//! Everything that can happen in the dashboard becomes an `Action`.
//! User presses Tab? That's `Action::NextPage`.
//! Feeds come back? That's `Action::FeedsLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller should
//! perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::app::App;
use crate::core::router::SummaryStatus;
use crate::core::state::SessionState;
use crate::integrations::FeedItem;

#[derive(Debug)]
pub enum Action {
    Quit,
    NextPage,
    PreviousPage,
    SelectPage(String),
    NextPlatform,
    PreviousPlatform,
    RefreshFeeds,
    FeedsLoaded {
        items: Vec<FeedItem>,
        errors: Vec<String>,
    },
    SelectNextItem,
    SelectPreviousItem,
    SummarizeSelected,
    SummaryReady {
        link: String,
        title: String,
        result: Result<String, String>,
    },
    NewSession,
    LoadSession(SessionState),
    /// A saved session file was removed.
    SessionDeleted(String),
}

/// I/O requested by `update()`, carried out by the adapter.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchFeeds,
    Summarize(FeedItem),
    SaveSession,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Quit => Effect::Quit,

        Action::NextPage | Action::PreviousPage => {
            let current = app.session.current_page();
            let target = match action {
                Action::NextPage => app.router.next_page(current),
                _ => app.router.previous_page(current),
            }
            .map(str::to_string);
            match target {
                Some(page) => select_page(app, &page),
                None => Effect::None,
            }
        }

        Action::SelectPage(page) => select_page(app, &page),

        Action::NextPlatform | Action::PreviousPlatform => {
            let len = app.platforms.len();
            if len == 0 {
                return Effect::None;
            }
            let current = app
                .platforms
                .iter()
                .position(|p| p == app.session.current_platform());
            let next = match (current, &action) {
                (Some(i), Action::NextPlatform) => (i + 1) % len,
                (Some(i), _) => (i + len - 1) % len,
                (None, _) => 0,
            };
            let platform = app.platforms[next].clone();
            if let Err(e) = app.session.select_platform(&platform) {
                warn!("Platform change rejected: {}", e);
                return Effect::None;
            }
            app.reset_selection();
            app.summary = SummaryStatus::Idle;
            app.status_message = format!("Platform: {platform}");
            Effect::SaveSession
        }

        Action::RefreshFeeds => {
            if app.is_loading {
                return Effect::None;
            }
            if app.sources.is_empty() {
                app.status_message = "No feeds configured".to_string();
                return Effect::None;
            }
            app.is_loading = true;
            app.status_message = "Refreshing feeds...".to_string();
            Effect::FetchFeeds
        }

        Action::FeedsLoaded { items, errors } => {
            info!("Feeds loaded: {} items, {} errors", items.len(), errors.len());
            app.is_loading = false;
            app.items = items;
            app.feed_errors = errors;
            app.reset_selection();
            app.status_message = if app.feed_errors.is_empty() {
                format!("Loaded {} items", app.items.len())
            } else {
                format!(
                    "Loaded {} items ({} feeds failed)",
                    app.items.len(),
                    app.feed_errors.len()
                )
            };
            Effect::None
        }

        Action::SelectNextItem => {
            let count = app.visible_items().len();
            app.selected_item = match app.selected_item {
                _ if count == 0 => None,
                Some(i) if i + 1 < count => Some(i + 1),
                Some(i) => Some(i),
                None => Some(0),
            };
            Effect::None
        }

        Action::SelectPreviousItem => {
            let count = app.visible_items().len();
            app.selected_item = match app.selected_item {
                _ if count == 0 => None,
                Some(i) => Some(i.saturating_sub(1).min(count - 1)),
                None => Some(0),
            };
            Effect::None
        }

        Action::SummarizeSelected => {
            if matches!(app.summary, SummaryStatus::Pending { .. }) {
                return Effect::None;
            }
            match app.selected_feed_item().cloned() {
                Some(item) => {
                    app.summary = SummaryStatus::Pending {
                        title: item.title.clone(),
                        link: item.link.clone(),
                    };
                    app.status_message = format!("Summarizing with {}...", app.summarizer.name());
                    Effect::Summarize(item)
                }
                None => {
                    app.status_message = "No item selected".to_string();
                    Effect::None
                }
            }
        }

        Action::SummaryReady { link, title, result } => {
            let pending = matches!(&app.summary, SummaryStatus::Pending { link: l, .. } if *l == link);
            if !pending {
                debug!("Dropping stale summary for {:?}", title);
                return Effect::None;
            }
            app.summary = match result {
                Ok(text) => {
                    app.status_message = "Summary ready".to_string();
                    SummaryStatus::Ready { title, text }
                }
                Err(error) => {
                    app.status_message = "Summary failed".to_string();
                    SummaryStatus::Failed { title, error }
                }
            };
            Effect::None
        }

        Action::NewSession => {
            let mut session = SessionState::new();
            session.initialize(&app.defaults);
            info!("New session {}", session.id);
            replace_session(app, session);
            Effect::SaveSession
        }

        Action::LoadSession(mut session) => {
            session.initialize(&app.defaults);
            info!("Loaded session {}", session.id);
            replace_session(app, session);
            Effect::None
        }

        Action::SessionDeleted(id) => {
            if id != app.session.id {
                return Effect::None;
            }
            // The active file is gone; saving now would bring it back.
            info!("Active session {} deleted, starting fresh", id);
            update(app, Action::NewSession)
        }
    }
}

fn select_page(app: &mut App, page: &str) -> Effect {
    if let Err(e) = app.session.select_page(page) {
        warn!("Page change rejected: {}", e);
        return Effect::None;
    }
    app.status_message = format!("Page: {page}");
    Effect::SaveSession
}

fn replace_session(app: &mut App, session: SessionState) {
    app.status_message = format!("Session {}", &session.id[..8.min(session.id.len())]);
    app.session = session;
    app.summary = SummaryStatus::Idle;
    app.reset_selection();
}
