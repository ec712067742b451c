//! # TUI Adapter
//!
//! The ratatui-specific layer. Acts as the `RenderHost` for the page shell,
//! runs the render loop, and translates keyboard events into core `Action`s.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Render Loop
//!
//! One pass per change: drain input events, apply background results, then
//! run `App::render_pass()` and draw the view it returns. When nothing
//! happens the loop sleeps up to 500ms, so an idle dashboard costs nothing.
//! Network calls run on tokio tasks and report back as `Action`s over an
//! `mpsc` channel, so state is only ever touched from this thread.

mod component;
mod components;
mod event;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::app::App;
use crate::core::config::ResolvedConfig;
use crate::core::session::SessionStore;
use crate::core::shell::{PageConfig, RenderHost};
use crate::integrations::feed::FETCH_TIMEOUT;
use crate::integrations::{
    ContentFeedSource, DisabledSummarizer, FeedItem, OpenRouterSummarizer, RssFeedSource,
    SummarizationService, fetch_all, summarize_with_retry,
};
use crate::tui::component::EventHandler;
use crate::tui::components::SessionManagerState;
use crate::tui::components::session_manager::SessionEvent;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Theme;

/// Deadline for a summary, retries included.
const SUMMARY_TIMEOUT: Duration = Duration::from_secs(60);
const SUMMARY_ATTEMPTS: u32 = 2;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub theme: Theme,
    /// Set by the page shell at session start.
    pub page_config: Option<PageConfig>,
    /// Session manager overlay (None = hidden)
    pub session_manager: Option<SessionManagerState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            page_config: None,
            session_manager: None,
        }
    }
}

impl RenderHost for TuiState {
    fn set_page_config(&mut self, config: &PageConfig) {
        self.page_config = Some(config.clone());
    }

    fn inject_styles(&mut self, css: &str) {
        self.theme = Theme::from_css(css);
        debug!("Theme from stylesheet: {:?}", self.theme);
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// One RSS source per configured feed.
pub fn build_sources(config: &ResolvedConfig) -> Vec<Arc<dyn ContentFeedSource>> {
    config
        .feeds
        .iter()
        .map(|feed| {
            let platform = feed
                .platform
                .clone()
                .unwrap_or_else(|| config.defaults.platform.clone());
            Arc::new(RssFeedSource::new(feed.name.clone(), feed.url.clone(), platform))
                as Arc<dyn ContentFeedSource>
        })
        .collect()
}

/// OpenRouter when a key is configured, otherwise a summarizer that explains why not.
pub fn build_summarizer(config: &ResolvedConfig) -> Arc<dyn SummarizationService> {
    match config.openrouter_api_key.clone() {
        Some(api_key) => Arc::new(
            OpenRouterSummarizer::new(
                api_key,
                config.openrouter_base_url.clone(),
                config.summary_model.clone(),
            )
            .with_system_prompt(config.summary_prompt.clone())
            .with_max_tokens(config.max_summary_tokens),
        ),
        None => {
            info!("No OpenRouter API key, summaries disabled");
            Arc::new(DisabledSummarizer::new(
                "set OPENROUTER_API_KEY or [openrouter] api_key to enable summaries",
            ))
        }
    }
}

pub fn run(config: ResolvedConfig, session_id: Option<String>) -> io::Result<()> {
    let session_store = match SessionStore::open_default() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Session persistence disabled: {}", e);
            None
        }
    };
    let store = session_store.as_ref();

    let session = match store {
        Some(store) => store.load_or_create(session_id.as_deref(), &config.defaults),
        None => crate::core::state::SessionState::new(),
    };
    info!("Using session {}", session.id);

    let mut app = App::new(
        session,
        config.defaults.clone(),
        config.platforms.clone(),
        build_sources(&config),
        build_summarizer(&config),
    );
    let mut tui = TuiState::new();
    app.start(&mut tui, config.page_config.clone(), &config.stylesheet)
        .map_err(io::Error::other)?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if update(&mut app, Action::RefreshFeeds) == Effect::FetchFeeds {
        spawn_fetch(&app, tx.clone());
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            let view = app.render_pass();
            if let Err(ref e) = view {
                debug!("Render pass failed: {}", e);
            }
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, &view))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = true;
                break;
            }

            if matches!(event, TuiEvent::OpenSessionManager) {
                let sessions = store
                    .and_then(|s| s.list().map_err(|e| warn!("Failed to list sessions: {}", e)).ok())
                    .unwrap_or_default();
                tui.session_manager = Some(SessionManagerState::new(sessions));
                continue;
            }

            // When session manager is open, route all events to it
            if let Some(ref mut sm) = tui.session_manager {
                let Some(session_event) = sm.handle_event(&event) else {
                    continue;
                };
                match session_event {
                    SessionEvent::Load(id) => {
                        if let Some(s) = store {
                            match s.load(&id) {
                                Ok(session) => {
                                    let effect = update(&mut app, Action::LoadSession(session));
                                    apply(effect, &app, store, &tx);
                                }
                                Err(e) => {
                                    warn!("Failed to load session {}: {}", id, e);
                                    app.status_message = format!("Load failed: {}", e);
                                }
                            }
                        }
                        tui.session_manager = None;
                    }
                    SessionEvent::CreateNew => {
                        save_session(&app, store);
                        let effect = update(&mut app, Action::NewSession);
                        apply(effect, &app, store, &tx);
                        tui.session_manager = None;
                    }
                    SessionEvent::Delete(id) => {
                        if let Some(s) = store
                            && let Err(e) = s.delete(&id)
                        {
                            warn!("Failed to delete session {}: {}", id, e);
                        }
                        sm.remove_session(&id);
                        let effect = update(&mut app, Action::SessionDeleted(id));
                        apply(effect, &app, store, &tx);
                    }
                    SessionEvent::Dismiss => {
                        tui.session_manager = None;
                    }
                }
                continue;
            }

            let action = match event {
                TuiEvent::Escape | TuiEvent::InputChar('q') => Action::Quit,
                TuiEvent::NextPage => Action::NextPage,
                TuiEvent::PreviousPage => Action::PreviousPage,
                TuiEvent::NextPlatform => Action::NextPlatform,
                TuiEvent::PreviousPlatform => Action::PreviousPlatform,
                TuiEvent::CursorUp => Action::SelectPreviousItem,
                TuiEvent::CursorDown => Action::SelectNextItem,
                TuiEvent::InputChar('r') => Action::RefreshFeeds,
                TuiEvent::InputChar('s') | TuiEvent::Submit => Action::SummarizeSelected,
                _ => continue,
            };
            if apply(update(&mut app, action), &app, store, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (feeds, summaries)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            apply(effect, &app, store, &tx);
        }
    }

    save_session(&app, store);

    ratatui::restore();
    Ok(())
}

/// Carries out an effect. Returns `true` when the loop should stop.
fn apply(effect: Effect, app: &App, store: Option<&SessionStore>, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::FetchFeeds => {
            spawn_fetch(app, tx.clone());
            false
        }
        Effect::Summarize(item) => {
            spawn_summary(app.summarizer.clone(), item, tx.clone());
            false
        }
        Effect::SaveSession => {
            save_session(app, store);
            false
        }
    }
}

fn save_session(app: &App, store: Option<&SessionStore>) {
    if let Some(store) = store
        && let Err(e) = store.save(&app.session)
    {
        warn!("Failed to save session: {}", e);
    }
}

fn spawn_fetch(app: &App, tx: mpsc::Sender<Action>) {
    info!("Spawning feed refresh for {} sources", app.sources.len());
    let sources = app.sources.clone();
    tokio::spawn(async move {
        let report = fetch_all(&sources, FETCH_TIMEOUT).await;
        if tx
            .send(Action::FeedsLoaded {
                items: report.items,
                errors: report.errors,
            })
            .is_err()
        {
            warn!("Failed to send FeedsLoaded: receiver dropped");
        }
    });
}

fn spawn_summary(summarizer: Arc<dyn SummarizationService>, item: FeedItem, tx: mpsc::Sender<Action>) {
    info!("Spawning summary for {:?} via {}", item.title, summarizer.name());
    tokio::spawn(async move {
        let attempt = summarize_with_retry(summarizer.as_ref(), &item, SUMMARY_ATTEMPTS);
        let result = match tokio::time::timeout(SUMMARY_TIMEOUT, attempt).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => {
                warn!("Summary for {:?} timed out after {:?}", item.title, SUMMARY_TIMEOUT);
                Err(format!("timed out after {}s", SUMMARY_TIMEOUT.as_secs()))
            }
        };
        if tx
            .send(Action::SummaryReady {
                link: item.link,
                title: item.title,
                result,
            })
            .is_err()
        {
            warn!("Failed to send SummaryReady: receiver dropped");
        }
    });
}
