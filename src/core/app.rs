//! # Application State
//!
//! Everything one running dashboard holds, minus presentation details.
//!
//! ```text
//! App
//! ├── session: SessionState                  // currentPlatform, currentPage
//! ├── shell: PageShell                       // configure-once guard
//! ├── router: NavigationRouter               // page → view
//! ├── defaults: SessionDefaults              // seeds for initialize()
//! ├── platforms: Vec<String>                 // platform tabs
//! ├── items / feed_errors                    // last feed refresh
//! ├── selected_item: Option<usize>           // index into visible items
//! ├── summary: SummaryStatus                 // on-demand summary
//! ├── sources: Vec<Arc<dyn ContentFeedSource>>
//! └── summarizer: Arc<dyn SummarizationService>
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs,
//! plus `start()` once at session start and `render_pass()` per frame.

use std::sync::Arc;

use log::debug;

use crate::core::router::{NavigationRouter, RenderContext, RouterError, SummaryStatus, View};
use crate::core::shell::{PageConfig, PageShell, RenderHost, ShellError};
use crate::core::state::{SessionDefaults, SessionState};
use crate::core::views::visible_items;
use crate::integrations::{ContentFeedSource, FeedItem, SummarizationService};

pub struct App {
    pub session: SessionState,
    pub shell: PageShell,
    pub router: NavigationRouter,
    pub defaults: SessionDefaults,
    pub platforms: Vec<String>,
    pub items: Vec<FeedItem>,
    pub feed_errors: Vec<String>,
    pub selected_item: Option<usize>,
    pub is_loading: bool,
    pub summary: SummaryStatus,
    pub status_message: String,
    pub sources: Vec<Arc<dyn ContentFeedSource>>,
    pub summarizer: Arc<dyn SummarizationService>,
}

impl App {
    pub fn new(
        session: SessionState,
        defaults: SessionDefaults,
        platforms: Vec<String>,
        sources: Vec<Arc<dyn ContentFeedSource>>,
        summarizer: Arc<dyn SummarizationService>,
    ) -> Self {
        let platforms = if platforms.is_empty() {
            vec![defaults.platform.clone()]
        } else {
            platforms
        };
        Self {
            session,
            shell: PageShell::new(),
            router: NavigationRouter::with_builtin_views(),
            defaults,
            platforms,
            items: Vec::new(),
            feed_errors: Vec::new(),
            selected_item: None,
            is_loading: false,
            summary: SummaryStatus::Idle,
            status_message: String::from("Welcome to Shorthand Studios"),
            sources,
            summarizer,
        }
    }

    /// Session start: configure the page, inject styles, seed the session.
    pub fn start(
        &mut self,
        host: &mut dyn RenderHost,
        page_config: PageConfig,
        stylesheet: &str,
    ) -> Result<(), ShellError> {
        self.shell.configure_page(host, page_config)?;
        self.shell.apply_style_sheet(host, stylesheet);
        self.session.initialize(&self.defaults);
        Ok(())
    }

    /// One render pass over the current state.
    pub fn render_pass(&mut self) -> Result<View, RouterError> {
        self.shell.begin_render_pass();
        self.session.initialize(&self.defaults);

        let page = self.session.current_page().to_string();
        debug!("Render pass {} for page {:?}", self.shell.render_passes(), page);

        let default_config = PageConfig::default();
        let page_config = self.shell.config().unwrap_or(&default_config);
        let renderer = self.router.resolve_view(&page)?;
        let ctx = RenderContext {
            session: &self.session,
            page_config,
            platforms: &self.platforms,
            items: &self.items,
            selected_item: self.selected_item,
            feed_errors: &self.feed_errors,
            is_loading: self.is_loading,
            summary: &self.summary,
        };
        Ok(renderer.render(&ctx))
    }

    pub fn visible_items(&self) -> Vec<&FeedItem> {
        visible_items(&self.items, self.session.current_platform())
    }

    pub fn selected_feed_item(&self) -> Option<&FeedItem> {
        self.selected_item
            .and_then(|i| self.visible_items().get(i).copied())
    }

    /// Points the selection at the first visible item, or nothing.
    pub fn reset_selection(&mut self) {
        self.selected_item = if self.visible_items().is_empty() {
            None
        } else {
            Some(0)
        };
    }
}
