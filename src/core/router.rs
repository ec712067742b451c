//! # Navigation Router
//!
//! Maps the session's `currentPage` to a `ViewRenderer`. The set of pages is
//! open: anything can be registered, and the order of registration is the
//! order shown in the navigation bar.

use std::fmt;

use log::debug;

use crate::core::shell::PageConfig;
use crate::core::state::SessionState;
use crate::integrations::FeedItem;

/// How a line should be emphasised. The host maps tones to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTone {
    Normal,
    Muted,
    Accent,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    pub text: String,
    pub tone: ViewTone,
}

impl ViewLine {
    pub fn new(text: impl Into<String>, tone: ViewTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn blank() -> Self {
        Self::new("", ViewTone::Normal)
    }
}

/// Output of one render pass for one page. Pure data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub heading: String,
    pub lines: Vec<ViewLine>,
}

impl View {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, text: impl Into<String>, tone: ViewTone) {
        self.lines.push(ViewLine::new(text, tone));
    }

    pub fn blank(&mut self) {
        self.lines.push(ViewLine::blank());
    }
}

/// Progress of the on-demand summary for the selected item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SummaryStatus {
    #[default]
    Idle,
    Pending { title: String, link: String },
    Ready { title: String, text: String },
    Failed { title: String, error: String },
}

/// Everything a view may read. Borrowed for the duration of one render pass.
pub struct RenderContext<'a> {
    pub session: &'a SessionState,
    pub page_config: &'a PageConfig,
    pub platforms: &'a [String],
    pub items: &'a [FeedItem],
    pub selected_item: Option<usize>,
    pub feed_errors: &'a [String],
    pub is_loading: bool,
    pub summary: &'a SummaryStatus,
}

pub trait ViewRenderer: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> View;
}

#[derive(Debug, PartialEq, Eq)]
pub enum RouterError {
    UnknownPage(String),
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::UnknownPage(page) => write!(f, "unknown page: {page}"),
        }
    }
}

impl std::error::Error for RouterError {}

#[derive(Default)]
pub struct NavigationRouter {
    routes: Vec<(String, Box<dyn ViewRenderer>)>,
}

impl NavigationRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A router with the pages the dashboard ships with.
    pub fn with_builtin_views() -> Self {
        let mut router = Self::new();
        router.register(crate::core::views::CASE_SEARCH_PAGE, Box::new(crate::core::views::CaseSearchView));
        router.register(crate::core::views::SESSION_PAGE, Box::new(crate::core::views::SessionView));
        router
    }

    /// Adds a page, or replaces the renderer of an existing one in place.
    pub fn register(&mut self, page: &str, renderer: Box<dyn ViewRenderer>) {
        if let Some(slot) = self.routes.iter_mut().find(|(name, _)| name == page) {
            debug!("Replacing view for page {:?}", page);
            slot.1 = renderer;
        } else {
            debug!("Registering view for page {:?}", page);
            self.routes.push((page.to_string(), renderer));
        }
    }

    pub fn resolve_view(&self, page: &str) -> Result<&dyn ViewRenderer, RouterError> {
        self.routes
            .iter()
            .find(|(name, _)| name == page)
            .map(|(_, renderer)| renderer.as_ref())
            .ok_or_else(|| RouterError::UnknownPage(page.to_string()))
    }

    pub fn contains(&self, page: &str) -> bool {
        self.routes.iter().any(|(name, _)| name == page)
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The page after `current`, wrapping. Unknown `current` goes to the first page.
    pub fn next_page(&self, current: &str) -> Option<&str> {
        let len = self.routes.len();
        if len == 0 {
            return None;
        }
        let next = match self.position(current) {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        Some(self.routes[next].0.as_str())
    }

    /// The page before `current`, wrapping. Unknown `current` goes to the first page.
    pub fn previous_page(&self, current: &str) -> Option<&str> {
        let len = self.routes.len();
        if len == 0 {
            return None;
        }
        let prev = match self.position(current) {
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        Some(self.routes[prev].0.as_str())
    }

    fn position(&self, page: &str) -> Option<usize> {
        self.routes.iter().position(|(name, _)| name == page)
    }
}
