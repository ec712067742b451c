//! # Page Shell
//!
//! Document-level presentation setup: page title, layout mode, and the
//! stylesheet. The rendering host receives the page config exactly once per
//! session, before any content is rendered.
//!
//! ```text
//! configure_page ──► host.set_page_config   (once, before first render)
//! apply_style_sheet ──► host.inject_styles  (skipped if unchanged)
//! ```

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub const PAGE_TITLE: &str = "Shorthand Studios - Content Intelligence Platform";

/// The stylesheet shipped with the binary. Treated as an opaque blob here.
pub const DEFAULT_STYLE_SHEET: &str = include_str!("../../assets/style.css");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Wide,
    Centered,
}

impl Layout {
    pub fn label(self) -> &'static str {
        match self {
            Layout::Wide => "wide",
            Layout::Centered => "centered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub title: String,
    pub layout: Layout,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            layout: Layout::Wide,
        }
    }
}

/// Whatever draws the pages. The shell only forwards to it.
pub trait RenderHost {
    fn set_page_config(&mut self, config: &PageConfig);
    fn inject_styles(&mut self, css: &str);
}

#[derive(Debug, PartialEq, Eq)]
pub enum ShellError {
    /// `configure_page` was called after the page was already configured,
    /// or after content was rendered.
    ConfigurationOrder(String),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::ConfigurationOrder(msg) => write!(f, "configuration order violation: {msg}"),
        }
    }
}

impl std::error::Error for ShellError {}

/// Session-scoped guard around page configuration.
#[derive(Debug, Default)]
pub struct PageShell {
    config: Option<PageConfig>,
    applied_styles: Option<String>,
    render_passes: u64,
}

impl PageShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure_page(
        &mut self,
        host: &mut dyn RenderHost,
        config: PageConfig,
    ) -> Result<(), ShellError> {
        if self.config.is_some() {
            warn!("configure_page called twice in one session");
            return Err(ShellError::ConfigurationOrder(
                "page is already configured for this session".to_string(),
            ));
        }
        if self.render_passes > 0 {
            warn!("configure_page called after {} render passes", self.render_passes);
            return Err(ShellError::ConfigurationOrder(
                "page must be configured before any content is rendered".to_string(),
            ));
        }
        info!("Page configured: title={:?}, layout={}", config.title, config.layout.label());
        host.set_page_config(&config);
        self.config = Some(config);
        Ok(())
    }

    /// Forwards `css` to the host unless the same text is already applied.
    pub fn apply_style_sheet(&mut self, host: &mut dyn RenderHost, css: &str) {
        if self.applied_styles.as_deref() == Some(css) {
            debug!("Stylesheet unchanged, skipping injection");
            return;
        }
        debug!("Injecting stylesheet ({} bytes)", css.len());
        host.inject_styles(css);
        self.applied_styles = Some(css.to_string());
    }

    pub fn begin_render_pass(&mut self) {
        self.render_passes += 1;
    }

    pub fn config(&self) -> Option<&PageConfig> {
        self.config.as_ref()
    }

    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }
}
