//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.shorthand/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::shell::{DEFAULT_STYLE_SHEET, Layout, PAGE_TITLE, PageConfig};
use crate::core::state::{DEFAULT_PAGE, DEFAULT_PLATFORM, SessionDefaults};
use crate::integrations::providers::openrouter::DEFAULT_SUMMARY_PROMPT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShorthandConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
    #[serde(default)]
    pub feeds: Vec<FeedEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_platform: Option<String>,
    pub default_page: Option<String>,
    pub title: Option<String>,
    pub layout: Option<Layout>,
    pub stylesheet_file: Option<String>,
    pub platforms: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenRouterConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub summary_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedEntry {
    pub name: String,
    pub url: String,
    pub platform: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_SUMMARY_MODEL: &str = "anthropic/claude-sonnet-4";
pub const DEFAULT_MAX_SUMMARY_TOKENS: u32 = 512;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub defaults: SessionDefaults,
    pub page_config: PageConfig,
    pub stylesheet: String,
    pub platforms: Vec<String>,
    pub feeds: Vec<FeedEntry>,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub summary_model: String,
    pub max_summary_tokens: u32,
    pub summary_prompt: String,
}

/// Values that only come from the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub platform: Option<String>,
    pub page: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.shorthand`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shorthand"))
}

/// Returns the path to `~/.shorthand/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.shorthand/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ShorthandConfig::default()`.
pub fn load_config() -> Result<ShorthandConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(ShorthandConfig::default())
        }
    }
}

/// Load config from an explicit path. Missing files get a generated default.
pub fn load_config_from(path: &Path) -> Result<ShorthandConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ShorthandConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ShorthandConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Shorthand Studios Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_platform = "Home"
# default_page = "Case Search"
# title = "Shorthand Studios - Content Intelligence Platform"
# layout = "wide"                    # "wide" or "centered"
# stylesheet_file = "style.css"      # Path relative to ~/.shorthand/
# platforms = ["Home", "News"]

# [openrouter]
# api_key = "sk-or-..."              # Or set OPENROUTER_API_KEY env var
# base_url = "https://openrouter.ai/api/v1"
# model = "anthropic/claude-sonnet-4"
# max_tokens = 512
# summary_prompt = "Summarize this item in three sentences."

# [[feeds]]
# name = "BBC World"
# url = "https://feeds.bbci.co.uk/news/world/rss.xml"
# platform = "News"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ShorthandConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Platform: CLI → env → config → default
    let platform = cli
        .platform
        .clone()
        .or_else(|| std::env::var("SHORTHAND_PLATFORM").ok())
        .or_else(|| config.general.default_platform.clone())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());

    // Page: CLI → env → config → default
    let page = cli
        .page
        .clone()
        .or_else(|| std::env::var("SHORTHAND_PAGE").ok())
        .or_else(|| config.general.default_page.clone())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PAGE.to_string());

    let page_config = PageConfig {
        title: config
            .general
            .title
            .clone()
            .unwrap_or_else(|| PAGE_TITLE.to_string()),
        layout: config.general.layout.unwrap_or_default(),
    };

    let platforms = resolve_platforms(config, &platform);

    // OpenRouter API key: env → config
    let openrouter_api_key = std::env::var("OPENROUTER_API_KEY")
        .ok()
        .or_else(|| config.openrouter.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    // OpenRouter base URL: env → config → default
    let openrouter_base_url = std::env::var("OPENROUTER_BASE_URL")
        .ok()
        .or_else(|| config.openrouter.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string());

    // Model: env → config → default
    let summary_model = std::env::var("SHORTHAND_MODEL")
        .ok()
        .or_else(|| config.openrouter.model.clone())
        .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string());

    ResolvedConfig {
        defaults: SessionDefaults { platform, page },
        page_config,
        stylesheet: resolve_stylesheet(config),
        platforms,
        feeds: config.feeds.clone(),
        openrouter_api_key,
        openrouter_base_url,
        summary_model,
        max_summary_tokens: config
            .openrouter
            .max_tokens
            .unwrap_or(DEFAULT_MAX_SUMMARY_TOKENS),
        summary_prompt: config
            .openrouter
            .summary_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SUMMARY_PROMPT.to_string()),
    }
}

/// Default platform first, then configured platforms, then any platform a
/// feed is filed under. No duplicates.
fn resolve_platforms(config: &ShorthandConfig, default_platform: &str) -> Vec<String> {
    let mut platforms = vec![default_platform.to_string()];
    let configured = config.general.platforms.iter().flatten().cloned();
    let from_feeds = config.feeds.iter().filter_map(|f| f.platform.clone());
    for platform in configured.chain(from_feeds) {
        if !platform.trim().is_empty() && !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }
    platforms
}

/// Resolves the stylesheet: a readable, non-empty file wins over the built-in one.
fn resolve_stylesheet(config: &ShorthandConfig) -> String {
    if let Some(ref file) = config.general.stylesheet_file {
        let path = match app_dir() {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        };
        match fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => {
                info!("Loaded stylesheet from {}", path.display());
                return contents;
            }
            Ok(_) => warn!("Stylesheet file is empty: {}", path.display()),
            Err(e) => warn!("Failed to read stylesheet {}: {}", path.display(), e),
        }
    }

    DEFAULT_STYLE_SHEET.to_string()
}
