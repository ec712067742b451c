//! # Session State
//!
//! Per-session key/value store. One `SessionState` exists per user session
//! and is passed explicitly to everything that needs it; there is no global
//! store.
//!
//! ```text
//! SessionState
//! ├── id: String                    // uuid v4
//! ├── created_at / updated_at: i64  // unix seconds
//! └── values: BTreeMap
//!     ├── "currentPlatform"  → "Home"
//!     └── "currentPage"      → "Case Search"
//! ```
//!
//! Defaults are applied with `ensure_default`, which never overwrites a key
//! that is already present. Re-running initialization is always safe.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};

pub const CURRENT_PLATFORM: &str = "currentPlatform";
pub const CURRENT_PAGE: &str = "currentPage";

pub const DEFAULT_PLATFORM: &str = "Home";
pub const DEFAULT_PAGE: &str = "Case Search";

/// Values used to seed a fresh session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub platform: String,
    pub page: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.to_string(),
            page: DEFAULT_PAGE.to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum StateError {
    /// Session values must never be empty once set.
    EmptyValue(String),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::EmptyValue(key) => write!(f, "empty value for session key '{key}'"),
        }
    }
}

impl std::error::Error for StateError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub id: String,
    pub created_at: i64,
    pub updated_at: i64,
    values: BTreeMap<String, String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            values: BTreeMap::new(),
        }
    }

    /// Sets `key` to `value` only if `key` is absent.
    /// Returns `true` when the value was written.
    pub fn ensure_default(&mut self, key: &str, value: &str) -> bool {
        if self.values.contains_key(key) {
            return false;
        }
        debug!("Session {}: defaulting {} = {:?}", self.id, key, value);
        self.values.insert(key.to_string(), value.to_string());
        true
    }

    /// Seeds the navigation keys. Safe to call on every render pass.
    pub fn initialize(&mut self, defaults: &SessionDefaults) {
        self.ensure_default(CURRENT_PLATFORM, &defaults.platform);
        self.ensure_default(CURRENT_PAGE, &defaults.page);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        if value.trim().is_empty() {
            return Err(StateError::EmptyValue(key.to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.updated_at = Utc::now().timestamp();
        Ok(())
    }

    pub fn current_platform(&self) -> &str {
        self.get(CURRENT_PLATFORM).unwrap_or(DEFAULT_PLATFORM)
    }

    pub fn current_page(&self) -> &str {
        self.get(CURRENT_PAGE).unwrap_or(DEFAULT_PAGE)
    }

    pub fn select_platform(&mut self, platform: &str) -> Result<(), StateError> {
        self.set(CURRENT_PLATFORM, platform)
    }

    pub fn select_page(&mut self, page: &str) -> Result<(), StateError> {
        self.set(CURRENT_PAGE, page)
    }

    /// All stored keys and values, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
