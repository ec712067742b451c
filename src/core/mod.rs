//! # Core Application Logic
//!
//! The dashboard's business logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • SessionState         │
//!                    │  • PageShell            │
//!                    │  • NavigationRouter     │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │ RenderHost / View
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `SessionState`, the per-session key/value store
//! - [`shell`]: `PageShell`, page config and stylesheet, applied once
//! - [`router`]: `NavigationRouter`, page name → view
//! - [`views`]: the built-in views
//! - [`app`]: `App`, everything one running dashboard holds
//! - [`action`]: `Action`/`Effect` and the `update()` reducer
//! - [`config`]: config file, env vars, CLI overrides
//! - [`session`]: session persistence

pub mod action;
pub mod app;
pub mod config;
pub mod router;
pub mod session;
pub mod shell;
pub mod state;
pub mod views;
