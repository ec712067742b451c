//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: page title and status line
//! - `NavBar`: platform tabs and page tabs
//! - `ViewPane`: draws a core `View`, or the routing error in its place
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `SessionManagerState`: overlay for switching between saved sessions
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── nav_bar.rs
//! ├── view_pane.rs
//! └── session_manager.rs
//! ```

mod nav_bar;
pub mod session_manager;
mod title_bar;
mod view_pane;

pub use nav_bar::NavBar;
pub use session_manager::{SessionManager, SessionManagerState};
pub use title_bar::TitleBar;
pub use view_pane::ViewPane;

#[cfg(test)]
pub(crate) fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}
