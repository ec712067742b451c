//! # Session Manager Component
//!
//! Full-screen overlay for browsing, loading, and deleting saved sessions.
//! Opened with Ctrl+O, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SessionManagerState` lives in `TuiState`
//! - `SessionManager` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::session::SessionMeta;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent state for the session manager overlay.
pub struct SessionManagerState {
    pub sessions: Vec<SessionMeta>,
    pub selected: usize,
    pub confirm_delete: bool,
    pub list_state: ListState,
}

impl SessionManagerState {
    pub fn new(sessions: Vec<SessionMeta>) -> Self {
        let mut list_state = ListState::default();
        if !sessions.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            sessions,
            selected: 0,
            confirm_delete: false,
            list_state,
        }
    }

    /// Remove a session from the local list after deletion.
    pub fn remove_session(&mut self, id: &str) {
        self.sessions.retain(|s| s.id != id);
        if self.sessions.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.sessions.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

/// Events emitted by the session manager.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Load(String),
    CreateNew,
    Delete(String),
    Dismiss,
}

impl EventHandler for SessionManagerState {
    type Event = SessionEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SessionEvent> {
        // Reset delete confirmation on any non-delete key
        if !matches!(event, TuiEvent::InputChar('d')) {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::Escape => Some(SessionEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.sessions.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.sessions.is_empty() {
                    self.selected = (self.selected + 1).min(self.sessions.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .sessions
                .get(self.selected)
                .map(|session| SessionEvent::Load(session.id.clone())),
            TuiEvent::InputChar('n') => Some(SessionEvent::CreateNew),
            TuiEvent::InputChar('d') => {
                if self.sessions.is_empty() {
                    return None;
                }
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(SessionEvent::Delete(self.sessions[self.selected].id.clone()))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the session manager overlay.
pub struct SessionManager<'a> {
    state: &'a mut SessionManagerState,
    active_id: &'a str,
}

impl<'a> SessionManager<'a> {
    pub fn new(state: &'a mut SessionManagerState, active_id: &'a str) -> Self {
        Self { state, active_id }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 70, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.state.confirm_delete {
            " Press d again to confirm delete | Esc Cancel "
        } else {
            " n New  d Delete  Enter Open  Esc Back "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Sessions ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.sessions.is_empty() {
            let empty = Paragraph::new("No saved sessions.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .sessions
            .iter()
            .enumerate()
            .map(|(i, session)| {
                let style = if i == self.state.selected {
                    let fg = if self.state.confirm_delete { Color::Red } else { Color::White };
                    Style::default()
                        .fg(fg)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let marker = if session.id == self.active_id { "*" } else { " " };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{marker} {}", format_timestamp(session.updated_at)), style),
                    Span::styled("  ", style),
                    Span::styled(short_id(&session.id), style),
                    Span::styled(format!("  {} / {}", session.platform, session.page), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Format a Unix timestamp as "Jan 15 14:02" in local time.
fn format_timestamp(ts: i64) -> String {
    use chrono::{DateTime, Local, Utc};
    let dt: DateTime<Local> = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%b %d %H:%M").to_string()
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str) -> SessionMeta {
        SessionMeta {
            id: id.to_string(),
            updated_at: 0,
            platform: "Home".to_string(),
            page: "Case Search".to_string(),
        }
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut state = SessionManagerState::new(vec![meta("a"), meta("b")]);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d')), None);
        assert!(state.confirm_delete);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d')),
            Some(SessionEvent::Delete("a".to_string()))
        );
    }

    #[test]
    fn test_other_key_cancels_delete() {
        let mut state = SessionManagerState::new(vec![meta("a")]);
        state.handle_event(&TuiEvent::InputChar('d'));
        state.handle_event(&TuiEvent::CursorDown);
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_navigation_and_load() {
        let mut state = SessionManagerState::new(vec![meta("a"), meta("b")]);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 1);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SessionEvent::Load("b".to_string()))
        );
    }

    #[test]
    fn test_remove_session_clamps_selection() {
        let mut state = SessionManagerState::new(vec![meta("a"), meta("b")]);
        state.handle_event(&TuiEvent::CursorDown);
        state.remove_session("b");
        assert_eq!(state.selected, 0);
        state.remove_session("a");
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
