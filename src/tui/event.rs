use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    ForceQuit, // Ctrl+C
    Escape,
    Submit,
    InputChar(char),
    NextPage,     // Tab
    PreviousPage, // Shift+Tab
    NextPlatform, // Right
    PreviousPlatform,
    CursorUp,
    CursorDown,
    OpenSessionManager, // Ctrl+O
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, waiting up to `timeout`. Terminal read errors are
/// logged and treated as "no event".
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }

    match event::read() {
        Ok(Event::Key(key_event)) => {
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            map_key(key_event.modifiers, key_event.code)
        }
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => Some(TuiEvent::OpenSessionManager),
        (_, KeyCode::BackTab) => Some(TuiEvent::PreviousPage),
        (_, KeyCode::Tab) => Some(TuiEvent::NextPage),
        (_, KeyCode::Right) => Some(TuiEvent::NextPlatform),
        (_, KeyCode::Left) => Some(TuiEvent::PreviousPlatform),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_beats_plain_char() {
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::Char('c')),
            Some(TuiEvent::InputChar('c'))
        );
    }

    #[test]
    fn test_tab_navigation() {
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::Tab), Some(TuiEvent::NextPage));
        assert_eq!(
            map_key(KeyModifiers::SHIFT, KeyCode::BackTab),
            Some(TuiEvent::PreviousPage)
        );
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::F(5)), None);
    }
}
