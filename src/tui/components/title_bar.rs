//! # TitleBar Component
//!
//! Top line: the configured page title, then the status message.
//!
//! 1. **Loading**: `"<title> | <status> | ⟳"`
//! 2. **Status message**: `"<title> | <status>"`
//! 3. **Default**: `"<title>"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct TitleBar {
    pub title: String,
    pub status_message: String,
    pub is_loading: bool,
    pub theme: Theme,
}

impl TitleBar {
    pub fn new(title: String, status_message: String, is_loading: bool, theme: Theme) -> Self {
        Self {
            title,
            status_message,
            is_loading,
            theme,
        }
    }

    fn status_text(&self) -> String {
        match (self.status_message.is_empty(), self.is_loading) {
            (true, false) => String::new(),
            (true, true) => " | ⟳".to_string(),
            (false, false) => format!(" | {}", self.status_message),
            (false, true) => format!(" | {} | ⟳", self.status_message),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                self.title.clone(),
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.status_text(), Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "Shorthand Studios".to_string(),
            "Loaded 3 items".to_string(),
            false,
            Theme::default(),
        );
        let text = draw(&mut title_bar);
        assert!(text.contains("Shorthand Studios | Loaded 3 items"));
        assert!(!text.contains('⟳'));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar =
            TitleBar::new("Shorthand Studios".to_string(), String::new(), false, Theme::default());
        let text = draw(&mut title_bar);
        assert!(text.contains("Shorthand Studios"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_loading_indicator() {
        let title_bar = TitleBar::new(
            "T".to_string(),
            "Refreshing feeds...".to_string(),
            true,
            Theme::default(),
        );
        assert_eq!(title_bar.status_text(), " | Refreshing feeds... | ⟳");
    }
}
