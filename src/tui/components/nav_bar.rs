//! # NavBar Component
//!
//! Two rows of tabs: platforms on top, pages below. The active entry of each
//! row is highlighted. A current page the router does not know is still
//! shown, dimmed, so the user can see what the session points at.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Tabs;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct NavBar<'a> {
    pub platforms: &'a [String],
    pub current_platform: &'a str,
    pub pages: Vec<&'a str>,
    pub current_page: &'a str,
    pub theme: Theme,
}

impl NavBar<'_> {
    /// Index of `current` in `entries`, appending it when absent.
    fn with_current<'b>(entries: &mut Vec<&'b str>, current: &'b str) -> usize {
        match entries.iter().position(|e| *e == current) {
            Some(i) => i,
            None => {
                entries.push(current);
                entries.len() - 1
            }
        }
    }

    fn tabs<'b>(&self, mut entries: Vec<&'b str>, current: &'b str) -> Tabs<'b> {
        let selected = Self::with_current(&mut entries, current);
        Tabs::new(entries)
            .select(selected)
            .style(Style::default().fg(self.theme.muted))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│")
    }
}

impl Component for NavBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [platform_area, page_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let platforms: Vec<&str> = self.platforms.iter().map(String::as_str).collect();
        frame.render_widget(self.tabs(platforms, self.current_platform), platform_area);
        frame.render_widget(self.tabs(self.pages.clone(), self.current_page), page_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_with_current_appends_unknown() {
        let mut entries = vec!["Case Search", "Session"];
        assert_eq!(NavBar::with_current(&mut entries, "Session"), 1);
        assert_eq!(NavBar::with_current(&mut entries, "Dashboard"), 2);
        assert_eq!(entries, vec!["Case Search", "Session", "Dashboard"]);
    }

    #[test]
    fn test_nav_bar_renders_both_rows() {
        let platforms = vec!["Home".to_string(), "News".to_string()];
        let mut nav = NavBar {
            platforms: &platforms,
            current_platform: "News",
            pages: vec!["Case Search", "Session"],
            current_page: "Case Search",
            theme: Theme::default(),
        };
        let backend = TestBackend::new(60, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| nav.render(f, f.area())).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Home"));
        assert!(text.contains("News"));
        assert!(text.contains("Case Search"));
        assert!(text.contains("Session"));
    }
}
