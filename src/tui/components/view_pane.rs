//! # ViewPane Component
//!
//! Draws the result of a render pass. A routing failure takes the place of
//! the view, inside the same frame, so the rest of the dashboard stays usable.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout as Split, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::router::{RouterError, View};
use crate::core::shell::Layout;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Content width used by the centered layout.
pub const CENTERED_WIDTH: u16 = 100;

pub struct ViewPane<'a> {
    pub view: &'a Result<View, RouterError>,
    pub layout: Layout,
    pub theme: Theme,
}

/// The area the view is drawn into for the given layout mode.
pub fn content_area(area: Rect, layout: Layout) -> Rect {
    match layout {
        Layout::Wide => area,
        Layout::Centered => {
            let [center] = Split::horizontal([Constraint::Max(CENTERED_WIDTH)])
                .flex(Flex::Center)
                .areas(area);
            center
        }
    }
}

impl Component for ViewPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let area = content_area(area, self.layout);

        match self.view {
            Ok(view) => {
                let lines: Vec<Line> = view
                    .lines
                    .iter()
                    .map(|line| {
                        Line::from(Span::styled(
                            line.text.as_str(),
                            Style::default().fg(self.theme.tone(line.tone)),
                        ))
                    })
                    .collect();

                let block = Block::bordered()
                    .title(Span::styled(
                        format!(" {} ", view.heading),
                        Style::default()
                            .fg(self.theme.primary)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .border_style(Style::default().fg(self.theme.primary));

                let paragraph = Paragraph::new(lines)
                    .block(block)
                    .wrap(Wrap { trim: false });
                frame.render_widget(paragraph, area);
            }
            Err(err) => {
                let paragraph = Paragraph::new(err.to_string())
                    .style(Style::default().fg(self.theme.error))
                    .block(
                        Block::bordered()
                            .title(" ERROR ")
                            .border_style(Style::default().fg(self.theme.error)),
                    )
                    .alignment(Alignment::Center);
                frame.render_widget(paragraph, area);
            }
        }
    }
}
