use ratatui::Frame;
use ratatui::layout::{Constraint, Layout as Split};
use ratatui::style::Style;
use ratatui::text::Span;

use crate::core::app::App;
use crate::core::router::{RouterError, View};
use crate::core::shell::PageConfig;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{NavBar, SessionManager, TitleBar, ViewPane};

const HELP_TEXT: &str =
    "Tab/Shift+Tab page  ←/→ platform  ↑/↓ item  r refresh  s summarize  Ctrl+O sessions  q quit";

/// Draws one frame from the state and the output of this pass's `render_pass()`.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, view: &Result<View, RouterError>) {
    use Constraint::{Length, Min};
    let layout = Split::vertical([Length(1), Length(2), Min(0), Length(1)]);
    let [title_area, nav_area, main_area, help_area] = layout.areas(frame.area());

    let page_config = tui.page_config.clone().unwrap_or_else(PageConfig::default);

    let mut title_bar = TitleBar::new(
        page_config.title.clone(),
        app.status_message.clone(),
        app.is_loading,
        tui.theme,
    );
    title_bar.render(frame, title_area);

    let mut nav = NavBar {
        platforms: &app.platforms,
        current_platform: app.session.current_platform(),
        pages: app.router.pages().collect(),
        current_page: app.session.current_page(),
        theme: tui.theme,
    };
    nav.render(frame, nav_area);

    let mut pane = ViewPane {
        view,
        layout: page_config.layout,
        theme: tui.theme,
    };
    pane.render(frame, main_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(tui.theme.muted)),
        help_area,
    );

    if let Some(ref mut sm) = tui.session_manager {
        SessionManager::new(sm, &app.session.id).render(frame, frame.area());
    }
}
