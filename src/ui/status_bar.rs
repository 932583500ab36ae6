//! Status bar UI component.

use crate::app::App;
use crate::search::EMPTY_TERM_MESSAGE;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the status bar.
pub(super) fn draw_status(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let text = if app.search.is_rejected() {
        format!("/{}  {}", app.search.buffer(), EMPTY_TERM_MESSAGE)
    } else if app.search.is_editing() {
        format!("/{}", app.search.buffer())
    } else if app.dispatcher.search_pending() {
        "Searching...".to_string()
    } else {
        app.status.clone()
    };

    let paragraph =
        Paragraph::new(text).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    f.render_widget(paragraph, area);
}
