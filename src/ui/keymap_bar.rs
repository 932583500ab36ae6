//! Keymap help bar UI component.

use crate::app::{App, View};
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(super) fn draw_keymap(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let keymap_text = if app.gate.is_open() {
        "Enter:export | Esc:cancel | Type your email"
    } else if app.filters.visible {
        "Tab:section | hjkl:move | Space:toggle | c:clear | Enter:apply | Esc:close"
    } else if app.detail.is_open() {
        "jk:scroll | q/Esc:close"
    } else if app.search.is_editing() {
        "Enter:search | Tab:suggest | Esc:cancel | Type to search"
    } else if app.view == View::Results {
        "q:quit | jk:nav | Enter:details | /:search | f:filters | m:more | e:export | b:back | T:theme"
    } else {
        "q:quit | /:search | f:filters | T:theme"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.muted).bg(colors.bg));

    f.render_widget(paragraph, area);
}
