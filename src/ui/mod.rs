//! User interface rendering.

pub mod formatters;
mod keymap_bar;
mod status_bar;
mod theme;

use crate::app::{App, View};
use crate::detail::ui::draw_detail;
use crate::export::ui::draw_gate;
use crate::filters::ui::draw_filters;
use crate::results::ui::draw_results;
use crate::search::{EMPTY_TERM_MESSAGE, SUGGESTIONS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub use theme::{Theme, ThemeColors};

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(app.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Keymap bar
        ])
        .split(f.area());

    match app.view {
        View::Initial => draw_initial(f, app, chunks[0], &colors),
        View::Results => {
            let busy = app.is_busy();
            let term = app.active_term.clone();
            let block = Block::default()
                .title(" FTA Grant Search ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg));
            let inner = block.inner(chunks[0]);
            f.render_widget(block, chunks[0]);
            draw_results(f, &mut app.results, &term, busy, inner, &colors);
        },
    }

    status_bar::draw_status(f, chunks[1], app, &colors);
    keymap_bar::draw_keymap(f, chunks[2], app, &colors);

    // Overlays, bottom to top
    draw_detail(f, &app.detail, &colors);
    draw_filters(f, &app.filters, &colors);
    draw_gate(f, &app.gate, app.results.full_set().len(), &colors);
}

fn draw_initial(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let block = Block::default()
        .title(" FTA Grant Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let active = app.filters.selection().active_count();
    let filters_line = if active == 0 {
        "No filters applied".to_string()
    } else {
        format!("{} filter(s) applied", active)
    };

    let lines = vec![
        Line::from(Span::styled(
            "Search Federal Transit Administration grants",
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(colors.label)),
            Span::styled(
                format!("{}_", app.search.buffer()),
                Style::default().fg(colors.value),
            ),
        ]),
        if app.search.is_rejected() {
            Line::from(Span::styled(
                EMPTY_TERM_MESSAGE,
                Style::default().fg(colors.error),
            ))
        } else {
            Line::from("")
        },
        Line::from(Span::styled(
            "Matches sponsor, program, description and opportunity ID",
            Style::default().fg(colors.muted),
        )),
        Line::from(Span::styled(filters_line, Style::default().fg(colors.muted))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Try: ", Style::default().fg(colors.label)),
            Span::styled(SUGGESTIONS.join("  "), Style::default().fg(colors.value)),
            Span::styled("  (Tab)", Style::default().fg(colors.muted)),
        ]),
    ];

    // Vertically center the prompt
    let top = inner.height.saturating_sub(lines.len() as u16) / 2;
    let prompt_area = Rect {
        y: inner.y + top,
        height: inner.height - top,
        ..inner
    };

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        prompt_area,
    );
}

/// Helper to create a centered rectangle.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
