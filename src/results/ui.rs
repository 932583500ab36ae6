//! Result cards rendering.

use super::ResultState;
use crate::data::GrantRecord;
use crate::ui::formatters::{format_currency, truncate_to_width};
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows occupied by one card, borders included.
pub const CARD_HEIGHT: u16 = 6;

/// Draw the results view: count line, cards, loading line.
pub fn draw_results(
    f: &mut Frame<'_>,
    state: &mut ResultState,
    term: &str,
    busy: bool,
    area: Rect,
    colors: &ThemeColors,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, state, term, chunks[0], colors);

    state.viewport_rows = chunks[1].height;
    let visible_cards = usize::from(chunks[1].height / CARD_HEIGHT);
    state.adjust_scroll(visible_cards);

    if state.is_empty() && !busy {
        let paragraph = Paragraph::new("No grants found matching your criteria.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.muted).bg(colors.bg));
        f.render_widget(paragraph, chunks[1]);
    } else {
        draw_cards(f, state, visible_cards, chunks[1], colors);
    }

    let footer = if busy {
        Span::styled("Loading...", Style::default().fg(colors.warning))
    } else if !state.all_rendered() {
        Span::styled(
            "Scroll down or press m for more",
            Style::default().fg(colors.muted),
        )
    } else {
        Span::raw("")
    };
    f.render_widget(
        Paragraph::new(Line::from(footer))
            .alignment(Alignment::Center)
            .style(Style::default().bg(colors.bg)),
        chunks[2],
    );
}

fn draw_header(f: &mut Frame<'_>, state: &ResultState, term: &str, area: Rect, colors: &ThemeColors) {
    let mut spans = Vec::new();
    if !term.is_empty() {
        spans.push(Span::styled(
            format!("Results for \"{}\"  ", term),
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(state.summary(), Style::default().fg(colors.text)));

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(colors.bg)),
        area,
    );
}

fn draw_cards(
    f: &mut Frame<'_>,
    state: &ResultState,
    visible_cards: usize,
    area: Rect,
    colors: &ThemeColors,
) {
    let cards = state
        .rendered()
        .iter()
        .enumerate()
        .skip(state.scroll)
        .take(visible_cards);

    for (slot, (idx, record)) in cards.enumerate() {
        let card_area = Rect {
            x: area.x,
            y: area.y + slot as u16 * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT,
        };
        draw_card(f, record, idx == state.selected, card_area, colors);
    }
}

fn draw_card(f: &mut Frame<'_>, record: &GrantRecord, selected: bool, area: Rect, colors: &ThemeColors) {
    let border = if selected {
        Style::default().fg(colors.cursor_bg)
    } else {
        Style::default().fg(colors.border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = usize::from(inner.width);
    let year = record.fiscal_year.to_string();
    let sponsor_width = width.saturating_sub(year.len() + 1);
    let funding = format_currency(record.funding_whole());
    let id_width = width.saturating_sub(funding.len() + 1);

    let sponsor = truncate_to_width(&record.sponsor, sponsor_width);
    let id = truncate_to_width(&record.opportunity_id, id_width);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{:<w$}", sponsor, w = sponsor_width),
                Style::default()
                    .fg(colors.heading)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(year, Style::default().fg(colors.label)),
        ]),
        Line::from(Span::styled(
            truncate_to_width(&record.program, width),
            Style::default().fg(colors.value),
        )),
        Line::from(Span::styled(
            truncate_to_width(&record.description, width),
            Style::default().fg(colors.text),
        )),
        Line::from(vec![
            Span::styled(
                funding,
                Style::default()
                    .fg(colors.money)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("{:>w$}", id, w = id_width),
                Style::default().fg(colors.muted),
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}
