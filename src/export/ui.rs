//! Email gate overlay rendering.

use super::EmailGate;
use crate::ui::formatters::format_number;
use crate::ui::{centered_rect, ThemeColors};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the email gate in front of an export of `record_count` records.
pub fn draw_gate(f: &mut Frame<'_>, gate: &EmailGate, record_count: usize, colors: &ThemeColors) {
    if !gate.is_open() {
        return;
    }

    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Export {} grants to CSV", format_number(record_count as u64)),
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Enter your email address to download the results.",
            Style::default().fg(colors.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Email: ", Style::default().fg(colors.label)),
            Span::styled(
                format!("{}_", gate.value()),
                Style::default().fg(colors.value),
            ),
        ]),
    ];

    if let Some(rejection) = gate.rejection() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            rejection.message(),
            Style::default().fg(colors.error),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Export ")
            .title_bottom(" Enter:export | Esc:cancel ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .style(Style::default().bg(colors.bg)),
    );

    f.render_widget(paragraph, area);
}
