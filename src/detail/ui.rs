//! Record detail overlay rendering.

use super::DetailState;
use crate::ui::formatters::format_currency;
use crate::ui::{centered_rect, ThemeColors};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the detail overlay.
pub fn draw_detail(f: &mut Frame<'_>, state: &DetailState, colors: &ThemeColors) {
    let Some(record) = state.record() else {
        return;
    };

    let area = centered_rect(80, 70, f.area());
    f.render_widget(Clear, area);

    let label = Style::default()
        .fg(colors.label)
        .add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("{:<12}", name), label),
            Span::styled(value, style),
        ])
    };

    let mut lines = vec![
        field("Sponsor", record.sponsor.clone(), Style::default().fg(colors.heading)),
        field("Program", record.program.clone(), Style::default().fg(colors.value)),
        field(
            "Fiscal Year",
            record.fiscal_year.to_string(),
            Style::default().fg(colors.text),
        ),
        field(
            "Funding",
            format_currency(record.funding_whole()),
            Style::default()
                .fg(colors.money)
                .add_modifier(Modifier::BOLD),
        ),
        field(
            "Opportunity",
            record.opportunity_id.clone(),
            Style::default().fg(colors.muted),
        ),
        Line::from(""),
        Line::from(Span::styled("Description", label)),
    ];
    lines.push(Line::from(Span::styled(
        record.description.clone(),
        Style::default().fg(colors.text),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0))
        .block(
            Block::default()
                .title(" Grant Details ")
                .title_bottom(" j/k:scroll | Esc:close ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        );

    f.render_widget(paragraph, area);
}
