//! Filter panel overlay - pure rendering layer.

use super::{FilterFocus, FilterPanel, FilterPill};
use crate::ui::{centered_rect, ThemeColors};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the filter panel.
pub fn draw_filters(f: &mut Frame<'_>, panel: &FilterPanel, colors: &ThemeColors) {
    if !panel.visible {
        return;
    }

    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let title = match panel.selection().active_count() {
        0 => " Filters ".to_string(),
        n => format!(" Filters ({} active) ", n),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if panel.loading {
        let paragraph = Paragraph::new("Loading options...").style(Style::default().fg(colors.muted));
        f.render_widget(paragraph, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Fiscal years
            Constraint::Min(3),    // Programs
            Constraint::Length(3), // Funding range
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    draw_pills(
        f,
        "Fiscal Year",
        panel.years(),
        panel.year_cursor(),
        panel.focus == FilterFocus::Years,
        chunks[0],
        colors,
    );
    draw_programs(f, panel, chunks[1], colors);
    draw_funding(f, panel, chunks[2], colors);

    let hints = Paragraph::new("Tab:next | Space:toggle | c:clear | Enter:apply | Esc:close")
        .style(Style::default().fg(colors.muted));
    f.render_widget(hints, chunks[3]);
}

fn section_block<'a>(title: &'a str, focused: bool, colors: &ThemeColors) -> Block<'a> {
    let border = if focused { colors.cursor_bg } else { colors.border };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn pill_style(pill: &FilterPill, highlighted: bool, colors: &ThemeColors) -> Style {
    if highlighted {
        Style::default()
            .fg(colors.cursor_fg)
            .bg(colors.cursor_bg)
            .add_modifier(Modifier::BOLD)
    } else if pill.selected {
        Style::default().fg(colors.label).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.text)
    }
}

fn pill_text(pill: &FilterPill) -> String {
    let mark = if pill.selected { "x" } else { " " };
    format!("[{}] {}", mark, pill.option)
}

fn draw_pills(
    f: &mut Frame<'_>,
    title: &str,
    pills: &[FilterPill],
    cursor: usize,
    focused: bool,
    area: Rect,
    colors: &ThemeColors,
) {
    let mut spans = Vec::new();
    for (idx, pill) in pills.iter().enumerate() {
        spans.push(Span::styled(
            pill_text(pill),
            pill_style(pill, focused && idx == cursor, colors),
        ));
        spans.push(Span::raw("  "));
    }
    if pills.is_empty() {
        spans.push(Span::styled("No options", Style::default().fg(colors.muted)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: false })
        .block(section_block(title, focused, colors));
    f.render_widget(paragraph, area);
}

fn draw_programs(f: &mut Frame<'_>, panel: &FilterPanel, area: Rect, colors: &ThemeColors) {
    let focused = panel.focus == FilterFocus::Programs;
    let block = section_block("Program", focused, colors);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let programs = panel.programs();
    if programs.is_empty() {
        f.render_widget(
            Paragraph::new("No options").style(Style::default().fg(colors.muted)),
            inner,
        );
        return;
    }

    // Keep the cursor row in view
    let height = usize::from(inner.height).max(1);
    let cursor = panel.program_cursor();
    let start = cursor.saturating_sub(height - 1);

    let lines: Vec<Line<'_>> = programs
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(idx, pill)| {
            Line::from(Span::styled(
                pill_text(pill),
                pill_style(pill, focused && idx == cursor, colors),
            ))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_funding(f: &mut Frame<'_>, panel: &FilterPanel, area: Rect, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let inputs = [
        ("Min Funding", &panel.funding_min, FilterFocus::FundingMin),
        ("Max Funding", &panel.funding_max, FilterFocus::FundingMax),
    ];

    for ((title, value, focus), chunk) in inputs.into_iter().zip(chunks.iter()) {
        let focused = panel.focus == focus;
        let text = if focused {
            format!("${}_", value)
        } else if value.is_empty() {
            "any".to_string()
        } else {
            format!("${}", value)
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(colors.value))
            .block(section_block(title, focused, colors));
        f.render_widget(paragraph, *chunk);
    }
}
