//! Centered modals: a one-line text prompt and a yes/no confirmation

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::{TextInput, Theme};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn hint_line<'a>(theme: &Theme, pairs: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, (key, desc)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(*desc));
    }
    Line::from(spans).style(Style::default().fg(theme.muted))
}

/// Text prompt used to name or rename lists and todos
pub fn render_prompt(frame: &mut Frame, area: Rect, theme: &Theme, title: &str, input: &TextInput) {
    let modal_area = centered(area, 60, 5);
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input field
            Constraint::Length(1), // Padding
            Constraint::Length(1), // Hint
        ])
        .split(modal_area);

    let (before, after) = input.split_at_cursor();
    let input_line = Line::from(vec![
        Span::raw(before.to_string()),
        Span::styled("\u{2588}", Style::default().fg(theme.accent)), // Block cursor
        Span::raw(after.to_string()),
    ]);

    let field = Paragraph::new(input_line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(theme.focused_border))
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().bg(theme.bg).fg(theme.fg));
    frame.render_widget(field, chunks[0]);

    let hint = Paragraph::new(hint_line(theme, &[("Enter", " to save"), ("Esc", " to cancel")]))
        .style(Style::default().bg(theme.bg));
    frame.render_widget(hint, chunks[2]);
}

/// Yes/no question, used before deleting a list
pub fn render_confirm(frame: &mut Frame, area: Rect, theme: &Theme, question: &str) {
    let modal_area = centered(area, 60, 6);
    frame.render_widget(Clear, modal_area);

    let text = vec![
        Line::from(Span::styled(question.to_string(), Style::default().fg(theme.fg))),
        Line::raw(""),
        hint_line(theme, &[("y", " delete"), ("n/Esc", " keep")]),
    ];

    let para = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(theme.error))
                .title(" Confirm ")
                .title_style(Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().bg(theme.bg));
    frame.render_widget(para, modal_area);
}
