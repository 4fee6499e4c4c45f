//! Main layout for todo-lists

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{Flash, FlashKind, InputMode};
use crate::data::{Item, TodoList};
use crate::ui::items::ItemsPanel;
use crate::ui::lists::ListsPanel;
use crate::ui::prompt::{render_confirm, render_prompt};
use crate::ui::{SelectionState, TextInput, Theme};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Lists,
    Items,
}

/// Minimum width to show both panes
const MIN_DUAL_PANE_WIDTH: u16 = 60;

/// Everything the layout needs to draw one frame
pub struct Screen<'a> {
    /// Lists in display order
    pub lists: &'a [&'a TodoList],
    /// Items of `current` in display order
    pub items: &'a [&'a Item],
    /// List whose items are shown on the right
    pub current: Option<&'a TodoList>,
    pub theme: &'a Theme,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub input: &'a TextInput,
    pub flash: Option<&'a Flash>,
    pub show_help: bool,
}

/// Render the main application layout.
/// Returns (lists_area, items_area) for mouse handling.
pub fn render_layout(
    frame: &mut Frame,
    screen: &Screen<'_>,
    list_state: &mut SelectionState,
    item_state: &mut SelectionState,
) -> (Rect, Rect) {
    let area = frame.area();
    let theme = screen.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Panes
            Constraint::Length(1), // Flash message
            Constraint::Length(1), // Footer
        ])
        .split(area);

    // Narrow terminals only show the focused pane
    let (lists_area, items_area) = if area.width < MIN_DUAL_PANE_WIDTH {
        match screen.focus {
            Focus::Lists => (chunks[0], Rect::default()),
            Focus::Items => (Rect::default(), chunks[0]),
        }
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[0]);
        (panes[0], panes[1])
    };

    if lists_area.width > 0 {
        let panel = ListsPanel::new(screen.lists, theme).focused(screen.focus == Focus::Lists);
        frame.render_stateful_widget(panel, lists_area, list_state);
    }

    if items_area.width > 0 {
        let panel = ItemsPanel::new(screen.current, screen.items, theme)
            .focused(screen.focus == Focus::Items);
        frame.render_stateful_widget(panel, items_area, item_state);
    }

    render_flash(frame, chunks[1], theme, screen.flash);
    render_footer(frame, chunks[2], theme, screen.input_mode, screen.focus);

    match screen.input_mode {
        InputMode::Normal => {}
        InputMode::NewList => render_prompt(frame, area, theme, "New List", screen.input),
        InputMode::RenameList(_) => render_prompt(frame, area, theme, "Rename List", screen.input),
        InputMode::NewItem(_) => render_prompt(frame, area, theme, "New Todo", screen.input),
        InputMode::ConfirmDelete(id) => {
            let name = screen
                .lists
                .iter()
                .find(|l| l.id == id)
                .map(|l| l.name.as_str())
                .unwrap_or("this list");
            let question = format!("Delete \"{}\" and all of its todos?", name);
            render_confirm(frame, area, theme, &question);
        }
    }

    if screen.show_help {
        render_help_overlay(frame, area, theme);
    }

    (lists_area, items_area)
}

fn render_flash(frame: &mut Frame, area: Rect, theme: &Theme, flash: Option<&Flash>) {
    let Some(flash) = flash else {
        return;
    };
    let color = match flash.kind {
        FlashKind::Success => theme.success,
        FlashKind::Error => theme.error,
    };
    let line = Line::from(Span::styled(
        format!(" {}", flash.message),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme, input_mode: InputMode, focus: Focus) {
    // Lazygit-style footer: "Key: desc | Key: desc | ..."
    let keys: Vec<(&str, &str)> = match input_mode {
        InputMode::NewList | InputMode::RenameList(_) | InputMode::NewItem(_) => {
            vec![("Esc", "cancel"), ("Enter", "save")]
        }
        InputMode::ConfirmDelete(_) => vec![("y", "delete"), ("n", "keep")],
        InputMode::Normal if focus == Focus::Items => vec![
            ("j/k", "nav"),
            ("x", "toggle"),
            ("a", "add"),
            ("d", "delete"),
            ("C", "complete all"),
            ("Esc", "back"),
            ("?", "help"),
        ],
        InputMode::Normal => vec![
            ("j/k", "nav"),
            ("Enter", "open"),
            ("a", "new list"),
            ("e", "rename"),
            ("D", "delete"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(theme.border)));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            format!(": {}", desc),
            Style::default().fg(theme.muted),
        ));
    }

    // Version info, right-aligned when there is room for it
    let left_width = Line::from(spans.clone()).width() as u16;
    let version_text = format!("todo {}", env!("CARGO_PKG_VERSION"));
    let version_width = version_text.len() as u16;

    if left_width + version_width + 5 <= area.width {
        let padding_width = area.width.saturating_sub(left_width + version_width);
        spans.push(Span::raw(" ".repeat(padding_width as usize)));
        spans.push(Span::styled(version_text, Style::default().fg(theme.muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let help_width = 50.min(area.width.saturating_sub(4));
    let help_height = 22.min(area.height.saturating_sub(2));
    let x = (area.width - help_width) / 2;
    let y = (area.height - help_height) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);

    let bindings = [
        ("j/k", "Move up/down"),
        ("g/G", "First/last"),
        ("Enter/l", "Open list"),
        ("Esc/h", "Back to lists"),
        ("a", "Add list / add todo"),
        ("e", "Rename list"),
        ("D", "Delete list"),
        ("x/Space", "Toggle todo"),
        ("d", "Delete todo"),
        ("C", "Complete all todos"),
        ("r", "Refresh"),
        ("t", "Cycle theme"),
        ("q", "Quit"),
    ];

    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    help_text.extend(bindings.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("{:<13}", key), Style::default().fg(theme.accent)),
            Span::raw(*desc),
        ])
    }));
    help_text.push(Line::raw(""));
    help_text.push(Line::from(Span::styled(
        "Mouse: click to select, wheel to scroll",
        Style::default().fg(theme.muted),
    )));
    help_text.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(theme.accent))
                .title(" Help ")
                .title_style(Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().bg(theme.bg));

    frame.render_widget(help, help_area);
}
