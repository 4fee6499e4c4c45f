//! Panel listing every to-do list

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, StatefulWidget},
};

use crate::data::TodoList;
use crate::ui::{SelectionState, Theme};

/// Lists in display order, each with its progress
pub struct ListsPanel<'a> {
    lists: &'a [&'a TodoList],
    theme: &'a Theme,
    focused: bool,
}

impl<'a> ListsPanel<'a> {
    pub fn new(lists: &'a [&'a TodoList], theme: &'a Theme) -> Self {
        Self {
            lists,
            theme,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn render_list(&self, list: &TodoList) -> ListItem<'static> {
        let complete = list.is_complete();
        let color = self.theme.done_color(complete);

        let mut name_style = Style::default().fg(if complete { color } else { self.theme.fg });
        if complete {
            name_style = name_style.add_modifier(Modifier::CROSSED_OUT);
        }

        let marker = if complete { "\u{2713} " } else { "\u{25b7} " }; // ✓ / ▷

        ListItem::new(Line::from(vec![
            Span::styled(marker, Style::default().fg(color)),
            Span::styled(list.name.clone(), name_style),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", list.progress_label()),
                Style::default().fg(self.theme.muted),
            ),
        ]))
    }
}

impl StatefulWidget for ListsPanel<'_> {
    type State = SelectionState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let items: Vec<ListItem<'static>> = if self.lists.is_empty() {
            vec![ListItem::new(Span::styled(
                "No lists yet, press a to add one",
                Style::default().fg(self.theme.muted),
            ))]
        } else {
            self.lists.iter().map(|l| self.render_list(l)).collect()
        };

        let border_style = if self.focused {
            Style::default().fg(self.theme.focused_border)
        } else {
            Style::default().fg(self.theme.border)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(border_style)
            .title(" Lists ")
            .title_style(
                Style::default()
                    .fg(self.theme.fg)
                    .add_modifier(Modifier::BOLD),
            );

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg));

        StatefulWidget::render(list, area, buf, state.list_state_mut());
    }
}
