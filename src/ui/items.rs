//! Panel showing the items of one list

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, StatefulWidget},
};

use crate::data::{Item, TodoList};
use crate::ui::{SelectionState, Theme};

/// Items of `list` in display order (open first, then completed)
pub struct ItemsPanel<'a> {
    list: Option<&'a TodoList>,
    items: &'a [&'a Item],
    theme: &'a Theme,
    focused: bool,
}

impl<'a> ItemsPanel<'a> {
    pub fn new(list: Option<&'a TodoList>, items: &'a [&'a Item], theme: &'a Theme) -> Self {
        Self {
            list,
            items,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self) -> String {
        match self.list {
            Some(list) if list.is_complete() => format!(" {} \u{2500} all done ", list.name),
            Some(list) => format!(
                " {} \u{2500} {} of {} left ",
                list.name,
                list.remaining_count(),
                list.total_count
            ),
            None => " Items ".to_string(),
        }
    }

    fn render_item(&self, item: &Item) -> ListItem<'static> {
        let color = self.theme.done_color(item.completed);
        let mut text_style = Style::default().fg(color);
        if item.completed {
            text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
        }

        ListItem::new(Line::from(vec![
            Span::styled(format!("{} ", item.icon()), Style::default().fg(color)),
            Span::styled(item.name.clone(), text_style),
        ]))
    }
}

impl StatefulWidget for ItemsPanel<'_> {
    type State = SelectionState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let placeholder = match self.list {
            None => Some("No list selected"),
            Some(_) if self.items.is_empty() => Some("Nothing here yet, press a to add a todo"),
            Some(_) => None,
        };

        let rows: Vec<ListItem<'static>> = match placeholder {
            Some(text) => vec![ListItem::new(Span::styled(
                text,
                Style::default().fg(self.theme.muted),
            ))],
            None => self.items.iter().map(|i| self.render_item(i)).collect(),
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
            .title(self.title())
            .title_style(
                Style::default()
                    .fg(self.theme.fg)
                    .add_modifier(Modifier::BOLD),
            );

        // Only highlight when the panel has focus; otherwise it is a preview
        let highlight = if self.focused {
            Style::default().bg(self.theme.selection_bg)
        } else {
            Style::default()
        };

        let list = List::new(rows).block(block).highlight_style(highlight);
        StatefulWidget::render(list, area, buf, state.list_state_mut());
    }
}
