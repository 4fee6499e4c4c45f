//! Application state and main loop
//!
//! `App` is the caller of the store: it validates names, runs one store
//! operation per user action, reports the outcome as a flash message and
//! reloads what it displays.

use std::io::{self, IsTerminal, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};

use crate::data::validation::{validate_item_name, validate_list_name};
use crate::data::{partition_items, partition_lists, Item, ItemId, ListId, TodoList, TodoStore};
use crate::event;
use crate::ui::{render_layout, Focus, Screen, SelectionState, TextInput, THEMES};

const LIST_NOT_FOUND: &str = "The specified list was not found.";

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    NewList,
    RenameList(ListId),
    NewItem(ListId),
    ConfirmDelete(ListId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot message shown after an action, cleared by the next key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Application state
pub struct App<S> {
    store: S,
    /// All lists, in store order (by name)
    lists: Vec<TodoList>,
    /// Items of `current`, in store order (by id)
    items: Vec<Item>,
    /// List whose items are loaded: the open list, or the selected one
    /// while browsing lists
    current: Option<ListId>,
    list_state: SelectionState,
    item_state: SelectionState,
    focus: Focus,
    input_mode: InputMode,
    input: TextInput,
    flash: Option<Flash>,
    theme_idx: usize,
    show_help: bool,
    should_quit: bool,
    refresh_interval: Duration,
    last_refresh: Instant,
    /// Layout areas for mouse handling
    lists_area: Rect,
    items_area: Rect,
}

impl<S: TodoStore> App<S> {
    /// Create a new app instance. Nothing is loaded until the first
    /// [`refresh`](Self::refresh).
    pub fn new(store: S, refresh_secs: u64) -> Self {
        Self {
            store,
            lists: Vec::new(),
            items: Vec::new(),
            current: None,
            list_state: SelectionState::new(),
            item_state: SelectionState::new(),
            focus: Focus::Lists,
            input_mode: InputMode::Normal,
            input: TextInput::new(),
            flash: None,
            theme_idx: 0,
            show_help: false,
            should_quit: false,
            refresh_interval: Duration::from_secs(refresh_secs),
            last_refresh: Instant::now(),
            lists_area: Rect::default(),
            items_area: Rect::default(),
        }
    }

    /// Give the store back, e.g. to disconnect it
    pub fn into_store(self) -> S {
        self.store
    }

    fn displayed_lists(&self) -> Vec<&TodoList> {
        partition_lists(&self.lists)
    }

    fn displayed_items(&self) -> Vec<&Item> {
        partition_items(&self.items)
    }

    fn selected_list(&self) -> Option<&TodoList> {
        let idx = self.list_state.selected()?;
        self.displayed_lists().get(idx).copied()
    }

    fn selected_item(&self) -> Option<&Item> {
        let idx = self.item_state.selected()?;
        self.displayed_items().get(idx).copied()
    }

    fn current_list(&self) -> Option<&TodoList> {
        let id = self.current?;
        self.lists.iter().find(|l| l.id == id)
    }

    /// Reload lists and the current list's items from the store
    pub fn refresh(&mut self) -> Result<()> {
        self.lists = self.store.all_lists()?;
        self.list_state.clamp(self.lists.len());

        if self.focus == Focus::Items && self.current_list().is_none() {
            self.list_missing();
        }

        self.last_refresh = Instant::now();
        self.load_items()
    }

    fn load_items(&mut self) -> Result<()> {
        if self.focus == Focus::Lists {
            self.current = self.selected_list().map(|l| l.id);
        }
        self.items = match self.current {
            Some(id) => self.store.list_items(id)?,
            None => Vec::new(),
        };
        self.item_state.clamp(self.items.len());
        Ok(())
    }

    /// Fall back to the lists pane when the list being worked on is gone
    fn list_missing(&mut self) {
        tracing::warn!(list_id = ?self.current, "list not found");
        self.focus = Focus::Lists;
        self.close_prompt();
        self.flash = Some(Flash::error(LIST_NOT_FOUND));
    }

    /// Look a list up before acting on it; a missing list triggers the
    /// fallback and returns `None`
    fn load_list(&mut self, list_id: ListId) -> Result<Option<TodoList>> {
        let list = self.store.find_list(list_id)?;
        if list.is_none() {
            self.current = Some(list_id);
            self.list_missing();
            self.refresh()?;
        }
        Ok(list)
    }

    fn select_list(&mut self, list_id: ListId) -> Result<()> {
        let idx = self.displayed_lists().iter().position(|l| l.id == list_id);
        if idx.is_some() {
            self.list_state.select(idx);
        }
        self.load_items()
    }

    fn select_item(&mut self, item_id: ItemId) {
        let idx = self.displayed_items().iter().position(|i| i.id == item_id);
        if idx.is_some() {
            self.item_state.select(idx);
        }
    }

    fn close_prompt(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Help overlay takes precedence
        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        match self.input_mode {
            InputMode::NewList | InputMode::RenameList(_) | InputMode::NewItem(_) => {
                return self.handle_prompt_key(key);
            }
            InputMode::ConfirmDelete(list_id) => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => self.delete_list(list_id)?,
                    KeyCode::Char('n') | KeyCode::Esc => self.input_mode = InputMode::Normal,
                    _ => {}
                }
                return Ok(());
            }
            InputMode::Normal => {}
        }

        self.flash = None;

        if event::is_quit(&key) {
            self.should_quit = true;
            return Ok(());
        }

        match key.code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('t') => {
                self.theme_idx = (self.theme_idx + 1) % THEMES.len();
                self.flash = Some(Flash::success(format!(
                    "Theme: {}",
                    THEMES[self.theme_idx].name
                )));
            }
            KeyCode::Char('r') => self.refresh()?,
            _ => match self.focus {
                Focus::Lists => self.handle_lists_key(key)?,
                Focus::Items => self.handle_items_key(key)?,
            },
        }

        Ok(())
    }

    fn handle_lists_key(&mut self, key: KeyEvent) -> Result<()> {
        let len = self.lists.len();

        if event::is_up(&key) {
            self.list_state.previous(len);
        } else if event::is_down(&key) {
            self.list_state.next(len);
        } else if event::is_first(&key) {
            self.list_state.first();
        } else if event::is_last(&key) {
            self.list_state.last(len);
        } else if event::is_open(&key) {
            return self.open_selected();
        } else {
            match key.code {
                KeyCode::Char('a') => {
                    self.input.clear();
                    self.input_mode = InputMode::NewList;
                }
                KeyCode::Char('e') => {
                    if let Some(id) = self.selected_list().map(|l| l.id) {
                        self.start_rename(id);
                    }
                }
                KeyCode::Char('D') => {
                    if let Some(id) = self.selected_list().map(|l| l.id) {
                        self.input_mode = InputMode::ConfirmDelete(id);
                    }
                }
                _ => {}
            }
            return Ok(());
        }

        // Selection moved: preview the newly selected list
        self.item_state.first();
        self.load_items()
    }

    fn handle_items_key(&mut self, key: KeyEvent) -> Result<()> {
        let len = self.items.len();
        let Some(list_id) = self.current else {
            self.focus = Focus::Lists;
            return Ok(());
        };

        if event::is_up(&key) {
            self.item_state.previous(len);
        } else if event::is_down(&key) {
            self.item_state.next(len);
        } else if event::is_first(&key) {
            self.item_state.first();
        } else if event::is_last(&key) {
            self.item_state.last(len);
        } else if event::is_back(&key) {
            self.focus = Focus::Lists;
            self.select_list(list_id)?;
        } else if event::is_toggle(&key) {
            self.toggle_item(list_id)?;
        } else {
            match key.code {
                KeyCode::Char('a') => {
                    self.input.clear();
                    self.input_mode = InputMode::NewItem(list_id);
                }
                KeyCode::Char('d') => self.delete_item(list_id)?,
                KeyCode::Char('C') => self.complete_all(list_id)?,
                KeyCode::Char('e') => self.start_rename(list_id),
                KeyCode::Char('D') => self.input_mode = InputMode::ConfirmDelete(list_id),
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.close_prompt(),
            KeyCode::Enter => {
                let name = self.input.text().trim().to_string();
                match self.input_mode {
                    InputMode::NewList => self.create_list(&name)?,
                    InputMode::RenameList(id) => self.rename_list(id, &name)?,
                    InputMode::NewItem(id) => self.add_item(id, &name)?,
                    InputMode::Normal | InputMode::ConfirmDelete(_) => {}
                }
            }
            _ => {
                self.input.handle_key(key);
            }
        }
        Ok(())
    }

    fn start_rename(&mut self, list_id: ListId) {
        if let Some(name) = self.lists.iter().find(|l| l.id == list_id).map(|l| l.name.clone()) {
            self.input.set(name);
            self.input_mode = InputMode::RenameList(list_id);
        }
    }

    fn open_selected(&mut self) -> Result<()> {
        let Some(list_id) = self.selected_list().map(|l| l.id) else {
            return Ok(());
        };
        if self.load_list(list_id)?.is_some() {
            self.focus = Focus::Items;
            self.current = Some(list_id);
            self.item_state.first();
            self.load_items()?;
        }
        Ok(())
    }

    fn create_list(&mut self, name: &str) -> Result<()> {
        let existing = self.store.all_lists()?;
        if let Err(e) = validate_list_name(name, &existing, None) {
            self.flash = Some(Flash::error(e.to_string()));
            return Ok(());
        }

        let list_id = self.store.create_list(name)?;
        tracing::info!(%list_id, "list created");

        self.close_prompt();
        self.flash = Some(Flash::success("The list has been created."));
        self.focus = Focus::Lists;
        self.refresh()?;
        self.select_list(list_id)
    }

    fn rename_list(&mut self, list_id: ListId, name: &str) -> Result<()> {
        if self.load_list(list_id)?.is_none() {
            return Ok(());
        }

        let existing = self.store.all_lists()?;
        if let Err(e) = validate_list_name(name, &existing, Some(list_id)) {
            self.flash = Some(Flash::error(e.to_string()));
            return Ok(());
        }

        self.store.rename_list(list_id, name)?;
        tracing::info!(%list_id, "list renamed");

        self.close_prompt();
        self.flash = Some(Flash::success("The list has been modified."));
        self.refresh()?;
        if self.focus == Focus::Lists {
            self.select_list(list_id)?;
        }
        Ok(())
    }

    fn delete_list(&mut self, list_id: ListId) -> Result<()> {
        self.store.delete_list(list_id)?;
        tracing::info!(%list_id, "list deleted");

        self.input_mode = InputMode::Normal;
        self.focus = Focus::Lists;
        self.flash = Some(Flash::success("The list has been deleted."));
        self.refresh()
    }

    fn add_item(&mut self, list_id: ListId, name: &str) -> Result<()> {
        if let Err(e) = validate_item_name(name) {
            self.flash = Some(Flash::error(e.to_string()));
            return Ok(());
        }

        match self.store.add_item(list_id, name)? {
            Some(item_id) => {
                tracing::info!(%list_id, %item_id, "todo added");
                self.close_prompt();
                self.flash = Some(Flash::success("The todo was added."));
                self.refresh()?;
                self.select_item(item_id);
            }
            None => {
                self.current = Some(list_id);
                self.list_missing();
                self.refresh()?;
            }
        }
        Ok(())
    }

    fn toggle_item(&mut self, list_id: ListId) -> Result<()> {
        let Some((item_id, completed)) = self.selected_item().map(|i| (i.id, i.completed)) else {
            return Ok(());
        };
        if self.load_list(list_id)?.is_none() {
            return Ok(());
        }

        self.store.set_item_status(list_id, item_id, !completed)?;
        self.flash = Some(Flash::success("The todo has been updated."));
        self.refresh()?;
        self.select_item(item_id);
        Ok(())
    }

    fn delete_item(&mut self, list_id: ListId) -> Result<()> {
        let Some(item_id) = self.selected_item().map(|i| i.id) else {
            return Ok(());
        };
        if self.load_list(list_id)?.is_none() {
            return Ok(());
        }

        self.store.delete_item(list_id, item_id)?;
        self.flash = Some(Flash::success("The todo has been deleted."));
        self.refresh()
    }

    fn complete_all(&mut self, list_id: ListId) -> Result<()> {
        if self.load_list(list_id)?.is_none() {
            return Ok(());
        }

        self.store.complete_all(list_id)?;
        self.flash = Some(Flash::success("All todos have been completed."));
        self.refresh()
    }

    /// Handle a mouse event
    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = (mouse.column, mouse.row);

                if self.lists_area.contains((x, y).into()) {
                    // +1 for the border
                    let row = y.saturating_sub(self.lists_area.y + 1) as usize;
                    let idx = self.list_state.offset() + row;
                    if idx < self.lists.len() {
                        self.focus = Focus::Lists;
                        self.list_state.select(Some(idx));
                        self.load_items()?;
                    }
                } else if self.items_area.contains((x, y).into()) {
                    if self.focus == Focus::Lists {
                        self.open_selected()?;
                    }
                    let row = y.saturating_sub(self.items_area.y + 1) as usize;
                    let idx = self.item_state.offset() + row;
                    if idx < self.items.len() {
                        self.item_state.select(Some(idx));
                    }
                }
            }
            MouseEventKind::ScrollUp => match self.focus {
                Focus::Lists => {
                    self.list_state.previous(self.lists.len());
                    self.load_items()?;
                }
                Focus::Items => self.item_state.previous(self.items.len()),
            },
            MouseEventKind::ScrollDown => match self.focus {
                Focus::Lists => {
                    self.list_state.next(self.lists.len());
                    self.load_items()?;
                }
                Focus::Items => self.item_state.next(self.items.len()),
            },
            _ => {}
        }
        Ok(())
    }

    /// Draw one frame
    fn draw(&mut self, frame: &mut Frame) {
        let lists = partition_lists(&self.lists);
        let items = partition_items(&self.items);
        let current = self
            .current
            .and_then(|id| self.lists.iter().find(|l| l.id == id));

        let screen = Screen {
            lists: &lists,
            items: &items,
            current,
            theme: &THEMES[self.theme_idx],
            focus: self.focus,
            input_mode: self.input_mode,
            input: &self.input,
            flash: self.flash.as_ref(),
            show_help: self.show_help,
        };

        let (lists_area, items_area) =
            render_layout(frame, &screen, &mut self.list_state, &mut self.item_state);
        self.lists_area = lists_area;
        self.items_area = items_area;
    }

    fn refresh_due(&self) -> bool {
        self.input_mode == InputMode::Normal
            && !self.refresh_interval.is_zero()
            && self.last_refresh.elapsed() >= self.refresh_interval
    }
}

/// Setup the terminal
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    if !io::stdout().is_terminal() {
        anyhow::bail!("todo requires a terminal (TTY) to run. Cannot run in a pipe or background.");
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the application until the user quits or something fails.
///
/// The store comes back in either case so the caller can still
/// disconnect it.
pub async fn run<S: TodoStore>(store: S, refresh_secs: u64) -> (S, Result<()>) {
    let mut app = App::new(store, refresh_secs);
    let result = run_app(&mut app).await;
    (app.into_store(), result)
}

/// Run the application, then disconnect the store even when the run
/// failed. The run's error wins over a disconnect error, which is logged.
pub async fn run_and_disconnect<S: TodoStore>(store: S, refresh_secs: u64) -> Result<()> {
    let (store, result) = run(store, refresh_secs).await;

    let closed = store.disconnect();
    match &closed {
        Ok(()) => tracing::info!("store closed"),
        Err(e) => tracing::error!(error = %e, "failed to close the store"),
    }

    result?;
    closed.context("Failed to close the store")
}

async fn run_app<S: TodoStore>(app: &mut App<S>) -> Result<()> {
    app.refresh()?;
    let mut terminal = setup_terminal()?;

    let result = run_loop(&mut terminal, app).await;

    restore_terminal(&mut terminal)?;

    result
}

async fn run_loop<S: TodoStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if let Some(event) = event::poll_event(tick_rate)? {
            match event {
                Event::Key(key) => app.handle_key(key)?,
                Event::Mouse(mouse) => app.handle_mouse(mouse)?,
                _ => {}
            }
        }

        // Pick up changes other users made to a shared database
        if app.refresh_due() {
            if let Err(e) = app.refresh() {
                tracing::warn!(error = %e, "auto-refresh failed");
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
