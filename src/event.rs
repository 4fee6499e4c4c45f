//! Event polling and key classification for todo-lists

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// Poll for an event with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

fn plain(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// q, or Ctrl+C anywhere
pub fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

pub fn is_up(key: &KeyEvent) -> bool {
    plain(key) && matches!(key.code, KeyCode::Up | KeyCode::Char('k'))
}

pub fn is_down(key: &KeyEvent) -> bool {
    plain(key) && matches!(key.code, KeyCode::Down | KeyCode::Char('j'))
}

pub fn is_first(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Home | KeyCode::Char('g'))
}

pub fn is_last(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::End | KeyCode::Char('G'))
}

/// Drill into the selected list
pub fn is_open(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Right | KeyCode::Char('l'))
}

/// Leave the items pane
pub fn is_back(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Left | KeyCode::Char('h'))
}

/// Flip the selected item's completed flag
pub fn is_toggle(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char(' ')
    )
}
