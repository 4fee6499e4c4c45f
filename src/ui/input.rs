//! Single-line text input with terminal-style editing keys
//!
//! Supports:
//! - Ctrl+A / Home, Ctrl+E / End: jump to start / end
//! - Ctrl+B / Left, Ctrl+F / Right: move one character
//! - Alt+B, Alt+F: move one word
//! - Ctrl+W: delete word backward
//! - Ctrl+U / Ctrl+K: delete to start / end
//! - Backspace / Delete: delete one character

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Text buffer with a cursor counted in characters, not bytes
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents and park the cursor at the end
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.len();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Text before and after the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_at(self.cursor))
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn char_at(&self, char_idx: usize) -> Option<char> {
        self.text.chars().nth(char_idx)
    }

    /// Handle a key event, returns true if the input consumed it
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(c) if !ctrl && !alt => {
                let at = self.byte_at(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Home => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.len(),
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Char('b') if ctrl => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Char('f') if ctrl => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Char('b') if alt => self.cursor = self.word_start(),
            KeyCode::Char('f') if alt => self.cursor = self.word_end(),
            KeyCode::Char('w') if ctrl => {
                let start = self.word_start();
                self.remove_range(start, self.cursor);
                self.cursor = start;
            }
            KeyCode::Char('u') if ctrl => {
                self.remove_range(0, self.cursor);
                self.cursor = 0;
            }
            KeyCode::Char('k') if ctrl => {
                let at = self.byte_at(self.cursor);
                self.text.truncate(at);
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.remove_range(self.cursor - 1, self.cursor);
                self.cursor -= 1;
            }
            KeyCode::Delete if self.cursor < self.len() => {
                self.remove_range(self.cursor, self.cursor + 1);
            }
            KeyCode::Backspace | KeyCode::Delete => {}
            _ => return false,
        }
        true
    }

    fn remove_range(&mut self, from: usize, to: usize) {
        let (from, to) = (self.byte_at(from), self.byte_at(to));
        self.text.drain(from..to);
    }

    /// Start of the word at or before the cursor (skipping whitespace first)
    fn word_start(&self) -> usize {
        let mut pos = self.cursor;
        while pos > 0 && self.char_at(pos - 1).is_some_and(char::is_whitespace) {
            pos -= 1;
        }
        while pos > 0 && self.char_at(pos - 1).is_some_and(|c| !c.is_whitespace()) {
            pos -= 1;
        }
        pos
    }

    /// Start of the next word after the cursor
    fn word_end(&self) -> usize {
        let len = self.len();
        let mut pos = self.cursor;
        while pos < len && self.char_at(pos).is_some_and(|c| !c.is_whitespace()) {
            pos += 1;
        }
        while pos < len && self.char_at(pos).is_some_and(char::is_whitespace) {
            pos += 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn alt(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT)
    }

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        for c in text.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        input
    }

    #[test]
    fn test_insert() {
        let input = typed("hi");
        assert_eq!(input.text(), "hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_insert_mid_multibyte() {
        let mut input = typed("café");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Char('x')));
        assert_eq!(input.text(), "cafxé");
        assert_eq!(input.split_at_cursor(), ("cafx", "é"));
    }

    #[test]
    fn test_ctrl_w_and_u() {
        let mut input = typed("buy more milk");
        input.handle_key(ctrl('w'));
        assert_eq!(input.text(), "buy more ");

        input.handle_key(ctrl('u'));
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_word_motion() {
        let mut input = TextInput::new();
        input.set("hello world");
        input.handle_key(ctrl('a'));

        input.handle_key(alt('f'));
        assert_eq!(input.cursor(), 6);

        input.handle_key(alt('b'));
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_backspace_and_delete_at_edges() {
        let mut input = typed("ab");
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.text(), "ab");

        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.text(), "a");

        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn test_ctrl_k_truncates() {
        let mut input = TextInput::new();
        input.set("keep drop");
        for _ in 0..5 {
            input.handle_key(key(KeyCode::Left));
        }
        input.handle_key(ctrl('k'));
        assert_eq!(input.text(), "keep");
    }

    #[test]
    fn test_unhandled_keys() {
        let mut input = TextInput::new();
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert!(!input.handle_key(key(KeyCode::Esc)));
    }
}
