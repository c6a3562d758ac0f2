//! State management for the single-line message input box.

use super::events::KeyInput;

/// Maximum allowed input length in characters.
pub const MAX_INPUT_LENGTH: usize = 280;

/// State for the message composition input box.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageInputState {
    /// The current text being composed.
    text: String,
    /// Cursor position (character index, not byte).
    cursor_position: usize,
}

impl MessageInputState {
    /// Returns the current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the cursor position (character index).
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Applies a text-editing key. Keys that are not editing keys are ignored.
    pub fn apply_key(&mut self, key: KeyInput) {
        match key {
            KeyInput::Char(ch) => {
                self.insert_char(ch);
            }
            KeyInput::Backspace => self.delete_char_before(),
            KeyInput::Delete => self.delete_char_at(),
            KeyInput::CursorLeft => self.move_cursor_left(),
            KeyInput::CursorRight => self.move_cursor_right(),
            KeyInput::Home => self.move_cursor_home(),
            KeyInput::End => self.move_cursor_end(),
            _ => {}
        }
    }

    /// Inserts a character at the current cursor position.
    /// Returns false if the input would exceed the maximum length.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.text.chars().count() >= MAX_INPUT_LENGTH {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text.insert(byte_idx, ch);
        self.cursor_position += 1;
        true
    }

    /// Deletes the character before the cursor (backspace).
    pub fn delete_char_before(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    /// Deletes the character at the cursor position (delete key).
    pub fn delete_char_at(&mut self) {
        let char_count = self.text.chars().count();
        if self.cursor_position < char_count {
            let byte_idx = self.char_to_byte_index(self.cursor_position);
            let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
            self.text.drain(byte_idx..next_byte_idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.text.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text.chars().count();
    }

    /// Clears all text and resets cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    /// Text before the cursor, used to place the terminal cursor.
    pub fn text_before_cursor(&self) -> &str {
        &self.text[..self.char_to_byte_index(self.cursor_position)]
    }

    /// Converts character index to byte index.
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}
