//! Text editing state for the focused ingredient field.
//!
//! The cursor counts characters, not bytes, so it doubles as the terminal
//! column offset of the caret inside the field.

#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    /// Characters before the caret.
    column: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load another field's value, caret after the last character.
    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.content);
        self.column = self.char_count();
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_column(&self) -> usize {
        self.column
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character at `column` (or the end).
    fn byte_at(&self, column: usize) -> usize {
        self.content
            .char_indices()
            .nth(column)
            .map_or(self.content.len(), |(offset, _)| offset)
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_at(self.column);
        self.content.insert(at, c);
        self.column += 1;
    }

    /// Remove the character before the caret. Returns whether the text changed.
    pub fn backspace(&mut self) -> bool {
        if self.column == 0 {
            return false;
        }
        self.column -= 1;
        let at = self.byte_at(self.column);
        self.content.remove(at);
        true
    }

    /// Remove the character under the caret. Returns whether the text changed.
    pub fn delete(&mut self) -> bool {
        if self.column >= self.char_count() {
            return false;
        }
        let at = self.byte_at(self.column);
        self.content.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.column = self.column.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.column = (self.column + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.column = 0;
    }

    pub fn move_end(&mut self) {
        self.column = self.char_count();
    }
}
