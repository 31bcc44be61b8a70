//! Key handling and editable state for the one-line text input prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable one-line text input with a character-based cursor index.
pub(crate) struct LineInput {
    /// Cursor position measured in characters from the start.
    cursor: usize,
    text: String,
}

impl LineInput {
    /// Creates an empty input with the cursor at position `0`.
    pub(crate) fn new() -> Self {
        Self {
            cursor: 0,
            text: String::new(),
        }
    }

    /// Returns the current text buffer.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Returns the cursor position in characters.
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Inserts one character at the cursor and advances past it.
    fn insert_char(&mut self, ch: char) {
        let byte_offset = self.byte_offset_at(self.cursor);
        self.text.insert(byte_offset, ch);
        self.cursor += 1;
    }

    /// Deletes the character immediately before the cursor.
    fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let start = self.byte_offset_at(self.cursor - 1);
        let end = self.byte_offset_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    /// Deletes the character at the cursor position.
    fn delete_forward(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }

        let start = self.byte_offset_at(self.cursor);
        let end = self.byte_offset_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    fn byte_offset_at(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(index, _)| index)
    }
}

/// Describes how the input prompt should react to a pressed key.
pub(crate) enum InputDecision {
    Cancel,
    Continue,
    Submit(String),
}

/// Handles one key press for the text input prompt.
pub(crate) fn handle_input_key(input: &mut LineInput, key: KeyEvent) -> InputDecision {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputDecision::Cancel
        }
        KeyCode::Esc => InputDecision::Cancel,
        KeyCode::Enter => InputDecision::Submit(input.text().to_string()),
        KeyCode::Char(ch) => {
            input.insert_char(ch);

            InputDecision::Continue
        }
        KeyCode::Backspace => {
            input.delete_backward();

            InputDecision::Continue
        }
        KeyCode::Delete => {
            input.delete_forward();

            InputDecision::Continue
        }
        KeyCode::Left => {
            input.move_left();

            InputDecision::Continue
        }
        KeyCode::Right => {
            input.move_right();

            InputDecision::Continue
        }
        KeyCode::Home => {
            input.cursor = 0;

            InputDecision::Continue
        }
        KeyCode::End => {
            input.cursor = input.text.chars().count();

            InputDecision::Continue
        }
        _ => InputDecision::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_builds_text_at_the_cursor() {
        // Arrange
        let mut input = LineInput::new();

        // Act
        for ch in "ab.txt".chars() {
            handle_input_key(&mut input, plain(KeyCode::Char(ch)));
        }
        handle_input_key(&mut input, plain(KeyCode::Home));
        handle_input_key(&mut input, plain(KeyCode::Right));
        handle_input_key(&mut input, plain(KeyCode::Char('x')));

        // Assert
        assert_eq!(input.text(), "axb.txt");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete_remove_around_the_cursor() {
        // Arrange
        let mut input = LineInput::new();
        for ch in "abc".chars() {
            handle_input_key(&mut input, plain(KeyCode::Char(ch)));
        }

        // Act
        handle_input_key(&mut input, plain(KeyCode::Left));
        handle_input_key(&mut input, plain(KeyCode::Backspace));
        handle_input_key(&mut input, plain(KeyCode::Delete));

        // Assert
        assert_eq!(input.text(), "a");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_enter_submits_the_current_text() {
        // Arrange
        let mut input = LineInput::new();
        for ch in "build".chars() {
            handle_input_key(&mut input, plain(KeyCode::Char(ch)));
        }

        // Act
        let decision = handle_input_key(&mut input, plain(KeyCode::Enter));

        // Assert
        assert!(matches!(decision, InputDecision::Submit(text) if text == "build"));
    }

    #[test]
    fn test_escape_and_ctrl_c_cancel() {
        // Arrange
        let mut input = LineInput::new();

        // Act
        let escape = handle_input_key(&mut input, plain(KeyCode::Esc));
        let ctrl_c = handle_input_key(
            &mut input,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );

        // Assert
        assert!(matches!(escape, InputDecision::Cancel));
        assert!(matches!(ctrl_c, InputDecision::Cancel));
    }
}
