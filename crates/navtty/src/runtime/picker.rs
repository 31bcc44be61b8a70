//! Key handling and filtering state for the selection-list prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Interactive state of one selection-list prompt: the full option set, a
/// typing filter, and the highlighted row.
pub(crate) struct PickerState {
    options: Vec<String>,
    query: String,
    selected_index: usize,
}

/// Describes how the selection list should react to a pressed key.
pub(crate) enum PickerDecision {
    Cancel,
    Continue,
    Pick(String),
}

impl PickerState {
    /// Creates a picker over `options` with the first row highlighted.
    pub(crate) fn new(options: Vec<String>) -> Self {
        Self {
            options,
            query: String::new(),
            selected_index: 0,
        }
    }

    /// Returns the current filter text.
    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    /// Returns the highlighted row index within the filtered rows.
    pub(crate) fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Returns the rows matching the filter, preserving option order.
    /// The match is a case-insensitive substring check.
    pub(crate) fn filtered(&self) -> Vec<&String> {
        if self.query.is_empty() {
            return self.options.iter().collect();
        }

        let query_lower = self.query.to_lowercase();

        self.options
            .iter()
            .filter(|option| option.to_lowercase().contains(&query_lower))
            .collect()
    }

    /// Handles one key press for the selection list.
    ///
    /// Typing narrows the filter and resets the highlight; arrows move it;
    /// Enter picks the highlighted row's label exactly as displayed.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> PickerDecision {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                PickerDecision::Cancel
            }
            KeyCode::Esc => PickerDecision::Cancel,
            KeyCode::Enter => match self.filtered().get(self.selected_index) {
                Some(row) => PickerDecision::Pick((*row).clone()),
                None => PickerDecision::Continue,
            },
            KeyCode::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);

                PickerDecision::Continue
            }
            KeyCode::Down => {
                let row_count = self.filtered().len();
                self.selected_index = self
                    .selected_index
                    .saturating_add(1)
                    .min(row_count.saturating_sub(1));

                PickerDecision::Continue
            }
            KeyCode::Char(ch) => {
                self.query.push(ch);
                self.selected_index = 0;

                PickerDecision::Continue
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.selected_index = 0;

                PickerDecision::Continue
            }
            _ => PickerDecision::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(options: &[&str]) -> PickerState {
        PickerState::new(options.iter().map(|option| (*option).to_string()).collect())
    }

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_filtered_narrows_case_insensitively_and_keeps_order() {
        // Arrange
        let mut picker = picker(&["..", "README.md", "src", "> Rename"]);

        // Act
        picker.handle_key(plain(KeyCode::Char('r')));
        picker.handle_key(plain(KeyCode::Char('e')));
        let filtered: Vec<&str> = picker.filtered().iter().map(|row| row.as_str()).collect();

        // Assert
        assert_eq!(filtered, vec!["README.md", "> Rename"]);
    }

    #[test]
    fn test_enter_picks_the_highlighted_row() {
        // Arrange
        let mut picker = picker(&["a.txt", "b.txt", "sub"]);

        // Act
        picker.handle_key(plain(KeyCode::Down));
        let decision = picker.handle_key(plain(KeyCode::Enter));

        // Assert
        assert!(matches!(decision, PickerDecision::Pick(label) if label == "b.txt"));
    }

    #[test]
    fn test_enter_on_an_empty_filter_result_is_ignored() {
        // Arrange
        let mut picker = picker(&["a.txt"]);
        picker.handle_key(plain(KeyCode::Char('z')));
        picker.handle_key(plain(KeyCode::Char('z')));

        // Act
        let decision = picker.handle_key(plain(KeyCode::Enter));

        // Assert
        assert!(matches!(decision, PickerDecision::Continue));
    }

    #[test]
    fn test_typing_resets_the_highlight() {
        // Arrange
        let mut picker = picker(&["alpha", "beta", "gamma"]);
        picker.handle_key(plain(KeyCode::Down));
        picker.handle_key(plain(KeyCode::Down));

        // Act
        picker.handle_key(plain(KeyCode::Char('a')));

        // Assert
        assert_eq!(picker.selected_index(), 0);
    }

    #[test]
    fn test_selection_is_clamped_to_the_filtered_rows() {
        // Arrange
        let mut picker = picker(&["one", "two"]);

        // Act
        for _ in 0..5 {
            picker.handle_key(plain(KeyCode::Down));
        }

        // Assert
        assert_eq!(picker.selected_index(), 1);
    }

    #[test]
    fn test_escape_cancels() {
        // Arrange
        let mut picker = picker(&["a.txt"]);

        // Act
        let decision = picker.handle_key(plain(KeyCode::Esc));

        // Assert
        assert!(matches!(decision, PickerDecision::Cancel));
    }
}
