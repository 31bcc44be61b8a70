//! Key handling for the yes/no confirmation prompt.

use crossterm::event::{KeyCode, KeyEvent};

/// Describes how the confirmation prompt should react to a pressed key.
pub(crate) enum ConfirmDecision {
    Continue,
    Dismiss,
    No,
    Yes,
}

/// Handles one key press for a yes/no confirmation.
///
/// `y`/`n` answer directly, arrows and `h`/`l` move between the No and
/// Yes options, Enter takes the highlighted one, and Esc dismisses the
/// prompt without an answer.
pub(crate) fn handle_confirm_key(selected_yes: &mut bool, key: KeyEvent) -> ConfirmDecision {
    match key.code {
        KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'y') => ConfirmDecision::Yes,
        KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'n') => ConfirmDecision::No,
        KeyCode::Esc => ConfirmDecision::Dismiss,
        KeyCode::Left => {
            *selected_yes = false;

            ConfirmDecision::Continue
        }
        KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'h') => {
            *selected_yes = false;

            ConfirmDecision::Continue
        }
        KeyCode::Right => {
            *selected_yes = true;

            ConfirmDecision::Continue
        }
        KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'l') => {
            *selected_yes = true;

            ConfirmDecision::Continue
        }
        KeyCode::Enter => {
            if *selected_yes {
                ConfirmDecision::Yes
            } else {
                ConfirmDecision::No
            }
        }
        _ => ConfirmDecision::Continue,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_shortcut_keys_answer_directly() {
        // Arrange
        let mut selected_yes = false;

        // Act
        let yes = handle_confirm_key(&mut selected_yes, plain(KeyCode::Char('y')));
        let no = handle_confirm_key(&mut selected_yes, plain(KeyCode::Char('N')));

        // Assert
        assert!(matches!(yes, ConfirmDecision::Yes));
        assert!(matches!(no, ConfirmDecision::No));
    }

    #[test]
    fn test_enter_takes_the_highlighted_option() {
        // Arrange: No starts selected.
        let mut selected_yes = false;

        // Act
        let default_answer = handle_confirm_key(&mut selected_yes, plain(KeyCode::Enter));
        handle_confirm_key(&mut selected_yes, plain(KeyCode::Right));
        let moved_answer = handle_confirm_key(&mut selected_yes, plain(KeyCode::Enter));

        // Assert
        assert!(matches!(default_answer, ConfirmDecision::No));
        assert!(matches!(moved_answer, ConfirmDecision::Yes));
    }

    #[test]
    fn test_escape_dismisses_without_an_answer() {
        // Arrange
        let mut selected_yes = true;

        // Act
        let decision = handle_confirm_key(&mut selected_yes, plain(KeyCode::Esc));

        // Assert
        assert!(matches!(decision, ConfirmDecision::Dismiss));
    }

    #[test]
    fn test_vim_style_movement_switches_options() {
        // Arrange
        let mut selected_yes = false;

        // Act
        handle_confirm_key(&mut selected_yes, plain(KeyCode::Char('l')));
        let after_l = selected_yes;
        handle_confirm_key(&mut selected_yes, plain(KeyCode::Char('h')));

        // Assert
        assert!(after_l);
        assert!(!selected_yes);
    }
}
