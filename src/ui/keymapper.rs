//! Key mapping for terminal input
//!
//! Converts crossterm key events into session input actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A discrete input action for the session controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Type a character into the input line
    Insert(char),
    /// Delete the last character
    Backspace,
    /// Commit the input line
    Submit,
    /// Recall an older history entry
    HistoryPrevious,
    /// Walk back toward newer history entries
    HistoryNext,
    /// Clear the input line
    Cancel,
    /// Request tab completion
    Complete,
    /// Terminate immediately (Ctrl+C)
    Quit,
}

/// Key mapper for converting key events to input actions
pub struct KeyMapper;

impl KeyMapper {
    /// Map a crossterm KeyEvent to an input action
    pub fn map(event: &KeyEvent) -> Option<InputAction> {
        // Windows delivers both press and release events
        if event.kind == KeyEventKind::Release {
            return None;
        }

        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputAction::Quit)
            }
            // Other control chords are ignored
            KeyCode::Char(_) if event.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Char(ch) => Some(InputAction::Insert(ch)),
            KeyCode::Backspace => Some(InputAction::Backspace),
            KeyCode::Enter => Some(InputAction::Submit),
            KeyCode::Up => Some(InputAction::HistoryPrevious),
            KeyCode::Down => Some(InputAction::HistoryNext),
            KeyCode::Esc => Some(InputAction::Cancel),
            KeyCode::Tab => Some(InputAction::Complete),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_char_keys() {
        let event = key_event(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Insert('a')));

        // Shifted characters arrive pre-shifted from crossterm
        let event = key_event(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Insert('A')));
    }

    #[test]
    fn test_control_keys() {
        let event = key_event(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Quit));

        // Other control chords are ignored
        let event = key_event(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event), None);
    }

    #[test]
    fn test_editing_keys() {
        let event = key_event(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Submit));

        let event = key_event(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Backspace));

        let event = key_event(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Cancel));

        let event = key_event(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Complete));
    }

    #[test]
    fn test_history_keys() {
        let event = key_event(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::HistoryPrevious));

        let event = key_event(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::HistoryNext));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = key_event(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(KeyMapper::map(&event), None);
    }

    #[test]
    fn test_unmapped_keys() {
        let event = key_event(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), None);

        let event = key_event(KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), None);
    }
}
