//! Key mapping from terminal events to board actions.

use crate::types::BoardAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to board actions.
pub fn handle_key_event(key: KeyEvent) -> Option<BoardAction> {
    match key.code {
        // Cursor
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(BoardAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(BoardAction::CursorDown),
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(BoardAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(BoardAction::CursorRight),

        // Selection
        KeyCode::Char(' ') | KeyCode::Enter => Some(BoardAction::Select),
        KeyCode::Esc | KeyCode::Backspace => Some(BoardAction::Cancel),

        // Misc
        KeyCode::Char('?') | KeyCode::Char('i') | KeyCode::Char('I') => Some(BoardAction::Hint),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(BoardAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
