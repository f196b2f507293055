//! Key handling and cursor tests - from key presses to move requests

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use match3::input::{handle_key_event, should_quit, Cursor, MoveRequest};
use match3::types::{BoardAction, Position};

fn press(cursor: &mut Cursor, code: KeyCode) -> Option<MoveRequest> {
    let action = handle_key_event(KeyEvent::from(code))?;
    cursor.apply(action)
}

#[test]
fn test_keys_select_a_swap() {
    let mut cursor = Cursor::new(8, 8);
    assert_eq!(press(&mut cursor, KeyCode::Char('l')), None);
    assert_eq!(press(&mut cursor, KeyCode::Char(' ')), None);
    assert_eq!(press(&mut cursor, KeyCode::Down), None);
    assert_eq!(press(&mut cursor, KeyCode::Down), None);

    assert_eq!(
        press(&mut cursor, KeyCode::Enter),
        Some(MoveRequest {
            from: Position::new(0, 1),
            to: Position::new(2, 1),
        })
    );
}

#[test]
fn test_escape_cancels_pending_selection() {
    let mut cursor = Cursor::new(4, 4);
    press(&mut cursor, KeyCode::Enter);
    press(&mut cursor, KeyCode::Esc);
    press(&mut cursor, KeyCode::Right);
    assert_eq!(press(&mut cursor, KeyCode::Enter), None);
    assert_eq!(cursor.selected(), Some(Position::new(0, 1)));
}

#[test]
fn test_hint_and_restart_do_not_move_cursor() {
    let mut cursor = Cursor::new(4, 4);
    press(&mut cursor, KeyCode::Right);
    assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('?'))), Some(BoardAction::Hint));
    assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('r'))), Some(BoardAction::Restart));
    cursor.apply(BoardAction::Hint);
    cursor.apply(BoardAction::Restart);
    assert_eq!(cursor.position(), Position::new(0, 1));
}

#[test]
fn test_jump_to_is_clamped() {
    let mut cursor = Cursor::new(3, 5);
    cursor.jump_to(Position::new(9, -2));
    assert_eq!(cursor.position(), Position::new(4, 0));
}

#[test]
fn test_quit_keys() {
    assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
    assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('q'))), None);
}
