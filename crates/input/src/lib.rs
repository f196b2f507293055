//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::BoardAction`] and keeps the
//! cursor/selection state that turns two `Select` presses into a move request.

pub mod cursor;
pub mod map;

pub use match3_types as types;

pub use cursor::{Cursor, MoveRequest};
pub use map::{handle_key_event, should_quit};
