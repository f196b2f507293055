//! Cursor and selection state for the terminal board.
//!
//! The first `Select` picks the tile under the cursor; the second one produces a
//! [`MoveRequest`] between the picked tile and the cursor. Selecting the picked tile
//! again drops the pick. Validation is left to the engine.

use crate::types::{BoardAction, Position};

/// A swap the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
    selected: Option<Position>,
    width: usize,
    height: usize,
}

impl Cursor {
    /// Cursor in the top-left corner of a `width x height` board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pos: Position::new(0, 0),
            selected: None,
            width,
            height,
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Apply a navigation or selection action.
    ///
    /// `Hint` and `Restart` are not cursor concerns and are ignored here.
    pub fn apply(&mut self, action: BoardAction) -> Option<MoveRequest> {
        match action {
            BoardAction::CursorUp => self.step(-1, 0),
            BoardAction::CursorDown => self.step(1, 0),
            BoardAction::CursorLeft => self.step(0, -1),
            BoardAction::CursorRight => self.step(0, 1),
            BoardAction::Cancel => self.selected = None,
            BoardAction::Select => return self.select(),
            BoardAction::Hint | BoardAction::Restart => {}
        }
        None
    }

    /// Move the cursor to `pos`, clamped to the board.
    pub fn jump_to(&mut self, pos: Position) {
        self.pos = self.clamp(pos);
    }

    fn step(&mut self, drow: i32, dcol: i32) {
        self.pos = self.clamp(self.pos.offset(drow, dcol));
    }

    fn clamp(&self, pos: Position) -> Position {
        let max_row = self.height.saturating_sub(1) as i32;
        let max_col = self.width.saturating_sub(1) as i32;
        Position::new(pos.row.clamp(0, max_row), pos.col.clamp(0, max_col))
    }

    fn select(&mut self) -> Option<MoveRequest> {
        match self.selected.take() {
            None => {
                self.selected = Some(self.pos);
                None
            }
            Some(from) if from == self.pos => None,
            Some(from) => Some(MoveRequest { from, to: self.pos }),
        }
    }
}
