//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used across the match-3 workspace.
//! All types are plain data with no external dependencies, so they can be used by the
//! board engine, the terminal frontend and the JSON adapter alike.
//!
//! # Coordinates
//!
//! Positions are zero-based `(row, col)` pairs in row-major order. Row 0 is the top of
//! the board; gravity pulls tiles toward higher row indices. Coordinates are signed so
//! that a neighbour probe like `row - 1` is representable and simply falls outside the
//! board instead of wrapping.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 8 | Columns of a new board |
//! | `DEFAULT_HEIGHT` | 8 | Rows of a new board |
//! | `DEFAULT_GEM_KINDS` | 6 | Distinct gems drawn by the random source |
//! | `MIN_GEM_KINDS` | 2 | Fewest gem kinds a random board may use |
//! | `MIN_MATCH_LEN` | 3 | Shortest run that counts as a match |
//!
//! # Examples
//!
//! ```
//! use match3_types::{BoardAction, Gem, Position};
//!
//! let a = Position::new(0, 1);
//! let b = Position::new(0, 4);
//! assert!(a.is_colinear_with(b));
//! assert!(!a.is_adjacent_to(b));
//!
//! assert_eq!(Gem::from_str("Red"), Some(Gem::Red));
//! assert_eq!(BoardAction::from_str("select"), Some(BoardAction::Select));
//! ```

use std::fmt;

/// Default board width in columns
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height in rows
pub const DEFAULT_HEIGHT: usize = 8;

/// Default number of gem kinds used by the random tile source
pub const DEFAULT_GEM_KINDS: usize = 6;

/// With a single kind every refill recreates the run it replaced, so a cascade
/// could never end.
pub const MIN_GEM_KINDS: usize = 2;

/// A run must be at least this long to be cleared
pub const MIN_MATCH_LEN: usize = 3;

/// Zero-based board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True when the two positions share exactly one coordinate.
    pub fn is_colinear_with(self, other: Position) -> bool {
        (self.row == other.row) != (self.col == other.col)
    }

    /// True when the two positions are orthogonal neighbours.
    pub fn is_adjacent_to(self, other: Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }

    /// Offset by `(drow, dcol)`.
    pub fn offset(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// The six gem kinds of the default palette
///
/// The board engine itself is generic over the tile type; `Gem` is the tile used by
/// the terminal game and the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gem {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl Gem {
    /// All gems in palette order
    pub const ALL: [Gem; 6] = [
        Gem::Red,
        Gem::Green,
        Gem::Blue,
        Gem::Yellow,
        Gem::Purple,
        Gem::Orange,
    ];

    /// Parse gem from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::Gem;
    ///
    /// assert_eq!(Gem::from_str("blue"), Some(Gem::Blue));
    /// assert_eq!(Gem::from_str("ORANGE"), Some(Gem::Orange));
    /// assert_eq!(Gem::from_str("pink"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Gem::Red),
            "green" => Some(Gem::Green),
            "blue" => Some(Gem::Blue),
            "yellow" => Some(Gem::Yellow),
            "purple" => Some(Gem::Purple),
            "orange" => Some(Gem::Orange),
            _ => None,
        }
    }

    /// Lowercase name, as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Gem::Red => "red",
            Gem::Green => "green",
            Gem::Blue => "blue",
            Gem::Yellow => "yellow",
            Gem::Purple => "purple",
            Gem::Orange => "orange",
        }
    }

    /// Single glyph for compact text rendering
    pub fn glyph(&self) -> char {
        match self {
            Gem::Red => 'R',
            Gem::Green => 'G',
            Gem::Blue => 'B',
            Gem::Yellow => 'Y',
            Gem::Purple => 'P',
            Gem::Orange => 'O',
        }
    }
}

impl fmt::Display for Gem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player-facing actions of the terminal frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Pick the tile under the cursor, or swap with the already picked one
    Select,
    /// Drop the current selection
    Cancel,
    Hint,
    Restart,
}

impl BoardAction {
    /// Parse action from camelCase string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cursorUp" => Some(BoardAction::CursorUp),
            "cursorDown" => Some(BoardAction::CursorDown),
            "cursorLeft" => Some(BoardAction::CursorLeft),
            "cursorRight" => Some(BoardAction::CursorRight),
            "select" => Some(BoardAction::Select),
            "cancel" => Some(BoardAction::Cancel),
            "hint" => Some(BoardAction::Hint),
            "restart" => Some(BoardAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardAction::CursorUp => "cursorUp",
            BoardAction::CursorDown => "cursorDown",
            BoardAction::CursorLeft => "cursorLeft",
            BoardAction::CursorRight => "cursorRight",
            BoardAction::Select => "select",
            BoardAction::Cancel => "cancel",
            BoardAction::Hint => "hint",
            BoardAction::Restart => "restart",
        }
    }
}
