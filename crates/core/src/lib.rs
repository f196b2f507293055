//! Core board logic - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: tile storage, run detection, move validation
//! and cascade resolution. It does no I/O, making it:
//!
//! - **Deterministic**: the same tile source sequence yields identical boards and logs
//! - **Generic**: tiles are any `T: PartialEq + Clone`; the board never looks inside them
//! - **Portable**: the same engine drives the terminal game and the JSON adapter
//!
//! # Module Structure
//!
//! - [`grid`]: dense `width x height` storage, bounds checks, swap, gravity refill
//! - [`scan`]: longest-run detection along a line and full-board scans
//! - [`validate`]: move legality under a [`MoveRule`], plus move search
//! - [`cascade`]: applying a move and resolving until stable, with the effect log
//! - [`source`]: tile sources (seeded random, replay, closure)
//! - [`game`]: a session wrapper owning grid, source and rule
//!
//! # Game Rules
//!
//! - A move swaps two tiles that share a row or a column (adjacency is optional, see
//!   [`MoveRule`]) and is legal only if it creates a run of three or more.
//! - After a legal swap every run on the board is cleared, surviving tiles fall down,
//!   and new tiles enter from the top. This repeats until no run is left.
//!
//! # Example
//!
//! ```
//! use match3_core::{Effect, Grid, Replay};
//! use match3_types::Position;
//!
//! let mut grid = Grid::from_rows(vec![
//!     vec!['a', 'b', 'a'],
//!     vec!['c', 'a', 'd'],
//!     vec!['e', 'f', 'g'],
//! ])
//! .unwrap();
//! let mut source = Replay::new(vec!['p', 'q', 'r']).unwrap();
//!
//! let effects = grid.apply_move(&mut source, Position::new(0, 1), Position::new(1, 1));
//! assert!(matches!(effects[0], Effect::MatchFound(_)));
//! assert!(matches!(effects[1], Effect::Refilled(_)));
//! assert_eq!(grid.tile_at(Position::new(0, 0)), Some(&'p'));
//! ```

pub mod cascade;
pub mod game;
pub mod grid;
pub mod scan;
pub mod source;
pub mod validate;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{move_tiles, Effect, MoveResult, CASCADE_WARN_PASSES};
pub use game::{Game, GemGame};
pub use grid::{Grid, Line, Piece, TileView};
pub use scan::{is_stable, longest_run, scan_matches, Match};
pub use source::{from_fn, FromFn, RandomTiles, Replay, SimpleRng, TileSource};
pub use validate::{can_move, can_move_with, find_move, MoveRule};
