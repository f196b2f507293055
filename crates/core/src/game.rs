//! Game session - one grid, the source that feeds it, and the move rule
//!
//! `Game` is what frontends hold on to: the terminal runner and each adapter
//! connection own exactly one. Moves on one session must be serialized by the owner.

use tracing::info;

use match3_types::{Gem, Position};

use crate::cascade::Effect;
use crate::grid::Grid;
use crate::source::{RandomTiles, TileSource};
use crate::validate::{can_move_with, find_move, MoveRule};

/// Complete session state
#[derive(Debug, Clone)]
pub struct Game<T, S> {
    grid: Grid<T>,
    source: S,
    rule: MoveRule,
    /// Accepted moves since the board was (re)created
    moves: u32,
}

/// The gem game used by the terminal runner and the adapter.
pub type GemGame = Game<Gem, RandomTiles<Gem>>;

impl<T, S> Game<T, S>
where
    T: PartialEq + Clone,
    S: TileSource<T>,
{
    /// Create a game whose board is filled straight from `source`.
    ///
    /// The board may contain runs; call [`Game::settle`] to clear them.
    pub fn new(mut source: S, width: usize, height: usize) -> Self {
        let grid = Grid::create(&mut source, width, height);
        Self {
            grid,
            source,
            rule: MoveRule::default(),
            moves: 0,
        }
    }

    pub fn with_rule(mut self, rule: MoveRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    pub fn rule(&self) -> MoveRule {
        self.rule
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn can_move(&self, a: Position, b: Position) -> bool {
        can_move_with(&self.grid, a, b, self.rule)
    }

    /// Play a move. Returns the effect log, empty if the move was rejected.
    pub fn play(&mut self, a: Position, b: Position) -> Vec<Effect<T>> {
        let effects = self.grid.apply_move_with(&mut self.source, a, b, self.rule);
        if !effects.is_empty() {
            self.moves = self.moves.wrapping_add(1);
        }
        effects
    }

    pub fn settle(&mut self) -> Vec<Effect<T>> {
        self.grid.settle(&mut self.source)
    }

    /// A legal move, if the board has one.
    pub fn hint(&self) -> Option<(Position, Position)> {
        find_move(&self.grid, self.rule)
    }

    /// Replace the board with a fresh one of the same size.
    ///
    /// The source is not rewound, so the new board continues its sequence.
    pub fn restart(&mut self) {
        let (width, height) = (self.grid.width(), self.grid.height());
        self.grid = Grid::create(&mut self.source, width, height);
        self.moves = 0;
        info!(width, height, "board restarted");
    }
}

impl GemGame {
    /// Random gem board, already settled so it starts without runs.
    pub fn seeded(width: usize, height: usize, kinds: usize, seed: u32) -> Self {
        let mut game = Game::new(RandomTiles::gems(kinds, seed), width, height);
        game.settle();
        info!(width, height, kinds, seed, "new gem board");
        game
    }
}
