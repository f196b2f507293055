//! Cascade resolver - applies a move and resolves the board until it is stable
//!
//! One accepted move runs this loop:
//!
//! ```text
//! swap -> scan -> (no matches) -> done
//!           |
//!           +-> clear + gravity + refill -> scan -> ...
//! ```
//!
//! Every scan pass reports one [`Effect::MatchFound`] per qualifying run, and every
//! refill reports one [`Effect::Refilled`] carrying a snapshot of the refilled grid.
//! The log is chronological, so a frontend can replay it as an animation.

use tracing::{debug, trace, warn};

use match3_types::Position;

use crate::grid::Grid;
use crate::scan::{scan_matches, Match};
use crate::source::TileSource;
use crate::validate::{can_move_with, MoveRule};

/// Passes after which a cascade is reported as suspicious.
///
/// The loop keeps going regardless; only a source that keeps producing matching
/// tiles can get here.
pub const CASCADE_WARN_PASSES: usize = 64;

/// One entry of a move's effect log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<T> {
    MatchFound(Match<T>),
    Refilled(Grid<T>),
}

impl<T> Effect<T> {
    pub fn as_match(&self) -> Option<&Match<T>> {
        match self {
            Effect::MatchFound(found) => Some(found),
            Effect::Refilled(_) => None,
        }
    }

    pub fn as_refill(&self) -> Option<&Grid<T>> {
        match self {
            Effect::MatchFound(_) => None,
            Effect::Refilled(grid) => Some(grid),
        }
    }
}

/// Resulting grid plus everything that happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult<T> {
    pub grid: Grid<T>,
    pub effects: Vec<Effect<T>>,
}

impl<T> MoveResult<T> {
    /// An accepted move always clears at least one run, so its log is never empty.
    pub fn accepted(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Apply a move to an owned grid and hand it back with the effect log.
pub fn move_tiles<T, S>(
    source: &mut S,
    mut grid: Grid<T>,
    a: Position,
    b: Position,
) -> MoveResult<T>
where
    T: PartialEq + Clone,
    S: TileSource<T> + ?Sized,
{
    let effects = grid.apply_move(source, a, b);
    MoveResult { grid, effects }
}

impl<T: PartialEq + Clone> Grid<T> {
    /// Apply a move in place under the default [`MoveRule`].
    ///
    /// A rejected move leaves the grid untouched and returns an empty log.
    pub fn apply_move<S>(&mut self, source: &mut S, a: Position, b: Position) -> Vec<Effect<T>>
    where
        S: TileSource<T> + ?Sized,
    {
        self.apply_move_with(source, a, b, MoveRule::default())
    }

    pub fn apply_move_with<S>(
        &mut self,
        source: &mut S,
        a: Position,
        b: Position,
        rule: MoveRule,
    ) -> Vec<Effect<T>>
    where
        S: TileSource<T> + ?Sized,
    {
        if !can_move_with(self, a, b, rule) {
            debug!(%a, %b, "move rejected");
            return Vec::new();
        }

        self.swap(a, b);
        let mut effects = Vec::new();
        let passes = resolve(self, source, &mut effects);
        debug!(%a, %b, passes, effects = effects.len(), "move resolved");
        effects
    }

    /// Resolve whatever matches the board already holds, without a swap.
    ///
    /// Useful right after [`Grid::create`], which fills cells blindly.
    pub fn settle<S>(&mut self, source: &mut S) -> Vec<Effect<T>>
    where
        S: TileSource<T> + ?Sized,
    {
        let mut effects = Vec::new();
        let passes = resolve(self, source, &mut effects);
        if passes > 0 {
            debug!(passes, "settled board");
        }
        effects
    }
}

/// Scan, clear and refill until a scan finds nothing. Returns the number of refill
/// passes.
fn resolve<T, S>(grid: &mut Grid<T>, source: &mut S, effects: &mut Vec<Effect<T>>) -> usize
where
    T: PartialEq + Clone,
    S: TileSource<T> + ?Sized,
{
    let mut passes = 0;
    loop {
        let found = scan_matches(grid);
        if found.is_empty() {
            return passes;
        }
        passes += 1;

        let cleared: Vec<Position> = found
            .iter()
            .flat_map(|m| m.positions.iter().copied())
            .collect();
        trace!(pass = passes, runs = found.len(), cells = cleared.len(), "clearing");
        effects.extend(found.into_iter().map(Effect::MatchFound));

        let drawn = grid.clear_and_refill(&cleared, source);
        trace!(pass = passes, drawn, "refilled");
        effects.push(Effect::Refilled(grid.clone()));

        if passes == CASCADE_WARN_PASSES {
            warn!(passes, "cascade still running; tile source keeps producing matches");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::is_stable;
    use crate::source::Replay;

    fn grid(rows: &[&str]) -> Grid<char> {
        Grid::from_rows(rows.iter().map(|r| r.chars().collect()).collect()).unwrap()
    }

    #[test]
    fn test_rejected_move_is_noop() {
        let mut g = grid(&["ab", "ba"]);
        let mut source = Replay::new(vec!['z']).unwrap();
        let effects = g.apply_move(&mut source, Position::new(0, 0), Position::new(0, 1));
        assert!(effects.is_empty());
        assert_eq!(g, grid(&["ab", "ba"]));
        assert_eq!(source.drawn(), 0);
    }

    #[test]
    fn test_single_pass_cascade() {
        let mut g = grid(&["aba", "cad", "efg"]);
        let mut source = Replay::new(vec!['p', 'q', 'r']).unwrap();
        let effects = g.apply_move(&mut source, Position::new(0, 1), Position::new(1, 1));

        assert_eq!(effects.len(), 2);
        let found = effects[0].as_match().unwrap();
        assert_eq!(found.matched, 'a');
        assert_eq!(
            found.positions,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
        assert_eq!(effects[1].as_refill(), Some(&grid(&["pqr", "cbd", "efg"])));
        assert_eq!(g, grid(&["pqr", "cbd", "efg"]));
    }

    #[test]
    fn test_refill_can_chain_another_pass() {
        let mut g = grid(&["aba", "cad", "efg"]);
        let mut source = Replay::new(vec!['k', 'k', 'k', 'p', 'q', 'r']).unwrap();
        let effects = g.apply_move(&mut source, Position::new(0, 1), Position::new(1, 1));

        let kinds: Vec<&str> = effects
            .iter()
            .map(|e| match e {
                Effect::MatchFound(_) => "match",
                Effect::Refilled(_) => "refill",
            })
            .collect();
        assert_eq!(kinds, vec!["match", "refill", "match", "refill"]);
        assert_eq!(effects[2].as_match().unwrap().matched, 'k');
        assert_eq!(g, grid(&["pqr", "cbd", "efg"]));
        assert!(is_stable(&g));
    }

    #[test]
    fn test_settle_resolves_existing_matches() {
        let mut g = grid(&["xyz", "aaa", "uvw"]);
        let mut source = Replay::new(vec!['1', '2', '3']).unwrap();
        let effects = g.settle(&mut source);
        assert_eq!(effects.len(), 2);
        assert_eq!(g, grid(&["123", "xyz", "uvw"]));

        // Already stable: nothing happens
        assert!(g.settle(&mut source).is_empty());
    }

    #[test]
    fn test_move_tiles_returns_owned_grid() {
        let g = grid(&["aba", "cad", "efg"]);
        let mut source = Replay::new(vec!['p', 'q', 'r']).unwrap();
        let result = move_tiles(&mut source, g, Position::new(1, 1), Position::new(0, 1));
        assert!(result.accepted());
        assert_eq!(result.grid, grid(&["pqr", "cbd", "efg"]));
    }
}
