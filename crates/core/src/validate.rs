//! Move validation
//!
//! A move swaps two tiles and is legal only when the swap creates a run of at least
//! [`MIN_MATCH_LEN`] through one of the two touched positions. The check runs against
//! a swapped overlay of the grid, so the grid itself is never written to.

use arrayvec::ArrayVec;

use match3_types::{Position, MIN_MATCH_LEN};

use crate::grid::{Grid, Line, TileView};
use crate::scan::longest_run;

/// Which position pairs may be swapped at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveRule {
    /// Any two positions in the same row or the same column.
    #[default]
    Colinear,
    /// Orthogonal neighbours only.
    Adjacent,
}

impl MoveRule {
    pub fn permits(self, a: Position, b: Position) -> bool {
        match self {
            MoveRule::Colinear => a.is_colinear_with(b),
            MoveRule::Adjacent => a.is_adjacent_to(b),
        }
    }
}

/// The grid as it would look with `a` and `b` exchanged.
struct Swapped<'a, T> {
    grid: &'a Grid<T>,
    a: Position,
    b: Position,
}

impl<T> TileView<T> for Swapped<'_, T> {
    fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    fn tile(&self, pos: Position) -> Option<&T> {
        let from = if pos == self.a {
            self.b
        } else if pos == self.b {
            self.a
        } else {
            pos
        };
        self.grid.tile_at(from)
    }
}

/// Check a move under the default [`MoveRule::Colinear`] rule.
pub fn can_move<T: PartialEq>(grid: &Grid<T>, a: Position, b: Position) -> bool {
    can_move_with(grid, a, b, MoveRule::default())
}

/// Check a move under an explicit rule.
pub fn can_move_with<T: PartialEq>(
    grid: &Grid<T>,
    a: Position,
    b: Position,
    rule: MoveRule,
) -> bool {
    if !grid.contains(a) || !grid.contains(b) || a == b {
        return false;
    }
    if !rule.permits(a, b) {
        return false;
    }
    swap_runs(grid, a, b)
        .iter()
        .any(|&len| len >= MIN_MATCH_LEN)
}

/// Lengths of the four runs a swap can create: a's row, a's column, b's row, b's
/// column, each for the tile that would sit at that position after the swap.
fn swap_runs<T: PartialEq>(grid: &Grid<T>, a: Position, b: Position) -> ArrayVec<usize, 4> {
    let view = Swapped { grid, a, b };
    let mut runs = ArrayVec::new();
    for pos in [a, b] {
        let Some(value) = view.tile(pos) else {
            continue;
        };
        for line in [Line::Row(pos.row as usize), Line::Column(pos.col as usize)] {
            runs.push(longest_run(&view, line, value).len());
        }
    }
    runs
}

/// First legal move, scanning `a` in row-major order and pairing it with positions
/// further right in its row or further down in its column.
///
/// `can_move` is symmetric, so pairs are only tried in one orientation.
pub fn find_move<T: PartialEq>(grid: &Grid<T>, rule: MoveRule) -> Option<(Position, Position)> {
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    for row in 0..height {
        for col in 0..width {
            let a = Position::new(row, col);
            let right = (col + 1..width).map(|c| Position::new(row, c));
            let down = (row + 1..height).map(|r| Position::new(r, col));
            if let Some(b) = right
                .chain(down)
                .filter(|&b| rule.permits(a, b))
                .find(|&b| can_move_with(grid, a, b, rule))
            {
                return Some((a, b));
            }
        }
    }
    None
}
