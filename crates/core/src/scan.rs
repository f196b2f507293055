//! Match scanner - finds runs of equal tiles along rows and columns

use match3_types::{Position, MIN_MATCH_LEN};

use crate::grid::{Grid, Line, TileView};

/// A run of at least [`MIN_MATCH_LEN`] equal tiles, in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match<T> {
    pub matched: T,
    pub positions: Vec<Position>,
}

impl<T> Match<T> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Longest contiguous streak of `target` along `line`, scanning in index order.
///
/// On ties the first streak wins. Returns an empty vector when `target` does not
/// occur on the line at all (or the line lies outside the view).
pub fn longest_run<T, V>(view: &V, line: Line, target: &T) -> Vec<Position>
where
    T: PartialEq,
    V: TileView<T> + ?Sized,
{
    let (width, height) = view.dimensions();

    let (mut best_start, mut best_len) = (0, 0);
    let (mut start, mut streak) = (0, 0);
    for i in 0..line.len(width, height) {
        if view.tile(line.position(i)) != Some(target) {
            streak = 0;
            continue;
        }
        if streak == 0 {
            start = i;
        }
        streak += 1;
        // Strictly longer only, so the earliest streak survives a tie.
        if streak > best_len {
            best_start = start;
            best_len = streak;
        }
    }

    (best_start..best_start + best_len)
        .map(|i| line.position(i))
        .collect()
}

/// Full-board scan.
///
/// Rows are walked top to bottom, then columns from the rightmost to the leftmost.
/// Within a line, every distinct tile value is looked up once (in order of first
/// appearance) and its longest run becomes a [`Match`] if it is long enough. The
/// returned order is the discovery order.
pub fn scan_matches<T>(grid: &Grid<T>) -> Vec<Match<T>>
where
    T: PartialEq + Clone,
{
    let mut found = Vec::new();
    for row in 0..grid.height() {
        scan_line(grid, Line::Row(row), &mut found);
    }
    for col in (0..grid.width()).rev() {
        scan_line(grid, Line::Column(col), &mut found);
    }
    found
}

fn scan_line<T>(grid: &Grid<T>, line: Line, found: &mut Vec<Match<T>>)
where
    T: PartialEq + Clone,
{
    let mut seen: Vec<&T> = Vec::new();
    for i in 0..line.len(grid.width(), grid.height()) {
        let Some(tile) = grid.tile_at(line.position(i)) else {
            continue;
        };
        if seen.contains(&tile) {
            continue;
        }
        seen.push(tile);

        let run = longest_run(grid, line, tile);
        if run.len() >= MIN_MATCH_LEN {
            found.push(Match {
                matched: tile.clone(),
                positions: run,
            });
        }
    }
}

/// True when no row or column holds a run of [`MIN_MATCH_LEN`] or more.
pub fn is_stable<T>(grid: &Grid<T>) -> bool
where
    T: PartialEq + Clone,
{
    scan_matches(grid).is_empty()
}
