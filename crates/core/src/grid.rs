//! Grid module - dense tile storage and position arithmetic
//!
//! The grid is a `width x height` matrix stored as a flat row-major vector.
//! Coordinates: `(row, col)` where row 0 is the top and col 0 is the left edge.
//!
//! A piece's position is never stored: it is derived from the slot the tile lives in,
//! so a tile's position always equals its slot by construction, through swaps and
//! gravity alike.

use match3_types::Position;

use crate::source::TileSource;

/// A tile together with the position it currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<T> {
    pub value: T,
    pub position: Position,
}

/// One row or one column of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Column(usize),
}

impl Line {
    /// Number of cells along this line on a `width x height` grid
    pub fn len(self, width: usize, height: usize) -> usize {
        match self {
            Line::Row(_) => width,
            Line::Column(_) => height,
        }
    }

    /// Position of the `index`-th cell along this line
    pub fn position(self, index: usize) -> Position {
        match self {
            Line::Row(row) => Position::new(row as i32, index as i32),
            Line::Column(col) => Position::new(index as i32, col as i32),
        }
    }
}

/// Read access to a rectangle of tiles.
///
/// Implemented by [`Grid`] and by the validator's swapped overlay, so the match
/// scanner can look at a speculative swap without touching the grid.
pub trait TileView<T> {
    /// `(width, height)`
    fn dimensions(&self) -> (usize, usize);

    /// The tile at `pos`, or `None` outside the rectangle
    fn tile(&self, pos: Position) -> Option<&T>;
}

/// Dense match-3 board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    /// Row-major (row * width + col)
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Fill a new `width x height` grid row-major from `source`.
    pub fn create<S>(source: &mut S, width: usize, height: usize) -> Self
    where
        S: TileSource<T> + ?Sized,
    {
        let cells = (0..width * height).map(|_| source.next_tile()).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a grid from explicit rows (top row first).
    ///
    /// Returns `None` when the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Calculate flat index, `None` when out of bounds
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Check if position lies on the board
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Tile at `pos`, or `None` outside the board
    pub fn tile_at(&self, pos: Position) -> Option<&T> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    /// Exchange the tiles at two positions.
    /// Returns false (and leaves the grid alone) if either is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Iterate over rows, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks(0) panics; a zero-width grid has no cells anyway
        self.cells.chunks(self.width.max(1))
    }

    /// Iterate over every piece in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece<&T>> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(idx, value)| Piece {
            value,
            position: Position::new((idx / width) as i32, (idx % width) as i32),
        })
    }

    /// Flat row-major view of the cells
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Clear the given positions, let gravity pull the surviving tiles down, and draw
    /// replacements for the vacated top slots.
    ///
    /// Each column is compacted on its own with a two-pointer pass (bottom to top),
    /// which keeps the survivors in their original order no matter how many cells of
    /// the column were cleared. Replacements are then drawn in row-major order: top
    /// row first, left to right. Positions outside the board and duplicates are
    /// ignored. Returns the number of tiles drawn.
    pub fn clear_and_refill<S>(&mut self, cleared: &[Position], source: &mut S) -> usize
    where
        S: TileSource<T> + ?Sized,
    {
        let mut mask = vec![false; self.cells.len()];
        for &pos in cleared {
            if let Some(idx) = self.index(pos) {
                mask[idx] = true;
            }
        }

        // vacated[col] = number of empty slots at the top of that column
        let mut vacated = vec![0usize; self.width];
        for (col, vacant) in vacated.iter_mut().enumerate() {
            let mut write = self.height;
            for read in (0..self.height).rev() {
                if mask[read * self.width + col] {
                    continue;
                }
                write -= 1;
                if write != read {
                    // Slot `write` holds a cleared tile; it is overwritten below.
                    self.cells
                        .swap(read * self.width + col, write * self.width + col);
                }
            }
            *vacant = write;
        }

        let mut drawn = 0;
        for row in 0..self.height {
            for (col, &vacant) in vacated.iter().enumerate() {
                if row < vacant {
                    self.cells[row * self.width + col] = source.next_tile();
                    drawn += 1;
                }
            }
        }
        drawn
    }
}

impl<T: Clone> Grid<T> {
    /// Convert to nested rows (for display and snapshots)
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> TileView<T> for Grid<T> {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn tile(&self, pos: Position) -> Option<&T> {
        self.tile_at(pos)
    }
}
