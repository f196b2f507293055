//! Tile sources - where new tiles come from
//!
//! A [`TileSource`] is the only inbound capability of the board: it is asked for one
//! tile per cell when a grid is created and one tile per vacated cell on every refill.
//! Sources are infallible by contract.
//!
//! Provided sources:
//! - [`RandomTiles`]: uniform draws from a palette, driven by [`SimpleRng`]
//! - [`Replay`]: a fixed sequence that cycles, for deterministic tests and replays
//! - [`FromFn`]: any `FnMut() -> T` closure

use match3_types::{Gem, MIN_GEM_KINDS};

/// Produces the next tile on demand.
pub trait TileSource<T> {
    fn next_tile(&mut self) -> T;
}

impl<T, S: TileSource<T> + ?Sized> TileSource<T> for &mut S {
    fn next_tile(&mut self) -> T {
        (**self).next_tile()
    }
}

impl<T, S: TileSource<T> + ?Sized> TileSource<T> for Box<S> {
    fn next_tile(&mut self) -> T {
        (**self).next_tile()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Takes the high bits of the state; the low bits of a power-of-two LCG have
    /// very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Uniform random tiles from a fixed palette.
#[derive(Debug, Clone)]
pub struct RandomTiles<T> {
    palette: Vec<T>,
    rng: SimpleRng,
}

impl<T: Clone> RandomTiles<T> {
    /// Returns `None` for an empty palette, which could never produce a tile.
    pub fn new(palette: Vec<T>, seed: u32) -> Option<Self> {
        if palette.is_empty() {
            return None;
        }
        Some(Self {
            palette,
            rng: SimpleRng::new(seed),
        })
    }

    pub fn palette(&self) -> &[T] {
        &self.palette
    }
}

impl RandomTiles<Gem> {
    /// The first `kinds` gems of the default palette; `kinds` is clamped to 2..=6.
    pub fn gems(kinds: usize, seed: u32) -> Self {
        let kinds = kinds.clamp(MIN_GEM_KINDS, Gem::ALL.len());
        Self {
            palette: Gem::ALL[..kinds].to_vec(),
            rng: SimpleRng::new(seed),
        }
    }
}

impl<T: Clone> TileSource<T> for RandomTiles<T> {
    fn next_tile(&mut self) -> T {
        let idx = self.rng.next_range(self.palette.len() as u32) as usize;
        self.palette[idx].clone()
    }
}

/// Replays a fixed sequence of tiles, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct Replay<T> {
    tiles: Vec<T>,
    drawn: usize,
}

impl<T: Clone> Replay<T> {
    /// Returns `None` for an empty sequence.
    pub fn new(tiles: Vec<T>) -> Option<Self> {
        if tiles.is_empty() {
            return None;
        }
        Some(Self { tiles, drawn: 0 })
    }

    /// Total number of tiles handed out so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl<T: Clone> TileSource<T> for Replay<T> {
    fn next_tile(&mut self) -> T {
        let tile = self.tiles[self.drawn % self.tiles.len()].clone();
        self.drawn += 1;
        tile
    }
}

/// Closure-backed source, see [`from_fn`].
#[derive(Debug, Clone)]
pub struct FromFn<F>(pub F);

/// Wrap a closure as a [`TileSource`].
pub fn from_fn<T, F: FnMut() -> T>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<T, F: FnMut() -> T> TileSource<T> for FromFn<F> {
    fn next_tile(&mut self) -> T {
        (self.0)()
    }
}
