//! BoardView: maps a gem grid plus cursor state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Grid;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Gem, Position};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct BoardScene<'a> {
    pub grid: &'a Grid<Gem>,
    pub cursor: Position,
    pub selected: Option<Position>,
    pub hint: Option<(Position, Position)>,
    pub moves: u32,
    /// One-line status under the board (last move outcome etc.)
    pub message: &'a str,
}

pub const HELP_LINE: &str = "arrows/hjkl move  space select  esc cancel  ? hint  r restart  q quit";

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SELECTED_BG: Rgb = Rgb::new(90, 90, 110);
const HINT_BG: Rgb = Rgb::new(55, 55, 70);

pub fn gem_color(gem: Gem) -> Rgb {
    match gem {
        Gem::Red => Rgb::new(230, 70, 70),
        Gem::Green => Rgb::new(90, 210, 90),
        Gem::Blue => Rgb::new(80, 140, 240),
        Gem::Yellow => Rgb::new(235, 215, 80),
        Gem::Purple => Rgb::new(180, 100, 220),
        Gem::Orange => Rgb::new(240, 150, 60),
    }
}

/// A lightweight terminal renderer for the gem board.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 3 columns per cell leaves room for the cursor brackets.
        Self { cell_w: 3 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Top-left corner of the board frame inside the viewport.
    fn origin(&self, scene: &BoardScene<'_>, viewport: Viewport) -> (u16, u16) {
        let frame_w = self.board_w(scene) + 2;
        let frame_h = scene.grid.height() as u16 + 2 + 3;
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    fn board_w(&self, scene: &BoardScene<'_>) -> u16 {
        scene.grid.width() as u16 * self.cell_w
    }

    /// Render into an existing framebuffer, resizing it to the viewport if needed.
    pub fn render_into(&self, scene: &BoardScene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        if fb.width() != viewport.width || fb.height() != viewport.height {
            *fb = FrameBuffer::new(viewport.width, viewport.height);
        } else {
            fb.fill_rect(0, 0, viewport.width, viewport.height, Cell::default());
        }

        let (x0, y0) = self.origin(scene, viewport);
        let board_w = self.board_w(scene);
        let board_h = scene.grid.height() as u16;

        self.draw_border(fb, x0, y0, board_w + 2, board_h + 2);

        let hinted = |pos: Position| scene.hint.is_some_and(|(a, b)| a == pos || b == pos);
        for piece in scene.grid.pieces() {
            let pos = piece.position;
            let bg = if scene.selected == Some(pos) {
                SELECTED_BG
            } else if hinted(pos) {
                HINT_BG
            } else {
                BOARD_BG
            };
            let style = CellStyle::new(gem_color(*piece.value), bg).bold();
            let x = x0 + 1 + pos.col as u16 * self.cell_w;
            let y = y0 + 1 + pos.row as u16;

            fb.fill_rect(x, y, self.cell_w, 1, style.into_cell(' '));
            fb.set(x + self.cell_w / 2, y, style.into_cell(piece.value.glyph()));
            if pos == scene.cursor && self.cell_w >= 3 {
                let bracket = CellStyle::new(Rgb::new(255, 255, 255), bg).bold();
                fb.set(x, y, bracket.into_cell('['));
                fb.set(x + self.cell_w - 1, y, bracket.into_cell(']'));
            }
        }

        let text = CellStyle::default();
        let status_y = y0 + board_h + 2;
        fb.put_str(x0, status_y, &format!("Moves: {}", scene.moves), text);
        fb.put_str(x0, status_y + 1, scene.message, text);
        let dim = CellStyle::new(Rgb::new(130, 130, 130), Rgb::new(0, 0, 0));
        fb.put_str(x0, status_y + 2, HELP_LINE, dim);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &BoardScene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::default();
        let (right, bottom) = (x + w - 1, y + h - 1);
        for cx in x + 1..right {
            fb.set(cx, y, style.into_cell('─'));
            fb.set(cx, bottom, style.into_cell('─'));
        }
        for cy in y + 1..bottom {
            fb.set(x, cy, style.into_cell('│'));
            fb.set(right, cy, style.into_cell('│'));
        }
        fb.set(x, y, style.into_cell('┌'));
        fb.set(right, y, style.into_cell('┐'));
        fb.set(x, bottom, style.into_cell('└'));
        fb.set(right, bottom, style.into_cell('┘'));
    }
}
