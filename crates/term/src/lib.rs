//! Terminal board renderer.
//!
//! A small rendering layer for playing on a terminal: the board view draws into a
//! plain framebuffer, which the renderer flushes through crossterm.
//!
//! Goals:
//! - Keep `core` free of any terminal concerns
//! - Keep the view pure so layouts can be unit-tested
//! - Control the aspect ratio (3 columns per board cell)

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use match3_core as core;
pub use match3_types as types;

pub use board_view::{gem_color, BoardScene, BoardView, Viewport, HELP_LINE};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
