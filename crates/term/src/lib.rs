//! Terminal "game renderer" module.
//!
//! Renders a read-only [`core::GameSnapshot`] into a framebuffer of styled
//! glyphs, then flushes only what changed to the terminal through crossterm.
//! No ratatui widgets or layout: the board is drawn cell by cell, two columns
//! per board cell to keep blocks roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use rocket_tetris_core as core;
pub use rocket_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{palette_color, GameView, Viewport, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
