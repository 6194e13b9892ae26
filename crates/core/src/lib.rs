//! Core game logic - pure, deterministic, and testable
//!
//! Grid, pieces, the command layer and the game-mode policy. Nothing here
//! touches the terminal, the filesystem or the clock, so a seed and a list of
//! actions fully determine a session.
//!
//! # Module Structure
//!
//! - [`grid`]: settled cells, intersection test, freezing, row compaction and
//!   the special column wipe
//! - [`pieces`]: rotation tables of the seven standard kinds
//! - [`piece`]: the falling piece (standard or special) and its tentative moves
//! - [`factory`]: constructor registry and seeded random draws over a pool
//! - [`command`]: maps an input action onto a piece/grid mutation
//! - [`scoring`]: line points, level progression, gravity clock
//! - [`game_state`]: session lifecycle, per-frame processing, placement events
//! - [`snapshot`]: read-only view for renderers
//!
//! # Rules
//!
//! | Rows cleared | Points |
//! |--------------|--------|
//! | 1 | 40 |
//! | 2 | 100 |
//! | 3 | 300 |
//! | 4 | 1200 |
//!
//! Special pieces never score. They wipe every column they span over the
//! full board height instead of taking part in row clearing.
//!
//! # Example
//!
//! ```
//! use rocket_tetris_core::{FrameOutcome, GameState};
//! use rocket_tetris_types::{GameAction, GameConfig};
//!
//! let mut game = GameState::new(GameConfig::default(), 12345);
//! game.start();
//!
//! let outcome = game.frame(&[GameAction::MoveRight, GameAction::HardDrop], false);
//! assert_eq!(outcome, FrameOutcome::Continue);
//! assert_eq!(game.blocks_placed(), 1);
//! ```

pub mod command;
pub mod factory;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod scoring;
pub mod snapshot;

pub use rocket_tetris_types as types;

pub use command::{Command, CommandOutcome};
pub use factory::{constructor_for, Constructor, PieceFactory};
pub use game_state::{FrameOutcome, GameState, Phase, PlacementEvent};
pub use grid::{Grid, LineClear};
pub use piece::{Footprint, Piece, PieceCells, SpecialPiece, Tetromino};
pub use pieces::{get_figure, rotation_states};
pub use scoring::{line_clear_score, GravityClock, Level};
pub use snapshot::{GameSnapshot, PieceSnapshot};
