//! Command layer - one input action applied to the active piece
//!
//! Commands never fail. A move that would intersect is silently rejected and
//! reported as [`CommandOutcome::Blocked`]; a hard drop always places.

use crate::grid::{Grid, LineClear};
use crate::piece::Piece;
use crate::types::GameAction;

/// Piece mutation bound to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Horizontal shift by the given number of columns
    Move(i32),
    Rotate { clockwise: bool },
    /// One row down; never freezes, gravity does that
    SoftDrop,
    HardDrop,
}

/// What executing a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Moved,
    Blocked,
    /// The piece was frozen into the grid.
    Placed(LineClear),
}

impl Command {
    /// Command for an action. Session-level actions (pause, quit, restart)
    /// have none.
    pub fn from_action(action: GameAction) -> Option<Self> {
        match action {
            GameAction::MoveLeft => Some(Command::Move(-1)),
            GameAction::MoveRight => Some(Command::Move(1)),
            GameAction::RotateCw => Some(Command::Rotate { clockwise: true }),
            GameAction::RotateCcw => Some(Command::Rotate { clockwise: false }),
            GameAction::SoftDrop => Some(Command::SoftDrop),
            GameAction::HardDrop => Some(Command::HardDrop),
            GameAction::Pause | GameAction::Quit | GameAction::Restart => None,
        }
    }

    pub fn execute(&self, piece: &mut Piece, grid: &mut Grid) -> CommandOutcome {
        let moved = match *self {
            Command::Move(delta) => piece.move_horizontal(delta, grid),
            Command::Rotate { clockwise: true } => piece.rotate(grid),
            Command::Rotate { clockwise: false } => piece.rotate_ccw(grid),
            Command::SoftDrop => piece.soft_drop_step(grid),
            Command::HardDrop => return CommandOutcome::Placed(piece.hard_drop(grid)),
        };
        if moved {
            CommandOutcome::Moved
        } else {
            CommandOutcome::Blocked
        }
    }
}
