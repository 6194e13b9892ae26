use crate::piece::Piece;
use crate::types::{ColorId, ModeKind, PoolKind};

/// Read-only view of a piece for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSnapshot {
    pub kind: PoolKind,
    pub x: i32,
    pub y: i32,
    pub rotation: usize,
    /// `None` for special pieces.
    pub color: Option<ColorId>,
    /// Frame size as `(width, height)`.
    pub size: (usize, usize),
    /// Covered cells relative to `(x, y)`.
    pub cells: Vec<(i32, i32)>,
    /// Spawn interval of a special piece.
    pub interval: Option<u32>,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        let (x, y) = (piece.x(), piece.y());
        let interval = match piece {
            Piece::Special(s) => Some(s.interval),
            Piece::Standard(_) => None,
        };
        Self {
            kind: piece.kind(),
            x,
            y,
            rotation: piece.rotation(),
            color: piece.color(),
            size: piece.frame_size(),
            cells: piece
                .footprint_cells()
                .map(|(cx, cy)| (cx - x, cy - y))
                .collect(),
            interval,
        }
    }
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Cell values, row-major (see [`crate::types::Cell::value`]).
    pub board: Vec<i8>,
    pub active: Option<PieceSnapshot>,
    /// Row the active piece would land on.
    pub ghost_y: Option<i32>,
    pub next: Option<PieceSnapshot>,
    pub score: u32,
    pub level: f32,
    pub display_level: u32,
    pub lines: u32,
    pub blocks_placed: u32,
    pub paused: bool,
    pub game_over: bool,
    pub mode: ModeKind,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> i8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.board[y * self.width + x]
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
