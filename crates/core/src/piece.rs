//! Piece module - the falling piece and its movement rules
//!
//! A piece is either a standard tetromino (shape from a rotation table inside
//! a 4x4 frame) or a special piece with a fixed rectangular footprint. Both
//! variants share one capability set: report occupied cells, move sideways,
//! rotate, step down and hard drop. Every move is tentative: the piece shifts,
//! asks the grid whether it now intersects, and reverts if it does.

use crate::grid::{Grid, LineClear};
use crate::pieces::{centered_x, get_figure, offset_to_xy, rotation_count};
use crate::types::{ColorId, PieceKind, PoolKind, SpecialKind, FRAME_SIZE};

/// Standard tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Index into the kind's rotation table.
    pub rotation: usize,
    /// Column of the frame's top-left corner.
    pub x: i32,
    /// Row of the frame's top-left corner.
    pub y: i32,
    pub color: ColorId,
}

/// Sub-rectangle of a special piece that takes part in collision tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub dx: usize,
    pub dy: usize,
    pub width: usize,
    pub height: usize,
}

/// Special piece with a fixed rectangular footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecialPiece {
    pub kind: SpecialKind,
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    pub collision: Footprint,
    /// Nominal spawn interval (every Nth block).
    pub interval: u32,
}

impl SpecialPiece {
    pub fn new(kind: SpecialKind, x: i32, y: i32) -> Self {
        let (width, height) = kind.footprint();
        let collision = match kind {
            SpecialKind::Rocket => Footprint {
                dx: 0,
                dy: 0,
                width,
                height,
            },
        };
        Self {
            kind,
            x,
            y,
            width,
            height,
            collision,
            interval: kind.interval(),
        }
    }
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Standard(Tetromino),
    Special(SpecialPiece),
}

impl Piece {
    /// Standard piece at its spawn position: centered, top row.
    pub fn standard(kind: PieceKind, color: ColorId, board_width: usize) -> Self {
        Piece::Standard(Tetromino {
            kind,
            rotation: 0,
            x: centered_x(board_width, FRAME_SIZE),
            y: 0,
            color,
        })
    }

    /// Special piece at its spawn position: centered on its own width, top row.
    pub fn special(kind: SpecialKind, board_width: usize) -> Self {
        let (width, _) = kind.footprint();
        Piece::Special(SpecialPiece::new(kind, centered_x(board_width, width), 0))
    }

    pub fn kind(&self) -> PoolKind {
        match self {
            Piece::Standard(t) => PoolKind::Standard(t.kind),
            Piece::Special(s) => PoolKind::Special(s.kind),
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Piece::Special(_))
    }

    pub fn x(&self) -> i32 {
        match self {
            Piece::Standard(t) => t.x,
            Piece::Special(s) => s.x,
        }
    }

    pub fn y(&self) -> i32 {
        match self {
            Piece::Standard(t) => t.y,
            Piece::Special(s) => s.y,
        }
    }

    /// Rotation index (always 0 for special pieces).
    pub fn rotation(&self) -> usize {
        match self {
            Piece::Standard(t) => t.rotation,
            Piece::Special(_) => 0,
        }
    }

    /// Color written on freeze. Special pieces have none.
    pub fn color(&self) -> Option<ColorId> {
        match self {
            Piece::Standard(t) => Some(t.color),
            Piece::Special(_) => None,
        }
    }

    /// Width and height of the bounding frame.
    pub fn frame_size(&self) -> (usize, usize) {
        match self {
            Piece::Standard(_) => (FRAME_SIZE, FRAME_SIZE),
            Piece::Special(s) => (s.width, s.height),
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        match self {
            Piece::Standard(t) => {
                t.x = x;
                t.y = y;
            }
            Piece::Special(s) => {
                s.x = x;
                s.y = y;
            }
        }
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        let (x, y) = (self.x(), self.y());
        self.set_position(x + dx, y + dy);
    }

    /// Occupied frame offsets of the current rotation state.
    ///
    /// Empty for special pieces, which use their footprint instead.
    pub fn get_figure(&self) -> &'static [u8] {
        match self {
            Piece::Standard(t) => get_figure(t.kind, t.rotation),
            Piece::Special(_) => &[],
        }
    }

    /// Absolute board cells that take part in collision tests.
    pub fn cells(&self) -> PieceCells {
        match self {
            Piece::Standard(t) => PieceCells::figure(t.x, t.y, get_figure(t.kind, t.rotation)),
            Piece::Special(s) => PieceCells::rect(
                s.x + s.collision.dx as i32,
                s.y + s.collision.dy as i32,
                s.collision.width,
                s.collision.height,
            ),
        }
    }

    /// Absolute board cells the piece covers visually.
    pub fn footprint_cells(&self) -> PieceCells {
        match self {
            Piece::Standard(_) => self.cells(),
            Piece::Special(s) => PieceCells::rect(s.x, s.y, s.width, s.height),
        }
    }

    /// Shift sideways by `delta` columns unless that would intersect.
    ///
    /// Returns whether the piece moved.
    pub fn move_horizontal(&mut self, delta: i32, grid: &Grid) -> bool {
        self.shift(delta, 0);
        // The collision footprint may be narrower than the piece itself.
        let out_of_bounds = match self {
            Piece::Special(s) => s.x < 0 || s.x + s.width as i32 > grid.width() as i32,
            Piece::Standard(_) => false,
        };
        let blocked = out_of_bounds || grid.intersects(self);
        if blocked {
            self.shift(-delta, 0);
        }
        !blocked
    }

    /// Advance to the next rotation state unless that would intersect.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        self.rotate_by(1, grid)
    }

    /// Go back to the previous rotation state unless that would intersect.
    pub fn rotate_ccw(&mut self, grid: &Grid) -> bool {
        self.rotate_by(-1, grid)
    }

    fn rotate_by(&mut self, step: i32, grid: &Grid) -> bool {
        let Piece::Standard(t) = self else {
            return false;
        };
        let previous = t.rotation;
        let count = rotation_count(t.kind) as i32;
        t.rotation = (previous as i32 + step).rem_euclid(count) as usize;
        if grid.intersects(self) {
            self.set_rotation(previous);
            return false;
        }
        true
    }

    fn set_rotation(&mut self, rotation: usize) {
        if let Piece::Standard(t) = self {
            t.rotation = rotation;
        }
    }

    /// Move down one row. Returns false (unchanged) when blocked; the caller
    /// is then expected to freeze the piece.
    pub fn soft_drop_step(&mut self, grid: &Grid) -> bool {
        self.shift(0, 1);
        if grid.intersects(self) {
            self.shift(0, -1);
            return false;
        }
        true
    }

    /// Row the piece would come to rest on if dropped now.
    pub fn landing_y(&self, grid: &Grid) -> i32 {
        let mut probe = *self;
        while !grid.intersects(&probe) {
            probe.shift(0, 1);
        }
        probe.y() - 1
    }

    /// Drop to the last legal row and freeze into the grid.
    pub fn hard_drop(&mut self, grid: &mut Grid) -> LineClear {
        let y = self.landing_y(grid);
        self.set_position(self.x(), y);
        grid.freeze(self)
    }
}

/// Iterator over the absolute cells of a piece
///
/// Stack-only so collision tests never allocate.
#[derive(Debug, Clone)]
pub struct PieceCells {
    x: i32,
    y: i32,
    shape: CellShape,
    next: usize,
}

#[derive(Debug, Clone, Copy)]
enum CellShape {
    Figure(&'static [u8]),
    Rect { width: usize, height: usize },
}

impl PieceCells {
    fn figure(x: i32, y: i32, offsets: &'static [u8]) -> Self {
        Self {
            x,
            y,
            shape: CellShape::Figure(offsets),
            next: 0,
        }
    }

    fn rect(x: i32, y: i32, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            shape: CellShape::Rect { width, height },
            next: 0,
        }
    }
}

impl Iterator for PieceCells {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let (dx, dy) = match self.shape {
            CellShape::Figure(offsets) => offset_to_xy(*offsets.get(self.next)?),
            CellShape::Rect { width, height } => {
                if width == 0 || self.next >= width * height {
                    return None;
                }
                ((self.next % width) as i32, (self.next / width) as i32)
            }
        };
        self.next += 1;
        Some((self.x + dx, self.y + dy))
    }
}
