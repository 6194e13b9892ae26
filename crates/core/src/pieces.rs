//! Pieces module - standard tetromino rotation tables
//!
//! Every rotation state lists the four occupied cells of a 4x4 frame as
//! offsets `row * 4 + col`. Kinds have between one and four states; the
//! rotation index wraps modulo the state count.

use crate::types::{PieceKind, FRAME_SIZE};

/// Occupied offsets of one rotation state.
pub type FigureOffsets = [u8; 4];

const I_STATES: [FigureOffsets; 2] = [[1, 5, 9, 13], [4, 5, 6, 7]];
const Z_STATES: [FigureOffsets; 2] = [[4, 5, 9, 10], [2, 6, 5, 9]];
const S_STATES: [FigureOffsets; 2] = [[6, 7, 9, 10], [1, 5, 6, 10]];
const L_STATES: [FigureOffsets; 4] = [[1, 2, 5, 9], [0, 4, 5, 6], [1, 5, 9, 8], [4, 5, 6, 10]];
const J_STATES: [FigureOffsets; 4] = [[1, 2, 6, 10], [5, 6, 7, 9], [2, 6, 10, 11], [3, 5, 6, 7]];
const T_STATES: [FigureOffsets; 4] = [[1, 4, 5, 6], [1, 4, 5, 9], [4, 5, 6, 9], [1, 5, 6, 9]];
const O_STATES: [FigureOffsets; 1] = [[1, 2, 5, 6]];

/// All rotation states of a kind, in clockwise order.
pub fn rotation_states(kind: PieceKind) -> &'static [FigureOffsets] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::O => &O_STATES,
    }
}

pub fn rotation_count(kind: PieceKind) -> usize {
    rotation_states(kind).len()
}

/// Offsets for a rotation index (wrapped into range).
pub fn get_figure(kind: PieceKind, rotation: usize) -> &'static FigureOffsets {
    let states = rotation_states(kind);
    &states[rotation % states.len()]
}

/// Split a frame offset into `(col, row)`.
#[inline(always)]
pub fn offset_to_xy(offset: u8) -> (i32, i32) {
    let frame = FRAME_SIZE as u8;
    ((offset % frame) as i32, (offset / frame) as i32)
}

/// Column that centers a frame of `frame_width` on a board of `board_width`.
pub fn centered_x(board_width: usize, frame_width: usize) -> i32 {
    (board_width as i32 - frame_width as i32).div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_four_distinct_cells_inside_the_frame() {
        for kind in PieceKind::ALL {
            for state in rotation_states(kind) {
                let mut seen = [false; FRAME_SIZE * FRAME_SIZE];
                for &offset in state {
                    assert!((offset as usize) < FRAME_SIZE * FRAME_SIZE);
                    assert!(!seen[offset as usize], "{:?} repeats offset {}", kind, offset);
                    seen[offset as usize] = true;
                }
            }
        }
    }

    #[test]
    fn state_counts_match_the_shape_symmetry() {
        assert_eq!(rotation_count(PieceKind::O), 1);
        assert_eq!(rotation_count(PieceKind::I), 2);
        assert_eq!(rotation_count(PieceKind::S), 2);
        assert_eq!(rotation_count(PieceKind::Z), 2);
        assert_eq!(rotation_count(PieceKind::T), 4);
        assert_eq!(rotation_count(PieceKind::J), 4);
        assert_eq!(rotation_count(PieceKind::L), 4);
    }

    #[test]
    fn figure_index_wraps() {
        assert_eq!(get_figure(PieceKind::I, 2), get_figure(PieceKind::I, 0));
        assert_eq!(get_figure(PieceKind::O, 3), &[1, 2, 5, 6]);
    }

    #[test]
    fn offsets_split_row_major() {
        assert_eq!(offset_to_xy(0), (0, 0));
        assert_eq!(offset_to_xy(6), (2, 1));
        assert_eq!(offset_to_xy(13), (1, 3));
    }

    #[test]
    fn centering_floors_like_integer_division() {
        assert_eq!(centered_x(10, 4), 3);
        assert_eq!(centered_x(10, 3), 3);
        assert_eq!(centered_x(3, 4), -1);
    }
}
