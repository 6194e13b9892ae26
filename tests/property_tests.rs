//! Property tests - bounds, rotation revert, row compaction, column wipe

use proptest::prelude::*;

use rocket_tetris::core::{Grid, Piece};
use rocket_tetris::types::{Cell, PieceKind, SpecialKind};

fn piece_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn any_piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        4 => (piece_kind(), 0usize..4).prop_map(|(kind, turns)| {
            let grid = Grid::new(10, 20);
            let mut piece = Piece::standard(kind, 1, 10);
            piece.set_position(3, 8);
            for _ in 0..turns {
                piece.rotate(&grid);
            }
            piece
        }),
        1 => Just(Piece::special(SpecialKind::Rocket, 10)),
    ]
}

/// Random settled cells, row-major, roughly a quarter filled.
fn grid_values(width: usize, height: usize) -> impl Strategy<Value = Vec<i8>> {
    prop::collection::vec(prop_oneof![3 => Just(0i8), 1 => 1i8..7], width * height)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn intersects_whenever_a_cell_leaves_the_board(
        mut piece in any_piece(),
        x in -6i32..14,
        y in -6i32..24,
    ) {
        let grid = Grid::new(10, 20);
        piece.set_position(x, y);
        let outside = piece
            .cells()
            .any(|(cx, cy)| cx < 0 || cx >= 10 || cy < 0 || cy >= 20);
        prop_assert_eq!(grid.intersects(&piece), outside);
    }

    #[test]
    fn failed_rotation_keeps_rotation_index(
        kind in piece_kind(),
        turns in 0usize..4,
        x in -3i32..10,
        y in 0i32..18,
        values in grid_values(10, 20),
    ) {
        let grid = Grid::from_values(10, 20, &values).unwrap();
        let mut piece = Piece::standard(kind, 1, 10);
        for _ in 0..turns {
            piece.rotate(&Grid::new(10, 20));
        }
        piece.set_position(x, y);
        let before = piece;
        if !piece.rotate(&grid) {
            prop_assert_eq!(piece, before);
        }
        let before = piece;
        if !piece.rotate_ccw(&grid) {
            prop_assert_eq!(piece, before);
        }
    }

    #[test]
    fn failed_moves_leave_the_piece_in_place(
        mut piece in any_piece(),
        delta in prop::sample::select(vec![-1i32, 1]),
        values in grid_values(10, 20),
    ) {
        let mut grid = Grid::from_values(10, 20, &values).unwrap();
        // Keep the spawn area clear so the piece starts legal.
        for (x, y) in piece.footprint_cells() {
            grid.set(x, y, Cell::Empty);
        }
        let before = piece;
        if !piece.move_horizontal(delta, &grid) {
            prop_assert_eq!(piece, before);
        } else {
            prop_assert_eq!(piece.x(), before.x() + delta);
            prop_assert!(!grid.intersects(&piece));
        }
    }

    #[test]
    fn clearing_keeps_non_full_rows_in_order(values in grid_values(6, 12)) {
        let mut grid = Grid::from_values(6, 12, &values).unwrap();
        let kept: Vec<Vec<Cell>> = (0..12)
            .filter(|&y| !grid.is_row_full(y))
            .map(|y| grid.row(y).unwrap().to_vec())
            .collect();

        let cleared = grid.clear_full_rows();
        prop_assert_eq!(cleared.count() + kept.len(), 12);
        for y in 0..cleared.count() {
            prop_assert!(grid.row(y).unwrap().iter().all(Cell::is_empty));
        }
        for (i, row) in kept.iter().enumerate() {
            prop_assert_eq!(grid.row(cleared.count() + i), Some(row.as_slice()));
        }
        prop_assert!(grid.clear_full_rows().is_empty());
    }

    #[test]
    fn special_block_empties_its_columns(
        values in grid_values(10, 20),
        x0 in 0i32..8,
        y0 in 0i32..15,
    ) {
        let mut grid = Grid::from_values(10, 20, &values).unwrap();
        let untouched: Vec<Vec<Option<Cell>>> = (0..10)
            .filter(|&x| x < x0 || x >= x0 + 3)
            .map(|x| (0..20).map(|y| grid.get(x, y)).collect())
            .collect();

        grid.process_special_block(x0, y0, 3, 6);

        for x in x0..x0 + 3 {
            for y in 0..20 {
                prop_assert_eq!(grid.get(x, y), Some(Cell::Empty));
            }
        }
        let after: Vec<Vec<Option<Cell>>> = (0..10)
            .filter(|&x| x < x0 || x >= x0 + 3)
            .map(|x| (0..20).map(|y| grid.get(x, y)).collect())
            .collect();
        prop_assert_eq!(after, untouched);
    }
}
