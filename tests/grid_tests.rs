//! Grid tests - collision, freezing, row compaction, column wipe

use rocket_tetris::core::{Grid, LineClear, Piece};
use rocket_tetris::types::{Cell, PieceKind, SpecialKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(grid: &mut Grid, y: i32) {
    for x in 0..grid.width() as i32 {
        grid.set(x, y, Cell::Filled(1));
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(BOARD_WIDTH, BOARD_HEIGHT);
    assert_eq!(grid.width(), 10);
    assert_eq!(grid.height(), 20);
    assert!(grid.to_values().iter().all(|&v| v == 0));
}

#[test]
fn test_grid_get_set_out_of_bounds() {
    let mut grid = Grid::new(10, 20);
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(10, 0), None);
    assert_eq!(grid.get(0, 20), None);
    assert!(!grid.set(-1, 0, Cell::Filled(1)));
    assert!(!grid.set(0, 20, Cell::Filled(1)));
    assert!(grid.set(9, 19, Cell::Filled(4)));
    assert_eq!(grid.get(9, 19), Some(Cell::Filled(4)));
}

#[test]
fn test_intersects_reports_wall_floor_and_ceiling() {
    let grid = Grid::new(10, 20);
    let mut piece = Piece::standard(PieceKind::O, 1, 10);

    // O occupies frame columns 1..=2 and rows 0..=1.
    piece.set_position(-2, 5);
    assert!(grid.intersects(&piece));
    piece.set_position(-1, 5);
    assert!(!grid.intersects(&piece));
    piece.set_position(8, 5);
    assert!(grid.intersects(&piece));
    piece.set_position(3, 19);
    assert!(grid.intersects(&piece));
    piece.set_position(3, -1);
    assert!(grid.intersects(&piece));
}

#[test]
fn test_intersects_is_a_pure_query() {
    let mut grid = Grid::new(10, 20);
    grid.set(4, 10, Cell::Filled(2));
    let before = grid.clone();
    let mut piece = Piece::standard(PieceKind::T, 1, 10);
    piece.set_position(3, 9);
    let _ = grid.intersects(&piece);
    assert_eq!(grid, before);
}

#[test]
fn test_frozen_piece_blocks_the_next_one() {
    let mut grid = Grid::new(10, 20);
    let mut first = Piece::standard(PieceKind::O, 3, 10);
    first.hard_drop(&mut grid);

    let mut second = Piece::standard(PieceKind::O, 5, 10);
    second.set_position(first.x(), first.y());
    assert!(grid.intersects(&second));
    second.set_position(first.x(), first.y() - 2);
    assert!(!grid.intersects(&second));
}

#[test]
fn test_freeze_writes_color() {
    let mut grid = Grid::new(10, 20);
    let mut piece = Piece::standard(PieceKind::T, 6, 10);
    piece.set_position(0, 0);
    let cleared = grid.freeze(&piece);
    assert!(cleared.is_empty());
    // T rotation 0: offsets 1, 4, 5, 6.
    assert_eq!(grid.get(1, 0), Some(Cell::Filled(6)));
    assert_eq!(grid.get(0, 1), Some(Cell::Filled(6)));
    assert_eq!(grid.get(1, 1), Some(Cell::Filled(6)));
    assert_eq!(grid.get(2, 1), Some(Cell::Filled(6)));
    assert_eq!(grid.occupied_count(), 4);
}

#[test]
fn test_clear_without_full_rows_changes_nothing() {
    let mut grid = Grid::new(10, 20);
    for x in 0..9 {
        grid.set(x, 19, Cell::Filled(1));
    }
    grid.set(3, 5, Cell::Filled(2));
    let before = grid.clone();
    assert_eq!(grid.clear_full_rows(), LineClear::none());
    assert_eq!(grid, before);
}

#[test]
fn test_two_bottom_rows_cascade() {
    let mut grid = Grid::new(10, 20);
    fill_row(&mut grid, 19);
    fill_row(&mut grid, 18);
    grid.set(2, 17, Cell::Filled(3));
    grid.set(7, 10, Cell::Filled(4));

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.count(), 2);
    assert_eq!(cleared.rows, vec![19, 19]);
    assert!(grid.row(0).unwrap().iter().all(Cell::is_empty));
    assert!(grid.row(1).unwrap().iter().all(Cell::is_empty));
    assert_eq!(grid.get(2, 19), Some(Cell::Filled(3)));
    assert_eq!(grid.get(7, 12), Some(Cell::Filled(4)));
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_non_adjacent_full_rows() {
    let mut grid = Grid::new(10, 20);
    fill_row(&mut grid, 19);
    fill_row(&mut grid, 17);
    fill_row(&mut grid, 15);
    grid.set(0, 18, Cell::Filled(2));
    grid.set(0, 16, Cell::Filled(3));

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.rows, vec![19, 18, 17]);
    assert_eq!(grid.get(0, 19), Some(Cell::Filled(2)));
    assert_eq!(grid.get(0, 18), Some(Cell::Filled(3)));
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_full_top_row_can_be_cleared() {
    let mut grid = Grid::new(10, 20);
    fill_row(&mut grid, 0);
    grid.set(5, 1, Cell::Filled(2));

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.rows, vec![0]);
    assert!(grid.row(0).unwrap().iter().all(Cell::is_empty));
    assert_eq!(grid.get(5, 1), Some(Cell::Filled(2)));
}

#[test]
fn test_whole_board_full() {
    let mut grid = Grid::new(4, 6);
    for y in 0..6 {
        fill_row(&mut grid, y);
    }
    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.count(), 6);
    assert_eq!(cleared.rows, vec![5; 6]);
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_rocket_wipes_its_columns_over_full_height() {
    let mut grid = Grid::new(10, 20);
    for y in 0..20 {
        for x in 0..10 {
            if (x + y) % 3 != 0 {
                grid.set(x, y, Cell::Filled(1));
            }
        }
    }
    // Make room for the rocket at the top.
    for y in 0..6 {
        for x in 4..7 {
            grid.set(x, y, Cell::Empty);
        }
    }
    let mut rocket = Piece::special(SpecialKind::Rocket, 10);
    rocket.set_position(4, 0);
    assert!(!grid.intersects(&rocket));

    let cleared = rocket.hard_drop(&mut grid);
    assert_eq!(cleared, LineClear::none());
    for y in 0..20 {
        for x in 4..7 {
            assert_eq!(grid.get(x, y), Some(Cell::Empty), "({}, {})", x, y);
        }
    }
    assert!(grid.cells().iter().all(|c| *c != Cell::Marker));
    // Columns outside the footprint are untouched.
    assert_eq!(grid.get(3, 19), Some(Cell::Filled(1)));
}

#[test]
fn test_special_block_at_the_right_wall() {
    let mut grid = Grid::new(10, 20);
    for y in 0..20 {
        grid.set(9, y, Cell::Filled(5));
        grid.set(6, y, Cell::Filled(5));
    }
    let removed = grid.process_special_block(7, 14, 3, 6);
    assert_eq!(removed, 20);
    assert!((0..20).all(|y| grid.get(6, y) == Some(Cell::Filled(5))));
}
