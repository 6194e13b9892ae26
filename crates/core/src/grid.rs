//! Grid module - settled cells, collision queries and row compaction
//!
//! The grid is `width` columns by `height` rows stored as a flat row-major
//! vector. Coordinates are `(x, y)` with `x` growing to the right and `y`
//! growing downwards from the top row (0).
//!
//! The grid never rejects a placement with an error. Legality is answered by
//! [`Grid::intersects`]; callers only freeze pieces they have verified.

use tracing::debug;

use crate::piece::Piece;
use crate::types::Cell;

/// Rows removed by one freeze.
///
/// Indices are the scan position at which each full row was found, bottom
/// first. The scan re-examines a position after collapsing it, so two
/// adjacent full rows at the bottom both report the bottom index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    pub rows: Vec<usize>,
}

impl LineClear {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Dimensions are fixed for the grid's lifetime.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Build a grid from numeric cell values, row-major.
    ///
    /// Returns `None` when the slice length does not match or a value is not
    /// a valid cell.
    pub fn from_values(width: usize, height: usize, values: &[i8]) -> Option<Self> {
        if values.len() != width * height {
            return None;
        }
        let cells = values
            .iter()
            .map(|&v| Cell::from_value(v))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            width,
            height,
            cells,
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(x, y)`, `None` if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(x, y)`. Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    #[inline(always)]
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32
    }

    /// Within bounds and holding a settled block.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_occupied())
    }

    /// Cells of row `y`, `None` if out of bounds.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// A row is full when none of its cells is empty.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| !row.iter().any(Cell::is_empty))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Numeric cell values, row-major.
    pub fn to_values(&self) -> Vec<i8> {
        self.cells.iter().map(Cell::value).collect()
    }

    /// Number of settled blocks.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Whether any collision cell of `piece` is out of bounds or on a
    /// settled block. Pure query.
    pub fn intersects(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .any(|(x, y)| self.is_out_of_bounds(x, y) || self.is_occupied(x, y))
    }

    /// Write `piece` into the grid permanently and resolve the result.
    ///
    /// Standard pieces write their color and trigger row clearing. Special
    /// pieces write markers over their footprint and wipe every column they
    /// span; they never report cleared rows.
    pub fn freeze(&mut self, piece: &Piece) -> LineClear {
        match piece.color() {
            Some(color) => {
                for (x, y) in piece.cells() {
                    self.set(x, y, Cell::Filled(color));
                }
                self.clear_full_rows()
            }
            None => {
                for (x, y) in piece.footprint_cells() {
                    self.set(x, y, Cell::Marker);
                }
                let (width, height) = piece.frame_size();
                self.process_special_block(piece.x(), piece.y(), width, height);
                LineClear::none()
            }
        }
    }

    /// Remove every full row, compacting the rows above it.
    ///
    /// Scans bottom to top over the whole height, row 0 included. After a
    /// row is removed the same index is examined again, since a new row has
    /// moved into it.
    pub fn clear_full_rows(&mut self) -> LineClear {
        let mut cleared = LineClear::none();
        let mut y = self.height;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                cleared.rows.push(row);
                self.collapse_row(row);
            } else {
                y -= 1;
            }
        }
        if !cleared.is_empty() {
            debug!(rows = ?cleared.rows, "cleared full rows");
        }
        cleared
    }

    /// Drop everything above `y` by one row and empty the top row.
    fn collapse_row(&mut self, y: usize) {
        let width = self.width;
        for row in (1..=y).rev() {
            let src = (row - 1) * width;
            self.cells.copy_within(src..src + width, row * width);
        }
        self.cells[..width].fill(Cell::Empty);
    }

    /// Resolve a landed special piece: clear its markers, then empty each
    /// spanned column over the full board height.
    ///
    /// Returns how many settled blocks were removed.
    pub fn process_special_block(
        &mut self,
        start_x: i32,
        start_y: i32,
        width: usize,
        height: usize,
    ) -> usize {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                if self.get(start_x + dx, start_y + dy) == Some(Cell::Marker) {
                    self.set(start_x + dx, start_y + dy, Cell::Empty);
                }
            }
        }

        let mut removed = 0;
        for x in start_x..start_x + width as i32 {
            for y in 0..self.height as i32 {
                if self.is_occupied(x, y) {
                    removed += 1;
                }
                self.set(x, y, Cell::Empty);
            }
        }
        debug!(start_x, width, removed, "special block wiped columns");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, SpecialKind};

    fn fill_row(grid: &mut Grid, y: i32, color: u8) {
        for x in 0..grid.width() as i32 {
            grid.set(x, y, Cell::Filled(color));
        }
    }

    #[test]
    fn test_index_calculation() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn from_values_rejects_bad_input() {
        assert!(Grid::from_values(2, 2, &[0, 1, 2, -1]).is_some());
        assert!(Grid::from_values(2, 2, &[0, 1, 2]).is_none());
        assert!(Grid::from_values(2, 2, &[0, 1, 2, 9]).is_none());
    }

    #[test]
    fn markers_do_not_block() {
        let mut grid = Grid::new(10, 20);
        grid.set(4, 0, Cell::Marker);
        let piece = Piece::standard(PieceKind::O, 1, 10);
        assert!(!grid.intersects(&piece));
        assert!(!grid.is_occupied(4, 0));
    }

    #[test]
    fn row_with_a_marker_is_full() {
        let mut grid = Grid::new(4, 4);
        fill_row(&mut grid, 3, 1);
        grid.set(2, 3, Cell::Marker);
        assert!(grid.is_row_full(3));
        assert!(!grid.is_row_full(2));
        assert!(!grid.is_row_full(4));
        assert_eq!(grid.row(3).map(<[Cell]>::len), Some(4));
        assert!(grid.row(4).is_none());
    }

    #[test]
    fn cleared_rows_report_scan_positions() {
        let mut grid = Grid::new(4, 6);
        fill_row(&mut grid, 5, 1);
        fill_row(&mut grid, 3, 2);
        grid.set(0, 4, Cell::Filled(3));
        grid.set(1, 2, Cell::Filled(4));

        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.rows, vec![5, 4]);
        assert_eq!(grid.get(0, 5), Some(Cell::Filled(3)));
        assert_eq!(grid.get(1, 4), Some(Cell::Filled(4)));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn full_top_row_is_cleared() {
        let mut grid = Grid::new(4, 4);
        fill_row(&mut grid, 0, 5);
        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.rows, vec![0]);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn special_freeze_wipes_whole_columns_and_leaves_no_markers() {
        let mut grid = Grid::new(10, 20);
        for y in 10..20 {
            for x in 0..10 {
                if x != 7 {
                    grid.set(x, y, Cell::Filled(2));
                }
            }
        }
        let mut rocket = Piece::special(SpecialKind::Rocket, 10);
        rocket.set_position(3, 4);

        let cleared = grid.freeze(&rocket);
        assert!(cleared.is_empty());
        for y in 0..20 {
            for x in 3..6 {
                assert_eq!(grid.get(x, y), Some(Cell::Empty));
            }
        }
        assert!(grid.cells().iter().all(|c| *c != Cell::Marker));
        assert_eq!(grid.get(0, 19), Some(Cell::Filled(2)));
    }

    #[test]
    fn process_special_block_counts_removed_blocks() {
        let mut grid = Grid::new(5, 5);
        grid.set(1, 4, Cell::Filled(1));
        grid.set(2, 0, Cell::Filled(1));
        grid.set(4, 4, Cell::Filled(1));
        assert_eq!(grid.process_special_block(1, 1, 2, 2), 2);
        assert_eq!(grid.occupied_count(), 1);
    }
}
