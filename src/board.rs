//! Game board representation and collision detection

use crate::tetromino::Shape;

/// Standard Tetris board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const VISIBLE_HEIGHT: usize = 20;
/// Hidden rows above the visible board for spawning
pub const BUFFER_HEIGHT: usize = 4;
pub const TOTAL_HEIGHT: usize = VISIBLE_HEIGHT + BUFFER_HEIGHT;

/// A cell on the board - either empty or filled by a locked shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Shape),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn shape(&self) -> Option<Shape> {
        match self {
            Cell::Empty => None,
            Cell::Filled(shape) => Some(*shape),
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top buffer row
    cells: [[Cell; BOARD_WIDTH]; TOTAL_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; TOTAL_HEIGHT],
        }
    }

    fn index(row: i32, col: i32) -> Option<(usize, usize)> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= TOTAL_HEIGHT || col >= BOARD_WIDTH {
            return None;
        }
        Some((row, col))
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|(r, c)| self.cells[r][c])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some((r, c)) => {
                self.cells[r][c] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a position is inside the grid and empty
    pub fn is_cell_open(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(|cell| cell.is_empty())
    }

    /// Check if a set of block positions are all open
    pub fn are_positions_open(&self, positions: &[(i32, i32)]) -> bool {
        positions
            .iter()
            .all(|&(row, col)| self.is_cell_open(row, col))
    }

    /// Lock a piece onto the board
    ///
    /// Callers must have validated the cells; writing over a filled cell is
    /// a logic error.
    pub fn lock_piece(&mut self, positions: &[(i32, i32); 4], shape: Shape) {
        debug_assert!(
            self.are_positions_open(positions),
            "locking {shape} over blocked cells {positions:?}"
        );
        for &(row, col) in positions {
            self.set(row, col, Cell::Filled(shape));
        }
    }

    /// Indices of every completely filled row, top to bottom
    pub fn find_full_rows(&self) -> Vec<usize> {
        (0..TOTAL_HEIGHT)
            .filter(|&row| self.is_line_full(row))
            .collect()
    }

    /// Remove the given rows, shifting everything above them down and
    /// filling the top with empty rows
    pub fn collapse_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }

        let mut write_row = TOTAL_HEIGHT;
        for read_row in (0..TOTAL_HEIGHT).rev() {
            if rows.contains(&read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                self.cells[write_row] = self.cells[read_row];
            }
        }

        // Fill the top with empty rows
        for row in &mut self.cells[..write_row] {
            *row = [Cell::Empty; BOARD_WIDTH];
        }
    }

    /// Clear completed lines and return the number cleared
    pub fn clear_lines(&mut self) -> usize {
        let full = self.find_full_rows();
        self.collapse_rows(&full);
        full.len()
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// True if anything is locked in rows `0..row_limit`
    pub fn is_loss(&self, row_limit: usize) -> bool {
        self.cells[..row_limit.min(TOTAL_HEIGHT)]
            .iter()
            .any(|row| row.iter().any(|cell| cell.is_filled()))
    }

    /// Check if game is over (blocks locked in the hidden buffer rows)
    pub fn is_topped_out(&self) -> bool {
        self.is_loss(BUFFER_HEIGHT)
    }

    /// Get an iterator over visible rows (top to bottom), with board row index
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &[Cell; BOARD_WIDTH])> {
        self.cells
            .iter()
            .enumerate()
            .skip(BUFFER_HEIGHT)
    }
}
