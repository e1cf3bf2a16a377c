//! Game board (the arena) and row clearing

use crate::figure::Cell;
use crate::piece::Piece;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top
    cells: Vec<Vec<Cell>>,
    cols: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    /// Create an empty board `cols` wide and `rows` tall
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cells: vec![vec![0; cols]; rows],
            cols,
        }
    }

    pub fn width(&self) -> usize {
        self.cols
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Set a cell at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self.cells.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// True if (x, y) is filled or outside the board
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(|cell| cell != 0)
    }

    /// Write the piece's filled cells into the board
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y, value) in piece.cells() {
            let written = self.set(x, y, value);
            assert!(written, "merge outside the board at ({}, {})", x, y);
        }
    }

    /// Remove every full row, shifting the rows above down, and return the count
    pub fn sweep(&mut self) -> usize {
        let rows = self.height();
        let mut write_row = rows;

        // Compact the kept rows towards the bottom
        for read_row in (0..rows).rev() {
            if !self.is_row_full(read_row) {
                write_row -= 1;
                if write_row != read_row {
                    self.cells.swap(write_row, read_row);
                }
            }
        }

        // Everything above the kept rows is fresh empty space
        for row in &mut self.cells[..write_row] {
            row.fill(0);
        }

        write_row
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(0);
        }
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|&cell| cell != 0)
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(|&cell| cell == 0))
    }

    /// Rows from top to bottom
    #[allow(dead_code)]
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}
