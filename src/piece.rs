//! Active falling piece

use crate::figure::{Cell, Figure, Matrix};

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The figure this piece was spawned from
    pub figure: Figure,
    /// Current (possibly rotated) shape matrix
    pub matrix: Matrix,
    /// Grid column of the matrix's top-left cell
    pub x: i32,
    /// Grid row of the matrix's top-left cell, row 0 is the top
    pub y: i32,
}

impl Piece {
    /// Create a piece in spawn orientation at the origin
    pub fn new(figure: Figure) -> Self {
        Self {
            figure,
            matrix: figure.matrix(),
            x: 0,
            y: 0,
        }
    }

    /// Create a piece centered horizontally on a board `cols` wide, at the top row
    pub fn spawn(figure: Figure, cols: usize) -> Self {
        let mut piece = Self::new(figure);
        piece.x = (cols / 2) as i32 - (piece.width() / 2) as i32;
        piece
    }

    /// Width of the shape matrix
    pub fn width(&self) -> usize {
        self.matrix.first().map_or(0, |row| row.len())
    }

    /// Absolute (x, y, color) of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.matrix.iter().enumerate().flat_map(move |(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value != 0)
                .map(move |(dx, &value)| (self.x + dx as i32, self.y + dy as i32, value))
        })
    }
}

/// Quarter-turn a square matrix: transpose, then reverse the row order
pub fn rotate_matrix(matrix: &Matrix) -> Matrix {
    let n = matrix.len();
    assert!(
        matrix.iter().all(|row| row.len() == n),
        "rotate_matrix requires a square matrix"
    );

    let mut rotated: Matrix = (0..n)
        .map(|col| matrix.iter().map(|row| row[col]).collect())
        .collect();
    rotated.reverse();
    rotated
}
