//! Read-only view of a game for rendering

use crate::board::Board;
use crate::figure::{Cell, color_name};
use crate::piece::Piece;

#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub piece: &'a Piece,
    pub over: bool,
    /// Fast drop in effect
    pub accelerated: bool,
}

impl Snapshot<'_> {
    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Cell value with the active piece drawn over the board
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        let (x, y) = (x as i32, y as i32);
        let piece_cell = usize::try_from(y - self.piece.y)
            .ok()
            .zip(usize::try_from(x - self.piece.x).ok())
            .and_then(|(dy, dx)| self.piece.matrix.get(dy)?.get(dx).copied())
            .filter(|&value| value != 0);

        piece_cell.unwrap_or_else(|| self.board.get(x, y).unwrap_or(0))
    }

    /// Display token for the composed cell, None when empty
    pub fn color(&self, x: usize, y: usize) -> Option<&'static str> {
        color_name(self.cell(x, y))
    }
}
