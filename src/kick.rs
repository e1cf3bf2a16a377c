//! Rotation with horizontal wall kicks
//!
//! When a rotated piece overlaps something, it is nudged sideways with offsets
//! +1, -2, +3, -4, ... (so the tried columns are x+1, x-1, x+2, x-2, ...).
//! The search gives up once the next offset would exceed the matrix width.

use crate::board::Board;
use crate::collision::collide;
use crate::piece::{Piece, rotate_matrix};
use tracing::debug;

/// Successive column shifts, relative to the unkicked position, to try for a
/// matrix of the given width
pub fn kick_shifts(width: usize) -> impl Iterator<Item = i32> {
    let width = width as i32;
    (1..=width)
        // An even step equal to the width lands on a column that is never tested
        .take_while(move |&step| step % 2 == 1 || step < width)
        .map(|step| if step % 2 == 1 { (step + 1) / 2 } else { -step / 2 })
}

/// Rotate the piece, kicking it sideways if needed
/// Returns false (and leaves the piece untouched) if no position fits
pub fn rotate_piece(piece: &mut Piece, board: &Board) -> bool {
    let original_matrix = piece.matrix.clone();
    let original_x = piece.x;

    piece.matrix = rotate_matrix(&original_matrix);
    if !collide(board, piece) {
        return true;
    }

    for shift in kick_shifts(piece.width()) {
        piece.x = original_x + shift;
        if !collide(board, piece) {
            debug!(figure = piece.figure.name(), shift, "rotation kicked");
            return true;
        }
    }

    // Restore original state
    piece.matrix = original_matrix;
    piece.x = original_x;
    debug!(figure = piece.figure.name(), "rotation blocked");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Figure;

    #[test]
    fn test_kick_shifts() {
        assert_eq!(kick_shifts(2).collect::<Vec<_>>(), vec![1]);
        assert_eq!(kick_shifts(3).collect::<Vec<_>>(), vec![1, -1, 2]);
        assert_eq!(kick_shifts(4).collect::<Vec<_>>(), vec![1, -1, 2]);
        assert_eq!(kick_shifts(5).collect::<Vec<_>>(), vec![1, -1, 2, -2, 3]);
    }

    #[test]
    fn test_rotate_in_open_space() {
        let board = Board::default();
        let mut piece = Piece::spawn(Figure::T, board.width());
        let x = piece.x;
        assert!(rotate_piece(&mut piece, &board));
        assert_eq!(piece.matrix, rotate_matrix(&Figure::T.matrix()));
        assert_eq!(piece.x, x);
    }

    #[test]
    fn test_kick_off_left_wall() {
        let board = Board::default();
        let mut piece = Piece::new(Figure::I);
        piece.matrix = rotate_matrix(&piece.matrix);
        // Vertical I in column 1 of its matrix, flush with the left wall
        piece.x = -1;
        piece.y = 5;
        assert!(!collide(&board, &piece));

        assert!(rotate_piece(&mut piece, &board));
        assert_eq!(piece.x, 0);
        assert_eq!(piece.matrix[2], vec![5, 5, 5, 5]);
        assert!(!collide(&board, &piece));
    }

    #[test]
    fn test_kick_off_right_wall() {
        let board = Board::default();
        let mut piece = Piece::new(Figure::I);
        piece.matrix = rotate_matrix(&piece.matrix);
        // Column 1 of the matrix one column in from the right wall
        piece.x = board.width() as i32 - 3;
        piece.y = 5;
        assert!(!collide(&board, &piece));

        // +1 hangs further off the right, -1 fits
        assert!(rotate_piece(&mut piece, &board));
        assert_eq!(piece.x, board.width() as i32 - 4);
        assert!(!collide(&board, &piece));
    }

    #[test]
    fn test_i_flush_with_right_wall_cannot_rotate() {
        let board = Board::default();
        let mut piece = Piece::new(Figure::I);
        piece.matrix = rotate_matrix(&piece.matrix);
        piece.x = board.width() as i32 - 2;
        piece.y = 5;
        let before = piece.clone();

        // Fitting would need a shift of -2, which a width-4 search never reaches
        assert!(!rotate_piece(&mut piece, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_blocked_rotation_restores_piece() {
        let mut board = Board::default();
        // A one-column well: everything but column 0 is filled on rows 5..=8
        for y in 5..=8 {
            for x in 1..board.width() as i32 {
                board.set(x, y, 1);
            }
        }
        let mut piece = Piece::new(Figure::I);
        piece.matrix = rotate_matrix(&piece.matrix);
        piece.x = -1;
        piece.y = 5;
        assert!(!collide(&board, &piece));
        let before = piece.clone();

        assert!(!rotate_piece(&mut piece, &board));
        assert_eq!(piece, before);
    }
}
