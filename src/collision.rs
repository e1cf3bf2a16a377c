//! Piece against board overlap test

use crate::board::Board;
use crate::piece::Piece;

/// True if any filled cell of `piece` lands on a filled or out-of-bounds board cell
pub fn collide(board: &Board, piece: &Piece) -> bool {
    piece.cells().any(|(x, y, _)| board.is_occupied(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Figure;

    #[test]
    fn test_empty_board_no_collision() {
        let board = Board::default();
        let piece = Piece::spawn(Figure::T, board.width());
        assert!(!collide(&board, &piece));
    }

    #[test]
    fn test_collide_with_filled_cell() {
        let mut board = Board::default();
        let piece = Piece::spawn(Figure::O, board.width());
        board.set(piece.x, 1, 3);
        assert!(collide(&board, &piece));
    }

    #[test]
    fn test_empty_matrix_cells_never_collide() {
        let mut board = Board::default();
        // T's empty bottom row sits on row 2
        let piece = Piece::spawn(Figure::T, board.width());
        for x in 0..board.width() as i32 {
            board.set(x, 2, 1);
        }
        assert!(!collide(&board, &piece));
    }

    #[test]
    fn test_walls_and_floor() {
        let board = Board::default();

        let mut piece = Piece::new(Figure::O);
        piece.x = -1;
        assert!(collide(&board, &piece));

        piece.x = board.width() as i32 - 1;
        assert!(collide(&board, &piece));

        piece.x = 0;
        piece.y = board.height() as i32 - 1;
        assert!(collide(&board, &piece));

        piece.y = board.height() as i32 - 2;
        assert!(!collide(&board, &piece));
    }

    #[test]
    fn test_padding_may_hang_outside() {
        // The I's top row is empty, so it can sit one row above the board
        let board = Board::default();
        let mut piece = Piece::new(Figure::I);
        piece.y = -1;
        assert!(!collide(&board, &piece));
    }

    #[test]
    fn test_collide_is_deterministic() {
        let mut board = Board::default();
        board.set(5, 1, 2);
        let piece = Piece::spawn(Figure::T, board.width());
        let first = collide(&board, &piece);
        let second = collide(&board, &piece);
        assert_eq!(first, second);
        assert!(first);
    }
}
