//! Collision validation for candidate piece positions.

use crate::board::Board;
use crate::shape::ActivePiece;

/// Whether `piece`, displaced by `(d_row, d_col)`, sits legally on `board`.
///
/// Every set shape cell must land in a board column. Cells above the top
/// edge (`row < 0`) skip the occupancy check so freshly spawned pieces may
/// poke out of the grid; every other cell must hit an existing, empty board
/// cell, which makes the floor solid.
pub fn can_move_to(board: &Board, piece: &ActivePiece, d_row: i32, d_col: i32) -> bool {
    let columns = board.columns() as i32;
    piece.shape.filled().all(|(y, x)| {
        let col = piece.col + x + d_col - 1;
        let row = piece.row + y + d_row - 1;
        if col < 0 || col >= columns {
            return false;
        }
        row < 0 || board.is_free(row, col)
    })
}

/// Whether the piece may take one gravity step.
#[inline]
pub fn can_fall(board: &Board, piece: &ActivePiece) -> bool {
    can_move_to(board, piece, 1, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    fn dot() -> Shape {
        Shape::from_rows(&[&[1]])
    }

    #[test]
    fn single_cell_hits_exactly_its_target() {
        for row in 0..4 {
            for col in 0..6 {
                let mut board = Board::new(4, 6);
                board.fill(row, col);
                // Anchor is one before the origin.
                let on = ActivePiece::new(dot(), row + 1, col + 1);
                assert!(!can_move_to(&board, &on, 0, 0), "({row},{col}) overlaps");

                for (r, c) in [(row - 1, col), (row, col - 1), (row, col + 1)] {
                    if r < 0 || c < 0 || c >= 6 {
                        continue;
                    }
                    let beside = ActivePiece::new(dot(), r + 1, c + 1);
                    assert!(can_move_to(&board, &beside, 0, 0), "({r},{c}) is free");
                }
            }
        }
    }

    #[test]
    fn rows_above_top_skip_occupancy() {
        let board = Board::from_rows(&[&[1, 1, 1], &[0, 0, 0]]);
        let piece = ActivePiece::new(dot(), -2, 2);
        assert!(can_move_to(&board, &piece, 0, 0));
        // Still bounded left and right.
        assert!(!can_move_to(&board, &piece, 0, -2));
        assert!(!can_move_to(&board, &piece, 0, 2));
    }

    #[test]
    fn floor_is_solid() {
        let board = Board::new(4, 6);
        let piece = ActivePiece::new(dot(), 4, 1);
        assert!(can_move_to(&board, &piece, 0, 0));
        assert!(!can_fall(&board, &piece));
    }

    #[test]
    fn empty_shape_cells_never_collide() {
        // The left column of this shape is empty, so it may hang past the left wall.
        let shape = Shape::from_rows(&[&[0, 1], &[0, 1]]);
        let board = Board::new(4, 6);
        let piece = ActivePiece::new(shape, 1, 0);
        assert!(can_move_to(&board, &piece, 0, 0));
        assert!(!can_move_to(&board, &piece, 0, -1));
    }
}
