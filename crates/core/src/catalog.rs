//! Piece catalog - tetromino shapes and spawning
//!
//! Each kind is a square matrix in its spawn orientation. Rotation is plain
//! matrix rotation (see [`Shape::rotated_cw`]); there are no wall kicks.

use crate::rng::PieceBag;
use crate::shape::{ActivePiece, Shape};

/// The seven tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoKind {
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::J,
        TetrominoKind::L,
    ];

    /// Side of the largest spawn matrix; boards need at least this many columns.
    pub fn widest() -> u16 {
        Self::ALL
            .iter()
            .map(|kind| kind.shape().size() as u16)
            .max()
            .unwrap_or(0)
    }

    /// Lowercase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TetrominoKind::I => "i",
            TetrominoKind::O => "o",
            TetrominoKind::T => "t",
            TetrominoKind::S => "s",
            TetrominoKind::Z => "z",
            TetrominoKind::J => "j",
            TetrominoKind::L => "l",
        }
    }

    /// Spawn-orientation matrix
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoKind::I => Shape::from_rows(&[
                &[0, 0, 0, 0],
                &[1, 1, 1, 1],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ]),
            TetrominoKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            TetrominoKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            TetrominoKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            TetrominoKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
            TetrominoKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            TetrominoKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
        }
    }
}

/// Spawn anchor for a shape: top row, horizontally centered.
///
/// The `+ 1` undoes the anchor offset so the matrix itself is centered.
pub fn spawn_anchor(shape: &Shape, columns: u16) -> (i32, i32) {
    let col = (columns as i32 - shape.size() as i32) / 2 + 1;
    (0, col)
}

/// Produces the next active piece for a board with `columns` columns.
pub trait PieceSource {
    fn next_piece(&mut self, columns: u16) -> ActivePiece;
}

/// Random tetrominoes dealt from a seeded 7-bag.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bag: PieceBag,
}

impl Catalog {
    /// Catalog dealing from a bag seeded with `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceBag::new(seed),
        }
    }
}

impl PieceSource for Catalog {
    fn next_piece(&mut self, columns: u16) -> ActivePiece {
        let kind = self.bag.draw();
        let shape = kind.shape();
        let (row, col) = spawn_anchor(&shape, columns);
        log::debug!("dealt {} piece at ({row}, {col})", kind.as_str());
        ActivePiece::new(shape, row, col)
    }
}

/// Always deals the same shape. Handy for scripted sessions and tests.
#[derive(Debug, Clone)]
pub struct FixedSource {
    shape: Shape,
}

impl FixedSource {
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    pub fn of(kind: TetrominoKind) -> Self {
        Self::new(kind.shape())
    }
}

impl PieceSource for FixedSource {
    fn next_piece(&mut self, columns: u16) -> ActivePiece {
        let (row, col) = spawn_anchor(&self.shape, columns);
        ActivePiece::new(self.shape.clone(), row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_four_cells() {
        for kind in TetrominoKind::ALL {
            assert_eq!(kind.shape().filled().count(), 4, "{}", kind.as_str());
        }
    }

    #[test]
    fn widest_kind_is_the_bar() {
        assert_eq!(TetrominoKind::widest(), 4);
    }

    #[test]
    fn every_kind_spawns_legally_on_the_narrowest_board() {
        let columns = TetrominoKind::widest();
        let board = crate::board::Board::new(2, columns);
        for kind in TetrominoKind::ALL {
            let shape = kind.shape();
            let (row, col) = spawn_anchor(&shape, columns);
            let piece = ActivePiece::new(shape, row, col);
            assert!(
                crate::collision::can_move_to(&board, &piece, 0, 0),
                "{}",
                kind.as_str()
            );
        }
    }

    #[test]
    fn square_spawns_centered_on_six_columns() {
        let square = TetrominoKind::O.shape();
        assert_eq!(spawn_anchor(&square, 6), (0, 3));
    }

    #[test]
    fn catalog_pieces_fit_default_board() {
        let mut catalog = Catalog::new(5);
        for _ in 0..14 {
            let piece = catalog.next_piece(10);
            assert!(piece.cells().all(|(_, c)| (0..10).contains(&c)));
        }
    }

    #[test]
    fn fixed_source_repeats() {
        let mut src = FixedSource::of(TetrominoKind::T);
        assert_eq!(src.next_piece(10), src.next_piece(10));
    }
}
