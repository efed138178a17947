//! Shape matrices and the active (falling) piece.

/// A square matrix of occupancy bits describing a piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    bits: Vec<bool>,
}

impl Shape {
    /// Build a shape from `0`/`1` rows. The matrix must be square.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len();
        assert!(
            rows.iter().all(|r| r.len() == size),
            "shape matrix must be square"
        );
        Self {
            size: size as u8,
            bits: rows
                .iter()
                .flat_map(|r| r.iter().map(|&c| c != 0))
                .collect(),
        }
    }

    /// Side length of the square matrix
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Iterate the `(y, x)` coordinates of every set cell, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let n = self.size as usize;
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &set)| set)
            .map(move |(i, _)| ((i / n) as i32, (i % n) as i32))
    }

    /// Rotate 90° clockwise.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut bits = vec![false; n * n];
        for y in 0..n {
            for x in 0..n {
                // (y, x) -> (x, n - 1 - y)
                bits[x * n + (n - 1 - y)] = self.bits[y * n + x];
            }
        }
        Self {
            size: self.size,
            bits,
        }
    }
}

/// The currently falling piece: a shape plus its board-relative anchor.
///
/// The anchor marks the cell one row and one column before the shape's
/// origin. Shape cell `(y, x)` therefore covers board cell
/// `(row + y - 1, col + x - 1)`; collision, commit and rendering all apply
/// the same offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: Shape,
    pub row: i32,
    pub col: i32,
}

impl ActivePiece {
    /// Piece with its anchor at `(row, col)`
    pub fn new(shape: Shape, row: i32, col: i32) -> Self {
        Self { shape, row, col }
    }

    /// Board coordinates `(row, col)` covered by the piece, including off-grid ones.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(y, x)| (self.row + y - 1, self.col + x - 1))
    }

    /// Same shape with the anchor moved by `(d_row, d_col)`
    pub fn translated(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            shape: self.shape.clone(),
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Same anchor with the shape rotated clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            row: self.row,
            col: self.col,
        }
    }
}
