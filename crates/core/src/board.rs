//! Board module - manages the game grid
//!
//! The board is a `rows x columns` grid of occupancy flags, fixed for the session.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: `(row, col)` where row grows downward from 0 and col grows rightward from 0.

use thiserror::Error;

use crate::shape::Shape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the {rows}x{columns} board")]
    OutOfBounds {
        row: i32,
        col: i32,
        rows: u16,
        columns: u16,
    },
}

/// The game board - `rows x columns` occupancy cells in a flat vector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u16,
    columns: u16,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: u16, columns: u16) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows as usize * columns as usize],
        }
    }

    /// Build a board from `0`/`1` rows. Every row must have the same length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        assert!(
            rows.iter().all(|r| r.len() == columns),
            "board rows must have identical length"
        );
        let cells = rows
            .iter()
            .flat_map(|r| r.iter().map(|&c| c != 0))
            .collect();
        Self {
            rows: rows.len() as u16,
            columns: columns as u16,
            cells,
        }
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows as i32 || col >= self.columns as i32 {
            return None;
        }
        Some(row as usize * self.columns as usize + col as usize)
    }

    /// Number of rows
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of columns
    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Occupancy of the cell at `(row, col)`.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<bool, BoardError> {
        self.index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or(BoardError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                columns: self.columns,
            })
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        matches!(self.cell_at(row, col), Ok(false))
    }

    /// Mark a single cell. Returns false if out of bounds.
    pub fn fill(&mut self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = true;
                true
            }
            None => false,
        }
    }

    /// Lock a shape into the board with its anchor at `(anchor_row, anchor_col)`.
    ///
    /// The anchor sits one cell before the shape origin, so shape cell `(y, x)`
    /// lands on `(anchor_row + y - 1, anchor_col + x - 1)`. Cells that fall
    /// outside the grid (typically above row 0 right after spawn) are dropped.
    /// Returns how many cells were written.
    pub fn commit(&mut self, shape: &Shape, anchor_row: i32, anchor_col: i32) -> usize {
        let mut written = 0;
        for (y, x) in shape.filled() {
            if self.fill(anchor_row + y - 1, anchor_col + x - 1) {
                written += 1;
            }
        }
        written
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Iterate `(row, col, filled)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, bool)> + '_ {
        let columns = self.columns as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &filled)| ((i / columns) as u16, (i % columns) as u16, filled))
    }

    /// Count of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Convert to `0`/`1` rows for testing/display
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.columns.max(1) as usize)
            .map(|row| row.iter().map(|&c| c as u8).collect())
            .collect()
    }
}
