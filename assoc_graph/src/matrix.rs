//! Row-major count matrix over a flat `GrowableSequence<u8>`.
//!
//! Cell `(r, c)` lives at flat offset `r * cols + c`. Both dimensions
//! only ever grow:
//!
//! - `push_row` appends one full-width row at the end of the buffer.
//! - `widen(k)` adds `k` zero columns. Rows are copied into a freshly
//!   sized buffer, each followed by `k` zeros, and the new buffer replaces
//!   the old one in a single assignment. A reader never sees a buffer
//!   whose length disagrees with `rows * cols`.

use crate::error::{GraphError, Result};
use crate::sequence::{GrowableSequence, Iter};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMatrix {
    rows: usize,
    cols: usize,
    cells: GrowableSequence<u8>,
}

impl CountMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<u8> {
        self.check_row(row)?;
        self.check_col(col)?;
        self.cells.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> Result<Vec<u8>> {
        self.check_row(row)?;
        (0..self.cols).map(|col| self.get(row, col)).collect()
    }

    pub fn column(&self, col: usize) -> Result<Vec<u8>> {
        self.check_col(col)?;
        (0..self.rows).map(|row| self.get(row, col)).collect()
    }

    /// All cells, row-major.
    pub fn cells(&self) -> Iter<'_, u8> {
        self.cells.iter()
    }

    /// Zero-extend every existing row by `extra` columns.
    pub(crate) fn widen(&mut self, extra: usize) {
        if extra == 0 {
            return;
        }
        let cols = self.cols + extra;
        let mut grown = GrowableSequence::with_capacity(self.rows * cols);
        let mut old = self.cells.iter().copied();
        for _ in 0..self.rows {
            grown.extend(old.by_ref().take(self.cols));
            grown.extend(std::iter::repeat(0).take(extra));
        }
        self.cells = grown;
        self.cols = cols;
    }

    /// Append one row. `row.len()` must equal the current column count.
    pub(crate) fn push_row(&mut self, row: &[u8]) {
        debug_assert_eq!(row.len(), self.cols, "row width must match column count");
        self.cells.extend(row.iter().copied());
        self.rows += 1;
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row < self.rows {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange {
                index: row,
                len: self.rows,
            })
        }
    }

    fn check_col(&self, col: usize) -> Result<()> {
        if col < self.cols {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange {
                index: col,
                len: self.cols,
            })
        }
    }
}
