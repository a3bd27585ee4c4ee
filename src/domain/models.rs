use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};

/// Number of rows in the matrix.
pub const ROWS: usize = 2;
/// Number of columns in every row of the matrix.
pub const COLS: usize = 2;

/// Fixed 2x2 integer matrix owned by the grid holder.
///
/// The shape is carried by the type, so the matrix can never hold anything
/// other than exactly two rows of exactly two values.
///
/// # Examples
///
/// ```
/// use twobytwo::domain::Matrix;
///
/// let matrix = Matrix::default();
/// assert_eq!(matrix.rows(), &[[0, 0], [0, 0]]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix {
    values: [[i64; COLS]; ROWS],
}

impl Matrix {
    pub fn from_rows(values: [[i64; COLS]; ROWS]) -> Self {
        Self { values }
    }

    pub fn rows(&self) -> &[[i64; COLS]; ROWS] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        self.values.get(row)?.get(col).copied()
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn col_count(&self, row: usize) -> usize {
        self.values.get(row).map(|r| r.len()).unwrap_or(0)
    }

    /// Resolves a signed (row, col) request to a position inside the matrix.
    ///
    /// The row is checked before the column, so a request that is out of
    /// range on both axes reports the row.
    pub fn checked_position(&self, row: i64, col: i64) -> DomainResult<(usize, usize)> {
        let r = usize::try_from(row)
            .ok()
            .filter(|r| *r < self.row_count())
            .ok_or(DomainError::InvalidRow(row))?;
        let c = usize::try_from(col)
            .ok()
            .filter(|c| *c < self.col_count(r))
            .ok_or(DomainError::InvalidColumn(col))?;
        Ok((r, c))
    }

    /// Replaces one value. Returns the previous value, or `None` when the
    /// position is outside the matrix (nothing is written in that case).
    pub fn set(&mut self, row: usize, col: usize, value: i64) -> Option<i64> {
        let slot = self.values.get_mut(row)?.get_mut(col)?;
        Some(std::mem::replace(slot, value))
    }
}

/// Request from a cell editor to store a new value at (row, col).
///
/// Indices are signed so that requests from anywhere can be expressed and
/// rejected by validation instead of being unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateEvent {
    pub row: i64,
    pub col: i64,
    pub value: i64,
}

impl UpdateEvent {
    pub fn new(row: i64, col: i64, value: i64) -> Self {
        Self { row, col, value }
    }
}

/// Notification sent to views after the grid holder applied an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub value: i64,
}
