//! Two-dimensional row-major grid of `f64` values.
//!
//! A `Grid` stores `rows * cols` values with bounds-checked `(row, col)`
//! addressing. It carries mass grids, force components and magnitude
//! fields alike, so values are unconstrained: force components are signed
//! and NaN is stored as-is.

use crate::error::FieldError;

/// A 2D grid of `f64` values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Validates a shape and returns its cell count.
fn cell_count(rows: usize, cols: usize) -> Result<usize, FieldError> {
    if rows == 0 || cols == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    rows.checked_mul(cols).ok_or(FieldError::InvalidDimensions)
}

impl Grid {
    /// Creates a zero-filled grid of the given shape.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero
    /// or if `rows * cols` overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, FieldError> {
        Self::filled(rows, cols, 0.0)
    }

    /// Creates a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self, FieldError> {
        let len = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![value; len],
        })
    }

    /// Creates a grid from a pre-built row-major data vector, validating
    /// that `data.len() == rows * cols`.
    pub fn from_data(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, FieldError> {
        let expected = cell_count(rows, cols)?;
        if data.len() != expected {
            return Err(FieldError::DimensionMismatch {
                lhs_rows: rows,
                lhs_cols: cols,
                rhs_rows: data.len(),
                rhs_cols: 1,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, FieldError> {
        let len = cell_count(rows, cols)?;
        let data = (0..len).map(|i| f(i / cols, i % cols)).collect();
        Ok(Self { rows, cols, data })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Gets the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds. Use [`Grid::try_get`] for
    /// a checked lookup.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for grid of size ({}, {})",
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col]
    }

    /// Gets the value at `(row, col)`, or `FieldError::OutOfBounds`.
    pub fn try_get(&self, row: usize, col: usize) -> Result<f64, FieldError> {
        if row >= self.rows || col >= self.cols {
            return Err(FieldError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.data[row * self.cols + col])
    }

    /// Sets the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for grid of size ({}, {})",
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col] = value;
    }

    /// Returns `FieldError::DimensionMismatch` unless `other` has the same shape.
    pub fn ensure_same_shape(&self, other: &Grid) -> Result<(), FieldError> {
        if self.shape() != other.shape() {
            return Err(FieldError::DimensionMismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: other.rows,
                rhs_cols: other.cols,
            });
        }
        Ok(())
    }

    /// Applies `f` to every value, producing a new grid of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Grid {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Sum of all values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Largest value, ignoring NaN. Returns `f64::NEG_INFINITY` if every
    /// value is NaN.
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Location of the largest value (first in row-major order), ignoring NaN.
    ///
    /// Returns `None` if every value is NaN.
    pub fn argmax(&self) -> Option<(usize, usize)> {
        self.extremum(|candidate, best| candidate > best)
    }

    /// Location of the smallest value (first in row-major order), ignoring NaN.
    pub fn argmin(&self) -> Option<(usize, usize)> {
        self.extremum(|candidate, best| candidate < best)
    }

    fn extremum(&self, better: impl Fn(f64, f64) -> bool) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            match best {
                Some((_, b)) if !better(v, b) => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| (i / self.cols, i % self.cols))
    }

    /// One row of the grid (a horizontal scanline).
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row {row} out of bounds for {} rows", self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// One column of the grid (a vertical scanline), copied out.
    ///
    /// # Panics
    ///
    /// Panics if `col >= cols`.
    pub fn column(&self, col: usize) -> Vec<f64> {
        assert!(col < self.cols, "column {col} out of bounds for {} cols", self.cols);
        (0..self.rows)
            .map(|r| self.data[r * self.cols + col])
            .collect()
    }

    /// Copies the grid into the top-left corner of a zero-filled
    /// `side × side` grid.
    ///
    /// Returns `FieldError::InvalidParameter` if `side` is smaller than
    /// either dimension.
    pub fn padded_square(&self, side: usize) -> Result<Grid, FieldError> {
        if side < self.rows || side < self.cols {
            return Err(FieldError::InvalidParameter {
                name: "side".into(),
                reason: format!(
                    "{side} is smaller than grid shape ({}, {})",
                    self.rows, self.cols
                ),
            });
        }
        let mut padded = Grid::new(side, side)?;
        for r in 0..self.rows {
            padded.data[r * side..r * side + self.cols].copy_from_slice(self.row(r));
        }
        Ok(padded)
    }

    /// Iterates over all cells yielding `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &v)| (i / self.cols, i % self.cols, v))
    }
}
