//! Mass sources: the inputs a solver accepts, converted once into a mass grid.
//!
//! Callers hand over either numeric mass data or a rendered shape mask.
//! [`MassSource::into_mass_grid`] resolves both to a [`Grid`] of
//! non-negative masses before any solver sees them.

use crate::error::FieldError;
use crate::grid::Grid;

/// Full intensity of a mask pixel.
const MASK_FULL: f64 = 255.0;

/// An 8-bit intensity raster describing a shape.
///
/// Set pixels (255) carry unit mass and clear pixels (0) none; intermediate
/// values from antialiased edges carry a proportional fraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl Mask {
    /// Creates a mask from row-major intensities.
    ///
    /// Returns `FieldError::InvalidDimensions` for a zero dimension and
    /// `FieldError::DimensionMismatch` if `data.len() != rows * cols`.
    pub fn from_data(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self, FieldError> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let expected = rows.checked_mul(cols).ok_or(FieldError::InvalidDimensions)?;
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

    /// Creates a fully set or fully clear mask from a predicate on `(row, col)`.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut set: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self, FieldError> {
        let len = rows.checked_mul(cols).ok_or(FieldError::InvalidDimensions)?;
        let data = (0..len)
            .map(|i| if set(i / cols, i % cols) { u8::MAX } else { 0 })
            .collect();
        Self::from_data(rows, cols, data)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw row-major intensities.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Rescales intensities from `0..=255` to masses in `0..=1`.
    pub fn to_grid(&self) -> Result<Grid, FieldError> {
        let data = self.data.iter().map(|&p| f64::from(p) / MASK_FULL).collect();
        Grid::from_data(self.rows, self.cols, data)
    }
}

/// Where the mass of a query comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MassSource {
    /// Numeric mass per cell.
    Grid(Grid),
    /// A shape mask, one unit of mass per fully set pixel.
    Mask(Mask),
}

impl MassSource {
    /// Resolves the source into a mass grid.
    ///
    /// Returns `FieldError::NegativeMass` if a numeric grid holds a negative
    /// value. NaN is passed through and will propagate into the field.
    pub fn into_mass_grid(self) -> Result<Grid, FieldError> {
        match self {
            MassSource::Grid(grid) => {
                validate_mass(&grid)?;
                Ok(grid)
            }
            MassSource::Mask(mask) => mask.to_grid(),
        }
    }
}

impl From<Grid> for MassSource {
    fn from(grid: Grid) -> Self {
        MassSource::Grid(grid)
    }
}

impl From<Mask> for MassSource {
    fn from(mask: Mask) -> Self {
        MassSource::Mask(mask)
    }
}

/// Checks that no cell holds negative mass.
pub fn validate_mass(grid: &Grid) -> Result<(), FieldError> {
    match grid.iter().find(|&(_, _, v)| v < 0.0) {
        Some((row, col, value)) => Err(FieldError::NegativeMass { row, col, value }),
        None => Ok(()),
    }
}
