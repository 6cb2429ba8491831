//! Per-cell force vectors and their magnitude.
//!
//! A [`ForceField`] pairs the two component grids produced by a solver.
//! The `x` component runs along the row axis and `y` along the column axis,
//! so the force at `(row, col)` is `(x[row, col], y[row, col])` in the same
//! coordinates used to index the mass grid.

use crate::error::FieldError;
use crate::grid::Grid;
use glam::DVec2;

/// Force components over a grid, one vector per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceField {
    x: Grid,
    y: Grid,
}

impl ForceField {
    /// Pairs two component grids.
    ///
    /// Returns `FieldError::DimensionMismatch` if their shapes differ.
    pub fn new(x: Grid, y: Grid) -> Result<Self, FieldError> {
        x.ensure_same_shape(&y)?;
        Ok(Self { x, y })
    }

    /// A field of zero vectors.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, FieldError> {
        Ok(Self {
            x: Grid::new(rows, cols)?,
            y: Grid::new(rows, cols)?,
        })
    }

    /// Component along the row axis.
    pub fn x(&self) -> &Grid {
        &self.x
    }

    /// Component along the column axis.
    pub fn y(&self) -> &Grid {
        &self.y
    }

    /// `(rows, cols)` of both components.
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    /// Force vector at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn vector_at(&self, row: usize, col: usize) -> DVec2 {
        DVec2::new(self.x.get(row, col), self.y.get(row, col))
    }

    /// Sets the force vector at `(row, col)`.
    pub fn set_vector(&mut self, row: usize, col: usize, v: DVec2) {
        self.x.set(row, col, v.x);
        self.y.set(row, col, v.y);
    }

    /// Splits the field into its `(x, y)` component grids.
    pub fn into_components(self) -> (Grid, Grid) {
        (self.x, self.y)
    }

    /// Magnitude of every vector, see [`magnitude`].
    pub fn magnitude(&self, normalized: bool) -> Grid {
        magnitude_of(&self.x, &self.y, normalized)
    }
}

/// Elementwise `sqrt(fx² + fy²)`.
///
/// With `normalized`, every cell is divided by the field's maximum so the
/// strongest cell is exactly `1.0`. If the maximum is not positive (an
/// all-zero field) the zero field is returned unchanged instead of dividing
/// by zero. NaN components propagate into the result.
///
/// Returns `FieldError::DimensionMismatch` if the components differ in shape.
pub fn magnitude(fx: &Grid, fy: &Grid, normalized: bool) -> Result<Grid, FieldError> {
    fx.ensure_same_shape(fy)?;
    Ok(magnitude_of(fx, fy, normalized))
}

fn magnitude_of(fx: &Grid, fy: &Grid, normalized: bool) -> Grid {
    let mut mag = fx.clone();
    mag.data_mut()
        .iter_mut()
        .zip(fy.data())
        .for_each(|(x, y)| *x = x.hypot(*y));
    if normalized {
        let max = mag.max_value();
        if max > 0.0 {
            mag.data_mut().iter_mut().for_each(|v| *v /= max);
        }
    }
    mag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize, data: &[f64]) -> Grid {
        Grid::from_data(rows, cols, data.to_vec()).unwrap()
    }

    #[test]
    fn new_rejects_mismatched_components() {
        let result = ForceField::new(Grid::new(2, 2).unwrap(), Grid::new(2, 3).unwrap());
        assert!(matches!(result, Err(FieldError::DimensionMismatch { .. })));
    }

    #[test]
    fn vector_at_reads_both_components() {
        let field = ForceField::new(grid(1, 2, &[1.0, 2.0]), grid(1, 2, &[-3.0, 4.0])).unwrap();
        assert_eq!(field.vector_at(0, 1), DVec2::new(2.0, 4.0));
    }

    #[test]
    fn set_vector_writes_both_components() {
        let mut field = ForceField::zeros(2, 2).unwrap();
        field.set_vector(1, 0, DVec2::new(0.5, -0.25));
        assert_eq!(field.x().get(1, 0), 0.5);
        assert_eq!(field.y().get(1, 0), -0.25);
    }

    // -- magnitude --

    #[test]
    fn raw_magnitude_is_euclidean_norm() {
        let mag = magnitude(&grid(1, 2, &[3.0, 0.0]), &grid(1, 2, &[4.0, -2.0]), false).unwrap();
        assert_eq!(mag.data(), &[5.0, 2.0]);
    }

    #[test]
    fn normalized_magnitude_peaks_at_exactly_one() {
        let fx = grid(2, 2, &[0.3, -1.7, 0.01, 0.9]);
        let fy = grid(2, 2, &[0.2, 0.4, -0.6, 0.0]);
        let mag = magnitude(&fx, &fy, true).unwrap();
        assert_eq!(mag.max_value(), 1.0);
        assert!(mag.data().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn normalized_magnitude_of_zero_field_is_zero() {
        let field = ForceField::zeros(3, 3).unwrap();
        let mag = field.magnitude(true);
        assert!(mag.data().iter().all(|&v| v == 0.0));
        assert!(mag.data().iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn magnitude_rejects_mismatched_components() {
        let result = magnitude(&Grid::new(2, 2).unwrap(), &Grid::new(3, 2).unwrap(), true);
        assert!(matches!(result, Err(FieldError::DimensionMismatch { .. })));
    }

    #[test]
    fn nan_component_propagates() {
        let mag = magnitude(&grid(1, 2, &[f64::NAN, 1.0]), &grid(1, 2, &[0.0, 0.0]), false).unwrap();
        assert!(mag.get(0, 0).is_nan());
        assert_eq!(mag.get(0, 1), 1.0);
    }
}
