//! The `FieldSolver` trait implemented by every force-field algorithm.
//!
//! The trait is object-safe so the exact and approximate solvers can be
//! swapped at runtime behind `dyn FieldSolver`.

use crate::error::FieldError;
use crate::force_field::ForceField;
use crate::grid::Grid;
use serde_json::Value;

/// Turns a mass grid into a per-cell force field.
///
/// Implementations are pure: the same grid always produces the same field,
/// and nothing is cached between calls.
pub trait FieldSolver {
    /// Registry name of the solver.
    fn name(&self) -> &'static str;

    /// Computes the force at every cell of `mass`.
    ///
    /// The result has the same shape as `mass`.
    fn solve(&self, mass: &Grid) -> Result<ForceField, FieldError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Solves and reduces to the magnitude field, optionally normalized to [0, 1].
    fn magnitude(&self, mass: &Grid, normalized: bool) -> Result<Grid, FieldError> {
        Ok(self.solve(mass)?.magnitude(normalized))
    }
}
