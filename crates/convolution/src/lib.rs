#![deny(unsafe_code)]
//! Exact gravity-field solver.
//!
//! Builds the force kernels for the grid's shape ([`kernel`]) and correlates
//! them with the mass grid, either pairwise or through 2D FFTs. The field
//! at cell `(i, j)` is
//!
//! ```text
//! F[i, j] = Σ m[r, c] · K[i - r + R-1, j - c + C-1]
//! ```
//!
//! which is the total pull of every mass in the grid on that cell, pointing
//! toward the masses.

mod direct;
mod fft;
pub mod kernel;

use gravfield_core::params::param_opt_str;
use gravfield_core::{Convolution, FieldError, FieldSolver, ForceField, ForceLaw, Grid};
use serde_json::{json, Value};

pub use kernel::{build_kernels, KernelPair};

/// Registry name of the exact solver.
pub const SOLVER_NAME: &str = "exact";

/// Computes the exact force field of `mass` under `law`.
///
/// The evaluation strategy is picked by [`Convolution::resolve`].
pub fn build_field(mass: &Grid, law: ForceLaw) -> Result<ForceField, FieldError> {
    ExactSolver::new(law, None).solve(mass)
}

/// Correlates `mass` with prebuilt kernels using `strategy`.
///
/// Returns `FieldError::KernelShapeMismatch` if the kernels were built for
/// a different grid shape.
pub fn apply_kernels(
    mass: &Grid,
    kernels: &KernelPair,
    strategy: Convolution,
) -> Result<ForceField, FieldError> {
    kernels.ensure_fits(mass.rows(), mass.cols())?;
    match strategy {
        Convolution::Direct => direct::correlate(mass, kernels),
        Convolution::Fft => fft::correlate(mass, kernels),
    }
}

/// Exact solver: kernel correlation under either force law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactSolver {
    law: ForceLaw,
    convolution: Option<Convolution>,
}

impl ExactSolver {
    /// Creates a solver. `convolution: None` picks the strategy per grid size.
    pub fn new(law: ForceLaw, convolution: Option<Convolution>) -> Self {
        Self { law, convolution }
    }

    /// Creates a solver from a JSON params object.
    ///
    /// Reads `force_law` (default inverse-square) and `convolution` (default
    /// chosen per grid). Unknown names are rejected.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let law = param_opt_str(params, "force_law")
            .map(str::parse::<ForceLaw>)
            .transpose()?
            .unwrap_or_default();
        let convolution = param_opt_str(params, "convolution")
            .map(str::parse::<Convolution>)
            .transpose()?;
        Ok(Self::new(law, convolution))
    }

    /// Force law in use.
    pub fn law(&self) -> ForceLaw {
        self.law
    }

    /// Explicit strategy, if one was requested.
    pub fn convolution(&self) -> Option<Convolution> {
        self.convolution
    }
}

impl FieldSolver for ExactSolver {
    fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    fn solve(&self, mass: &Grid) -> Result<ForceField, FieldError> {
        let (rows, cols) = mass.shape();
        let strategy = Convolution::resolve(self.convolution, rows, cols);
        log::debug!(
            "exact solve: {rows}x{cols} grid, {} law, {} strategy",
            self.law,
            strategy.name()
        );
        let kernels = build_kernels(rows, cols, self.law)?;
        apply_kernels(mass, &kernels, strategy)
    }

    fn params(&self) -> Value {
        json!({
            "force_law": self.law.name(),
            "convolution": self.convolution.map(Convolution::name),
        })
    }

    fn param_schema(&self) -> Value {
        let laws: Vec<&str> = ForceLaw::all().iter().map(|l| l.name()).collect();
        json!({
            "force_law": {
                "type": "string",
                "default": ForceLaw::default().name(),
                "options": laws,
                "description": "Falloff of the pull of a point mass with distance"
            },
            "convolution": {
                "type": "string",
                "default": null,
                "options": ["direct", "fft"],
                "description": "Evaluation strategy; unset picks direct for small grids and fft otherwise"
            }
        })
    }
}
