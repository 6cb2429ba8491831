#![deny(unsafe_code)]
//! Barnes-Hut approximation of the gravity field.
//!
//! The mass grid is zero-padded to a power-of-two square and summarized in
//! a quad-tree ([`tree`]). The force on each cell is then gathered by
//! walking the tree, collapsing any region that looks small from the cell
//! (`width / distance < theta`) into a single point mass at its centre of
//! mass. `theta = 0` visits every leaf and reproduces the exact
//! inverse-square field; larger values trade accuracy for fewer visits.
//!
//! Only the inverse-square law is supported.

pub mod tree;

use glam::DVec2;
use gravfield_core::params::{param_opt_f64, param_opt_str};
use gravfield_core::{FieldError, FieldSolver, ForceField, ForceLaw, Grid, DEFAULT_THETA};
use serde_json::{json, Value};

pub use tree::{Node, NodeIndex, QuadTree};

/// Registry name of the Barnes-Hut solver.
pub const SOLVER_NAME: &str = "barnes-hut";

/// Approximates the inverse-square force field of `mass` with opening
/// angle `theta`.
///
/// Returns `FieldError::InvalidParameter` if `theta` is negative or not finite.
pub fn approximate_field(mass: &Grid, theta: f64) -> Result<ForceField, FieldError> {
    BarnesHutSolver::new(theta)?.solve(mass)
}

/// Quad-tree solver with a fixed opening angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarnesHutSolver {
    theta: f64,
}

impl Default for BarnesHutSolver {
    fn default() -> Self {
        Self {
            theta: DEFAULT_THETA,
        }
    }
}

impl BarnesHutSolver {
    /// Creates a solver, validating that `theta` is finite and non-negative.
    pub fn new(theta: f64) -> Result<Self, FieldError> {
        if !theta.is_finite() || theta < 0.0 {
            return Err(FieldError::InvalidParameter {
                name: "theta".into(),
                reason: format!("must be a finite non-negative number, got {theta}"),
            });
        }
        Ok(Self { theta })
    }

    /// Creates a solver from a JSON params object.
    ///
    /// Reads `theta` (default [`DEFAULT_THETA`]). A `force_law` other than
    /// inverse-square is rejected with `FieldError::UnsupportedForceLaw`.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        if let Some(law) = param_opt_str(params, "force_law") {
            ensure_supported(law.parse::<ForceLaw>()?)?;
        }
        Self::new(param_opt_f64(params, "theta").unwrap_or(DEFAULT_THETA))
    }

    /// Opening angle.
    pub fn theta(&self) -> f64 {
        self.theta
    }
}

/// Rejects every force law except inverse-square.
pub fn ensure_supported(law: ForceLaw) -> Result<(), FieldError> {
    match law {
        ForceLaw::InverseSquare => Ok(()),
        other => Err(FieldError::UnsupportedForceLaw {
            solver: SOLVER_NAME.into(),
            law: other.name().into(),
        }),
    }
}

impl FieldSolver for BarnesHutSolver {
    fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    fn solve(&self, mass: &Grid) -> Result<ForceField, FieldError> {
        let (rows, cols) = mass.shape();
        let tree = QuadTree::from_mass(mass)?;
        log::debug!(
            "barnes-hut solve: {rows}x{cols} grid padded to {side}x{side}, {} nodes, theta {}",
            tree.len(),
            self.theta,
            side = tree.side()
        );

        let mut field = ForceField::zeros(rows, cols)?;
        if tree.is_empty() {
            return Ok(field);
        }
        for r in 0..rows {
            for c in 0..cols {
                let f = tree.force_at(DVec2::new(r as f64, c as f64), self.theta);
                field.set_vector(r, c, f);
            }
        }
        Ok(field)
    }

    fn params(&self) -> Value {
        json!({
            "theta": self.theta,
            "force_law": ForceLaw::InverseSquare.name(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "theta": {
                "type": "number",
                "default": DEFAULT_THETA,
                "min": 0.0,
                "description": "Opening angle: regions with width/distance below theta act as one point mass"
            },
            "force_law": {
                "type": "string",
                "default": ForceLaw::InverseSquare.name(),
                "options": [ForceLaw::InverseSquare.name()],
                "description": "Only inverse-square is supported"
            }
        })
    }
}
