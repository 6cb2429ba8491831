#![deny(unsafe_code)]
//! Solver registry: maps solver names and configs to implementations and
//! offers a one-call mass-to-magnitude entry point.
//!
//! This crate sits between `gravfield-core` (which defines the `FieldSolver`
//! trait) and the solver crates (`gravfield-convolution`,
//! `gravfield-quadtree`), so callers never dispatch on solver names
//! themselves.

#[cfg(feature = "png")]
pub mod mask;

use gravfield_convolution::ExactSolver;
use gravfield_core::{FieldError, FieldSolver, ForceField, Grid, MassSource, Method, SolverConfig};
use gravfield_quadtree::BarnesHutSolver;
use serde_json::Value;

/// All available solver names.
const SOLVER_NAMES: &[&str] = &[
    gravfield_convolution::SOLVER_NAME,
    gravfield_quadtree::SOLVER_NAME,
];

/// Enumeration of all available field solvers.
///
/// Wraps each solver implementation and delegates `FieldSolver` trait
/// methods. Use [`SolverKind::from_name`] for string-based construction and
/// [`SolverKind::from_config`] for a typed [`SolverConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverKind {
    /// Exact kernel correlation.
    Exact(ExactSolver),
    /// Barnes-Hut quad-tree approximation.
    BarnesHut(BarnesHutSolver),
}

impl SolverKind {
    /// Constructs a solver by name from a JSON params object.
    ///
    /// Returns `FieldError::UnknownSolver` if the name is not recognized.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, FieldError> {
        match name {
            gravfield_convolution::SOLVER_NAME => {
                Ok(SolverKind::Exact(ExactSolver::from_json(params)?))
            }
            gravfield_quadtree::SOLVER_NAME => {
                Ok(SolverKind::BarnesHut(BarnesHutSolver::from_json(params)?))
            }
            _ => Err(FieldError::UnknownSolver(name.to_string())),
        }
    }

    /// Constructs the solver a config asks for.
    ///
    /// Returns `FieldError::UnsupportedForceLaw` for Barnes-Hut with any law
    /// but inverse-square, and `FieldError::InvalidParameter` for a bad theta.
    pub fn from_config(config: &SolverConfig) -> Result<Self, FieldError> {
        match config.method {
            Method::Exact => Ok(SolverKind::Exact(ExactSolver::new(
                config.force_law,
                config.convolution,
            ))),
            Method::BarnesHut => {
                gravfield_quadtree::ensure_supported(config.force_law)?;
                Ok(SolverKind::BarnesHut(BarnesHutSolver::new(
                    config.theta_or_default(),
                )?))
            }
        }
    }

    /// Returns a slice of all recognized solver names.
    pub fn list_solvers() -> &'static [&'static str] {
        SOLVER_NAMES
    }
}

impl FieldSolver for SolverKind {
    fn name(&self) -> &'static str {
        match self {
            SolverKind::Exact(s) => s.name(),
            SolverKind::BarnesHut(s) => s.name(),
        }
    }

    fn solve(&self, mass: &Grid) -> Result<ForceField, FieldError> {
        match self {
            SolverKind::Exact(s) => s.solve(mass),
            SolverKind::BarnesHut(s) => s.solve(mass),
        }
    }

    fn params(&self) -> Value {
        match self {
            SolverKind::Exact(s) => s.params(),
            SolverKind::BarnesHut(s) => s.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            SolverKind::Exact(s) => s.param_schema(),
            SolverKind::BarnesHut(s) => s.param_schema(),
        }
    }
}

/// Turns a mass source into a gravity-magnitude grid in one call.
///
/// Resolves the source to a validated mass grid, builds the configured
/// solver, solves, and reduces the field to its magnitude (normalized to a
/// maximum of 1 when `config.normalized` is set).
pub fn gravity_magnitude(source: &MassSource, config: &SolverConfig) -> Result<Grid, FieldError> {
    let mass = source.clone().into_mass_grid()?;
    let solver = SolverKind::from_config(config)?;
    log::info!(
        "gravity magnitude: {}x{} grid with the {} solver",
        mass.rows(),
        mass.cols(),
        solver.name()
    );
    solver.magnitude(&mass, config.normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravfield_core::{ForceLaw, Mask};
    use serde_json::json;

    fn point_mass(rows: usize, cols: usize, at: (usize, usize)) -> Grid {
        let mut g = Grid::new(rows, cols).unwrap();
        g.set(at.0, at.1, 1.0);
        g
    }

    // -- Registry --

    #[test]
    fn from_name_exact_succeeds() {
        let solver = SolverKind::from_name("exact", &json!({})).unwrap();
        assert_eq!(solver.name(), "exact");
    }

    #[test]
    fn from_name_barnes_hut_succeeds() {
        let solver = SolverKind::from_name("barnes-hut", &json!({"theta": 0.5})).unwrap();
        assert_eq!(solver.name(), "barnes-hut");
        assert_eq!(solver.params()["theta"], 0.5);
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = SolverKind::from_name("nonexistent", &json!({}));
        assert!(matches!(result, Err(FieldError::UnknownSolver(_))));
    }

    #[test]
    fn from_name_propagates_param_errors() {
        let result = SolverKind::from_name("exact", &json!({"force_law": "cubic"}));
        assert!(matches!(result, Err(FieldError::InvalidParameter { .. })));
        let result = SolverKind::from_name("barnes-hut", &json!({"force_law": "linear"}));
        assert!(matches!(result, Err(FieldError::UnsupportedForceLaw { .. })));
    }

    #[test]
    fn list_solvers_includes_both() {
        let names = SolverKind::list_solvers();
        assert!(names.contains(&"exact"));
        assert!(names.contains(&"barnes-hut"));
        for name in names {
            assert!(SolverKind::from_name(name, &json!({})).is_ok(), "{name}");
        }
    }

    #[test]
    fn from_config_picks_method() {
        let exact = SolverKind::from_config(&SolverConfig::default()).unwrap();
        assert!(matches!(exact, SolverKind::Exact(_)));

        let config = SolverConfig {
            method: Method::BarnesHut,
            theta: Some(0.25),
            ..SolverConfig::default()
        };
        match SolverKind::from_config(&config).unwrap() {
            SolverKind::BarnesHut(s) => assert!((s.theta() - 0.25).abs() < f64::EPSILON),
            other => panic!("expected barnes-hut, got {other:?}"),
        }
    }

    #[test]
    fn from_config_rejects_linear_barnes_hut() {
        let config = SolverConfig {
            method: Method::BarnesHut,
            force_law: ForceLaw::Linear,
            ..SolverConfig::default()
        };
        let result = SolverKind::from_config(&config);
        assert!(matches!(result, Err(FieldError::UnsupportedForceLaw { .. })));
    }

    #[test]
    fn from_config_rejects_negative_theta() {
        let config = SolverConfig {
            method: Method::BarnesHut,
            theta: Some(-1.0),
            ..SolverConfig::default()
        };
        let result = SolverKind::from_config(&config);
        assert!(matches!(result, Err(FieldError::InvalidParameter { .. })));
    }

    // -- Delegation --

    #[test]
    fn trait_delegation_params_and_schema() {
        let solver = SolverKind::from_name("exact", &json!({"force_law": "linear"})).unwrap();
        assert_eq!(solver.params()["force_law"], "linear");
        assert!(solver.param_schema().get("force_law").is_some());

        let solver = SolverKind::from_name("barnes-hut", &json!({})).unwrap();
        assert!(solver.param_schema().get("theta").is_some());
    }

    #[test]
    fn solvers_agree_at_theta_zero() {
        let mut mass = Grid::new(6, 6).unwrap();
        mass.set(1, 1, 2.0);
        mass.set(4, 3, 1.0);
        let exact = SolverKind::from_name("exact", &json!({})).unwrap();
        let approx = SolverKind::from_name("barnes-hut", &json!({"theta": 0.0})).unwrap();
        let a = exact.magnitude(&mass, false).unwrap();
        let b = approx.magnitude(&mass, false).unwrap();
        for (x, y) in a.data().iter().zip(b.data()) {
            assert!((x - y).abs() < 1e-9, "{x} vs {y}");
        }
    }

    #[test]
    fn object_safety() {
        let solver = SolverKind::from_name("exact", &json!({})).unwrap();
        let boxed: Box<dyn FieldSolver> = Box::new(solver);
        let field = boxed.solve(&point_mass(4, 4, (0, 0))).unwrap();
        assert_eq!(field.shape(), (4, 4));
    }

    // -- One-call API --

    #[test]
    fn gravity_magnitude_normalizes_to_one() {
        let source = MassSource::from(point_mass(5, 5, (2, 2)));
        let mag = gravity_magnitude(&source, &SolverConfig::default()).unwrap();
        assert_eq!(mag.max_value(), 1.0);
        assert_eq!(mag.get(2, 2), 0.0);
    }

    #[test]
    fn gravity_magnitude_unnormalized_keeps_scale() {
        let config = SolverConfig {
            normalized: false,
            ..SolverConfig::default()
        };
        let source = MassSource::from(point_mass(5, 5, (2, 2)));
        let mag = gravity_magnitude(&source, &config).unwrap();
        // Neighbour at distance 1 under inverse-square.
        assert!((mag.get(1, 2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn gravity_magnitude_mask_matches_grid() {
        let mask = Mask::from_fn(6, 6, |r, c| (2..4).contains(&r) && (1..5).contains(&c)).unwrap();
        let grid = mask.to_grid().unwrap();
        let config = SolverConfig::default();
        let from_mask = gravity_magnitude(&MassSource::from(mask), &config).unwrap();
        let from_grid = gravity_magnitude(&MassSource::from(grid), &config).unwrap();
        assert_eq!(from_mask, from_grid);
    }

    #[test]
    fn gravity_magnitude_rejects_negative_mass() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, -1.0);
        let result = gravity_magnitude(&MassSource::from(grid), &SolverConfig::default());
        assert!(matches!(result, Err(FieldError::NegativeMass { .. })));
    }

    #[test]
    fn gravity_magnitude_zero_mass_is_zero() {
        let source = MassSource::from(Grid::new(4, 7).unwrap());
        for method in [Method::Exact, Method::BarnesHut] {
            let config = SolverConfig {
                method,
                ..SolverConfig::default()
            };
            let mag = gravity_magnitude(&source, &config).unwrap();
            assert_eq!(mag.shape(), (4, 7));
            assert!(mag.data().iter().all(|&v| v == 0.0));
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalized_magnitude_is_unit_bounded(
                rows in 1usize..8,
                cols in 1usize..8,
                seed in proptest::collection::vec(0.0f64..5.0, 64),
                barnes_hut in any::<bool>(),
            ) {
                let grid = Grid::from_fn(rows, cols, |r, c| seed[r * 8 + c]).unwrap();
                let config = SolverConfig {
                    method: if barnes_hut { Method::BarnesHut } else { Method::Exact },
                    ..SolverConfig::default()
                };
                let mag = gravity_magnitude(&MassSource::from(grid), &config).unwrap();
                prop_assert_eq!(mag.shape(), (rows, cols));
                prop_assert!(mag.data().iter().all(|&v| (0.0..=1.0).contains(&v)));
            }
        }
    }
}
