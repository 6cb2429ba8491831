#![deny(unsafe_code)]
//! Core types for gravfield, the 2D gravity-field calculator.
//!
//! Provides the `Grid` raster, mass inputs (`Mask`, `MassSource`), the
//! `ForceLaw` choice, `ForceField` with its `magnitude` reduction, the
//! `FieldSolver` trait implemented by the exact and Barnes-Hut solvers,
//! `SolverConfig`, and JSON parameter helpers.

pub mod config;
pub mod error;
pub mod force_field;
pub mod grid;
pub mod law;
pub mod mass;
pub mod params;
pub mod solver;

pub use config::{Convolution, Method, SolverConfig, DEFAULT_THETA};
pub use error::FieldError;
pub use force_field::{magnitude, ForceField};
pub use grid::Grid;
pub use law::ForceLaw;
pub use mass::{Mask, MassSource};
pub use solver::FieldSolver;
