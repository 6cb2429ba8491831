//! Error types shared by every gravfield crate.

use thiserror::Error;

/// Errors produced by grid construction, solvers and mass-source conversion.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Rows or columns was zero, or the cell count overflows `usize`.
    #[error("invalid dimensions: rows and cols must be non-zero")]
    InvalidDimensions,

    /// Two grids had incompatible shapes for an element-wise operation.
    #[error("dimension mismatch: ({lhs_rows}, {lhs_cols}) vs ({rhs_rows}, {rhs_cols})")]
    DimensionMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    /// A (row, col) coordinate was outside the grid bounds.
    #[error("index ({row}, {col}) out of bounds for grid of size ({rows}, {cols})")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A kernel pair was not `(2R-1, 2C-1)` for an `(R, C)` mass grid.
    #[error(
        "kernel shape ({kernel_rows}, {kernel_cols}) does not match mass grid ({rows}, {cols})"
    )]
    KernelShapeMismatch {
        kernel_rows: usize,
        kernel_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Quad-tree input must be a square whose side is a power of two.
    #[error("quad-tree input must be a power-of-two square, got ({rows}, {cols})")]
    NotPowerOfTwoSquare { rows: usize, cols: usize },

    /// A mass grid contained a negative value.
    #[error("negative mass {value} at ({row}, {col})")]
    NegativeMass { row: usize, col: usize, value: f64 },

    /// A parameter had an unusable value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The solver cannot evaluate the requested force law.
    #[error("solver '{solver}' does not support the {law} force law")]
    UnsupportedForceLaw { solver: String, law: String },

    /// A solver name was not recognized by the registry.
    #[error("unknown solver: {0}")]
    UnknownSolver(String),

    /// Reading a mask image failed.
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = FieldError::InvalidDimensions.to_string();
        assert!(
            msg.contains("rows") && msg.contains("cols"),
            "expected message mentioning rows and cols, got: {msg}"
        );
    }

    #[test]
    fn dimension_mismatch_includes_all_dimensions() {
        let err = FieldError::DimensionMismatch {
            lhs_rows: 10,
            lhs_cols: 20,
            rhs_rows: 30,
            rhs_cols: 40,
        };
        let msg = format!("{err}");
        for n in ["10", "20", "30", "40"] {
            assert!(msg.contains(n), "missing {n} in: {msg}");
        }
    }

    #[test]
    fn kernel_shape_mismatch_names_both_shapes() {
        let err = FieldError::KernelShapeMismatch {
            kernel_rows: 9,
            kernel_cols: 7,
            rows: 4,
            cols: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("(9, 7)"), "missing kernel shape in: {msg}");
        assert!(msg.contains("(4, 3)"), "missing grid shape in: {msg}");
    }

    #[test]
    fn not_power_of_two_square_includes_shape() {
        let msg = FieldError::NotPowerOfTwoSquare { rows: 6, cols: 6 }.to_string();
        assert!(msg.contains("(6, 6)"), "missing shape in: {msg}");
    }

    #[test]
    fn negative_mass_includes_location_and_value() {
        let err = FieldError::NegativeMass {
            row: 3,
            col: 5,
            value: -0.25,
        };
        let msg = err.to_string();
        assert!(msg.contains("-0.25"), "missing value in: {msg}");
        assert!(msg.contains("(3, 5)"), "missing location in: {msg}");
    }

    #[test]
    fn invalid_parameter_includes_name_and_reason() {
        let err = FieldError::InvalidParameter {
            name: "theta".into(),
            reason: "must be non-negative".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("theta"), "missing name in: {msg}");
        assert!(msg.contains("non-negative"), "missing reason in: {msg}");
    }

    #[test]
    fn unknown_solver_includes_name() {
        let msg = FieldError::UnknownSolver("multigrid".into()).to_string();
        assert!(msg.contains("multigrid"), "missing name in: {msg}");
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
