//! Solver configuration.
//!
//! Optional knobs stay `None` in the config and are resolved by the code
//! that uses them: [`SolverConfig::theta_or_default`] for the Barnes-Hut
//! opening angle and [`Convolution::resolve`] for the exact solver's
//! evaluation strategy.

use crate::error::FieldError;
use crate::law::ForceLaw;
use crate::params::{param_bool, param_opt_f64, param_opt_str};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default multipole acceptance threshold for the Barnes-Hut solver.
pub const DEFAULT_THETA: f64 = 0.8;

/// Largest cell count for which [`Convolution::resolve`] picks the direct sum.
pub const DIRECT_CELL_LIMIT: usize = 1024;

/// Which algorithm computes the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Kernel correlation over the whole grid.
    #[default]
    Exact,
    /// Quad-tree approximation, inverse-square only.
    BarnesHut,
}

impl Method {
    /// Canonical name, matching the solver registry.
    pub fn name(self) -> &'static str {
        match self {
            Method::Exact => "exact",
            Method::BarnesHut => "barnes-hut",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Method::Exact),
            "barnes-hut" | "barnes_hut" => Ok(Method::BarnesHut),
            other => Err(FieldError::InvalidParameter {
                name: "method".into(),
                reason: format!("unknown method '{other}' (expected exact or barnes-hut)"),
            }),
        }
    }
}

/// How the exact solver evaluates the kernel correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Convolution {
    /// Pairwise sum over all cells, O((R·C)²).
    Direct,
    /// FFT-based linear convolution, O(R·C·log(R·C)).
    Fft,
}

impl Convolution {
    /// Picks a strategy for an `rows × cols` grid: the explicit choice if
    /// given, otherwise direct for grids of at most [`DIRECT_CELL_LIMIT`]
    /// cells and FFT above.
    pub fn resolve(choice: Option<Convolution>, rows: usize, cols: usize) -> Convolution {
        choice.unwrap_or_else(|| {
            if rows.saturating_mul(cols) <= DIRECT_CELL_LIMIT {
                Convolution::Direct
            } else {
                Convolution::Fft
            }
        })
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Convolution::Direct => "direct",
            Convolution::Fft => "fft",
        }
    }
}

impl FromStr for Convolution {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(Convolution::Direct),
            "fft" => Ok(Convolution::Fft),
            other => Err(FieldError::InvalidParameter {
                name: "convolution".into(),
                reason: format!("unknown convolution '{other}' (expected direct or fft)"),
            }),
        }
    }
}

/// Everything needed to turn a mass grid into a magnitude field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Exact correlation or Barnes-Hut approximation.
    pub method: Method,
    /// Falloff law. Barnes-Hut only supports inverse-square.
    pub force_law: ForceLaw,
    /// Divide the magnitude by its maximum.
    pub normalized: bool,
    /// Barnes-Hut opening angle; `None` means [`DEFAULT_THETA`].
    pub theta: Option<f64>,
    /// Exact-solver strategy; `None` lets [`Convolution::resolve`] decide.
    pub convolution: Option<Convolution>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: Method::Exact,
            force_law: ForceLaw::InverseSquare,
            normalized: true,
            theta: None,
            convolution: None,
        }
    }
}

impl SolverConfig {
    /// Extracts a config from a JSON object, falling back to defaults for
    /// missing keys.
    ///
    /// Unlike the plain `param_*` helpers, a present but unrecognized
    /// `method`, `force_law` or `convolution` name is an error.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let defaults = Self::default();
        Ok(Self {
            method: param_opt_str(params, "method")
                .map(str::parse::<Method>)
                .transpose()?
                .unwrap_or(defaults.method),
            force_law: param_opt_str(params, "force_law")
                .map(str::parse::<ForceLaw>)
                .transpose()?
                .unwrap_or(defaults.force_law),
            normalized: param_bool(params, "normalized", defaults.normalized),
            theta: param_opt_f64(params, "theta"),
            convolution: param_opt_str(params, "convolution")
                .map(str::parse::<Convolution>)
                .transpose()?,
        })
    }

    /// The configured opening angle, or [`DEFAULT_THETA`].
    pub fn theta_or_default(&self) -> f64 {
        self.theta.unwrap_or(DEFAULT_THETA)
    }
}
