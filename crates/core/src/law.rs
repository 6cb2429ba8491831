//! Force laws: how the pull of a unit mass falls off with distance.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Falloff law for the force exerted by a point mass.
///
/// The force vector for a displacement `v` is `v / |v|^(2p)`, so its
/// magnitude falls off as `1/d` for [`ForceLaw::Linear`] and `1/d²` for
/// [`ForceLaw::InverseSquare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForceLaw {
    /// Magnitude proportional to `1/d`.
    Linear,
    /// Newtonian gravity: magnitude proportional to `1/d²`.
    #[default]
    InverseSquare,
}

impl ForceLaw {
    /// Exponent applied to the squared distance when normalizing the
    /// displacement vector: `1` for linear, `3/2` for inverse-square.
    pub fn exponent(self) -> f64 {
        match self {
            ForceLaw::Linear => 1.0,
            ForceLaw::InverseSquare => 1.5,
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ForceLaw::Linear => "linear",
            ForceLaw::InverseSquare => "inverse-square",
        }
    }

    /// All laws, in declaration order.
    pub fn all() -> &'static [ForceLaw] {
        &[ForceLaw::Linear, ForceLaw::InverseSquare]
    }
}

impl fmt::Display for ForceLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ForceLaw {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(ForceLaw::Linear),
            "inverse-square" | "inverse_square" => Ok(ForceLaw::InverseSquare),
            other => Err(FieldError::InvalidParameter {
                name: "force_law".into(),
                reason: format!("unknown force law '{other}' (expected linear or inverse-square)"),
            }),
        }
    }
}
