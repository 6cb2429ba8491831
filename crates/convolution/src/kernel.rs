//! Force kernels: the pull of a unit mass at every relative offset.
//!
//! For an `R × C` mass grid the kernels span `(2R-1) × (2C-1)` so that every
//! pair of cells in the grid has its offset represented. Entry `(i, j)`
//! holds the force felt by a cell whose mass partner sits at offset
//! `(R-1-i, C-1-j)` from it; the centre `(R-1, C-1)` is the zero offset.
//! Reading the kernel at `(i - r + R-1, j - c + C-1)` therefore gives the
//! pull on cell `(i, j)` from a unit mass at `(r, c)`, pointing toward the
//! mass.

use gravfield_core::{FieldError, ForceLaw, Grid};

/// Row- and column-axis kernels for one grid shape and force law.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelPair {
    kx: Grid,
    ky: Grid,
    law: ForceLaw,
}

impl KernelPair {
    /// Row-axis component kernel.
    pub fn kx(&self) -> &Grid {
        &self.kx
    }

    /// Column-axis component kernel.
    pub fn ky(&self) -> &Grid {
        &self.ky
    }

    /// Force law the kernels were built for.
    pub fn law(&self) -> ForceLaw {
        self.law
    }

    /// Kernel shape, `(2R-1, 2C-1)`.
    pub fn shape(&self) -> (usize, usize) {
        self.kx.shape()
    }

    /// Shape of the mass grid these kernels apply to.
    pub fn mass_shape(&self) -> (usize, usize) {
        let (rows, cols) = self.shape();
        (rows.div_ceil(2), cols.div_ceil(2))
    }

    /// Returns `FieldError::KernelShapeMismatch` unless the kernels were
    /// built for a `rows × cols` grid.
    pub fn ensure_fits(&self, rows: usize, cols: usize) -> Result<(), FieldError> {
        let (kernel_rows, kernel_cols) = self.shape();
        if kernel_rows + 1 != 2 * rows || kernel_cols + 1 != 2 * cols {
            return Err(FieldError::KernelShapeMismatch {
                kernel_rows,
                kernel_cols,
                rows,
                cols,
            });
        }
        Ok(())
    }
}

/// `num / den`, or zero when the quotient is not finite.
///
/// The only non-finite quotient in a kernel is `0 / 0` at the zero offset,
/// where a mass exerts no force on itself.
pub fn divide_or_zero(num: f64, den: f64) -> f64 {
    let q = num / den;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

/// Span of offsets for one axis of length `n`: `2n - 1`.
fn span(n: usize) -> Result<usize, FieldError> {
    n.checked_mul(2)
        .and_then(|v| v.checked_sub(1))
        .ok_or(FieldError::InvalidDimensions)
}

/// Builds the kernel pair for an `rows × cols` mass grid.
///
/// With `xs = R-1-i` and `ys = C-1-j`, the entries are
/// `kx = xs / (xs² + ys²)^p` and `ky = ys / (xs² + ys²)^p` where `p` is
/// [`ForceLaw::exponent`]. The centre entry is zero.
///
/// Returns `FieldError::InvalidDimensions` if either dimension is zero.
pub fn build_kernels(rows: usize, cols: usize, law: ForceLaw) -> Result<KernelPair, FieldError> {
    let (krows, kcols) = (span(rows)?, span(cols)?);
    let p = law.exponent();
    let centre_row = (rows - 1) as f64;
    let centre_col = (cols - 1) as f64;

    let falloff = |i: usize, j: usize| {
        let xs = centre_row - i as f64;
        let ys = centre_col - j as f64;
        (xs, ys, (xs * xs + ys * ys).powf(p))
    };
    let kx = Grid::from_fn(krows, kcols, |i, j| {
        let (xs, _, n) = falloff(i, j);
        divide_or_zero(xs, n)
    })?;
    let ky = Grid::from_fn(krows, kcols, |i, j| {
        let (_, ys, n) = falloff(i, j);
        divide_or_zero(ys, n)
    })?;

    log::trace!("built {krows}x{kcols} {law} kernels for a {rows}x{cols} grid");
    Ok(KernelPair { kx, ky, law })
}
