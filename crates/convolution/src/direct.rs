//! Pairwise evaluation of the kernel correlation.

use crate::kernel::KernelPair;
use gravfield_core::{FieldError, ForceField, Grid};

/// Sums the pull of every massive cell on every cell.
///
/// Cells with exactly zero mass are skipped; their kernel contributions
/// are exactly zero. NaN mass is not skipped and poisons every output cell.
pub(crate) fn correlate(mass: &Grid, kernels: &KernelPair) -> Result<ForceField, FieldError> {
    let (rows, cols) = mass.shape();
    let kcols = kernels.shape().1;
    let (kx, ky) = (kernels.kx().data(), kernels.ky().data());

    let mut fx = Grid::new(rows, cols)?;
    let mut fy = Grid::new(rows, cols)?;
    let (out_x, out_y) = (fx.data_mut(), fy.data_mut());

    for (r, c, m) in mass.iter() {
        if m == 0.0 {
            continue;
        }
        for i in 0..rows {
            // Kernel row for target row i, shifted so column j lands on j - c + C-1.
            let base = (i + rows - 1 - r) * kcols + (cols - 1 - c);
            let krow_x = &kx[base..base + cols];
            let krow_y = &ky[base..base + cols];
            let out_row = i * cols..(i + 1) * cols;
            for ((ox, wx), (oy, wy)) in out_x[out_row.clone()]
                .iter_mut()
                .zip(krow_x)
                .zip(out_y[out_row].iter_mut().zip(krow_y))
            {
                *ox += m * wx;
                *oy += m * wy;
            }
        }
    }

    ForceField::new(fx, fy)
}
