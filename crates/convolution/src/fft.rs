//! FFT evaluation of the kernel correlation.
//!
//! The pull on cell `(i, j)` is entry `(i + R-1, j + C-1)` of the linear
//! convolution of the mass grid with the kernel. A circular convolution
//! over the kernel's own `(2R-1) × (2C-1)` extent wraps only the entries
//! past `2R-2` / `2C-2`, so the entries read back are exact.
//!
//! The mass grid is real, so both kernels ride in one complex buffer as
//! `kx + i·ky`: the real part of the product's inverse transform is the
//! row-axis force and the imaginary part the column-axis force.

use crate::kernel::KernelPair;
use gravfield_core::{FieldError, ForceField, Grid};
use num_complex::Complex64;
use rustfft::FftPlanner;

pub(crate) fn correlate(mass: &Grid, kernels: &KernelPair) -> Result<ForceField, FieldError> {
    let (rows, cols) = mass.shape();
    let (prows, pcols) = kernels.shape();
    let len = prows * pcols;
    log::debug!("fft correlation: {rows}x{cols} grid on a {prows}x{pcols} transform");

    let mut signal = vec![Complex64::new(0.0, 0.0); len];
    for (r, c, m) in mass.iter() {
        signal[r * pcols + c] = Complex64::new(m, 0.0);
    }
    let mut response: Vec<Complex64> = kernels
        .kx()
        .data()
        .iter()
        .zip(kernels.ky().data())
        .map(|(&x, &y)| Complex64::new(x, y))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    transform_2d(&mut planner, &mut signal, prows, pcols, Direction::Forward);
    transform_2d(&mut planner, &mut response, prows, pcols, Direction::Forward);

    signal
        .iter_mut()
        .zip(&response)
        .for_each(|(s, k)| *s *= *k);
    transform_2d(&mut planner, &mut signal, prows, pcols, Direction::Inverse);

    // rustfft leaves transforms unnormalized.
    let scale = 1.0 / len as f64;
    let (row_offset, col_offset) = (rows - 1, cols - 1);
    let at = |i: usize, j: usize| signal[(i + row_offset) * pcols + j + col_offset] * scale;

    let fx = Grid::from_fn(rows, cols, |i, j| at(i, j).re)?;
    let fy = Grid::from_fn(rows, cols, |i, j| at(i, j).im)?;
    ForceField::new(fx, fy)
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Inverse,
}

/// In-place 2D transform of a row-major `rows × cols` buffer: every row,
/// then every column (through a transpose).
fn transform_2d(
    planner: &mut FftPlanner<f64>,
    data: &mut [Complex64],
    rows: usize,
    cols: usize,
    direction: Direction,
) {
    let plan = |planner: &mut FftPlanner<f64>, n: usize| match direction {
        Direction::Forward => planner.plan_fft_forward(n),
        Direction::Inverse => planner.plan_fft_inverse(n),
    };

    // `process` runs one transform per consecutive chunk of the plan's length.
    plan(planner, cols).process(data);

    let mut columns = transpose(data, rows, cols);
    plan(planner, rows).process(&mut columns);
    data.copy_from_slice(&transpose(&columns, cols, rows));
}

/// Transposes a row-major `rows × cols` buffer into a `cols × rows` one.
fn transpose(data: &[Complex64], rows: usize, cols: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); data.len()];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = data[r * cols + c];
        }
    }
    out
}
