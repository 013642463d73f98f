//! Finite-difference derivative filter.

use ndarray::Slice;
use sweepfilt_core::{DataGrid, Error, GridAxis, Result};

use crate::numeric::{convolve_same_along, gradient_along};

/// Finite-difference kernel selecting the derivative method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKernel {
    /// Backward difference, `[1, -1]`.
    Difference,
    /// Central difference, `[1/2, 0, -1/2]`.
    Midpoint,
    /// Fourth-order accurate central stencil.
    Accuracy4,
    /// Sixth-order accurate central stencil.
    Accuracy6,
}

impl DiffKernel {
    /// Convolution taps of the kernel.
    pub fn taps(self) -> &'static [f64] {
        match self {
            DiffKernel::Difference => &[1.0, -1.0],
            DiffKernel::Midpoint => &[0.5, 0.0, -0.5],
            DiffKernel::Accuracy4 => &[-1.0 / 12.0, 2.0 / 3.0, 0.0, -2.0 / 3.0, 1.0 / 12.0],
            DiffKernel::Accuracy6 => &[
                1.0 / 60.0,
                -3.0 / 20.0,
                3.0 / 4.0,
                0.0,
                -3.0 / 4.0,
                3.0 / 20.0,
                -1.0 / 60.0,
            ],
        }
    }

    /// Samples trimmed from each edge after one application, to discard
    /// convolution edge artifacts.
    pub fn edge_trim(self) -> usize {
        (self.taps().len() - 1) / 2
    }
}

/// Differentiates the dependent array `times_x` times along X and
/// `times_y` times along Y.
///
/// Each application convolves with the kernel, divides by the numerical
/// gradient of the matching coordinate grid, then trims the kernel's edge
/// width from every array in the tuple along that axis.
pub(crate) fn derivative(
    mut grid: DataGrid,
    kernel: DiffKernel,
    times_x: usize,
    times_y: usize,
) -> Result<DataGrid> {
    for (grid_axis, times) in [(GridAxis::X, times_x), (GridAxis::Y, times_y)] {
        if times == 0 {
            continue;
        }
        if grid.is_line() && grid_axis == GridAxis::Y {
            return Err(Error::DegenerateResult(
                "Y derivative requires 3-column data".into(),
            ));
        }
        let axis = grid_axis.axis();
        for _ in 0..times {
            let coord = match grid_axis {
                GridAxis::X => &grid.x,
                GridAxis::Y => &grid.y,
            };
            let local_spacing = gradient_along(coord, axis)?;
            let convolved = convolve_same_along(grid.dependent(), kernel.taps(), axis);
            grid.set_dependent(convolved / &local_spacing);

            let trim = kernel.edge_trim();
            if trim > 0 {
                let n = grid.x.len_of(axis);
                if n <= 2 * trim {
                    return Err(Error::DegenerateResult(format!(
                        "derivative trims {} samples but axis has only {n}",
                        2 * trim
                    )));
                }
                let keep = Slice::from(trim as isize..(n - trim) as isize);
                grid.x = grid.x.slice_axis(axis, keep).to_owned();
                grid.y = grid.y.slice_axis(axis, keep).to_owned();
                if let Some(z) = grid.z.take() {
                    grid.z = Some(z.slice_axis(axis, keep).to_owned());
                }
            }
        }
    }
    Ok(grid)
}
