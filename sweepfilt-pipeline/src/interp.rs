//! Resampling onto a regular grid.

use ndarray::{Array1, Array2, Axis};
use sweepfilt_core::{DataGrid, Error, Result};

/// Interpolation order for Interp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpKind {
    /// Piecewise linear (2-point).
    Linear,
    /// Local cubic Lagrange (4-point).
    Cubic,
    /// Local quintic Lagrange (6-point).
    Quintic,
}

impl InterpKind {
    fn points(self) -> usize {
        match self {
            InterpKind::Linear => 2,
            InterpKind::Cubic => 4,
            InterpKind::Quintic => 6,
        }
    }
}

/// Resamples the dependent array onto a regular `n_x` by `n_y` grid
/// spanning the data range, replacing every array in the tuple. Separable
/// interpolation: along X first, then along Y. 2-column data resamples
/// along X only, ignoring `n_y`.
pub(crate) fn interpolate(grid: DataGrid, kind: InterpKind, n_x: usize, n_y: usize) -> Result<DataGrid> {
    if n_x < 2 {
        return Err(Error::DegenerateResult(format!(
            "interpolation target must have at least 2 points per axis, got {n_x}"
        )));
    }
    let xs = axis_coordinates(grid.x.index_axis(Axis(1), 0))?;
    let x_new = linspace_over(&xs, n_x);

    if grid.is_line() {
        let resampled = resample(&xs, grid.y.index_axis(Axis(1), 0).to_owned(), &x_new, kind)?;
        return DataGrid::from_line(Array1::from(x_new), Array1::from(resampled));
    }
    if n_y < 2 {
        return Err(Error::DegenerateResult(format!(
            "interpolation target must have at least 2 points per axis, got {n_y}"
        )));
    }

    let ys = axis_coordinates(grid.y.index_axis(Axis(0), 0))?;
    let y_new = linspace_over(&ys, n_y);
    let z = grid.z.as_ref().ok_or_else(|| {
        Error::ShapeMismatch("3-column tuple without dependent array".into())
    })?;

    // Pass 1: every original column resampled onto the new X positions.
    let ny_old = z.len_of(Axis(1));
    let mut pass_x = Array2::zeros((n_x, ny_old));
    for (j, column) in z.axis_iter(Axis(1)).enumerate() {
        let resampled = resample(&xs, column.to_owned(), &x_new, kind)?;
        for (i, v) in resampled.iter().enumerate() {
            pass_x[[i, j]] = *v;
        }
    }
    // Pass 2: every new row resampled onto the new Y positions.
    let mut z_new = Array2::zeros((n_x, n_y));
    for (i, row) in pass_x.axis_iter(Axis(0)).enumerate() {
        let resampled = resample(&ys, row.to_owned(), &y_new, kind)?;
        for (j, v) in resampled.iter().enumerate() {
            z_new[[i, j]] = *v;
        }
    }

    let x_grid = Array2::from_shape_fn((n_x, n_y), |(i, _)| x_new[i]);
    let y_grid = Array2::from_shape_fn((n_x, n_y), |(_, j)| y_new[j]);
    DataGrid::from_grid(x_grid, y_grid, z_new)
}

/// Extracts a strictly monotonic coordinate lane as an ascending sequence,
/// remembering whether it was reversed.
struct AxisCoords {
    values: Vec<f64>,
    reversed: bool,
}

fn axis_coordinates(lane: ndarray::ArrayView1<'_, f64>) -> Result<AxisCoords> {
    let mut values: Vec<f64> = lane.iter().copied().collect();
    if values.len() < 2 {
        return Err(Error::DegenerateResult(
            "interpolation needs at least 2 source samples per axis".into(),
        ));
    }
    let ascending = values.windows(2).all(|w| w[0] < w[1]);
    let descending = values.windows(2).all(|w| w[0] > w[1]);
    if !ascending && !descending {
        return Err(Error::DegenerateResult(
            "interpolation requires strictly monotonic axis coordinates".into(),
        ));
    }
    if descending {
        values.reverse();
    }
    Ok(AxisCoords {
        values,
        reversed: descending,
    })
}

fn linspace_over(coords: &AxisCoords, n: usize) -> Vec<f64> {
    let (lo, hi) = (coords.values[0], coords.values[coords.values.len() - 1]);
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

/// 1D resampling of `values` (sampled at `coords`) onto `queries` using
/// local Lagrange interpolation of the requested order.
fn resample(
    coords: &AxisCoords,
    mut values: Array1<f64>,
    queries: &[f64],
    kind: InterpKind,
) -> Result<Vec<f64>> {
    let xs = &coords.values;
    let n = xs.len();
    let points = kind.points();
    if n < points {
        return Err(Error::DegenerateResult(format!(
            "{points}-point interpolation needs at least {points} samples, got {n}"
        )));
    }
    if coords.reversed {
        values.invert_axis(Axis(0));
    }

    let out = queries
        .iter()
        .map(|&q| {
            // Bracketing interval, then a window of `points` nodes around it.
            let interval = match xs.binary_search_by(|c| c.total_cmp(&q)) {
                Ok(i) => i.min(n - 2),
                Err(i) => i.saturating_sub(1).min(n - 2),
            };
            let start = interval.saturating_sub((points - 1) / 2).min(n - points);
            lagrange(&xs[start..start + points], &values, start, q)
        })
        .collect();
    Ok(out)
}

/// Evaluates the Lagrange polynomial through `nodes` at `q`.
fn lagrange(nodes: &[f64], values: &Array1<f64>, start: usize, q: f64) -> f64 {
    let mut acc = 0.0;
    for k in 0..nodes.len() {
        let mut basis = 1.0;
        for m in 0..nodes.len() {
            if m != k {
                basis *= (q - nodes[m]) / (nodes[k] - nodes[m]);
            }
        }
        acc += basis * values[start + k];
    }
    acc
}
