//! Smoothing filters for the dependent array.

use ndarray::{Array2, Axis};
use sweepfilt_core::{DataGrid, Error, Result};

use crate::numeric::{reflect_index, window_offsets};

/// Smoothing variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothKind {
    /// Gaussian kernel smoothing (width is the standard deviation).
    Gaussian,
    /// Moving-window median.
    Median,
    /// Local Wiener (adaptive mean/variance) filter.
    Wiener,
}

/// Smooths the dependent array with separate widths for the X and Y axes.
///
/// Width semantics follow the historical settings encoding:
/// - Gaussian: widths are sigmas; a width of 0 skips that axis.
/// - Median: window size is `ceil(width) + 1` per axis (so 0 gives a
///   single-sample window, an identity in that direction).
/// - Wiener: window size is `ceil(width)` forced odd.
pub(crate) fn smooth(
    mut grid: DataGrid,
    kind: SmoothKind,
    width_x: f64,
    width_y: f64,
) -> Result<DataGrid> {
    if width_x < 0.0 || width_y < 0.0 {
        return Err(Error::DegenerateResult("negative smoothing width".into()));
    }
    match kind {
        SmoothKind::Gaussian => {
            if width_x > 0.0 {
                let smoothed = gaussian_1d(grid.dependent(), width_x, Axis(0));
                grid.set_dependent(smoothed);
            }
            if width_y > 0.0 {
                let smoothed = gaussian_1d(grid.dependent(), width_y, Axis(1));
                grid.set_dependent(smoothed);
            }
        }
        SmoothKind::Median => {
            let size_x = width_x.ceil() as usize + 1;
            let size_y = width_y.ceil() as usize + 1;
            let smoothed = median_2d(grid.dependent(), size_x, size_y);
            grid.set_dependent(smoothed);
        }
        SmoothKind::Wiener => {
            let smoothed = wiener_2d(
                grid.dependent(),
                force_odd(width_x.ceil() as usize),
                force_odd(width_y.ceil() as usize),
            );
            grid.set_dependent(smoothed);
        }
    }
    Ok(grid)
}

fn force_odd(size: usize) -> usize {
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Gaussian smoothing along one axis, reflect boundary, truncated at four
/// standard deviations like the reference implementation.
fn gaussian_1d(a: &Array2<f64>, sigma: f64, axis: Axis) -> Array2<f64> {
    let radius = (4.0 * sigma + 0.5) as usize;
    let mut taps = Vec::with_capacity(2 * radius + 1);
    for i in 0..=2 * radius {
        let d = i as f64 - radius as f64;
        taps.push((-d * d / (2.0 * sigma * sigma)).exp());
    }
    let norm: f64 = taps.iter().sum();
    for t in &mut taps {
        *t /= norm;
    }

    let n = a.len_of(axis) as isize;
    let mut out = Array2::zeros(a.raw_dim());
    for (lane, mut smoothed) in a.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        for i in 0..n {
            let mut acc = 0.0;
            for (j, tap) in taps.iter().enumerate() {
                let src = i + j as isize - radius as isize;
                acc += tap * lane[reflect_index(src, n)];
            }
            smoothed[i as usize] = acc;
        }
    }
    out
}

/// Moving-window median with reflect boundary. Even window sizes bias left,
/// and the median of an even sample count is the upper of the two central
/// order statistics (rank `count / 2`).
fn median_2d(a: &Array2<f64>, size_x: usize, size_y: usize) -> Array2<f64> {
    let (nx, ny) = a.dim();
    let (lo_x, hi_x) = window_offsets(size_x);
    let (lo_y, hi_y) = window_offsets(size_y);
    let mut window = Vec::with_capacity(size_x * size_y);
    let mut out = Array2::zeros(a.raw_dim());
    for i in 0..nx {
        for j in 0..ny {
            window.clear();
            for di in lo_x..=hi_x {
                for dj in lo_y..=hi_y {
                    let si = reflect_index(i as isize + di, nx as isize);
                    let sj = reflect_index(j as isize + dj, ny as isize);
                    window.push(a[[si, sj]]);
                }
            }
            window.sort_by(f64::total_cmp);
            out[[i, j]] = window[window.len() / 2];
        }
    }
    out
}

/// Local Wiener filter: pixels whose windowed variance falls below the mean
/// variance (the noise estimate) collapse to the local mean.
fn wiener_2d(a: &Array2<f64>, size_x: usize, size_y: usize) -> Array2<f64> {
    let count = (size_x * size_y) as f64;
    let local_mean = local_sum(a, size_x, size_y) / count;
    let local_sq = local_sum(&a.mapv(|v| v * v), size_x, size_y) / count;
    let local_var = &local_sq - &local_mean.mapv(|m| m * m);
    let noise = local_var.mean().unwrap_or(0.0);

    let mut out = Array2::zeros(a.raw_dim());
    for ((idx, v), out_v) in a.indexed_iter().zip(out.iter_mut()) {
        let mean = local_mean[idx];
        let var = local_var[idx];
        *out_v = if var < noise {
            mean
        } else {
            mean + (1.0 - noise / var) * (v - mean)
        };
    }
    out
}

/// Zero-padded windowed sum, computed separably.
fn local_sum(a: &Array2<f64>, size_x: usize, size_y: usize) -> Array2<f64> {
    let sum_x = directional_sum(a, size_x, Axis(0));
    directional_sum(&sum_x, size_y, Axis(1))
}

fn directional_sum(a: &Array2<f64>, size: usize, axis: Axis) -> Array2<f64> {
    let n = a.len_of(axis) as isize;
    let (lo, hi) = window_offsets(size);
    let mut out = Array2::zeros(a.raw_dim());
    for (lane, mut sums) in a.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        for i in 0..n {
            let mut acc = 0.0;
            for o in lo..=hi {
                let src = i + o;
                if src >= 0 && src < n {
                    acc += lane[src as usize];
                }
            }
            sums[i as usize] = acc;
        }
    }
    out
}
