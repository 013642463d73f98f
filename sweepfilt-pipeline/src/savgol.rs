//! Savitzky-Golay filtering along one axis.

use ndarray::{Array2, ArrayView1, ArrayViewMut1};
use sweepfilt_core::{DataGrid, Error, GridAxis, Result};

use crate::numeric::{gradient_along, solve_small};

/// Savitzky-Golay parameters after window adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavGolParams {
    /// Axis the windowed polynomial fit runs along.
    pub axis: GridAxis,
    /// Derivative order (0, 1 or 2).
    pub deriv: usize,
    /// Window length, forced odd and at least `polyorder + 1`.
    pub window: usize,
    /// Polynomial order of the fit.
    pub polyorder: usize,
}

impl SavGolParams {
    /// Builds parameters, applying the historical window adjustments.
    pub fn new(axis: GridAxis, deriv: usize, window: usize, polyorder: usize) -> Self {
        let mut window = window.max(polyorder + 1);
        if window % 2 == 0 {
            window += 1;
        }
        Self {
            axis,
            deriv,
            window,
            polyorder,
        }
    }
}

/// Applies a Savitzky-Golay filter to the dependent array, then divides by
/// the numerical gradient of the matching coordinate grid once per
/// derivative order (chain rule for non-uniform axes).
pub(crate) fn sav_gol(mut grid: DataGrid, params: SavGolParams) -> Result<DataGrid> {
    if grid.is_line() && params.axis == GridAxis::Y {
        return Err(Error::DegenerateResult(
            "Sav-Gol along Y requires 3-column data".into(),
        ));
    }
    let axis = params.axis.axis();
    let n = grid.dependent().len_of(axis);
    if params.window > n {
        return Err(Error::DegenerateResult(format!(
            "Sav-Gol window {} exceeds {} samples along the axis",
            params.window, n
        )));
    }

    let taps = savgol_taps(params.window, params.polyorder, params.deriv)?;
    let mut filtered = Array2::zeros(grid.dependent().raw_dim());
    for (lane, out) in grid
        .dependent()
        .lanes(axis)
        .into_iter()
        .zip(filtered.lanes_mut(axis))
    {
        filter_lane(lane, out, &taps, params)?;
    }
    grid.set_dependent(filtered);

    if params.deriv > 0 {
        let coord = match params.axis {
            GridAxis::X => &grid.x,
            GridAxis::Y => &grid.y,
        };
        let spacing = gradient_along(coord, axis)?;
        for _ in 0..params.deriv {
            let divided = grid.dependent() / &spacing;
            grid.set_dependent(divided);
        }
    }
    Ok(grid)
}

/// Convolution taps evaluating the fitted polynomial's `deriv`-th
/// derivative at the window center.
fn savgol_taps(window: usize, polyorder: usize, deriv: usize) -> Result<Vec<f64>> {
    if deriv > polyorder {
        // The derivative of the fit is identically zero.
        return Ok(vec![0.0; window]);
    }
    let half = (window - 1) / 2;
    let terms = polyorder + 1;
    // Normal-equation matrix of the monomial design over [-half, half].
    let mut m = vec![vec![0.0; terms]; terms];
    for k in 0..window {
        let t = k as f64 - half as f64;
        for (r, row) in m.iter_mut().enumerate() {
            for (c, entry) in row.iter_mut().enumerate() {
                *entry += t.powi((r + c) as i32);
            }
        }
    }
    let mut rhs = vec![0.0; terms];
    rhs[deriv] = 1.0;
    let weights = solve_small(m, rhs)?;

    let scale = factorial(deriv);
    let taps = (0..window)
        .map(|k| {
            let t = k as f64 - half as f64;
            let poly: f64 = weights
                .iter()
                .enumerate()
                .map(|(j, w)| w * t.powi(j as i32))
                .sum();
            scale * poly
        })
        .collect();
    Ok(taps)
}

/// One lane: convolution in the interior, a dedicated polynomial fit to the
/// first and last window at the edges (the reference "interp" edge mode).
fn filter_lane(
    lane: ArrayView1<'_, f64>,
    mut out: ArrayViewMut1<'_, f64>,
    taps: &[f64],
    params: SavGolParams,
) -> Result<()> {
    let n = lane.len();
    let window = params.window;
    let half = (window - 1) / 2;

    for i in half..n - half {
        let mut acc = 0.0;
        for (k, tap) in taps.iter().enumerate() {
            acc += tap * lane[i - half + k];
        }
        out[i] = acc;
    }

    if half > 0 {
        let head = edge_fit(lane, 0, params)?;
        let tail = edge_fit(lane, n - window, params)?;
        for t in 0..half {
            out[t] = eval_poly_deriv(&head, t as f64, params.deriv);
            let pos = n - half + t;
            out[pos] = eval_poly_deriv(&tail, (pos - (n - window)) as f64, params.deriv);
        }
    }
    Ok(())
}

/// Least-squares polynomial coefficients over one edge window, in local
/// window coordinates `0..window`.
fn edge_fit(lane: ArrayView1<'_, f64>, start: usize, params: SavGolParams) -> Result<Vec<f64>> {
    let terms = params.polyorder + 1;
    let mut m = vec![vec![0.0; terms]; terms];
    let mut rhs = vec![0.0; terms];
    for k in 0..params.window {
        let t = k as f64;
        let v = lane[start + k];
        for r in 0..terms {
            rhs[r] += v * t.powi(r as i32);
            for c in 0..terms {
                m[r][c] += t.powi((r + c) as i32);
            }
        }
    }
    solve_small(m, rhs)
}

fn eval_poly_deriv(coeffs: &[f64], t: f64, deriv: usize) -> f64 {
    coeffs
        .iter()
        .enumerate()
        .skip(deriv)
        .map(|(j, c)| c * (factorial(j) / factorial(j - deriv)) * t.powi((j - deriv) as i32))
        .sum()
}

fn factorial(n: usize) -> f64 {
    (1..=n).map(|v| v as f64).product()
}
