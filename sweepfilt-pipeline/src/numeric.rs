//! Shared numeric helpers for the transform functions.

use ndarray::{Array2, Axis};
use sweepfilt_core::{Error, Result};

/// Numerical gradient of `a` along `axis` with respect to the sample index:
/// central differences in the interior, one-sided at the edges.
pub(crate) fn gradient_along(a: &Array2<f64>, axis: Axis) -> Result<Array2<f64>> {
    let n = a.len_of(axis);
    if n < 2 {
        return Err(Error::DegenerateResult(format!(
            "gradient needs at least 2 samples along axis {}, got {n}",
            axis.index()
        )));
    }
    let mut out = Array2::zeros(a.raw_dim());
    for (lane, mut grad) in a.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        grad[0] = lane[1] - lane[0];
        grad[n - 1] = lane[n - 1] - lane[n - 2];
        for i in 1..n - 1 {
            grad[i] = (lane[i + 1] - lane[i - 1]) / 2.0;
        }
    }
    Ok(out)
}

/// Zero-padded "same"-size 1D convolution of every lane along `axis`.
///
/// Matches a full convolution truncated to the input length starting at
/// offset `(taps.len() - 1) / 2`, so even-length kernels bias left.
pub(crate) fn convolve_same_along(a: &Array2<f64>, taps: &[f64], axis: Axis) -> Array2<f64> {
    let n = a.len_of(axis);
    let offset = (taps.len() - 1) / 2;
    let mut out = Array2::zeros(a.raw_dim());
    for (lane, mut conv) in a.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        for i in 0..n {
            let center = i + offset;
            let mut acc = 0.0;
            for (j, tap) in taps.iter().enumerate() {
                if let Some(m) = center.checked_sub(j) {
                    if m < n {
                        acc += tap * lane[m];
                    }
                }
            }
            conv[i] = acc;
        }
    }
    out
}

/// Maps an out-of-range index into `0..n` by mirroring without edge
/// repetition suppression (the `(d c b a | a b c d | d c b a)` scheme).
pub(crate) fn reflect_index(mut i: isize, n: isize) -> usize {
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return usize::try_from(i).unwrap_or(0);
        }
    }
}

/// Window offsets for a moving window of `size` samples: symmetric for odd
/// sizes, shifted one to the left for even sizes.
pub(crate) fn window_offsets(size: usize) -> (isize, isize) {
    let hi = ((size - 1) / 2) as isize;
    let lo = hi - (size as isize - 1);
    (lo, hi)
}

/// Solves a small dense linear system by Gaussian elimination with partial
/// pivoting. Used for Savitzky-Golay coefficient fits (order at most 6).
pub(crate) fn solve_small(mut m: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
    let n = rhs.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap_or(col);
        if m[pivot][col].abs() < 1e-300 {
            return Err(Error::DegenerateResult(
                "singular polynomial fit system".into(),
            ));
        }
        m.swap(col, pivot);
        rhs.swap(col, pivot);
        for row in col + 1..n {
            let factor = m[row][col] / m[col][col];
            for k in col..n {
                m[row][k] -= factor * m[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }
    let mut sol = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for k in row + 1..n {
            acc -= m[row][k] * sol[k];
        }
        sol[row] = acc / m[row][row];
    }
    Ok(sol)
}
