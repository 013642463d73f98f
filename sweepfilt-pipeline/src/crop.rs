//! Cropping along a coordinate axis.

use ndarray::Array2;
use sweepfilt_core::{DataGrid, Error, GridAxis, Result};

/// How the crop bounds are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Keep samples whose coordinate lies inside `[left, right]`.
    Absolute,
    /// Drop samples within `|left|` of the axis minimum or `|right|` of
    /// the maximum.
    Relative,
}

/// Crops every array in the tuple along the named axis.
///
/// A boolean mask is built over the axis coordinate; rows (or columns)
/// containing any masked sample are dropped from all arrays so shapes stay
/// mutually consistent. The whole operation is a no-op when `left >= right`
/// or the bounds lie entirely outside the data range.
pub(crate) fn crop(
    grid: DataGrid,
    axis: GridAxis,
    mode: CropMode,
    left: f64,
    right: f64,
) -> Result<DataGrid> {
    let coord: &Array2<f64> = match axis {
        GridAxis::X => &grid.x,
        GridAxis::Y => &grid.y,
    };
    let min = coord.iter().copied().fold(f64::INFINITY, f64::min);
    let max = coord.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(left < right && max > left && min < right) {
        return Ok(grid);
    }

    let masked = |v: f64| match mode {
        CropMode::Absolute => v < left || v > right,
        CropMode::Relative => v <= min + left.abs() || v >= max - right.abs(),
    };

    // Line data always compresses along the sample axis.
    let compress = if grid.is_line() {
        GridAxis::X.axis()
    } else {
        axis.axis()
    };
    let kept: Vec<usize> = (0..coord.len_of(compress))
        .filter(|&i| coord.index_axis(compress, i).iter().all(|&v| !masked(v)))
        .collect();
    if kept.is_empty() {
        return Err(Error::DegenerateResult(
            "crop bounds leave no samples".into(),
        ));
    }
    if kept.len() == coord.len_of(compress) {
        return Ok(grid);
    }

    Ok(DataGrid {
        x: grid.x.select(compress, &kept),
        y: grid.y.select(compress, &kept),
        z: grid.z.map(|z| z.select(compress, &kept)),
    })
}
