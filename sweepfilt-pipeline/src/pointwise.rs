//! Elementwise transforms: normalization, offsets, scaling, logarithms and
//! reference-trace subtraction.

use ndarray::Axis;
use sweepfilt_core::{DataGrid, Error, Result, Target};

/// Reference value used by Normalize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizeMode {
    /// Divide by the maximum of the dependent array.
    Maximum,
    /// Divide by the minimum.
    Minimum,
    /// Divide by the value at the grid point nearest to the coordinates.
    Point { x: f64, y: f64 },
}

/// Logarithm variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Non-positive samples become NaN before taking log10.
    Mask,
    /// If the minimum is non-positive, add `|min| + 1` first (the minimum
    /// maps to zero).
    Shift,
    /// Take the absolute value first.
    Abs,
}

/// Which fixed trace Subtract removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOrientation {
    /// Subtract row `index` from every row.
    Vertical,
    /// Subtract column `index` from every column.
    Horizontal,
}

/// Divides the dependent array by a reference value.
pub(crate) fn normalize(mut grid: DataGrid, mode: NormalizeMode) -> Result<DataGrid> {
    let reference = match mode {
        NormalizeMode::Maximum => grid
            .dependent()
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max),
        NormalizeMode::Minimum => grid.dependent().iter().copied().fold(f64::INFINITY, f64::min),
        NormalizeMode::Point { x, y } => {
            let xi = nearest_index(grid.x.index_axis(Axis(1), 0), x);
            if grid.is_line() {
                grid.dependent()[[xi, 0]]
            } else {
                let yi = nearest_index(grid.y.index_axis(Axis(0), 0), y);
                grid.dependent()[[xi, yi]]
            }
        }
    };
    grid.dependent_mut().mapv_inplace(|v| v / reference);
    Ok(grid)
}

fn nearest_index(coords: ndarray::ArrayView1<'_, f64>, value: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, c) in coords.iter().enumerate() {
        let distance = (c - value).abs();
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}

/// Adds a constant to the named array.
pub(crate) fn offset(mut grid: DataGrid, target: Target, value: f64) -> Result<DataGrid> {
    grid.target_mut(target)?.mapv_inplace(|v| v + value);
    Ok(grid)
}

/// Replaces the dependent array with its elementwise absolute value.
pub(crate) fn absolute(mut grid: DataGrid) -> Result<DataGrid> {
    grid.dependent_mut().mapv_inplace(f64::abs);
    Ok(grid)
}

/// Multiplies (or divides) the named array by a constant.
pub(crate) fn scale(
    mut grid: DataGrid,
    target: Target,
    factor: f64,
    divide: bool,
) -> Result<DataGrid> {
    let factor = if divide { 1.0 / factor } else { factor };
    grid.target_mut(target)?.mapv_inplace(|v| v * factor);
    Ok(grid)
}

/// Replaces the named array with its elementwise reciprocal.
pub(crate) fn invert(mut grid: DataGrid, target: Target) -> Result<DataGrid> {
    grid.target_mut(target)?.mapv_inplace(|v| 1.0 / v);
    Ok(grid)
}

/// Adds the linear plane `a_x * X + a_y * Y` to the dependent array
/// (`a_y * X` for 2-column data); used to de-trend.
pub(crate) fn slope(mut grid: DataGrid, a_x: f64, a_y: f64) -> Result<DataGrid> {
    let plane = if grid.is_line() {
        grid.x.mapv(|x| a_y * x)
    } else {
        a_x * &grid.x + a_y * &grid.y
    };
    *grid.dependent_mut() += &plane;
    Ok(grid)
}

/// Base-10 logarithm of the dependent array.
pub(crate) fn logarithm(mut grid: DataGrid, mode: LogMode) -> Result<DataGrid> {
    match mode {
        LogMode::Mask => grid
            .dependent_mut()
            .mapv_inplace(|v| if v > 0.0 { v.log10() } else { f64::NAN }),
        LogMode::Shift => {
            let min = grid.dependent().iter().copied().fold(f64::INFINITY, f64::min);
            let shift = if min <= 0.0 { min.abs() + 1.0 } else { 0.0 };
            grid.dependent_mut().mapv_inplace(|v| (v + shift).log10());
        }
        LogMode::Abs => grid.dependent_mut().mapv_inplace(|v| v.abs().log10()),
    }
    Ok(grid)
}

/// Subtracts one fixed row or column of the dependent array from all
/// others, removing a reference trace.
pub(crate) fn subtract_trace(
    mut grid: DataGrid,
    orientation: TraceOrientation,
    index: usize,
) -> Result<DataGrid> {
    if grid.is_line() {
        return Err(Error::DegenerateResult(
            "Subtract requires 3-column data".into(),
        ));
    }
    let dependent = grid.dependent_mut();
    match orientation {
        TraceOrientation::Vertical => {
            if index >= dependent.len_of(Axis(0)) {
                return Err(Error::InvalidParameter {
                    filter: "Subtract",
                    setting: "setting 1",
                    value: index.to_string(),
                });
            }
            let trace = dependent.index_axis(Axis(0), index).to_owned();
            *dependent -= &trace;
        }
        TraceOrientation::Horizontal => {
            if index >= dependent.len_of(Axis(1)) {
                return Err(Error::InvalidParameter {
                    filter: "Subtract",
                    setting: "setting 1",
                    value: index.to_string(),
                });
            }
            let trace = dependent.index_axis(Axis(1), index).to_owned();
            *dependent -= &trace.insert_axis(Axis(1));
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1, Array2};

    fn grid_with_z(z: Array2<f64>) -> DataGrid {
        let (nx, ny) = z.dim();
        let x = Array2::from_shape_fn((nx, ny), |(i, _)| i as f64);
        let y = Array2::from_shape_fn((nx, ny), |(_, j)| j as f64);
        DataGrid::from_grid(x, y, z).unwrap()
    }

    #[test]
    fn test_normalize_maximum() {
        let out = normalize(
            grid_with_z(array![[1.0, 2.0], [3.0, 4.0]]),
            NormalizeMode::Maximum,
        )
        .unwrap();
        assert_relative_eq!(out.dependent()[[1, 1]], 1.0);
        assert_relative_eq!(out.dependent()[[0, 0]], 0.25);
    }

    #[test]
    fn test_normalize_point_nearest() {
        let out = normalize(
            grid_with_z(array![[1.0, 2.0], [4.0, 8.0]]),
            NormalizeMode::Point { x: 1.2, y: 0.9 },
        )
        .unwrap();
        // Nearest grid point is (1, 1) with value 8.
        assert_relative_eq!(out.dependent()[[0, 0]], 0.125);
    }

    #[test]
    fn test_offset_only_touches_target() {
        let grid = grid_with_z(array![[1.0, 2.0], [3.0, 4.0]]);
        let out = offset(grid.clone(), Target::X, 10.0).unwrap();
        assert_eq!(out.x[[0, 0]], 10.0);
        assert_eq!(out.y, grid.y);
        assert_eq!(out.z, grid.z);
    }

    #[test]
    fn test_scale_divide() {
        let out = scale(
            grid_with_z(array![[2.0, 4.0], [6.0, 8.0]]),
            Target::Z,
            2.0,
            true,
        )
        .unwrap();
        assert_relative_eq!(out.dependent()[[1, 1]], 4.0);
    }

    #[test]
    fn test_invert() {
        let out = invert(grid_with_z(array![[2.0, 4.0], [5.0, 10.0]]), Target::Z).unwrap();
        assert_relative_eq!(out.dependent()[[0, 1]], 0.25);
    }

    #[test]
    fn test_slope_detrends_plane() {
        let x = Array2::from_shape_fn((4, 4), |(i, _)| i as f64);
        let y = Array2::from_shape_fn((4, 4), |(_, j)| j as f64);
        let z = Array2::from_shape_fn((4, 4), |(i, j)| 2.0 * i as f64 - 3.0 * j as f64 + 1.0);
        let grid = DataGrid::from_grid(x, y, z).unwrap();
        let out = slope(grid, -2.0, 3.0).unwrap();
        for v in out.dependent() {
            assert_relative_eq!(*v, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_slope_line_uses_second_coefficient() {
        let x = Array1::linspace(0.0, 3.0, 4);
        let y = Array1::zeros(4);
        let grid = DataGrid::from_line(x, y).unwrap();
        let out = slope(grid, 100.0, 2.0).unwrap();
        assert_relative_eq!(out.dependent()[[3, 0]], 6.0);
    }

    #[test]
    fn test_logarithm_mask() {
        let out = logarithm(grid_with_z(array![[100.0, -1.0], [0.0, 10.0]]), LogMode::Mask).unwrap();
        assert_relative_eq!(out.dependent()[[0, 0]], 2.0);
        assert!(out.dependent()[[0, 1]].is_nan());
        assert!(out.dependent()[[1, 0]].is_nan());
        assert_relative_eq!(out.dependent()[[1, 1]], 1.0);
    }

    #[test]
    fn test_logarithm_shift_maps_minimum_to_zero() {
        // min = -9, so the shift is 10: -9 maps to log10(1), 90 to log10(100).
        let out = logarithm(grid_with_z(array![[-9.0, 0.0], [1.0, 90.0]]), LogMode::Shift).unwrap();
        assert_relative_eq!(out.dependent()[[0, 0]], 0.0);
        assert_relative_eq!(out.dependent()[[1, 1]], 2.0);
    }

    #[test]
    fn test_logarithm_abs() {
        let out = logarithm(grid_with_z(array![[-100.0, 10.0]]), LogMode::Abs).unwrap();
        assert_relative_eq!(out.dependent()[[0, 0]], 2.0);
        assert_relative_eq!(out.dependent()[[0, 1]], 1.0);
    }

    #[test]
    fn test_subtract_vertical_row() {
        let z = array![[1.0, 2.0], [10.0, 20.0], [100.0, 200.0]];
        let out = subtract_trace(grid_with_z(z), TraceOrientation::Vertical, 1).unwrap();
        assert_eq!(out.dependent(), &array![[-9.0, -18.0], [0.0, 0.0], [90.0, 180.0]]);
    }

    #[test]
    fn test_subtract_horizontal_column() {
        let z = array![[1.0, 2.0], [10.0, 20.0]];
        let out = subtract_trace(grid_with_z(z), TraceOrientation::Horizontal, 0).unwrap();
        assert_eq!(out.dependent(), &array![[0.0, 1.0], [0.0, 10.0]]);
    }

    #[test]
    fn test_subtract_index_out_of_range() {
        let err = subtract_trace(
            grid_with_z(array![[1.0, 2.0]]),
            TraceOrientation::Vertical,
            5,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }
}
