//! Transforms that rearrange samples of the dependent array.

use ndarray::{concatenate, Axis, Slice};
use sweepfilt_core::{DataGrid, Error, GridAxis, Result};

/// Orientation of the Flip filter.
///
/// The names are historical and counter-intuitive: "Left Right" mirrors the
/// row (X) axis and "Up Down" mirrors the column (Y) axis. Tests pin this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOrientation {
    /// Mirror along array axis 0.
    LeftRight,
    /// Mirror along array axis 1.
    UpDown,
}

/// Circularly shifts dependent values along the named axis, but only for
/// lanes at or after `position` on the perpendicular axis. Coordinate
/// arrays are unchanged.
pub(crate) fn roll(
    mut grid: DataGrid,
    axis: GridAxis,
    position: usize,
    amount: i64,
) -> Result<DataGrid> {
    let roll_axis = axis.axis();
    let pivot_axis = axis.other().axis();
    let n = grid.dependent().len_of(roll_axis);
    if n == 0 {
        return Err(Error::DegenerateResult("empty axis".into()));
    }
    let shift = amount.rem_euclid(n as i64) as usize;
    if shift == 0 {
        return Ok(grid);
    }

    let dependent = grid.dependent_mut();
    let lanes = dependent.len_of(pivot_axis);
    let mut rotated = Vec::with_capacity(n);
    for lane_index in position..lanes {
        let mut lane = dependent.index_axis_mut(pivot_axis, lane_index);
        rotated.clear();
        rotated.extend(lane.iter().copied());
        for (i, v) in rotated.iter().enumerate() {
            lane[(i + shift) % n] = *v;
        }
    }
    Ok(grid)
}

/// Removes a slab of `width` samples starting at `start` along the named
/// axis of the dependent array and re-appends it at the end: the material
/// after the cut comes before the material inside it. This reorders, it
/// does not delete; shapes are unchanged.
pub(crate) fn cut(
    mut grid: DataGrid,
    axis: GridAxis,
    start: usize,
    width: usize,
) -> Result<DataGrid> {
    let cut_axis = axis.axis();
    let n = grid.dependent().len_of(cut_axis);
    let start = start.min(n);
    let stop = start.saturating_add(width).min(n);

    let dependent = grid.dependent();
    let before = dependent.slice_axis(cut_axis, Slice::from(0..start));
    let inside = dependent.slice_axis(cut_axis, Slice::from(start..stop));
    let after = dependent.slice_axis(cut_axis, Slice::from(stop..n));
    let stitched = concatenate(cut_axis, &[before, after, inside])
        .map_err(|e| Error::ShapeMismatch(e.to_string()))?;
    grid.set_dependent(stitched);
    Ok(grid)
}

/// Mirrors the dependent array along one axis.
pub(crate) fn flip(mut grid: DataGrid, orientation: FlipOrientation) -> Result<DataGrid> {
    let axis = match orientation {
        FlipOrientation::LeftRight => Axis(0),
        FlipOrientation::UpDown => Axis(1),
    };
    grid.dependent_mut().invert_axis(axis);
    Ok(grid)
}

/// Exchanges the X and Y arrays; the dependent stays last.
pub(crate) fn swap_xy(mut grid: DataGrid) -> Result<DataGrid> {
    std::mem::swap(&mut grid.x, &mut grid.y);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn grid_with_z(z: Array2<f64>) -> DataGrid {
        let (nx, ny) = z.dim();
        let x = Array2::from_shape_fn((nx, ny), |(i, _)| i as f64);
        let y = Array2::from_shape_fn((nx, ny), |(_, j)| j as f64);
        DataGrid::from_grid(x, y, z).unwrap()
    }

    #[test]
    fn test_roll_x_only_after_pivot() {
        let z = array![[0.0, 10.0], [1.0, 11.0], [2.0, 12.0]];
        // Pivot 1 on the Y (column) axis: column 0 untouched.
        let out = roll(grid_with_z(z), GridAxis::X, 1, 1).unwrap();
        assert_eq!(out.dependent().column(0).to_vec(), vec![0.0, 1.0, 2.0]);
        assert_eq!(out.dependent().column(1).to_vec(), vec![12.0, 10.0, 11.0]);
        // Coordinates untouched.
        assert_eq!(out.x[[2, 0]], 2.0);
    }

    #[test]
    fn test_roll_negative_amount() {
        let z = array![[0.0], [1.0], [2.0], [3.0]];
        let out = roll(grid_with_z(z), GridAxis::X, 0, -1).unwrap();
        assert_eq!(
            out.dependent().column(0).to_vec(),
            vec![1.0, 2.0, 3.0, 0.0]
        );
    }

    #[test]
    fn test_cut_x_swaps_slabs() {
        let z = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
        // Remove rows 1..3 and re-append them after the tail.
        let out = cut(grid_with_z(z), GridAxis::X, 1, 2).unwrap();
        assert_eq!(
            out.dependent().column(0).to_vec(),
            vec![0.0, 3.0, 4.0, 1.0, 2.0]
        );
        assert_eq!(out.shape(), (5, 1));
    }

    #[test]
    fn test_cut_width_past_end_clamps() {
        let z = array![[0.0, 1.0, 2.0]];
        let out = cut(grid_with_z(z), GridAxis::Y, 2, 10).unwrap();
        assert_eq!(out.dependent().row(0).to_vec(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_flip_left_right_mirrors_rows() {
        let z = array![[1.0, 2.0], [3.0, 4.0]];
        let out = flip(grid_with_z(z), FlipOrientation::LeftRight).unwrap();
        // Historical naming: "Left Right" flips the row (X) axis.
        assert_eq!(out.dependent(), &array![[3.0, 4.0], [1.0, 2.0]]);
    }

    #[test]
    fn test_flip_up_down_mirrors_columns() {
        let z = array![[1.0, 2.0], [3.0, 4.0]];
        let out = flip(grid_with_z(z), FlipOrientation::UpDown).unwrap();
        assert_eq!(out.dependent(), &array![[2.0, 1.0], [4.0, 3.0]]);
    }

    #[test]
    fn test_flip_twice_restores() {
        let z = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let grid = grid_with_z(z);
        let once = flip(grid.clone(), FlipOrientation::LeftRight).unwrap();
        let twice = flip(once, FlipOrientation::LeftRight).unwrap();
        assert_eq!(twice.dependent(), grid.dependent());
    }

    #[test]
    fn test_swap_xy() {
        let grid = grid_with_z(array![[1.0, 2.0], [3.0, 4.0]]);
        let out = swap_xy(grid.clone()).unwrap();
        assert_eq!(out.x, grid.y);
        assert_eq!(out.y, grid.x);
        assert_eq!(out.z, grid.z);
    }
}
