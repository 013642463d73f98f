//! End-to-end correctness checks for the filter pipeline.

use approx::assert_relative_eq;
use ndarray::{Array1, Array2};
use sweepfilt_pipeline::{DataGrid, FilterInstance, Pipeline, E2_OVER_H};

fn enabled(name: &str, method: &str, s1: &str, s2: &str) -> FilterInstance {
    FilterInstance::new(name, method, s1, s2, true)
}

fn plane_grid(nx: usize, ny: usize) -> DataGrid {
    let x = Array2::from_shape_fn((nx, ny), |(i, _)| i as f64 * 0.5);
    let y = Array2::from_shape_fn((nx, ny), |(_, j)| j as f64 * 2.0);
    let z = Array2::from_shape_fn((nx, ny), |(i, j)| {
        3.0 * (i as f64 * 0.5) - (j as f64 * 2.0) + 1.0
    });
    DataGrid::from_grid(x, y, z).unwrap()
}

fn assert_same_dependent(a: &DataGrid, b: &DataGrid) {
    assert_eq!(a.shape(), b.shape());
    for (u, v) in a.dependent().iter().zip(b.dependent()) {
        assert_relative_eq!(*u, *v, epsilon = 1e-9);
    }
}

#[test]
fn test_all_filters_disabled_is_identity() {
    let raw = plane_grid(6, 5);
    let filters = [
        FilterInstance::new("Derivative", "Midpoint", "0", "1", false),
        FilterInstance::new("Crop X", "Absolute", "0", "2", false),
        FilterInstance::new("Logarithm", "Mask", "", "", false),
    ];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_same_dependent(&out.data, &raw);
    assert_eq!(out.data.x, raw.x);
    assert_eq!(out.data.y, raw.y);
}

#[test]
fn test_filter_order_matters() {
    let raw = plane_grid(4, 4);
    let offset_then_scale = [
        enabled("Offset", "Z", "1", ""),
        enabled("Multiply", "Z", "2", ""),
    ];
    let scale_then_offset = [
        enabled("Multiply", "Z", "2", ""),
        enabled("Offset", "Z", "1", ""),
    ];
    let a = Pipeline::new().run(&raw, &offset_then_scale).unwrap();
    let b = Pipeline::new().run(&raw, &scale_then_offset).unwrap();
    // (z + 1) * 2 differs from z * 2 + 1 by 1 everywhere.
    for (u, v) in a.data.dependent().iter().zip(b.data.dependent()) {
        assert_relative_eq!(u - v, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_derivative_zero_times_is_identity() {
    let raw = plane_grid(6, 6);
    let filters = [enabled("Derivative", "Midpoint", "0", "0")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_same_dependent(&out.data, &raw);
}

#[test]
fn test_multiply_then_divide_round_trip() {
    let raw = plane_grid(5, 5);
    let filters = [
        enabled("Multiply", "Z", "7", ""),
        enabled("Divide", "Z", "7", ""),
    ];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_same_dependent(&out.data, &raw);
}

#[test]
fn test_double_flip_round_trip() {
    let raw = plane_grid(5, 4);
    let filters = [
        enabled("Flip", "Left Right", "", ""),
        enabled("Flip", "Left Right", "", ""),
    ];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_same_dependent(&out.data, &raw);
}

#[test]
fn test_flip_left_right_mirrors_rows() {
    let raw = plane_grid(4, 3);
    let filters = [enabled("Flip", "Left Right", "", "")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    // Dependent rows reversed, coordinates untouched.
    assert_relative_eq!(out.data.dependent()[[0, 0]], raw.dependent()[[3, 0]]);
    assert_eq!(out.data.x, raw.x);
}

#[test]
fn test_crop_absolute_keeps_interior() {
    // Coordinates 0..=5 with step 0.5 along X; [1, 3] is inclusive, so the
    // samples at 1.0 through 3.0 survive.
    let raw = plane_grid(11, 3);
    let filters = [enabled("Crop X", "Absolute", "1", "3")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_eq!(out.data.shape(), (5, 3));
    assert_relative_eq!(out.data.x[[0, 0]], 1.0);
    assert_relative_eq!(out.data.x[[4, 0]], 3.0);
}

#[test]
fn test_crop_inverted_bounds_is_identity() {
    let raw = plane_grid(6, 3);
    let filters = [enabled("Crop X", "Absolute", "3", "1")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_eq!(out.data.shape(), raw.shape());
}

#[test]
fn test_cut_preserves_shape() {
    let raw = plane_grid(8, 5);
    let filters = [enabled("Cut X", "Index", "2", "3")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_eq!(out.data.shape(), raw.shape());
}

#[test]
fn test_interp_sets_target_shape() {
    let raw = plane_grid(6, 5);
    let filters = [enabled("Interp", "linear", "13", "9")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_eq!(out.data.shape(), (13, 9));
    out.data.validate().unwrap();
}

#[test]
fn test_conductance_scale_alias() {
    let raw = plane_grid(3, 3);
    let filters = [enabled("Divide", "Z", "e^2/h", "")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_relative_eq!(
        out.data.dependent()[[0, 0]],
        raw.dependent()[[0, 0]] / E2_OVER_H,
        epsilon = 1e-12
    );
}

#[test]
fn test_savgol_derivative_on_line_respects_spacing() {
    // y = 3x sampled with spacing 0.25; the first derivative must come out
    // as 3, not as the per-sample difference 0.75.
    let x = Array1::from_iter((0..25).map(|i| i as f64 * 0.25));
    let y = x.mapv(|v| 3.0 * v);
    let raw = DataGrid::from_line(x, y).unwrap();
    let filters = [enabled("Sav-Gol", "X deriv 1", "7", "2")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    for v in out.data.dependent() {
        assert_relative_eq!(*v, 3.0, epsilon = 1e-9);
    }
}

#[test]
fn test_derivative_recovers_plane_slope() {
    let raw = plane_grid(9, 9);
    let filters = [enabled("Derivative", "Midpoint", "1", "0")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    // d/dx of 3x - y + 1 is 3; one midpoint application trims one sample
    // from each X edge.
    assert_eq!(out.data.shape(), (7, 9));
    for v in out.data.dependent() {
        assert_relative_eq!(*v, 3.0, epsilon = 1e-9);
    }
}

#[test]
fn test_swap_then_swap_round_trip() {
    let raw = plane_grid(4, 6);
    let filters = [enabled("Swap XY", "", "", ""), enabled("Swap XY", "", "", "")];
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    assert_eq!(out.data.x, raw.x);
    assert_eq!(out.data.y, raw.y);
}

#[test]
fn test_legacy_session_settings_still_run() {
    // Stored sessions from old versions carry shortened method names and
    // integer checkbox states.
    let json = r#"[
        {"Name": "Smoothen", "Method": "Gauss", "Setting 1": "0", "Setting 2": "1", "Checked": 2},
        {"Name": "Normalize", "Method": "Max", "Setting 1": "", "Setting 2": "", "Checked": 2},
        {"Name": "Crop X", "Method": "Abs", "Setting 1": "0", "Setting 2": "2", "Checked": 0}
    ]"#;
    let filters: Vec<FilterInstance> = serde_json::from_str(json).unwrap();
    assert!(!filters[2].enabled);
    let raw = plane_grid(6, 6);
    let out = Pipeline::new().run(&raw, &filters).unwrap();
    let max = out
        .data
        .dependent()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(max, 1.0, epsilon = 1e-9);
}
