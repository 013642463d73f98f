//! Static catalog of available filters.

use sweepfilt_core::{Error, FilterInstance, Result};

/// Registry defaults for one filter: the values a freshly added instance
/// starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDefaults {
    /// Default method (empty for filters without methods).
    pub method: &'static str,
    /// Default first setting.
    pub setting_1: &'static str,
    /// Default second setting.
    pub setting_2: &'static str,
    /// Whether a fresh instance starts enabled.
    pub enabled: bool,
}

/// One entry of the filter registry.
///
/// Each variant maps to one transform function; the catalog is closed so
/// lookups, method lists and defaults are plain match tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Finite-difference derivative.
    Derivative,
    /// Gaussian, median or Wiener smoothing.
    Smoothen,
    /// Savitzky-Golay filtering along one axis.
    SavGol,
    /// Crop along the X coordinate.
    CropX,
    /// Crop along the Y coordinate.
    CropY,
    /// Partial circular shift along X.
    RollX,
    /// Partial circular shift along Y.
    RollY,
    /// Slab reordering along X.
    CutX,
    /// Slab reordering along Y.
    CutY,
    /// Exchange the X and Y arrays.
    SwapXy,
    /// Mirror the dependent array.
    Flip,
    /// Divide the dependent array by a reference value.
    Normalize,
    /// Add a constant to a named array.
    Offset,
    /// Elementwise absolute value of the dependent array.
    Absolute,
    /// Multiply a named array by a constant.
    Multiply,
    /// Add a linear plane to the dependent array.
    Slope,
    /// Base-10 logarithm of the dependent array.
    Logarithm,
    /// Curvature (documented no-op; the reference body was never enabled).
    Curvature,
    /// FFT band cut along one axis.
    BandCut,
    /// Resample onto a regular grid.
    Interp,
    /// Subtract a fixed row or column trace.
    Subtract,
    /// Divide a named array by a constant.
    Divide,
    /// Elementwise reciprocal of a named array.
    Invert,
}

impl FilterKind {
    /// All filters in stable UI order.
    pub const ALL: [FilterKind; 23] = [
        FilterKind::Derivative,
        FilterKind::Smoothen,
        FilterKind::SavGol,
        FilterKind::CropX,
        FilterKind::CropY,
        FilterKind::RollX,
        FilterKind::RollY,
        FilterKind::CutX,
        FilterKind::CutY,
        FilterKind::SwapXy,
        FilterKind::Flip,
        FilterKind::Normalize,
        FilterKind::Offset,
        FilterKind::Absolute,
        FilterKind::Multiply,
        FilterKind::Slope,
        FilterKind::Logarithm,
        FilterKind::Curvature,
        FilterKind::BandCut,
        FilterKind::Interp,
        FilterKind::Subtract,
        FilterKind::Divide,
        FilterKind::Invert,
    ];

    /// Registry key of the filter.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Derivative => "Derivative",
            FilterKind::Smoothen => "Smoothen",
            FilterKind::SavGol => "Sav-Gol",
            FilterKind::CropX => "Crop X",
            FilterKind::CropY => "Crop Y",
            FilterKind::RollX => "Roll X",
            FilterKind::RollY => "Roll Y",
            FilterKind::CutX => "Cut X",
            FilterKind::CutY => "Cut Y",
            FilterKind::SwapXy => "Swap XY",
            FilterKind::Flip => "Flip",
            FilterKind::Normalize => "Normalize",
            FilterKind::Offset => "Offset",
            FilterKind::Absolute => "Absolute",
            FilterKind::Multiply => "Multiply",
            FilterKind::Slope => "Slope",
            FilterKind::Logarithm => "Logarithm",
            FilterKind::Curvature => "Curvature",
            FilterKind::BandCut => "Band cut",
            FilterKind::Interp => "Interp",
            FilterKind::Subtract => "Subtract",
            FilterKind::Divide => "Divide",
            FilterKind::Invert => "Invert",
        }
    }

    /// Looks a filter up by its registry key.
    pub fn from_name(name: &str) -> Result<FilterKind> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Error::UnknownFilter(name.to_string()))
    }

    /// Allowed method values in UI order; empty for filters without a
    /// method.
    pub fn methods(self) -> &'static [&'static str] {
        match self {
            FilterKind::Derivative => &["Difference", "Midpoint", "Accuracy 4", "Accuracy 6"],
            FilterKind::Smoothen => &["Gaussian", "Median", "Wiener"],
            FilterKind::SavGol => &[
                "Y deriv 0",
                "Y deriv 1",
                "Y deriv 2",
                "X deriv 0",
                "X deriv 1",
                "X deriv 2",
            ],
            FilterKind::CropX | FilterKind::CropY => &["Absolute", "Relative"],
            FilterKind::RollX | FilterKind::RollY | FilterKind::CutX | FilterKind::CutY => {
                &["Index"]
            }
            FilterKind::SwapXy | FilterKind::Absolute | FilterKind::Slope => &[],
            FilterKind::Flip => &["Left Right", "Up Down"],
            FilterKind::Normalize => &["Maximum", "Minimum", "Point"],
            FilterKind::Offset
            | FilterKind::Multiply
            | FilterKind::Divide
            | FilterKind::Invert => &["X", "Y", "Z"],
            FilterKind::Logarithm => &["Mask", "Shift", "Abs"],
            FilterKind::Curvature => &["X", "Y"],
            FilterKind::BandCut => &["Y", "X"],
            FilterKind::Interp => &["linear", "cubic", "quintic"],
            FilterKind::Subtract => &["Vertical", "Horizontal"],
        }
    }

    /// Defaults a freshly added instance starts with.
    pub fn defaults(self) -> FilterDefaults {
        let (method, setting_1, setting_2, enabled) = match self {
            FilterKind::Derivative => ("Midpoint", "0", "1", true),
            FilterKind::Smoothen => ("Gaussian", "0", "2", true),
            FilterKind::SavGol => ("Y deriv 0", "7", "2", true),
            FilterKind::CropX | FilterKind::CropY => ("Absolute", "-1", "1", false),
            FilterKind::RollX | FilterKind::RollY => ("Index", "0", "0", false),
            FilterKind::CutX | FilterKind::CutY => ("Index", "0", "0", false),
            FilterKind::SwapXy => ("", "", "", true),
            FilterKind::Flip => ("Left Right", "", "", true),
            FilterKind::Normalize => ("Maximum", "", "", false),
            FilterKind::Offset => ("X", "0", "", false),
            FilterKind::Absolute => ("", "", "", true),
            FilterKind::Multiply => ("X", "1", "", true),
            FilterKind::Slope => ("", "0", "-1", false),
            FilterKind::Logarithm => ("Mask", "", "", true),
            FilterKind::Curvature => ("X", "0", "", false),
            FilterKind::BandCut => ("Y", "0", "0", false),
            FilterKind::Interp => ("linear", "800", "600", false),
            FilterKind::Subtract => ("Vertical", "0", "", false),
            FilterKind::Divide => ("X", "1", "", false),
            FilterKind::Invert => ("X", "", "", false),
        };
        FilterDefaults {
            method,
            setting_1,
            setting_2,
            enabled,
        }
    }

    /// Builds a filter instance with registry defaults.
    pub fn default_instance(self) -> FilterInstance {
        let defaults = self.defaults();
        FilterInstance::new(
            self.name(),
            defaults.method,
            defaults.setting_1,
            defaults.setting_2,
            defaults.enabled,
        )
    }

    /// Maps a stored method string onto the canonical set, accepting the
    /// shortened spellings older saved sessions used.
    pub fn canonical_method(self, raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        if let Some(exact) = self.methods().iter().find(|m| **m == raw) {
            return Some(exact);
        }
        let legacy = match (self, raw) {
            (FilterKind::Derivative, "Mid") => "Midpoint",
            (FilterKind::Derivative, "Diff") => "Difference",
            (FilterKind::Smoothen, "Gauss") => "Gaussian",
            (FilterKind::CropX | FilterKind::CropY, "Abs") => "Absolute",
            (FilterKind::CropX | FilterKind::CropY, "Rel") => "Relative",
            (FilterKind::SavGol, "Y") => "Y deriv 0",
            (FilterKind::SavGol, "dY") => "Y deriv 1",
            (FilterKind::SavGol, "ddY") => "Y deriv 2",
            (FilterKind::SavGol, "X") => "X deriv 0",
            (FilterKind::SavGol, "dX") => "X deriv 1",
            (FilterKind::SavGol, "ddX") => "X deriv 2",
            (FilterKind::Flip, "L-R") => "Left Right",
            (FilterKind::Flip, "U-D") => "Up Down",
            (FilterKind::Normalize, "Max") => "Maximum",
            (FilterKind::Normalize, "Min") => "Minimum",
            (FilterKind::Subtract, "Ver") => "Vertical",
            (FilterKind::Subtract, "Hor") => "Horizontal",
            // The oldest snapshots' "log10" applied abs() before the log.
            (FilterKind::Logarithm, "log10") => "Abs",
            _ => return None,
        };
        Some(legacy)
    }
}

/// Registry keys in stable UI order.
pub fn list_filter_names() -> Vec<&'static str> {
    FilterKind::ALL.iter().map(|kind| kind.name()).collect()
}
