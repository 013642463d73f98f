//! Typed transform representation.
//!
//! Filter instances carry string-encoded settings for persistence; this
//! module parses them once, at the edge of the pipeline, into fully typed
//! parameters. Raw strings never reach the transform internals.

use sweepfilt_core::{DataGrid, Error, FilterInstance, GridAxis, Result, Target};

use crate::bandcut::band_cut;
use crate::crop::{crop, CropMode};
use crate::derivative::{derivative, DiffKernel};
use crate::interp::{interpolate, InterpKind};
use crate::pointwise::{
    absolute, invert, logarithm, normalize, offset, scale, slope, subtract_trace, LogMode,
    NormalizeMode, TraceOrientation,
};
use crate::registry::FilterKind;
use crate::reorder::{cut, flip, roll, swap_xy, FlipOrientation};
use crate::savgol::{sav_gol, SavGolParams};
use crate::smooth::{smooth, SmoothKind};

/// Conductance quantum e²/h expressed in the measurement unit the loaders
/// produce (microsiemens), accepted as a scale alias by Multiply/Divide.
pub const E2_OVER_H: f64 = 0.025_812_8;

/// A filter instance parsed into typed parameters, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Finite-difference derivative.
    Derivative {
        /// Difference kernel.
        kernel: DiffKernel,
        /// Applications along X.
        times_x: usize,
        /// Applications along Y.
        times_y: usize,
    },
    /// Kernel smoothing of the dependent array.
    Smoothen {
        /// Smoothing variant.
        kind: SmoothKind,
        /// Width along X.
        width_x: f64,
        /// Width along Y.
        width_y: f64,
    },
    /// Savitzky-Golay filter.
    SavGol(SavGolParams),
    /// Crop along a coordinate axis.
    Crop {
        /// Axis to crop.
        axis: GridAxis,
        /// Bound interpretation.
        mode: CropMode,
        /// Lower bound setting.
        left: f64,
        /// Upper bound setting.
        right: f64,
    },
    /// Partial circular shift of the dependent array.
    Roll {
        /// Axis the values shift along.
        axis: GridAxis,
        /// First affected lane on the perpendicular axis.
        position: usize,
        /// Signed shift amount.
        amount: i64,
    },
    /// Slab reordering of the dependent array.
    Cut {
        /// Axis the slab is taken from.
        axis: GridAxis,
        /// First index of the slab.
        start: usize,
        /// Slab width.
        width: usize,
    },
    /// Exchange X and Y arrays.
    SwapXy,
    /// Mirror the dependent array.
    Flip(FlipOrientation),
    /// Divide the dependent array by a reference value.
    Normalize(NormalizeMode),
    /// Add a constant to a named array.
    Offset {
        /// Array to offset.
        target: Target,
        /// Offset value.
        value: f64,
    },
    /// Elementwise absolute value.
    Absolute,
    /// Multiply or divide a named array by a constant.
    Scale {
        /// Array to scale.
        target: Target,
        /// Scale factor.
        factor: f64,
        /// True for Divide.
        divide: bool,
    },
    /// Add a linear plane to the dependent array.
    Slope {
        /// Coefficient on X.
        a_x: f64,
        /// Coefficient on Y (on X for 2-column data).
        a_y: f64,
    },
    /// Base-10 logarithm of the dependent array.
    Logarithm(LogMode),
    /// Documented no-op; the reference implementation never enabled a body.
    Curvature,
    /// FFT band cut.
    BandCut {
        /// Axis to transform along.
        axis: GridAxis,
        /// First frequency bin to zero.
        low: usize,
        /// One past the last frequency bin to zero.
        high: usize,
    },
    /// Resample onto a regular grid.
    Interp {
        /// Interpolation order.
        kind: InterpKind,
        /// Target resolution along X.
        n_x: usize,
        /// Target resolution along Y.
        n_y: usize,
    },
    /// Subtract a fixed reference trace.
    Subtract {
        /// Row or column.
        orientation: TraceOrientation,
        /// Trace index.
        index: usize,
    },
    /// Elementwise reciprocal of a named array.
    Invert(Target),
}

impl Transform {
    /// Parses a filter instance into typed parameters.
    ///
    /// Fails with [`Error::UnknownFilter`] for names missing from the
    /// registry and [`Error::InvalidParameter`] for methods or settings
    /// that do not parse; the caller keeps the previous valid settings in
    /// that case.
    pub fn parse(instance: &FilterInstance) -> Result<Transform> {
        let kind = FilterKind::from_name(&instance.name)?;
        let parser = Parser { kind, instance };
        let transform = match kind {
            FilterKind::Derivative => Transform::Derivative {
                kernel: match parser.method()? {
                    "Difference" => DiffKernel::Difference,
                    "Midpoint" => DiffKernel::Midpoint,
                    "Accuracy 4" => DiffKernel::Accuracy4,
                    _ => DiffKernel::Accuracy6,
                },
                times_x: parser.count_1()?,
                times_y: parser.count_2()?,
            },
            FilterKind::Smoothen => Transform::Smoothen {
                kind: match parser.method()? {
                    "Gaussian" => SmoothKind::Gaussian,
                    "Median" => SmoothKind::Median,
                    _ => SmoothKind::Wiener,
                },
                width_x: parser.float_1()?,
                width_y: parser.float_2()?,
            },
            FilterKind::SavGol => {
                let method = parser.method()?;
                let axis = if method.starts_with('Y') {
                    GridAxis::Y
                } else {
                    GridAxis::X
                };
                let deriv = match method.chars().last() {
                    Some('1') => 1,
                    Some('2') => 2,
                    _ => 0,
                };
                Transform::SavGol(SavGolParams::new(
                    axis,
                    deriv,
                    parser.count_1()?,
                    parser.count_2()?,
                ))
            }
            FilterKind::CropX | FilterKind::CropY => Transform::Crop {
                axis: if kind == FilterKind::CropX {
                    GridAxis::X
                } else {
                    GridAxis::Y
                },
                mode: if parser.method()? == "Absolute" {
                    CropMode::Absolute
                } else {
                    CropMode::Relative
                },
                left: parser.float_1()?,
                right: parser.float_2()?,
            },
            FilterKind::RollX | FilterKind::RollY => Transform::Roll {
                axis: if kind == FilterKind::RollX {
                    GridAxis::X
                } else {
                    GridAxis::Y
                },
                position: parser.index_1()?,
                amount: parser.integer_2()?,
            },
            FilterKind::CutX | FilterKind::CutY => Transform::Cut {
                axis: if kind == FilterKind::CutX {
                    GridAxis::X
                } else {
                    GridAxis::Y
                },
                start: parser.index_1()?,
                width: parser.index_2()?,
            },
            FilterKind::SwapXy => Transform::SwapXy,
            FilterKind::Flip => Transform::Flip(if parser.method()? == "Left Right" {
                FlipOrientation::LeftRight
            } else {
                FlipOrientation::UpDown
            }),
            FilterKind::Normalize => Transform::Normalize(match parser.method()? {
                "Maximum" => NormalizeMode::Maximum,
                "Minimum" => NormalizeMode::Minimum,
                _ => NormalizeMode::Point {
                    x: parser.float_1()?,
                    y: parser.float_2()?,
                },
            }),
            FilterKind::Offset => Transform::Offset {
                target: parser.target()?,
                value: parser.float_1()?,
            },
            FilterKind::Absolute => Transform::Absolute,
            FilterKind::Multiply | FilterKind::Divide => Transform::Scale {
                target: parser.target()?,
                factor: parser.scale_1()?,
                divide: kind == FilterKind::Divide,
            },
            FilterKind::Slope => Transform::Slope {
                a_x: parser.float_1()?,
                a_y: parser.float_2()?,
            },
            FilterKind::Logarithm => Transform::Logarithm(match parser.method()? {
                "Mask" => LogMode::Mask,
                "Shift" => LogMode::Shift,
                _ => LogMode::Abs,
            }),
            FilterKind::Curvature => {
                parser.method()?;
                Transform::Curvature
            }
            FilterKind::BandCut => Transform::BandCut {
                axis: if parser.method()? == "X" {
                    GridAxis::X
                } else {
                    GridAxis::Y
                },
                low: parser.index_1()?,
                high: parser.index_2()?,
            },
            FilterKind::Interp => Transform::Interp {
                kind: match parser.method()? {
                    "linear" => InterpKind::Linear,
                    "cubic" => InterpKind::Cubic,
                    _ => InterpKind::Quintic,
                },
                n_x: parser.index_1()?,
                n_y: parser.index_2()?,
            },
            FilterKind::Subtract => Transform::Subtract {
                orientation: if parser.method()? == "Vertical" {
                    TraceOrientation::Vertical
                } else {
                    TraceOrientation::Horizontal
                },
                index: parser.trace_index_1()?,
            },
            FilterKind::Invert => Transform::Invert(parser.target()?),
        };
        Ok(transform)
    }

    /// Applies the transform, returning a new axis tuple.
    pub fn apply(&self, grid: DataGrid) -> Result<DataGrid> {
        match *self {
            Transform::Derivative {
                kernel,
                times_x,
                times_y,
            } => derivative(grid, kernel, times_x, times_y),
            Transform::Smoothen {
                kind,
                width_x,
                width_y,
            } => smooth(grid, kind, width_x, width_y),
            Transform::SavGol(params) => sav_gol(grid, params),
            Transform::Crop {
                axis,
                mode,
                left,
                right,
            } => crop(grid, axis, mode, left, right),
            Transform::Roll {
                axis,
                position,
                amount,
            } => roll(grid, axis, position, amount),
            Transform::Cut { axis, start, width } => cut(grid, axis, start, width),
            Transform::SwapXy => swap_xy(grid),
            Transform::Flip(orientation) => flip(grid, orientation),
            Transform::Normalize(mode) => normalize(grid, mode),
            Transform::Offset { target, value } => offset(grid, target, value),
            Transform::Absolute => absolute(grid),
            Transform::Scale {
                target,
                factor,
                divide,
            } => scale(grid, target, factor, divide),
            Transform::Slope { a_x, a_y } => slope(grid, a_x, a_y),
            Transform::Logarithm(mode) => logarithm(grid, mode),
            Transform::Curvature => Ok(grid),
            Transform::BandCut { axis, low, high } => band_cut(grid, axis, low, high),
            Transform::Interp { kind, n_x, n_y } => interpolate(grid, kind, n_x, n_y),
            Transform::Subtract { orientation, index } => {
                subtract_trace(grid, orientation, index)
            }
            Transform::Invert(target) => invert(grid, target),
        }
    }
}

/// Setting parser bound to one instance, for uniform error context.
struct Parser<'a> {
    kind: FilterKind,
    instance: &'a FilterInstance,
}

impl Parser<'_> {
    fn method(&self) -> Result<&'static str> {
        self.kind
            .canonical_method(&self.instance.method)
            .ok_or_else(|| Error::InvalidParameter {
                filter: self.kind.name(),
                setting: "method",
                value: self.instance.method.clone(),
            })
    }

    fn target(&self) -> Result<Target> {
        Ok(match self.method()? {
            "X" => Target::X,
            "Y" => Target::Y,
            _ => Target::Z,
        })
    }

    fn invalid(&self, setting: &'static str, raw: &str) -> Error {
        Error::InvalidParameter {
            filter: self.kind.name(),
            setting,
            value: raw.to_string(),
        }
    }

    fn float(&self, setting: &'static str, raw: &str) -> Result<f64> {
        raw.trim()
            .parse()
            .map_err(|_| self.invalid(setting, raw))
    }

    fn float_1(&self) -> Result<f64> {
        self.float("setting 1", &self.instance.setting_1)
    }

    fn float_2(&self) -> Result<f64> {
        self.float("setting 2", &self.instance.setting_2)
    }

    /// Signed integer setting.
    fn integer(&self, setting: &'static str, raw: &str) -> Result<i64> {
        raw.trim()
            .parse()
            .map_err(|_| self.invalid(setting, raw))
    }

    fn integer_2(&self) -> Result<i64> {
        self.integer("setting 2", &self.instance.setting_2)
    }

    /// Integer setting where negative values mean "none" (repetition
    /// counts).
    fn count(&self, setting: &'static str, raw: &str) -> Result<usize> {
        let value = self.integer(setting, raw)?;
        Ok(usize::try_from(value.max(0)).unwrap_or(0))
    }

    fn count_1(&self) -> Result<usize> {
        self.count("setting 1", &self.instance.setting_1)
    }

    fn count_2(&self) -> Result<usize> {
        self.count("setting 2", &self.instance.setting_2)
    }

    /// Non-negative index setting.
    fn index(&self, setting: &'static str, raw: &str) -> Result<usize> {
        let value = self.integer(setting, raw)?;
        usize::try_from(value).map_err(|_| self.invalid(setting, raw))
    }

    fn index_1(&self) -> Result<usize> {
        self.index("setting 1", &self.instance.setting_1)
    }

    fn index_2(&self) -> Result<usize> {
        self.index("setting 2", &self.instance.setting_2)
    }

    /// Trace index: historically parsed through float, so "3.0" is valid.
    fn trace_index_1(&self) -> Result<usize> {
        let raw = &self.instance.setting_1;
        let value = self.float("setting 1", raw)?;
        if value < 0.0 || !value.is_finite() {
            return Err(self.invalid("setting 1", raw));
        }
        Ok(value as usize)
    }

    /// Scale factor: a float, or a named physical constant.
    fn scale_1(&self) -> Result<f64> {
        let raw = self.instance.setting_1.trim();
        if raw == "e^2/h" {
            return Ok(E2_OVER_H);
        }
        self.float_1()
    }
}
