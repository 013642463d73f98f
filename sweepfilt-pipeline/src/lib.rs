//! Filter pipeline for 2D and 3D sweep measurement data.
//!
//! An axis tuple ([`DataGrid`]) flows through an ordered list of filter
//! instances; each enabled filter is parsed into a typed [`Transform`] and
//! applied to a copy of the data. The raw tuple is never modified, so
//! editing the list and rerunning is always reproducible.
//!
//! The available filters live in a static registry ([`FilterKind`]) that
//! maps names to transform functions, allowed methods and default settings.

#![warn(missing_docs)]

mod bandcut;
mod crop;
mod derivative;
mod interp;
mod numeric;
mod pipeline;
mod pointwise;
mod registry;
mod reorder;
mod savgol;
mod smooth;
mod transform;

pub use crop::CropMode;
pub use derivative::DiffKernel;
pub use interp::InterpKind;
pub use pipeline::{FailureMode, Pipeline, RunOutcome, SkippedFilter};
pub use pointwise::{LogMode, NormalizeMode, TraceOrientation};
pub use registry::{list_filter_names, FilterDefaults, FilterKind};
pub use reorder::FlipOrientation;
pub use savgol::SavGolParams;
pub use smooth::SmoothKind;
pub use transform::{Transform, E2_OVER_H};

pub use sweepfilt_core::{DataGrid, Error, FilterInstance, GridAxis, Result, Target};
