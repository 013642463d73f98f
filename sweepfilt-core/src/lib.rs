//! sweepfilt-core: Core types for the measurement-data filter pipeline.
//!
//! This crate provides the foundational abstractions shared by the filter
//! pipeline: the axis tuple holding 2D/3D measurement data, the filter
//! instance record as persisted by saved sessions, and the error taxonomy.

pub mod error;
pub mod grid;
pub mod instance;

pub use error::{Error, Result};
pub use grid::{DataGrid, GridAxis, Target};
pub use instance::FilterInstance;
