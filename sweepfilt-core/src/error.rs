//! Error types for the filter pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for filter application and pipeline runs.
#[derive(Error, Debug)]
pub enum Error {
    /// Registry lookup miss; fatal to that one filter, not the whole run.
    #[error("unknown filter: {0:?}")]
    UnknownFilter(String),

    /// A setting string failed to parse as required by the filter.
    #[error("invalid {setting} for {filter}: {value:?}")]
    InvalidParameter {
        /// Filter name the setting belongs to.
        filter: &'static str,
        /// Which setting failed ("method", "setting 1", "setting 2").
        setting: &'static str,
        /// The raw string that failed to parse.
        value: String,
    },

    /// The transform would produce an empty or otherwise invalid result.
    #[error("degenerate result: {0}")]
    DegenerateResult(String),

    /// Axis tuple arrays lost shape consistency; indicates a transform bug.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A filter in a pipeline run failed, with enough context for the
    /// caller to revert just that filter's edit.
    #[error("filter {index} ({name:?}, settings {setting_1:?}/{setting_2:?}): {source}")]
    FilterFailed {
        /// Position of the filter in the run list.
        index: usize,
        /// Filter name.
        name: String,
        /// First raw setting at the time of failure.
        setting_1: String,
        /// Second raw setting at the time of failure.
        setting_2: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Returns true for errors that indicate an internal invariant
    /// violation rather than a bad filter configuration.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::ShapeMismatch(_) => true,
            Error::FilterFailed { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}
