//! Sequential filter pipeline over an axis tuple.
//!
//! The pipeline owns no data: every run starts from the caller's raw tuple
//! and threads a working copy through the enabled filters in order.

use sweepfilt_core::{DataGrid, Error, FilterInstance, Result};

use crate::transform::Transform;

/// What a run does when one filter fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Abort the run on the first failing filter, with its position and
    /// stored settings attached to the error.
    #[default]
    Strict,
    /// Skip failing filters, keep the data from before each one, and
    /// report them in the outcome. Structural corruption still aborts.
    Lenient,
}

/// One filter a lenient run skipped.
#[derive(Debug)]
pub struct SkippedFilter {
    /// Position in the filter list.
    pub index: usize,
    /// Registry key of the filter.
    pub name: String,
    /// Why it was skipped.
    pub error: Error,
}

/// Result of a pipeline run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The filtered axis tuple.
    pub data: DataGrid,
    /// Filters a lenient run skipped; always empty in strict mode.
    pub skipped: Vec<SkippedFilter>,
}

/// Filter pipeline runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    failure_mode: FailureMode,
}

impl Pipeline {
    /// Creates a strict pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline with the given failure mode.
    pub fn with_failure_mode(failure_mode: FailureMode) -> Self {
        Self { failure_mode }
    }

    /// Applies the enabled filters to a copy of `raw`, in list order.
    ///
    /// The raw tuple is never modified; rerunning after editing the filter
    /// list always reproduces the same result from the same input.
    pub fn run(&self, raw: &DataGrid, filters: &[FilterInstance]) -> Result<RunOutcome> {
        let mut data = raw.clone();
        let mut skipped = Vec::new();

        for (index, instance) in filters.iter().enumerate() {
            if !instance.enabled {
                continue;
            }
            match self.apply_one(&data, instance) {
                Ok(next) => data = next,
                Err(error) if self.failure_mode == FailureMode::Lenient && !error.is_fatal() => {
                    skipped.push(SkippedFilter {
                        index,
                        name: instance.name.clone(),
                        error,
                    });
                }
                Err(error) => {
                    return Err(Error::FilterFailed {
                        index,
                        name: instance.name.clone(),
                        setting_1: instance.setting_1.clone(),
                        setting_2: instance.setting_2.clone(),
                        source: Box::new(error),
                    });
                }
            }
        }
        Ok(RunOutcome { data, skipped })
    }

    /// Applies a single filter instance, ignoring the failure mode.
    ///
    /// Disabled instances pass the data through unchanged.
    pub fn run_single(&self, data: &DataGrid, instance: &FilterInstance) -> Result<DataGrid> {
        if !instance.enabled {
            return Ok(data.clone());
        }
        self.apply_one(data, instance)
    }

    fn apply_one(&self, data: &DataGrid, instance: &FilterInstance) -> Result<DataGrid> {
        let transform = Transform::parse(instance)?;
        let out = transform.apply(data.clone())?;
        out.validate()?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array1;

    fn line() -> DataGrid {
        let x = Array1::linspace(0.0, 4.0, 5);
        let y = x.mapv(|v| v * v);
        DataGrid::from_line(x, y).unwrap()
    }

    fn instance(name: &str, method: &str, s1: &str, s2: &str, enabled: bool) -> FilterInstance {
        FilterInstance::new(name, method, s1, s2, enabled)
    }

    #[test]
    fn test_disabled_filters_are_skipped() {
        let raw = line();
        let filters = [
            instance("Offset", "Y", "100", "", false),
            instance("Multiply", "Y", "2", "", true),
        ];
        let out = Pipeline::new().run(&raw, &filters).unwrap();
        assert_relative_eq!(out.data.dependent()[[2, 0]], 8.0);
    }

    #[test]
    fn test_raw_input_is_untouched() {
        let raw = line();
        let filters = [instance("Offset", "Y", "1", "", true)];
        Pipeline::new().run(&raw, &filters).unwrap();
        assert_relative_eq!(raw.dependent()[[2, 0]], 4.0);
    }

    #[test]
    fn test_strict_failure_carries_position_and_settings() {
        let raw = line();
        let filters = [
            instance("Absolute", "", "", "", true),
            instance("Offset", "Y", "abc", "", true),
        ];
        let err = Pipeline::new().run(&raw, &filters).unwrap_err();
        match err {
            Error::FilterFailed {
                index,
                name,
                setting_1,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(name, "Offset");
                assert_eq!(setting_1, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_skips_and_reports() {
        let raw = line();
        let filters = [
            instance("Offset", "Y", "abc", "", true),
            instance("Multiply", "Y", "3", "", true),
        ];
        let pipeline = Pipeline::with_failure_mode(FailureMode::Lenient);
        let out = pipeline.run(&raw, &filters).unwrap();
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].index, 0);
        assert_eq!(out.skipped[0].name, "Offset");
        assert_relative_eq!(out.data.dependent()[[2, 0]], 12.0);
    }

    #[test]
    fn test_run_single_disabled_is_identity() {
        let raw = line();
        let out = Pipeline::new()
            .run_single(&raw, &instance("Offset", "Y", "5", "", false))
            .unwrap();
        assert_eq!(out.dependent(), raw.dependent());
    }
}
