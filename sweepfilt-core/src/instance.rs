//! Filter instance records as persisted by saved sessions.

use serde::{Deserialize, Deserializer, Serialize};

/// One configured step in a filter chain.
///
/// Settings stay string-encoded here so saved sessions round-trip exactly;
/// the pipeline parses them into typed parameters at application time.
/// Disabled instances are skipped by the runner but keep their settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInstance {
    /// Registry key identifying which transform runs.
    #[serde(rename = "Name")]
    pub name: String,
    /// Sub-mode of the filter (empty for filters without methods).
    #[serde(rename = "Method")]
    pub method: String,
    /// First raw parameter.
    #[serde(rename = "Setting 1")]
    pub setting_1: String,
    /// Second raw parameter.
    #[serde(rename = "Setting 2")]
    pub setting_2: String,
    /// Whether the runner applies this instance.
    #[serde(rename = "Checked", deserialize_with = "checked_flag")]
    pub enabled: bool,
}

impl FilterInstance {
    /// Creates an instance from explicit fields.
    pub fn new(
        name: impl Into<String>,
        method: impl Into<String>,
        setting_1: impl Into<String>,
        setting_2: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            name: name.into(),
            method: method.into(),
            setting_1: setting_1.into(),
            setting_2: setting_2.into(),
            enabled,
        }
    }
}

/// Older sessions stored the Qt checkstate (0 or 2) instead of a boolean.
fn checked_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Checked {
        Flag(bool),
        State(i64),
    }
    Ok(match Checked::deserialize(deserializer)? {
        Checked::Flag(flag) => flag,
        Checked::State(state) => state != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_field_names() {
        let inst = FilterInstance::new("Offset", "Z", "0.5", "", true);
        let json = serde_json::to_value(&inst).unwrap();
        assert_eq!(json["Name"], "Offset");
        assert_eq!(json["Method"], "Z");
        assert_eq!(json["Setting 1"], "0.5");
        assert_eq!(json["Setting 2"], "");
        assert_eq!(json["Checked"], true);
    }

    #[test]
    fn test_round_trip() {
        let inst = FilterInstance::new("Crop X", "Absolute", "-1", "1", false);
        let json = serde_json::to_string(&inst).unwrap();
        let back: FilterInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
    }

    #[test]
    fn test_legacy_checkstate() {
        let json = r#"{"Name": "Flip", "Method": "L-R",
                       "Setting 1": "", "Setting 2": "", "Checked": 2}"#;
        let inst: FilterInstance = serde_json::from_str(json).unwrap();
        assert!(inst.enabled);

        let json = r#"{"Name": "Flip", "Method": "L-R",
                       "Setting 1": "", "Setting 2": "", "Checked": 0}"#;
        let inst: FilterInstance = serde_json::from_str(json).unwrap();
        assert!(!inst.enabled);
    }
}
