//! FHIR Period model

use super::extension::Extension;
use crate::primitives::DateTime;
use serde::{Deserialize, Serialize};

/// A time period defined by a start and end date/time.
///
/// The end is the expected end, not necessarily in the past; an absent end
/// means the period is ongoing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Starting time with inclusive boundary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime>,

    /// End time with inclusive boundary, if not ongoing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime>,
}

impl Period {
    pub fn new(start: Option<DateTime>, end: Option<DateTime>) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    pub fn starting(start: impl Into<DateTime>) -> Self {
        Self::new(Some(start.into()), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ongoing_period_omits_end() {
        let period = Period::starting("2024-01-01T00:00:00Z");
        assert_eq!(
            serde_json::to_value(&period).unwrap(),
            json!({ "start": "2024-01-01T00:00:00Z" })
        );
    }

    #[test]
    fn test_roundtrip() {
        let period = Period::new(
            Some("2024-01-01T00:00:00Z".into()),
            Some("2024-02-01T00:00:00Z".into()),
        );
        let encoded = serde_json::to_value(&period).unwrap();
        let decoded: Period = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, period);
    }
}
