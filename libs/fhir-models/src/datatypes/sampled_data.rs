//! FHIR SampledData model

use super::extension::Extension;
use super::quantity::Quantity;
use crate::primitives::{Decimal, PositiveInt};
use serde::{Deserialize, Serialize};

/// A series of measurements taken by a device.
///
/// The data is a space-separated list of decimal values, `E` (error), `U`
/// (below detection limit) and `L` (above detection limit), left as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledData {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Zero value and units
    pub origin: Quantity,

    /// Number of milliseconds between samples
    pub period: Decimal,

    /// Multiply data by this before adding to origin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<Decimal>,

    /// Lower limit of detection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<Decimal>,

    /// Upper limit of detection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<Decimal>,

    /// Number of sample points at each time point
    pub dimensions: PositiveInt,

    /// Decimal values with spaces, or "E" | "U" | "L"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl SampledData {
    pub fn new(origin: Quantity, period: Decimal, dimensions: PositiveInt) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            origin,
            period,
            factor: None,
            lower_limit: None,
            upper_limit: None,
            dimensions,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roundtrip() {
        let mut sampled = SampledData::new(
            Quantity::ucum("0".parse().unwrap(), "mV", "mV"),
            "10".parse().unwrap(),
            PositiveInt::new(1),
        );
        sampled.data = Some("2 3 4 5 E".to_string());

        let encoded = serde_json::to_value(&sampled).unwrap();
        let decoded: SampledData = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, sampled);
    }

    #[test]
    fn test_required_fields_enforced_on_decode() {
        let err = serde_json::from_value::<SampledData>(json!({ "period": 10 }));
        assert!(err.is_err());
    }
}
