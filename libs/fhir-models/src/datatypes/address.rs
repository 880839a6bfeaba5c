//! FHIR Address model

use super::extension::Extension;
use super::period::Period;
use crate::primitives::Code;
use serde::{Deserialize, Serialize};

/// A postal address expressed using postal conventions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// home | work | temp | old | billing
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<Code>,

    /// postal | physical | both
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Code>,

    /// Text representation of the address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Street name, number, direction & P.O. Box etc.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,

    /// Name of city, town etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// District name (aka county)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    /// Sub-unit of country (abbreviations ok)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Postal code for area
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// Country (e.g. ISO 3166 2 or 3 letter code)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Time period when address was/is in use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roundtrip() {
        let address = Address {
            use_: Some(Code::new("home")),
            line: vec!["534 Erewhon St".to_string()],
            city: Some("PleasantVille".to_string()),
            state: Some("Vic".to_string()),
            postal_code: Some("3999".to_string()),
            ..Address::default()
        };
        let encoded = serde_json::to_value(&address).unwrap();
        assert_eq!(
            encoded,
            json!({
                "use": "home",
                "line": ["534 Erewhon St"],
                "city": "PleasantVille",
                "state": "Vic",
                "postalCode": "3999"
            })
        );
        let decoded: Address = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, address);
    }
}
