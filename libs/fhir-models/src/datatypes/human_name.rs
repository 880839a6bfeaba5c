//! FHIR HumanName model

use super::extension::Extension;
use super::period::Period;
use crate::primitives::Code;
use serde::{Deserialize, Serialize};

/// A name of a human, with text, parts and usage information.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanName {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// usual | official | temp | nickname | anonymous | old | maiden
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<Code>,

    /// Text representation of the full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Family name (often called 'Surname')
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Given names, in order: first, middle, …
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    /// Parts that come before the name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefix: Vec<String>,

    /// Parts that come after the name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suffix: Vec<String>,

    /// Time period when name was/is in use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl HumanName {
    pub fn new(family: impl Into<String>, given: Vec<String>) -> Self {
        Self {
            family: Some(family.into()),
            given,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roundtrip() {
        let name = HumanName::new("Chalmers", vec!["Peter".to_string(), "James".to_string()]);
        let encoded = serde_json::to_value(&name).unwrap();
        assert_eq!(
            encoded,
            json!({ "family": "Chalmers", "given": ["Peter", "James"] })
        );
        let decoded: HumanName = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, name);
    }

    #[test]
    fn test_empty_given_is_omitted() {
        let name = HumanName {
            text: Some("Anonymous".to_string()),
            ..HumanName::default()
        };
        assert_eq!(
            serde_json::to_value(&name).unwrap(),
            json!({ "text": "Anonymous" })
        );
    }
}
