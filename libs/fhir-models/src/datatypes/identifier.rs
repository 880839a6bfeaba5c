//! FHIR Identifier model

use super::codeable_concept::CodeableConcept;
use super::extension::Extension;
use super::period::Period;
use super::reference::Reference;
use crate::primitives::{Code, Uri};
use serde::{Deserialize, Serialize};

/// An identifier intended for computation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// usual | official | temp | secondary | old
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<Code>,

    /// Description of identifier
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// The namespace for the identifier value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Uri>,

    /// The value that is unique
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Time period when id is/was valid for use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Organization that issued id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigner: Option<Box<Reference>>,
}

impl Identifier {
    pub fn new(system: impl Into<Uri>, value: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_minimal() {
        let identifier = Identifier::new("http://hospital.example.org/mrn", "12345");
        assert_eq!(
            serde_json::to_value(&identifier).unwrap(),
            json!({
                "system": "http://hospital.example.org/mrn",
                "value": "12345"
            })
        );
    }

    #[test]
    fn test_use_and_type_keywords_are_renamed() {
        let json = json!({
            "use": "official",
            "type": { "text": "Medical record number" },
            "value": "12345"
        });
        let identifier: Identifier = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(identifier.use_, Some(Code::new("official")));
        assert_eq!(serde_json::to_value(&identifier).unwrap(), json);
    }
}
