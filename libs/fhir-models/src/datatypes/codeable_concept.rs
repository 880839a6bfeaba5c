//! FHIR Coding and CodeableConcept models

use super::extension::Extension;
use crate::primitives::{Code, Uri};
use serde::{Deserialize, Serialize};

/// A reference to a code defined by a terminology system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Identity of the terminology system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Uri>,

    /// Version of the system - if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Symbol in syntax defined by the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,

    /// Representation defined by the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// If this coding was chosen directly by the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_selected: Option<bool>,
}

impl Coding {
    /// Create a coding with a system and code, the minimal useful form.
    pub fn new(system: impl Into<Uri>, code: impl Into<Code>) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// A concept that may be defined by one or more codings and/or plain text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Code defined by a terminology system
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    /// Plain text representation of the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Create a concept from a single coding.
    pub fn new(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            ..Self::default()
        }
    }

    /// Create a text-only concept.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_omits_absent_fields() {
        let concept = CodeableConcept::new(
            Coding::new("http://loinc.org", "8480-6").with_display("Systolic blood pressure"),
        );
        let encoded = serde_json::to_value(&concept).unwrap();
        assert_eq!(
            encoded,
            json!({
                "coding": [{
                    "system": "http://loinc.org",
                    "code": "8480-6",
                    "display": "Systolic blood pressure"
                }]
            })
        );
    }

    #[test]
    fn test_roundtrip() {
        let concept = CodeableConcept {
            coding: vec![Coding::new("http://loinc.org", "85354-9")],
            text: Some("Blood pressure panel".to_string()),
            ..CodeableConcept::default()
        };
        let encoded = serde_json::to_value(&concept).unwrap();
        let decoded: CodeableConcept = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, concept);
    }

    #[test]
    fn test_text_only_concept() {
        let concept = CodeableConcept::text("stable");
        assert_eq!(
            serde_json::to_value(&concept).unwrap(),
            json!({ "text": "stable" })
        );
    }
}
