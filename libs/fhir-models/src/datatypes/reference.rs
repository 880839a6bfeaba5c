//! FHIR Reference model

use super::extension::Extension;
use super::identifier::Identifier;
use crate::error::{Error, Result};
use crate::primitives::Uri;
use serde::{Deserialize, Serialize};

const REF_REQUIRED: &str = "extension required if no reference, identifier and display";

/// A reference from one resource to another.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Literal reference, relative, internal or absolute URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Type the reference refers to (e.g. "Patient")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<Uri>,

    /// Logical reference, when literal reference is not known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Box<Identifier>>,

    /// Text alternative for the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// Create a reference; at least one of the three ways of pointing at a
    /// target must be given, unless an extension compensates (use
    /// [`Reference::from_extensions`] for that form).
    pub fn new(
        reference: Option<String>,
        identifier: Option<Identifier>,
        display: Option<String>,
    ) -> Result<Self> {
        if reference.is_none() && identifier.is_none() && display.is_none() {
            return Err(Error::Invariant(REF_REQUIRED));
        }
        Ok(Self {
            reference,
            identifier: identifier.map(Box::new),
            display,
            ..Self::default()
        })
    }

    /// Create a literal reference such as `"Patient/123"`.
    pub fn literal(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }

    /// Create a reference carried entirely by extensions.
    pub fn from_extensions(extension: Vec<Extension>) -> Result<Self> {
        if extension.is_empty() {
            return Err(Error::Invariant(REF_REQUIRED));
        }
        Ok(Self {
            extension,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::DynamicValue;
    use serde_json::json;

    #[test]
    fn test_empty_reference_is_rejected() {
        let err = Reference::new(None, None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "extension required if no reference, identifier and display"
        );
    }

    #[test]
    fn test_display_alone_is_enough() {
        let reference = Reference::new(None, None, Some("Dr. Adam Careful".to_string())).unwrap();
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!({ "display": "Dr. Adam Careful" })
        );
    }

    #[test]
    fn test_extension_only_reference() {
        let ext = Extension::new("http://hl7.org/fhir/StructureDefinition/data-absent-reason")
            .with_value(DynamicValue::Code("unknown".into()))
            .unwrap();
        let reference = Reference::from_extensions(vec![ext]).unwrap();
        assert!(reference.reference.is_none());

        assert!(Reference::from_extensions(vec![]).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let reference = Reference::literal("Patient/example");
        let encoded = serde_json::to_value(&reference).unwrap();
        assert_eq!(encoded, json!({ "reference": "Patient/example" }));
        let decoded: Reference = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, reference);
    }
}
