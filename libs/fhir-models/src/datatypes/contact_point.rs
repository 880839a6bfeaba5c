//! FHIR ContactPoint and ContactDetail models

use super::extension::Extension;
use super::period::Period;
use crate::error::{Error, Result};
use crate::primitives::{Code, PositiveInt};
use serde::{Deserialize, Serialize};

const CPT_2: &str = "A system is required if a value is provided";

/// Details of a technology-mediated contact point (phone, fax, email, …).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// phone | fax | email | pager | url | sms | other
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Code>,

    /// The actual contact point details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// home | work | temp | old | mobile
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<Code>,

    /// Preference order of use (1 = highest)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<PositiveInt>,

    /// Time period when the contact point was/is in use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl ContactPoint {
    /// Create a contact point, enforcing that a value carries a system
    /// (cpt-2).
    pub fn new(system: Option<Code>, value: Option<String>) -> Result<Self> {
        if value.is_some() && system.is_none() {
            return Err(Error::Invariant(CPT_2));
        }
        Ok(Self {
            system,
            value,
            ..Self::default()
        })
    }

    pub fn phone(value: impl Into<String>) -> Self {
        Self {
            system: Some(Code::new("phone")),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self {
            system: Some(Code::new("email")),
            value: Some(value.into()),
            ..Self::default()
        }
    }
}

/// Contact information for a person or organization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Name of an individual to contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Contact details for the individual
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_without_system_is_rejected() {
        let err = ContactPoint::new(None, Some("555-0123".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "A system is required if a value is provided");
    }

    #[test]
    fn test_system_without_value_is_fine() {
        let point = ContactPoint::new(Some(Code::new("phone")), None).unwrap();
        assert_eq!(
            serde_json::to_value(&point).unwrap(),
            json!({ "system": "phone" })
        );
    }

    #[test]
    fn test_roundtrip() {
        let point = ContactPoint::phone("555-0123");
        let encoded = serde_json::to_value(&point).unwrap();
        assert_eq!(
            encoded,
            json!({ "system": "phone", "value": "555-0123" })
        );
        let decoded: ContactPoint = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, point);
    }
}
