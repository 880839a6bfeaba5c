//! FHIR R4 resources
//!
//! The typed resource set plus [`RawResource`], the lossless fallback for
//! everything else. [`Resource`] dispatches between the two on the
//! `resourceType` discriminator at decode time.

pub mod bundle;
pub mod care_plan;
pub mod encounter;
pub mod observation;
pub mod patient;
pub mod raw;

pub use bundle::{
    Bundle, BundleEntry, BundleEntryRequest, BundleEntryResponse, BundleEntrySearch, BundleLink,
    BundleType,
};
pub use care_plan::{CarePlan, CarePlanActivity, CarePlanActivityDetail};
pub use encounter::{
    Encounter, EncounterHospitalization, EncounterLocation, EncounterParticipant,
    EncounterStatusHistory,
};
pub use observation::{Observation, ObservationComponent, ObservationReferenceRange};
pub use patient::{Patient, PatientCommunication, PatientContact, PatientLink};
pub use raw::RawResource;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Any FHIR resource: a member of the typed set, or an unrecognized
/// resource preserved verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Bundle(Bundle),
    CarePlan(CarePlan),
    Encounter(Encounter),
    Observation(Observation),
    Patient(Patient),
    /// Any resource outside the typed set.
    Other(RawResource),
}

impl Resource {
    /// The `resourceType` discriminator value.
    pub fn resource_type(&self) -> &str {
        match self {
            Resource::Bundle(_) => "Bundle",
            Resource::CarePlan(_) => "CarePlan",
            Resource::Encounter(_) => "Encounter",
            Resource::Observation(_) => "Observation",
            Resource::Patient(_) => "Patient",
            Resource::Other(raw) => raw.resource_type().unwrap_or(""),
        }
    }

    /// Logical id of the resource.
    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::Bundle(r) => r.id.as_ref().map(|id| id.as_str()),
            Resource::CarePlan(r) => r.id.as_ref().map(|id| id.as_str()),
            Resource::Encounter(r) => r.id.as_ref().map(|id| id.as_str()),
            Resource::Observation(r) => r.id.as_ref().map(|id| id.as_str()),
            Resource::Patient(r) => r.id.as_ref().map(|id| id.as_str()),
            Resource::Other(r) => r.id(),
        }
    }
}

impl Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Resource::Bundle(r) => r.serialize(serializer),
            Resource::CarePlan(r) => r.serialize(serializer),
            Resource::Encounter(r) => r.serialize(serializer),
            Resource::Observation(r) => r.serialize(serializer),
            Resource::Patient(r) => r.serialize(serializer),
            Resource::Other(r) => r.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let resource_type = value
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or_else(|| de::Error::custom("missing resourceType property"))?;

        let decoded = match resource_type {
            "Bundle" => serde_json::from_value(value).map(Resource::Bundle),
            "CarePlan" => serde_json::from_value(value).map(Resource::CarePlan),
            "Encounter" => serde_json::from_value(value).map(Resource::Encounter),
            "Observation" => serde_json::from_value(value).map(Resource::Observation),
            "Patient" => serde_json::from_value(value).map(Resource::Patient),
            _ => serde_json::from_value(value).map(Resource::Other),
        };
        decoded.map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_on_resource_type() {
        let patient: Resource =
            serde_json::from_value(json!({ "resourceType": "Patient", "id": "p1" })).unwrap();
        assert!(matches!(patient, Resource::Patient(_)));
        assert_eq!(patient.resource_type(), "Patient");
        assert_eq!(patient.id(), Some("p1"));
    }

    #[test]
    fn test_unknown_type_falls_back_to_raw() {
        let other: Resource = serde_json::from_value(json!({
            "resourceType": "DiagnosticReport",
            "id": "d1",
            "conclusion": "unremarkable"
        }))
        .unwrap();
        let Resource::Other(raw) = &other else {
            panic!("expected the raw fallback");
        };
        assert_eq!(raw.resource_type(), Some("DiagnosticReport"));
        assert_eq!(raw.get("conclusion"), Some(&json!("unremarkable")));
    }

    #[test]
    fn test_missing_resource_type_is_an_error() {
        let err = serde_json::from_value::<Resource>(json!({ "id": "x" })).unwrap_err();
        assert!(err.to_string().contains("missing resourceType"));
    }
}
