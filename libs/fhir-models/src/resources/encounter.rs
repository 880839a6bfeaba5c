//! FHIR Encounter model

use super::Resource;
use crate::datatypes::{
    CodeableConcept, Coding, Duration, Extension, Identifier, Meta, Narrative, Period, Reference,
};
use crate::primitives::{Code, Id, Uri};
use serde::{Deserialize, Serialize};

/// An interaction during which services are provided to the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    /// Resource type - always "Encounter"
    #[serde(rename = "resourceType", default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    /// Metadata about the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// A set of rules under which this content was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<Uri>,

    /// Language of the resource content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Code>,

    /// Text summary of the resource, for human interpretation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    /// Contained, inline Resources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contained: Vec<Resource>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Extensions that cannot be ignored
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifier_extension: Vec<Extension>,

    /// Identifier(s) by which this encounter is known
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    /// planned | arrived | triaged | in-progress | onleave | finished |
    /// cancelled | entered-in-error | unknown
    pub status: Code,

    /// List of past encounter statuses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status_history: Vec<EncounterStatusHistory>,

    /// Classification of patient encounter (AMB, IMP, EMER, …)
    pub class: Coding,

    /// List of past encounter classes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class_history: Vec<EncounterClassHistory>,

    /// Specific type of encounter
    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub type_: Vec<CodeableConcept>,

    /// Specific type of service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<CodeableConcept>,

    /// Indicates the urgency of the encounter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<CodeableConcept>,

    /// The patient or group present at the encounter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// Episode(s) of care that this encounter should be recorded against
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episode_of_care: Vec<Reference>,

    /// The ServiceRequest that initiated this encounter
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub based_on: Vec<Reference>,

    /// List of participants involved in the encounter
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participant: Vec<EncounterParticipant>,

    /// The appointment that scheduled this encounter
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub appointment: Vec<Reference>,

    /// The start and end time of the encounter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Quantity of time the encounter lasted (less time absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Duration>,

    /// Coded reason the encounter takes place
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reason_code: Vec<CodeableConcept>,

    /// Reason the encounter takes place (reference)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reason_reference: Vec<Reference>,

    /// Details about the admission to a healthcare service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospitalization: Option<EncounterHospitalization>,

    /// List of locations where the patient has been
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub location: Vec<EncounterLocation>,

    /// The organization responsible for this encounter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<Reference>,

    /// Another Encounter this encounter is part of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Reference>,
}

fn default_resource_type() -> String {
    "Encounter".to_string()
}

impl Encounter {
    /// Create a new Encounter with minimal required fields
    pub fn new(status: impl Into<Code>, class: Coding) -> Self {
        Self {
            resource_type: "Encounter".to_string(),
            id: None,
            meta: None,
            implicit_rules: None,
            language: None,
            text: None,
            contained: Vec::new(),
            extension: Vec::new(),
            modifier_extension: Vec::new(),
            identifier: Vec::new(),
            status: status.into(),
            status_history: Vec::new(),
            class,
            class_history: Vec::new(),
            type_: Vec::new(),
            service_type: None,
            priority: None,
            subject: None,
            episode_of_care: Vec::new(),
            based_on: Vec::new(),
            participant: Vec::new(),
            appointment: Vec::new(),
            period: None,
            length: None,
            reason_code: Vec::new(),
            reason_reference: Vec::new(),
            hospitalization: None,
            location: Vec::new(),
            service_provider: None,
            part_of: None,
        }
    }
}

/// List of past encounter statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterStatusHistory {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// planned | arrived | triaged | in-progress | onleave | finished |
    /// cancelled | entered-in-error | unknown
    pub status: Code,

    /// The time that the episode was in the specified status
    pub period: Period,
}

/// List of past encounter classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterClassHistory {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Classification of patient encounter
    pub class: Coding,

    /// The time that the episode was in the specified class
    pub period: Period,
}

/// List of participants involved in the encounter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterParticipant {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Role of participant in encounter
    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub type_: Vec<CodeableConcept>,

    /// Period of time during the encounter that the participant participated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Persons involved in the encounter other than the patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<Reference>,
}

/// Details about the admission to a healthcare service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterHospitalization {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Pre-admission identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_admission_identifier: Option<Identifier>,

    /// The location/organization from which the patient came before admission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Reference>,

    /// From where patient was admitted (physician referral, transfer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admit_source: Option<CodeableConcept>,

    /// The type of hospital re-admission that has occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub re_admission: Option<CodeableConcept>,

    /// Diet preferences reported by the patient
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diet_preference: Vec<CodeableConcept>,

    /// Special courtesies (VIP, board member)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_courtesy: Vec<CodeableConcept>,

    /// Wheelchair, translator, stretcher, etc.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_arrangement: Vec<CodeableConcept>,

    /// Location/organization to which the patient is discharged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Reference>,

    /// Category or kind of location after discharge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_disposition: Option<CodeableConcept>,
}

/// List of locations where the patient has been.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterLocation {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Location the encounter takes place
    pub location: Reference,

    /// planned | active | reserved | completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Code>,

    /// The physical type of the location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_type: Option<CodeableConcept>,

    /// Time period during which the patient was present at the location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ambulatory() -> Coding {
        Coding::new("http://terminology.hl7.org/CodeSystem/v3-ActCode", "AMB")
    }

    #[test]
    fn test_serialize_minimal() {
        let encounter = Encounter::new("finished", ambulatory());
        assert_eq!(
            serde_json::to_value(&encounter).unwrap(),
            json!({
                "resourceType": "Encounter",
                "status": "finished",
                "class": {
                    "system": "http://terminology.hl7.org/CodeSystem/v3-ActCode",
                    "code": "AMB"
                }
            })
        );
    }

    #[test]
    fn test_roundtrip_populated() {
        let mut encounter = Encounter::new("in-progress", ambulatory());
        encounter.id = Some(Id::new("example"));
        encounter.subject = Some(Reference::literal("Patient/example"));
        encounter.period = Some(Period::starting("2024-02-03T09:00:00Z"));
        encounter.status_history = vec![EncounterStatusHistory {
            id: None,
            extension: Vec::new(),
            status: Code::new("arrived"),
            period: Period::new(
                Some("2024-02-03T08:45:00Z".into()),
                Some("2024-02-03T09:00:00Z".into()),
            ),
        }];
        encounter.location = vec![EncounterLocation {
            id: None,
            extension: Vec::new(),
            location: Reference::literal("Location/ward-2"),
            status: Some(Code::new("active")),
            physical_type: None,
            period: None,
        }];

        let encoded = serde_json::to_value(&encounter).unwrap();
        let decoded: Encounter = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, encounter);
    }

    #[test]
    fn test_missing_class_fails_decoding() {
        let err = serde_json::from_value::<Encounter>(json!({
            "resourceType": "Encounter",
            "status": "finished"
        }));
        assert!(err.is_err());
    }
}
