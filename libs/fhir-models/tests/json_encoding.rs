//! Wire-format checks for the FHIR JSON encoding rules: declaration-order
//! fields, omission of absent/empty elements, suffixed choice keys, and
//! lossless handling of unknown resources.

use vitalis_models::datatypes::{
    CodeableConcept, Coding, ContactPoint, HumanName, Identifier, Quantity,
};
use vitalis_models::resources::{
    Bundle, BundleEntry, BundleType, Observation, Patient, Resource,
};
use vitalis_models::{Code, Date, DynamicValue, Id};

#[test]
fn minimal_observation_emits_only_required_fields() {
    let observation = Observation::new("final", CodeableConcept::text("glucose"));
    let encoded = serde_json::to_string(&observation).unwrap();
    assert_eq!(
        encoded,
        r#"{"resourceType":"Observation","status":"final","code":{"text":"glucose"}}"#
    );
}

#[test]
fn minimal_patient_round_trips() {
    let patient = Patient::new();
    let encoded = serde_json::to_string(&patient).unwrap();
    assert_eq!(encoded, r#"{"resourceType":"Patient"}"#);

    let decoded: Patient = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, patient);
}

#[test]
fn populated_patient_round_trips() {
    let mut patient = Patient::new()
        .with_deceased(DynamicValue::Boolean(false))
        .unwrap();
    patient.id = Some(Id::new("example"));
    patient.identifier = vec![Identifier::new("http://hospital.example.org/mrn", "12345")];
    patient.name = vec![HumanName::new("Chalmers", vec!["Peter".to_string()])];
    patient.telecom = vec![ContactPoint::phone("555-0123")];
    patient.gender = Some(Code::new("male"));
    patient.birth_date = Some(Date::new("1974-12-25"));

    let encoded = serde_json::to_value(&patient).unwrap();
    let decoded: Patient = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, patient);
}

#[test]
fn fields_serialize_in_declaration_order() {
    let mut patient = Patient::new();
    patient.gender = Some(Code::new("female"));
    patient.active = Some(true);
    patient.id = Some(Id::new("p1"));

    // Declaration order, not assignment order.
    let encoded = serde_json::to_string(&patient).unwrap();
    assert_eq!(
        encoded,
        r#"{"resourceType":"Patient","id":"p1","active":true,"gender":"female"}"#
    );
}

#[test]
fn choice_keys_carry_the_type_suffix() {
    let observation = Observation::new("final", CodeableConcept::text("glucose"))
        .with_value(DynamicValue::Quantity(Quantity::ucum(
            "6.3".parse().unwrap(),
            "mmol/l",
            "mmol/L",
        )))
        .unwrap();
    let encoded = serde_json::to_value(&observation).unwrap();
    assert!(encoded.get("valueQuantity").is_some());
    assert!(encoded.get("value").is_none());

    let decoded: Observation = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, observation);
}

#[test]
fn decoding_with_exactly_one_suffixed_key_recovers_the_tag() {
    let observation: Observation = serde_json::from_value(serde_json::json!({
        "resourceType": "Observation",
        "status": "final",
        "code": { "text": "pregnancy status" },
        "valueCodeableConcept": { "text": "pregnant" }
    }))
    .unwrap();

    match observation.value {
        Some(DynamicValue::CodeableConcept(ref concept)) => {
            assert_eq!(concept.text.as_deref(), Some("pregnant"));
        }
        ref other => panic!("expected a CodeableConcept value, got {other:?}"),
    }
}

#[test]
fn unknown_resources_round_trip_byte_identically() {
    let input = r#"{"resourceType":"MedicationRequest","id":"mr-1","status":"active","intent":"order","medicationCodeableConcept":{"text":"insulin"},"subject":{"reference":"Patient/example"},"note":[{"text":"start low"}]}"#;
    let resource: Resource = serde_json::from_str(input).unwrap();
    assert!(matches!(resource, Resource::Other(_)));
    assert_eq!(serde_json::to_string(&resource).unwrap(), input);
}

#[test]
fn typed_resources_dispatch_from_the_enum() {
    let resource: Resource = serde_json::from_str(
        r#"{"resourceType":"Observation","status":"final","code":{"text":"glucose"}}"#,
    )
    .unwrap();
    assert!(matches!(resource, Resource::Observation(_)));
    assert_eq!(resource.resource_type(), "Observation");
}

#[test]
fn bundle_preserves_mixed_known_and_unknown_entries() {
    let mut bundle = Bundle::new(BundleType::Collection);
    bundle
        .add_entry(BundleEntry {
            resource: Some(Resource::Patient(Patient::new())),
            ..BundleEntry::default()
        })
        .unwrap();
    bundle
        .add_entry(BundleEntry {
            resource: Some(
                serde_json::from_str(r#"{"resourceType":"Practitioner","id":"pr-9"}"#).unwrap(),
            ),
            ..BundleEntry::default()
        })
        .unwrap();

    let encoded = serde_json::to_value(&bundle).unwrap();
    let decoded: Bundle = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, bundle);
    assert!(matches!(
        decoded.entry[1].resource,
        Some(Resource::Other(_))
    ));
}

#[test]
fn collections_are_arrays_even_when_singular() {
    let concept = CodeableConcept::new(Coding::new("http://loinc.org", "8480-6"));
    let encoded = serde_json::to_value(&concept).unwrap();
    assert!(encoded["coding"].is_array());
    assert_eq!(encoded["coding"].as_array().unwrap().len(), 1);
}
