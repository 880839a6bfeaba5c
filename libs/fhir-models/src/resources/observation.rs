//! FHIR Observation model
//!
//! Observation carries the largest choice element of the typed set:
//! `value[x]` admits eleven datatypes on the resource and again on each
//! component. obs-6 (a data-absent reason excludes a value) and obs-3
//! (a reference range needs a low, a high or text) are checked eagerly.

use super::Resource;
use crate::choice::{self, DynamicType, DynamicValue};
use crate::datatypes::{
    Annotation, CodeableConcept, Extension, Identifier, Meta, Narrative, Quantity, Range,
    Reference,
};
use crate::error::{Error, Result};
use crate::json;
use crate::primitives::{Code, Id, Instant, Uri};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const OBS_3: &str = "Must have at least a low or a high or text";
const OBS_6: &str =
    "dataAbsentReason SHALL only be present if Observation.value[x] is not present";

/// Measurements and simple assertions made about a patient.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Resource type - always "Observation"
    pub resource_type: String,

    /// Logical id of this artifact
    pub id: Option<Id>,

    /// Metadata about the resource
    pub meta: Option<Meta>,

    /// A set of rules under which this content was created
    pub implicit_rules: Option<Uri>,

    /// Language of the resource content
    pub language: Option<Code>,

    /// Text summary of the resource, for human interpretation
    pub text: Option<Narrative>,

    /// Contained, inline Resources
    pub contained: Vec<Resource>,

    /// Additional content defined by implementations
    pub extension: Vec<Extension>,

    /// Extensions that cannot be ignored
    pub modifier_extension: Vec<Extension>,

    /// Business identifier for this observation
    pub identifier: Vec<Identifier>,

    /// Fulfills plan, proposal or order
    pub based_on: Vec<Reference>,

    /// Part of referenced event
    pub part_of: Vec<Reference>,

    /// registered | preliminary | final | amended | +
    pub status: Code,

    /// Classification of type of observation
    pub category: Vec<CodeableConcept>,

    /// Type of observation (code / type)
    pub code: CodeableConcept,

    /// Who and/or what the observation is about
    pub subject: Option<Reference>,

    /// Healthcare event during which this observation is made
    pub encounter: Option<Reference>,

    /// Clinically relevant time/time-period for observation
    pub effective: Option<DynamicValue>,

    /// Date/Time this version was made available
    pub issued: Option<Instant>,

    /// Who is responsible for the observation
    pub performer: Vec<Reference>,

    /// Actual result
    pub value: Option<DynamicValue>,

    /// Why the result is missing
    pub data_absent_reason: Option<CodeableConcept>,

    /// High, low, normal, etc.
    pub interpretation: Vec<CodeableConcept>,

    /// Comments about the observation
    pub note: Vec<Annotation>,

    /// Observed body part
    pub body_site: Option<CodeableConcept>,

    /// How it was done
    pub method: Option<CodeableConcept>,

    /// Specimen used for this observation
    pub specimen: Option<Reference>,

    /// (Measurement) Device
    pub device: Option<Reference>,

    /// Provides guide for interpretation
    pub reference_range: Vec<ObservationReferenceRange>,

    /// Related resource that belongs to the Observation group
    pub has_member: Vec<Reference>,

    /// Related measurements the observation is made from
    pub derived_from: Vec<Reference>,

    /// Component results
    pub component: Vec<ObservationComponent>,
}

/// Types legal for `value[x]` on the observation and its components.
const VALUE_TYPES: &[DynamicType] = &[
    DynamicType::Quantity,
    DynamicType::CodeableConcept,
    DynamicType::String,
    DynamicType::Boolean,
    DynamicType::Integer,
    DynamicType::Range,
    DynamicType::Ratio,
    DynamicType::SampledData,
    DynamicType::Time,
    DynamicType::DateTime,
    DynamicType::Period,
];

impl Observation {
    /// Types legal for `value[x]`.
    pub const VALUE_TYPES: &'static [DynamicType] = VALUE_TYPES;

    /// Types legal for `effective[x]`.
    pub const EFFECTIVE_TYPES: &'static [DynamicType] = &[
        DynamicType::DateTime,
        DynamicType::Period,
        DynamicType::Timing,
        DynamicType::Instant,
    ];

    pub fn new(status: impl Into<Code>, code: CodeableConcept) -> Self {
        Self {
            resource_type: "Observation".to_string(),
            id: None,
            meta: None,
            implicit_rules: None,
            language: None,
            text: None,
            contained: Vec::new(),
            extension: Vec::new(),
            modifier_extension: Vec::new(),
            identifier: Vec::new(),
            based_on: Vec::new(),
            part_of: Vec::new(),
            status: status.into(),
            category: Vec::new(),
            code,
            subject: None,
            encounter: None,
            effective: None,
            issued: None,
            performer: Vec::new(),
            value: None,
            data_absent_reason: None,
            interpretation: Vec::new(),
            note: Vec::new(),
            body_site: None,
            method: None,
            specimen: None,
            device: None,
            reference_range: Vec::new(),
            has_member: Vec::new(),
            derived_from: Vec::new(),
            component: Vec::new(),
        }
    }

    /// Set the result value; exclusive with a data-absent reason (obs-6).
    pub fn with_value(mut self, value: DynamicValue) -> Result<Self> {
        choice::expect_one_of("value", Self::VALUE_TYPES, &value)?;
        if self.data_absent_reason.is_some() {
            return Err(Error::Invariant(OBS_6));
        }
        self.value = Some(value);
        Ok(self)
    }

    pub fn with_effective(mut self, effective: DynamicValue) -> Result<Self> {
        choice::expect_one_of("effective", Self::EFFECTIVE_TYPES, &effective)?;
        self.effective = Some(effective);
        Ok(self)
    }

    /// Explain why the result is missing; exclusive with a value (obs-6).
    pub fn with_data_absent_reason(mut self, reason: CodeableConcept) -> Result<Self> {
        if self.value.is_some() {
            return Err(Error::Invariant(OBS_6));
        }
        self.data_absent_reason = Some(reason);
        Ok(self)
    }
}

impl Serialize for Observation {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        map.insert(
            "resourceType".to_string(),
            Value::String("Observation".to_string()),
        );
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_opt(&mut map, "meta", &self.meta)?;
        json::put_opt(&mut map, "implicitRules", &self.implicit_rules)?;
        json::put_opt(&mut map, "language", &self.language)?;
        json::put_opt(&mut map, "text", &self.text)?;
        json::put_vec(&mut map, "contained", &self.contained)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        json::put_vec(&mut map, "modifierExtension", &self.modifier_extension)?;
        json::put_vec(&mut map, "identifier", &self.identifier)?;
        json::put_vec(&mut map, "basedOn", &self.based_on)?;
        json::put_vec(&mut map, "partOf", &self.part_of)?;
        json::put(&mut map, "status", &self.status)?;
        json::put_vec(&mut map, "category", &self.category)?;
        json::put(&mut map, "code", &self.code)?;
        json::put_opt(&mut map, "subject", &self.subject)?;
        json::put_opt(&mut map, "encounter", &self.encounter)?;
        choice::encode_opt(&mut map, "effective", &self.effective)?;
        json::put_opt(&mut map, "issued", &self.issued)?;
        json::put_vec(&mut map, "performer", &self.performer)?;
        choice::encode_opt(&mut map, "value", &self.value)?;
        json::put_opt(&mut map, "dataAbsentReason", &self.data_absent_reason)?;
        json::put_vec(&mut map, "interpretation", &self.interpretation)?;
        json::put_vec(&mut map, "note", &self.note)?;
        json::put_opt(&mut map, "bodySite", &self.body_site)?;
        json::put_opt(&mut map, "method", &self.method)?;
        json::put_opt(&mut map, "specimen", &self.specimen)?;
        json::put_opt(&mut map, "device", &self.device)?;
        json::put_vec(&mut map, "referenceRange", &self.reference_range)?;
        json::put_vec(&mut map, "hasMember", &self.has_member)?;
        json::put_vec(&mut map, "derivedFrom", &self.derived_from)?;
        json::put_vec(&mut map, "component", &self.component)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Observation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            resource_type: json::resource_type(&mut map, "Observation")?,
            id: json::take_opt(&mut map, "id")?,
            meta: json::take_opt(&mut map, "meta")?,
            implicit_rules: json::take_opt(&mut map, "implicitRules")?,
            language: json::take_opt(&mut map, "language")?,
            text: json::take_opt(&mut map, "text")?,
            contained: json::take_vec(&mut map, "contained")?,
            extension: json::take_vec(&mut map, "extension")?,
            modifier_extension: json::take_vec(&mut map, "modifierExtension")?,
            identifier: json::take_vec(&mut map, "identifier")?,
            based_on: json::take_vec(&mut map, "basedOn")?,
            part_of: json::take_vec(&mut map, "partOf")?,
            status: json::take(&mut map, "status")?,
            category: json::take_vec(&mut map, "category")?,
            code: json::take(&mut map, "code")?,
            subject: json::take_opt(&mut map, "subject")?,
            encounter: json::take_opt(&mut map, "encounter")?,
            effective: choice::decode(&mut map, "effective", Self::EFFECTIVE_TYPES)?,
            issued: json::take_opt(&mut map, "issued")?,
            performer: json::take_vec(&mut map, "performer")?,
            value: choice::decode(&mut map, "value", Self::VALUE_TYPES)?,
            data_absent_reason: json::take_opt(&mut map, "dataAbsentReason")?,
            interpretation: json::take_vec(&mut map, "interpretation")?,
            note: json::take_vec(&mut map, "note")?,
            body_site: json::take_opt(&mut map, "bodySite")?,
            method: json::take_opt(&mut map, "method")?,
            specimen: json::take_opt(&mut map, "specimen")?,
            device: json::take_opt(&mut map, "device")?,
            reference_range: json::take_vec(&mut map, "referenceRange")?,
            has_member: json::take_vec(&mut map, "hasMember")?,
            derived_from: json::take_vec(&mut map, "derivedFrom")?,
            component: json::take_vec(&mut map, "component")?,
        })
    }
}

/// Provides a guide for interpreting the observation value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationReferenceRange {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Low Range, if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    /// High Range, if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,

    /// Reference range qualifier
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// Reference range population
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applies_to: Vec<CodeableConcept>,

    /// Applicable age range, if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Range>,

    /// Text based reference range in an observation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ObservationReferenceRange {
    /// Create a reference range; at least one of low, high or text is
    /// required (obs-3).
    pub fn new(
        low: Option<Quantity>,
        high: Option<Quantity>,
        text: Option<String>,
    ) -> Result<Self> {
        if low.is_none() && high.is_none() && text.is_none() {
            return Err(Error::Invariant(OBS_3));
        }
        Ok(Self {
            low,
            high,
            text,
            ..Self::default()
        })
    }
}

/// Component results, e.g. the systolic and diastolic parts of blood
/// pressure.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationComponent {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Additional content defined by implementations
    pub extension: Vec<Extension>,

    /// Type of component observation (code / type)
    pub code: CodeableConcept,

    /// Actual component result
    pub value: Option<DynamicValue>,

    /// Why the component result is missing
    pub data_absent_reason: Option<CodeableConcept>,

    /// High, low, normal, etc.
    pub interpretation: Vec<CodeableConcept>,

    /// Provides guide for interpretation of component result
    pub reference_range: Vec<ObservationReferenceRange>,
}

impl ObservationComponent {
    /// Types legal for `value[x]`, the same set as on the resource.
    pub const VALUE_TYPES: &'static [DynamicType] = VALUE_TYPES;

    pub fn new(code: CodeableConcept) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            code,
            value: None,
            data_absent_reason: None,
            interpretation: Vec::new(),
            reference_range: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: DynamicValue) -> Result<Self> {
        choice::expect_one_of("value", Self::VALUE_TYPES, &value)?;
        self.value = Some(value);
        Ok(self)
    }
}

impl Serialize for ObservationComponent {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        json::put(&mut map, "code", &self.code)?;
        choice::encode_opt(&mut map, "value", &self.value)?;
        json::put_opt(&mut map, "dataAbsentReason", &self.data_absent_reason)?;
        json::put_vec(&mut map, "interpretation", &self.interpretation)?;
        json::put_vec(&mut map, "referenceRange", &self.reference_range)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObservationComponent {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: json::take_opt(&mut map, "id")?,
            extension: json::take_vec(&mut map, "extension")?,
            code: json::take(&mut map, "code")?,
            value: choice::decode(&mut map, "value", Self::VALUE_TYPES)?,
            data_absent_reason: json::take_opt(&mut map, "dataAbsentReason")?,
            interpretation: json::take_vec(&mut map, "interpretation")?,
            reference_range: json::take_vec(&mut map, "referenceRange")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Coding;

    fn glucose() -> CodeableConcept {
        CodeableConcept::new(Coding::new("http://loinc.org", "15074-8"))
    }

    #[test]
    fn test_value_quantity_uses_suffixed_key() {
        let observation = Observation::new("final", glucose())
            .with_value(DynamicValue::Quantity(Quantity::ucum(
                "6.3".parse().unwrap(),
                "mmol/l",
                "mmol/L",
            )))
            .unwrap();

        let encoded = serde_json::to_value(&observation).unwrap();
        assert_eq!(encoded["valueQuantity"]["value"], serde_json::json!(6.3));
        assert!(encoded.get("value").is_none());
    }

    #[test]
    fn test_value_and_data_absent_reason_are_exclusive() {
        let err = Observation::new("final", glucose())
            .with_value(DynamicValue::Boolean(true))
            .unwrap()
            .with_data_absent_reason(CodeableConcept::text("error"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "dataAbsentReason SHALL only be present if Observation.value[x] is not present"
        );
    }

    #[test]
    fn test_value_outside_set_is_rejected() {
        let err = Observation::new("final", glucose())
            .with_value(DynamicValue::Oid("urn:oid:1.2.3".into()))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "value can only be one of the following: Quantity, CodeableConcept, String, Boolean, \
             Integer, Range, Ratio, SampledData, Time, DateTime, Period"
        );
    }

    #[test]
    fn test_reference_range_needs_low_high_or_text() {
        let err = ObservationReferenceRange::new(None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Must have at least a low or a high or text");
    }

    #[test]
    fn test_roundtrip_with_components() {
        let systolic = ObservationComponent::new(CodeableConcept::new(Coding::new(
            "http://loinc.org",
            "8480-6",
        )))
        .with_value(DynamicValue::Quantity(Quantity::ucum(
            "107".parse().unwrap(),
            "mmHg",
            "mm[Hg]",
        )))
        .unwrap();

        let mut observation = Observation::new(
            "final",
            CodeableConcept::new(Coding::new("http://loinc.org", "85354-9")),
        )
        .with_effective(DynamicValue::DateTime("2024-02-03".into()))
        .unwrap();
        observation.subject = Some(Reference::literal("Patient/example"));
        observation.component = vec![systolic];

        let encoded = serde_json::to_value(&observation).unwrap();
        assert_eq!(encoded["effectiveDateTime"], "2024-02-03");
        assert!(encoded["component"][0].get("valueQuantity").is_some());

        let decoded: Observation = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, observation);
    }

    #[test]
    fn test_decode_rejects_out_of_set_effective() {
        let err = serde_json::from_value::<Observation>(serde_json::json!({
            "resourceType": "Observation",
            "status": "final",
            "code": { "text": "glucose" },
            "effectiveAge": { "value": 1 }
        }))
        .unwrap_err();
        assert!(err.to_string().contains(
            "effective can only be one of the following: DateTime, Period, Timing, Instant"
        ));
    }
}
