//! FHIR CarePlan model
//!
//! An activity is described either by reference or by an inline detail,
//! never both (cpl-3). The detail carries the `scheduled[x]` and
//! `product[x]` choice elements.

use super::Resource;
use crate::choice::{self, DynamicType, DynamicValue};
use crate::datatypes::{
    Annotation, CodeableConcept, Extension, Identifier, Meta, Narrative, Period, Quantity,
    Reference,
};
use crate::error::{Error, Result};
use crate::json;
use crate::primitives::{Canonical, Code, DateTime, Id, Uri};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const CPL_3: &str = "Provide a reference or detail, not both";

/// Healthcare plan for a patient or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlan {
    /// Resource type - always "CarePlan"
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

    /// External ids for this plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    /// Instantiates FHIR protocol or definition
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instantiates_canonical: Vec<Canonical>,

    /// Instantiates external protocol or definition
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instantiates_uri: Vec<Uri>,

    /// Fulfills care plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub based_on: Vec<Reference>,

    /// CarePlan replaced by this CarePlan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replaces: Vec<Reference>,

    /// Part of referenced CarePlan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub part_of: Vec<Reference>,

    /// draft | active | on-hold | revoked | completed | entered-in-error |
    /// unknown
    pub status: Code,

    /// proposal | plan | order | option
    pub intent: Code,

    /// Type of plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    /// Human-friendly name for the care plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Summary of nature of plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Who the care plan is for
    pub subject: Reference,

    /// Encounter created as part of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    /// Time period plan covers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Date record was first recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime>,

    /// Who is the designated responsible party
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,

    /// Who provided the content of the care plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributor: Vec<Reference>,

    /// Who's involved in plan?
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub care_team: Vec<Reference>,

    /// Health issues this plan addresses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Reference>,

    /// Information considered as part of plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supporting_info: Vec<Reference>,

    /// Desired outcome of plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goal: Vec<Reference>,

    /// Action to occur as part of plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activity: Vec<CarePlanActivity>,

    /// Comments about the plan
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub note: Vec<Annotation>,
}

fn default_resource_type() -> String {
    "CarePlan".to_string()
}

impl CarePlan {
    /// Create a new CarePlan with minimal required fields
    pub fn new(status: impl Into<Code>, intent: impl Into<Code>, subject: Reference) -> Self {
        Self {
            resource_type: "CarePlan".to_string(),
            id: None,
            meta: None,
            implicit_rules: None,
            language: None,
            text: None,
            contained: Vec::new(),
            extension: Vec::new(),
            modifier_extension: Vec::new(),
            identifier: Vec::new(),
            instantiates_canonical: Vec::new(),
            instantiates_uri: Vec::new(),
            based_on: Vec::new(),
            replaces: Vec::new(),
            part_of: Vec::new(),
            status: status.into(),
            intent: intent.into(),
            category: Vec::new(),
            title: None,
            description: None,
            subject,
            encounter: None,
            period: None,
            created: None,
            author: None,
            contributor: Vec::new(),
            care_team: Vec::new(),
            addresses: Vec::new(),
            supporting_info: Vec::new(),
            goal: Vec::new(),
            activity: Vec::new(),
            note: Vec::new(),
        }
    }
}

/// Action to occur as part of the plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanActivity {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Results of the activity
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outcome_codeable_concept: Vec<CodeableConcept>,

    /// Appointment, Encounter, Procedure, etc.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outcome_reference: Vec<Reference>,

    /// Comments about the activity status/progress
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub progress: Vec<Annotation>,

    /// Activity details defined in specific resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,

    /// In-line definition of activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<CarePlanActivityDetail>,
}

impl CarePlanActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe the activity by reference; exclusive with a detail (cpl-3).
    pub fn with_reference(mut self, reference: Reference) -> Result<Self> {
        if self.detail.is_some() {
            return Err(Error::Invariant(CPL_3));
        }
        self.reference = Some(reference);
        Ok(self)
    }

    /// Describe the activity in line; exclusive with a reference (cpl-3).
    pub fn with_detail(mut self, detail: CarePlanActivityDetail) -> Result<Self> {
        if self.reference.is_some() {
            return Err(Error::Invariant(CPL_3));
        }
        self.detail = Some(detail);
        Ok(self)
    }
}

/// In-line definition of an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct CarePlanActivityDetail {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Additional content defined by implementations
    pub extension: Vec<Extension>,

    /// Appointment | CommunicationRequest | DeviceRequest | …
    pub kind: Option<Code>,

    /// Instantiates FHIR protocol or definition
    pub instantiates_canonical: Vec<Canonical>,

    /// Instantiates external protocol or definition
    pub instantiates_uri: Vec<Uri>,

    /// Detail type of activity
    pub code: Option<CodeableConcept>,

    /// Why activity should be done or why activity was prohibited
    pub reason_code: Vec<CodeableConcept>,

    /// Why activity is needed
    pub reason_reference: Vec<Reference>,

    /// Goals this activity relates to
    pub goal: Vec<Reference>,

    /// not-started | scheduled | in-progress | on-hold | completed |
    /// cancelled | stopped | unknown | entered-in-error
    pub status: Code,

    /// Reason for current status
    pub status_reason: Option<CodeableConcept>,

    /// If true, activity is prohibiting action
    pub do_not_perform: Option<bool>,

    /// When activity is to occur
    pub scheduled: Option<DynamicValue>,

    /// Where it should happen
    pub location: Option<Reference>,

    /// Who will be responsible?
    pub performer: Vec<Reference>,

    /// What is to be administered/supplied
    pub product: Option<DynamicValue>,

    /// How to consume/day?
    pub daily_amount: Option<Quantity>,

    /// How much to administer/supply/consume
    pub quantity: Option<Quantity>,

    /// Extra info describing activity to perform
    pub description: Option<String>,
}

impl CarePlanActivityDetail {
    /// Types legal for `scheduled[x]`.
    pub const SCHEDULED_TYPES: &'static [DynamicType] = &[
        DynamicType::Timing,
        DynamicType::Period,
        DynamicType::String,
    ];

    /// Types legal for `product[x]`.
    pub const PRODUCT_TYPES: &'static [DynamicType] =
        &[DynamicType::CodeableConcept, DynamicType::Reference];

    pub fn new(status: impl Into<Code>) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            kind: None,
            instantiates_canonical: Vec::new(),
            instantiates_uri: Vec::new(),
            code: None,
            reason_code: Vec::new(),
            reason_reference: Vec::new(),
            goal: Vec::new(),
            status: status.into(),
            status_reason: None,
            do_not_perform: None,
            scheduled: None,
            location: None,
            performer: Vec::new(),
            product: None,
            daily_amount: None,
            quantity: None,
            description: None,
        }
    }

    pub fn with_scheduled(mut self, scheduled: DynamicValue) -> Result<Self> {
        choice::expect_one_of("scheduled", Self::SCHEDULED_TYPES, &scheduled)?;
        self.scheduled = Some(scheduled);
        Ok(self)
    }

    pub fn with_product(mut self, product: DynamicValue) -> Result<Self> {
        choice::expect_one_of("product", Self::PRODUCT_TYPES, &product)?;
        self.product = Some(product);
        Ok(self)
    }
}

impl Serialize for CarePlanActivityDetail {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        json::put_opt(&mut map, "kind", &self.kind)?;
        json::put_vec(
            &mut map,
            "instantiatesCanonical",
            &self.instantiates_canonical,
        )?;
        json::put_vec(&mut map, "instantiatesUri", &self.instantiates_uri)?;
        json::put_opt(&mut map, "code", &self.code)?;
        json::put_vec(&mut map, "reasonCode", &self.reason_code)?;
        json::put_vec(&mut map, "reasonReference", &self.reason_reference)?;
        json::put_vec(&mut map, "goal", &self.goal)?;
        json::put(&mut map, "status", &self.status)?;
        json::put_opt(&mut map, "statusReason", &self.status_reason)?;
        json::put_opt(&mut map, "doNotPerform", &self.do_not_perform)?;
        choice::encode_opt(&mut map, "scheduled", &self.scheduled)?;
        json::put_opt(&mut map, "location", &self.location)?;
        json::put_vec(&mut map, "performer", &self.performer)?;
        choice::encode_opt(&mut map, "product", &self.product)?;
        json::put_opt(&mut map, "dailyAmount", &self.daily_amount)?;
        json::put_opt(&mut map, "quantity", &self.quantity)?;
        json::put_opt(&mut map, "description", &self.description)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CarePlanActivityDetail {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: json::take_opt(&mut map, "id")?,
            extension: json::take_vec(&mut map, "extension")?,
            kind: json::take_opt(&mut map, "kind")?,
            instantiates_canonical: json::take_vec(&mut map, "instantiatesCanonical")?,
            instantiates_uri: json::take_vec(&mut map, "instantiatesUri")?,
            code: json::take_opt(&mut map, "code")?,
            reason_code: json::take_vec(&mut map, "reasonCode")?,
            reason_reference: json::take_vec(&mut map, "reasonReference")?,
            goal: json::take_vec(&mut map, "goal")?,
            status: json::take(&mut map, "status")?,
            status_reason: json::take_opt(&mut map, "statusReason")?,
            do_not_perform: json::take_opt(&mut map, "doNotPerform")?,
            scheduled: choice::decode(&mut map, "scheduled", Self::SCHEDULED_TYPES)?,
            location: json::take_opt(&mut map, "location")?,
            performer: json::take_vec(&mut map, "performer")?,
            product: choice::decode(&mut map, "product", Self::PRODUCT_TYPES)?,
            daily_amount: json::take_opt(&mut map, "dailyAmount")?,
            quantity: json::take_opt(&mut map, "quantity")?,
            description: json::take_opt(&mut map, "description")?,
        })
    }
}
