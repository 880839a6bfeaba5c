//! FHIR Patient model

use super::Resource;
use crate::choice::{self, DynamicType, DynamicValue};
use crate::datatypes::{
    Address, Attachment, CodeableConcept, ContactPoint, Extension, HumanName, Identifier, Meta,
    Narrative, Period, Reference,
};
use crate::error::{Error, Result};
use crate::json;
use crate::primitives::{Code, Date, Id, Uri};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const PAT_1: &str = "SHALL at least contain a contact's details or a reference to an organization";

/// Demographics and administrative information about a person receiving
/// care.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Patient {
    /// Resource type - always "Patient"
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

    /// An identifier for this patient
    pub identifier: Vec<Identifier>,

    /// Whether this patient's record is in active use
    pub active: Option<bool>,

    /// A name associated with the patient
    pub name: Vec<HumanName>,

    /// A contact detail for the individual
    pub telecom: Vec<ContactPoint>,

    /// male | female | other | unknown
    pub gender: Option<Code>,

    /// The date of birth for the individual
    pub birth_date: Option<Date>,

    /// Indicates if the individual is deceased or not
    pub deceased: Option<DynamicValue>,

    /// An address for the individual
    pub address: Vec<Address>,

    /// Marital (civil) status of a patient
    pub marital_status: Option<CodeableConcept>,

    /// Whether patient is part of a multiple birth
    pub multiple_birth: Option<DynamicValue>,

    /// Image of the patient
    pub photo: Vec<Attachment>,

    /// A contact party (e.g. guardian, partner, friend) for the patient
    pub contact: Vec<PatientContact>,

    /// A language which may be used to communicate with the patient
    pub communication: Vec<PatientCommunication>,

    /// Patient's nominated primary care provider
    pub general_practitioner: Vec<Reference>,

    /// Organization that is the custodian of the patient record
    pub managing_organization: Option<Reference>,

    /// Link to another patient resource that concerns the same actual person
    pub link: Vec<PatientLink>,
}

impl Patient {
    /// Types legal for `deceased[x]`.
    pub const DECEASED_TYPES: &'static [DynamicType] =
        &[DynamicType::Boolean, DynamicType::DateTime];

    /// Types legal for `multipleBirth[x]`.
    pub const MULTIPLE_BIRTH_TYPES: &'static [DynamicType] =
        &[DynamicType::Boolean, DynamicType::Integer];

    pub fn new() -> Self {
        Self {
            resource_type: "Patient".to_string(),
            ..Self::default()
        }
    }

    pub fn with_deceased(mut self, deceased: DynamicValue) -> Result<Self> {
        choice::expect_one_of("deceased", Self::DECEASED_TYPES, &deceased)?;
        self.deceased = Some(deceased);
        Ok(self)
    }

    pub fn with_multiple_birth(mut self, multiple_birth: DynamicValue) -> Result<Self> {
        choice::expect_one_of(
            "multipleBirth",
            Self::MULTIPLE_BIRTH_TYPES,
            &multiple_birth,
        )?;
        self.multiple_birth = Some(multiple_birth);
        Ok(self)
    }

    /// Add a contact party, which must carry some way of contacting it
    /// (pat-1).
    pub fn add_contact(&mut self, contact: PatientContact) -> Result<()> {
        if contact.name.is_none()
            && contact.telecom.is_empty()
            && contact.address.is_none()
            && contact.organization.is_none()
        {
            return Err(Error::Invariant(PAT_1));
        }
        self.contact.push(contact);
        Ok(())
    }
}

impl Serialize for Patient {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        map.insert(
            "resourceType".to_string(),
            Value::String("Patient".to_string()),
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
        json::put_opt(&mut map, "active", &self.active)?;
        json::put_vec(&mut map, "name", &self.name)?;
        json::put_vec(&mut map, "telecom", &self.telecom)?;
        json::put_opt(&mut map, "gender", &self.gender)?;
        json::put_opt(&mut map, "birthDate", &self.birth_date)?;
        choice::encode_opt(&mut map, "deceased", &self.deceased)?;
        json::put_vec(&mut map, "address", &self.address)?;
        json::put_opt(&mut map, "maritalStatus", &self.marital_status)?;
        choice::encode_opt(&mut map, "multipleBirth", &self.multiple_birth)?;
        json::put_vec(&mut map, "photo", &self.photo)?;
        json::put_vec(&mut map, "contact", &self.contact)?;
        json::put_vec(&mut map, "communication", &self.communication)?;
        json::put_vec(&mut map, "generalPractitioner", &self.general_practitioner)?;
        json::put_opt(&mut map, "managingOrganization", &self.managing_organization)?;
        json::put_vec(&mut map, "link", &self.link)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Patient {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            resource_type: json::resource_type(&mut map, "Patient")?,
            id: json::take_opt(&mut map, "id")?,
            meta: json::take_opt(&mut map, "meta")?,
            implicit_rules: json::take_opt(&mut map, "implicitRules")?,
            language: json::take_opt(&mut map, "language")?,
            text: json::take_opt(&mut map, "text")?,
            contained: json::take_vec(&mut map, "contained")?,
            extension: json::take_vec(&mut map, "extension")?,
            modifier_extension: json::take_vec(&mut map, "modifierExtension")?,
            identifier: json::take_vec(&mut map, "identifier")?,
            active: json::take_opt(&mut map, "active")?,
            name: json::take_vec(&mut map, "name")?,
            telecom: json::take_vec(&mut map, "telecom")?,
            gender: json::take_opt(&mut map, "gender")?,
            birth_date: json::take_opt(&mut map, "birthDate")?,
            deceased: choice::decode(&mut map, "deceased", Self::DECEASED_TYPES)?,
            address: json::take_vec(&mut map, "address")?,
            marital_status: json::take_opt(&mut map, "maritalStatus")?,
            multiple_birth: choice::decode(
                &mut map,
                "multipleBirth",
                Self::MULTIPLE_BIRTH_TYPES,
            )?,
            photo: json::take_vec(&mut map, "photo")?,
            contact: json::take_vec(&mut map, "contact")?,
            communication: json::take_vec(&mut map, "communication")?,
            general_practitioner: json::take_vec(&mut map, "generalPractitioner")?,
            managing_organization: json::take_opt(&mut map, "managingOrganization")?,
            link: json::take_vec(&mut map, "link")?,
        })
    }
}

/// A contact party (e.g. guardian, partner, friend) for the patient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientContact {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// The kind of relationship
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship: Vec<CodeableConcept>,

    /// A name associated with the contact person
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<HumanName>,

    /// A contact detail for the person
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,

    /// Address for the contact person
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// male | female | other | unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Code>,

    /// Organization that is associated with the contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Reference>,

    /// Period during which this contact was/is valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// A language which may be used to communicate with the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCommunication {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// The language (BCP-47)
    pub language: CodeableConcept,

    /// Language preference indicator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred: Option<bool>,
}

/// Link to another patient resource that concerns the same actual person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientLink {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// The other patient or related person resource
    pub other: Reference,

    /// replaced-by | replaces | refer | seealso
    #[serde(rename = "type")]
    pub type_: Code,
}
