//! FHIR DataRequirement model

use super::codeable_concept::Coding;
use super::extension::Extension;
use crate::choice::{self, DynamicType, DynamicValue};
use crate::error::{Error, Result};
use crate::json;
use crate::primitives::{Canonical, Code, PositiveInt};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const DRQ_PATH_OR_PARAM: &str = "Either a path or a searchParam must be provided, but not both";

/// Describes a required data item for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRequirement {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Additional content defined by implementations
    pub extension: Vec<Extension>,

    /// The type of the required data
    pub type_: Code,

    /// The profile of the required data
    pub profile: Vec<Canonical>,

    /// E.g. Patient, Practitioner, RelatedPerson, Organization, …
    pub subject: Option<DynamicValue>,

    /// Indicates specific structure elements that are referenced
    pub must_support: Vec<String>,

    /// What codes are expected
    pub code_filter: Vec<DataRequirementCodeFilter>,

    /// What dates/date ranges are expected
    pub date_filter: Vec<DataRequirementDateFilter>,

    /// Number of results
    pub limit: Option<PositiveInt>,

    /// Order of the results
    pub sort: Vec<DataRequirementSort>,
}

impl DataRequirement {
    /// Types legal for `subject[x]`.
    pub const SUBJECT_TYPES: &'static [DynamicType] =
        &[DynamicType::CodeableConcept, DynamicType::Reference];

    pub fn new(type_: impl Into<Code>) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            type_: type_.into(),
            profile: Vec::new(),
            subject: None,
            must_support: Vec::new(),
            code_filter: Vec::new(),
            date_filter: Vec::new(),
            limit: None,
            sort: Vec::new(),
        }
    }

    pub fn with_subject(mut self, subject: DynamicValue) -> Result<Self> {
        choice::expect_one_of("subject", Self::SUBJECT_TYPES, &subject)?;
        self.subject = Some(subject);
        Ok(self)
    }
}

impl Serialize for DataRequirement {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        json::put(&mut map, "type", &self.type_)?;
        json::put_vec(&mut map, "profile", &self.profile)?;
        choice::encode_opt(&mut map, "subject", &self.subject)?;
        json::put_vec(&mut map, "mustSupport", &self.must_support)?;
        json::put_vec(&mut map, "codeFilter", &self.code_filter)?;
        json::put_vec(&mut map, "dateFilter", &self.date_filter)?;
        json::put_opt(&mut map, "limit", &self.limit)?;
        json::put_vec(&mut map, "sort", &self.sort)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DataRequirement {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: json::take_opt(&mut map, "id")?,
            extension: json::take_vec(&mut map, "extension")?,
            type_: json::take(&mut map, "type")?,
            profile: json::take_vec(&mut map, "profile")?,
            subject: choice::decode(&mut map, "subject", Self::SUBJECT_TYPES)?,
            must_support: json::take_vec(&mut map, "mustSupport")?,
            code_filter: json::take_vec(&mut map, "codeFilter")?,
            date_filter: json::take_vec(&mut map, "dateFilter")?,
            limit: json::take_opt(&mut map, "limit")?,
            sort: json::take_vec(&mut map, "sort")?,
        })
    }
}

/// A code-valued filter on one element of the required data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequirementCodeFilter {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// A code-valued attribute to filter on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// A coded (token) parameter to search on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_param: Option<String>,

    /// Valueset for the filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set: Option<Canonical>,

    /// What code is expected
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code: Vec<Coding>,
}

impl DataRequirementCodeFilter {
    /// Create a filter addressed by exactly one of path or searchParam
    /// (drq-1).
    pub fn new(path: Option<String>, search_param: Option<String>) -> Result<Self> {
        if path.is_some() == search_param.is_some() {
            return Err(Error::Invariant(DRQ_PATH_OR_PARAM));
        }
        Ok(Self {
            path,
            search_param,
            ..Self::default()
        })
    }
}

/// A date-valued filter on one element of the required data.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRequirementDateFilter {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Additional content defined by implementations
    pub extension: Vec<Extension>,

    /// A date-valued attribute to filter on
    pub path: Option<String>,

    /// A date-valued parameter to search on
    pub search_param: Option<String>,

    /// The value of the filter, as a Period, DateTime, or Duration value
    pub value: Option<DynamicValue>,
}

impl DataRequirementDateFilter {
    /// Types legal for `value[x]`.
    pub const VALUE_TYPES: &'static [DynamicType] = &[
        DynamicType::DateTime,
        DynamicType::Period,
        DynamicType::Duration,
    ];

    /// Create a filter addressed by exactly one of path or searchParam
    /// (drq-2).
    pub fn new(path: Option<String>, search_param: Option<String>) -> Result<Self> {
        if path.is_some() == search_param.is_some() {
            return Err(Error::Invariant(DRQ_PATH_OR_PARAM));
        }
        Ok(Self {
            id: None,
            extension: Vec::new(),
            path,
            search_param,
            value: None,
        })
    }

    pub fn with_value(mut self, value: DynamicValue) -> Result<Self> {
        choice::expect_one_of("value", Self::VALUE_TYPES, &value)?;
        self.value = Some(value);
        Ok(self)
    }
}

impl Serialize for DataRequirementDateFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        json::put_opt(&mut map, "path", &self.path)?;
        json::put_opt(&mut map, "searchParam", &self.search_param)?;
        choice::encode_opt(&mut map, "value", &self.value)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DataRequirementDateFilter {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: json::take_opt(&mut map, "id")?,
            extension: json::take_vec(&mut map, "extension")?,
            path: json::take_opt(&mut map, "path")?,
            search_param: json::take_opt(&mut map, "searchParam")?,
            value: choice::decode(&mut map, "value", Self::VALUE_TYPES)?,
        })
    }
}

/// Specifies the order of the results to be returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequirementSort {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// The name of the attribute to perform the sort
    pub path: String,

    /// ascending | descending
    pub direction: Code,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Period;
    use serde_json::json;

    #[test]
    fn test_code_filter_requires_exactly_one_address() {
        let err = DataRequirementCodeFilter::new(None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Either a path or a searchParam must be provided, but not both"
        );

        let err = DataRequirementCodeFilter::new(
            Some("code".to_string()),
            Some("code".to_string()),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Either a path or a searchParam must be provided, but not both"
        );

        assert!(DataRequirementCodeFilter::new(Some("code".to_string()), None).is_ok());
    }

    #[test]
    fn test_date_filter_value_choice() {
        let filter = DataRequirementDateFilter::new(Some("effective".to_string()), None)
            .unwrap()
            .with_value(DynamicValue::Period(Period::starting(
                "2024-01-01T00:00:00Z",
            )))
            .unwrap();

        let encoded = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            encoded,
            json!({
                "path": "effective",
                "valuePeriod": { "start": "2024-01-01T00:00:00Z" }
            })
        );
        let decoded: DataRequirementDateFilter = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, filter);
    }

    #[test]
    fn test_roundtrip_with_subject() {
        let requirement = DataRequirement::new("Observation")
            .with_subject(DynamicValue::CodeableConcept(
                crate::datatypes::CodeableConcept::text("Patient"),
            ))
            .unwrap();
        let encoded = serde_json::to_value(&requirement).unwrap();
        assert!(encoded.get("subjectCodeableConcept").is_some());
        let decoded: DataRequirement = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, requirement);
    }
}
