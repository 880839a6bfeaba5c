//! FHIR UsageContext model

use super::codeable_concept::Coding;
use super::extension::Extension;
use crate::choice::{self, DynamicType, DynamicValue};
use crate::error::Result;
use crate::json;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Describes the context that the content is intended to support.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageContext {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Additional content defined by implementations
    pub extension: Vec<Extension>,

    /// Type of context being specified
    pub code: Coding,

    /// Value that defines the context
    pub value: DynamicValue,
}

impl UsageContext {
    /// Types legal for `value[x]`.
    pub const VALUE_TYPES: &'static [DynamicType] = &[
        DynamicType::CodeableConcept,
        DynamicType::Quantity,
        DynamicType::Range,
        DynamicType::Reference,
    ];

    pub fn new(code: Coding, value: DynamicValue) -> Result<Self> {
        choice::expect_one_of("value", Self::VALUE_TYPES, &value)?;
        Ok(Self {
            id: None,
            extension: Vec::new(),
            code,
            value,
        })
    }
}

impl Serialize for UsageContext {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        json::put(&mut map, "code", &self.code)?;
        choice::encode(&mut map, "value", &self.value)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UsageContext {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let id = json::take_opt(&mut map, "id")?;
        let extension = json::take_vec(&mut map, "extension")?;
        let code = json::take(&mut map, "code")?;
        let value = choice::decode(&mut map, "value", Self::VALUE_TYPES)?
            .ok_or_else(|| D::Error::custom("missing field `value[x]`"))?;
        Ok(Self {
            id,
            extension,
            code,
            value,
        })
    }
}
