//! FHIR Extension model
//!
//! Extensions carry the open `value[x]` choice element: any datatype legal
//! in a choice element may appear, so the allowed set is the full suffix
//! table. An extension holds either a value or nested extensions, never
//! both (ext-1).

use crate::choice::{self, DynamicType, DynamicValue};
use crate::error::{Error, Result};
use crate::json;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const EXT_1: &str = "Must have either extensions or value[x], not both";

/// Additional content defined by implementations.
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Nested extensions, exclusive with `value`
    pub extension: Vec<Extension>,

    /// Source of the definition for the extension code
    pub url: String,

    /// Value of extension
    pub value: Option<DynamicValue>,
}

impl Extension {
    /// Types legal for `value[x]`: the whole suffix table.
    pub const VALUE_TYPES: &'static [DynamicType] = DynamicType::ALL;

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            url: url.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: DynamicValue) -> Result<Self> {
        choice::expect_one_of("value", Self::VALUE_TYPES, &value)?;
        if !self.extension.is_empty() {
            return Err(Error::Invariant(EXT_1));
        }
        self.value = Some(value);
        Ok(self)
    }

    pub fn with_extension(mut self, nested: Extension) -> Result<Self> {
        if self.value.is_some() {
            return Err(Error::Invariant(EXT_1));
        }
        self.extension.push(nested);
        Ok(self)
    }
}

impl Serialize for Extension {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        json::put(&mut map, "url", &self.url)?;
        choice::encode_opt(&mut map, "value", &self.value)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: json::take_opt(&mut map, "id")?,
            extension: json::take_vec(&mut map, "extension")?,
            url: json::take(&mut map, "url")?,
            value: choice::decode(&mut map, "value", Self::VALUE_TYPES)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_suffixes_value_key() {
        let ext = Extension::new("http://example.org/fhir/StructureDefinition/confidence")
            .with_value(DynamicValue::String("high".to_string()))
            .unwrap();
        assert_eq!(
            serde_json::to_value(&ext).unwrap(),
            json!({
                "url": "http://example.org/fhir/StructureDefinition/confidence",
                "valueString": "high"
            })
        );
    }

    #[test]
    fn test_roundtrip_with_nested_extensions() {
        let ext = Extension::new("http://example.org/fhir/StructureDefinition/period")
            .with_extension(
                Extension::new("unit")
                    .with_value(DynamicValue::Code("wk".into()))
                    .unwrap(),
            )
            .unwrap();

        let encoded = serde_json::to_value(&ext).unwrap();
        let decoded: Extension = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, ext);
    }

    #[test]
    fn test_value_and_nested_extensions_are_exclusive() {
        let with_value = Extension::new("http://example.org/x")
            .with_value(DynamicValue::Boolean(true))
            .unwrap();
        let err = with_value.with_extension(Extension::new("y")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Must have either extensions or value[x], not both"
        );
    }

    #[test]
    fn test_missing_url_fails_decoding() {
        let err = serde_json::from_value::<Extension>(json!({ "valueBoolean": true }));
        assert!(err.is_err());
    }
}
