//! FHIR Annotation model

use crate::choice::{self, DynamicType, DynamicValue};
use crate::error::Result;
use crate::json;
use crate::primitives::{DateTime, Markdown};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::extension::Extension;

/// A text note with attribution, attached to a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Additional content defined by implementations
    pub extension: Vec<Extension>,

    /// Individual responsible for the annotation
    pub author: Option<DynamicValue>,

    /// When the annotation was made
    pub time: Option<DateTime>,

    /// The annotation - text content
    pub text: Markdown,
}

impl Annotation {
    /// Types legal for `author[x]`.
    pub const AUTHOR_TYPES: &'static [DynamicType] =
        &[DynamicType::Reference, DynamicType::String];

    pub fn new(text: impl Into<Markdown>) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            author: None,
            time: None,
            text: text.into(),
        }
    }

    pub fn with_author(mut self, author: DynamicValue) -> Result<Self> {
        choice::expect_one_of("author", Self::AUTHOR_TYPES, &author)?;
        self.author = Some(author);
        Ok(self)
    }

    pub fn with_time(mut self, time: impl Into<DateTime>) -> Self {
        self.time = Some(time.into());
        self
    }
}

impl Serialize for Annotation {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        choice::encode_opt(&mut map, "author", &self.author)?;
        json::put_opt(&mut map, "time", &self.time)?;
        json::put(&mut map, "text", &self.text)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Annotation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: json::take_opt(&mut map, "id")?,
            extension: json::take_vec(&mut map, "extension")?,
            author: choice::decode(&mut map, "author", Self::AUTHOR_TYPES)?,
            time: json::take_opt(&mut map, "time")?,
            text: json::take(&mut map, "text")?,
        })
    }
}
