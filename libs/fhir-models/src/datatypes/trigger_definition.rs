//! FHIR TriggerDefinition model

use super::data_requirement::DataRequirement;
use super::expression::Expression;
use super::extension::Extension;
use crate::choice::{self, DynamicType, DynamicValue};
use crate::error::{Error, Result};
use crate::json;
use crate::primitives::Code;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const TRD_1: &str = "Either timing, or a data requirement, but not both";
const TRD_2: &str = "A condition only if there is a data requirement";
const TRD_3: &str =
    "A named event requires a name, a periodic event requires timing, and a data event requires data";

/// Defines an expected trigger for a module.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerDefinition {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Additional content defined by implementations
    pub extension: Vec<Extension>,

    /// named-event | periodic | data-changed | data-added | data-modified |
    /// data-removed | data-accessed | data-access-ended
    pub type_: Code,

    /// Name or URI that identifies the event
    pub name: Option<String>,

    /// Timing of the event
    pub timing: Option<DynamicValue>,

    /// Triggering data of the event (multiple = 'and')
    pub data: Vec<DataRequirement>,

    /// Whether the event triggers (boolean expression)
    pub condition: Option<Expression>,
}

impl TriggerDefinition {
    /// Types legal for `timing[x]`.
    pub const TIMING_TYPES: &'static [DynamicType] = &[
        DynamicType::Timing,
        DynamicType::Reference,
        DynamicType::Date,
        DynamicType::DateTime,
    ];

    pub fn new(type_: impl Into<Code>) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            type_: type_.into(),
            name: None,
            timing: None,
            data: Vec::new(),
            condition: None,
        }
    }

    /// Attach the event timing; exclusive with data requirements (trd-1).
    pub fn with_timing(mut self, timing: DynamicValue) -> Result<Self> {
        choice::expect_one_of("timing", Self::TIMING_TYPES, &timing)?;
        if !self.data.is_empty() {
            return Err(Error::Invariant(TRD_1));
        }
        self.timing = Some(timing);
        Ok(self)
    }

    /// Attach a data requirement; exclusive with timing (trd-1).
    pub fn with_data(mut self, data: DataRequirement) -> Result<Self> {
        if self.timing.is_some() {
            return Err(Error::Invariant(TRD_1));
        }
        self.data.push(data);
        Ok(self)
    }

    /// Attach a condition, which only data-triggered events allow (trd-2).
    pub fn with_condition(mut self, condition: Expression) -> Result<Self> {
        if self.data.is_empty() {
            return Err(Error::Invariant(TRD_2));
        }
        self.condition = Some(condition);
        Ok(self)
    }

    /// Check the per-event-kind requirements (trd-3). Span fields that are
    /// set incrementally, so this runs on the assembled value.
    pub fn check_invariants(&self) -> Result<()> {
        let satisfied = match self.type_.as_str() {
            "named-event" => self.name.is_some(),
            "periodic" => self.timing.is_some(),
            t if t.starts_with("data-") => !self.data.is_empty(),
            _ => true,
        };
        if !satisfied {
            return Err(Error::Invariant(TRD_3));
        }
        Ok(())
    }
}

impl Serialize for TriggerDefinition {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        json::put(&mut map, "type", &self.type_)?;
        json::put_opt(&mut map, "name", &self.name)?;
        choice::encode_opt(&mut map, "timing", &self.timing)?;
        json::put_vec(&mut map, "data", &self.data)?;
        json::put_opt(&mut map, "condition", &self.condition)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TriggerDefinition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: json::take_opt(&mut map, "id")?,
            extension: json::take_vec(&mut map, "extension")?,
            type_: json::take(&mut map, "type")?,
            name: json::take_opt(&mut map, "name")?,
            timing: choice::decode(&mut map, "timing", Self::TIMING_TYPES)?,
            data: json::take_vec(&mut map, "data")?,
            condition: json::take_opt(&mut map, "condition")?,
        })
    }
}
