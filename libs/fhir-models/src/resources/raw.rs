//! Fallback carrier for resources outside the typed set
//!
//! A resource whose `resourceType` is not implemented still round-trips
//! losslessly: the whole object is kept as an ordered map of raw JSON
//! values, so re-encoding reproduces the input byte for byte (key order
//! included - `serde_json` is built with `preserve_order`). The common
//! Resource fields are exposed through accessors instead of struct fields;
//! lifting them out of the map would lose their original position.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An unrecognized resource, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResource {
    fields: Map<String, Value>,
}

impl RawResource {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The `resourceType` discriminator, if present.
    pub fn resource_type(&self) -> Option<&str> {
        self.fields.get("resourceType").and_then(Value::as_str)
    }

    /// Logical id of the resource.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// Metadata about the resource, as raw JSON.
    pub fn meta(&self) -> Option<&Value> {
        self.fields.get("meta")
    }

    /// A set of rules under which this content was created.
    pub fn implicit_rules(&self) -> Option<&str> {
        self.fields.get("implicitRules").and_then(Value::as_str)
    }

    /// Language of the resource content.
    pub fn language(&self) -> Option<&str> {
        self.fields.get("language").and_then(Value::as_str)
    }

    /// Any field by name, as raw JSON.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The full ordered field map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
