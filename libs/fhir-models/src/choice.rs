//! Choice type (`value[x]`) support
//!
//! Many FHIR elements accept one value out of a closed set of datatypes.
//! The JSON encoding carries no discriminator field; instead the element
//! name is suffixed with the capitalized type name (`valueString`,
//! `onsetDateTime`, `deceasedBoolean`). [`DynamicValue`] is the in-memory
//! (type tag, value) pair and this module maps it onto that wire
//! convention:
//!
//! - [`encode`] writes `field + suffix(tag)` into a JSON object,
//! - [`decode`] scans a JSON object for the one permissible suffixed key,
//! - [`expect_one_of`] rejects tags outside a field's declared set with the
//!   fixed `"<field> can only be one of the following: …"` message.

use crate::datatypes::{
    Address, Age, Annotation, Attachment, CodeableConcept, Coding, ContactDetail, ContactPoint,
    Count, DataRequirement, Distance, Duration, Expression, HumanName, Identifier, Meta, Money,
    Period, Quantity, Range, Ratio, Reference, SampledData, Signature, Timing, TriggerDefinition,
    UsageContext,
};
use crate::error::{Error, Result};
use crate::primitives::{
    Base64Binary, Canonical, Code, Date, DateTime, Decimal, Id, Instant, Markdown, Oid,
    PositiveInt, Time, UnsignedInt, Uri, Url, Uuid,
};
use serde::{de, ser};
use serde_json::{Map, Value};
use std::fmt;

macro_rules! dynamic_types {
    ($(($variant:ident, $payload:ty, $suffix:literal),)+) => {
        /// Type tag of a choice (`[x]`) element.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum DynamicType {
            $($variant,)+
        }

        /// A runtime (type tag, value) pair for a choice (`[x]`) element.
        #[derive(Debug, Clone, PartialEq)]
        pub enum DynamicValue {
            $($variant($payload),)+
        }

        impl DynamicType {
            /// Every type that may appear in some choice element. This is the
            /// closed suffix table: a `field + suffix` key is recognized on
            /// decode exactly when its suffix is listed here.
            pub const ALL: &'static [DynamicType] = &[$(DynamicType::$variant,)+];

            /// Capitalized JSON key suffix for this type, e.g. `"DateTime"`.
            pub const fn suffix(self) -> &'static str {
                match self {
                    $(DynamicType::$variant => $suffix,)+
                }
            }

            fn decode_value(self, raw: Value) -> serde_json::Result<DynamicValue> {
                Ok(match self {
                    $(DynamicType::$variant => {
                        DynamicValue::$variant(serde_json::from_value(raw)?)
                    })+
                })
            }
        }

        impl DynamicValue {
            /// Tag of the carried value.
            pub fn dynamic_type(&self) -> DynamicType {
                match self {
                    $(DynamicValue::$variant(_) => DynamicType::$variant,)+
                }
            }

            fn encode_value(&self) -> serde_json::Result<Value> {
                match self {
                    $(DynamicValue::$variant(value) => serde_json::to_value(value),)+
                }
            }
        }

        $(
            impl From<$payload> for DynamicValue {
                fn from(value: $payload) -> Self {
                    DynamicValue::$variant(value)
                }
            }
        )+
    };
}

dynamic_types! {
    (Base64Binary, Base64Binary, "Base64Binary"),
    (Boolean, bool, "Boolean"),
    (Canonical, Canonical, "Canonical"),
    (Code, Code, "Code"),
    (Date, Date, "Date"),
    (DateTime, DateTime, "DateTime"),
    (Decimal, Decimal, "Decimal"),
    (Id, Id, "Id"),
    (Instant, Instant, "Instant"),
    (Integer, i32, "Integer"),
    (Markdown, Markdown, "Markdown"),
    (Oid, Oid, "Oid"),
    (PositiveInt, PositiveInt, "PositiveInt"),
    (String, String, "String"),
    (Time, Time, "Time"),
    (UnsignedInt, UnsignedInt, "UnsignedInt"),
    (Uri, Uri, "Uri"),
    (Url, Url, "Url"),
    (Uuid, Uuid, "Uuid"),
    (Address, Address, "Address"),
    (Age, Age, "Age"),
    (Annotation, Box<Annotation>, "Annotation"),
    (Attachment, Attachment, "Attachment"),
    (CodeableConcept, CodeableConcept, "CodeableConcept"),
    (Coding, Coding, "Coding"),
    (ContactDetail, ContactDetail, "ContactDetail"),
    (ContactPoint, ContactPoint, "ContactPoint"),
    (Count, Count, "Count"),
    (DataRequirement, Box<DataRequirement>, "DataRequirement"),
    (Distance, Distance, "Distance"),
    (Duration, Duration, "Duration"),
    (Expression, Expression, "Expression"),
    (HumanName, HumanName, "HumanName"),
    (Identifier, Identifier, "Identifier"),
    (Meta, Meta, "Meta"),
    (Money, Money, "Money"),
    (Period, Period, "Period"),
    (Quantity, Quantity, "Quantity"),
    (Range, Range, "Range"),
    (Ratio, Ratio, "Ratio"),
    (Reference, Reference, "Reference"),
    (SampledData, SampledData, "SampledData"),
    (Signature, Signature, "Signature"),
    (Timing, Box<Timing>, "Timing"),
    (TriggerDefinition, Box<TriggerDefinition>, "TriggerDefinition"),
    (UsageContext, Box<UsageContext>, "UsageContext"),
}

// The boxed variants break the size cycle between `DynamicValue` and the
// datatypes that themselves carry a choice element; plain-value `From`s are
// still provided for them.
impl From<Annotation> for DynamicValue {
    fn from(value: Annotation) -> Self {
        DynamicValue::Annotation(Box::new(value))
    }
}

impl From<DataRequirement> for DynamicValue {
    fn from(value: DataRequirement) -> Self {
        DynamicValue::DataRequirement(Box::new(value))
    }
}

impl From<Timing> for DynamicValue {
    fn from(value: Timing) -> Self {
        DynamicValue::Timing(Box::new(value))
    }
}

impl From<TriggerDefinition> for DynamicValue {
    fn from(value: TriggerDefinition) -> Self {
        DynamicValue::TriggerDefinition(Box::new(value))
    }
}

impl From<UsageContext> for DynamicValue {
    fn from(value: UsageContext) -> Self {
        DynamicValue::UsageContext(Box::new(value))
    }
}

impl fmt::Display for DynamicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

fn allowed_names(allowed: &[DynamicType]) -> String {
    let names: Vec<&str> = allowed.iter().map(|t| t.suffix()).collect();
    names.join(", ")
}

/// Check a choice value against the set of types `field` declares.
///
/// The error message is fixed contract text:
/// `"<field> can only be one of the following: <T1>, <T2>, …"`.
pub fn expect_one_of(field: &str, allowed: &[DynamicType], value: &DynamicValue) -> Result<()> {
    if allowed.contains(&value.dynamic_type()) {
        return Ok(());
    }
    Err(Error::ChoiceTypeMismatch {
        field: field.to_string(),
        allowed: allowed_names(allowed),
    })
}

/// Encode a choice value into `map` under the suffixed key for its tag.
pub fn encode<E>(
    map: &mut Map<String, Value>,
    field: &str,
    value: &DynamicValue,
) -> std::result::Result<(), E>
where
    E: ser::Error,
{
    let encoded = value.encode_value().map_err(E::custom)?;
    map.insert(
        format!("{field}{}", value.dynamic_type().suffix()),
        encoded,
    );
    Ok(())
}

pub(crate) fn encode_opt<E>(
    map: &mut Map<String, Value>,
    field: &str,
    value: &Option<DynamicValue>,
) -> std::result::Result<(), E>
where
    E: ser::Error,
{
    if let Some(value) = value {
        encode(map, field, value)?;
    }
    Ok(())
}

/// Decode the choice element `field` from `map`.
///
/// Takes the first key matching `field + suffix(tag)` for a permissible
/// tag, in declaration order of `allowed`; no such key means the element is
/// absent. A key whose suffix names a known type outside the permissible
/// set is a structural error, reported with the same fixed message the
/// construction check uses.
pub fn decode<E>(
    map: &mut Map<String, Value>,
    field: &str,
    allowed: &[DynamicType],
) -> std::result::Result<Option<DynamicValue>, E>
where
    E: de::Error,
{
    let mut found = None;
    for tag in allowed {
        let key = format!("{field}{}", tag.suffix());
        if let Some(raw) = map.remove(&key) {
            found = Some(tag.decode_value(raw).map_err(E::custom)?);
            break;
        }
    }

    for key in map.keys() {
        if let Some(rest) = key.strip_prefix(field) {
            let out_of_set = DynamicType::ALL
                .iter()
                .any(|t| t.suffix() == rest && !allowed.contains(t));
            if out_of_set {
                return Err(E::custom(format!(
                    "{field} can only be one of the following: {}",
                    allowed_names(allowed)
                )));
            }
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type JsonError = serde_json::Error;

    #[test]
    fn test_suffix_table() {
        assert_eq!(DynamicType::String.suffix(), "String");
        assert_eq!(DynamicType::DateTime.suffix(), "DateTime");
        assert_eq!(DynamicType::CodeableConcept.suffix(), "CodeableConcept");
        assert_eq!(DynamicType::DateTime.to_string(), "DateTime");
    }

    #[test]
    fn test_encode_uses_suffixed_key() {
        let mut map = Map::new();
        let value = DynamicValue::String("tablet".to_string());
        encode::<JsonError>(&mut map, "value", &value).unwrap();
        assert_eq!(Value::Object(map), json!({ "valueString": "tablet" }));
    }

    #[test]
    fn test_decode_recovers_tag_from_suffix() {
        let Value::Object(mut map) = json!({ "valueBoolean": true, "id": "x" }) else {
            unreachable!()
        };
        let decoded = decode::<JsonError>(
            &mut map,
            "value",
            &[DynamicType::Boolean, DynamicType::String],
        )
        .unwrap();
        assert_eq!(decoded, Some(DynamicValue::Boolean(true)));
        // The suffixed key is consumed, unrelated keys are left alone.
        assert!(!map.contains_key("valueBoolean"));
        assert!(map.contains_key("id"));
    }

    #[test]
    fn test_decode_absent_field_is_none() {
        let Value::Object(mut map) = json!({ "status": "final" }) else {
            unreachable!()
        };
        let decoded =
            decode::<JsonError>(&mut map, "value", &[DynamicType::String]).unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_decode_rejects_known_suffix_outside_allowed_set() {
        let Value::Object(mut map) = json!({ "deceasedAge": { "value": 63 } }) else {
            unreachable!()
        };
        let err = decode::<JsonError>(
            &mut map,
            "deceased",
            &[DynamicType::Boolean, DynamicType::DateTime],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "deceased can only be one of the following: Boolean, DateTime"
        );
    }

    #[test]
    fn test_decode_ignores_unknown_suffixes() {
        // "Set" is not a type suffix; "valueSet" must not be mistaken for a
        // choice key of the "value" element.
        let Value::Object(mut map) = json!({ "valueSet": "http://example.org/vs" }) else {
            unreachable!()
        };
        let decoded =
            decode::<JsonError>(&mut map, "value", &[DynamicType::String]).unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_expect_one_of_message_is_verbatim() {
        let err = expect_one_of(
            "value",
            &[DynamicType::Reference, DynamicType::String],
            &DynamicValue::Boolean(true),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "value can only be one of the following: Reference, String"
        );
    }

    #[test]
    fn test_from_impls_pick_the_matching_tag() {
        assert_eq!(
            DynamicValue::from(true).dynamic_type(),
            DynamicType::Boolean
        );
        assert_eq!(
            DynamicValue::from("text".to_string()).dynamic_type(),
            DynamicType::String
        );
        assert_eq!(DynamicValue::from(4).dynamic_type(), DynamicType::Integer);
    }
}
