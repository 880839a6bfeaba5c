//! Helpers for hand-written FHIR JSON (de)serialization
//!
//! Most models derive `Serialize`/`Deserialize`. Types with a choice
//! (`value[x]`) element implement both by hand on top of an ordered
//! `serde_json::Map` instead, using the helpers here. Insertion order is
//! emission order, so fields serialize in declaration order; absent options
//! and empty collections are never written.

use serde::de::DeserializeOwned;
use serde::{de, ser, Serialize};
use serde_json::{Map, Value};

pub(crate) fn put<T, E>(map: &mut Map<String, Value>, key: &str, value: &T) -> Result<(), E>
where
    T: Serialize,
    E: ser::Error,
{
    let encoded = serde_json::to_value(value).map_err(E::custom)?;
    map.insert(key.to_string(), encoded);
    Ok(())
}

pub(crate) fn put_opt<T, E>(
    map: &mut Map<String, Value>,
    key: &str,
    value: &Option<T>,
) -> Result<(), E>
where
    T: Serialize,
    E: ser::Error,
{
    if let Some(value) = value {
        put(map, key, value)?;
    }
    Ok(())
}

pub(crate) fn put_vec<T, E>(map: &mut Map<String, Value>, key: &str, values: &[T]) -> Result<(), E>
where
    T: Serialize,
    E: ser::Error,
{
    if !values.is_empty() {
        put(map, key, &values)?;
    }
    Ok(())
}

pub(crate) fn take_opt<T, E>(map: &mut Map<String, Value>, key: &str) -> Result<Option<T>, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    match map.remove(key) {
        Some(raw) => serde_json::from_value(raw)
            .map(Some)
            .map_err(|e| E::custom(format!("{key}: {e}"))),
        None => Ok(None),
    }
}

pub(crate) fn take<T, E>(map: &mut Map<String, Value>, key: &str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    take_opt(map, key)?.ok_or_else(|| E::custom(format!("missing field `{key}`")))
}

pub(crate) fn take_vec<T, E>(map: &mut Map<String, Value>, key: &str) -> Result<Vec<T>, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    Ok(take_opt(map, key)?.unwrap_or_default())
}

/// Consume and verify the `resourceType` discriminator of a resource object.
/// An absent discriminator is tolerated and filled in with `expected`.
pub(crate) fn resource_type<E>(map: &mut Map<String, Value>, expected: &str) -> Result<String, E>
where
    E: de::Error,
{
    match map.remove("resourceType") {
        Some(Value::String(rt)) if rt == expected => Ok(rt),
        Some(Value::String(rt)) => Err(E::custom(format!(
            "expected resourceType '{expected}', found '{rt}'"
        ))),
        Some(_) => Err(E::custom("resourceType must be a string")),
        None => Ok(expected.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type JsonError = serde_json::Error;

    #[test]
    fn test_put_skips_nothing_put_opt_skips_none() {
        let mut map = Map::new();
        put::<_, JsonError>(&mut map, "status", &"final").unwrap();
        put_opt::<String, JsonError>(&mut map, "id", &None).unwrap();
        put_vec::<String, JsonError>(&mut map, "note", &[]).unwrap();
        assert_eq!(Value::Object(map), json!({ "status": "final" }));
    }

    #[test]
    fn test_take_reports_missing_required_field() {
        let mut map = Map::new();
        let err = take::<String, JsonError>(&mut map, "status").unwrap_err();
        assert!(err.to_string().contains("missing field `status`"));
    }

    #[test]
    fn test_take_vec_defaults_to_empty() {
        let mut map = Map::new();
        let values: Vec<String> = take_vec::<String, JsonError>(&mut map, "note").unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_resource_type_mismatch_is_an_error() {
        let Value::Object(mut map) = json!({ "resourceType": "Observation" }) else {
            unreachable!()
        };
        let err = resource_type::<JsonError>(&mut map, "Patient").unwrap_err();
        assert!(err.to_string().contains("expected resourceType 'Patient'"));
    }
}
