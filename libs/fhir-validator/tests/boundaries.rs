//! Boundary cases of the R4 primitive grammars, exercised through the
//! public validation API.

use vitalis_models::{Date, DateTime, DynamicValue, PositiveInt, Uuid};
use vitalis_validator::{validate_primitive, validate_value, ValidatePrimitive};

#[test]
fn date_accepts_partial_precision() {
    for value in ["2021", "2021-11", "2021-11-19"] {
        assert!(
            Date::new(value).validate(None).is_valid(),
            "{value} should be a valid date"
        );
    }
}

#[test]
fn date_rejects_month_13() {
    let outcome = Date::new("2021-13").validate(Some("Patient.birthDate"));
    assert!(!outcome.is_valid());
    assert_eq!(outcome.issues[0].type_name, "date");
    assert_eq!(outcome.issues[0].location.as_deref(), Some("Patient.birthDate"));
}

#[test]
fn date_time_accepts_offset_or_zulu() {
    for value in [
        "2021-11-19T14:30:00Z",
        "2021-11-19T14:30:00+02:00",
        "2021-11-19T14:30:00.250-05:00",
    ] {
        assert!(
            DateTime::new(value).validate(None).is_valid(),
            "{value} should be a valid dateTime"
        );
    }
}

#[test]
fn date_time_rejects_out_of_range_offsets() {
    for value in [
        "2021-11-19T14:30:00+15:00",
        "2021-11-19T14:30:00+14:30",
        "2021-11-19T14:30:00-14:00",
    ] {
        assert!(
            !DateTime::new(value).validate(None).is_valid(),
            "{value} should be rejected"
        );
    }
}

#[test]
fn positive_int_zero_fails_validation_without_raising() {
    // Out-of-range values are ordinary issues, not errors.
    let outcome = validate_primitive(&PositiveInt::new(0), None);
    assert!(!outcome.is_valid());
    assert_eq!(outcome.issues[0].type_name, "positiveInt");

    assert!(validate_primitive(&PositiveInt::new(1), None).is_valid());
}

#[test]
fn dynamic_dispatch_reaches_the_right_validator() {
    let bad_uuid = DynamicValue::Uuid(Uuid::new("not-a-uuid"));
    let outcome = validate_value(&bad_uuid, Some("Bundle.entry[0].fullUrl"));
    assert!(!outcome.is_valid());
    assert_eq!(outcome.issues[0].type_name, "uuid");

    let good = DynamicValue::Uuid(Uuid::new(
        "urn:uuid:53fefa32-fcbb-4ff8-8a92-55ee120877b7",
    ));
    assert!(validate_value(&good, None).is_valid());
}

#[test]
fn absent_primitives_always_pass() {
    let absent: Option<DateTime> = None;
    assert!(absent.validate(Some("Observation.issued")).is_valid());
}
