//! Per-primitive validators and the dispatch entry point

use crate::outcome::ValidationOutcome;
use crate::rules;
use regex::Regex;
use vitalis_models::{
    Base64Binary, Canonical, Code, Date, DateTime, DynamicValue, Id, Instant, Oid, PositiveInt,
    Time, UnsignedInt, Uri, Url, Uuid,
};

/// Lexical validation of a single FHIR primitive.
///
/// Implementations only constrain the value that is present; requiredness
/// is a structural concern, so an absent value (`Option::None`) always
/// passes.
pub trait ValidatePrimitive {
    /// FHIR primitive type name, e.g. `"positiveInt"`.
    const TYPE_NAME: &'static str;

    fn validate(&self, location: Option<&str>) -> ValidationOutcome;
}

impl<T: ValidatePrimitive> ValidatePrimitive for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn validate(&self, location: Option<&str>) -> ValidationOutcome {
        match self {
            Some(value) => value.validate(location),
            None => ValidationOutcome::passing(),
        }
    }
}

fn check_pattern(
    type_name: &'static str,
    pattern: &Regex,
    value: &str,
    location: Option<&str>,
) -> ValidationOutcome {
    if pattern.is_match(value) {
        ValidationOutcome::passing()
    } else {
        ValidationOutcome::failing(
            type_name,
            format!("'{value}' is not a valid {type_name}"),
            location,
        )
    }
}

macro_rules! pattern_validator {
    ($type:ty, $pattern:expr) => {
        impl ValidatePrimitive for $type {
            const TYPE_NAME: &'static str = <$type>::NAME;

            fn validate(&self, location: Option<&str>) -> ValidationOutcome {
                check_pattern(Self::TYPE_NAME, &$pattern, self.as_str(), location)
            }
        }
    };
}

pattern_validator!(Base64Binary, rules::BASE64_BINARY);
pattern_validator!(Canonical, rules::URI);
pattern_validator!(Code, rules::CODE);
pattern_validator!(Date, rules::DATE);
pattern_validator!(DateTime, rules::DATE_TIME);
pattern_validator!(Id, rules::ID);
pattern_validator!(Instant, rules::INSTANT);
pattern_validator!(Oid, rules::OID);
pattern_validator!(Time, rules::TIME);
pattern_validator!(Uri, rules::URI);
pattern_validator!(Url, rules::URI);
pattern_validator!(Uuid, rules::UUID);

impl ValidatePrimitive for PositiveInt {
    const TYPE_NAME: &'static str = PositiveInt::NAME;

    fn validate(&self, location: Option<&str>) -> ValidationOutcome {
        if self.value() > 0 {
            ValidationOutcome::passing()
        } else {
            ValidationOutcome::failing(
                Self::TYPE_NAME,
                format!("{} is not a valid positiveInt", self.value()),
                location,
            )
        }
    }
}

impl ValidatePrimitive for UnsignedInt {
    const TYPE_NAME: &'static str = UnsignedInt::NAME;

    fn validate(&self, location: Option<&str>) -> ValidationOutcome {
        if self.value() >= 0 {
            ValidationOutcome::passing()
        } else {
            ValidationOutcome::failing(
                Self::TYPE_NAME,
                format!("{} is not a valid unsignedInt", self.value()),
                location,
            )
        }
    }
}

/// Validate any primitive instance against its grammar.
pub fn validate_primitive<T: ValidatePrimitive>(
    value: &T,
    location: Option<&str>,
) -> ValidationOutcome {
    value.validate(location)
}

/// Validate a choice value against the grammar of its primitive type.
///
/// Tags with no lexical constraints - booleans, strings, integers,
/// decimals and every complex datatype - yield an empty, passing outcome.
pub fn validate_value(value: &DynamicValue, location: Option<&str>) -> ValidationOutcome {
    match value {
        DynamicValue::Base64Binary(v) => v.validate(location),
        DynamicValue::Canonical(v) => v.validate(location),
        DynamicValue::Code(v) => v.validate(location),
        DynamicValue::Date(v) => v.validate(location),
        DynamicValue::DateTime(v) => v.validate(location),
        DynamicValue::Id(v) => v.validate(location),
        DynamicValue::Instant(v) => v.validate(location),
        DynamicValue::Oid(v) => v.validate(location),
        DynamicValue::PositiveInt(v) => v.validate(location),
        DynamicValue::Time(v) => v.validate(location),
        DynamicValue::UnsignedInt(v) => v.validate(location),
        DynamicValue::Uri(v) => v.validate(location),
        DynamicValue::Url(v) => v.validate(location),
        DynamicValue::Uuid(v) => v.validate(location),
        _ => ValidationOutcome::passing(),
    }
}
