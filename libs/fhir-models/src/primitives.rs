//! FHIR primitive types
//!
//! Thin immutable wrappers around the scalar value of each FHIR primitive.
//! Construction never fails: lexical grammars (regexes, numeric ranges) are
//! checked by the `vitalis-validator` crate as a separate pass, so a wrapper
//! may hold a value that does not conform to its grammar.
//!
//! `boolean`, `integer` and `string` carry no grammar of their own and map
//! onto plain Rust types.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// FHIR `boolean`.
pub type Boolean = bool;

/// FHIR `integer` (32-bit signed).
pub type Integer = i32;

macro_rules! string_primitive {
    ($(#[$meta:meta])* $name:ident, $fhir_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// FHIR type name as it appears in structure definitions.
            pub const NAME: &'static str = $fhir_name;

            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_primitive!(
    /// FHIR `base64Binary` - base64 content, kept in its encoded form.
    Base64Binary,
    "base64Binary"
);
string_primitive!(
    /// FHIR `canonical` - a URI referring to a canonical URL.
    Canonical,
    "canonical"
);
string_primitive!(
    /// FHIR `code` - a string taken from a controlled set.
    Code,
    "code"
);
string_primitive!(
    /// FHIR `date` - year, year-month or full date, no time zone.
    Date,
    "date"
);
string_primitive!(
    /// FHIR `dateTime` - partial or full timestamp; a time requires an offset.
    DateTime,
    "dateTime"
);
string_primitive!(
    /// FHIR `id` - up to 64 letters, digits, `-` and `.`.
    Id,
    "id"
);
string_primitive!(
    /// FHIR `instant` - a fully specified timestamp with offset.
    Instant,
    "instant"
);
string_primitive!(
    /// FHIR `markdown` - GFM-flavored markdown text.
    Markdown,
    "markdown"
);
string_primitive!(
    /// FHIR `oid` - an OID in `urn:oid:` form.
    Oid,
    "oid"
);
string_primitive!(
    /// FHIR `time` - a time of day, no date, no offset.
    Time,
    "time"
);
string_primitive!(
    /// FHIR `uri`.
    Uri,
    "uri"
);
string_primitive!(
    /// FHIR `url` - a uri restricted to dereferencable locations.
    Url,
    "url"
);
string_primitive!(
    /// FHIR `uuid` - a UUID in `urn:uuid:` form.
    Uuid,
    "uuid"
);

macro_rules! int_primitive {
    ($(#[$meta:meta])* $name:ident, $fhir_name:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// FHIR type name as it appears in structure definitions.
            pub const NAME: &'static str = $fhir_name;

            pub fn new(value: i32) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

int_primitive!(
    /// FHIR `positiveInt` - an integer that is required to be `> 0`.
    ///
    /// The range rule is a validation rule, not a construction rule, so the
    /// wrapper can hold out-of-range values.
    PositiveInt,
    "positiveInt"
);
int_primitive!(
    /// FHIR `unsignedInt` - an integer that is required to be `>= 0`.
    UnsignedInt,
    "unsignedInt"
);

/// FHIR `decimal`.
///
/// Backed by [`rust_decimal::Decimal`] so the written precision survives a
/// round-trip: `2.0` stays `2.0`, not `2`. Encoded as a JSON number, never a
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal(rust_decimal::Decimal);

impl Decimal {
    /// FHIR type name as it appears in structure definitions.
    pub const NAME: &'static str = "decimal";

    pub fn new(value: rust_decimal::Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> rust_decimal::Decimal {
        self.0
    }
}

impl From<rust_decimal::Decimal> for Decimal {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self(value)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self(rust_decimal::Decimal::from(value))
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self(rust_decimal::Decimal::from(value))
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        rust_decimal::Decimal::from_str(s)
            .or_else(|_| rust_decimal::Decimal::from_scientific(s))
            .map(Self)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number = serde_json::Number::from_str(&self.0.to_string())
            .map_err(serde::ser::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = serde_json::Number::deserialize(deserializer)?;
        Self::from_str(&number.to_string()).map_err(de::Error::custom)
    }
}
