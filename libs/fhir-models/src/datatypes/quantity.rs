//! FHIR Quantity family: Quantity, Age, Count, Distance, Duration, Money,
//! Range and Ratio
//!
//! The constrained quantity subtypes (Age, Count, Distance, Duration) share
//! the Quantity shape but add their own "SHALL" rules: a value requires a
//! code, and the system, when present, must be UCUM. The rules are enforced
//! by the constructors; the error strings are fixed contract text.

use super::extension::Extension;
use crate::error::{Error, Result};
use crate::primitives::{Code, Decimal, Uri};
use serde::{Deserialize, Serialize};

/// The UCUM code system, the fixed system for constrained quantities.
pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";

const QTY_3: &str = "If a code for the unit is present, the system SHALL also be present";
const UCUM_REQUIRED: &str = "If system is present, it SHALL be UCUM";
const CNT_3: &str = "There SHALL be a code with a value of \"1\" if there is a value";

/// A measured or measurable amount.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Numerical value (with implicit precision)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,

    /// < | <= | >= | > - how to understand the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Code>,

    /// Unit representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// System that defines coded unit form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Uri>,

    /// Coded form of the unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

impl Quantity {
    /// Create a quantity, enforcing that a coded unit names its system
    /// (qty-3).
    pub fn new(
        value: Option<Decimal>,
        unit: Option<String>,
        system: Option<Uri>,
        code: Option<Code>,
    ) -> Result<Self> {
        if code.is_some() && system.is_none() {
            return Err(Error::Invariant(QTY_3));
        }
        Ok(Self {
            value,
            unit,
            system,
            code,
            ..Self::default()
        })
    }

    /// Create a UCUM-coded quantity such as `8.3 mmol/L`.
    pub fn ucum(value: Decimal, unit: impl Into<String>, code: impl Into<Code>) -> Self {
        Self {
            value: Some(value),
            unit: Some(unit.into()),
            system: Some(Uri::new(UCUM_SYSTEM)),
            code: Some(code.into()),
            ..Self::default()
        }
    }
}

macro_rules! constrained_quantity {
    ($(#[$meta:meta])* $name:ident, $code_rule:expr, $code_check:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            /// Unique id for inter-element referencing
            #[serde(skip_serializing_if = "Option::is_none")]
            pub id: Option<String>,

            /// Additional content defined by implementations
            #[serde(default, skip_serializing_if = "Vec::is_empty")]
            pub extension: Vec<Extension>,

            /// Numerical value (with implicit precision)
            #[serde(skip_serializing_if = "Option::is_none")]
            pub value: Option<Decimal>,

            /// < | <= | >= | > - how to understand the value
            #[serde(skip_serializing_if = "Option::is_none")]
            pub comparator: Option<Code>,

            /// Unit representation
            #[serde(skip_serializing_if = "Option::is_none")]
            pub unit: Option<String>,

            /// System that defines coded unit form
            #[serde(skip_serializing_if = "Option::is_none")]
            pub system: Option<Uri>,

            /// Coded form of the unit
            #[serde(skip_serializing_if = "Option::is_none")]
            pub code: Option<Code>,
        }

        impl $name {
            /// Create the quantity, enforcing the subtype rules: a value
            /// requires a code, and the system, when present, is UCUM.
            pub fn new(
                value: Option<Decimal>,
                system: Option<Uri>,
                code: Option<Code>,
            ) -> Result<Self> {
                let code_ok: fn(&Code) -> bool = $code_check;
                if value.is_some() && !code.as_ref().is_some_and(code_ok) {
                    return Err(Error::Invariant($code_rule));
                }
                if system.as_ref().is_some_and(|s| s.as_str() != UCUM_SYSTEM) {
                    return Err(Error::Invariant(UCUM_REQUIRED));
                }
                Ok(Self {
                    value,
                    system,
                    code,
                    ..Self::default()
                })
            }

            pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
                self.unit = Some(unit.into());
                self
            }
        }
    };
}

constrained_quantity!(
    /// A duration of time during which an organism has existed.
    Age,
    "There SHALL be a code if there is a value",
    |_| true
);
constrained_quantity!(
    /// A measured amount of discrete items; the coded unit is fixed to "1".
    Count,
    CNT_3,
    |code| code.as_str() == "1"
);
constrained_quantity!(
    /// A length - a value with a distance unit.
    Distance,
    "There SHALL be a code if there is a value",
    |_| true
);
constrained_quantity!(
    /// A length of time with a UCUM time unit.
    Duration,
    "There SHALL be a code if there is a value",
    |_| true
);

/// An amount of economic utility in some recognized currency.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Numerical value (with implicit precision)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,

    /// ISO 4217 currency code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Code>,
}

impl Money {
    pub fn new(value: Decimal, currency: impl Into<Code>) -> Self {
        Self {
            value: Some(value),
            currency: Some(currency.into()),
            ..Self::default()
        }
    }
}

/// A set of ordered quantities defined by a low and high limit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Low limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    /// High limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,
}

impl Range {
    pub fn new(low: Option<Quantity>, high: Option<Quantity>) -> Self {
        Self {
            low,
            high,
            ..Self::default()
        }
    }
}

const RAT_BOTH: &str = "numerator and denominator SHALL both be present, or both absent";
const RAT_EXTENSION: &str = "extension required if no numerator and denominator";

/// A relationship between two Quantity values expressed as a ratio.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratio {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Numerator value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerator: Option<Quantity>,

    /// Denominator value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denominator: Option<Quantity>,
}

impl Ratio {
    /// Create a ratio from its two parts. Both must be present or both
    /// absent; the empty form requires an extension instead (use
    /// [`Ratio::from_extensions`]).
    pub fn new(numerator: Option<Quantity>, denominator: Option<Quantity>) -> Result<Self> {
        match (&numerator, &denominator) {
            (None, None) => Err(Error::Invariant(RAT_EXTENSION)),
            (Some(_), None) | (None, Some(_)) => Err(Error::Invariant(RAT_BOTH)),
            (Some(_), Some(_)) => Ok(Self {
                numerator,
                denominator,
                ..Self::default()
            }),
        }
    }

    /// Create the empty ratio form, carried entirely by extensions.
    pub fn from_extensions(extension: Vec<Extension>) -> Result<Self> {
        if extension.is_empty() {
            return Err(Error::Invariant(RAT_EXTENSION));
        }
        Ok(Self {
            extension,
            ..Self::default()
        })
    }
}
