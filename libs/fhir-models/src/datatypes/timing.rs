//! FHIR Timing model
//!
//! The repeat element carries most of the conditional "SHALL" rules of the
//! datatype (tim-1 … tim-10); they are checked by
//! [`TimingRepeat::check_invariants`], which [`Timing::with_repeat`] runs
//! eagerly.

use super::codeable_concept::CodeableConcept;
use super::extension::Extension;
use crate::choice::{self, DynamicType, DynamicValue};
use crate::error::{Error, Result};
use crate::json;
use crate::primitives::{Code, DateTime, Decimal, PositiveInt, Time, UnsignedInt};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A timing schedule that specifies an event that may occur multiple times.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// When the event occurs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<DateTime>,

    /// When the event is to occur
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<TimingRepeat>,

    /// BID | TID | QID | AM | PM | QD | QOD | +
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a repeat specification, checking its conditional rules.
    pub fn with_repeat(mut self, repeat: TimingRepeat) -> Result<Self> {
        repeat.check_invariants()?;
        self.repeat = Some(repeat);
        Ok(self)
    }
}

/// A set of rules that describe when the event is scheduled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimingRepeat {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Additional content defined by implementations
    pub extension: Vec<Extension>,

    /// Length/Range of lengths, or (Start and/or end) limits
    pub bounds: Option<DynamicValue>,

    /// Number of times to repeat
    pub count: Option<PositiveInt>,

    /// Maximum number of times to repeat
    pub count_max: Option<PositiveInt>,

    /// How long when it happens
    pub duration: Option<Decimal>,

    /// How long when it happens (Max)
    pub duration_max: Option<Decimal>,

    /// s | min | h | d | wk | mo | a - unit of time
    pub duration_unit: Option<Code>,

    /// Event occurs frequency times per period
    pub frequency: Option<PositiveInt>,

    /// Event occurs up to frequencyMax times per period
    pub frequency_max: Option<PositiveInt>,

    /// Event occurs frequency times per period
    pub period: Option<Decimal>,

    /// Upper limit of period (3-4 hours)
    pub period_max: Option<Decimal>,

    /// s | min | h | d | wk | mo | a - unit of time
    pub period_unit: Option<Code>,

    /// mon | tue | wed | thu | fri | sat | sun
    pub day_of_week: Vec<Code>,

    /// Time of day for action
    pub time_of_day: Vec<Time>,

    /// Code for time period of occurrence
    pub when: Vec<Code>,

    /// Minutes from event (before or after)
    pub offset: Option<UnsignedInt>,
}

impl TimingRepeat {
    /// Types legal for `bounds[x]`.
    pub const BOUNDS_TYPES: &'static [DynamicType] = &[
        DynamicType::Duration,
        DynamicType::Range,
        DynamicType::Period,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(mut self, bounds: DynamicValue) -> Result<Self> {
        choice::expect_one_of("bounds", Self::BOUNDS_TYPES, &bounds)?;
        self.bounds = Some(bounds);
        Ok(self)
    }

    /// Check the conditional rules that span the optional fields.
    pub fn check_invariants(&self) -> Result<()> {
        let zero = rust_decimal::Decimal::ZERO;
        if self.duration.is_some() && self.duration_unit.is_none() {
            return Err(Error::Invariant(
                "if there's a duration, there needs to be duration units",
            ));
        }
        if self.period.is_some() && self.period_unit.is_none() {
            return Err(Error::Invariant(
                "if there's a period, there needs to be period units",
            ));
        }
        if self.duration.is_some_and(|d| d.value() < zero) {
            return Err(Error::Invariant("duration SHALL be a non-negative value"));
        }
        if self.period.is_some_and(|p| p.value() < zero) {
            return Err(Error::Invariant("period SHALL be a non-negative value"));
        }
        if self.period_max.is_some() && self.period.is_none() {
            return Err(Error::Invariant(
                "If there's a periodMax, there must be a period",
            ));
        }
        if self.duration_max.is_some() && self.duration.is_none() {
            return Err(Error::Invariant(
                "If there's a durationMax, there must be a duration",
            ));
        }
        if self.count_max.is_some() && self.count.is_none() {
            return Err(Error::Invariant(
                "If there's a countMax, there must be a count",
            ));
        }
        if self.offset.is_some() {
            let event_anchored = |code: &Code| {
                matches!(code.as_str(), "C" | "CM" | "CD" | "CV")
            };
            if self.when.is_empty() || self.when.iter().any(event_anchored) {
                return Err(Error::Invariant(
                    "If there's an offset, there must be a when (and not C, CM, CD, CV)",
                ));
            }
        }
        if !self.time_of_day.is_empty() && !self.when.is_empty() {
            return Err(Error::Invariant(
                "If there's a timeOfDay, there cannot be a when, or vice versa",
            ));
        }
        Ok(())
    }
}

impl Serialize for TimingRepeat {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        json::put_opt(&mut map, "id", &self.id)?;
        json::put_vec(&mut map, "extension", &self.extension)?;
        choice::encode_opt(&mut map, "bounds", &self.bounds)?;
        json::put_opt(&mut map, "count", &self.count)?;
        json::put_opt(&mut map, "countMax", &self.count_max)?;
        json::put_opt(&mut map, "duration", &self.duration)?;
        json::put_opt(&mut map, "durationMax", &self.duration_max)?;
        json::put_opt(&mut map, "durationUnit", &self.duration_unit)?;
        json::put_opt(&mut map, "frequency", &self.frequency)?;
        json::put_opt(&mut map, "frequencyMax", &self.frequency_max)?;
        json::put_opt(&mut map, "period", &self.period)?;
        json::put_opt(&mut map, "periodMax", &self.period_max)?;
        json::put_opt(&mut map, "periodUnit", &self.period_unit)?;
        json::put_vec(&mut map, "dayOfWeek", &self.day_of_week)?;
        json::put_vec(&mut map, "timeOfDay", &self.time_of_day)?;
        json::put_vec(&mut map, "when", &self.when)?;
        json::put_opt(&mut map, "offset", &self.offset)?;
        Value::Object(map).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimingRepeat {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: json::take_opt(&mut map, "id")?,
            extension: json::take_vec(&mut map, "extension")?,
            bounds: choice::decode(&mut map, "bounds", Self::BOUNDS_TYPES)?,
            count: json::take_opt(&mut map, "count")?,
            count_max: json::take_opt(&mut map, "countMax")?,
            duration: json::take_opt(&mut map, "duration")?,
            duration_max: json::take_opt(&mut map, "durationMax")?,
            duration_unit: json::take_opt(&mut map, "durationUnit")?,
            frequency: json::take_opt(&mut map, "frequency")?,
            frequency_max: json::take_opt(&mut map, "frequencyMax")?,
            period: json::take_opt(&mut map, "period")?,
            period_max: json::take_opt(&mut map, "periodMax")?,
            period_unit: json::take_opt(&mut map, "periodUnit")?,
            day_of_week: json::take_vec(&mut map, "dayOfWeek")?,
            time_of_day: json::take_vec(&mut map, "timeOfDay")?,
            when: json::take_vec(&mut map, "when")?,
            offset: json::take_opt(&mut map, "offset")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Period;
    use serde_json::json;

    fn three_times_daily() -> TimingRepeat {
        TimingRepeat {
            frequency: Some(PositiveInt::new(3)),
            period: Some("1".parse().unwrap()),
            period_unit: Some(Code::new("d")),
            ..TimingRepeat::new()
        }
    }

    #[test]
    fn test_bounds_period_uses_suffixed_key() {
        let repeat = three_times_daily()
            .with_bounds(DynamicValue::Period(Period::starting(
                "2024-01-01T00:00:00Z",
            )))
            .unwrap();
        let encoded = serde_json::to_value(&repeat).unwrap();
        assert_eq!(
            encoded,
            json!({
                "boundsPeriod": { "start": "2024-01-01T00:00:00Z" },
                "frequency": 3,
                "period": 1,
                "periodUnit": "d"
            })
        );
    }

    #[test]
    fn test_bounds_outside_set_is_rejected() {
        let err = TimingRepeat::new()
            .with_bounds(DynamicValue::Boolean(true))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "bounds can only be one of the following: Duration, Range, Period"
        );
    }

    #[test]
    fn test_period_max_requires_period() {
        let repeat = TimingRepeat {
            period_max: Some("4".parse().unwrap()),
            ..TimingRepeat::new()
        };
        let err = repeat.check_invariants().unwrap_err();
        assert_eq!(
            err.to_string(),
            "If there's a periodMax, there must be a period"
        );
    }

    #[test]
    fn test_duration_requires_units() {
        let repeat = TimingRepeat {
            duration: Some("30".parse().unwrap()),
            ..TimingRepeat::new()
        };
        let err = repeat.check_invariants().unwrap_err();
        assert_eq!(
            err.to_string(),
            "if there's a duration, there needs to be duration units"
        );
    }

    #[test]
    fn test_negative_period_is_rejected() {
        let repeat = TimingRepeat {
            period: Some("-1".parse().unwrap()),
            period_unit: Some(Code::new("d")),
            ..TimingRepeat::new()
        };
        let err = repeat.check_invariants().unwrap_err();
        assert_eq!(err.to_string(), "period SHALL be a non-negative value");
    }

    #[test]
    fn test_offset_requires_compatible_when() {
        let repeat = TimingRepeat {
            offset: Some(UnsignedInt::new(30)),
            when: vec![Code::new("C")],
            ..TimingRepeat::new()
        };
        let err = repeat.check_invariants().unwrap_err();
        assert_eq!(
            err.to_string(),
            "If there's an offset, there must be a when (and not C, CM, CD, CV)"
        );

        let repeat = TimingRepeat {
            offset: Some(UnsignedInt::new(30)),
            when: vec![Code::new("ACM")],
            ..TimingRepeat::new()
        };
        assert!(repeat.check_invariants().is_ok());
    }

    #[test]
    fn test_time_of_day_excludes_when() {
        let repeat = TimingRepeat {
            time_of_day: vec![Time::new("08:00:00")],
            when: vec![Code::new("MORN")],
            ..TimingRepeat::new()
        };
        let err = repeat.check_invariants().unwrap_err();
        assert_eq!(
            err.to_string(),
            "If there's a timeOfDay, there cannot be a when, or vice versa"
        );
    }

    #[test]
    fn test_timing_roundtrip() {
        let timing = Timing::new().with_repeat(three_times_daily()).unwrap();
        let encoded = serde_json::to_value(&timing).unwrap();
        let decoded: Timing = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, timing);
    }
}
