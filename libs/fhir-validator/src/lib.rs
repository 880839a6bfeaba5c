//! Lexical validators for FHIR R4 primitive types
//!
//! Primitives in `vitalis-models` are constructed without checks; this
//! crate is the separate validation pass. Each constrained primitive has a
//! grammar - a regex from the R4 specification or a numeric range - and
//! validating a value yields a [`ValidationOutcome`] carrying zero or more
//! [`ValidationIssue`]s with optional location context. Lexical violations
//! are never raised as errors; construction-time invariants live with the
//! models themselves.
//!
//! # Example
//!
//! ```rust
//! use vitalis_models::Date;
//! use vitalis_validator::ValidatePrimitive;
//!
//! let outcome = Date::new("2021-13").validate(Some("Patient.birthDate"));
//! assert!(!outcome.is_valid());
//! assert_eq!(outcome.issues[0].type_name, "date");
//! ```

mod outcome;
mod primitive;
mod rules;

pub use outcome::{ValidationIssue, ValidationOutcome};
pub use primitive::{validate_primitive, validate_value, ValidatePrimitive};
