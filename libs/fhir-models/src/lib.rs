//! FHIR R4 data models
//!
//! This crate provides strongly-typed Rust structures for FHIR R4
//! resources and datatypes, with (de)serialization that follows the FHIR
//! JSON encoding rules.
//!
//! # Module Organization
//!
//! - `primitives`: wrappers for the FHIR primitive types
//! - `datatypes`: reusable complex datatypes (CodeableConcept, Quantity, …)
//! - `resources`: typed resources plus a lossless raw fallback
//! - `choice`: the choice type (`value[x]`) tag set and JSON codec
//!
//! # Design Philosophy
//!
//! - **Immutable value objects**: no shared state, value equality
//! - **Invariants at construction**: cross-field "SHALL" rules fail the
//!   constructor, never produce a half-valid object
//! - **Lenient parsing**: unknown fields are ignored on typed models,
//!   unknown resources are preserved verbatim
//! - **Suffix-encoded choices**: `value[x]` elements use the capitalized
//!   type suffix on the wire (`valueQuantity`, `onsetDateTime`), with the
//!   legal subset checked per field
//!
//! # Example
//!
//! ```rust
//! use vitalis_models::datatypes::{CodeableConcept, Coding, Quantity};
//! use vitalis_models::resources::Observation;
//! use vitalis_models::DynamicValue;
//!
//! let observation = Observation::new(
//!     "final",
//!     CodeableConcept::new(Coding::new("http://loinc.org", "15074-8")),
//! )
//! .with_value(DynamicValue::Quantity(Quantity::ucum(
//!     "6.3".parse().unwrap(),
//!     "mmol/l",
//!     "mmol/L",
//! )))
//! .unwrap();
//!
//! let json = serde_json::to_value(&observation).unwrap();
//! assert!(json.get("valueQuantity").is_some());
//! ```

pub mod choice;
pub mod datatypes;
pub mod error;
mod json;
pub mod primitives;
pub mod resources;

// Re-export commonly used types
pub use choice::{DynamicType, DynamicValue};
pub use error::{Error, Result};
pub use primitives::*;
pub use resources::{RawResource, Resource};
