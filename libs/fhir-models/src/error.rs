//! Error types for FHIR models

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A cross-field FHIR "SHALL" rule was violated at construction time.
    ///
    /// The display string is the fixed rule text and is part of the crate
    /// contract: callers and tests match on it verbatim.
    #[error("{0}")]
    Invariant(&'static str),

    /// A choice (`value[x]`) element was given a value whose type is outside
    /// the set the field declares.
    #[error("{field} can only be one of the following: {allowed}")]
    ChoiceTypeMismatch {
        /// Base name of the choice field, e.g. `value` or `deceased`.
        field: String,
        /// Comma-separated capitalized type names, in declaration order.
        allowed: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
