//! Validation result accumulation

/// A single lexical validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// FHIR primitive type whose grammar was violated, e.g. `"date"`.
    pub type_name: &'static str,

    /// Description of the violated rule.
    pub message: String,

    /// Element path supplied by the caller, e.g. `"Patient.birthDate"`.
    pub location: Option<String>,
}

/// Accumulated result of lexical validation.
///
/// Lexical violations are collected, never raised: an outcome with issues
/// is an ordinary value and the caller decides how to surface it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    /// An empty, passing outcome.
    pub fn passing() -> Self {
        Self::default()
    }

    /// An outcome carrying a single issue.
    pub fn failing(
        type_name: &'static str,
        message: impl Into<String>,
        location: Option<&str>,
    ) -> Self {
        Self {
            issues: vec![ValidationIssue {
                type_name,
                message: message.into(),
                location: location.map(str::to_string),
            }],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: ValidationOutcome) {
        self.issues.extend(other.issues);
    }
}
