//! FHIR Expression model

use super::extension::Extension;
use crate::primitives::{Code, Id, Uri};
use serde::{Deserialize, Serialize};

/// An expression that can be used to generate a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Natural language description of the condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Short name assigned to expression for reuse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Id>,

    /// text/cql | text/fhirpath | application/x-fhir-query | etc.
    pub language: Code,

    /// Expression in specified language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// Where the expression is found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Uri>,
}

impl Expression {
    pub fn fhirpath(expression: impl Into<String>) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            description: None,
            name: None,
            language: Code::new("text/fhirpath"),
            expression: Some(expression.into()),
            reference: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roundtrip() {
        let expr = Expression::fhirpath("value.exists()");
        let encoded = serde_json::to_value(&expr).unwrap();
        assert_eq!(
            encoded,
            json!({ "language": "text/fhirpath", "expression": "value.exists()" })
        );
        let decoded: Expression = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, expr);
    }
}
