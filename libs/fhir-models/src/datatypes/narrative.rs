//! FHIR Narrative model

use super::extension::Extension;
use crate::primitives::Code;
use serde::{Deserialize, Serialize};

/// Human-readable summary of a resource, as a limited XHTML fragment.
///
/// The div content is carried as an opaque string; XHTML well-formedness is
/// not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// generated | extensions | additional | empty
    pub status: Code,

    /// Limited xhtml content
    pub div: String,
}

impl Narrative {
    pub fn generated(div: impl Into<String>) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            status: Code::new("generated"),
            div: div.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roundtrip() {
        let narrative =
            Narrative::generated("<div xmlns=\"http://www.w3.org/1999/xhtml\">Example</div>");
        let encoded = serde_json::to_value(&narrative).unwrap();
        assert_eq!(
            encoded,
            json!({
                "status": "generated",
                "div": "<div xmlns=\"http://www.w3.org/1999/xhtml\">Example</div>"
            })
        );
        let decoded: Narrative = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, narrative);
    }
}
