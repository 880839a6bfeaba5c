//! FHIR Attachment model

use super::extension::Extension;
use crate::error::{Error, Result};
use crate::primitives::{Base64Binary, Code, DateTime, UnsignedInt, Url};
use serde::{Deserialize, Serialize};

const ATT_1: &str = "If the Attachment has data, it SHALL have a contentType";

/// Content in a format defined elsewhere, inline or by reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Mime type of the content, with charset etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Code>,

    /// Human language of the content (BCP-47)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Code>,

    /// Data inline, base64ed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Base64Binary>,

    /// Uri where the data can be found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,

    /// Number of bytes of content (if url provided)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<UnsignedInt>,

    /// Hash of the data (sha-1, base64ed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Base64Binary>,

    /// Label to display in place of the data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Date attachment was first created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation: Option<DateTime>,
}

impl Attachment {
    /// Create an attachment, enforcing that inline data names its mime type
    /// (att-1).
    pub fn new(content_type: Option<Code>, data: Option<Base64Binary>) -> Result<Self> {
        if data.is_some() && content_type.is_none() {
            return Err(Error::Invariant(ATT_1));
        }
        Ok(Self {
            content_type,
            data,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_requires_content_type() {
        let err = Attachment::new(None, Some(Base64Binary::new("SGVsbG8="))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "If the Attachment has data, it SHALL have a contentType"
        );
    }

    #[test]
    fn test_roundtrip() {
        let attachment = Attachment::new(
            Some(Code::new("image/png")),
            Some(Base64Binary::new("iVBORw0KGgo=")),
        )
        .unwrap();
        let encoded = serde_json::to_value(&attachment).unwrap();
        assert_eq!(
            encoded,
            json!({ "contentType": "image/png", "data": "iVBORw0KGgo=" })
        );
        let decoded: Attachment = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, attachment);
    }
}
