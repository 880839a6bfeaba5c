//! FHIR Signature model

use super::codeable_concept::Coding;
use super::extension::Extension;
use super::reference::Reference;
use crate::primitives::{Base64Binary, Code, Instant};
use serde::{Deserialize, Serialize};

/// A digital signature along with supporting context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Indication of the reason the entity signed the object(s)
    #[serde(rename = "type")]
    pub type_: Vec<Coding>,

    /// When the signature was created
    pub when: Instant,

    /// Who signed
    pub who: Reference,

    /// The party represented
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<Reference>,

    /// The technical format of the signed resources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_format: Option<Code>,

    /// The technical format of the signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sig_format: Option<Code>,

    /// The actual signature content (XML DigSig, JWS, picture, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Base64Binary>,
}

impl Signature {
    pub fn new(type_: Vec<Coding>, when: impl Into<Instant>, who: Reference) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            type_,
            when: when.into(),
            who,
            on_behalf_of: None,
            target_format: None,
            sig_format: None,
            data: None,
        }
    }
}
