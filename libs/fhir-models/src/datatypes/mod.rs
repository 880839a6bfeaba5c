//! FHIR R4 complex datatypes
//!
//! Reusable aggregates of primitives, choice values and nested composites.
//! Cross-field "SHALL" rules are enforced by the constructors; parsing is
//! deliberately lenient about them (the wire may carry data produced before
//! the rules existed), but choice elements are always checked against their
//! allowed type set.

pub mod address;
pub mod annotation;
pub mod attachment;
pub mod codeable_concept;
pub mod contact_point;
pub mod data_requirement;
pub mod expression;
pub mod extension;
pub mod human_name;
pub mod identifier;
pub mod meta;
pub mod narrative;
pub mod period;
pub mod quantity;
pub mod reference;
pub mod sampled_data;
pub mod signature;
pub mod timing;
pub mod trigger_definition;
pub mod usage_context;

pub use address::Address;
pub use annotation::Annotation;
pub use attachment::Attachment;
pub use codeable_concept::{CodeableConcept, Coding};
pub use contact_point::{ContactDetail, ContactPoint};
pub use data_requirement::{
    DataRequirement, DataRequirementCodeFilter, DataRequirementDateFilter, DataRequirementSort,
};
pub use expression::Expression;
pub use extension::Extension;
pub use human_name::HumanName;
pub use identifier::Identifier;
pub use meta::Meta;
pub use narrative::Narrative;
pub use period::Period;
pub use quantity::{
    Age, Count, Distance, Duration, Money, Quantity, Range, Ratio, UCUM_SYSTEM,
};
pub use reference::Reference;
pub use sampled_data::SampledData;
pub use signature::Signature;
pub use timing::{Timing, TimingRepeat};
pub use trigger_definition::TriggerDefinition;
pub use usage_context::UsageContext;
