//! FHIR R4 wire models for IPS document generation.
//!
//! This crate provides **wire models** for the resources an International
//! Patient Summary document contains, plus the shared datatypes they are
//! built from:
//! - JSON serialisation/deserialisation with exact FHIR field names
//! - a tagged resource variant for bundle entries (`resourceType` as the
//!   discriminator)
//! - parse/render helpers for whole document bundles
//!
//! This crate focuses on:
//! - FHIR JSON shape fidelity (the wire format downstream consumers parse)
//! - absent-versus-null discipline: optional fields are omitted, never null
//!
//! It deliberately carries no generation logic; synthesis lives in
//! `ips-core`.

pub mod allergy;
pub mod bundle;
pub mod composition;
pub mod condition;
pub mod immunization;
pub mod medication;
pub mod observation;
pub mod patient;
pub mod procedure;
pub mod types;

// Re-export resource wire models
pub use allergy::AllergyIntolerance;
pub use bundle::{Bundle, BundleEntry, Resource};
pub use composition::{Composition, CompositionSection};
pub use condition::Condition;
pub use immunization::Immunization;
pub use medication::MedicationStatement;
pub use observation::{Observation, ObservationComponent};
pub use patient::Patient;
pub use procedure::Procedure;

// Re-export shared datatypes
pub use types::{
    Address, CodeableConcept, Coding, ContactPoint, HumanName, Identifier, Meta, Quantity,
    Reference,
};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to serialise resource: {0}")]
    Serialisation(serde_json::Error),

    #[error("failed to deserialise resource: {0}")]
    Deserialisation(serde_json::Error),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
