//! Shared FHIR R4 datatypes used across resource wire models.
//!
//! These are the building blocks every resource in this crate is assembled
//! from: codings, references, identifiers, names, addresses, contact points
//! and quantities. All structs serialise with FHIR JSON field names and skip
//! optional fields that are absent.

use serde::{Deserialize, Serialize};

/// A (system, code, display) triple identifying a concept in a terminology
/// system.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Coding {
    pub system: String,

    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    /// Build a coding with all three fields populated.
    pub fn new(
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
            display: Some(display.into()),
        }
    }
}

/// A concept expressed as one or more codings plus an optional free-text
/// rendering.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Wrap a single coding without free text.
    pub fn single(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            text: None,
        }
    }

    /// Wrap a single coding with an accompanying free-text rendering.
    pub fn with_text(coding: Coding, text: impl Into<String>) -> Self {
        Self {
            coding: vec![coding],
            text: Some(text.into()),
        }
    }
}

/// A literal reference to another resource, e.g. `"Patient/patient-1a2b3c4d"`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Reference {
    pub reference: String,
}

impl Reference {
    /// Build a `"ResourceType/id"` reference.
    pub fn local(resource_type: &str, id: &str) -> Self {
        Self {
            reference: format!("{resource_type}/{id}"),
        }
    }
}

/// A business identifier bound to a naming system.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Identifier {
    pub system: String,
    pub value: String,
}

/// A human name split into family and given parts.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct HumanName {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,
}

/// A postal address. `state` carries the region (county for Irish
/// addresses) and may be absent.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Address {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(rename = "postalCode", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A phone number or email address with its use context.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ContactPoint {
    pub system: String,

    pub value: String,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,
}

/// A measured amount with unit and UCUM coding.
///
/// The value is carried as a [`serde_json::Number`] so integer quantities
/// (e.g. blood-pressure mmHg) serialise without a decimal point while
/// fractional ones (e.g. glucose mg/dL) keep their decimal place.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Quantity {
    pub value: serde_json::Number,
    pub unit: String,
    pub system: String,
    pub code: String,
}

/// Resource metadata; only the profile claim is used here.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profile: Vec<String>,
}

impl Meta {
    /// Metadata claiming conformance to a single profile.
    pub fn profiled(profile: impl Into<String>) -> Self {
        Self {
            profile: vec![profile.into()],
        }
    }
}
