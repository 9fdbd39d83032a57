//! Condition (problem-list) wire model.

use crate::types::{CodeableConcept, Meta, Reference};
use serde::{Deserialize, Serialize};

/// Wire representation of a Condition resource.
///
/// `code.text` may differ from the coding display when an enrichment
/// provider supplied a free-text clinical note; the coding itself always
/// comes from the catalog.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Condition {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(rename = "clinicalStatus")]
    pub clinical_status: CodeableConcept,

    #[serde(rename = "verificationStatus")]
    pub verification_status: CodeableConcept,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<CodeableConcept>,

    pub code: CodeableConcept,

    pub subject: Reference,

    #[serde(rename = "onsetDateTime", skip_serializing_if = "Option::is_none")]
    pub onset_date_time: Option<String>,
}
