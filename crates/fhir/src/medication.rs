//! MedicationStatement wire model.

use crate::types::{CodeableConcept, Meta, Reference};
use serde::{Deserialize, Serialize};

/// Wire representation of a MedicationStatement resource.
///
/// The medication itself is inlined as a codeable concept
/// (`medicationCodeableConcept`) rather than referencing a separate
/// Medication resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MedicationStatement {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    pub status: String,

    #[serde(rename = "medicationCodeableConcept")]
    pub medication_codeable_concept: CodeableConcept,

    pub subject: Reference,

    #[serde(rename = "effectiveDateTime", skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,
}
