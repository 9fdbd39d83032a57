//! Immunization wire model.

use crate::types::{CodeableConcept, Meta, Reference};
use serde::{Deserialize, Serialize};

/// Wire representation of an Immunization resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Immunization {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    pub status: String,

    #[serde(rename = "vaccineCode")]
    pub vaccine_code: CodeableConcept,

    pub patient: Reference,

    #[serde(
        rename = "occurrenceDateTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub occurrence_date_time: Option<String>,
}
