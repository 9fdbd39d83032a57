//! Procedure wire model.

use crate::types::{CodeableConcept, Meta, Reference};
use serde::{Deserialize, Serialize};

/// Wire representation of a Procedure resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Procedure {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    pub status: String,

    pub code: CodeableConcept,

    pub subject: Reference,

    #[serde(rename = "performedDateTime", skip_serializing_if = "Option::is_none")]
    pub performed_date_time: Option<String>,
}
