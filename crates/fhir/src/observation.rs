//! Observation wire model.
//!
//! Covers both shapes the generator emits: a vital-signs panel whose
//! measurements live in `component` entries, and a single laboratory result
//! carried in `valueQuantity`.

use crate::types::{CodeableConcept, Meta, Quantity, Reference};
use serde::{Deserialize, Serialize};

/// Wire representation of an Observation resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Observation {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    pub status: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    pub code: CodeableConcept,

    pub subject: Reference,

    #[serde(rename = "effectiveDateTime", skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,

    #[serde(rename = "valueQuantity", skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Quantity>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component: Vec<ObservationComponent>,
}

/// One component measurement of a panel observation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ObservationComponent {
    pub code: CodeableConcept,

    #[serde(rename = "valueQuantity", skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Quantity>,
}
