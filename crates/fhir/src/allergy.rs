//! AllergyIntolerance wire model.

use crate::types::{CodeableConcept, Meta, Reference};
use serde::{Deserialize, Serialize};

/// Wire representation of an AllergyIntolerance resource.
///
/// Clinical and verification status are carried as codeable concepts with
/// codings from the HL7 terminology code systems; category and criticality
/// are plain FHIR code strings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AllergyIntolerance {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(rename = "clinicalStatus")]
    pub clinical_status: CodeableConcept,

    #[serde(rename = "verificationStatus")]
    pub verification_status: CodeableConcept,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub criticality: Option<String>,

    pub code: CodeableConcept,

    pub patient: Reference,

    #[serde(rename = "onsetDateTime", skip_serializing_if = "Option::is_none")]
    pub onset_date_time: Option<String>,
}
