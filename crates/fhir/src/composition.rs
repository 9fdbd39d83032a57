//! Composition wire model.
//!
//! The composition is the document's table of contents: it references the
//! patient as subject and author and organises the clinical resources into
//! titled, LOINC-coded sections. Section entries are `"ResourceType/id"`
//! references that must resolve within the surrounding bundle.

use crate::types::{CodeableConcept, Meta, Reference};
use serde::{Deserialize, Serialize};

/// Wire representation of a Composition resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Composition {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    pub status: String,

    #[serde(rename = "type")]
    pub type_code: CodeableConcept,

    pub subject: Reference,

    pub date: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<Reference>,

    pub title: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section: Vec<CompositionSection>,
}

/// One titled section of the composition.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CompositionSection {
    pub title: String,

    pub code: CodeableConcept,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<Reference>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coding;

    #[test]
    fn type_field_serialises_as_fhir_type() {
        let composition = Composition {
            id: "composition-0badcafe".into(),
            meta: None,
            status: "final".into(),
            type_code: CodeableConcept::single(Coding::new(
                "http://loinc.org",
                "60591-5",
                "Patient summary Document",
            )),
            subject: Reference::local("Patient", "patient-1a2b3c4d"),
            date: "2026-08-06T00:00:00+00:00".into(),
            author: vec![Reference::local("Patient", "patient-1a2b3c4d")],
            title: "International Patient Summary".into(),
            section: vec![],
        };

        let json = serde_json::to_value(&composition).expect("serialise composition");
        assert_eq!(json["type"]["coding"][0]["code"], "60591-5");
        assert!(json.get("section").is_none());
    }
}
