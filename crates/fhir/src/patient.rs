//! Patient demographics wire model.
//!
//! Responsibilities:
//! - Define the strict wire shape for a Patient resource as it appears inside
//!   an IPS document bundle
//! - Carry demographics, one national identifier, one home address and the
//!   patient's contact points
//!
//! Notes:
//! - The patient is the subject of every clinical resource in the bundle and
//!   is referenced as `Patient/{id}`

use crate::types::{Address, ContactPoint, HumanName, Identifier, Meta};
use serde::{Deserialize, Serialize};

/// Wire representation of a Patient resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Patient {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(rename = "birthDate", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HumanName;

    #[test]
    fn round_trips_patient_json() {
        let patient = Patient {
            id: "patient-1a2b3c4d".into(),
            meta: Some(Meta::profiled(
                "http://hl7.org/fhir/uv/ips/StructureDefinition/Patient-uv-ips",
            )),
            identifier: vec![Identifier {
                system: "urn:oid:2.16.372.1.2.1.1".into(),
                value: "1234567AB".into(),
            }],
            name: vec![HumanName {
                use_type: Some("official".into()),
                family: Some("Murphy".into()),
                given: vec!["Aoife".into()],
            }],
            gender: Some("female".into()),
            birth_date: Some("1972-05-14".into()),
            address: vec![],
            telecom: vec![],
        };

        let text = serde_json::to_string(&patient).expect("serialise patient");
        let reparsed: Patient = serde_json::from_str(&text).expect("reparse patient");
        assert_eq!(patient, reparsed);
    }

    #[test]
    fn empty_collections_are_omitted() {
        let patient = Patient {
            id: "patient-00000000".into(),
            meta: None,
            identifier: vec![],
            name: vec![],
            gender: None,
            birth_date: None,
            address: vec![],
            telecom: vec![],
        };

        let json = serde_json::to_value(&patient).expect("serialise patient");
        let object = json.as_object().expect("patient is an object");
        assert_eq!(object.keys().count(), 1);
        assert!(object.contains_key("id"));
    }
}
