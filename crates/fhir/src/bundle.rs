//! Document bundle wire model.
//!
//! A bundle is the outermost container of an IPS document: a `document`-typed
//! resource holding an ordered sequence of `(fullUrl, resource)` entries. The
//! entry payload is a tagged [`Resource`] variant, so every resource knows its
//! own kind from the moment it is parsed; nothing downstream needs to guess
//! from field shapes.

use crate::allergy::AllergyIntolerance;
use crate::composition::Composition;
use crate::condition::Condition;
use crate::immunization::Immunization;
use crate::medication::MedicationStatement;
use crate::observation::Observation;
use crate::patient::Patient;
use crate::procedure::Procedure;
use crate::types::Meta;
use crate::{FhirError, FhirResult};
use serde::{Deserialize, Serialize};

/// Wire representation of a document bundle.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(rename = "type")]
    pub bundle_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

/// One bundle entry: an addressable resource plus its `urn:uuid:` full URL.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BundleEntry {
    #[serde(rename = "fullUrl")]
    pub full_url: String,

    pub resource: Resource,
}

impl BundleEntry {
    /// Wrap a resource in an entry addressed as `urn:uuid:{id}`.
    pub fn local(resource: Resource) -> Self {
        Self {
            full_url: format!("urn:uuid:{}", resource.id()),
            resource,
        }
    }
}

/// Every resource kind that may appear inside an IPS document bundle.
///
/// Serialisation uses the `resourceType` field as the variant tag, which is
/// exactly how FHIR JSON discriminates resources on the wire.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Composition(Composition),
    Patient(Patient),
    AllergyIntolerance(AllergyIntolerance),
    MedicationStatement(MedicationStatement),
    Condition(Condition),
    Immunization(Immunization),
    Procedure(Procedure),
    Observation(Observation),
}

impl Resource {
    /// The resource's logical id.
    pub fn id(&self) -> &str {
        match self {
            Resource::Composition(r) => &r.id,
            Resource::Patient(r) => &r.id,
            Resource::AllergyIntolerance(r) => &r.id,
            Resource::MedicationStatement(r) => &r.id,
            Resource::Condition(r) => &r.id,
            Resource::Immunization(r) => &r.id,
            Resource::Procedure(r) => &r.id,
            Resource::Observation(r) => &r.id,
        }
    }

    /// The FHIR resource type name, matching the wire `resourceType` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Resource::Composition(_) => "Composition",
            Resource::Patient(_) => "Patient",
            Resource::AllergyIntolerance(_) => "AllergyIntolerance",
            Resource::MedicationStatement(_) => "MedicationStatement",
            Resource::Condition(_) => "Condition",
            Resource::Immunization(_) => "Immunization",
            Resource::Procedure(_) => "Procedure",
            Resource::Observation(_) => "Observation",
        }
    }

    /// The `"ResourceType/id"` reference other resources use to point here.
    pub fn local_reference(&self) -> String {
        format!("{}/{}", self.type_name(), self.id())
    }
}

impl Bundle {
    /// Parse a bundle from FHIR JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidInput`] when the JSON is not a Bundle
    /// resource, and [`FhirError::Deserialisation`] when the structure does
    /// not match the wire schema.
    pub fn parse(json_text: &str) -> FhirResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json_text).map_err(FhirError::Deserialisation)?;

        match value.get("resourceType").and_then(|v| v.as_str()) {
            Some("Bundle") => {}
            Some(other) => {
                return Err(FhirError::InvalidInput(format!(
                    "expected resourceType 'Bundle', got '{other}'"
                )));
            }
            None => {
                return Err(FhirError::InvalidInput(
                    "missing resourceType field".into(),
                ));
            }
        }

        serde_json::from_value(value).map_err(FhirError::Deserialisation)
    }

    /// Render the bundle as pretty-printed FHIR JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Serialisation`] if serialisation fails.
    pub fn render(&self) -> FhirResult<String> {
        serde_json::to_string_pretty(self).map_err(FhirError::Serialisation)
    }
}
