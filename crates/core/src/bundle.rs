//! Document assembly.
//!
//! This module turns one generator's resources into a complete IPS document
//! bundle. The entry order is fixed: composition first, patient second, then
//! the clinical resources grouped by category in section order. Every
//! clinical resource generated here is referenced by exactly one composition
//! section, so the document is referentially closed by construction.

use crate::config::ResourceCounts;
use crate::generator::{self, Generator, ObservationMode};
use crate::sections::{compose_sections, ResourceCategory, SectionEntry};
use crate::{GeneratorError, GeneratorResult};
use fhir::{Bundle, BundleEntry, Meta, Resource};
use std::collections::BTreeMap;
use std::path::Path;

impl Generator {
    /// Assemble one complete IPS document bundle.
    ///
    /// `counts` says how many resources of each category to synthesize,
    /// `patient_id` optionally fixes the patient's logical id, and `mode`
    /// selects the observation shape for the Results section.
    pub fn assemble(
        &mut self,
        counts: &ResourceCounts,
        patient_id: Option<&str>,
        mode: ObservationMode,
    ) -> Bundle {
        let patient = self.generate_patient(patient_id);
        let patient_id = patient.id.clone();

        // Resources are tagged with their category at synthesis time, so
        // grouping into sections never inspects the resource itself.
        let mut clinical: Vec<(ResourceCategory, Resource)> = Vec::with_capacity(counts.total());
        for _ in 0..counts.allergies {
            clinical.push((
                ResourceCategory::Allergy,
                Resource::AllergyIntolerance(self.generate_allergy(&patient_id)),
            ));
        }
        for _ in 0..counts.medications {
            clinical.push((
                ResourceCategory::Medication,
                Resource::MedicationStatement(self.generate_medication(&patient_id)),
            ));
        }
        for _ in 0..counts.conditions {
            clinical.push((
                ResourceCategory::Condition,
                Resource::Condition(self.generate_condition(&patient_id)),
            ));
        }
        for _ in 0..counts.immunizations {
            clinical.push((
                ResourceCategory::Immunization,
                Resource::Immunization(self.generate_immunization(&patient_id)),
            ));
        }
        for _ in 0..counts.procedures {
            clinical.push((
                ResourceCategory::Procedure,
                Resource::Procedure(self.generate_procedure(&patient_id)),
            ));
        }
        for _ in 0..counts.observations {
            clinical.push((
                ResourceCategory::Observation,
                Resource::Observation(self.generate_observation(&patient_id, mode)),
            ));
        }

        let section_entries: Vec<SectionEntry> = clinical
            .iter()
            .map(|(category, resource)| SectionEntry {
                category: *category,
                reference: resource.local_reference(),
            })
            .collect();
        let composition =
            self.generate_composition(&patient_id, compose_sections(&section_entries));

        let mut entries = Vec::with_capacity(2 + clinical.len());
        entries.push(BundleEntry::local(Resource::Composition(composition)));
        entries.push(BundleEntry::local(Resource::Patient(patient)));
        entries.extend(
            clinical
                .into_iter()
                .map(|(_, resource)| BundleEntry::local(resource)),
        );

        Bundle {
            resource_type: "Bundle".into(),
            id: self.resource_id("ips-bundle"),
            meta: Some(Meta::profiled(generator::PROFILE_BUNDLE)),
            bundle_type: "document".into(),
            timestamp: Some(generator::now_timestamp()),
            entry: entries,
        }
    }
}

/// Render a bundle and write it to `path`.
///
/// # Errors
///
/// Serialisation failures surface before anything touches the filesystem, so
/// a failed save never leaves a partial document behind.
pub fn save_bundle(bundle: &Bundle, path: &Path) -> GeneratorResult<()> {
    let text = bundle.render()?;
    std::fs::write(path, text).map_err(GeneratorError::FileWrite)
}

/// Summary figures for a generated document, for operator-facing output.
#[derive(Clone, Debug)]
pub struct BundleStats {
    pub bundle_id: String,
    pub timestamp: Option<String>,
    pub entries: usize,
    pub resource_counts: BTreeMap<&'static str, usize>,
}

impl BundleStats {
    /// Tally a bundle's entries by resource type.
    pub fn of(bundle: &Bundle) -> Self {
        let mut resource_counts = BTreeMap::new();
        for entry in &bundle.entry {
            *resource_counts.entry(entry.resource.type_name()).or_insert(0) += 1;
        }
        Self {
            bundle_id: bundle.id.clone(),
            timestamp: bundle.timestamp.clone(),
            entries: bundle.entry.len(),
            resource_counts,
        }
    }
}
