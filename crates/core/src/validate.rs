//! Structural validation of IPS document bundles.
//!
//! These checks mirror the structural contract the assembler guarantees, so
//! they can vet documents produced elsewhere: document-bundle shape,
//! composition-first ordering, required resources, referential closure and
//! pairwise-distinct ids. Findings are split into hard errors and advisory
//! warnings; a bundle is valid when no errors were recorded.

use crate::generator;
use crate::{GeneratorError, GeneratorResult};
use fhir::{Bundle, Resource};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// The outcome of validating one bundle.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: ValidationInfo,
}

/// Descriptive figures collected while validating, for operator output.
#[derive(Clone, Debug, Default)]
pub struct ValidationInfo {
    pub bundle_id: String,
    pub bundle_type: String,
    pub timestamp: Option<String>,
    pub entry_count: usize,
    pub resource_counts: BTreeMap<&'static str, usize>,
    pub section_titles: Vec<String>,
    pub ips_profile: bool,
}

impl ValidationReport {
    /// Whether the bundle passed every hard check.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a parsed bundle.
pub fn validate_bundle(bundle: &Bundle) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.info.bundle_id = bundle.id.clone();
    report.info.bundle_type = bundle.bundle_type.clone();
    report.info.timestamp = bundle.timestamp.clone();
    report.info.entry_count = bundle.entry.len();

    if bundle.bundle_type != "document" {
        report.errors.push(format!(
            "bundle type should be 'document', got '{}'",
            bundle.bundle_type
        ));
        return report;
    }

    if bundle.entry.is_empty() {
        report.errors.push("bundle has no entries".into());
        return report;
    }

    check_entry_order(bundle, &mut report);
    tally_resources(bundle, &mut report);
    check_sections(bundle, &mut report);
    check_unique_ids(bundle, &mut report);
    check_profile(bundle, &mut report);

    report
}

/// Parse JSON text and validate the bundle it contains.
///
/// # Errors
///
/// Returns an error only when the text cannot be parsed as a bundle at all;
/// structural findings land in the report.
pub fn validate_json(json_text: &str) -> GeneratorResult<ValidationReport> {
    let bundle = Bundle::parse(json_text)?;
    Ok(validate_bundle(&bundle))
}

/// Read a file and validate the bundle it contains.
pub fn validate_file(path: &Path) -> GeneratorResult<ValidationReport> {
    let text = std::fs::read_to_string(path).map_err(GeneratorError::FileRead)?;
    validate_json(&text)
}

fn check_entry_order(bundle: &Bundle, report: &mut ValidationReport) {
    if !matches!(bundle.entry[0].resource, Resource::Composition(_)) {
        report
            .warnings
            .push("first entry should be a Composition resource".into());
    }
    if bundle.entry.len() > 1 && !matches!(bundle.entry[1].resource, Resource::Patient(_)) {
        report
            .warnings
            .push("second entry should be the Patient resource".into());
    }
}

fn tally_resources(bundle: &Bundle, report: &mut ValidationReport) {
    for entry in &bundle.entry {
        *report
            .info
            .resource_counts
            .entry(entry.resource.type_name())
            .or_insert(0) += 1;
    }
    for required in ["Composition", "Patient"] {
        if !report.info.resource_counts.contains_key(required) {
            report
                .errors
                .push(format!("missing required resource: {required}"));
        }
    }
}

fn check_sections(bundle: &Bundle, report: &mut ValidationReport) {
    let local_references: HashSet<String> = bundle
        .entry
        .iter()
        .map(|entry| entry.resource.local_reference())
        .collect();

    for entry in &bundle.entry {
        let Resource::Composition(composition) = &entry.resource else {
            continue;
        };
        if composition.section.is_empty() {
            report.warnings.push("composition has no sections".into());
        }
        for section in &composition.section {
            report.info.section_titles.push(section.title.clone());
            if section.entry.is_empty() {
                report
                    .errors
                    .push(format!("section '{}' has no entries", section.title));
            }
            for reference in &section.entry {
                if !local_references.contains(&reference.reference) {
                    report.errors.push(format!(
                        "section '{}' references missing resource {}",
                        section.title, reference.reference
                    ));
                }
            }
        }
    }
}

fn check_unique_ids(bundle: &Bundle, report: &mut ValidationReport) {
    let mut seen = HashSet::new();
    for entry in &bundle.entry {
        let id = entry.resource.id();
        if !seen.insert(id.to_string()) {
            report.errors.push(format!("duplicate resource id: {id}"));
        }
    }
}

fn check_profile(bundle: &Bundle, report: &mut ValidationReport) {
    match &bundle.meta {
        Some(meta) if meta.profile.iter().any(|p| p == generator::PROFILE_BUNDLE) => {
            report.info.ips_profile = true;
        }
        Some(_) => {
            report
                .warnings
                .push("bundle does not declare the IPS profile".into());
        }
        None => {
            report
                .warnings
                .push("bundle meta or profile not specified".into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Locale, ResourceCounts};
    use crate::generator::{Generator, ObservationMode};
    use fhir::Meta;

    fn generated_bundle() -> Bundle {
        Generator::seeded(Locale::EnUs, 21).assemble(
            &ResourceCounts::default(),
            None,
            ObservationMode::VitalSigns,
        )
    }

    #[test]
    fn generated_documents_validate_cleanly() {
        let report = validate_bundle(&generated_bundle());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
        assert!(report.info.ips_profile);
        assert_eq!(report.info.entry_count, 15);
        assert_eq!(report.info.resource_counts["Patient"], 1);
        assert_eq!(report.info.section_titles.len(), 6);
    }

    #[test]
    fn non_document_type_is_fatal() {
        let mut bundle = generated_bundle();
        bundle.bundle_type = "collection".into();
        let report = validate_bundle(&bundle);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("collection"));
    }

    #[test]
    fn empty_bundle_is_fatal() {
        let mut bundle = generated_bundle();
        bundle.entry.clear();
        let report = validate_bundle(&bundle);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("no entries"));
    }

    #[test]
    fn missing_patient_is_reported() {
        let mut bundle = generated_bundle();
        bundle.entry.remove(1);
        let report = validate_bundle(&bundle);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("missing required resource: Patient")));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("second entry")));
    }

    #[test]
    fn dangling_section_reference_is_reported() {
        let mut bundle = generated_bundle();
        // Drop one allergy the composition still points at.
        let index = bundle
            .entry
            .iter()
            .position(|entry| matches!(entry.resource, Resource::AllergyIntolerance(_)))
            .expect("bundle has allergies");
        bundle.entry.remove(index);
        let report = validate_bundle(&bundle);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("references missing resource AllergyIntolerance/")));
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut bundle = generated_bundle();
        let duplicate = bundle.entry[2].clone();
        bundle.entry.push(duplicate);
        let report = validate_bundle(&bundle);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("duplicate resource id")));
    }

    #[test]
    fn missing_profile_is_only_a_warning() {
        let mut bundle = generated_bundle();
        bundle.meta = Some(Meta::profiled("http://example.org/other-profile"));
        let report = validate_bundle(&bundle);
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("does not declare the IPS profile")));

        bundle.meta = None;
        let report = validate_bundle(&bundle);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("meta or profile not specified")));
    }

    #[test]
    fn zero_count_document_warns_about_empty_sections() {
        let bundle = Generator::seeded(Locale::EnUs, 22).assemble(
            &ResourceCounts::none(),
            None,
            ObservationMode::VitalSigns,
        );
        let report = validate_bundle(&bundle);
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("no sections")));
    }

    #[test]
    fn validate_json_round_trips_generated_output() {
        let text = generated_bundle().render().expect("render bundle");
        let report = validate_json(&text).expect("parse and validate");
        assert!(report.is_valid());
    }

    #[test]
    fn validate_json_rejects_non_bundle_payload() {
        let err = validate_json(r#"{"resourceType": "Patient", "id": "p"}"#)
            .expect_err("should reject non-bundle");
        match err {
            GeneratorError::Fhir(_) => {}
            other => panic!("expected Fhir error, got {other:?}"),
        }
    }

    #[test]
    fn entry_order_warnings_fire_when_swapped() {
        let mut bundle = generated_bundle();
        bundle.entry.swap(0, 1);
        let report = validate_bundle(&bundle);
        assert!(report.warnings.iter().any(|w| w.contains("first entry")));
        assert!(report.warnings.iter().any(|w| w.contains("second entry")));
    }

}
