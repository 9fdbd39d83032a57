//! Composition section layout.
//!
//! An IPS composition organises its clinical entries into six fixed,
//! LOINC-coded sections. Section order is part of the document contract and
//! never varies; a category with no entries is omitted entirely rather than
//! rendered empty.

use crate::catalog;
use fhir::{CodeableConcept, Coding, CompositionSection, Reference};

/// The clinical categories a document can carry, in section order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceCategory {
    Allergy,
    Medication,
    Condition,
    Immunization,
    Procedure,
    Observation,
}

impl ResourceCategory {
    /// All categories in the order their sections appear in the composition
    /// and their resources appear in the bundle.
    pub const ORDER: [ResourceCategory; 6] = [
        ResourceCategory::Allergy,
        ResourceCategory::Medication,
        ResourceCategory::Condition,
        ResourceCategory::Immunization,
        ResourceCategory::Procedure,
        ResourceCategory::Observation,
    ];

    /// The FHIR resource type this category's entries have.
    pub fn resource_type(self) -> &'static str {
        match self {
            ResourceCategory::Allergy => "AllergyIntolerance",
            ResourceCategory::Medication => "MedicationStatement",
            ResourceCategory::Condition => "Condition",
            ResourceCategory::Immunization => "Immunization",
            ResourceCategory::Procedure => "Procedure",
            ResourceCategory::Observation => "Observation",
        }
    }

    /// The section's human-readable title.
    pub fn section_title(self) -> &'static str {
        match self {
            ResourceCategory::Allergy => "Allergies and Intolerances",
            ResourceCategory::Medication => "Medication Summary",
            ResourceCategory::Condition => "Problem List",
            ResourceCategory::Immunization => "History of Immunizations",
            ResourceCategory::Procedure => "History of Procedures",
            ResourceCategory::Observation => "Results",
        }
    }

    fn section_code(self) -> (&'static str, &'static str) {
        match self {
            ResourceCategory::Allergy => ("48765-2", "Allergies and adverse reactions Document"),
            ResourceCategory::Medication => ("10160-0", "History of Medication use Narrative"),
            ResourceCategory::Condition => ("11450-4", "Problem list - Reported"),
            ResourceCategory::Immunization => ("11369-6", "History of Immunization Narrative"),
            ResourceCategory::Procedure => ("47519-4", "History of Procedures Document"),
            ResourceCategory::Observation => {
                ("30954-2", "Relevant diagnostic tests/laboratory data Narrative")
            }
        }
    }
}

/// One clinical resource's membership in a section: its category plus the
/// local reference the section entry will carry.
#[derive(Clone, Debug)]
pub struct SectionEntry {
    pub category: ResourceCategory,
    pub reference: String,
}

impl SectionEntry {
    pub fn new(category: ResourceCategory, id: &str) -> Self {
        Self {
            category,
            reference: format!("{}/{id}", category.resource_type()),
        }
    }
}

/// Build the composition sections for the given entries.
///
/// Sections come out in [`ResourceCategory::ORDER`] regardless of the order
/// entries are supplied in, and categories without entries produce no
/// section.
pub fn compose_sections(entries: &[SectionEntry]) -> Vec<CompositionSection> {
    ResourceCategory::ORDER
        .into_iter()
        .filter_map(|category| {
            let references: Vec<Reference> = entries
                .iter()
                .filter(|entry| entry.category == category)
                .map(|entry| Reference {
                    reference: entry.reference.clone(),
                })
                .collect();
            if references.is_empty() {
                return None;
            }
            let (code, display) = category.section_code();
            Some(CompositionSection {
                title: category.section_title().to_string(),
                code: CodeableConcept::single(Coding::new(catalog::LOINC, code, display)),
                entry: references,
            })
        })
        .collect()
}
