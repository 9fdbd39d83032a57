//! Static coding catalog for clinical concept selection.
//!
//! All data in this module is hardcoded and fictional-but-plausible: a small
//! pool of real terminology codes per clinical category that the synthesizers
//! draw from uniformly at random. The catalog is read-only after
//! construction.
//!
//! Locale behaviour: for the Irish locale the condition list is the base list
//! concatenated with an Irish-population supplement, and selection stays
//! uniform over the combined list. The skew this introduces against the base
//! entries is intentional and preserved as-is.

use crate::config::Locale;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const SNOMED: &str = "http://snomed.info/sct";
pub const RXNORM: &str = "http://www.nlm.nih.gov/research/umls/rxnorm";
pub const CVX: &str = "http://hl7.org/fhir/sid/cvx";
pub const LOINC: &str = "http://loinc.org";
pub const UCUM: &str = "http://unitsofmeasure.org";

/// One candidate coding: a (system, code, display) triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeEntry {
    pub system: &'static str,
    pub code: &'static str,
    pub display: &'static str,
}

const fn snomed(code: &'static str, display: &'static str) -> CodeEntry {
    CodeEntry {
        system: SNOMED,
        code,
        display,
    }
}

pub const ALLERGIES: [CodeEntry; 5] = [
    snomed("227493005", "Cashew nuts"),
    snomed("300916003", "Latex allergy"),
    snomed("91935009", "Allergy to peanuts"),
    snomed("293586001", "Allergy to penicillin"),
    snomed("419199007", "Allergy to substance"),
];

pub const MEDICATIONS: [CodeEntry; 5] = [
    CodeEntry {
        system: RXNORM,
        code: "318272",
        display: "Metformin 500mg",
    },
    CodeEntry {
        system: RXNORM,
        code: "197361",
        display: "Lisinopril 10mg",
    },
    CodeEntry {
        system: RXNORM,
        code: "1049221",
        display: "Atorvastatin 20mg",
    },
    CodeEntry {
        system: RXNORM,
        code: "855332",
        display: "Levothyroxine 50mcg",
    },
    CodeEntry {
        system: RXNORM,
        code: "309362",
        display: "Omeprazole 20mg",
    },
];

pub const CONDITIONS: [CodeEntry; 5] = [
    snomed("44054006", "Type 2 Diabetes Mellitus"),
    snomed("38341003", "Hypertension"),
    snomed("13644009", "Hypercholesterolemia"),
    snomed("195967001", "Asthma"),
    snomed("40055000", "Chronic sinusitis"),
];

/// Conditions over-represented in the Irish population, appended to
/// [`CONDITIONS`] for the Irish locale.
pub const CONDITIONS_IE: [CodeEntry; 4] = [
    snomed("13645005", "Chronic obstructive pulmonary disease"),
    snomed("49601007", "Cardiovascular disease"),
    snomed("363406005", "Colon cancer"),
    snomed("74400008", "Appendicitis"),
];

pub const IMMUNIZATIONS: [CodeEntry; 5] = [
    CodeEntry {
        system: CVX,
        code: "207",
        display: "COVID-19 vaccine",
    },
    CodeEntry {
        system: CVX,
        code: "141",
        display: "Influenza vaccine",
    },
    CodeEntry {
        system: CVX,
        code: "113",
        display: "Td (adult) vaccine",
    },
    CodeEntry {
        system: CVX,
        code: "133",
        display: "Pneumococcal conjugate vaccine",
    },
    CodeEntry {
        system: CVX,
        code: "121",
        display: "Zoster vaccine",
    },
];

pub const PROCEDURES: [CodeEntry; 5] = [
    snomed("80146002", "Appendectomy"),
    snomed("265764009", "Renal dialysis"),
    snomed("71388002", "Procedure"),
    snomed("86198006", "Cesarean section"),
    snomed("232717009", "Coronary artery bypass grafting"),
];

/// SNOMED severity scale used for condition severity.
pub const SEVERITIES: [CodeEntry; 3] = [
    snomed("255604002", "Mild"),
    snomed("371923003", "Moderate"),
    snomed("6736007", "Severe"),
];

/// Counties used as the address region for Irish patients.
pub const IRISH_COUNTIES: [&str; 18] = [
    "Dublin",
    "Cork",
    "Galway",
    "Limerick",
    "Waterford",
    "Kilkenny",
    "Wexford",
    "Kerry",
    "Clare",
    "Tipperary",
    "Mayo",
    "Donegal",
    "Kildare",
    "Wicklow",
    "Meath",
    "Louth",
    "Sligo",
    "Westmeath",
];

/// The national-identifier naming system for a locale.
///
/// Irish patients carry a PPS number; the default locale uses the generic
/// national-identifier OID the original data set was built around.
pub fn identifier_system(locale: Locale) -> &'static str {
    match locale {
        Locale::EnIe => "urn:oid:2.16.372.1.2.1.1",
        Locale::EnUs => "urn:oid:2.16.840.1.113883.2.4.6.3",
    }
}

/// The catalog view resolved for one locale.
///
/// Holds the locale-extended condition list; the other category tables are
/// locale-independent and borrowed from the static tables above.
#[derive(Clone, Debug)]
pub struct Catalog {
    conditions: Vec<CodeEntry>,
}

impl Catalog {
    /// Resolve the catalog for a locale.
    pub fn for_locale(locale: Locale) -> Self {
        let mut conditions = CONDITIONS.to_vec();
        if locale.is_irish() {
            conditions.extend_from_slice(&CONDITIONS_IE);
        }
        Self { conditions }
    }

    pub fn allergy(&self, rng: &mut StdRng) -> CodeEntry {
        pick(rng, &ALLERGIES)
    }

    pub fn medication(&self, rng: &mut StdRng) -> CodeEntry {
        pick(rng, &MEDICATIONS)
    }

    pub fn condition(&self, rng: &mut StdRng) -> CodeEntry {
        pick(rng, &self.conditions)
    }

    pub fn immunization(&self, rng: &mut StdRng) -> CodeEntry {
        pick(rng, &IMMUNIZATIONS)
    }

    pub fn procedure(&self, rng: &mut StdRng) -> CodeEntry {
        pick(rng, &PROCEDURES)
    }

    pub fn severity(&self, rng: &mut StdRng) -> CodeEntry {
        pick(rng, &SEVERITIES)
    }

    /// The condition list active for this catalog's locale.
    pub fn conditions(&self) -> &[CodeEntry] {
        &self.conditions
    }
}

fn pick(rng: &mut StdRng, entries: &[CodeEntry]) -> CodeEntry {
    *entries.choose(rng).expect("catalog tables are non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn base_catalog_has_five_conditions() {
        let catalog = Catalog::for_locale(Locale::EnUs);
        assert_eq!(catalog.conditions().len(), 5);
    }

    #[test]
    fn irish_catalog_extends_conditions() {
        let catalog = Catalog::for_locale(Locale::EnIe);
        assert_eq!(catalog.conditions().len(), 9);
        // Base entries come first, supplements after.
        assert_eq!(catalog.conditions()[0].display, "Type 2 Diabetes Mellitus");
        assert_eq!(catalog.conditions()[5].code, "13645005");
    }

    #[test]
    fn irish_selection_reaches_both_base_and_extension() {
        let catalog = Catalog::for_locale(Locale::EnIe);
        let mut rng = StdRng::seed_from_u64(7);
        let mut saw_base = false;
        let mut saw_extension = false;
        for _ in 0..200 {
            let entry = catalog.condition(&mut rng);
            if CONDITIONS.contains(&entry) {
                saw_base = true;
            }
            if CONDITIONS_IE.contains(&entry) {
                saw_extension = true;
            }
        }
        assert!(saw_base, "base conditions should remain selectable");
        assert!(saw_extension, "Irish supplement should be selectable");
    }

    #[test]
    fn severity_scale_is_snomed_coded() {
        for severity in SEVERITIES {
            assert_eq!(severity.system, SNOMED);
        }
        assert_eq!(SEVERITIES[0].display, "Mild");
        assert_eq!(SEVERITIES[2].display, "Severe");
    }

    #[test]
    fn identifier_systems_differ_per_locale() {
        assert_eq!(identifier_system(Locale::EnIe), "urn:oid:2.16.372.1.2.1.1");
        assert_eq!(
            identifier_system(Locale::EnUs),
            "urn:oid:2.16.840.1.113883.2.4.6.3"
        );
    }
}
