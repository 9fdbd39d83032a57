//! Generator configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into the generator. The intent is to reject bad
//! input (an unsupported locale tag) before any synthesis begins, and to make
//! invalid resource counts unrepresentable.

use crate::{GeneratorError, GeneratorResult};
use std::fmt;
use std::str::FromStr;

/// The locales the generator can produce data for.
///
/// `EnIe` activates the Irish catalog extensions: supplemental conditions,
/// county-based address regions and the PPS identifier system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locale {
    /// Generic US-English demographics.
    EnUs,
    /// Irish demographics with locale-specific clinical extensions.
    EnIe,
}

impl Locale {
    /// Whether the Irish catalog and demographic extensions apply.
    pub fn is_irish(self) -> bool {
        matches!(self, Locale::EnIe)
    }

    /// The canonical locale tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::EnUs => "en_US",
            Locale::EnIe => "en_IE",
        }
    }
}

impl FromStr for Locale {
    type Err = GeneratorError;

    fn from_str(s: &str) -> GeneratorResult<Self> {
        match s {
            "en_US" | "en-US" => Ok(Locale::EnUs),
            "en_IE" | "en-IE" => Ok(Locale::EnIe),
            other => Err(GeneratorError::UnsupportedLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many resources of each category one assembled document contains.
///
/// Counts are unsigned end to end, so negative counts cannot be expressed; a
/// zero count simply omits the category from both entries and sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceCounts {
    pub allergies: usize,
    pub medications: usize,
    pub conditions: usize,
    pub immunizations: usize,
    pub procedures: usize,
    pub observations: usize,
}

impl ResourceCounts {
    /// A document with no clinical resources at all.
    pub fn none() -> Self {
        Self {
            allergies: 0,
            medications: 0,
            conditions: 0,
            immunizations: 0,
            procedures: 0,
            observations: 0,
        }
    }

    /// Total number of clinical resources requested.
    pub fn total(&self) -> usize {
        self.allergies
            + self.medications
            + self.conditions
            + self.immunizations
            + self.procedures
            + self.observations
    }
}

impl Default for ResourceCounts {
    /// The standard demo profile: 2 allergies, 3 medications, 2 conditions,
    /// 3 immunizations, 1 procedure, 2 observations.
    fn default() -> Self {
        Self {
            allergies: 2,
            medications: 3,
            conditions: 2,
            immunizations: 3,
            procedures: 1,
            observations: 2,
        }
    }
}
