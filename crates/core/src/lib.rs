//! # IPS Core
//!
//! Synthesis engine for HL7 FHIR International Patient Summary documents.
//!
//! This crate contains the pure generation logic:
//! - Coding catalog and locale-flavoured fake demographics
//! - Per-resource synthesizers bound to one patient identity
//! - Document assembly with fixed entry ordering and referential closure
//! - Structural validation of document bundles
//!
//! **No CLI concerns**: argument parsing, environment loading and file output
//! belong in `ips-cli`.

pub mod bundle;
pub mod catalog;
pub mod config;
pub mod enrich;
pub mod error;
pub mod faker;
pub mod generator;
pub mod sections;
pub mod validate;

pub use bundle::{save_bundle, BundleStats};
pub use config::{Locale, ResourceCounts};
pub use enrich::{Enricher, HttpEnricher, NoEnrichment};
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{Generator, ObservationMode};
pub use sections::{compose_sections, ResourceCategory, SectionEntry};
pub use validate::{validate_bundle, validate_file, validate_json, ValidationReport};
