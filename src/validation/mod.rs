//! Validation of XLS documents against the preamble schema and templates.
//!
//! Checks run in a fixed order and always all run; problems are collected
//! as diagnostics rather than stopping at the first one:
//!
//! 1. preamble completeness
//! 2. required top-level sections
//! 3. amendment template subsections (Amendment category only)
//! 4. leftover template placeholders (Amendment category only)

pub mod amendment;
mod diagnostic;
pub mod placeholders;
pub mod preamble;
pub mod structure;

use std::collections::BTreeMap;

use tracing::debug;

pub use diagnostic::{Diagnostic, Severity, ValidationResult};

use crate::parser::{LoadedDocument, ParsedDocument, XlsDocument};
use crate::reference::EntityLookup;

pub const DUPLICATE_NUMBER: &str = "xls::batch::duplicate-number";

/// Run every check against one parsed document.
pub fn validate_document(
    doc: &ParsedDocument,
    source: &str,
    lookup: &dyn EntityLookup,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(preamble::check_preamble(doc));
    result.merge(structure::check_required_sections(&doc.sections));

    if doc.metadata.is_amendment() {
        result.merge(amendment::check_amendment_template(&doc.sections, lookup));
        result.merge(placeholders::check_placeholders(source, &doc.preamble));
    } else {
        debug!(category = %doc.metadata.category, "skipping amendment checks");
    }

    result
}

/// Validate a document loaded from disk.
pub fn validate_loaded(doc: &LoadedDocument, lookup: &dyn EntityLookup) -> ValidationResult {
    validate_document(&doc.parsed, &doc.source, lookup)
}

/// Report assigned XLS numbers shared by more than one folder.
///
/// Number 0 means unassigned and is ignored.
pub fn check_duplicate_numbers<'a>(
    docs: impl IntoIterator<Item = &'a XlsDocument>,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut by_number: BTreeMap<u32, Vec<&str>> = BTreeMap::new();

    for doc in docs {
        if doc.number != 0 {
            by_number.entry(doc.number).or_default().push(&doc.folder);
        }
    }

    for (number, folders) in by_number {
        if folders.len() > 1 {
            result.push(
                Diagnostic::error(
                    DUPLICATE_NUMBER,
                    format!("XLS number {} is used by: {}", number, folders.join(", ")),
                )
                .with_help("Each proposal needs its own number once assigned"),
            );
        }
    }

    result
}
