//! Required top-level section checks.

use crate::parser::{top_level, Section};

use super::diagnostic::{Diagnostic, ValidationResult};

pub const MISSING_SECTION: &str = "xls::sections::missing-section";

/// Names that must appear in some top-level (`##`) heading.
///
/// Matched as case-sensitive substrings, so `Security` accepts both
/// "Security" and "Security Considerations".
pub const REQUIRED_SECTIONS: &[&str] = &["Abstract", "Security"];

/// Check that every required top-level section is present.
pub fn check_required_sections(sections: &[Section]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for required in REQUIRED_SECTIONS {
        let found = top_level(sections).any(|(_, s)| s.title.contains(required));
        if !found {
            result.push(
                Diagnostic::error(
                    MISSING_SECTION,
                    format!("Missing required section: {}", required),
                )
                .with_help(format!("Add a `## {}` section", required)),
            );
        }
    }

    result
}
