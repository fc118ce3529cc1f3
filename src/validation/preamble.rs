//! Preamble completeness checks.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::{Category, ParsedDocument, PreambleKey, Status};

use super::diagnostic::{Diagnostic, ValidationResult};

pub const MISSING_FIELD: &str = "xls::preamble::missing-field";
pub const INVALID_VALUE: &str = "xls::preamble::invalid-value";
pub const INVALID_DATE: &str = "xls::preamble::invalid-date";
pub const AUTHOR: &str = "xls::preamble::author";
pub const WITHDRAWAL_REASON: &str = "xls::preamble::withdrawal-reason";

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Whether a value is a `YYYY-MM-DD` date.
pub fn is_valid_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

fn missing(doc: &ParsedDocument, key: PreambleKey) -> Diagnostic {
    Diagnostic::error(MISSING_FIELD, format!("Missing required field: {}", key.name()))
        .at_line(doc.preamble.line_of(key))
        .with_help(format!("Add `{}: ...` to the <pre> block", key.name()))
}

/// Check required and conditional preamble fields.
pub fn check_preamble(doc: &ParsedDocument) -> ValidationResult {
    let mut result = ValidationResult::new();
    let meta = &doc.metadata;
    let line = |key| doc.preamble.line_of(key);

    if !meta.has_title() {
        result.push(missing(doc, PreambleKey::Title));
    }

    if !meta.has_description() {
        result.push(missing(doc, PreambleKey::Description));
    }

    if !meta.has_authors() {
        result.push(missing(doc, PreambleKey::Authors));
    } else if meta.authors.iter().any(|a| a.name.is_empty()) {
        result.push(
            Diagnostic::error(AUTHOR, "Author with missing name")
                .at_line(line(PreambleKey::Authors)),
        );
    } else if let Some(author) = meta.authors.iter().find(|a| a.link.is_empty()) {
        result.push(
            Diagnostic::error(AUTHOR, format!("Author with missing link: {}", author.name))
                .at_line(line(PreambleKey::Authors))
                .with_help("Use `Name <email>` or `Name (@github-handle)`"),
        );
    }

    match &meta.category {
        Category::Unknown => result.push(missing(doc, PreambleKey::Category)),
        Category::Invalid(raw) => result.push(
            Diagnostic::error(
                INVALID_VALUE,
                format!(
                    "Invalid category '{}'. Must be one of: {}",
                    raw,
                    Category::VALID.join(", ")
                ),
            )
            .at_line(line(PreambleKey::Category)),
        ),
        _ => {}
    }

    match &meta.status {
        Status::Unknown => result.push(missing(doc, PreambleKey::Status)),
        Status::Invalid(raw) => result.push(
            Diagnostic::error(
                INVALID_VALUE,
                format!(
                    "Invalid status '{}'. Must be one of: {}",
                    raw,
                    Status::VALID.join(", ")
                ),
            )
            .at_line(line(PreambleKey::Status)),
        ),
        _ => {}
    }

    if !meta.has_created() {
        result.push(missing(doc, PreambleKey::Created));
    } else if !is_valid_date(&meta.created) {
        result.push(
            Diagnostic::error(
                INVALID_DATE,
                format!(
                    "Invalid date format for 'created': {}. Expected YYYY-MM-DD",
                    meta.created
                ),
            )
            .at_line(line(PreambleKey::Created)),
        );
    }

    if meta.proposal_from.is_none() {
        result.push(missing(doc, PreambleKey::ProposalFrom));
    }

    if meta.status == Status::Withdrawn && meta.withdrawal_reason.is_none() {
        result.push(
            Diagnostic::error(
                WITHDRAWAL_REASON,
                "Withdrawn XLS must have withdrawal-reason field",
            )
            .at_line(line(PreambleKey::Status)),
        );
    }

    if let Some(updated) = &meta.updated {
        if !is_valid_date(updated) {
            result.push(
                Diagnostic::error(
                    INVALID_DATE,
                    format!(
                        "Invalid date format for 'updated': {}. Expected YYYY-MM-DD",
                        updated
                    ),
                )
                .at_line(line(PreambleKey::Updated)),
            );
        }
    }

    result
}
