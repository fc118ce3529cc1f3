//! Detection of template placeholder text left in a proposal.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::Preamble;

use super::diagnostic::{Diagnostic, ValidationResult};

pub const PLACEHOLDER: &str = "xls::amendment::placeholder";

const PLACEHOLDER_PATTERNS: &[&str] = &[
    r"\[STypeName\]",
    r"\[LedgerEntryName\]",
    r"\[TransactionName\]",
    r"\[XXXX\]",
    r"\[field_name\]",
    r"\[api_method_name\]",
    r"\[CustomField\d+\]",
    r"\[EntryTypeValue\]",
    r"\[TYPE\]",
    r"\[Yes/No\]",
    r"\[Value/N/A\]",
    r"\[Description.*?\]",
    r"\[Provide.*?\]",
    r"\[Specify.*?\]",
    r"\[Describe.*?\]",
    r"\[List.*?\]",
    r"\[If.*?\]",
    r"\[Add more.*?\]",
    r"\[Remove example.*?\]",
    // _[Instructional text in italics]_
    r"_\[[^\]]+\]_",
];

static PLACEHOLDERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PLACEHOLDER_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// First placeholder found in a line, if any.
pub fn find_placeholder(line: &str) -> Option<&str> {
    PLACEHOLDERS
        .iter()
        .find_map(|re| re.find(line))
        .map(|m| m.as_str())
}

/// Scan every line outside the preamble; at most one error per line.
pub fn check_placeholders(source: &str, preamble: &Preamble) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, line) in source.lines().enumerate() {
        let line_number = i as u32 + 1;
        if preamble.contains_line(line_number) {
            continue;
        }

        if let Some(found) = find_placeholder(line) {
            result.push(
                Diagnostic::error(
                    PLACEHOLDER,
                    format!("Found template placeholder text: {}", found),
                )
                .at_line(line_number)
                .with_help("Replace the placeholder with the real content or remove it"),
            );
        }
    }

    result
}
