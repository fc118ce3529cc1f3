//! Amendment template checks.
//!
//! Amendment specs describe protocol entities under canonical headings such
//! as `## 3. Ledger Entry: \`Escrow\``. Each heading shape requires a fixed
//! set of immediate subsections. Specs that modify an entity already
//! documented on xrpl.org may skip some of them.
//!
//! Specs with no canonical heading at all are treated as free-form; only
//! the entity-heading heuristic runs for them.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::parser::{children, top_level, Section};
use crate::reference::{EntityKind, EntityLookup, Existence};

use super::diagnostic::{Diagnostic, ValidationResult};

pub const MISSING_SUBSECTION: &str = "xls::amendment::missing-subsection";
pub const ENTITY_HEADING: &str = "xls::amendment::entity-heading";

/// Required subsections for one canonical heading shape.
#[derive(Debug)]
pub struct SectionTemplate {
    /// Heading text fragments that select this template (any one matches)
    pub markers: &'static [&'static str],
    /// Child headings that must appear (substring match)
    pub required: &'static [&'static str],
    /// Requirements dropped when the entity already exists
    pub waived_if_exists: &'static [&'static str],
    /// Kind of entity named after the marker, if it can be looked up
    pub entity: Option<EntityKind>,
}

impl SectionTemplate {
    /// The marker this heading matches, if any.
    pub fn marker_in(&self, title: &str) -> Option<&'static str> {
        self.markers.iter().copied().find(|m| title.contains(m))
    }
}

/// Canonical amendment headings, checked in order; the first match wins.
pub static TEMPLATES: &[SectionTemplate] = &[
    SectionTemplate {
        markers: &["SType:"],
        required: &[
            "SType Value",
            "JSON Representation",
            "Binary Encoding",
            "Example JSON",
        ],
        waived_if_exists: &[],
        entity: None,
    },
    SectionTemplate {
        markers: &["Ledger Entry:"],
        required: &[
            "Object Identifier",
            "Fields",
            "Ownership",
            "Reserves",
            "Deletion",
            "Invariants",
            "RPC Name",
            "Example JSON",
        ],
        waived_if_exists: &[
            "Object Identifier",
            "Ownership",
            "Reserves",
            "Deletion",
            "RPC Name",
        ],
        entity: Some(EntityKind::LedgerEntry),
    },
    SectionTemplate {
        markers: &["Transaction:"],
        required: &[
            "Fields",
            "Transaction Fee",
            "Failure Conditions",
            "State Changes",
            "Example JSON",
        ],
        waived_if_exists: &["Transaction Fee"],
        entity: Some(EntityKind::Transaction),
    },
    SectionTemplate {
        markers: &["Permission:"],
        required: &[],
        waived_if_exists: &[],
        entity: None,
    },
    SectionTemplate {
        markers: &["API:", "RPC:"],
        required: &[
            "Request Fields",
            "Response Fields",
            "Failure Conditions",
            "Example Request",
            "Example Response",
        ],
        waived_if_exists: &[],
        entity: None,
    },
];

static ENTITY_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_]*)").unwrap());

// "Escrow Ledger Entry", "The AMMDeposit Transaction"
static ENTITY_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:The\s+)?([A-Z][A-Za-z0-9]+)\s+(Ledger Entry|Ledger Object|Transaction)\b")
        .unwrap()
});

/// Find the template for a heading title.
pub fn template_for(title: &str) -> Option<(&'static SectionTemplate, &'static str)> {
    TEMPLATES
        .iter()
        .find_map(|t| t.marker_in(title).map(|marker| (t, marker)))
}

/// Entity name following a marker: `Ledger Entry: Escrow` → `Escrow`.
pub fn entity_name<'a>(title: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = title.split_once(marker)?;
    ENTITY_NAME_RE
        .captures(rest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Run the template check, or the entity-heading heuristic for free-form specs.
///
/// Any template heading, at any depth, opts the document out of the
/// heuristic. Only top-level template headings get their subsections checked.
pub fn check_amendment_template(
    sections: &[Section],
    lookup: &dyn EntityLookup,
) -> ValidationResult {
    if !sections.iter().any(|s| template_for(&s.title).is_some()) {
        debug!("no template headings, treating document as free-form");
        return check_entity_headings(sections, lookup);
    }

    let matched: Vec<(usize, &Section, &SectionTemplate, &str)> = top_level(sections)
        .filter_map(|(i, s)| template_for(&s.title).map(|(t, marker)| (i, s, t, marker)))
        .collect();

    let mut result = ValidationResult::new();
    for (index, section, template, marker) in matched {
        result.merge(check_subsections(sections, index, section, template, marker, lookup));
    }
    result
}

fn check_subsections(
    sections: &[Section],
    index: usize,
    section: &Section,
    template: &SectionTemplate,
    marker: &str,
    lookup: &dyn EntityLookup,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let kids = children(sections, index);

    let missing: Vec<&str> = template
        .required
        .iter()
        .copied()
        .filter(|name| !kids.iter().any(|k| k.title.contains(name)))
        .collect();

    // Only ask the lookup when its answer could change the outcome
    let waivable = missing.iter().any(|m| template.waived_if_exists.contains(m));
    let waived = match (waivable, template.entity, entity_name(&section.title, marker)) {
        (true, Some(kind), Some(name)) => {
            // A failed lookup gets the benefit of the doubt
            let existence = lookup.exists(kind, name);
            debug!(%kind, name, ?existence, "template waiver lookup");
            existence != Existence::Absent
        }
        _ => false,
    };

    for name in missing {
        if waived && template.waived_if_exists.contains(&name) {
            continue;
        }
        result.push(
            Diagnostic::error(
                MISSING_SUBSECTION,
                format!(
                    "Missing required subsection '{}' under '{}'",
                    name, section.title
                ),
            )
            .at_line(section.line_number),
        );
    }

    result
}

/// Flag free-form headings that describe an entity which already exists.
///
/// Only a confirmed `Present` is flagged; a failed lookup never is.
pub fn check_entity_headings(sections: &[Section], lookup: &dyn EntityLookup) -> ValidationResult {
    let mut result = ValidationResult::new();

    for section in sections {
        let Some(caps) = ENTITY_HEADING_RE.captures(&section.title) else {
            continue;
        };
        let name = &caps[1];
        let (kind, canonical) = match &caps[2] {
            "Transaction" => (EntityKind::Transaction, "Transaction"),
            _ => (EntityKind::LedgerEntry, "Ledger Entry"),
        };

        if lookup.exists(kind, name) == Existence::Present {
            result.push(
                Diagnostic::error(
                    ENTITY_HEADING,
                    format!(
                        "Heading '{}' describes existing {} '{}' outside the amendment template",
                        section.title, kind, name
                    ),
                )
                .at_line(section.line_number)
                .with_help(format!("Use the template heading '{}: `{}`'", canonical, name)),
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sections;
    use crate::reference::{OfflineLookup, StaticLookup};

    const ESCROW_NO_RESERVES: &str = "\
## 1. Abstract
## 2. Ledger Entry: `Escrow`
### 2.1. Object Identifier
### 2.2. Fields
### 2.3. Ownership
### 2.5. Deletion
### 2.6. Invariants
### 2.7. RPC Name
### 2.8. Example JSON
";

    fn messages(result: &ValidationResult) -> Vec<String> {
        result.iter().map(|d| d.message.clone()).collect()
    }

    #[test]
    fn test_template_for() {
        let (t, marker) = template_for("Ledger Entry: Escrow").unwrap();
        assert_eq!(marker, "Ledger Entry:");
        assert_eq!(t.entity, Some(EntityKind::LedgerEntry));

        let (_, marker) = template_for("RPC: vault_info").unwrap();
        assert_eq!(marker, "RPC:");

        assert!(template_for("Motivation").is_none());
    }

    #[test]
    fn test_entity_name() {
        assert_eq!(entity_name("Ledger Entry: Escrow", "Ledger Entry:"), Some("Escrow"));
        assert_eq!(
            entity_name("Transaction:  EscrowCreate (new)", "Transaction:"),
            Some("EscrowCreate")
        );
        assert_eq!(entity_name("Transaction:", "Transaction:"), None);
    }

    #[test]
    fn test_missing_reserves_for_new_entry() {
        let sections = parse_sections(ESCROW_NO_RESERVES);
        let result = check_amendment_template(&sections, &StaticLookup::new());

        assert_eq!(
            messages(&result),
            vec!["Missing required subsection 'Reserves' under 'Ledger Entry: Escrow'"]
        );
        assert_eq!(result.iter().next().unwrap().line, Some(2));
    }

    #[test]
    fn test_missing_reserves_waived_for_existing_entry() {
        let sections = parse_sections(ESCROW_NO_RESERVES);
        let lookup = StaticLookup::new().with(EntityKind::LedgerEntry, "escrow");

        assert!(check_amendment_template(&sections, &lookup).is_ok());
    }

    #[test]
    fn test_failed_lookup_waives() {
        let sections = parse_sections(ESCROW_NO_RESERVES);
        assert!(check_amendment_template(&sections, &OfflineLookup).is_ok());
    }

    #[test]
    fn test_non_waivable_requirements_still_apply() {
        let sections = parse_sections("## 2. Ledger Entry: `Escrow`\n### 2.1. Fields\n");
        let lookup = StaticLookup::new().with(EntityKind::LedgerEntry, "Escrow");
        let result = check_amendment_template(&sections, &lookup);

        assert_eq!(
            messages(&result),
            vec![
                "Missing required subsection 'Invariants' under 'Ledger Entry: Escrow'",
                "Missing required subsection 'Example JSON' under 'Ledger Entry: Escrow'",
            ]
        );
    }

    #[test]
    fn test_grandchildren_do_not_count() {
        let source = "\
## 3. Transaction: `VaultCreate`
### 3.1. Fields
#### 3.1.1. Transaction Fee
### 3.3. Failure Conditions
### 3.4. State Changes
### 3.5. Example JSON
";
        let sections = parse_sections(source);
        let result = check_amendment_template(&sections, &StaticLookup::new());

        assert_eq!(
            messages(&result),
            vec!["Missing required subsection 'Transaction Fee' under 'Transaction: VaultCreate'"]
        );
    }

    #[test]
    fn test_each_template_heading_checked() {
        let source = "\
## 2. SType: `STNumber`
### 2.1. SType Value
## 3. Permission: `EscrowCreate`
";
        let sections = parse_sections(source);
        let result = check_amendment_template(&sections, &StaticLookup::new());

        assert_eq!(result.error_count(), 3);
    }

    #[test]
    fn test_free_form_spec_flags_existing_entity_heading() {
        let source = "## 1. Abstract\n## 2. `Escrow` Ledger Entry\n### 2.1. New Fields\n";
        let sections = parse_sections(source);
        let lookup = StaticLookup::new().with(EntityKind::LedgerEntry, "Escrow");
        let result = check_amendment_template(&sections, &lookup);

        assert_eq!(result.error_count(), 1);
        let d = result.iter().next().unwrap();
        assert_eq!(d.code, ENTITY_HEADING);
        assert_eq!(d.line, Some(2));
    }

    #[test]
    fn test_free_form_spec_ignores_new_or_unknown_entities() {
        let source = "## 2. `Vault` Ledger Entry\n## 3. `VaultCreate` Transaction\n";
        let sections = parse_sections(source);

        assert!(check_amendment_template(&sections, &StaticLookup::new()).is_ok());
        assert!(check_amendment_template(&sections, &OfflineLookup).is_ok());
    }

    #[test]
    fn test_heuristic_skipped_when_template_used() {
        let source = "\
## 2. Permission: `Foo`
## 3. `Escrow` Ledger Entry
";
        let sections = parse_sections(source);
        let lookup = StaticLookup::new().with(EntityKind::LedgerEntry, "Escrow");

        assert!(check_amendment_template(&sections, &lookup).is_ok());
    }

    #[test]
    fn test_nested_template_heading_disables_heuristic() {
        let source = "\
## 2. Specification
### 2.1. Ledger Entry: `Vault`
### 2.2. `Escrow` Ledger Entry
";
        let sections = parse_sections(source);
        let lookup = StaticLookup::new().with(EntityKind::LedgerEntry, "Escrow");

        assert!(check_amendment_template(&sections, &lookup).is_ok());
    }

    #[test]
    fn test_heuristic_transaction_kind() {
        let sections = parse_sections("## The Payment Transaction\n");
        let lookup = StaticLookup::new().with(EntityKind::Transaction, "Payment");
        let result = check_entity_headings(&sections, &lookup);

        assert_eq!(result.error_count(), 1);
        assert!(result.iter().next().unwrap().message.contains("existing transaction 'Payment'"));
    }
}
