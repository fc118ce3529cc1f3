//! The XLS document record built from a preamble.

use std::fmt;

use serde::{Serialize, Serializer};

use super::normalize::{number_from_folder, parse_authors, strip_markup};
use super::preamble::{Preamble, PreambleKey};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_DESCRIPTION: &str = "No description available";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN: &str = "Unknown";

/// A proposal author: display name plus contact link (may be empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    pub link: String,
}

impl Author {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }

    /// The placeholder used when no author line is present.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_AUTHOR, "")
    }
}

/// Document category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Amendment,
    System,
    Ecosystem,
    Meta,
    /// A value outside the allowed set
    Invalid(String),
    /// No category line
    Unknown,
}

impl Category {
    pub const VALID: &'static [&'static str] = &["Amendment", "System", "Ecosystem", "Meta"];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "Amendment" => Category::Amendment,
            "System" => Category::System,
            "Ecosystem" => Category::Ecosystem,
            "Meta" => Category::Meta,
            "" | UNKNOWN => Category::Unknown,
            other => Category::Invalid(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Amendment => "Amendment",
            Category::System => "System",
            Category::Ecosystem => "Ecosystem",
            Category::Meta => "Meta",
            Category::Invalid(raw) => raw,
            Category::Unknown => UNKNOWN,
        }
    }

    /// Case-insensitive check; `amendment` still selects the amendment template.
    pub fn is_amendment(&self) -> bool {
        match self {
            Category::Amendment => true,
            Category::Invalid(raw) => raw.eq_ignore_ascii_case("amendment"),
            _ => false,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Document lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Draft,
    Final,
    Living,
    Deprecated,
    Stagnant,
    Withdrawn,
    /// A value outside the allowed set
    Invalid(String),
    /// No status line
    Unknown,
}

impl Status {
    pub const VALID: &'static [&'static str] = &[
        "Draft",
        "Final",
        "Living",
        "Deprecated",
        "Stagnant",
        "Withdrawn",
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "Draft" => Status::Draft,
            "Final" => Status::Final,
            "Living" => Status::Living,
            "Deprecated" => Status::Deprecated,
            "Stagnant" => Status::Stagnant,
            "Withdrawn" => Status::Withdrawn,
            "" | UNKNOWN => Status::Unknown,
            other => Status::Invalid(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Draft => "Draft",
            Status::Final => "Final",
            Status::Living => "Living",
            Status::Deprecated => "Deprecated",
            Status::Stagnant => "Stagnant",
            Status::Withdrawn => "Withdrawn",
            Status::Invalid(raw) => raw,
            Status::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// An XLS document's metadata.
///
/// Required fields fall back to sentinel values (`UNKNOWN_TITLE`, etc.)
/// instead of being absent; optional fields are `None` when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XlsDocument {
    /// Number parsed from the folder name (0 if unassigned)
    pub number: u32,
    pub title: String,
    pub description: String,
    pub authors: Vec<Author>,
    /// Containing folder name
    pub folder: String,
    pub category: Category,
    pub status: Status,
    /// `YYYY-MM-DD`, or `UNKNOWN`
    pub created: String,
    pub updated: Option<String>,
    pub proposal_from: Option<String>,
    pub implementation: Option<String>,
    pub requires: Option<String>,
    pub withdrawal_reason: Option<String>,
}

impl XlsDocument {
    /// Build the record from an extracted preamble.
    pub fn from_preamble(preamble: &Preamble, folder: &str) -> Self {
        let text = |key: PreambleKey| -> Option<String> {
            preamble
                .get(key)
                .map(|v| strip_markup(&v.value))
                .filter(|v| !v.is_empty())
        };

        let authors = preamble
            .get(PreambleKey::Authors)
            .map(|v| parse_authors(&v.value))
            .filter(|authors| !authors.is_empty())
            .unwrap_or_else(|| vec![Author::unknown()]);

        Self {
            number: number_from_folder(folder),
            title: text(PreambleKey::Title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            description: text(PreambleKey::Description)
                .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string()),
            authors,
            folder: folder.to_string(),
            category: text(PreambleKey::Category)
                .map(|c| Category::parse(&c))
                .unwrap_or(Category::Unknown),
            status: text(PreambleKey::Status)
                .map(|s| Status::parse(&s))
                .unwrap_or(Status::Unknown),
            created: text(PreambleKey::Created).unwrap_or_else(|| UNKNOWN.to_string()),
            updated: text(PreambleKey::Updated),
            proposal_from: text(PreambleKey::ProposalFrom),
            implementation: text(PreambleKey::Implementation),
            requires: text(PreambleKey::Requires),
            withdrawal_reason: text(PreambleKey::WithdrawalReason),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty() && self.title != UNKNOWN_TITLE
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty() && self.description != UNKNOWN_DESCRIPTION
    }

    pub fn has_authors(&self) -> bool {
        !self.authors.is_empty() && self.authors != [Author::unknown()]
    }

    pub fn has_created(&self) -> bool {
        !self.created.is_empty() && self.created != UNKNOWN
    }

    pub fn is_amendment(&self) -> bool {
        self.category.is_amendment()
    }
}
