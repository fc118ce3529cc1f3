//! `<pre>` metadata block extraction.

use std::collections::HashMap;

use crate::error::{Result, XlsError};

use super::span::{LineIndex, Spanned};

const OPEN_MARKER: &str = "<pre>";
const CLOSE_MARKER: &str = "</pre>";

/// A recognised preamble key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreambleKey {
    Title,
    Description,
    Authors,
    Status,
    Category,
    Created,
    Updated,
    ProposalFrom,
    Implementation,
    Requires,
    WithdrawalReason,
}

impl PreambleKey {
    /// Match a raw key (case-insensitive) to a known preamble key.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let key = raw.trim().to_ascii_lowercase();
        let key = match key.as_str() {
            "title" => PreambleKey::Title,
            "description" => PreambleKey::Description,
            "author" | "authors" => PreambleKey::Authors,
            "status" => PreambleKey::Status,
            "category" => PreambleKey::Category,
            "created" => PreambleKey::Created,
            "updated" => PreambleKey::Updated,
            "proposal-from" => PreambleKey::ProposalFrom,
            "implementation" => PreambleKey::Implementation,
            "requires" => PreambleKey::Requires,
            "withdrawal-reason" => PreambleKey::WithdrawalReason,
            _ => return None,
        };
        Some(key)
    }

    /// The key as written in a preamble.
    pub fn name(&self) -> &'static str {
        match self {
            PreambleKey::Title => "title",
            PreambleKey::Description => "description",
            PreambleKey::Authors => "author",
            PreambleKey::Status => "status",
            PreambleKey::Category => "category",
            PreambleKey::Created => "created",
            PreambleKey::Updated => "updated",
            PreambleKey::ProposalFrom => "proposal-from",
            PreambleKey::Implementation => "implementation",
            PreambleKey::Requires => "requires",
            PreambleKey::WithdrawalReason => "withdrawal-reason",
        }
    }
}

/// Result of extracting the preamble from a document.
#[derive(Debug, Clone)]
pub struct Preamble {
    /// Raw field values (trimmed, markup untouched) with their source lines
    pub fields: HashMap<PreambleKey, Spanned<String>>,
    /// Line of the opening `<pre>` marker
    pub start_line: u32,
    /// Line of the closing `</pre>` marker
    pub end_line: u32,
}

impl Preamble {
    pub fn get(&self, key: PreambleKey) -> Option<&Spanned<String>> {
        self.fields.get(&key)
    }

    /// Line a field was read from, or the block start if it is missing.
    pub fn line_of(&self, key: PreambleKey) -> u32 {
        self.fields
            .get(&key)
            .map(|v| v.line)
            .unwrap_or(self.start_line)
    }

    /// Whether a 1-indexed source line falls inside the block.
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// Extract the first `<pre>...</pre>` block and its `key: value` lines.
///
/// A document without the block is unusable, so this fails rather than
/// returning defaults.
pub fn extract_preamble(source: &str) -> Result<Preamble> {
    let open = source.find(OPEN_MARKER).ok_or(XlsError::MissingPreamble)?;
    let content_start = open + OPEN_MARKER.len();
    let close = source[content_start..]
        .find(CLOSE_MARKER)
        .map(|i| content_start + i)
        .ok_or(XlsError::MissingPreamble)?;

    let index = LineIndex::new(source);
    let start_line = index.line_of(open);
    let end_line = index.line_of(close);

    let mut fields = HashMap::new();
    let block = &source[content_start..close];

    for (i, line) in block.split('\n').enumerate() {
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            continue;
        };
        let Some(key) = PreambleKey::from_raw(raw_key) else {
            continue;
        };
        // First occurrence wins
        fields
            .entry(key)
            .or_insert_with(|| Spanned::new(raw_value.trim().to_string(), start_line + i as u32));
    }

    Ok(Preamble {
        fields,
        start_line,
        end_line,
    })
}
