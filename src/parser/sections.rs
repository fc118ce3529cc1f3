//! Heading structure of an XLS document.
//!
//! Sections are kept as a flat list in document order. The tree is implied
//! by heading levels: a section's children are the following sections one
//! level deeper, up to the next section at the same level or above.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Level of the document's own title heading, which is not a section.
pub const TITLE_LEVEL: u8 = 1;

/// Level of top-level sections (`## ...`).
pub const TOP_LEVEL: u8 = 2;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*?)(?:\s+#+)?\s*$").unwrap());

static NUMBERING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\.\s+").unwrap());

static OPTIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_*]?\(Optional\)[_*]?").unwrap());

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// A heading in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Numbering token without the trailing dot (`"3.2"`), if present
    pub number: Option<String>,
    /// Heading text with numbering, `(Optional)` marker and code ticks removed
    pub title: String,
    /// Heading depth (number of `#`)
    pub level: u8,
    /// 1-indexed source line
    pub line_number: u32,
    /// Whether the heading carried an `(Optional)` marker
    pub optional: bool,
}

/// Parse every heading below the title level, in document order.
///
/// Headings inside fenced code blocks are ignored.
pub fn parse_sections(source: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut fence: Option<&str> = None;

    for (i, line) in source.lines().enumerate() {
        let trimmed = line.trim_start();

        // Track code blocks so `# comment` lines in them aren't headings
        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            continue;
        }
        if trimmed.starts_with("```") {
            fence = Some("```");
            continue;
        }
        if trimmed.starts_with("~~~") {
            fence = Some("~~~");
            continue;
        }

        let Some(caps) = HEADING_RE.captures(line) else {
            continue;
        };
        let level = caps[1].len() as u8;
        if level <= TITLE_LEVEL {
            continue;
        }

        sections.push(clean_heading(&caps[2], level, i as u32 + 1));
    }

    sections
}

fn clean_heading(text: &str, level: u8, line_number: u32) -> Section {
    let (number, rest) = match NUMBERING_RE.captures(text) {
        Some(caps) => (
            Some(caps[1].to_string()),
            &text[caps.get(0).map(|m| m.end()).unwrap_or(0)..],
        ),
        None => (None, text),
    };

    let optional = OPTIONAL_RE.is_match(rest);
    let title = OPTIONAL_RE.replace_all(rest, "");
    let title = INLINE_CODE_RE.replace_all(&title, "$1");

    Section {
        number,
        title: title.trim().to_string(),
        level,
        line_number,
        optional,
    }
}

/// Immediate children of the section at `index`.
pub fn children(sections: &[Section], index: usize) -> Vec<&Section> {
    let Some(parent) = sections.get(index) else {
        return Vec::new();
    };

    sections[index + 1..]
        .iter()
        .take_while(|s| s.level > parent.level)
        .filter(|s| s.level == parent.level + 1)
        .collect()
}

/// Indices and sections at the top level.
pub fn top_level(sections: &[Section]) -> impl Iterator<Item = (usize, &Section)> {
    sections
        .iter()
        .enumerate()
        .filter(|(_, s)| s.level == TOP_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_heading_excluded() {
        let sections = parse_sections("# XLS-70 Credentials\n\n## 1. Abstract\n");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Abstract");
        assert_eq!(sections[0].number.as_deref(), Some("1"));
        assert_eq!(sections[0].line_number, 3);
    }

    #[test]
    fn test_strips_numbering_and_optional_marker() {
        let sections = parse_sections("### 3.2. Metadata Fields _(Optional)_\n");

        assert_eq!(sections[0].title, "Metadata Fields");
        assert_eq!(sections[0].number.as_deref(), Some("3.2"));
        assert_eq!(sections[0].level, 3);
        assert!(sections[0].optional);
    }

    #[test]
    fn test_strips_inline_code() {
        let sections = parse_sections("## 2. Ledger Entry: `Escrow`\n");
        assert_eq!(sections[0].title, "Ledger Entry: Escrow");
    }

    #[test]
    fn test_number_without_dot_is_kept() {
        let sections = parse_sections("## 2024 Roadmap\n");
        assert_eq!(sections[0].title, "2024 Roadmap");
        assert!(sections[0].number.is_none());
    }

    #[test]
    fn test_ignores_code_blocks() {
        let source = "## Example\n\n```bash\n# not a heading\n```\n\n## Next\n";
        let sections = parse_sections(source);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].title, "Next");
        assert_eq!(sections[1].line_number, 7);
    }

    #[test]
    fn test_closing_hashes_removed() {
        let sections = parse_sections("## Rationale ##\n");
        assert_eq!(sections[0].title, "Rationale");
    }

    #[test]
    fn test_trailing_hash_in_title_kept() {
        let sections = parse_sections("## Using C#\n### F# and C# Bindings\n");
        assert_eq!(sections[0].title, "Using C#");
        assert_eq!(sections[1].title, "F# and C# Bindings");
    }

    #[test]
    fn test_children_by_position() {
        let source = "\
## 1. Ledger Entry: A
### 1.1. Fields
#### 1.1.1. Deep
### 1.2. Reserves
## 2. Transaction: B
### 2.1. Fields
";
        let sections = parse_sections(source);

        let kids: Vec<&str> = children(&sections, 0).iter().map(|s| s.title.as_str()).collect();
        assert_eq!(kids, vec!["Fields", "Reserves"]);

        let kids: Vec<&str> = children(&sections, 4).iter().map(|s| s.title.as_str()).collect();
        assert_eq!(kids, vec!["Fields"]);

        assert!(children(&sections, 2).is_empty());
        assert!(children(&sections, 99).is_empty());
    }

    #[test]
    fn test_top_level() {
        let sections = parse_sections("## A\n### B\n## C\n");
        let titles: Vec<&str> = top_level(&sections).map(|(_, s)| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "## 1. A\n### 1.1. B\n";
        assert_eq!(parse_sections(source), parse_sections(source));
    }
}
