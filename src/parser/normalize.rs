//! Cleaning and type conversion of raw preamble values.

use std::sync::LazyLock;

use regex::Regex;

use super::metadata::Author;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static NUMERIC_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));").unwrap());

static EMAIL_AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*<\s*([^>]+?)\s*>$").unwrap());

static GITHUB_AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\(@([^)]+)\)$").unwrap());

static FOLDER_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^XLS-(\d+)d?(?:-|$)").unwrap());

/// Decode the HTML entities that show up in hand-written preambles.
pub fn decode_entities(s: &str) -> String {
    let named = s
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ");

    let numeric = NUMERIC_ENTITY_RE.replace_all(&named, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // &amp; last so "&amp;lt;" stays a literal "&lt;"
    numeric.replace("&amp;", "&")
}

/// Reduce a value with embedded markup to plain text.
pub fn strip_markup(value: &str) -> String {
    let without_tags = TAG_RE.replace_all(value, "");
    decode_entities(&without_tags)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a single author entry.
///
/// `Name <email>` is tried before `Name (@handle)`; anything else is a bare
/// name with an empty link.
pub fn parse_author(raw: &str) -> Author {
    let author = decode_entities(raw.trim());

    if let Some(caps) = EMAIL_AUTHOR_RE.captures(&author) {
        return Author::new(caps[1].trim(), format!("mailto:{}", caps[2].trim()));
    }

    if let Some(caps) = GITHUB_AUTHOR_RE.captures(&author) {
        return Author::new(
            caps[1].trim(),
            format!("https://github.com/{}", caps[2].trim()),
        );
    }

    Author::new(author.trim(), "")
}

/// Split a comma-separated author list into (name, link) pairs.
pub fn parse_authors(raw: &str) -> Vec<Author> {
    raw.split(',')
        .filter(|segment| !segment.trim().is_empty())
        .map(parse_author)
        .collect()
}

/// Extract the XLS number from a folder name like `XLS-0070-credentials`.
///
/// Unassigned or unrecognised folders yield 0.
pub fn number_from_folder(folder: &str) -> u32 {
    FOLDER_NUMBER_RE
        .captures(folder)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_author() {
        let author = parse_author("Name <user@example.com>");
        assert_eq!(author.name, "Name");
        assert_eq!(author.link, "mailto:user@example.com");
    }

    #[test]
    fn test_github_author() {
        let author = parse_author(" Name (@handle) ");
        assert_eq!(author.name, "Name");
        assert_eq!(author.link, "https://github.com/handle");
    }

    #[test]
    fn test_bare_author() {
        let author = parse_author("Just A Name");
        assert_eq!(author.name, "Just A Name");
        assert_eq!(author.link, "");
    }

    #[test]
    fn test_escaped_email_author() {
        let author = parse_author("Name &lt;user@example.com&gt;");
        assert_eq!(author.link, "mailto:user@example.com");
    }

    #[test]
    fn test_author_list() {
        let authors = parse_authors("A <a@x.io>, B (@b), , C");
        assert_eq!(authors.len(), 3);
        assert_eq!(authors[1].link, "https://github.com/b");
        assert_eq!(authors[2].name, "C");
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<a href=\"https://x.io\">Link</a> &amp; more"),
            "Link & more"
        );
        assert_eq!(strip_markup("  plain   text "), "plain text");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("caf&#233; &#x41;"), "café A");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_number_from_folder() {
        assert_eq!(number_from_folder("XLS-0070-credentials"), 70);
        assert_eq!(number_from_folder("XLS-2d"), 2);
        assert_eq!(number_from_folder("XLS-0037-concise-transaction-identifier-ctid"), 37);
        assert_eq!(number_from_folder("drafts"), 0);
    }
}
