//! Problems found while checking a document.
//!
//! Checks never stop early. Each one returns a [`ValidationResult`] and the
//! caller merges them, so a single run reports everything wrong with a
//! document at once.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Reported, but never fails a run
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem in one document.
///
/// `code` is a stable `xls::<check>::<kind>` identifier that tests and
/// tooling can match on; `message` is for people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    /// 1-indexed source line, for problems tied to one
    pub line: Option<u32>,
    pub help: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            line: None,
            help: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn at_line(self, line: u32) -> Self {
        Self {
            line: Some(line),
            ..self
        }
    }

    pub fn with_help(self, help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
            ..self
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// `<file>:<line>`, or just `<file>` without a line.
    pub fn location(&self, file: &str) -> String {
        match self.line {
            Some(line) => format!("{file}:{line}"),
            None => file.to_string(),
        }
    }

    /// `<file>:<line>: <message>`, or `<file>: <message>` without a line.
    pub fn located(&self, file: &str) -> String {
        format!("{}: {}", self.location(file), self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)
    }
}

/// Diagnostics from one or more checks, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append everything from `other`, keeping its order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// True only when nothing at all was reported.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }
}

impl FromIterator<Diagnostic> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationResult {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_severity() {
        let result: ValidationResult = [
            Diagnostic::error("xls::a", "broken"),
            Diagnostic::warning("xls::b", "suspicious"),
            Diagnostic::error("xls::a", "also broken"),
        ]
        .into_iter()
        .collect();

        assert_eq!(result.error_count(), 2);
        assert_eq!(result.warning_count(), 1);
        assert!(result.has_errors());
        assert_eq!(result.with_code("xls::a").count(), 2);
    }

    #[test]
    fn test_warnings_alone_are_not_errors() {
        let mut result = ValidationResult::new();
        assert!(result.is_ok());

        result.push(Diagnostic::warning("xls::b", "suspicious"));
        assert!(!result.has_errors());
        assert!(!result.is_ok());
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut a = ValidationResult::new();
        a.push(Diagnostic::error("xls::first", "one"));
        let mut b = ValidationResult::new();
        b.push(Diagnostic::error("xls::second", "two"));

        a.merge(b);

        let codes: Vec<String> = a.into_iter().map(|d| d.code).collect();
        assert_eq!(codes, ["xls::first", "xls::second"]);
    }

    #[test]
    fn test_located() {
        let d = Diagnostic::error("xls::test", "Found placeholder").at_line(12);
        assert_eq!(
            d.located("XLS-0001-x/README.md"),
            "XLS-0001-x/README.md:12: Found placeholder"
        );

        let d = Diagnostic::error("xls::test", "Missing required section: Abstract");
        assert_eq!(d.located("a.md"), "a.md: Missing required section: Abstract");
    }

    #[test]
    fn test_display_includes_code() {
        let d = Diagnostic::error("xls::batch::duplicate-number", "XLS number 7 is used twice")
            .with_help("Renumber one of them");
        assert_eq!(
            d.to_string(),
            "error [xls::batch::duplicate-number]: XLS number 7 is used twice"
        );
        assert_eq!(d.help.as_deref(), Some("Renumber one of them"));
    }
}
