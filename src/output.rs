//! Terminal output formatting for the xls CLI.
//!
//! Status lines use Cargo-style right-aligned coloured verbs and go to
//! stderr. Diagnostics and machine-readable output (JSON) go to stdout so
//! CI logs and pipes get them unadorned.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::validation::{Diagnostic, Severity};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
pub struct Printer {
    color: bool,
}

impl Printer {
    /// Colour is enabled when stderr is a terminal.
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "    Checking XLS-0070-credentials/README.md"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    /// Print one diagnostic on stdout, followed by its help if any.
    pub fn diagnostic(&self, file: &str, diagnostic: &Diagnostic) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", self.diagnostic_line(file, diagnostic));
        if let Some(help) = &diagnostic.help {
            let _ = writeln!(stdout, "    {} {}", self.dim("help:"), help);
        }
    }

    /// Errors are the bare `<file>:<line>: <message>`; warnings are tagged
    /// after the location.
    pub fn diagnostic_line(&self, file: &str, diagnostic: &Diagnostic) -> String {
        match diagnostic.severity {
            Severity::Error => diagnostic.located(file),
            Severity::Warning => format!(
                "{}: {}: {}",
                diagnostic.location(file),
                self.paint(YELLOW, "warning"),
                diagnostic.message
            ),
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{BOLD}{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pluralize a count: `plural(1, "error", "errors")` → "1 error".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

/// Short `XLS-0070-credentials/README.md` form of a document path.
pub fn document_label(path: &Path) -> String {
    match (path.parent().and_then(|p| p.file_name()), path.file_name()) {
        (Some(folder), Some(file)) => {
            format!("{}/{}", folder.to_string_lossy(), file.to_string_lossy())
        }
        _ => path.display().to_string(),
    }
}
