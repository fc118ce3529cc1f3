//! Validate command implementation.
//!
//! Discovers documents, runs every check on each one, and prints
//! diagnostics plus a summary. A document that cannot be read or has no
//! preamble counts as one error; the rest of the batch still runs.

use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};

use crate::discovery::{
    discover, discover_changed, discover_paths, DiscoveryResult, DEFAULT_BASE_REF,
};
use crate::error::Result;
use crate::output::{document_label, plural, Printer};
use crate::parser::{load_document, XlsDocument};
use crate::reference::{EntityLookup, HttpLookup, OfflineLookup};
use crate::validation::{check_duplicate_numbers, validate_loaded, Diagnostic};

/// Validate XLS documents against the preamble schema and templates
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Documents or XLS-* folders to validate
    pub files: Vec<PathBuf>,

    /// Validate every XLS-*/README.md under the root
    #[arg(long, conflicts_with_all = ["files", "changed"])]
    pub all: bool,

    /// Validate documents changed relative to --base (default mode)
    #[arg(long, conflicts_with = "files")]
    pub changed: bool,

    /// Git ref to diff against in changed mode
    #[arg(long, default_value = DEFAULT_BASE_REF)]
    pub base: String,

    /// Repository root containing the XLS-* folders
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Skip documentation lookups for existing entities
    #[arg(long)]
    pub offline: bool,
}

/// Totals for one validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateSummary {
    pub documents: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl ValidateSummary {
    /// Warnings never fail a run.
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<ValidateSummary> {
    let discovery = select_documents(&args)?;

    if discovery.documents.is_empty() {
        printer.info("Validate", "no XLS documents to check");
        return Ok(ValidateSummary::default());
    }

    let lookup: Box<dyn EntityLookup> = if args.offline || !discovery.manifest.reference.enabled {
        debug!("entity lookups disabled");
        Box::new(OfflineLookup)
    } else {
        Box::new(HttpLookup::new(&discovery.manifest.reference)?)
    };

    let summary = validate_paths(&discovery.documents, lookup.as_ref(), printer);

    let status = format!(
        "{}, {}",
        plural(summary.documents, "document", "documents"),
        plural(summary.errors, "error", "errors")
    );
    if summary.is_success() {
        printer.status("Finished", &status);
    } else {
        printer.error("Failed", &status);
    }

    Ok(summary)
}

/// Which documents a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Explicit,
    All,
    Changed,
}

impl ValidateArgs {
    fn selection(&self) -> Selection {
        if !self.files.is_empty() {
            Selection::Explicit
        } else if self.all {
            Selection::All
        } else {
            // --changed and the bare command both land here
            debug!(explicit = self.changed, "selecting changed documents");
            Selection::Changed
        }
    }
}

fn select_documents(args: &ValidateArgs) -> Result<DiscoveryResult> {
    match args.selection() {
        Selection::Explicit => discover_paths(&args.root, &args.files),
        Selection::All => discover(&args.root),
        Selection::Changed => discover_changed(&args.root, &args.base),
    }
}

/// Validate each path in order and print what was found.
pub fn validate_paths(
    paths: &[PathBuf],
    lookup: &dyn EntityLookup,
    printer: &Printer,
) -> ValidateSummary {
    let mut summary = ValidateSummary::default();
    let mut metadata: Vec<XlsDocument> = Vec::new();

    for path in paths {
        summary.documents += 1;
        let label = document_label(path);
        printer.status("Checking", &label);

        let doc = match load_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                summary.errors += 1;
                printer.diagnostic(&label, &Diagnostic::error("xls::load", e.to_string()));
                continue;
            }
        };

        let result = validate_loaded(&doc, lookup);
        info!(
            file = %label,
            errors = result.error_count(),
            warnings = result.warning_count(),
            "validated document"
        );

        summary.errors += result.error_count();
        summary.warnings += result.warning_count();
        for diagnostic in result.iter() {
            printer.diagnostic(&label, diagnostic);
        }

        metadata.push(doc.parsed.metadata);
    }

    let duplicates = check_duplicate_numbers(&metadata);
    summary.errors += duplicates.error_count();
    for diagnostic in duplicates.iter() {
        printer.diagnostic("batch", diagnostic);
    }

    summary
}
