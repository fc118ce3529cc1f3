//! List command implementation.
//!
//! Discovers documents and prints an inventory sorted by XLS number.

use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::discovery::discover;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::parser::{load_document, XlsDocument};

/// List discovered XLS documents
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository root containing the XLS-* folders
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let discovery = discover(&args.root)?;

    let mut documents: Vec<XlsDocument> = Vec::new();
    for path in &discovery.documents {
        match load_document(path) {
            Ok(doc) => documents.push(doc.parsed.metadata),
            Err(e) => warn!(path = %display_path(path), error = %e, "skipping unreadable document"),
        }
    }

    sort_documents(&mut documents);

    for doc in &documents {
        let detail = printer.dim(&format!("({}, {})", doc.status, doc.category));
        printer.info(&label(doc), &format!("{} {}", doc.title, detail));
    }

    printer.status("Found", &plural(documents.len(), "document", "documents"));
    Ok(())
}

/// Order by number with unassigned drafts last, then by folder.
fn sort_documents(documents: &mut [XlsDocument]) {
    documents.sort_by(|a, b| {
        let key = |d: &XlsDocument| (d.number == 0, d.number);
        key(a).cmp(&key(b)).then_with(|| a.folder.cmp(&b.folder))
    });
}

fn label(doc: &XlsDocument) -> String {
    if doc.number == 0 {
        "XLS-????".to_string()
    } else {
        format!("XLS-{:04}", doc.number)
    }
}
