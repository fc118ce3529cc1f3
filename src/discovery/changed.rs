//! Changed-document detection for CI runs.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use super::manifest::Manifest;
use super::scanner::{is_xls_document, scan_repository};

/// Default git ref that changes are compared against.
pub const DEFAULT_BASE_REF: &str = "origin/master";

/// XLS documents touched between `base` and `HEAD`.
///
/// Falls back to every document in the repository if git is unavailable or
/// the diff fails.
pub fn changed_documents(root: &Path, base: &str, manifest: &Manifest) -> Vec<PathBuf> {
    let output = Command::new("git")
        .args(["diff", "--name-only", base, "HEAD"])
        .current_dir(root)
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let changed = filter_changed(root, &stdout, manifest);
            info!(base, count = changed.len(), "changed documents");
            changed
        }
        Ok(output) => {
            warn!(
                base,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git diff failed, checking all documents"
            );
            scan_repository(root, manifest)
        }
        Err(e) => {
            warn!(error = %e, "could not run git, checking all documents");
            scan_repository(root, manifest)
        }
    }
}

/// Keep the `XLS-*/README.md` entries of a `git diff --name-only` listing
/// that still exist on disk.
pub fn filter_changed(root: &Path, diff_output: &str, manifest: &Manifest) -> Vec<PathBuf> {
    let mut documents: Vec<PathBuf> = diff_output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Path::new)
        .filter(|rel| rel.components().count() == 2 && is_xls_document(rel))
        .map(|rel| root.join(rel))
        .filter(|path| path.is_file() && !manifest.is_excluded(path))
        .collect();

    documents.sort();
    documents.dedup();
    documents
}
