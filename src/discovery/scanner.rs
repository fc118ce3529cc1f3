//! File system scanner for discovering XLS documents.
//!
//! Documents live in top-level folders named `XLS-<number>-<slug>`, each
//! holding a `README.md`.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::manifest::Manifest;

/// Prefix of every XLS folder name.
pub const FOLDER_PREFIX: &str = "XLS-";

/// File name of the document inside an XLS folder.
pub const DOCUMENT_FILENAME: &str = "README.md";

/// Check whether a path looks like `.../XLS-*/README.md`.
pub fn is_xls_document(path: &Path) -> bool {
    let is_readme = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n == DOCUMENT_FILENAME);

    let in_xls_folder = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(FOLDER_PREFIX));

    is_readme && in_xls_folder
}

/// Find every XLS document directly under `root`, sorted by path.
pub fn scan_repository(root: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    let mut documents = Vec::new();

    if !root.exists() {
        return documents;
    }

    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !entry.file_type().is_file() || !is_xls_document(path) {
            continue;
        }

        if manifest.is_excluded(path) {
            debug!(path = %path.display(), "excluded by manifest");
            continue;
        }

        documents.push(path.to_path_buf());
    }

    documents.sort();
    documents
}
