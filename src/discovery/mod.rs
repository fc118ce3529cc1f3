//! Finding XLS documents in a standards repository.
//!
//! Documents are either listed explicitly, found by scanning the repository
//! root for `XLS-*/README.md`, or taken from a git diff for CI runs. An
//! optional `xls.yaml` manifest in the root tunes excludes and the
//! reference lookup.
//!
//! # Example
//!
//! ```ignore
//! use xls::discovery::discover;
//!
//! let result = discover(".")?;
//! println!("Found {} documents", result.documents.len());
//! ```

mod changed;
mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

pub use changed::{changed_documents, filter_changed, DEFAULT_BASE_REF};
pub use manifest::{Manifest, ReferenceConfig};
pub use scanner::{is_xls_document, scan_repository, DOCUMENT_FILENAME, FOLDER_PREFIX};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "xls.yaml";

/// Result of discovering documents.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The loaded manifest (default if no xls.yaml found).
    pub manifest: Manifest,

    /// Document paths to process, in order.
    pub documents: Vec<PathBuf>,
}

/// Load the manifest from `root`, if there is one.
pub fn load_manifest(root: &Path) -> Result<Manifest> {
    let manifest_path = root.join(MANIFEST_FILENAME);
    if manifest_path.exists() {
        debug!(path = %manifest_path.display(), "loading manifest");
        Manifest::load(&manifest_path)
    } else {
        Ok(Manifest::default())
    }
}

/// Discover every document in a repository.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let manifest = load_manifest(&root)?;
    let documents = scan_repository(&root, &manifest);

    Ok(DiscoveryResult {
        manifest,
        documents,
    })
}

/// Discover documents changed since `base` (see [`changed_documents`]).
pub fn discover_changed(root: impl AsRef<Path>, base: &str) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let manifest = load_manifest(&root)?;
    let documents = changed_documents(&root, base, &manifest);

    Ok(DiscoveryResult {
        manifest,
        documents,
    })
}

/// Use explicitly listed paths. A directory stands for its `README.md`.
///
/// The manifest is still read from `root` for lookup settings, but excludes
/// are not applied to explicit paths.
pub fn discover_paths(root: impl AsRef<Path>, paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let manifest = load_manifest(&root)?;

    let documents = paths
        .iter()
        .map(|path| {
            if path.is_dir() {
                path.join(DOCUMENT_FILENAME)
            } else {
                path.clone()
            }
        })
        .collect();

    Ok(DiscoveryResult {
        manifest,
        documents,
    })
}
