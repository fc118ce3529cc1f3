//! Whole-document parsing: preamble, metadata and sections together.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, XlsError};

use super::metadata::XlsDocument;
use super::preamble::{extract_preamble, Preamble};
use super::sections::{parse_sections, Section};

/// Everything the validators need from one document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub metadata: XlsDocument,
    pub preamble: Preamble,
    pub sections: Vec<Section>,
}

/// Parse document text. `folder` is the containing folder's name.
pub fn parse_document(source: &str, folder: &str) -> Result<ParsedDocument> {
    let preamble = extract_preamble(source)?;
    let metadata = XlsDocument::from_preamble(&preamble, folder);
    let sections = parse_sections(source);

    Ok(ParsedDocument {
        metadata,
        preamble,
        sections,
    })
}

/// A document read from disk, keeping its source for line-based checks.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub source: String,
    pub parsed: ParsedDocument,
}

/// Read and parse a document file.
pub fn load_document(path: &Path) -> Result<LoadedDocument> {
    let source = fs::read_to_string(path).map_err(|e| XlsError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    let parsed = parse_document(&source, &folder_name(path))?;

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        source,
        parsed,
    })
}

/// Name of the folder containing a document (`XLS-0070-credentials`).
pub fn folder_name(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}
