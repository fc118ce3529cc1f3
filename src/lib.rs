//! xls - XRPL Standards proposal tooling
//!
//! Parses the metadata preamble and heading structure of XLS proposal
//! documents and validates them against the preamble schema and the
//! amendment templates.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod reference;
pub mod validation;

pub use discovery::{discover, discover_changed, discover_paths, DiscoveryResult, Manifest};
pub use error::{Result, XlsError};
pub use parser::{
    extract_preamble, load_document, parse_document, parse_sections, Author, Category,
    LoadedDocument, ParsedDocument, Preamble, Section, Status, XlsDocument,
};
pub use reference::{EntityKind, EntityLookup, Existence, HttpLookup, OfflineLookup, StaticLookup};
pub use validation::{
    check_duplicate_numbers, validate_document, validate_loaded, Diagnostic, Severity,
    ValidationResult,
};
