//! Parsing of XLS proposal documents.
//!
//! An XLS document is a markdown file with a mandatory `<pre>` metadata
//! block followed by heading-structured prose.
//!
//! # Document Structure
//!
//! - A `<pre>...</pre>` block of `key: value` lines (title, author, status, ...)
//! - A `#` title heading
//! - `##` sections, optionally numbered (`## 2. Specification`), with nested
//!   `###`/`####` subsections
//!
//! # Usage
//!
//! ```ignore
//! use xls::parser::load_document;
//!
//! let doc = load_document(Path::new("XLS-0070-credentials/README.md"))?;
//! println!("XLS-{}: {}", doc.parsed.metadata.number, doc.parsed.metadata.title);
//! ```

mod document;
pub mod metadata;
pub mod normalize;
pub mod preamble;
pub mod sections;
pub mod span;

pub use document::{folder_name, load_document, parse_document, LoadedDocument, ParsedDocument};
pub use metadata::{Author, Category, Status, XlsDocument};
pub use preamble::{extract_preamble, Preamble, PreambleKey};
pub use sections::{children, parse_sections, top_level, Section};
pub use span::{LineIndex, Spanned};
