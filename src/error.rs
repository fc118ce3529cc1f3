use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for xls operations
#[derive(Error, Diagnostic, Debug)]
pub enum XlsError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(xls::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(xls::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("No <pre> metadata block found")]
    #[diagnostic(
        code(xls::preamble),
        help("Every XLS document must start with a <pre>...</pre> block of `key: value` lines")
    )]
    MissingPreamble,

    #[error("Configuration error: {message}")]
    #[diagnostic(code(xls::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, XlsError>;
