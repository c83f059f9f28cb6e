//! CLI support for vfilter
//!
//! Provides programmatic access to the vfilter commands for embedding in
//! other tools.

mod check;
mod convert;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::{ConvertOptions, execute_convert, execute_format};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

use crate::{FilterError, ParseError};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// The filter failed to parse or was rejected
    #[error("{0}")]
    Filter(#[from] crate::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No filter argument and nothing piped on stdin
    #[error("No filter provided. Pass one as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'vfilter docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Filter(e.into())
    }
}

impl From<FilterError> for CliError {
    fn from(e: FilterError) -> Self {
        CliError::Filter(e.into())
    }
}

/// Blank input counts as missing.
fn require_filter(filter: &str) -> Result<&str, CliError> {
    let filter = filter.trim();
    if filter.is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(filter)
}
