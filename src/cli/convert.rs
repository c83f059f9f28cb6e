//! Convert filters to backend JSON or canonical text

use super::{CliError, require_filter};
use crate::{output, parse_and_analyze, to_filter};

/// Options for the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// The filter text
    pub filter: String,
    /// Pretty-print the JSON
    pub pretty: bool,
}

/// Translate a filter and render the backend filter as JSON.
pub fn execute_convert(options: &ConvertOptions) -> Result<String, CliError> {
    let expr = parse_and_analyze(require_filter(&options.filter)?)?;
    let filter = to_filter(&expr)?;

    let json = if options.pretty {
        output::to_json_pretty(&filter)?
    } else {
        output::to_json(&filter)?
    };
    Ok(json)
}

/// Render a filter in canonical SQL-like form.
pub fn execute_format(filter: &str) -> Result<String, CliError> {
    let expr = parse_and_analyze(require_filter(filter)?)?;
    Ok(output::to_sql(&expr))
}
