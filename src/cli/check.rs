//! Validate filters without translating them

use tracing::debug;

use super::{CliError, require_filter};
use crate::{Expr, parse, parse_and_analyze};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter text
    pub filter: String,
    /// Only parse, skip semantic analysis
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid(Expr),
    /// Filter parsed and passed semantic analysis
    Valid(Expr),
}

/// Execute a vfilter check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let filter = require_filter(&options.filter)?;

    if options.syntax_only {
        let expr = parse(filter)?;
        debug!(filter = %expr, "syntax is valid");
        return Ok(CheckResult::SyntaxValid(expr));
    }

    let expr = parse_and_analyze(filter)?;
    debug!(filter = %expr, "filter is valid");
    Ok(CheckResult::Valid(expr))
}
