//! Filter expressions for vector-store queries.
//!
//! Text such as `user_type == 'individual' and (age >= 18 or verified == true)`
//! is parsed into an [`Expr`] tree, checked by the [`analyzer`], printed back by
//! [`output`] and lowered by the [`translator`] into a `must`/`should`/`must_not`
//! [`Filter`].
//!
//! ```
//! use vfilter::{parse_and_analyze, to_filter};
//!
//! let expr = parse_and_analyze("age > 18 and status == 'active'").unwrap();
//! let filter = to_filter(&expr).unwrap();
//! assert_eq!(filter.must.len(), 2);
//! ```

pub mod analyzer;
pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod filter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod path;
pub mod translator;
pub mod visitor;

pub use analyzer::{Analyzer, analyze};
pub use ast::{Expr, Position, Token, TokenKind};
pub use error::{Error, ErrorKind, FilterError};
pub use filter::{Condition, FieldCondition, Filter, Match, Range};
pub use lexer::{Lexer, tokenize};
pub use output::{to_json, to_json_pretty, to_sql};
pub use parser::{MAX_DEPTH, ParseError, Parser};
pub use translator::{Translator, to_filter};

/// Parses filter text into a tree without checking it.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(text))?.parse()
}

/// Parses filter text and runs the analyzer over the result.
pub fn parse_and_analyze(text: &str) -> Result<Expr, Error> {
    let expr = parse(text)?;
    analyze(&expr)?;
    Ok(expr)
}
