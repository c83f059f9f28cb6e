//! Error types shared by the analyzer, the translator and the glue API.

use std::fmt;

use thiserror::Error;

use crate::ast::Position;
use crate::parser::ParseError;

/// Tag identifying what went wrong. Tests compare errors by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Structural
    NilExpression,
    UnsupportedExpression,

    // Identifier
    IdentTokenMismatch,
    InvalidIdentifier,

    // Literal
    UnsupportedLiteralKind,
    InvalidNumberLiteral,
    InvalidBooleanLiteral,

    // List
    EmptyList,
    HeterogeneousList,
    EmptyInList,

    // Shape
    ComparisonLeftShape,
    IndexLeftShape,
    IndexNotScalar,
    LogicalOperandNotComputed,
    ParenInnerNotComputed,

    // Operator
    UnsupportedUnaryOperator,
    UnsupportedBinaryOperator,
    EqualityRightNotLiteral,
    OrderingRightNotNumeric,
    InRightNotList,
    LikeRightNotString,

    // Translation
    NotANumber,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::NilExpression => "NilExpression",
            ErrorKind::UnsupportedExpression => "UnsupportedExpression",
            ErrorKind::IdentTokenMismatch => "IdentTokenMismatch",
            ErrorKind::InvalidIdentifier => "InvalidIdentifier",
            ErrorKind::UnsupportedLiteralKind => "UnsupportedLiteralKind",
            ErrorKind::InvalidNumberLiteral => "InvalidNumberLiteral",
            ErrorKind::InvalidBooleanLiteral => "InvalidBooleanLiteral",
            ErrorKind::EmptyList => "EmptyList",
            ErrorKind::HeterogeneousList => "HeterogeneousList",
            ErrorKind::EmptyInList => "EmptyInList",
            ErrorKind::ComparisonLeftShape => "ComparisonLeftShape",
            ErrorKind::IndexLeftShape => "IndexLeftShape",
            ErrorKind::IndexNotScalar => "IndexNotScalar",
            ErrorKind::LogicalOperandNotComputed => "LogicalOperandNotComputed",
            ErrorKind::ParenInnerNotComputed => "ParenInnerNotComputed",
            ErrorKind::UnsupportedUnaryOperator => "UnsupportedUnaryOperator",
            ErrorKind::UnsupportedBinaryOperator => "UnsupportedBinaryOperator",
            ErrorKind::EqualityRightNotLiteral => "EqualityRightNotLiteral",
            ErrorKind::OrderingRightNotNumeric => "OrderingRightNotNumeric",
            ErrorKind::InRightNotList => "InRightNotList",
            ErrorKind::LikeRightNotString => "LikeRightNotString",
            ErrorKind::NotANumber => "NotANumber",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rejected filter tree: tag, human detail and the offending node's position.
///
/// Renders as `"<Tag>: <detail> at L:C"`; the position suffix is left out for
/// synthetic nodes.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {detail}{}", position_suffix(.position))]
pub struct FilterError {
    pub kind: ErrorKind,
    pub detail: String,
    pub position: Position,
}

fn position_suffix(position: &Position) -> String {
    if position.is_none() {
        String::new()
    } else {
        format!(" at {}", position)
    }
}

impl FilterError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>, position: Position) -> Self {
        FilterError {
            kind,
            detail: detail.into(),
            position,
        }
    }

    pub fn nil() -> Self {
        FilterError::new(
            ErrorKind::NilExpression,
            "no expression to process",
            Position::default(),
        )
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

/// Any failure of the text-to-filter pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl Error {
    /// The filter error tag, if this is an analysis or translation failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Parse(_) => None,
            Error::Filter(e) => Some(e.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let err = FilterError::new(
            ErrorKind::OrderingRightNotNumeric,
            "right operand of '>' must be a number, found string 'eighteen'",
            Position::new(1, 7),
        );
        assert_eq!(
            err.to_string(),
            "OrderingRightNotNumeric: right operand of '>' must be a number, found string 'eighteen' at 1:7"
        );
    }

    #[test]
    fn test_display_without_position() {
        let err = FilterError::nil();
        assert_eq!(err.to_string(), "NilExpression: no expression to process");
        assert!(err.is(ErrorKind::NilExpression));
    }
}
