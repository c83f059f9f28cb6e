//! Semantic analysis of filter trees.
//!
//! The analyzer walks a tree once and latches the first rule violation; the
//! rest of the walk is skipped. It never mutates the tree.

use tracing::debug;

use crate::{
    ast::{
        BinaryExpr, Expr, Ident, IndexExpr, ListLiteral, Literal, ParenExpr, TokenKind, UnaryExpr,
        is_identifier,
    },
    error::{ErrorKind, FilterError},
    visitor::{Node, Visitor, walk},
};

/// Visitor validating operand shapes, operator applicability and list
/// homogeneity.
#[derive(Debug, Default)]
pub struct Analyzer {
    err: Option<FilterError>,
}

/// Checks that `expr` is an accepted filter tree.
///
/// # Examples
///
/// ```
/// use vfilter::analyze;
/// use vfilter::ast::builders::{gt, literal};
/// use vfilter::error::ErrorKind;
///
/// assert!(analyze(&gt("age", 18)).is_ok());
///
/// let err = analyze(&gt("age", literal("eighteen"))).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::OrderingRightNotNumeric);
///
/// assert_eq!(analyze(None).unwrap_err().kind, ErrorKind::NilExpression);
/// ```
pub fn analyze<'a>(expr: impl Into<Option<&'a Expr>>) -> Result<(), FilterError> {
    let expr = expr.into().ok_or_else(FilterError::nil)?;
    let mut analyzer = Analyzer::new();
    analyzer.analyze(expr);
    match analyzer.into_error() {
        Some(err) => {
            debug!(error = %err, "filter rejected");
            Err(err)
        }
        None => Ok(()),
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze(&mut self, expr: &Expr) {
        walk(self, expr);
    }

    /// First error encountered, if any.
    pub fn error(&self) -> Option<&FilterError> {
        self.err.as_ref()
    }

    pub fn into_error(self) -> Option<FilterError> {
        self.err
    }

    fn check_ident(&self, ident: &Ident) -> Result<(), FilterError> {
        if !ident.token.is(TokenKind::Ident) {
            return Err(FilterError::new(
                ErrorKind::IdentTokenMismatch,
                format!("identifier carries a {} token", ident.token.kind.name()),
                ident.token.start,
            ));
        }
        if !is_identifier(&ident.value) {
            return Err(FilterError::new(
                ErrorKind::InvalidIdentifier,
                format!("'{}' is not a valid identifier", ident.value),
                ident.token.start,
            ));
        }
        Ok(())
    }

    fn check_literal(&self, lit: &Literal) -> Result<(), FilterError> {
        match lit.kind() {
            TokenKind::String => Ok(()),
            TokenKind::Number => match lit.value.parse::<f64>() {
                Ok(_) => Ok(()),
                Err(_) => Err(FilterError::new(
                    ErrorKind::InvalidNumberLiteral,
                    format!("'{}' is not a number", lit.value),
                    lit.token.start,
                )),
            },
            TokenKind::True | TokenKind::False => match lit.value.parse::<bool>() {
                Ok(_) => Ok(()),
                Err(_) => Err(FilterError::new(
                    ErrorKind::InvalidBooleanLiteral,
                    format!("'{}' is not a boolean", lit.value),
                    lit.token.start,
                )),
            },
            other => Err(FilterError::new(
                ErrorKind::UnsupportedLiteralKind,
                format!("literal of kind {} ('{}')", other.name(), lit.value),
                lit.token.start,
            )),
        }
    }

    fn check_list(&self, list: &ListLiteral) -> Result<(), FilterError> {
        let Some(first) = list.values.first() else {
            return Err(FilterError::new(
                ErrorKind::EmptyList,
                "list must contain at least one value",
                list.lparen.start,
            ));
        };

        let expected = first.scalar_kind();
        for value in &list.values[1..] {
            if value.scalar_kind() != expected {
                return Err(FilterError::new(
                    ErrorKind::HeterogeneousList,
                    format!(
                        "list mixes {} and {} values",
                        describe_scalar(first),
                        describe_scalar(value)
                    ),
                    value.token.start,
                ));
            }
        }
        Ok(())
    }

    fn check_unary(&self, unary: &UnaryExpr) -> Result<(), FilterError> {
        if !unary.op.kind.is_unary_operator() {
            return Err(FilterError::new(
                ErrorKind::UnsupportedUnaryOperator,
                format!("{} is not a unary operator", unary.op.kind),
                unary.op.start,
            ));
        }
        if unary.right.is_atomic() {
            return Err(FilterError::new(
                ErrorKind::LogicalOperandNotComputed,
                format!("operand of 'not' must be an expression, found {}", unary.right.describe()),
                unary.right.position(),
            ));
        }
        Ok(())
    }

    fn check_binary(&self, binary: &BinaryExpr) -> Result<(), FilterError> {
        let op = binary.op.kind;

        if op.is_logical_operator() {
            for operand in [&binary.left, &binary.right] {
                if !operand.is_computed() {
                    return Err(FilterError::new(
                        ErrorKind::LogicalOperandNotComputed,
                        format!("operands of {} must be expressions, found {}", op, operand.describe()),
                        operand.position(),
                    ));
                }
            }
            return Ok(());
        }

        if !op.is_binary_operator() {
            return Err(FilterError::new(
                ErrorKind::UnsupportedBinaryOperator,
                format!("{} is not a binary operator", op),
                binary.op.start,
            ));
        }

        check_comparison_left(binary)?;
        let right = binary.right.as_ref();

        match op {
            TokenKind::Eq | TokenKind::Ne => match right {
                Expr::Literal(_) => Ok(()),
                other => Err(FilterError::new(
                    ErrorKind::EqualityRightNotLiteral,
                    format!("right operand of {} must be a literal, found {}", op, other.describe()),
                    other.position(),
                )),
            },
            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => match right {
                Expr::Literal(lit) if lit.is_number() => Ok(()),
                other => Err(FilterError::new(
                    ErrorKind::OrderingRightNotNumeric,
                    format!("right operand of {} must be a number, found {}", op, describe_operand(other)),
                    other.position(),
                )),
            },
            TokenKind::In => match right {
                Expr::List(_) => Ok(()),
                other => Err(FilterError::new(
                    ErrorKind::InRightNotList,
                    format!("right operand of 'in' must be a list, found {}", describe_operand(other)),
                    other.position(),
                )),
            },
            TokenKind::Like => match right {
                Expr::Literal(lit) if lit.is_string() => Ok(()),
                other => Err(FilterError::new(
                    ErrorKind::LikeRightNotString,
                    format!("pattern of 'like' must be a string, found {}", describe_operand(other)),
                    other.position(),
                )),
            },
            other => Err(FilterError::new(
                ErrorKind::UnsupportedBinaryOperator,
                format!("{} is not a binary operator", other),
                binary.op.start,
            )),
        }
    }

    fn check_index(&self, index: &IndexExpr) -> Result<(), FilterError> {
        if !matches!(index.left.as_ref(), Expr::Ident(_) | Expr::Index(_)) {
            return Err(FilterError::new(
                ErrorKind::IndexLeftShape,
                format!("only identifiers can be indexed, found {}", index.left.describe()),
                index.left.position(),
            ));
        }
        if !matches!(index.index.kind(), TokenKind::Number | TokenKind::String) {
            return Err(FilterError::new(
                ErrorKind::IndexNotScalar,
                format!("index must be a number or string, found {}", describe_scalar(&index.index)),
                index.index.token.start,
            ));
        }
        Ok(())
    }

    fn check_paren(&self, paren: &ParenExpr) -> Result<(), FilterError> {
        if paren.inner.is_atomic() {
            return Err(FilterError::new(
                ErrorKind::ParenInnerNotComputed,
                format!("parentheses must enclose an expression, found {}", paren.inner.describe()),
                paren.lparen.start,
            ));
        }
        Ok(())
    }
}

impl Visitor for Analyzer {
    fn visit(&mut self, node: Node<'_>) -> bool {
        if self.err.is_some() {
            return false;
        }

        let result = match node {
            Node::Ident(ident) => self.check_ident(ident),
            Node::Literal(lit) => self.check_literal(lit),
            Node::List(list) => self.check_list(list),
            Node::Unary(unary) => self.check_unary(unary),
            Node::Binary(binary) => self.check_binary(binary),
            Node::Index(index) => self.check_index(index),
            Node::Paren(paren) => self.check_paren(paren),
        };

        match result {
            Ok(()) => true,
            Err(err) => {
                self.err = Some(err);
                false
            }
        }
    }
}

/// Comparisons, `in` and `like` apply to a field: an identifier or index chain.
fn check_comparison_left(binary: &BinaryExpr) -> Result<(), FilterError> {
    match binary.left.as_ref() {
        Expr::Ident(_) | Expr::Index(_) => Ok(()),
        other => Err(FilterError::new(
            ErrorKind::ComparisonLeftShape,
            format!(
                "left operand of {} must be a field, found {}",
                binary.op.kind,
                describe_operand(other)
            ),
            other.position(),
        )),
    }
}

fn describe_scalar(lit: &Literal) -> String {
    match lit.scalar_kind() {
        Some(kind) => kind.name().to_string(),
        None => format!("{} literal", lit.kind().name()),
    }
}

fn describe_operand(expr: &Expr) -> String {
    match expr {
        Expr::Literal(lit) => format!("{} '{}'", describe_scalar(lit), lit.value),
        other => other.describe().to_string(),
    }
}
