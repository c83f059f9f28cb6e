//! Textual output for filter trees and backend filters.
//!
//! # Features
//!
//! - **SQL-like text** via [`to_sql()`] and `Display` for [`Expr`]
//! - **Compact JSON** via [`to_json()`] for a translated [`Filter`]
//! - **Pretty JSON** via [`to_json_pretty()`] with 2-space indentation
//!
//! # Examples
//!
//! ```
//! use vfilter::ast::builders::{and, eq, gt, not, or};
//! use vfilter::output::to_sql;
//!
//! let expr = and(gt("age", 18), or(eq("status", "active"), not(eq("vip", true))));
//! assert_eq!(
//!     to_sql(&expr),
//!     "age > 18 and (status == 'active' or not (vip == true))"
//! );
//! ```

use std::fmt;

use crate::{
    ast::{Expr, Literal, TokenKind},
    filter::Filter,
    visitor::{Node, Visitor},
};

/// Visitor rendering a tree in the canonical SQL-like form.
///
/// Binary operands are wrapped in parentheses only where they bind looser
/// than their parent; the operand of `not` is always wrapped.
#[derive(Debug, Default)]
pub struct SqlPrinter {
    buf: String,
}

impl SqlPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print<'a>(mut self, node: impl Into<Node<'a>>) -> String {
        self.write_node(node.into());
        self.buf
    }

    fn write_node(&mut self, node: Node<'_>) {
        self.visit(node);
    }

    fn write_expr(&mut self, expr: &Expr, wrap: bool) {
        if wrap {
            self.buf.push('(');
            self.write_node(expr.into());
            self.buf.push(')');
        } else {
            self.write_node(expr.into());
        }
    }

    fn write_literal(&mut self, lit: &Literal) {
        if lit.kind() == TokenKind::String {
            // No escaping in this dialect
            self.buf.push('\'');
            self.buf.push_str(&lit.value);
            self.buf.push('\'');
        } else {
            self.buf.push_str(&lit.value);
        }
    }

    fn write_op(&mut self, kind: TokenKind) {
        self.buf.push(' ');
        self.buf.push_str(kind.literal());
        self.buf.push(' ');
    }
}

impl Visitor for SqlPrinter {
    fn visit(&mut self, node: Node<'_>) -> bool {
        match node {
            Node::Ident(ident) => self.buf.push_str(&ident.value),
            Node::Literal(lit) => self.write_literal(lit),
            Node::List(list) => {
                self.buf.push('(');
                for (i, value) in list.values.iter().enumerate() {
                    if i > 0 {
                        self.buf.push(',');
                    }
                    self.write_literal(value);
                }
                self.buf.push(')');
            }
            Node::Unary(unary) => {
                self.buf.push_str(unary.op.kind.literal());
                self.buf.push(' ');
                self.write_expr(&unary.right, true);
            }
            Node::Binary(binary) => {
                self.write_expr(&binary.left, binary.is_left_lower());
                self.write_op(binary.op.kind);
                self.write_expr(&binary.right, binary.is_right_lower());
            }
            Node::Index(index) => {
                self.write_expr(&index.left, false);
                self.buf.push('[');
                self.write_literal(&index.index);
                self.buf.push(']');
            }
            Node::Paren(paren) => self.write_expr(&paren.inner, true),
        }
        // Children are written in place
        false
    }
}

/// Renders a tree as SQL-like filter text.
pub fn to_sql(expr: &Expr) -> String {
    SqlPrinter::new().print(expr)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_sql(self))
    }
}

/// Converts a filter to compact JSON.
///
/// ```
/// use vfilter::ast::builders::gt;
/// use vfilter::output::to_json;
/// use vfilter::to_filter;
///
/// let filter = to_filter(&gt("age", 18)).unwrap();
/// assert_eq!(
///     to_json(&filter).unwrap(),
///     r#"{"must":[{"key":"age","range":{"gt":18.0}}]}"#
/// );
/// ```
pub fn to_json(filter: &Filter) -> Result<String, serde_json::Error> {
    serde_json::to_string(filter)
}

/// Converts a filter to JSON with 2-space indentation.
pub fn to_json_pretty(filter: &Filter) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(filter)
}
