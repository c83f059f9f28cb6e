//! Programmatic construction of filter trees.
//!
//! Builders produce the same nodes the parser does, with synthetic tokens
//! (`NO_POSITION` spans) and the same literal normalization.
//!
//! ```
//! use vfilter::ast::builders::{and, eq, gt, index, or};
//!
//! // user_type == 'individual' and (age >= 18 or profile["verified"] == true)
//! let filter = and(
//!     eq("user_type", "individual"),
//!     or(gt("age", 18), eq(index("profile", "verified"), true)),
//! );
//! assert!(filter.is_computed());
//! ```

use crate::ast::{
    BinaryExpr, Expr, Ident, IndexExpr, ListLiteral, Literal, NO_POSITION, ParenExpr, Token,
    TokenKind, UnaryExpr,
};

/// Values usable as a field identifier.
pub trait IntoIdent {
    fn into_ident(self) -> Ident;
}

impl IntoIdent for &str {
    fn into_ident(self) -> Ident {
        Ident::new(Token::of_ident(self, NO_POSITION, NO_POSITION))
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> Ident {
        Ident::new(Token::of_ident(self, NO_POSITION, NO_POSITION))
    }
}

impl IntoIdent for Ident {
    fn into_ident(self) -> Ident {
        self
    }
}

/// Values usable as a scalar literal.
pub trait IntoLiteral {
    fn into_literal(self) -> Literal;
}

/// Literal values accepted as the bound of an ordering comparison.
pub trait IntoBound: IntoLiteral {}

fn number_literal(text: String) -> Literal {
    Literal::new(Token::of_literal(TokenKind::Number, text, NO_POSITION, NO_POSITION))
}

macro_rules! numeric_literals {
    ($($t:ty),*) => {
        $(
            impl IntoLiteral for $t {
                fn into_literal(self) -> Literal {
                    number_literal(self.to_string())
                }
            }

            impl IntoBound for $t {}
        )*
    };
}

numeric_literals!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl IntoLiteral for &str {
    fn into_literal(self) -> Literal {
        Literal::new(Token::of_literal(TokenKind::String, self, NO_POSITION, NO_POSITION))
    }
}

impl IntoLiteral for String {
    fn into_literal(self) -> Literal {
        Literal::new(Token::of_literal(TokenKind::String, self, NO_POSITION, NO_POSITION))
    }
}

impl IntoLiteral for bool {
    fn into_literal(self) -> Literal {
        let kind = if self { TokenKind::True } else { TokenKind::False };
        Literal::new(Token::synthetic(kind))
    }
}

impl IntoLiteral for Literal {
    fn into_literal(self) -> Literal {
        self
    }
}

impl IntoBound for Literal {}

/// Values usable as the right-hand list of `in`.
pub trait IntoList {
    fn into_list(self) -> ListLiteral;
}

fn synthetic_list(values: Vec<Literal>) -> ListLiteral {
    ListLiteral::new(
        Token::synthetic(TokenKind::LParen),
        values,
        Token::synthetic(TokenKind::RParen),
    )
}

impl<T: IntoLiteral> IntoList for Vec<T> {
    fn into_list(self) -> ListLiteral {
        synthetic_list(self.into_iter().map(IntoLiteral::into_literal).collect())
    }
}

impl<T: IntoLiteral, const N: usize> IntoList for [T; N] {
    fn into_list(self) -> ListLiteral {
        synthetic_list(self.into_iter().map(IntoLiteral::into_literal).collect())
    }
}

impl<T: IntoLiteral + Clone> IntoList for &[T] {
    fn into_list(self) -> ListLiteral {
        synthetic_list(self.iter().cloned().map(IntoLiteral::into_literal).collect())
    }
}

impl IntoList for ListLiteral {
    fn into_list(self) -> ListLiteral {
        self
    }
}

pub fn ident(name: impl IntoIdent) -> Ident {
    name.into_ident()
}

pub fn literal(value: impl IntoLiteral) -> Literal {
    value.into_literal()
}

pub fn list(values: impl IntoList) -> ListLiteral {
    values.into_list()
}

/// Binary node with an arbitrary operator and operands; no shape checks.
pub fn binary(op: TokenKind, left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::Binary(BinaryExpr::new(left.into(), Token::synthetic(op), right.into()))
}

pub fn eq(left: impl Into<Expr>, right: impl IntoLiteral) -> Expr {
    binary(TokenKind::Eq, left, right.into_literal())
}

pub fn ne(left: impl Into<Expr>, right: impl IntoLiteral) -> Expr {
    binary(TokenKind::Ne, left, right.into_literal())
}

pub fn lt(left: impl Into<Expr>, right: impl IntoBound) -> Expr {
    binary(TokenKind::Lt, left, right.into_literal())
}

pub fn le(left: impl Into<Expr>, right: impl IntoBound) -> Expr {
    binary(TokenKind::Le, left, right.into_literal())
}

pub fn gt(left: impl Into<Expr>, right: impl IntoBound) -> Expr {
    binary(TokenKind::Gt, left, right.into_literal())
}

pub fn ge(left: impl Into<Expr>, right: impl IntoBound) -> Expr {
    binary(TokenKind::Ge, left, right.into_literal())
}

/// `left in (values...)`
pub fn in_(left: impl Into<Expr>, values: impl IntoList) -> Expr {
    binary(TokenKind::In, left, values.into_list())
}

/// `left like 'pattern'`
pub fn like(left: impl Into<Expr>, pattern: impl Into<String>) -> Expr {
    binary(TokenKind::Like, left, pattern.into().into_literal())
}

pub fn and(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(TokenKind::And, left, right)
}

pub fn or(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    binary(TokenKind::Or, left, right)
}

pub fn not(operand: impl Into<Expr>) -> Expr {
    Expr::Unary(UnaryExpr::new(Token::synthetic(TokenKind::Not), operand.into()))
}

/// `base[key]`; nest calls to build a path: `index(index("user", "profile"), "name")`.
pub fn index(base: impl Into<Expr>, key: impl IntoLiteral) -> Expr {
    Expr::Index(IndexExpr::new(
        base.into(),
        Token::synthetic(TokenKind::LBrack),
        key.into_literal(),
        Token::synthetic(TokenKind::RBrack),
    ))
}

pub fn paren(inner: impl Into<Expr>) -> Expr {
    Expr::Paren(ParenExpr::new(
        Token::synthetic(TokenKind::LParen),
        inner.into(),
        Token::synthetic(TokenKind::RParen),
    ))
}
