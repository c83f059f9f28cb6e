//! # vfilter - Abstract Syntax Tree
//!
//! This module defines the typed tree for filter expressions such as
//!
//! ```text
//! user_type == 'individual' and (age >= 18 or verified == true)
//! ```
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Token kinds, positioned tokens, keyword and identifier rules,
//!   numeric normalization
//! - **[operators]** - Operator classes and the precedence ladder
//! - **[expressions]** - Node variants and their span/precedence helpers
//! - **[builders]** - Programmatic constructors (`eq`, `and`, `in_`, `index`, ...)
//!
//! ## Node Variants
//!
//! Atomic leaves:
//!
//! - `Ident` - field name (`age`)
//! - `Literal` - string, number or boolean (`'active'`, `18`, `true`)
//! - `List` - literal list, only meaningful after `in` (`(1,2,3)`)
//!
//! Computed interior nodes:
//!
//! - `Unary` - `not x`
//! - `Binary` - `a and b`, `age > 18`, `status in ('a','b')`, `name like 'J%'`
//! - `Index` - `user["name"]`, `tags[0]`
//! - `Paren` - `(x)`
//!
//! ## Precedence
//!
//! ```text
//! or < and < not < == != < < <= > >= < in like
//! ```
//!
//! `BinaryExpr::is_left_lower` / `is_right_lower` report when an operand binds
//! looser than its parent and must be parenthesized when printed.
//!
//! ## Numbers
//!
//! Numeric literals are stored as the shortest round-trip decimal with no
//! exponent: `123.000`, `1.23e+02` and `00123` all become `123`.
pub mod builders;
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{
    BinaryExpr, Expr, Ident, IndexExpr, ListLiteral, Literal, ParenExpr, ScalarKind, UnaryExpr,
};
pub use tokens::{
    NO_POSITION, Position, Token, TokenKind, is_identifier, lookup_keyword, normalize_number,
};
