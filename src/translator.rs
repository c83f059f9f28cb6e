//! Lowering of filter trees into the backend [`Filter`].
//!
//! # Grouping
//!
//! - `and` operands spread across the current filter's `must`; nested `and`s
//!   flatten into the same filter.
//! - `or` operands spread across `should`; nested `or`s flatten.
//! - Where the logical operator changes, the sub-expression is translated
//!   against a fresh filter and embedded as a nested filter condition.
//! - `not x` adds one condition to `must_not`.
//! - `==` goes to `must`, `!=` to `must_not`. Under `or`, conditions that do
//!   not belong in `must` are wrapped so every `should` entry is one condition.
//!
//! # Values
//!
//! Numbers on `==`/`!=`/`in` are narrowed to `i64` (truncated toward zero);
//! ordering bounds keep the full `f64`.

use tracing::{debug, trace};

use crate::{
    analyzer::analyze,
    ast::{BinaryExpr, Expr, ListLiteral, Literal, Position, TokenKind, UnaryExpr},
    error::{ErrorKind, FilterError},
    filter::{Condition, Filter, Group, Match, Range},
    path::{dotted, extract_index_path},
    visitor::{Node, Visitor, walk},
};

/// A literal value coerced for condition emission.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<FieldValue>),
}

impl FieldValue {
    fn type_name(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Number(_) => "number",
            FieldValue::Bool(_) => "bool",
            FieldValue::List(_) => "list",
        }
    }
}

/// Analyzes `expr` and translates it into a backend filter.
///
/// # Examples
///
/// ```
/// use vfilter::ast::builders::{and, eq, gt};
/// use vfilter::filter::Match;
/// use vfilter::to_filter;
///
/// let filter = to_filter(&and(gt("age", 18), eq("status", "active"))).unwrap();
/// assert_eq!(filter.must.len(), 2);
/// assert_eq!(
///     filter.must[1].field().and_then(|f| f.as_match()),
///     Some(&Match::Keyword("active".to_string()))
/// );
/// ```
pub fn to_filter<'a>(expr: impl Into<Option<&'a Expr>>) -> Result<Filter, FilterError> {
    let expr = expr.into().ok_or_else(FilterError::nil)?;
    analyze(expr)?;

    debug!(filter = %expr, "translating filter");
    let mut translator = Translator::new();
    translator.translate(expr)?;
    Ok(translator.into_filter())
}

/// Visitor building a [`Filter`].
///
/// Atomic nodes load the field slots (`current_key` for identifiers and
/// index chains, `current_value` for literals and lists); computed nodes emit
/// conditions into the translator's filter. The first error is latched and
/// stops further work.
#[derive(Debug, Default)]
pub struct Translator {
    filter: Filter,
    current_key: Option<String>,
    current_value: Option<FieldValue>,
    err: Option<FilterError>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates `expr` into this translator's filter.
    ///
    /// On error the filter holds whatever was emitted before the failure and
    /// must not be used as a valid result.
    pub fn translate(&mut self, expr: &Expr) -> Result<(), FilterError> {
        ensure_condition(expr)?;
        self.descend(expr)
    }

    /// The filter built so far.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn error(&self) -> Option<&FilterError> {
        self.err.as_ref()
    }

    pub fn into_filter(self) -> Filter {
        self.filter
    }

    /// Dotted field key of an identifier or index chain. The field slots are
    /// left as they were found.
    pub fn extract_field_key(&mut self, expr: &Expr) -> Result<String, FilterError> {
        if !matches!(expr, Expr::Ident(_) | Expr::Index(_)) {
            return Err(FilterError::new(
                ErrorKind::ComparisonLeftShape,
                format!("expected a field, found {}", expr.describe()),
                expr.position(),
            ));
        }

        let saved = self.take_slots();
        walk(self, expr);
        let result = match self.err.take() {
            Some(err) => Err(err),
            None => self.current_key.take().ok_or_else(|| {
                FilterError::new(ErrorKind::UnsupportedExpression, "no field key produced", expr.position())
            }),
        };
        self.restore_slots(saved);
        result
    }

    /// Coerced value of a literal or list. The field slots are left as they
    /// were found.
    pub fn extract_field_value<'a>(
        &mut self,
        node: impl Into<Node<'a>>,
    ) -> Result<FieldValue, FilterError> {
        let node = node.into();
        if !matches!(node, Node::Literal(_) | Node::List(_)) {
            return Err(FilterError::new(
                ErrorKind::UnsupportedExpression,
                "expected a literal or list value",
                node.start(),
            ));
        }

        let saved = self.take_slots();
        walk(self, node);
        let result = match self.err.take() {
            Some(err) => Err(err),
            None => self.current_value.take().ok_or_else(|| {
                FilterError::new(ErrorKind::UnsupportedExpression, "no field value produced", node.start())
            }),
        };
        self.restore_slots(saved);
        result
    }

    fn take_slots(&mut self) -> Slots {
        Slots {
            key: self.current_key.take(),
            value: self.current_value.take(),
            err: self.err.take(),
        }
    }

    fn restore_slots(&mut self, saved: Slots) {
        self.current_key = saved.key;
        self.current_value = saved.value;
        self.err = saved.err;
    }

    /// Walks `expr` and surfaces a latched error.
    fn descend(&mut self, expr: &Expr) -> Result<(), FilterError> {
        walk(self, expr);
        match &self.err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn translate_binary(&mut self, binary: &BinaryExpr) -> Result<(), FilterError> {
        match binary.op.kind {
            TokenKind::And => {
                self.conjunct(&binary.left)?;
                self.conjunct(&binary.right)
            }
            TokenKind::Or => {
                self.disjunct(&binary.left)?;
                self.disjunct(&binary.right)
            }
            _ => {
                let (group, condition) = self.field_condition(binary)?;
                self.filter.push(group, condition);
                Ok(())
            }
        }
    }

    fn translate_not(&mut self, unary: &UnaryExpr) -> Result<(), FilterError> {
        if !unary.op.kind.is_unary_operator() {
            return Err(FilterError::new(
                ErrorKind::UnsupportedUnaryOperator,
                format!("{} is not a unary operator", unary.op.kind),
                unary.op.start,
            ));
        }
        let condition = self.negated_condition(&unary.right)?;
        self.filter.must_not.push(condition);
        Ok(())
    }

    /// Operand of `and`.
    fn conjunct(&mut self, operand: &Expr) -> Result<(), FilterError> {
        ensure_condition(operand)?;
        if operand.logical_op() == Some(TokenKind::Or) {
            let condition = self.build_nested_condition(operand)?;
            self.filter.must.push(condition);
            return Ok(());
        }
        self.descend(operand.unparen())
    }

    /// Operand of `or`.
    fn disjunct(&mut self, operand: &Expr) -> Result<(), FilterError> {
        ensure_condition(operand)?;
        let inner = operand.unparen();
        match inner {
            Expr::Binary(binary) if binary.op.kind == TokenKind::Or => self.descend(inner),
            Expr::Binary(binary) if !binary.op.kind.is_logical_operator() => {
                let (group, condition) = self.field_condition(binary)?;
                self.filter.should.push(single_group(group, condition));
                Ok(())
            }
            _ => {
                let condition = self.build_nested_condition(inner)?;
                self.filter.should.push(condition);
                Ok(())
            }
        }
    }

    /// Operand of `not`, as the one condition to place in `must_not`.
    fn negated_condition(&mut self, operand: &Expr) -> Result<Condition, FilterError> {
        ensure_condition(operand)?;
        match operand.unparen() {
            Expr::Binary(binary) if !binary.op.kind.is_logical_operator() => {
                let (group, condition) = self.field_condition(binary)?;
                Ok(single_group(group, condition))
            }
            inner => self.build_nested_condition(inner),
        }
    }

    /// Translates `expr` against a fresh filter and wraps it as one condition.
    fn build_nested_condition(&mut self, expr: &Expr) -> Result<Condition, FilterError> {
        let mut nested = Translator::new();
        nested.translate(expr)?;
        Ok(Condition::nested(nested.into_filter()))
    }

    /// Condition for a comparison, `in` or `like`, with the group it belongs to.
    fn field_condition(&mut self, binary: &BinaryExpr) -> Result<(Group, Condition), FilterError> {
        let op = binary.op.kind;
        if !op.is_binary_operator() || op.is_logical_operator() {
            return Err(FilterError::new(
                ErrorKind::UnsupportedBinaryOperator,
                format!("{} is not a comparison operator", op),
                binary.op.start,
            ));
        }

        let key = self.extract_field_key(&binary.left)?;
        let right = binary.right.as_ref();

        let emitted = match op {
            TokenKind::Eq | TokenKind::Ne => {
                let Expr::Literal(lit) = right else {
                    return Err(FilterError::new(
                        ErrorKind::EqualityRightNotLiteral,
                        format!("right operand of {} must be a literal, found {}", op, right.describe()),
                        right.position(),
                    ));
                };
                let value = self.extract_field_value(lit)?;
                let group = if op == TokenKind::Eq { Group::Must } else { Group::MustNot };
                (group, Condition::matching(key, scalar_match(&value, lit.token.start)?))
            }

            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => {
                let Expr::Literal(lit) = right else {
                    return Err(FilterError::new(
                        ErrorKind::OrderingRightNotNumeric,
                        format!("right operand of {} must be a number, found {}", op, right.describe()),
                        right.position(),
                    ));
                };
                let bound = self.numeric_bound(lit)?;
                let mut range = Range::default();
                match op {
                    TokenKind::Lt => range.lt = Some(bound),
                    TokenKind::Le => range.lte = Some(bound),
                    TokenKind::Gt => range.gt = Some(bound),
                    _ => range.gte = Some(bound),
                }
                (Group::Must, Condition::range(key, range))
            }

            TokenKind::In => {
                let Expr::List(list) = right else {
                    return Err(FilterError::new(
                        ErrorKind::InRightNotList,
                        format!("right operand of 'in' must be a list, found {}", right.describe()),
                        right.position(),
                    ));
                };
                (Group::Must, self.in_condition(key, list)?)
            }

            TokenKind::Like => match right {
                Expr::Literal(lit) if lit.is_string() => {
                    // Wildcards are passed through uninterpreted
                    (Group::Must, Condition::matching(key, Match::Text(lit.value.clone())))
                }
                other => {
                    return Err(FilterError::new(
                        ErrorKind::LikeRightNotString,
                        format!("pattern of 'like' must be a string, found {}", other.describe()),
                        other.position(),
                    ));
                }
            },

            other => {
                return Err(FilterError::new(
                    ErrorKind::UnsupportedBinaryOperator,
                    format!("{} is not a comparison operator", other),
                    binary.op.start,
                ));
            }
        };

        trace!(op = op.name(), group = ?emitted.0, condition = ?emitted.1, "emitted condition");
        Ok(emitted)
    }

    fn numeric_bound(&mut self, lit: &Literal) -> Result<f64, FilterError> {
        match self.extract_field_value(lit)? {
            FieldValue::Number(n) if n.is_finite() => Ok(n),
            other => Err(FilterError::new(
                ErrorKind::NotANumber,
                format!("range bound must be a finite number, found {} '{}'", other.type_name(), lit.value),
                lit.token.start,
            )),
        }
    }

    fn in_condition(&mut self, key: String, list: &ListLiteral) -> Result<Condition, FilterError> {
        let values = match self.extract_field_value(list)? {
            FieldValue::List(values) => values,
            other => vec![other],
        };
        let position = list.lparen.start;

        let Some(first) = values.first() else {
            return Err(FilterError::new(
                ErrorKind::EmptyInList,
                format!("'in' list for '{}' is empty", key),
                position,
            ));
        };

        let heterogeneous = |value: &FieldValue| {
            FilterError::new(
                ErrorKind::HeterogeneousList,
                format!("'in' list for '{}' mixes {} and {} values", key, first.type_name(), value.type_name()),
                position,
            )
        };

        match first {
            FieldValue::String(_) => {
                let mut keywords = Vec::with_capacity(values.len());
                for value in &values {
                    match value {
                        FieldValue::String(s) => keywords.push(s.clone()),
                        other => return Err(heterogeneous(other)),
                    }
                }
                Ok(Condition::matching(key, Match::Keywords(keywords)))
            }
            FieldValue::Number(_) => {
                let mut integers = Vec::with_capacity(values.len());
                for value in &values {
                    match value {
                        // `as` truncates toward zero
                        FieldValue::Number(n) => integers.push(*n as i64),
                        other => return Err(heterogeneous(other)),
                    }
                }
                Ok(Condition::matching(key, Match::Integers(integers)))
            }
            FieldValue::Bool(_) => {
                // No boolean set match: one equality per element, any may hold
                let mut any = Filter::new();
                for value in &values {
                    match value {
                        FieldValue::Bool(b) => any.should.push(Condition::matching(key.clone(), Match::Boolean(*b))),
                        other => return Err(heterogeneous(other)),
                    }
                }
                Ok(Condition::nested(any))
            }
            FieldValue::List(_) => Err(FilterError::new(
                ErrorKind::UnsupportedExpression,
                format!("'in' list for '{}' contains a nested list", key),
                position,
            )),
        }
    }
}

impl Visitor for Translator {
    fn visit(&mut self, node: Node<'_>) -> bool {
        if self.err.is_some() {
            return false;
        }

        let result = match node {
            Node::Ident(ident) => {
                self.current_key = Some(ident.value.clone());
                Ok(())
            }
            Node::Index(index) => extract_index_path(index).map(|path| {
                self.current_key = Some(dotted(&path));
            }),
            Node::Literal(lit) => literal_value(lit).map(|value| {
                self.current_value = Some(value);
            }),
            Node::List(list) => list
                .values
                .iter()
                .map(literal_value)
                .collect::<Result<Vec<_>, _>>()
                .map(|values| {
                    self.current_value = Some(FieldValue::List(values));
                }),
            Node::Paren(paren) => self.descend(&paren.inner),
            Node::Unary(unary) => self.translate_not(unary),
            Node::Binary(binary) => self.translate_binary(binary),
        };

        if let Err(err) = result {
            self.err = Some(err);
        }
        // Every node handles its own children
        false
    }
}

struct Slots {
    key: Option<String>,
    value: Option<FieldValue>,
    err: Option<FilterError>,
}

/// Only binary and unary nodes (possibly parenthesized) produce conditions.
fn ensure_condition(expr: &Expr) -> Result<(), FilterError> {
    match expr.unparen() {
        Expr::Binary(_) | Expr::Unary(_) => Ok(()),
        other => Err(FilterError::new(
            ErrorKind::UnsupportedExpression,
            format!("{} is not a condition", other.describe()),
            other.position(),
        )),
    }
}

/// A condition that is valid as a single `should`/`must_not` entry: `must`
/// conditions as they are, anything else wrapped in a filter of its own.
fn single_group(group: Group, condition: Condition) -> Condition {
    match group {
        Group::Must => condition,
        other => {
            let mut wrapper = Filter::new();
            wrapper.push(other, condition);
            Condition::nested(wrapper)
        }
    }
}

fn literal_value(lit: &Literal) -> Result<FieldValue, FilterError> {
    match lit.kind() {
        TokenKind::String => Ok(FieldValue::String(lit.value.clone())),
        TokenKind::Number => lit.value.parse().map(FieldValue::Number).map_err(|_| {
            FilterError::new(
                ErrorKind::InvalidNumberLiteral,
                format!("'{}' is not a number", lit.value),
                lit.token.start,
            )
        }),
        TokenKind::True | TokenKind::False => lit.value.parse().map(FieldValue::Bool).map_err(|_| {
            FilterError::new(
                ErrorKind::InvalidBooleanLiteral,
                format!("'{}' is not a boolean", lit.value),
                lit.token.start,
            )
        }),
        other => Err(FilterError::new(
            ErrorKind::UnsupportedLiteralKind,
            format!("literal of kind {}", other.name()),
            lit.token.start,
        )),
    }
}

fn scalar_match(value: &FieldValue, position: Position) -> Result<Match, FilterError> {
    match value {
        FieldValue::String(s) => Ok(Match::Keyword(s.clone())),
        // `as` truncates toward zero
        FieldValue::Number(n) => Ok(Match::Integer(*n as i64)),
        FieldValue::Bool(b) => Ok(Match::Boolean(*b)),
        FieldValue::List(_) => Err(FilterError::new(
            ErrorKind::EqualityRightNotLiteral,
            "equality against a list",
            position,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::{eq, index, literal, list};
    use pretty_assertions::assert_eq;

    fn primed() -> Translator {
        let mut translator = Translator::new();
        translator.current_key = Some("outer".to_string());
        translator.current_value = Some(FieldValue::Bool(true));
        translator
    }

    #[test]
    fn test_extract_field_key_restores_slots() {
        let mut translator = primed();
        let key = translator
            .extract_field_key(&index(index("user", "profile"), "name"))
            .unwrap();
        assert_eq!(key, "user.profile.name");
        assert_eq!(translator.current_key.as_deref(), Some("outer"));
        assert_eq!(translator.current_value, Some(FieldValue::Bool(true)));
    }

    #[test]
    fn test_extract_field_key_restores_slots_on_error() {
        let mut translator = primed();
        let err = translator
            .extract_field_key(&index(index("tags", true), "x"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::IndexNotScalar);
        assert_eq!(translator.current_key.as_deref(), Some("outer"));
        assert_eq!(translator.current_value, Some(FieldValue::Bool(true)));
        assert!(translator.error().is_none());
    }

    #[test]
    fn test_extract_field_key_is_idempotent() {
        let mut translator = Translator::new();
        let expr = index("tags", 0);
        let first = translator.extract_field_key(&expr).unwrap();
        let second = translator.extract_field_key(&expr).unwrap();
        assert_eq!(first, "tags.0");
        assert_eq!(first, second);
        assert_eq!(translator.current_key, None);
    }

    #[test]
    fn test_extract_field_value_restores_slots() {
        let mut translator = primed();
        let value = translator.extract_field_value(&list([1.5, 2.0])).unwrap();
        assert_eq!(value, FieldValue::List(vec![FieldValue::Number(1.5), FieldValue::Number(2.0)]));

        let value = translator.extract_field_value(&literal("x")).unwrap();
        assert_eq!(value, FieldValue::String("x".to_string()));

        assert_eq!(translator.current_key.as_deref(), Some("outer"));
        assert_eq!(translator.current_value, Some(FieldValue::Bool(true)));
    }

    #[test]
    fn test_field_key_of_literal_is_rejected() {
        let mut translator = Translator::new();
        let err = translator.extract_field_key(&literal(5).into()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ComparisonLeftShape);
    }

    #[test]
    fn test_partial_filter_on_error() {
        let mut translator = Translator::new();
        let expr = crate::ast::builders::and(eq("a", 1), crate::ast::builders::in_("b", Vec::<i64>::new()));
        let err = translator.translate(&expr).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyInList);
        assert_eq!(translator.filter().must.len(), 1);
        assert_eq!(translator.error().map(|e| e.kind), Some(ErrorKind::EmptyInList));
    }
}
