// tests/analyzer_tests.rs

use pretty_assertions::assert_eq;
use vfilter::ast::builders::{
    and, binary, eq, ge, gt, ident, in_, index, like, list, literal, lt, ne, not, or, paren,
};
use vfilter::ast::{Expr, Ident, IndexExpr, Literal, NO_POSITION, Position, Token, TokenKind};
use vfilter::error::ErrorKind;
use vfilter::{analyze, parse, parse_and_analyze};

fn rejects(expr: &Expr) -> ErrorKind {
    analyze(expr).expect_err("expected rejection").kind
}

fn raw_literal(kind: TokenKind, text: &str) -> Literal {
    Literal::new(Token::of(kind, text, NO_POSITION, NO_POSITION))
}

// ============================================================================
// Accepted Trees
// ============================================================================

#[test]
fn test_accepts_well_formed_filters() {
    let filters = vec![
        eq("status", "active"),
        ne("status", 3),
        gt("age", 18),
        lt("score", -2.5),
        in_("id", [1, 2, 3]),
        in_("flags", [true, false]),
        like("name", "John%"),
        not(eq("deleted", true)),
        and(gt("age", 18), or(eq("a", 1), eq("b", 2))),
        eq(index(index("user", "profile"), "name"), "Alice"),
        paren(eq("x", 1)),
        not(paren(and(eq("a", 1), eq("b", 2)))),
    ];

    for filter in filters {
        assert_eq!(analyze(&filter), Ok(()), "filter: {}", filter);
    }
}

#[test]
fn test_nil_expression() {
    assert_eq!(analyze(None).unwrap_err().kind, ErrorKind::NilExpression);
}

// ============================================================================
// Identifiers and Literals
// ============================================================================

#[test]
fn test_ident_token_mismatch() {
    let bad = Ident {
        token: Token::of(TokenKind::Number, "age", NO_POSITION, NO_POSITION),
        value: "age".to_string(),
    };
    assert_eq!(rejects(&eq(bad, 1)), ErrorKind::IdentTokenMismatch);
}

#[test]
fn test_invalid_identifier() {
    assert_eq!(rejects(&eq(ident("user name"), 1)), ErrorKind::InvalidIdentifier);
    assert_eq!(rejects(&eq(ident(""), 1)), ErrorKind::InvalidIdentifier);
    assert_eq!(rejects(&eq(ident("and"), 1)), ErrorKind::InvalidIdentifier);
    assert_eq!(analyze(&eq(ident("größe_2"), 1)), Ok(()));
}

#[test]
fn test_bad_literals() {
    assert_eq!(
        rejects(&eq("x", raw_literal(TokenKind::Number, "abc"))),
        ErrorKind::InvalidNumberLiteral
    );
    assert_eq!(
        rejects(&eq("x", raw_literal(TokenKind::True, "yes"))),
        ErrorKind::InvalidBooleanLiteral
    );
    assert_eq!(rejects(&eq("x", f64::NAN)), ErrorKind::UnsupportedLiteralKind);
    assert_eq!(rejects(&ne("x", f64::INFINITY)), ErrorKind::UnsupportedLiteralKind);
    assert_eq!(rejects(&gt("x", f64::INFINITY)), ErrorKind::OrderingRightNotNumeric);
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_empty_list() {
    assert_eq!(rejects(&in_("status", Vec::<&str>::new())), ErrorKind::EmptyList);
}

#[test]
fn test_heterogeneous_list() {
    let mixed = list(vec![literal(1), literal("a")]);
    assert_eq!(rejects(&in_("x", mixed)), ErrorKind::HeterogeneousList);

    let mixed = list(vec![literal(true), literal(0)]);
    assert_eq!(rejects(&in_("x", mixed)), ErrorKind::HeterogeneousList);
}

// ============================================================================
// Operand Shapes
// ============================================================================

#[test]
fn test_comparison_left_shape() {
    assert_eq!(rejects(&eq(literal(5), 3)), ErrorKind::ComparisonLeftShape);
    assert_eq!(rejects(&gt(paren(eq("a", 1)), 3)), ErrorKind::ComparisonLeftShape);
}

#[test]
fn test_index_shapes() {
    let on_literal = Expr::Index(IndexExpr::new(
        literal("x").into(),
        Token::synthetic(TokenKind::LBrack),
        literal(0),
        Token::synthetic(TokenKind::RBrack),
    ));
    assert_eq!(rejects(&eq(on_literal, 1)), ErrorKind::IndexLeftShape);
    assert_eq!(rejects(&eq(index("tags", true), 1)), ErrorKind::IndexNotScalar);
}

#[test]
fn test_logical_operands_must_be_computed() {
    assert_eq!(rejects(&and("a", eq("b", 1))), ErrorKind::LogicalOperandNotComputed);
    assert_eq!(rejects(&or(eq("b", 1), literal(true))), ErrorKind::LogicalOperandNotComputed);
    assert_eq!(rejects(&not("flag")), ErrorKind::LogicalOperandNotComputed);
}

#[test]
fn test_paren_must_enclose_expression() {
    assert_eq!(rejects(&and(paren("a"), eq("b", 1))), ErrorKind::ParenInnerNotComputed);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_unsupported_operators() {
    assert_eq!(rejects(&binary(TokenKind::Comma, "a", literal(1))), ErrorKind::UnsupportedBinaryOperator);
    assert_eq!(rejects(&binary(TokenKind::Not, "a", literal(1))), ErrorKind::UnsupportedBinaryOperator);
}

#[test]
fn test_operator_right_operands() {
    assert_eq!(rejects(&binary(TokenKind::Eq, "a", "b")), ErrorKind::EqualityRightNotLiteral);
    assert_eq!(rejects(&gt("age", literal("eighteen"))), ErrorKind::OrderingRightNotNumeric);
    assert_eq!(rejects(&ge("age", literal(true))), ErrorKind::OrderingRightNotNumeric);
    assert_eq!(rejects(&binary(TokenKind::In, "status", literal("a"))), ErrorKind::InRightNotList);
    assert_eq!(rejects(&binary(TokenKind::Like, "name", literal(3))), ErrorKind::LikeRightNotString);
}

// ============================================================================
// Latching and Positions
// ============================================================================

#[test]
fn test_first_error_wins() {
    // Left-to-right pre-order: the ordering error comes before the empty list
    let expr = and(gt("age", literal("x")), in_("id", Vec::<i64>::new()));
    assert_eq!(rejects(&expr), ErrorKind::OrderingRightNotNumeric);
}

#[test]
fn test_outer_node_checked_before_children() {
    let expr = eq(literal(5), raw_literal(TokenKind::Number, "abc"));
    assert_eq!(rejects(&expr), ErrorKind::ComparisonLeftShape);
}

#[test]
fn test_parsed_error_carries_position() {
    let expr = parse("status == 'a' and age > 'old'").unwrap();
    let err = analyze(&expr).unwrap_err();
    assert_eq!(err.kind, ErrorKind::OrderingRightNotNumeric);
    assert_eq!(err.position, Position::new(1, 25));
    assert!(err.to_string().starts_with("OrderingRightNotNumeric: "));
    assert!(err.to_string().ends_with(" at 1:25"));
}

#[test]
fn test_synthetic_error_has_no_position_suffix() {
    let err = analyze(&gt("age", literal("x"))).unwrap_err();
    assert!(!err.to_string().contains(" at "), "got {}", err);
}

#[test]
fn test_parse_and_analyze() {
    assert!(parse_and_analyze("id in (1, 2)").is_ok());

    let err = parse_and_analyze("id in ()").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::EmptyList));

    let err = parse_and_analyze("id in").unwrap_err();
    assert_eq!(err.kind(), None);
}

#[test]
fn test_analysis_is_idempotent_over_clones() {
    let expr = parse("a == 1 and (b in (1, 2) or not c like 'x%')").unwrap();
    let copy = expr.clone();
    assert_eq!(copy, expr);
    assert_eq!(analyze(&expr), Ok(()));
    assert_eq!(analyze(&copy), Ok(()));
    assert_eq!(analyze(&expr), Ok(()));
}
