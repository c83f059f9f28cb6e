// tests/output_tests.rs

use pretty_assertions::assert_eq;
use vfilter::ast::builders::{and, eq, gt, in_, index, like, ne, not, or, paren};
use vfilter::output::{to_json, to_json_pretty, to_sql};
use vfilter::{parse, parse_and_analyze, to_filter};

fn json_of(text: &str) -> String {
    let expr = parse_and_analyze(text).unwrap();
    to_json(&to_filter(&expr).unwrap()).unwrap()
}

// ============================================================================
// SQL-like Text
// ============================================================================

#[test]
fn test_print_comparisons() {
    assert_eq!(to_sql(&eq("status", "active")), "status == 'active'");
    assert_eq!(to_sql(&ne("n", 1.50)), "n != 1.5");
    assert_eq!(to_sql(&in_("id", [1, 2, 3])), "id in (1,2,3)");
    assert_eq!(to_sql(&in_("s", ["a", "b"])), "s in ('a','b')");
    assert_eq!(to_sql(&like("name", "J%")), "name like 'J%'");
    assert_eq!(to_sql(&eq(index(index("user", "profile"), "name"), "Al")), "user['profile']['name'] == 'Al'");
}

#[test]
fn test_print_minimal_parentheses() {
    assert_eq!(
        to_sql(&or(and(eq("a", 1), eq("b", 2)), eq("c", 3))),
        "a == 1 and b == 2 or c == 3"
    );
    assert_eq!(
        to_sql(&and(or(eq("a", 1), eq("b", 2)), eq("c", 3))),
        "(a == 1 or b == 2) and c == 3"
    );
    assert_eq!(
        to_sql(&and(eq("a", 1), or(eq("b", 2), eq("c", 3)))),
        "a == 1 and (b == 2 or c == 3)"
    );
}

#[test]
fn test_print_not_and_paren() {
    assert_eq!(to_sql(&not(eq("deleted", true))), "not (deleted == true)");
    assert_eq!(to_sql(&not(not(gt("x", 0)))), "not (not (x > 0))");
    assert_eq!(to_sql(&and(paren(eq("a", 1)), eq("b", 2))), "(a == 1) and b == 2");
}

#[test]
fn test_display_matches_to_sql() {
    let expr = and(gt("age", 18), eq("status", "active"));
    assert_eq!(expr.to_string(), to_sql(&expr));
    assert_eq!(format!("{}", expr), "age > 18 and status == 'active'");
}

#[test]
fn test_keywords_print_lower_case() {
    let expr = parse("A == 1 AND NOT B IN (1) OR C LIKE 'x'").unwrap();
    assert_eq!(to_sql(&expr), "A == 1 and not (B in (1)) or C like 'x'");
}

#[test]
fn test_printed_text_reparses_to_same_text() {
    let inputs = [
        "user_type == 'individual' and (age >= 18 or verified == true)",
        "a != 1 and c in ('x','y') or d like 'q%'",
        "tags[0] == \"t\" or score <= -1.25e1",
        "((a == 1))",
    ];

    for input in inputs {
        let printed = to_sql(&parse(input).unwrap());
        let reprinted = to_sql(&parse(&printed).unwrap());
        assert_eq!(printed, reprinted, "input: {}", input);
    }
}

// ============================================================================
// Backend JSON
// ============================================================================

#[test]
fn test_json_match_payloads() {
    assert_eq!(json_of("status == 'active'"), r#"{"must":[{"key":"status","match":{"value":"active"}}]}"#);
    assert_eq!(json_of("n == 3"), r#"{"must":[{"key":"n","match":{"value":3}}]}"#);
    assert_eq!(json_of("ok != false"), r#"{"must_not":[{"key":"ok","match":{"value":false}}]}"#);
    assert_eq!(json_of("id in (1, 2)"), r#"{"must":[{"key":"id","match":{"any":[1,2]}}]}"#);
    assert_eq!(json_of("s in ('a')"), r#"{"must":[{"key":"s","match":{"any":["a"]}}]}"#);
    assert_eq!(json_of("name like 'J%'"), r#"{"must":[{"key":"name","match":{"text":"J%"}}]}"#);
}

#[test]
fn test_json_range_omits_unset_bounds() {
    assert_eq!(json_of("age >= 18.5"), r#"{"must":[{"key":"age","range":{"gte":18.5}}]}"#);
}

#[test]
fn test_json_nested_filter_is_inline() {
    assert_eq!(
        json_of("a == 1 and (b == 2 or c == 3)"),
        concat!(
            r#"{"must":[{"key":"a","match":{"value":1}},"#,
            r#"{"should":[{"key":"b","match":{"value":2}},{"key":"c","match":{"value":3}}]}]}"#
        )
    );
}

#[test]
fn test_json_pretty() {
    let filter = to_filter(&gt("age", 18)).unwrap();
    let expected = r#"{
  "must": [
    {
      "key": "age",
      "range": {
        "gt": 18.0
      }
    }
  ]
}"#;
    assert_eq!(to_json_pretty(&filter).unwrap(), expected);
}
