// tests/lexer_tests.rs

use pretty_assertions::assert_eq;
use vfilter::ast::{NO_POSITION, Position, TokenKind};
use vfilter::lexer::{Lexer, tokenize};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).into_iter().map(|t| t.kind).collect()
}

// ============================================================================
// Punctuation and Operators
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        ("[", TokenKind::LBrack),
        ("]", TokenKind::RBrack),
        (",", TokenKind::Comma),
        ("<", TokenKind::Lt),
        (">", TokenKind::Gt),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token();
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.literal, input);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("==", TokenKind::Eq),
        ("!=", TokenKind::Ne),
        ("<=", TokenKind::Le),
        (">=", TokenKind::Ge),
    ];

    for (input, expected) in test_cases {
        let token = Lexer::new(input).next_token();
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.start, Position::new(1, 1));
        assert_eq!(token.end, Position::new(1, 2));
    }
}

#[test]
fn test_lone_equals_is_illegal() {
    let token = Lexer::new("=").next_token();
    assert_eq!(token.kind, TokenKind::Error);
    assert_eq!(token.literal, "illegal character '=' at 1:1");
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_strings_with_either_quote() {
    let tokens = tokenize(r#"'single' "double" 'it"s'"#);
    let literals: Vec<_> = tokens.iter().map(|t| (t.kind, t.literal.as_str())).collect();
    assert_eq!(
        literals,
        vec![
            (TokenKind::String, "single"),
            (TokenKind::String, "double"),
            (TokenKind::String, "it\"s"),
            (TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_unterminated_string() {
    let token = Lexer::new("name == 'abc").nth(2).unwrap();
    assert_eq!(token.kind, TokenKind::Error);
    assert!(token.literal.contains("unterminated"));
    assert_eq!(token.start, Position::new(1, 9));
}

#[test]
fn test_numbers_are_normalized() {
    let test_cases = vec![
        ("42", "42"),
        ("00123", "123"),
        ("123.000", "123"),
        ("1.50", "1.5"),
        ("1.23e+02", "123"),
        ("-7", "-7"),
        ("2.5E-1", "0.25"),
    ];

    for (input, expected) in test_cases {
        let token = Lexer::new(input).next_token();
        assert_eq!(token.kind, TokenKind::Number, "Failed for input: {}", input);
        assert_eq!(token.literal, expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_overflowing_number_is_error() {
    let token = Lexer::new("1e400").next_token();
    assert_eq!(token.kind, TokenKind::Error);
}

#[test]
fn test_booleans_are_canonical() {
    for input in ["TRUE", "True", "true"] {
        let token = Lexer::new(input).next_token();
        assert_eq!(token.kind, TokenKind::True);
        assert_eq!(token.literal, "true");
    }
}

// ============================================================================
// Identifiers and Keywords
// ============================================================================

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        kinds("AND or Not IN like"),
        vec![
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::In,
            TokenKind::Like,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_identifiers() {
    let tokens = tokenize("user_type größe _x1");
    let idents: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Ident)
        .map(|t| t.literal.as_str())
        .collect();
    assert_eq!(idents, vec!["user_type", "größe", "_x1"]);
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_token_spans() {
    let tokens = tokenize("status in ('a', 'b')");
    let spans: Vec<_> = tokens.iter().map(|t| (t.kind, t.start, t.end)).collect();
    assert_eq!(
        spans,
        vec![
            (TokenKind::Ident, Position::new(1, 1), Position::new(1, 6)),
            (TokenKind::In, Position::new(1, 8), Position::new(1, 9)),
            (TokenKind::LParen, Position::new(1, 11), Position::new(1, 11)),
            (TokenKind::String, Position::new(1, 12), Position::new(1, 14)),
            (TokenKind::Comma, Position::new(1, 15), Position::new(1, 15)),
            (TokenKind::String, Position::new(1, 17), Position::new(1, 19)),
            (TokenKind::RParen, Position::new(1, 20), Position::new(1, 20)),
            (TokenKind::Eof, Position::new(1, 21), NO_POSITION),
        ]
    );
}

#[test]
fn test_multiline_positions() {
    let tokens = tokenize("a == 1\n  and b == 2");
    assert_eq!(tokens[3].kind, TokenKind::And);
    assert_eq!(tokens[3].start, Position::new(2, 3));
    assert_eq!(tokens[4].start, Position::new(2, 7));
}

#[test]
fn test_iterator_stops_after_eof() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Ident));
    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(lexer.next(), None);
}
