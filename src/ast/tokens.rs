use std::{fmt, sync::LazyLock};

use regex::Regex;

/// A 1-based (line, column) location in filter source text.
///
/// Ordering is lexicographic: line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Sentinel for nodes and markers that have no source content.
pub const NO_POSITION: Position = Position { line: 0, column: 0 };

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Returns true for the `NO_POSITION` sentinel.
    pub fn is_none(&self) -> bool {
        *self == NO_POSITION
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The closed set of token kinds in the filter language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special
    /// Lexing fault; the token literal carries the message
    Error,
    /// End of input
    Eof,

    // Identifiers and literals
    /// Field name
    ///
    /// # Examples
    /// ```text
    /// age
    /// user_type
    /// ```
    Ident,
    /// Numeric literal, always stored normalized
    ///
    /// # Examples
    /// ```text
    /// 18
    /// 0.000123
    /// -2.5
    /// ```
    Number,
    /// Quoted string literal
    ///
    /// # Examples
    /// ```text
    /// 'individual'
    /// "John%"
    /// ```
    String,
    True,
    False,

    // Comparison
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,

    // Logical (words, not symbols)
    And,
    Or,
    Not,

    // Membership and pattern matching
    /// `in`, followed by a parenthesized literal list
    In,
    /// `like`, followed by a string pattern
    Like,

    // Delimiters
    LParen,
    RParen,
    LBrack,
    RBrack,
    Comma,
}

impl TokenKind {
    /// Upper-case kind name, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::In => "IN",
            TokenKind::Like => "LIKE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrack => "LBRACK",
            TokenKind::RBrack => "RBRACK",
            TokenKind::Comma => "COMMA",
        }
    }

    /// Canonical source text of the kind, or `""` for kinds whose text varies.
    pub fn literal(self) -> &'static str {
        match self {
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Eq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::In => "in",
            TokenKind::Like => "like",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrack => "[",
            TokenKind::RBrack => "]",
            TokenKind::Comma => ",",
            TokenKind::Error
            | TokenKind::Eof
            | TokenKind::Ident
            | TokenKind::Number
            | TokenKind::String => "",
        }
    }

    pub fn is(self, other: TokenKind) -> bool {
        self == other
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::In
                | TokenKind::Like
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Kinds a `Literal` node may carry.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Number | TokenKind::True | TokenKind::False
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal() {
            "" => write!(f, "{}", self.name()),
            lit => write!(f, "'{}'", lit),
        }
    }
}

/// Case-insensitive keyword lookup.
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    match word.to_lowercase().as_str() {
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "not" => Some(TokenKind::Not),
        "in" => Some(TokenKind::In),
        "like" => Some(TokenKind::Like),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        _ => None,
    }
}

static IDENT_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{Nd}_]+$").expect("identifier pattern is a valid regex")
});

/// An identifier is non-empty, not a keyword, and made only of Unicode letters,
/// Unicode decimal digits and `_`.
pub fn is_identifier(value: &str) -> bool {
    !value.is_empty() && lookup_keyword(value).is_none() && IDENT_CHARS.is_match(value)
}

/// Re-emits numeric text as the shortest round-trip decimal without exponent.
///
/// ```
/// use vfilter::ast::normalize_number;
///
/// assert_eq!(normalize_number("123.000").as_deref(), Some("123"));
/// assert_eq!(normalize_number("1.23e+02").as_deref(), Some("123"));
/// assert_eq!(normalize_number("00123").as_deref(), Some("123"));
/// assert_eq!(normalize_number("abc"), None);
/// ```
///
/// Returns `None` for text that is not a finite 64-bit float.
pub fn normalize_number(text: &str) -> Option<String> {
    let value = text.parse::<f64>().ok()?;
    value.is_finite().then(|| value.to_string())
}

/// A lexical token with its source span.
///
/// `start` is the first character and `end` the last character of the token.
/// Synthetic tokens built by the AST builders carry `NO_POSITION` on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub start: Position,
    pub end: Position,
}

impl Token {
    /// Raw constructor; the literal is taken as given.
    pub fn of(kind: TokenKind, literal: impl Into<String>, start: Position, end: Position) -> Self {
        Token {
            kind,
            literal: literal.into(),
            start,
            end,
        }
    }

    /// Token whose literal is the kind's canonical text.
    pub fn of_kind(kind: TokenKind, start: Position, end: Position) -> Self {
        Token::of(kind, kind.literal(), start, end)
    }

    pub fn of_ident(name: impl Into<String>, start: Position, end: Position) -> Self {
        Token::of(TokenKind::Ident, name, start, end)
    }

    pub fn of_eof(pos: Position) -> Self {
        Token::of(TokenKind::Eof, "", pos, NO_POSITION)
    }

    /// Error marker carrying `err` as its literal. The range collapses to `pos`.
    pub fn of_error(err: impl fmt::Display, pos: Position) -> Self {
        Token::of(TokenKind::Error, err.to_string(), pos, NO_POSITION)
    }

    pub fn of_illegal(ch: char, pos: Position) -> Self {
        Token::of_error(format!("illegal character '{}' at {}", ch, pos), pos)
    }

    /// Literal token. `NUMBER` text is normalized, booleans take their canonical
    /// text, and any other kind (or unparseable number) yields an `ERROR` token.
    pub fn of_literal(
        kind: TokenKind,
        literal: impl Into<String>,
        start: Position,
        end: Position,
    ) -> Self {
        let literal = literal.into();
        match kind {
            TokenKind::String => Token::of(kind, literal, start, end),
            TokenKind::Number => match normalize_number(&literal) {
                Some(normalized) => Token::of(kind, normalized, start, end),
                None => Token::of_error(format!("invalid number literal '{}'", literal), start),
            },
            TokenKind::True | TokenKind::False => Token::of_kind(kind, start, end),
            other => Token::of_error(format!("unsupported literal kind {}", other.name()), start),
        }
    }

    /// Synthetic token without source positions.
    pub fn synthetic(kind: TokenKind) -> Self {
        Token::of_kind(kind, NO_POSITION, NO_POSITION)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident | TokenKind::Number => write!(f, "{} '{}'", self.kind.name(), self.literal),
            TokenKind::String => write!(f, "STRING '{}'", self.literal),
            TokenKind::Error => write!(f, "ERROR ({})", self.literal),
            _ => write!(f, "{}", self.kind),
        }
    }
}
