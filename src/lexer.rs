use crate::ast::{Position, Token, TokenKind, lookup_keyword};

/// Tokenizer for filter text.
///
/// Never fails: faults come back as `ERROR` tokens so the caller decides
/// whether to stop.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    /// Location of the most recently consumed character
    last: Position,
    done: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            last: Position::new(1, 1),
            done: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn here(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.last = self.here();
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a quoted string. No escape sequences: the literal runs to the next
    /// matching quote.
    fn read_string(&mut self, quote: char) -> Token {
        let start = self.here();
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Token::of_literal(TokenKind::String, result, start, self.last);
            }
            result.push(ch);
        }

        Token::of_error(format!("unterminated string literal starting at {}", start), start)
    }

    fn read_digits(&mut self, number: &mut String) {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.here();
        let mut number = String::new();

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        self.read_digits(&mut number);

        if self.current_char() == Some('.') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
            number.push('.');
            self.advance();
            self.read_digits(&mut number);
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            let signed = matches!(self.peek_char(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_char(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    if let Some(ch) = self.current_char() {
                        number.push(ch);
                    }
                    self.advance();
                }
                self.read_digits(&mut number);
            }
        }

        Token::of_literal(TokenKind::Number, number, start, self.last)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.here();
        self.advance();
        Token::of_kind(kind, start, start)
    }

    fn double(&mut self, kind: TokenKind) -> Token {
        let start = self.here();
        self.advance();
        self.advance();
        Token::of_kind(kind, start, self.last)
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.current_char() {
            None => Token::of_eof(self.here()),
            Some('(') => self.single(TokenKind::LParen),
            Some(')') => self.single(TokenKind::RParen),
            Some('[') => self.single(TokenKind::LBrack),
            Some(']') => self.single(TokenKind::RBrack),
            Some(',') => self.single(TokenKind::Comma),
            Some('=') if self.peek_char(1) == Some('=') => self.double(TokenKind::Eq),
            Some('!') if self.peek_char(1) == Some('=') => self.double(TokenKind::Ne),
            Some('<') if self.peek_char(1) == Some('=') => self.double(TokenKind::Le),
            Some('<') => self.single(TokenKind::Lt),
            Some('>') if self.peek_char(1) == Some('=') => self.double(TokenKind::Ge),
            Some('>') => self.single(TokenKind::Gt),
            Some(quote @ ('"' | '\'')) => self.read_string(quote),
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => self.read_number(),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let start = self.here();
                let word = self.read_identifier();
                match lookup_keyword(&word) {
                    Some(kind @ (TokenKind::True | TokenKind::False)) => {
                        Token::of_literal(kind, word, start, self.last)
                    }
                    Some(kind) => Token::of(kind, word, start, self.last),
                    None => Token::of_ident(word, start, self.last),
                }
            }
            Some(ch) => {
                let pos = self.here();
                self.advance();
                Token::of_illegal(ch, pos)
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including `EOF`, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.done = true;
        }
        Some(token)
    }
}

/// All tokens of `input`, ending with `EOF`.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and OR Not in LIKE True false");
    assert_eq!(lexer.next_token().kind, TokenKind::And);
    assert_eq!(lexer.next_token().kind, TokenKind::Or);
    assert_eq!(lexer.next_token().kind, TokenKind::Not);
    assert_eq!(lexer.next_token().kind, TokenKind::In);
    assert_eq!(lexer.next_token().kind, TokenKind::Like);
    let t = lexer.next_token();
    assert_eq!((t.kind, t.literal.as_str()), (TokenKind::True, "true"));
    assert_eq!(lexer.next_token().kind, TokenKind::False);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_comparison_positions() {
    let mut lexer = Lexer::new("age >= 18");
    let ident = lexer.next_token();
    assert_eq!(ident.kind, TokenKind::Ident);
    assert_eq!((ident.start, ident.end), (Position::new(1, 1), Position::new(1, 3)));
    let op = lexer.next_token();
    assert_eq!(op.kind, TokenKind::Ge);
    assert_eq!((op.start, op.end), (Position::new(1, 5), Position::new(1, 6)));
    let num = lexer.next_token();
    assert_eq!(num.literal, "18");
    assert_eq!((num.start, num.end), (Position::new(1, 8), Position::new(1, 9)));
    assert_eq!(lexer.next_token().start, Position::new(1, 10));
}
