use std::mem;

use thiserror::Error;
use tracing::trace;

use crate::{
    ast::{
        BinaryExpr, Expr, Ident, IndexExpr, ListLiteral, Literal, ParenExpr, Position, Token,
        TokenKind, UnaryExpr,
    },
    lexer::Lexer,
};

/// Parser errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected} at {position}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    /// The lexer produced an `ERROR` token
    #[error("{message}")]
    Lex { message: String, position: Position },

    #[error("empty filter expression")]
    EmptyInput,

    /// More than [`MAX_DEPTH`] nested `not`s or parentheses
    #[error("filter nested deeper than {} levels at {position}", MAX_DEPTH)]
    TooDeep { position: Position },
}

/// Nesting limit for `not` chains and parentheses.
pub const MAX_DEPTH: usize = 256;

impl ParseError {
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::Lex { position, .. }
            | ParseError::TooDeep { position } => Some(*position),
            ParseError::EmptyInput => None,
        }
    }
}

/// Recursive descent parser over the precedence ladder
///
/// ```text
/// or       ::= and ("or" and)*
/// and      ::= not ("and" not)*
/// not      ::= "not" not | equality
/// equality ::= ordering (("==" | "!=") ordering)?
/// ordering ::= match (("<" | "<=" | ">" | ">=") match)?
/// match    ::= postfix ("in" in_operand | "like" postfix)?
/// postfix  ::= primary ("[" literal "]")*
/// in_operand ::= "(" (literal ("," literal)*)? ")" | postfix
/// primary  ::= IDENT | literal | "(" or ")"
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token();
        let parser = Parser {
            lexer,
            current_token,
            depth: 0,
        };
        parser.check_error()?;
        Ok(parser)
    }

    /// Parses a complete filter; trailing input is an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Eof) {
            return Err(ParseError::EmptyInput);
        }
        let expr = self.parse_expression()?;
        if !self.check(TokenKind::Eof) {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn check_error(&self) -> Result<(), ParseError> {
        if self.current_token.is(TokenKind::Error) {
            return Err(ParseError::Lex {
                message: self.current_token.literal.clone(),
                position: self.current_token.start,
            });
        }
        Ok(())
    }

    /// Returns the current token and moves to the next one.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token();
        let token = mem::replace(&mut self.current_token, next);
        trace!(token = %token, "consumed token");
        self.check_error()?;
        Ok(token)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if !self.check(kind) {
            return Err(self.unexpected(&kind.to_string()));
        }
        self.advance()
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current_token.to_string(),
            position: self.current_token.start,
        }
    }

    /// Runs `parse` one nesting level deeper; `position` is the token opening
    /// the level.
    fn nested<T>(
        &mut self,
        position: Position,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep { position });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(TokenKind::Or) {
            let op = self.advance()?;
            let right = self.parse_and()?;
            left = Expr::Binary(BinaryExpr::new(left, op, right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;

        while self.check(TokenKind::And) {
            let op = self.advance()?;
            let right = self.parse_not()?;
            left = Expr::Binary(BinaryExpr::new(left, op, right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Not) {
            let op = self.advance()?;
            let operand = self.nested(op.start, Self::parse_not)?; // Right-associative
            return Ok(Expr::Unary(UnaryExpr::new(op, operand)));
        }
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_ordering()?;

        if self.current_token.kind.is_equality_operator() {
            let op = self.advance()?;
            let right = self.parse_ordering()?;
            return Ok(Expr::Binary(BinaryExpr::new(left, op, right)));
        }
        Ok(left)
    }

    fn parse_ordering(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_match()?;

        if self.current_token.kind.is_ordering_operator() {
            let op = self.advance()?;
            let right = self.parse_match()?;
            return Ok(Expr::Binary(BinaryExpr::new(left, op, right)));
        }
        Ok(left)
    }

    fn parse_match(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_postfix()?;

        match self.current_token.kind {
            TokenKind::In => {
                let op = self.advance()?;
                let right = self.parse_in_operand()?;
                Ok(Expr::Binary(BinaryExpr::new(left, op, right)))
            }
            TokenKind::Like => {
                let op = self.advance()?;
                let right = self.parse_postfix()?;
                Ok(Expr::Binary(BinaryExpr::new(left, op, right)))
            }
            _ => Ok(left),
        }
    }

    /// A parenthesized literal list; anything else is parsed as an ordinary
    /// operand and left to the analyzer.
    fn parse_in_operand(&mut self) -> Result<Expr, ParseError> {
        if !self.check(TokenKind::LParen) {
            return self.parse_postfix();
        }

        let lparen = self.advance()?;
        let mut values = vec![];

        // Every comma is followed by a literal
        if !self.check(TokenKind::RParen) {
            values.push(self.parse_literal()?);
            while self.check(TokenKind::Comma) {
                self.advance()?;
                values.push(self.parse_literal()?);
            }
        }

        let rparen = self.expect(TokenKind::RParen)?;
        Ok(Expr::List(ListLiteral::new(lparen, values, rparen)))
    }

    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        if !self.current_token.kind.is_literal() {
            return Err(self.unexpected("literal"));
        }
        Ok(Literal::new(self.advance()?))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.check(TokenKind::LBrack) {
            let lbrack = self.advance()?;
            if !matches!(self.current_token.kind, TokenKind::Number | TokenKind::String) {
                return Err(self.unexpected("number or string index"));
            }
            let index = Literal::new(self.advance()?);
            let rbrack = self.expect(TokenKind::RBrack)?;
            expr = Expr::Index(IndexExpr::new(expr, lbrack, index, rbrack));
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current_token.kind {
            TokenKind::Ident => Ok(Expr::Ident(Ident::new(self.advance()?))),
            TokenKind::String | TokenKind::Number | TokenKind::True | TokenKind::False => {
                Ok(Expr::Literal(Literal::new(self.advance()?)))
            }
            TokenKind::LParen => {
                let lparen = self.advance()?;
                let inner = self.nested(lparen.start, Self::parse_expression)?;
                let rparen = self.expect(TokenKind::RParen)?;
                Ok(Expr::Paren(ParenExpr::new(lparen, inner, rparen)))
            }
            _ => Err(self.unexpected("identifier, literal or '('")),
        }
    }
}
