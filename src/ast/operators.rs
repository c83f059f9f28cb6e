use crate::ast::TokenKind;

/// Precedence ladder, higher binds tighter:
///
/// ```text
/// or (1) < and (2) < not (3) < == != (4) < < <= > >= (5) < in like (6)
/// ```
///
/// Non-operators have precedence 0.
impl TokenKind {
    pub fn precedence(self) -> u8 {
        match self {
            TokenKind::Or => 1,
            TokenKind::And => 2,
            TokenKind::Not => 3,
            TokenKind::Eq | TokenKind::Ne => 4,
            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => 5,
            TokenKind::In | TokenKind::Like => 6,
            _ => 0,
        }
    }

    pub fn is_binary_operator(self) -> bool {
        self.is_logical_operator()
            || self.is_equality_operator()
            || self.is_ordering_operator()
            || matches!(self, TokenKind::In | TokenKind::Like)
    }

    pub fn is_unary_operator(self) -> bool {
        self == TokenKind::Not
    }

    pub fn is_operator(self) -> bool {
        self.is_binary_operator() || self.is_unary_operator()
    }

    /// `and` / `or`
    pub fn is_logical_operator(self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }

    /// `==` / `!=`
    pub fn is_equality_operator(self) -> bool {
        matches!(self, TokenKind::Eq | TokenKind::Ne)
    }

    /// `<` / `<=` / `>` / `>=`
    pub fn is_ordering_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ladder() {
        assert!(TokenKind::Or.precedence() < TokenKind::And.precedence());
        assert!(TokenKind::And.precedence() < TokenKind::Not.precedence());
        assert!(TokenKind::Not.precedence() < TokenKind::Eq.precedence());
        assert_eq!(TokenKind::Eq.precedence(), TokenKind::Ne.precedence());
        assert!(TokenKind::Ne.precedence() < TokenKind::Lt.precedence());
        assert!(TokenKind::Ge.precedence() < TokenKind::In.precedence());
        assert_eq!(TokenKind::In.precedence(), TokenKind::Like.precedence());
        assert_eq!(TokenKind::Ident.precedence(), 0);
        assert_eq!(TokenKind::LParen.precedence(), 0);
    }

    #[test]
    fn test_operator_classes() {
        assert!(TokenKind::Not.is_unary_operator());
        assert!(!TokenKind::Not.is_binary_operator());
        assert!(TokenKind::Not.is_operator());
        assert!(TokenKind::Like.is_binary_operator());
        assert!(!TokenKind::Like.is_logical_operator());
        assert!(TokenKind::Or.is_logical_operator());
        assert!(TokenKind::Ne.is_equality_operator());
        assert!(TokenKind::Le.is_ordering_operator());
        assert!(!TokenKind::Comma.is_operator());
        assert!(!TokenKind::True.is_operator());
    }
}
