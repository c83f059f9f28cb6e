use crate::ast::{NO_POSITION, Position, Token, TokenKind};

/// Field name reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub token: Token,
    pub value: String,
}

impl Ident {
    pub fn new(token: Token) -> Self {
        let value = token.literal.clone();
        Ident { token, value }
    }

    pub fn start(&self) -> Position {
        self.token.start
    }

    pub fn end(&self) -> Position {
        self.token.end
    }
}

/// The scalar type of a literal, booleans collapsed into one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Number,
    Bool,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Number => "number",
            ScalarKind::Bool => "bool",
        }
    }
}

/// Scalar literal: string, number or boolean.
///
/// `value` is the textual form: the normalized decimal for numbers and the
/// canonical `true`/`false` for booleans.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub token: Token,
    pub value: String,
}

impl Literal {
    pub fn new(token: Token) -> Self {
        let value = token.literal.clone();
        Literal { token, value }
    }

    pub fn start(&self) -> Position {
        self.token.start
    }

    pub fn end(&self) -> Position {
        self.token.end
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.token.kind {
            TokenKind::String => Some(ScalarKind::String),
            TokenKind::Number => Some(ScalarKind::Number),
            TokenKind::True | TokenKind::False => Some(ScalarKind::Bool),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        self.token.kind == TokenKind::String
    }

    pub fn is_number(&self) -> bool {
        self.token.kind == TokenKind::Number
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.token.kind, TokenKind::True | TokenKind::False)
    }

    /// Numeric value of a `NUMBER` literal.
    pub fn as_number(&self) -> Option<f64> {
        if self.is_number() {
            self.value.parse().ok()
        } else {
            None
        }
    }

    /// Boolean value of a `TRUE`/`FALSE` literal.
    pub fn as_bool(&self) -> Option<bool> {
        if self.is_bool() {
            self.value.parse().ok()
        } else {
            None
        }
    }
}

/// Parenthesized, comma separated literals: `('a','b')`, `(1,2,3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListLiteral {
    pub lparen: Token,
    pub values: Vec<Literal>,
    pub rparen: Token,
}

impl ListLiteral {
    pub fn new(lparen: Token, values: Vec<Literal>, rparen: Token) -> Self {
        ListLiteral {
            lparen,
            values,
            rparen,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn start(&self) -> Position {
        self.lparen.start
    }

    pub fn end(&self) -> Position {
        self.rparen.end
    }
}

/// Prefix operation; the only unary operator is `not`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: Token,
    pub right: Box<Expr>,
}

impl UnaryExpr {
    pub fn new(op: Token, right: Expr) -> Self {
        UnaryExpr {
            op,
            right: Box::new(right),
        }
    }

    pub fn precedence(&self) -> u8 {
        self.op.kind.precedence()
    }

    pub fn is_right_lower(&self) -> bool {
        is_lower(&self.right, self.precedence())
    }

    pub fn start(&self) -> Position {
        self.op.start
    }

    pub fn end(&self) -> Position {
        self.right.end()
    }
}

/// Infix operation: logical, comparison, `in` or `like`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: Token,
    pub right: Box<Expr>,
}

impl BinaryExpr {
    pub fn new(left: Expr, op: Token, right: Expr) -> Self {
        BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn precedence(&self) -> u8 {
        self.op.kind.precedence()
    }

    /// The left operand is a binary/unary node binding looser than this one.
    pub fn is_left_lower(&self) -> bool {
        is_lower(&self.left, self.precedence())
    }

    pub fn is_right_lower(&self) -> bool {
        is_lower(&self.right, self.precedence())
    }

    pub fn start(&self) -> Position {
        self.left.start()
    }

    pub fn end(&self) -> Position {
        self.right.end()
    }
}

/// Indexed access `left[index]`. Chains lean left: `a["b"]["c"]` is
/// `Index(Index(a, "b"), "c")`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub left: Box<Expr>,
    pub lbrack: Token,
    pub index: Literal,
    pub rbrack: Token,
}

impl IndexExpr {
    pub fn new(left: Expr, lbrack: Token, index: Literal, rbrack: Token) -> Self {
        IndexExpr {
            left: Box::new(left),
            lbrack,
            index,
            rbrack,
        }
    }

    pub fn start(&self) -> Position {
        self.left.start()
    }

    pub fn end(&self) -> Position {
        self.rbrack.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub lparen: Token,
    pub inner: Box<Expr>,
    pub rparen: Token,
}

impl ParenExpr {
    pub fn new(lparen: Token, inner: Expr, rparen: Token) -> Self {
        ParenExpr {
            lparen,
            inner: Box::new(inner),
            rparen,
        }
    }

    pub fn start(&self) -> Position {
        self.lparen.start
    }

    pub fn end(&self) -> Position {
        self.rparen.end
    }
}

/// Abstract syntax tree of a filter expression.
///
/// Nodes are immutable once built and exclusively own their children.
/// Variants split into *atomic* leaves (`Ident`, `Literal`, `List`) and
/// *computed* interior nodes (`Unary`, `Binary`, `Index`, `Paren`).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Literal(Literal),
    List(ListLiteral),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Index(IndexExpr),
    Paren(ParenExpr),
}

impl Expr {
    /// Start of the node's span.
    pub fn start(&self) -> Position {
        match self {
            Expr::Ident(ident) => ident.start(),
            Expr::Literal(lit) => lit.start(),
            Expr::List(list) => list.start(),
            Expr::Unary(unary) => unary.start(),
            Expr::Binary(binary) => binary.start(),
            Expr::Index(index) => index.start(),
            Expr::Paren(paren) => paren.start(),
        }
    }

    /// End of the node's span.
    pub fn end(&self) -> Position {
        match self {
            Expr::Ident(ident) => ident.end(),
            Expr::Literal(lit) => lit.end(),
            Expr::List(list) => list.end(),
            Expr::Unary(unary) => unary.end(),
            Expr::Binary(binary) => binary.end(),
            Expr::Index(index) => index.end(),
            Expr::Paren(paren) => paren.end(),
        }
    }

    /// Best position to report for this node: its start, falling back to the end.
    pub fn position(&self) -> Position {
        let start = self.start();
        if start == NO_POSITION { self.end() } else { start }
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, Expr::Ident(_) | Expr::Literal(_) | Expr::List(_))
    }

    pub fn is_computed(&self) -> bool {
        !self.is_atomic()
    }

    /// Binary and unary nodes carry an operator precedence.
    pub fn has_precedence(&self) -> bool {
        matches!(self, Expr::Binary(_) | Expr::Unary(_))
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(binary) => binary.precedence(),
            Expr::Unary(unary) => unary.precedence(),
            _ => 0,
        }
    }

    /// Human-readable variant name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Expr::Ident(_) => "identifier",
            Expr::Literal(_) => "literal",
            Expr::List(_) => "list",
            Expr::Unary(_) => "unary expression",
            Expr::Binary(_) => "binary expression",
            Expr::Index(_) => "index expression",
            Expr::Paren(_) => "parenthesized expression",
        }
    }

    /// Strips any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = &paren.inner;
        }
        expr
    }

    /// Logical operator of this node, looking through parentheses.
    pub fn logical_op(&self) -> Option<TokenKind> {
        match self.unparen() {
            Expr::Binary(binary) if binary.op.kind.is_logical_operator() => Some(binary.op.kind),
            _ => None,
        }
    }
}

fn is_lower(operand: &Expr, precedence: u8) -> bool {
    operand.has_precedence() && operand.precedence() < precedence
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Expr::Ident(ident)
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<ListLiteral> for Expr {
    fn from(list: ListLiteral) -> Self {
        Expr::List(list)
    }
}

impl From<UnaryExpr> for Expr {
    fn from(unary: UnaryExpr) -> Self {
        Expr::Unary(unary)
    }
}

impl From<BinaryExpr> for Expr {
    fn from(binary: BinaryExpr) -> Self {
        Expr::Binary(binary)
    }
}

impl From<IndexExpr> for Expr {
    fn from(index: IndexExpr) -> Self {
        Expr::Index(index)
    }
}

impl From<ParenExpr> for Expr {
    fn from(paren: ParenExpr) -> Self {
        Expr::Paren(paren)
    }
}

/// A bare string in expression position names a field.
impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Ident(Ident::new(Token::of_ident(name, NO_POSITION, NO_POSITION)))
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Expr::Ident(Ident::new(Token::of_ident(name, NO_POSITION, NO_POSITION)))
    }
}
