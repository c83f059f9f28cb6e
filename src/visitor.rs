//! Depth-first traversal over filter trees.
//!
//! [`Node`] is a borrowed view of any tree element, including the literals
//! held inside lists and index accesses. [`walk`] calls [`Visitor::visit`] on a
//! node and, when the visitor asks for it, descends into the node's children
//! in source order (left before right, index base before index key).

use crate::ast::{
    BinaryExpr, Expr, Ident, IndexExpr, ListLiteral, Literal, ParenExpr, Position, UnaryExpr,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Ident(&'a Ident),
    Literal(&'a Literal),
    List(&'a ListLiteral),
    Unary(&'a UnaryExpr),
    Binary(&'a BinaryExpr),
    Index(&'a IndexExpr),
    Paren(&'a ParenExpr),
}

impl<'a> Node<'a> {
    pub fn start(&self) -> Position {
        match self {
            Node::Ident(ident) => ident.start(),
            Node::Literal(lit) => lit.start(),
            Node::List(list) => list.start(),
            Node::Unary(unary) => unary.start(),
            Node::Binary(binary) => binary.start(),
            Node::Index(index) => index.start(),
            Node::Paren(paren) => paren.start(),
        }
    }

    pub fn end(&self) -> Position {
        match self {
            Node::Ident(ident) => ident.end(),
            Node::Literal(lit) => lit.end(),
            Node::List(list) => list.end(),
            Node::Unary(unary) => unary.end(),
            Node::Binary(binary) => binary.end(),
            Node::Index(index) => index.end(),
            Node::Paren(paren) => paren.end(),
        }
    }

    /// Structural children in traversal order.
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Ident(_) | Node::Literal(_) => Vec::new(),
            Node::List(list) => list.values.iter().map(Node::Literal).collect(),
            Node::Unary(unary) => vec![Node::from(unary.right.as_ref())],
            Node::Binary(binary) => vec![
                Node::from(binary.left.as_ref()),
                Node::from(binary.right.as_ref()),
            ],
            Node::Index(index) => vec![Node::from(index.left.as_ref()), Node::Literal(&index.index)],
            Node::Paren(paren) => vec![Node::from(paren.inner.as_ref())],
        }
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Ident(ident) => Node::Ident(ident),
            Expr::Literal(lit) => Node::Literal(lit),
            Expr::List(list) => Node::List(list),
            Expr::Unary(unary) => Node::Unary(unary),
            Expr::Binary(binary) => Node::Binary(binary),
            Expr::Index(index) => Node::Index(index),
            Expr::Paren(paren) => Node::Paren(paren),
        }
    }
}

impl<'a> From<&'a Literal> for Node<'a> {
    fn from(lit: &'a Literal) -> Self {
        Node::Literal(lit)
    }
}

impl<'a> From<&'a ListLiteral> for Node<'a> {
    fn from(list: &'a ListLiteral) -> Self {
        Node::List(list)
    }
}

pub trait Visitor {
    /// Inspects `node`. Returning `false` skips the node's subtree.
    fn visit(&mut self, node: Node<'_>) -> bool;
}

pub fn walk<'a, V: Visitor + ?Sized>(visitor: &mut V, node: impl Into<Node<'a>>) {
    let node = node.into();
    if !visitor.visit(node) {
        return;
    }
    for child in node.children() {
        walk(visitor, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::{and, eq, in_, index};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
        skip_binary: bool,
    }

    impl Visitor for Recorder {
        fn visit(&mut self, node: Node<'_>) -> bool {
            let label = match node {
                Node::Ident(ident) => ident.value.clone(),
                Node::Literal(lit) => lit.value.clone(),
                Node::List(_) => "list".to_string(),
                Node::Unary(_) => "not".to_string(),
                Node::Binary(binary) => binary.op.literal.clone(),
                Node::Index(_) => "[]".to_string(),
                Node::Paren(_) => "()".to_string(),
            };
            self.seen.push(label);
            !(self.skip_binary && matches!(node, Node::Binary(_)))
        }
    }

    #[test]
    fn test_walk_order() {
        let expr = and(eq(index("user", "name"), "Alice"), in_("id", [1, 2]));
        let mut recorder = Recorder::default();
        walk(&mut recorder, &expr);
        assert_eq!(
            recorder.seen,
            vec!["and", "==", "[]", "user", "name", "Alice", "in", "id", "list", "1", "2"]
        );
    }

    #[test]
    fn test_walk_skips_subtree() {
        let expr = and(eq("a", 1), eq("b", 2));
        let mut recorder = Recorder {
            skip_binary: true,
            ..Default::default()
        };
        walk(&mut recorder, &expr);
        assert_eq!(recorder.seen, vec!["and"]);
    }

    #[test]
    fn test_node_span_matches_expr() {
        fn check(expr: &Expr) {
            let node = Node::from(expr);
            assert_eq!(node.start(), expr.start(), "{expr}");
            assert_eq!(node.end(), expr.end(), "{expr}");
            match expr {
                Expr::Unary(unary) => check(&unary.right),
                Expr::Binary(binary) => {
                    check(&binary.left);
                    check(&binary.right);
                }
                Expr::Index(index) => check(&index.left),
                Expr::Paren(paren) => check(&paren.inner),
                _ => {}
            }
        }

        let expr = crate::parse("not (a == 1) or tags[0] in (1, 2) and b['c'] like 'x%'").unwrap();
        check(&expr);
        assert_eq!(Node::from(&expr).start(), Position::new(1, 1));
    }
}
