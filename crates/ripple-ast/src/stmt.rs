//! Statement AST nodes

use crate::{Expr, Span, Type};
use serde::{Deserialize, Serialize};

/// A block of statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Self { statements, span }
    }

    pub fn empty() -> Self {
        Self {
            statements: Vec::new(),
            span: Span::dummy(),
        }
    }
}

/// A statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    /// Shorthand for a bare expression statement
    pub fn expr(expr: Expr) -> Self {
        let span = expr.span;
        Self {
            kind: StmtKind::Expr(expr),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// Let binding: `let x: Int = 5`
    Let {
        name: String,
        ty: Option<Type>,
        value: Expr,
    },

    /// Expression statement: `foo()`
    Expr(Expr),

    /// Return statement: `return x`
    Return(Option<Expr>),

    /// Conditional: `if cond { ... } else { ... }`
    If {
        condition: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },

    /// While loop: `while cond { ... }`
    While { condition: Expr, body: Block },
}
