//! Expression AST nodes

use crate::{Span, Type};
use serde::{Deserialize, Serialize};

/// An expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Literal value: `42`, `"hello"`, `true`
    Literal(Literal),

    /// Identifier: `x`, `total`
    Ident(String),

    /// Binary operation: `a + b`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation: `!x`, `-y`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Function call: `foo(a, b)`. Callees are plain names; the language
    /// is first-order within a unit.
    Call { callee: String, args: Vec<Expr> },

    /// Closure: `|| delay(100)`. The only closure shape the analysis
    /// interprets is a launcher argument.
    Closure {
        params: Vec<ClosureParam>,
        body: Box<Expr>,
    },

    /// Suspension operator around a call: `suspend foo(a)`. Never produced
    /// by the parser; inserted by the call-site rewriter.
    Suspend(Box<Expr>),
}

impl Expr {
    pub fn call(callee: impl Into<String>, args: Vec<Expr>, span: Span) -> Self {
        Self {
            kind: ExprKind::Call {
                callee: callee.into(),
                args,
            },
            span,
        }
    }
}

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Unit,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// Closure parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureParam {
    pub name: String,
    pub ty: Option<Type>,
    pub span: Span,
}
