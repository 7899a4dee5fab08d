//! Type representations in Ripple
//!
//! The suspending forms (`SuspendingVoid`, `Suspending(T)`) are analysis
//! outputs: the parser never produces them, only the signature rewriter
//! does. They name no runtime primitive; binding them to a concrete
//! task/future type is the emitter's job.

use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A type expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    /// Named type: `Int`, `String`, `User`
    Named(String),

    /// List type: `[Int]`
    List(Box<Type>),

    /// Function type: `(Int, Int) -> Int`
    Function { params: Vec<Type>, ret: Box<Type> },

    /// A suspending computation producing no value
    SuspendingVoid,

    /// A suspending computation producing a value of the inner type
    Suspending(Box<Type>),
}

impl Type {
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self {
            kind: TypeKind::Named(name.into()),
            span,
        }
    }

    /// The suspending-void type, used when an async function declares no
    /// return value
    pub fn suspending_void(span: Span) -> Self {
        Self {
            kind: TypeKind::SuspendingVoid,
            span,
        }
    }

    /// Wrap a value-bearing return type into its suspending form
    pub fn suspending(inner: Type) -> Self {
        let span = inner.span;
        Self {
            kind: TypeKind::Suspending(Box::new(inner)),
            span,
        }
    }

    /// Whether this type is already one of the suspending forms
    pub fn is_suspending(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::SuspendingVoid | TypeKind::Suspending(_)
        )
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Named(name) => write!(f, "{}", name),
            TypeKind::List(inner) => write!(f, "[{}]", inner),
            TypeKind::Function { params, ret } => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ") -> {}", ret)
            }
            TypeKind::SuspendingVoid => write!(f, "suspending"),
            TypeKind::Suspending(inner) => write!(f, "suspending {}", inner),
        }
    }
}
