//! Function declarations and asyncness state

use crate::{Block, Span, Type};
use serde::{Deserialize, Serialize};

/// Unique identifier for a function within one compilation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FuncId(pub u32);

/// Whether a function must be asynchronous
///
/// Mutated only by the fixed-point propagator, and only in one direction:
/// `Unknown`/`Sync` may become `Async`, never the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Asyncness {
    /// Not yet analyzed
    Unknown,
    Sync,
    Async,
}

/// A function declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Assigned when the function is inserted into a `Unit`
    pub id: FuncId,
    pub name: String,
    pub params: Vec<Param>,
    /// `None` means the function declares no return value
    pub return_type: Option<Type>,
    pub body: Block,
    pub asyncness: Asyncness,
    pub span: Span,
}

impl Function {
    /// Create a function with unresolved asyncness; the id is assigned
    /// during unit insertion
    pub fn new(
        name: impl Into<String>,
        params: Vec<Param>,
        return_type: Option<Type>,
        body: Block,
        span: Span,
    ) -> Self {
        Self {
            id: FuncId(0),
            name: name.into(),
            params,
            return_type,
            body,
            asyncness: Asyncness::Unknown,
            span,
        }
    }

    pub fn is_async(&self) -> bool {
        self.asyncness == Asyncness::Async
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}
