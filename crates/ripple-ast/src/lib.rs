//! Ripple AST - Core types for the abstract syntax tree
//!
//! This crate defines the AST node types an external parser produces and
//! the asynchrony-inference engine consumes and mutates: spans, types
//! (including the suspending return-type forms), expressions, statements,
//! function declarations with their asyncness state, and the compilation
//! unit container.

mod decl;
mod expr;
mod span;
mod stmt;
mod types;
mod unit;

pub use decl::*;
pub use expr::*;
pub use span::*;
pub use stmt::*;
pub use types::*;
pub use unit::*;
