//! Error types for asynchrony inference

use ripple_ast::Span;
use thiserror::Error;

/// Errors from the asynchrony-inference pass
#[derive(Debug, Clone, Error)]
pub enum InferError {
    /// E-ASYNC-001: Call target not declared in the unit (soft error;
    /// the edge is excluded from propagation)
    #[error("unresolved call target: {name} (called from {caller})")]
    UnresolvedCallTarget {
        name: String,
        /// Name of the function containing the call
        caller: String,
        span: Span,
    },

    /// E-ASYNC-002: An async callee invoked from a sync caller without
    /// launcher wrapping (hard error; indicates a propagation defect or a
    /// malformed unit, since propagation should have made the caller async)
    #[error("sync function {caller} calls async function {callee} without the launcher")]
    SyncCallsAsync {
        caller: String,
        callee: String,
        span: Span,
    },

    /// E-ASYNC-003: Structurally invalid unit (fatal; aborts the pass)
    #[error("malformed unit: {reason}")]
    MalformedUnit { reason: String, span: Span },
}

impl InferError {
    /// Get the source span of this error
    pub fn span(&self) -> Span {
        match self {
            InferError::UnresolvedCallTarget { span, .. } => *span,
            InferError::SyncCallsAsync { span, .. } => *span,
            InferError::MalformedUnit { span, .. } => *span,
        }
    }

    /// Whether this error blocks the pass; unresolved targets are
    /// reported as warnings only
    pub fn is_hard_error(&self) -> bool {
        match self {
            InferError::UnresolvedCallTarget { .. } => false,
            InferError::SyncCallsAsync { .. } => true,
            InferError::MalformedUnit { .. } => true,
        }
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            InferError::UnresolvedCallTarget { .. } => "E-ASYNC-001",
            InferError::SyncCallsAsync { .. } => "E-ASYNC-002",
            InferError::MalformedUnit { .. } => "E-ASYNC-003",
        }
    }
}
