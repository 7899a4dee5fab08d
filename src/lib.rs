//! Ripple - asynchrony inference for a source-to-source transpiler
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export member crates for convenience
pub use ripple_ast as ast;
pub use ripple_infer as infer;
