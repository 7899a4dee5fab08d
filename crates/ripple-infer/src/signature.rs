//! Signature rewriting
//!
//! Purely local pass over the unit once asyncness is final: every async
//! function's declared return type becomes its suspending form. Sync
//! functions are untouched.

use ripple_ast::{Type, Unit};

/// Rewrites declared return types of async functions
pub struct SignatureRewriter;

impl SignatureRewriter {
    /// Returns the number of signatures rewritten
    pub fn rewrite(unit: &mut Unit) -> usize {
        let mut rewritten = 0;

        for function in unit.iter_mut() {
            if !function.is_async() {
                continue;
            }

            match function.return_type.take() {
                None => {
                    function.return_type = Some(Type::suspending_void(function.span));
                    rewritten += 1;
                }
                // Already suspending: leave alone so re-running the pass
                // changes nothing
                Some(ty) if ty.is_suspending() => {
                    function.return_type = Some(ty);
                }
                Some(ty) => {
                    function.return_type = Some(Type::suspending(ty));
                    rewritten += 1;
                }
            }
        }

        rewritten
    }
}
