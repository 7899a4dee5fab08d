//! ripple-infer: Asynchrony inference and rewrite engine
//!
//! This crate implements the analysis-and-rewrite pass of the Ripple
//! transpiler:
//! - Detect direct suspension markers in every function body
//! - Build the intra-unit call graph
//! - Propagate must-be-async status to a fixed point over that graph
//! - Rewrite async signatures to suspending return types
//! - Insert the suspension operator at qualifying call sites
//!
//! The fixed point is a monotone boolean OR over a finite lattice:
//! asyncness only ever moves `Sync`/`Unknown` -> `Async`, so the result is
//! identical regardless of worklist order.
//!
//! # Example
//!
//! ```
//! use ripple_ast::{Block, Expr, Function, Span, Stmt, Unit};
//! use ripple_infer::{infer, MarkerRegistry};
//!
//! let mut unit = Unit::new();
//! let body = Block::new(
//!     vec![Stmt::expr(Expr::call(
//!         "delay",
//!         vec![Expr::call("print", vec![], Span::dummy())],
//!         Span::dummy(),
//!     ))],
//!     Span::dummy(),
//! );
//! unit.insert(Function::new("pause", vec![], None, body, Span::dummy()));
//!
//! let result = infer(&mut unit, &MarkerRegistry::default()).unwrap();
//! assert!(unit.get_by_name("pause").unwrap().is_async());
//! assert!(result.warnings.is_empty());
//! ```

mod callsite;
mod detect;
mod error;
mod graph;
mod propagate;
mod registry;
mod signature;

pub use callsite::CallSiteRewriter;
pub use detect::{Detection, SuspensionDetector};
pub use error::InferError;
pub use graph::{BuildResult, CallGraph, CallGraphBuilder, CallSite, Callee};
pub use propagate::Propagator;
pub use registry::{MarkerEntry, MarkerRegistry};
pub use signature::SignatureRewriter;

use ripple_ast::{FuncId, Unit};
use tracing::debug;

/// Output of a successful inference pass
#[derive(Debug)]
pub struct AnalysisResult {
    /// The unit's call graph, with suspension markers on rewritten sites
    pub graph: CallGraph,
    /// Soft errors (unresolved call targets)
    pub warnings: Vec<InferError>,
    /// Number of suspension operators inserted
    pub suspensions_inserted: usize,
    /// Number of signatures rewritten to a suspending return type
    pub signatures_rewritten: usize,
}

/// Run the full asynchrony-inference pass on one compilation unit
///
/// The unit is mutated in place: every function's asyncness is resolved,
/// async return types are rewritten to their suspending forms, and
/// qualifying call expressions gain the suspension operator. Hard errors
/// abort the pass; unresolved call targets are returned as warnings.
pub fn infer(
    unit: &mut Unit,
    registry: &MarkerRegistry,
) -> Result<AnalysisResult, Vec<InferError>> {
    validate_unit(unit, registry).map_err(|e| vec![e])?;

    // Phase 1: direct suspension markers, one scan per function
    let detector = SuspensionDetector::new(registry);
    let seeds: Vec<FuncId> = unit
        .iter()
        .filter(|f| detector.detect(&f.body).has_direct_marker())
        .map(|f| f.id)
        .collect();
    debug!(seeds = seeds.len(), "direct suspension markers found");

    // Phase 2: call graph
    let BuildResult {
        mut graph,
        warnings,
    } = CallGraphBuilder::new(unit, registry)
        .build()
        .map_err(|e| vec![e])?;

    // Phase 3: fixed-point propagation
    Propagator::propagate(unit, &graph, seeds);

    // Phases 4 and 5: rewrites consume the final asyncness
    let signatures_rewritten = SignatureRewriter::rewrite(unit);
    let suspensions_inserted = CallSiteRewriter::rewrite(unit, &mut graph)?;

    Ok(AnalysisResult {
        graph,
        warnings,
        suspensions_inserted,
        signatures_rewritten,
    })
}

/// Structural validation: function ids must match their dense positions,
/// and no unit function may shadow a registered primitive or the launcher.
/// Shadowing would make the name ambiguous between the registry (detector,
/// builder skip list) and the unit's declarations, so calls to it could
/// bypass propagation entirely.
fn validate_unit(unit: &Unit, registry: &MarkerRegistry) -> Result<(), InferError> {
    for (index, function) in unit.iter().enumerate() {
        if function.id.0 as usize != index {
            return Err(InferError::MalformedUnit {
                reason: format!(
                    "function {} has id {} at position {}",
                    function.name, function.id.0, index
                ),
                span: function.span,
            });
        }
        if registry.is_primitive(&function.name) || registry.is_launcher(&function.name) {
            return Err(InferError::MalformedUnit {
                reason: format!(
                    "function {} shadows a registered primitive",
                    function.name
                ),
                span: function.span,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_ast::{Asyncness, Block, Expr, Function, Span, Stmt};

    fn call(name: &str, args: Vec<Expr>) -> Expr {
        Expr::call(name, args, Span::dummy())
    }

    fn fn_with_exprs(name: &str, exprs: Vec<Expr>) -> Function {
        let body = Block::new(exprs.into_iter().map(Stmt::expr).collect(), Span::dummy());
        Function::new(name, vec![], None, body, Span::dummy())
    }

    #[test]
    fn test_empty_unit() {
        let mut unit = Unit::new();
        let result = infer(&mut unit, &MarkerRegistry::default()).unwrap();
        assert!(result.warnings.is_empty());
        assert_eq!(result.suspensions_inserted, 0);
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let mut unit = Unit::new();
        unit.insert(fn_with_exprs(
            "q",
            vec![call("delay", vec![call("print", vec![])])],
        ));
        unit.insert(fn_with_exprs("r", vec![call("q", vec![])]));

        let result = infer(&mut unit, &MarkerRegistry::default()).unwrap();

        assert_eq!(
            unit.get_by_name("q").unwrap().asyncness,
            Asyncness::Async
        );
        assert_eq!(
            unit.get_by_name("r").unwrap().asyncness,
            Asyncness::Async
        );
        assert_eq!(result.signatures_rewritten, 2);
        assert_eq!(result.suspensions_inserted, 1);
    }

    #[test]
    fn test_malformed_unit_rejected() {
        let mut unit = Unit::new();
        unit.insert(fn_with_exprs("a", vec![]));
        // Corrupt the dense id assignment
        unit.get_mut(ripple_ast::FuncId(0)).unwrap().id = ripple_ast::FuncId(7);

        let errors = infer(&mut unit, &MarkerRegistry::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), "E-ASYNC-003");
    }

    #[test]
    fn test_primitive_shadowing_rejected() {
        let mut unit = Unit::new();
        unit.insert(fn_with_exprs("print", vec![call("delay", vec![])]));
        unit.insert(fn_with_exprs("caller", vec![call("print", vec![])]));

        let errors = infer(&mut unit, &MarkerRegistry::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), "E-ASYNC-003");
        assert_eq!(
            unit.get_by_name("caller").unwrap().asyncness,
            Asyncness::Unknown
        );
    }

    #[test]
    fn test_launcher_shadowing_rejected() {
        let mut unit = Unit::new();
        unit.insert(fn_with_exprs("detach", vec![]));

        let errors = infer(&mut unit, &MarkerRegistry::default()).unwrap_err();
        assert_eq!(errors[0].code(), "E-ASYNC-003");
    }

    #[test]
    fn test_warnings_are_soft() {
        let mut unit = Unit::new();
        unit.insert(fn_with_exprs("main", vec![call("external_fn", vec![])]));

        let result = infer(&mut unit, &MarkerRegistry::default()).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(!result.warnings[0].is_hard_error());
        assert_eq!(
            unit.get_by_name("main").unwrap().asyncness,
            Asyncness::Sync
        );
    }
}
