//! Fixed-point asyncness propagation
//!
//! Worklist algorithm over the call graph. Seeds are the functions with a
//! direct suspension marker; from each async callee, asyncness flows to
//! every caller except through launcher-wrapped sites. The transition is
//! one-directional, so each function is pushed at most once and the pass
//! is O(V + E). The fixed point is unique regardless of processing order.

use crate::CallGraph;
use ripple_ast::{Asyncness, FuncId, Unit};
use tracing::debug;

/// Computes the asyncness fixed point
pub struct Propagator;

impl Propagator {
    /// Run propagation to a fixed point, then settle every untouched
    /// function as `Sync`
    pub fn propagate(unit: &mut Unit, graph: &CallGraph, seeds: Vec<FuncId>) {
        let mut worklist: Vec<FuncId> = Vec::with_capacity(seeds.len());

        for id in seeds {
            if Self::mark_async(unit, id) {
                worklist.push(id);
            }
        }

        while let Some(callee) = worklist.pop() {
            for site in graph.sites_targeting(callee) {
                // The launcher is the sanctioned escape hatch: its sites
                // carry no suspension obligation to the caller
                if site.launcher_wrapped {
                    continue;
                }
                if Self::mark_async(unit, site.caller) {
                    worklist.push(site.caller);
                }
            }
        }

        for function in unit.iter_mut() {
            if function.asyncness == Asyncness::Unknown {
                function.asyncness = Asyncness::Sync;
            }
        }
    }

    /// Transition a function to `Async`; returns false if it already was
    fn mark_async(unit: &mut Unit, id: FuncId) -> bool {
        let Some(function) = unit.get_mut(id) else {
            return false;
        };
        if function.asyncness == Asyncness::Async {
            return false;
        }
        debug!(function = %function.name, "marked async");
        function.asyncness = Asyncness::Async;
        true
    }
}
