//! Intra-unit call graph
//!
//! Nodes are the unit's function ids; edges are call sites. Unresolved
//! callees are recorded but contribute no propagation edge. A call to the
//! launcher primitive is unwrapped to the call inside its closure argument,
//! which is recorded as a launcher-wrapped site.

use crate::{InferError, MarkerRegistry};
use ripple_ast::{Block, Expr, ExprKind, FuncId, Span, Stmt, StmtKind, Unit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// The target of a call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Callee {
    /// A function declared in the same unit
    Resolved(FuncId),
    /// External or unknown; excluded from propagation
    Unresolved(String),
}

/// One call expression inside a function body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSite {
    /// Function containing the call
    pub caller: FuncId,
    pub callee: Callee,
    /// Span of the call expression
    pub span: Span,
    /// Whether the call is wrapped by the fire-and-forget launcher
    pub launcher_wrapped: bool,
    /// Set by the call-site rewriter once a suspension operator is inserted
    pub suspension_inserted: bool,
}

/// The call graph of one compilation unit
#[derive(Debug, Default, Clone)]
pub struct CallGraph {
    sites: Vec<CallSite>,
    /// Site indices grouped by resolved callee
    incoming: HashMap<FuncId, Vec<usize>>,
}

impl CallGraph {
    fn push(&mut self, site: CallSite) {
        if let Callee::Resolved(callee) = site.callee {
            self.incoming.entry(callee).or_default().push(self.sites.len());
        }
        self.sites.push(site);
    }

    /// All recorded call sites, resolved and unresolved
    pub fn sites(&self) -> &[CallSite] {
        &self.sites
    }

    pub fn sites_mut(&mut self) -> &mut [CallSite] {
        &mut self.sites
    }

    /// Call sites whose resolved callee is `callee`
    pub fn sites_targeting(&self, callee: FuncId) -> impl Iterator<Item = &CallSite> {
        self.incoming
            .get(&callee)
            .into_iter()
            .flatten()
            .map(|&i| &self.sites[i])
    }

    /// Check that every site's caller exists in the unit and that the
    /// site's span lies within the caller's span
    pub fn validate(&self, unit: &Unit) -> bool {
        self.sites
            .iter()
            .all(|s| unit.get(s.caller).map_or(false, |f| f.span.contains(s.span)))
    }
}

/// Builds the call graph by resolving every call expression in the unit
pub struct CallGraphBuilder<'a> {
    unit: &'a Unit,
    registry: &'a MarkerRegistry,
    graph: CallGraph,
    warnings: Vec<InferError>,
}

/// Graph plus the soft errors produced while building it
#[derive(Debug)]
pub struct BuildResult {
    pub graph: CallGraph,
    pub warnings: Vec<InferError>,
}

impl<'a> CallGraphBuilder<'a> {
    pub fn new(unit: &'a Unit, registry: &'a MarkerRegistry) -> Self {
        Self {
            unit,
            registry,
            graph: CallGraph::default(),
            warnings: Vec::new(),
        }
    }

    /// Traverse every function body and record its call sites
    pub fn build(mut self) -> Result<BuildResult, InferError> {
        for function in self.unit.iter() {
            let caller = function.id;
            self.scan_block(caller, &function.body)?;
        }

        Ok(BuildResult {
            graph: self.graph,
            warnings: self.warnings,
        })
    }

    fn scan_block(&mut self, caller: FuncId, block: &Block) -> Result<(), InferError> {
        for stmt in &block.statements {
            self.scan_stmt(caller, stmt)?;
        }
        Ok(())
    }

    fn scan_stmt(&mut self, caller: FuncId, stmt: &Stmt) -> Result<(), InferError> {
        match &stmt.kind {
            StmtKind::Let { value, .. } => self.scan_expr(caller, value),
            StmtKind::Expr(expr) => self.scan_expr(caller, expr),
            StmtKind::Return(Some(expr)) => self.scan_expr(caller, expr),
            StmtKind::Return(None) => Ok(()),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.scan_expr(caller, condition)?;
                self.scan_block(caller, then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.scan_block(caller, else_branch)?;
                }
                Ok(())
            }
            StmtKind::While { condition, body } => {
                self.scan_expr(caller, condition)?;
                self.scan_block(caller, body)
            }
        }
    }

    fn scan_expr(&mut self, caller: FuncId, expr: &Expr) -> Result<(), InferError> {
        match &expr.kind {
            ExprKind::Call { callee, args } => {
                if self.registry.is_launcher(callee) {
                    return self.record_launched(caller, expr, args);
                }

                if !self.registry.is_primitive(callee) {
                    self.record_site(caller, callee, expr.span, false);
                }

                for arg in args {
                    self.scan_expr(caller, arg)?;
                }
                Ok(())
            }
            ExprKind::Binary { left, right, .. } => {
                self.scan_expr(caller, left)?;
                self.scan_expr(caller, right)
            }
            ExprKind::Unary { operand, .. } => self.scan_expr(caller, operand),
            ExprKind::Suspend(inner) => self.scan_expr(caller, inner),
            // Closure bodies outside a launcher argument are opaque here,
            // matching the suspension detector
            ExprKind::Closure { .. } => Ok(()),
            ExprKind::Literal(_) | ExprKind::Ident(_) => Ok(()),
        }
    }

    /// Record the call wrapped by a launcher invocation: `detach(|| f())`
    fn record_launched(
        &mut self,
        caller: FuncId,
        launcher_expr: &Expr,
        args: &[Expr],
    ) -> Result<(), InferError> {
        let malformed = |reason: &str, span: Span| InferError::MalformedUnit {
            reason: format!("launcher {}: {}", self.registry.launcher_name(), reason),
            span,
        };

        let [arg] = args else {
            return Err(malformed(
                "expected exactly one argument",
                launcher_expr.span,
            ));
        };

        let ExprKind::Closure { params, body } = &arg.kind else {
            return Err(malformed("argument must be a closure", arg.span));
        };
        if !params.is_empty() {
            return Err(malformed("closure must take no parameters", arg.span));
        }

        let ExprKind::Call { callee, .. } = &body.kind else {
            return Err(malformed("closure body must be a single call", body.span));
        };

        // A launched registry primitive needs no edge and no rewrite
        if !self.registry.is_primitive(callee) {
            self.record_site(caller, callee, body.span, true);
        }
        Ok(())
    }

    fn record_site(&mut self, caller: FuncId, callee: &str, span: Span, launcher_wrapped: bool) {
        let resolved = match self.unit.id_of(callee) {
            Some(id) => Callee::Resolved(id),
            None => {
                let caller_name = self
                    .unit
                    .get(caller)
                    .map(|f| f.name.clone())
                    .unwrap_or_default();
                debug!(callee, caller = %caller_name, "unresolved call target");
                self.warnings.push(InferError::UnresolvedCallTarget {
                    name: callee.to_string(),
                    caller: caller_name,
                    span,
                });
                Callee::Unresolved(callee.to_string())
            }
        };

        self.graph.push(CallSite {
            caller,
            callee: resolved,
            span,
            launcher_wrapped,
            suspension_inserted: false,
        });
    }
}
