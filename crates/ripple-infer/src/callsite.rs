//! Call-site rewriting
//!
//! Inserts the suspension operator around every call whose resolved callee
//! is async, except at launcher-wrapped sites, which stay detached
//! invocations with their result discarded. Also audits the contract that
//! every non-launcher caller of an async function ended up async itself -
//! propagation guarantees this, so a violation is a defect, not a
//! user-facing diagnostic.

use crate::{CallGraph, Callee, InferError};
use ripple_ast::{
    Asyncness, Block, Expr, ExprKind, Literal, Span, Stmt, StmtKind, Unit,
};
use std::collections::HashSet;
use tracing::debug;

/// Rewrites call expressions targeting async functions
pub struct CallSiteRewriter;

impl CallSiteRewriter {
    /// Wrap qualifying call sites in the suspension operator, marking the
    /// corresponding graph records. Returns the number of insertions.
    pub fn rewrite(unit: &mut Unit, graph: &mut CallGraph) -> Result<usize, Vec<InferError>> {
        let info: Vec<(String, Asyncness)> = unit
            .iter()
            .map(|f| (f.name.clone(), f.asyncness))
            .collect();

        // Audit first: the graph records are the source of truth for which
        // sites must gain an operator
        let mut violations = Vec::new();
        for site in graph.sites_mut() {
            let Callee::Resolved(callee) = &site.callee else {
                continue;
            };
            let callee = *callee;
            if info[callee.0 as usize].1 != Asyncness::Async {
                continue;
            }
            if site.launcher_wrapped {
                continue;
            }

            if info[site.caller.0 as usize].1 == Asyncness::Async {
                site.suspension_inserted = true;
            } else {
                violations.push(InferError::SyncCallsAsync {
                    caller: info[site.caller.0 as usize].0.clone(),
                    callee: info[callee.0 as usize].0.clone(),
                    span: site.span,
                });
            }
        }
        if !violations.is_empty() {
            return Err(violations);
        }

        let async_names: HashSet<String> = info
            .iter()
            .filter(|(_, a)| *a == Asyncness::Async)
            .map(|(name, _)| name.clone())
            .collect();

        let mut inserted = 0;
        for function in unit.iter_mut() {
            // Only async functions can hold non-launcher sites to async
            // callees, which the audit above just established
            if function.asyncness != Asyncness::Async {
                continue;
            }
            inserted += rewrite_block(&mut function.body, &async_names);
        }
        debug!(inserted, "suspension operators inserted");

        Ok(inserted)
    }
}

fn rewrite_block(block: &mut Block, async_names: &HashSet<String>) -> usize {
    block
        .statements
        .iter_mut()
        .map(|stmt| rewrite_stmt(stmt, async_names))
        .sum()
}

fn rewrite_stmt(stmt: &mut Stmt, async_names: &HashSet<String>) -> usize {
    match &mut stmt.kind {
        StmtKind::Let { value, .. } => rewrite_expr(value, async_names, true),
        StmtKind::Expr(expr) => rewrite_expr(expr, async_names, true),
        StmtKind::Return(Some(expr)) => rewrite_expr(expr, async_names, true),
        StmtKind::Return(None) => 0,
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let mut n = rewrite_expr(condition, async_names, true);
            n += rewrite_block(then_branch, async_names);
            if let Some(else_branch) = else_branch {
                n += rewrite_block(else_branch, async_names);
            }
            n
        }
        StmtKind::While { condition, body } => {
            rewrite_expr(condition, async_names, true) + rewrite_block(body, async_names)
        }
    }
}

/// `wrap_allowed` is false directly under an existing suspension operator,
/// so re-running the pass never double-wraps
fn rewrite_expr(expr: &mut Expr, async_names: &HashSet<String>, wrap_allowed: bool) -> usize {
    match &mut expr.kind {
        ExprKind::Call { callee, args } => {
            let mut n = args
                .iter_mut()
                .map(|arg| rewrite_expr(arg, async_names, true))
                .sum();

            if wrap_allowed && async_names.contains(callee.as_str()) {
                let span = expr.span;
                let call = std::mem::replace(
                    expr,
                    Expr {
                        kind: ExprKind::Literal(Literal::Unit),
                        span: Span::dummy(),
                    },
                );
                *expr = Expr {
                    kind: ExprKind::Suspend(Box::new(call)),
                    span,
                };
                n += 1;
            }
            n
        }
        ExprKind::Suspend(inner) => rewrite_expr(inner, async_names, false),
        ExprKind::Binary { left, right, .. } => {
            rewrite_expr(left, async_names, true) + rewrite_expr(right, async_names, true)
        }
        ExprKind::Unary { operand, .. } => rewrite_expr(operand, async_names, true),
        // Launcher-wrapped calls live in closure bodies; detached
        // invocations gain no operator
        ExprKind::Closure { .. } => 0,
        ExprKind::Literal(_) | ExprKind::Ident(_) => 0,
    }
}
