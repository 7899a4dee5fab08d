//! Suspension detection
//!
//! Scans one function body for calls that match a registered suspension
//! primitive by name and arity. Detection is purely syntactic: user-defined
//! callees are resolved by the call graph builder, not here. Closure bodies
//! are skipped - a marker inside a closure suspends the closure, not the
//! enclosing function.

use crate::MarkerRegistry;
use ripple_ast::{Block, Expr, ExprKind, Span, Stmt, StmtKind};

/// Result of scanning one function body
#[derive(Debug, Clone, Default)]
pub struct Detection {
    /// Spans of calls matching a suspension primitive
    pub marker_sites: Vec<Span>,
}

impl Detection {
    /// Whether the body contains at least one direct suspension marker
    pub fn has_direct_marker(&self) -> bool {
        !self.marker_sites.is_empty()
    }
}

/// Detects direct suspension markers in function bodies
pub struct SuspensionDetector<'a> {
    registry: &'a MarkerRegistry,
}

impl<'a> SuspensionDetector<'a> {
    pub fn new(registry: &'a MarkerRegistry) -> Self {
        Self { registry }
    }

    /// Scan a function body for direct suspension markers
    pub fn detect(&self, body: &Block) -> Detection {
        let mut detection = Detection::default();
        self.scan_block(body, &mut detection);
        detection
    }

    fn scan_block(&self, block: &Block, out: &mut Detection) {
        for stmt in &block.statements {
            self.scan_stmt(stmt, out);
        }
    }

    fn scan_stmt(&self, stmt: &Stmt, out: &mut Detection) {
        match &stmt.kind {
            StmtKind::Let { value, .. } => self.scan_expr(value, out),
            StmtKind::Expr(expr) => self.scan_expr(expr, out),
            StmtKind::Return(Some(expr)) => self.scan_expr(expr, out),
            StmtKind::Return(None) => {}
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.scan_expr(condition, out);
                self.scan_block(then_branch, out);
                if let Some(else_branch) = else_branch {
                    self.scan_block(else_branch, out);
                }
            }
            StmtKind::While { condition, body } => {
                self.scan_expr(condition, out);
                self.scan_block(body, out);
            }
        }
    }

    fn scan_expr(&self, expr: &Expr, out: &mut Detection) {
        match &expr.kind {
            ExprKind::Call { callee, args } => {
                if self.registry.is_suspension_primitive(callee, args.len()) {
                    out.marker_sites.push(expr.span);
                }
                for arg in args {
                    self.scan_expr(arg, out);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                self.scan_expr(left, out);
                self.scan_expr(right, out);
            }
            ExprKind::Unary { operand, .. } => self.scan_expr(operand, out),
            ExprKind::Suspend(inner) => self.scan_expr(inner, out),
            // Closures suspend themselves, not the enclosing function
            ExprKind::Closure { .. } => {}
            ExprKind::Literal(_) | ExprKind::Ident(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_ast::Literal;

    fn call(name: &str, args: Vec<Expr>) -> Expr {
        Expr::call(name, args, Span::dummy())
    }

    fn lit(value: i64) -> Expr {
        Expr {
            kind: ExprKind::Literal(Literal::Int(value)),
            span: Span::dummy(),
        }
    }

    fn body_of(exprs: Vec<Expr>) -> Block {
        Block::new(exprs.into_iter().map(Stmt::expr).collect(), Span::dummy())
    }

    #[test]
    fn test_delay_detected() {
        let registry = MarkerRegistry::default();
        let detector = SuspensionDetector::new(&registry);

        let body = body_of(vec![call("delay", vec![lit(100)])]);
        let detection = detector.detect(&body);

        assert!(detection.has_direct_marker());
        assert_eq!(detection.marker_sites.len(), 1);
    }

    #[test]
    fn test_print_is_not_a_marker() {
        let registry = MarkerRegistry::default();
        let detector = SuspensionDetector::new(&registry);

        let body = body_of(vec![call("print", vec![lit(1)])]);
        assert!(!detector.detect(&body).has_direct_marker());
    }

    #[test]
    fn test_arity_mismatch_not_detected() {
        let registry = MarkerRegistry::default();
        let detector = SuspensionDetector::new(&registry);

        // delay/2 does not match the registered delay/1
        let body = body_of(vec![call("delay", vec![lit(1), lit(2)])]);
        assert!(!detector.detect(&body).has_direct_marker());
    }

    #[test]
    fn test_user_calls_not_detected() {
        let registry = MarkerRegistry::default();
        let detector = SuspensionDetector::new(&registry);

        // Detection never resolves user-defined callees
        let body = body_of(vec![call("helper", vec![])]);
        assert!(!detector.detect(&body).has_direct_marker());
    }

    #[test]
    fn test_marker_in_nested_statement() {
        let registry = MarkerRegistry::default();
        let detector = SuspensionDetector::new(&registry);

        let body = Block::new(
            vec![Stmt {
                kind: StmtKind::If {
                    condition: lit(1),
                    then_branch: body_of(vec![call("delay", vec![lit(50)])]),
                    else_branch: None,
                },
                span: Span::dummy(),
            }],
            Span::dummy(),
        );

        assert!(detector.detect(&body).has_direct_marker());
    }

    #[test]
    fn test_marker_inside_closure_skipped() {
        let registry = MarkerRegistry::default();
        let detector = SuspensionDetector::new(&registry);

        let closure = Expr {
            kind: ExprKind::Closure {
                params: vec![],
                body: Box::new(call("delay", vec![lit(100)])),
            },
            span: Span::dummy(),
        };
        let body = body_of(vec![call("detach", vec![closure])]);

        assert!(!detector.detect(&body).has_direct_marker());
    }

    #[test]
    fn test_multiple_markers_all_reported() {
        let registry = MarkerRegistry::default();
        let detector = SuspensionDetector::new(&registry);

        let body = body_of(vec![
            call("delay", vec![lit(10)]),
            call("print", vec![lit(0)]),
            call("delay", vec![lit(20)]),
        ]);

        assert_eq!(detector.detect(&body).marker_sites.len(), 2);
    }
}
