//! Shared AST fixture builders for the integration tests

use ripple::ast::{Block, Expr, ExprKind, Function, Literal, Span, Stmt, StmtKind, Type, Unit};

pub fn lit(value: i64) -> Expr {
    Expr {
        kind: ExprKind::Literal(Literal::Int(value)),
        span: Span::dummy(),
    }
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::call(name, args, Span::dummy())
}

/// A zero-parameter closure, the launcher argument shape
pub fn closure_of(body: Expr) -> Expr {
    Expr {
        kind: ExprKind::Closure {
            params: vec![],
            body: Box::new(body),
        },
        span: Span::dummy(),
    }
}

/// `detach(|| name())`
pub fn detached_call(name: &str) -> Expr {
    call("detach", vec![closure_of(call(name, vec![]))])
}

/// A function with no declared return value whose body is a sequence of
/// expression statements
pub fn void_fn(name: &str, exprs: Vec<Expr>) -> Function {
    let body = Block::new(exprs.into_iter().map(Stmt::expr).collect(), Span::dummy());
    Function::new(name, vec![], None, body, Span::dummy())
}

/// A function declared to return `Int`, ending in `return <value>`
pub fn int_fn(name: &str, exprs: Vec<Expr>, returned: Expr) -> Function {
    let mut statements: Vec<Stmt> = exprs.into_iter().map(Stmt::expr).collect();
    statements.push(Stmt {
        kind: StmtKind::Return(Some(returned)),
        span: Span::dummy(),
    });
    Function::new(
        name,
        vec![],
        Some(Type::named("Int", Span::dummy())),
        Block::new(statements, Span::dummy()),
        Span::dummy(),
    )
}

/// Insert functions in order, panicking on duplicates
pub fn unit_of(functions: Vec<Function>) -> Unit {
    let mut unit = Unit::new();
    for function in functions {
        assert!(
            !unit.contains(&function.name),
            "duplicate function in fixture: {}",
            function.name
        );
        unit.insert(function);
    }
    unit
}

/// The first statement of a function's body, as an expression
pub fn first_expr<'a>(unit: &'a Unit, name: &str) -> &'a Expr {
    stmt_expr(unit, name, 0)
}

/// The n-th statement of a function's body, as an expression
pub fn stmt_expr<'a>(unit: &'a Unit, name: &str, index: usize) -> &'a Expr {
    match &unit.get_by_name(name).unwrap().body.statements[index].kind {
        StmtKind::Expr(e) => e,
        other => panic!("expected expression statement, got {:?}", other),
    }
}
