use ned::ast::*;

#[macro_use]
mod common;
use common::*;

fn binary(expr: &Expr) -> (&Expr, BinOp, &Expr) {
    match expr {
        Expr::Binary(b) => (&b.lhs, b.op, &b.rhs),
        other => panic!("expected binary expression, found '{}'", other),
    }
}

#[test]
fn expressions_precedence() {
    // # Case 0
    let expr = value_of("simple A { x = 2+3*4; }", "x");
    let (lhs, op, rhs) = binary(&expr);
    assert_eq!(op, BinOp::Add);
    assert_eq!(lhs.to_string(), "2");
    assert_eq!(binary(rhs).1, BinOp::Mul);
    assert_eq!(expr.to_string(), "2 + 3 * 4");

    // # Case 1
    let expr = value_of("simple A { x = 2^3^2; }", "x");
    let (lhs, op, rhs) = binary(&expr);
    assert_eq!(op, BinOp::Pow);
    assert_eq!(lhs.to_string(), "2");
    assert_eq!(binary(rhs).1, BinOp::Pow);

    // # Case 2
    let expr = value_of("simple A { x = (2+3)*4; }", "x");
    let (lhs, op, _) = binary(&expr);
    assert_eq!(op, BinOp::Mul);
    assert_eq!(binary(lhs).1, BinOp::Add);
    assert_eq!(expr.to_string(), "(2 + 3) * 4");
}

#[test]
fn expressions_ternary() {
    let expr = value_of("simple A { x = a?b:c?d:e; }", "x");
    match &expr {
        Expr::Ternary(t) => {
            assert_eq!(t.cond.to_string(), "a");
            assert_eq!(t.then.to_string(), "b");
            match &*t.otherwise {
                Expr::Ternary(inner) => {
                    assert_eq!(inner.cond.to_string(), "c");
                    assert_eq!(inner.then.to_string(), "d");
                    assert_eq!(inner.otherwise.to_string(), "e");
                }
                other => panic!("expected nested conditional, found '{}'", other),
            }
        }
        other => panic!("expected conditional, found '{}'", other),
    }
}

#[test]
fn expressions_quantities() {
    let expr = value_of("simple A { double t @unit(s) = 3h20min; }", "t");
    match expr.as_lit().map(|lit| &lit.kind) {
        Some(LitKind::Quantity(parts)) => {
            assert_eq!(parts.len(), 2);
            assert_eq!(parts[0].unit, "h");
            assert_eq!(parts[1].unit, "min");
        }
        other => panic!("expected quantity, found {:?}", other),
    }
    assert_eq!(expr.to_string(), "3h20min");
}

#[test]
fn expressions_operators_on_names() {
    // # Case 0
    let expr = value_of("simple A { x = sizeof(port) + index; }", "x");
    let (lhs, op, rhs) = binary(&expr);
    assert_eq!(op, BinOp::Add);
    assert!(matches!(lhs, Expr::Sizeof(_)));
    assert!(matches!(rhs, Expr::Index(NameOp { name: None, .. })));

    // # Case 1
    let expr = value_of("simple A { bool x = exists(app) && parent.n > 0; }", "x");
    assert_eq!(expr.to_string(), "exists(app) && parent.n > 0");

    // # Case 2
    let expr = value_of("simple A { string x = host[0].typename; }", "x");
    assert!(matches!(expr, Expr::Typename(NameOp { name: Some(_), .. })));
}

#[test]
fn expressions_literals() {
    // # Case 0
    let expr = value_of("simple A { object x = {a: 1, b: [1, 2,]}; }", "x");
    assert!(matches!(expr, Expr::Object(_)));
    assert_eq!(expr.to_string(), "{a: 1, b: [1, 2]}");

    // # Case 1
    let expr = value_of("simple A { x = uniform(1s, 2s) * 2; }", "x");
    let (lhs, _, _) = binary(&expr);
    match lhs {
        Expr::Call(call) => {
            assert_eq!(call.func.to_string(), "uniform");
            assert_eq!(call.args.len(), 2);
        }
        other => panic!("expected call, found '{}'", other),
    }
}
