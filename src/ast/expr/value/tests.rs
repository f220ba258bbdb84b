use super::*;
use crate::{
    ast::{LitKind, Number, TokenStream},
    error::ErrorKind,
    SourceMap,
};

fn parse_restricted(raw: &str, restr: Restrictions) -> Result<(Expr, usize)> {
    let mut smap = SourceMap::new();
    let asset = smap.load_raw("raw:expr", raw);
    let ts = TokenStream::new(asset)?;
    let buf = ParseBuffer::new(asset, ts);
    let expr = parse_expr_with(&buf, restr)?;
    Ok((expr, buf.ts.state()))
}

fn parse(raw: &str) -> Expr {
    let mut smap = SourceMap::new();
    let asset = smap.load_raw("raw:expr", raw);
    let ts = TokenStream::new(asset).unwrap();
    let buf = ParseBuffer::new(asset, ts);
    let expr = Expr::parse(&buf).unwrap();
    assert!(buf.ts.is_empty(), "trailing tokens after '{}'", raw);
    expr
}

fn parse_err(raw: &str) -> crate::error::Error {
    let mut smap = SourceMap::new();
    let asset = smap.load_raw("raw:expr", raw);
    let ts = TokenStream::new(asset).unwrap();
    let buf = ParseBuffer::new(asset, ts);
    match Expr::parse(&buf) {
        Ok(expr) => panic!("expected error for '{}', got '{}'", raw, expr),
        Err(e) => e,
    }
}

fn binary(expr: &Expr) -> (&Expr, BinOp, &Expr) {
    match expr {
        Expr::Binary(b) => (&b.lhs, b.op, &b.rhs),
        other => panic!("expected binary expression, found '{}'", other),
    }
}

#[test]
fn precedence() {
    // # Case 0
    let expr = parse("2+3*4");
    let (lhs, op, rhs) = binary(&expr);
    assert_eq!(op, BinOp::Add);
    assert_eq!(lhs.as_lit().map(|l| &l.kind), Some(&LitKind::Int(2)));
    assert_eq!(binary(rhs).1, BinOp::Mul);

    // # Case 1
    let expr = parse("2^3^2");
    let (lhs, op, rhs) = binary(&expr);
    assert_eq!(op, BinOp::Pow);
    assert_eq!(lhs.as_lit().map(|l| &l.kind), Some(&LitKind::Int(2)));
    assert_eq!(binary(rhs).1, BinOp::Pow);

    // # Case 2
    let expr = parse("1 - 2 - 3");
    let (lhs, op, _) = binary(&expr);
    assert_eq!(op, BinOp::Sub);
    assert_eq!(binary(lhs).1, BinOp::Sub);

    // # Case 3
    let expr = parse("a | b # c & d << 1");
    let (_, op, rhs) = binary(&expr);
    assert_eq!(op, BinOp::BitOr);
    let (_, op, rhs) = binary(rhs);
    assert_eq!(op, BinOp::BitXor);
    let (_, op, rhs) = binary(rhs);
    assert_eq!(op, BinOp::BitAnd);
    assert_eq!(binary(rhs).1, BinOp::Shl);

    // # Case 4
    let expr = parse("x > 1 && y <=> 2 || z match \"a*\"");
    let (lhs, op, rhs) = binary(&expr);
    assert_eq!(op, BinOp::Or);
    assert_eq!(binary(lhs).1, BinOp::And);
    assert_eq!(binary(rhs).1, BinOp::Match);

    // # Case 5
    let expr = parse("-2^2");
    let (lhs, op, _) = binary(&expr);
    assert_eq!(op, BinOp::Pow);
    assert!(matches!(lhs, Expr::Unary(UnaryExpr { op: UnaryOp::Neg, .. })));
}

#[test]
fn ternary() {
    // # Case 0
    let expr = parse("a?b:c?d:e");
    let Expr::Ternary(t) = &expr else {
        panic!("expected ternary")
    };
    assert_eq!(t.cond.to_string(), "a");
    assert_eq!(t.then.to_string(), "b");
    assert!(matches!(*t.otherwise, Expr::Ternary(_)));

    // # Case 1
    let expr = parse("x == 1 ? y + 1 : 2 * z");
    let Expr::Ternary(t) = &expr else {
        panic!("expected ternary")
    };
    assert_eq!(binary(&t.cond).1, BinOp::Eq);
    assert_eq!(binary(&t.then).1, BinOp::Add);
    assert_eq!(binary(&t.otherwise).1, BinOp::Mul);

    // # Case 2
    let expr = parse("(a ? b : c) ? d : e");
    let Expr::Ternary(t) = &expr else {
        panic!("expected ternary")
    };
    assert!(matches!(*t.cond, Expr::Ternary(_)));
    assert_eq!(expr.to_string(), "(a ? b : c) ? d : e");
}

#[test]
fn quantities() {
    let parts = |expr: &Expr| match expr.as_lit().map(|l| &l.kind) {
        Some(LitKind::Quantity(parts)) => parts
            .iter()
            .map(|p| (p.value.as_f64(), p.unit.clone()))
            .collect::<Vec<_>>(),
        _ => panic!("expected quantity, found '{}'", expr),
    };

    // # Case 0
    let expr = parse("3h20min");
    assert_eq!(
        parts(&expr),
        vec![(3.0, "h".to_string()), (20.0, "min".to_string())]
    );

    // # Case 1
    let expr = parse("1h 30min");
    assert_eq!(parts(&expr).len(), 2);
    assert_eq!(expr.to_string(), "1h30min");

    // # Case 2
    let expr = parse("5 s");
    assert_eq!(parts(&expr), vec![(5.0, "s".to_string())]);
    assert_eq!(expr.span().len(), 3);

    // # Case 3
    let expr = parse("inf s");
    let parts = parts(&expr);
    assert!(parts[0].0.is_infinite());
    assert_eq!(expr.to_string(), "inf s");

    // # Case 4
    let expr = parse("default_rate * 1.5Mbps");
    let (_, _, rhs) = binary(&expr);
    assert_eq!(
        rhs.as_lit().map(|l| &l.kind),
        Some(&LitKind::Quantity(vec![crate::ast::QuantityPart {
            value: Number::Float(1.5),
            unit: "Mbps".to_string()
        }]))
    );
}

#[test]
fn names_and_operators() {
    // # Case 0
    let expr = parse("parent.host[i+1].mtu");
    let name = expr.as_name().unwrap();
    assert_eq!(name.segments.len(), 3);
    assert!(matches!(name.segments[0], NameSegment::Parent(_)));
    assert!(matches!(
        &name.segments[1],
        NameSegment::Name { index: Some(_), .. }
    ));
    assert_eq!(expr.to_string(), "parent.host[i + 1].mtu");

    // # Case 1
    assert!(matches!(parse("exists(host)"), Expr::Exists(NameOp { name: Some(_), .. })));
    assert!(matches!(parse("sizeof(port)"), Expr::Sizeof(NameOp { name: Some(_), .. })));
    assert!(matches!(parse("index"), Expr::Index(NameOp { name: None, .. })));
    assert!(matches!(parse("typename"), Expr::Typename(NameOp { name: None, .. })));

    // # Case 2
    let expr = parse("host[0].typename");
    let Expr::Typename(op) = &expr else {
        panic!("expected typename operator")
    };
    assert_eq!(op.name.as_ref().map(|n| n.segments.len()), Some(1));
    assert_eq!(expr.to_string(), "host[0].typename");

    // # Case 3
    let expr = parse("this.index + 1");
    let (lhs, _, _) = binary(&expr);
    assert!(matches!(lhs, Expr::Index(NameOp { name: Some(_), .. })));
}

#[test]
fn calls() {
    // # Case 0
    let expr = parse("uniform(1s, 2s)");
    let Expr::Call(call) = &expr else {
        panic!("expected call")
    };
    assert!(call.receiver.is_none());
    assert_eq!(call.func.to_string(), "uniform");
    assert_eq!(call.args.len(), 2);

    // # Case 1
    let expr = parse("int(x)");
    assert!(matches!(
        &expr,
        Expr::Call(Call {
            func: FuncName::Cast(Keyword::Int, _),
            ..
        })
    ));

    // # Case 2
    let expr = parse("f(x).g(1, 2)");
    let Expr::Call(call) = &expr else {
        panic!("expected call")
    };
    assert!(matches!(call.receiver.as_deref(), Some(Expr::Call(_))));
    assert_eq!(expr.to_string(), "f(x).g(1, 2)");

    // # Case 3
    let expr = parse("(a + b).str()");
    assert_eq!(expr.to_string(), "(a + b).str()");

    // # Case 4
    let expr = parse("xmldoc(\"a.xml\", \"/root\")");
    assert_eq!(expr.to_string(), "xmldoc(\"a.xml\", \"/root\")");
}

#[test]
fn objects_and_arrays() {
    // # Case 0
    let expr = parse("{a: 1, \"b\": [1, 2,], -3: x, nan: 0}");
    let Expr::Object(obj) = &expr else {
        panic!("expected object")
    };
    assert!(obj.ty.is_empty());
    assert_eq!(obj.entries.len(), 4);
    assert!(matches!(obj.entries[2].key, ObjectKey::Lit { negative: true, .. }));
    assert_eq!(expr.to_string(), "{a: 1, \"b\": [1, 2], -3: x, nan: 0}");

    // # Case 1
    let expr = parse("inet::Foo {x: 1}");
    let Expr::Object(obj) = &expr else {
        panic!("expected object")
    };
    assert_eq!(obj.ty.len(), 2);
    assert_eq!(expr.to_string(), "inet::Foo {x: 1}");

    // # Case 2
    let expr = parse("Foo {}");
    assert!(matches!(&expr, Expr::Object(ObjectLit { ty, .. }) if ty.len() == 1));

    // # Case 3
    let expr = parse("[]");
    assert!(matches!(&expr, Expr::Array(ArrayLit { items, .. }) if items.is_empty()));

    // # Case 4
    let err = parse_err("a::b::c::d::e {}");
    assert_eq!(err.kind, ErrorKind::UnexpectedToken);
}

#[test]
fn restrictions() {
    // # Case 0
    let (expr, state) = parse_restricted("a > b", Restrictions::LIKE_EXPR).unwrap();
    assert_eq!(expr.to_string(), "a");
    assert_eq!(state, 1);

    // # Case 1
    let (expr, state) = parse_restricted("n > 0 { }", Restrictions::CONDITION).unwrap();
    assert_eq!(binary(&expr).1, BinOp::Gt);
    assert_eq!(state, 3);

    // # Case 2
    let (expr, _) = parse_restricted("n { }", Restrictions::NONE).unwrap();
    assert!(matches!(expr, Expr::Object(_)));
}

#[test]
fn minimal_parens() {
    let cases = [
        ("(1+2)*3", "(1 + 2) * 3"),
        ("1 - (2 - 3)", "1 - (2 - 3)"),
        ("(1 - 2) - 3", "1 - 2 - 3"),
        ("(2^3)^2", "(2 ^ 3) ^ 2"),
        ("2^(3^2)", "2 ^ 3 ^ 2"),
        ("-(a + b)", "-(a + b)"),
        ("!(a && b) || c", "!(a && b) || c"),
        ("a ? b : (c ? d : e)", "a ? b : c ? d : e"),
        ("(x > 0 ? x : -x) * 2", "(x > 0 ? x : -x) * 2"),
        ("- -1", "--1"),
        ("~mask & 0xff", "~mask & 255"),
    ];

    for (raw, printed) in cases {
        let expr = parse(raw);
        assert_eq!(expr.to_string(), printed, "printing '{}'", raw);
        assert_eq!(parse(printed).to_string(), printed, "reparsing '{}'", printed);
    }
}

#[test]
fn errors() {
    // # Case 0
    let err = parse_err("1 +");
    assert_eq!(err.kind, ErrorKind::UnexpectedEOF);
    assert_eq!(err.message, "expected expression, found end of file");

    // # Case 1
    let err = parse_err("(1 2)");
    assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    assert_eq!(err.message, "expected ')', found literal '2'");

    // # Case 2
    let err = parse_err("a ? b");
    assert_eq!(err.kind, ErrorKind::UnexpectedEOF);

    // # Case 3
    let err = parse_err("module");
    assert_eq!(err.message, "expected expression, found keyword 'module'");
}
