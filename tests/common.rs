#![allow(dead_code)]

use ned::{ast::*, ParseOptions, Parsed, SourceMap};

#[macro_export]
macro_rules! check_err {
    ($e:expr => $code:expr, $msg:literal) => {
        let e = $e.unwrap();
        assert_eq!(e.kind, $code);
        assert!(e.asset().is_some());
        assert_eq!(e.message(), $msg);
        assert!(e.hints.is_empty())
    };
    ($e:expr => $code:expr, $msg:literal, $hint:expr) => {
        let e = $e.unwrap();
        assert_eq!(e.kind, $code);
        assert!(e.asset().is_some());
        assert_eq!(e.message(), $msg);
        assert_eq!(e.hints.first(), Some(&$hint));
    };
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/ned/{}", name)).unwrap()
}

pub fn parse_fixture(name: &str, opts: &ParseOptions) -> Parsed {
    let mut smap = SourceMap::new();
    let asset = smap.load_file(format!("tests/ned/{}", name).as_str()).unwrap();
    ned::parse(asset, opts).unwrap()
}

pub fn decl<'a>(file: &'a NedFile, name: &str) -> &'a TypeDecl {
    file.find_type(name)
        .unwrap_or_else(|| panic!("no declaration named '{}'", name))
}

pub fn params(decl: &TypeDecl) -> Vec<&Parameter> {
    decl.body
        .parameters()
        .filter_map(|item| match item {
            ParamItem::Param(param) => Some(param),
            _ => None,
        })
        .collect()
}

pub fn connections<'a>(items: impl IntoIterator<Item = &'a ConnectionItem>) -> Vec<&'a Connection> {
    let mut result = Vec::new();
    for item in items {
        match item {
            ConnectionItem::Connection(conn) => result.push(conn),
            ConnectionItem::Group(group) => result.extend(connections(&group.items)),
            ConnectionItem::Error(_) => {}
        }
    }
    result
}

/// The value of the parameter `name` in a one-declaration source.
pub fn value_of(source: &str, name: &str) -> Expr {
    let file = ned::parse_str("raw:value", source).unwrap();
    let decl = file.types().next().unwrap();
    let param = params(decl)
        .into_iter()
        .find(|p| p.name().map(|n| n.raw.as_str()) == Some(name))
        .unwrap();
    match &param.value {
        Some(ParamValue::Expr(expr)) => expr.clone(),
        other => panic!("expected expression value, found {:?}", other),
    }
}
