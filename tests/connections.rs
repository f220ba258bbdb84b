use ned::ast::*;
use ned::*;

#[macro_use]
mod common;
use common::*;

fn module_path(gate: &GateRef) -> Vec<&str> {
    gate.module.iter().map(|s| s.name.raw.as_str()).collect()
}

#[test]
fn connections_baseline() {
    let file = parse_fixture("router.ned", &ParseOptions::default()).file;
    let router = decl(&file, "Router");

    let groups = router
        .body
        .connections()
        .filter_map(|item| match item {
            ConnectionItem::Group(group) => Some(group),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(groups.len(), 1);
    match &groups[0].header {
        GroupHeader::For(loops) => {
            assert_eq!(loops.len(), 1);
            assert_eq!(loops[0].var.raw, "i");
            assert_eq!(loops[0].to.to_string(), "numPorts - 1");
        }
        other => panic!("expected loop header, found '{}'", other),
    }

    let conns = connections(router.body.connections());
    assert_eq!(conns.len(), 2);

    // # Case 0
    assert_eq!(conns[0].arrow, Arrow::Right);
    assert!(conns[0].lhs.module.is_empty());
    assert_eq!(conns[0].lhs.gate.name.raw, "port");
    assert_eq!(conns[0].lhs.gate.subgate, Some(Subgate::In));
    assert!(conns[0].lhs.gate.subgate_index.is_some());
    assert_eq!(module_path(&conns[0].rhs), vec!["queue"]);
    assert!(conns[0].rhs.gate.plusplus);

    // # Case 1
    let channel = conns[1].channel.as_ref().unwrap();
    assert!(channel.name.is_none());
    assert_eq!(channel.ty.as_ref().map(|t| t.to_string()), Some("Backplane".to_string()));
    assert_eq!(conns[1].to_string(), "queue[i].out --> Backplane --> port$o[i];");
}

#[test]
fn connections_channels_and_modifiers() {
    let file = parse_fixture("router.ned", &ParseOptions::default()).file;
    let mesh = decl(&file, "Mesh");
    assert!(mesh.body.allows_unconnected());

    let conns = connections(mesh.body.connections());
    assert_eq!(conns.len(), 2);
    assert!(conns.iter().all(|c| c.is_bidirectional()));

    let last = conns[1];
    let channel = last.channel.as_ref().unwrap();
    assert_eq!(channel.name.as_ref().map(|n| n.raw.as_str()), Some("link"));
    assert!(channel.body.is_some());
    assert_eq!(last.modifiers.len(), 1);
    assert!(matches!(last.modifiers[0], Modifier::Condition(_)));
    assert_eq!(
        last.to_string(),
        "router[0].port++ <--> link: Link { delay = 1ms; } <--> router[n - 1].port++ if n > 2;"
    );
}

#[test]
fn connections_gate_paths() {
    let file = ned::parse_str(
        "raw:paths",
        "module M { connections: a.b.c.in --> out; x[1].y$o[2] <-- z.g++; }",
    )
    .unwrap();
    let decl = file.types().next().unwrap();
    let conns = connections(decl.body.connections());

    // # Case 0
    assert_eq!(module_path(&conns[0].lhs), vec!["a", "b", "c"]);
    assert_eq!(conns[0].lhs.gate.name.raw, "in");
    assert!(conns[0].rhs.module.is_empty());

    // # Case 1
    assert_eq!(conns[1].arrow, Arrow::Left);
    assert_eq!(conns[1].source().to_string(), "z.g++");
    assert_eq!(conns[1].destination().gate.subgate, Some(Subgate::Out));
    assert_eq!(module_path(conns[1].destination()), vec!["x"]);
}

#[test]
fn connections_invalid() {
    // # Case 0
    let e = ned::parse_str(
        "raw:case0",
        "module M { connections: a.o --> C <-- b.i; }",
    );
    check_err!(e.as_ref().err() =>
        ErrorKind::MismatchedArrows,
        "mismatched arrows '-->' and '<--'"
    );

    // # Case 1
    let parsed = ned::parse_str_tolerant(
        "raw:case1",
        "module M { connections: a.o --> b.i; a.o -> b.i; c.o --> d.i; }",
    );
    let decl = parsed.file.types().next().unwrap();
    assert_eq!(connections(decl.body.connections()).len(), 2);
    assert_eq!(parsed.diagnostics.len(), 1);
}
