use super::*;

const FILE_A: &str = "0123456789"; // 10 bytes, 1 line
const FILE_B: &str = "A\nBB\nCCC\nDDDD\nEEE\nFF\nG"; // 22 bytes, 7 lines
const FILE_C: &str = "module A {\nB\n}\n"; // 15 bytes, 4 lines

#[test]
fn source_map_loading() {
    let mut map = SourceMap::new();

    let a = map.load_raw(AssetIdentifier::raw("a"), FILE_A);
    assert_eq!(a.alias(), "a");
    assert_eq!(a.source(), FILE_A);
    assert_eq!(a.len(), 10);
    assert_eq!(a.len_lines(), 1);

    let b = map.load_raw("raw:b", FILE_B);
    assert_eq!(b.alias(), "b");
    assert_eq!(b.source(), FILE_B);
    assert_eq!(b.len_lines(), 7);

    let c = map.load_raw(AssetIdentifier::raw("c"), FILE_C);
    assert_eq!(c.source(), FILE_C);
    assert_eq!(c.len_lines(), 4);

    assert_eq!(map.asset("b").map(|v| v.source()), Some(FILE_B));
    assert!(map.asset("d").is_none());
    assert_eq!(map.assets().count(), 3);
}

#[test]
fn spans_are_asset_relative() {
    let mut map = SourceMap::new();
    map.load_raw("raw:a", FILE_A);
    let b = map.load_raw("raw:b", FILE_B);

    // "CCC" starts at byte 5, line 3
    let span = b.span(5, 3);
    assert_eq!(span, Span::new(5, 3, 3, 1));
    assert_eq!(b.slice_for(span), "CCC");

    // second 'D' in line 4
    let span = b.span(10, 1);
    assert_eq!(span.line(), 4);
    assert_eq!(span.column(), 2);

    assert_eq!(b.end_span(), Span::new(22, 0, 7, 2));
}

#[test]
fn line_texts() {
    let mut map = SourceMap::new();
    let c = map.load_raw("raw:c", FILE_C);

    assert_eq!(c.line_text(1), "module A {");
    assert_eq!(c.line_text(2), "B");
    assert_eq!(c.line_text(3), "}");
    assert_eq!(c.line_text(4), "");
    assert_eq!(c.line_text(5), "");
}

#[test]
fn span_composition() {
    let lhs = Span::new(4, 2, 1, 5);
    let rhs = Span::new(10, 3, 2, 1);

    let joined = Span::fromto(lhs, rhs);
    assert_eq!(joined, Span::new(4, 9, 1, 5));
    assert_eq!(Span::fromto(lhs, lhs), lhs);

    assert_eq!(lhs.after(), Span::new(6, 0, 1, 7));
    assert!(lhs.is_adjacent_to(Span::new(6, 1, 1, 7)));
    assert!(!lhs.is_adjacent_to(rhs));
}
