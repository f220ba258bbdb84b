use crate::{
    ast::{
        parse::*, Colon, ConnectionItem, Delimited, Delimiter, GateItem, Keyword, ParamItem,
        SubmoduleItem, TokenKind, TypeItem,
    },
    error::Result,
    Span,
};
use serde::Serialize;

///
/// The braced body of a declaration, submodule or channel spec. Sections
/// may repeat and appear in any order.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub sections: Vec<Section>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Section {
    Parameters(ParametersSection),
    Gates(GatesSection),
    Types(TypesSection),
    Submodules(SubmodulesSection),
    Connections(ConnectionsSection),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParametersSection {
    /// The `parameters` keyword, absent for the implicit leading section.
    pub keyword: Option<Span>,
    pub items: Vec<ParamItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatesSection {
    pub keyword: Span,
    pub items: Vec<GateItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypesSection {
    pub keyword: Span,
    pub items: Vec<TypeItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmodulesSection {
    pub keyword: Span,
    pub items: Vec<SubmoduleItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionsSection {
    pub keyword: Span,
    pub allow_unconnected: bool,
    pub items: Vec<ConnectionItem>,
    pub span: Span,
}

/// The kind of a body section, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionKind {
    Parameters,
    Gates,
    Types,
    Submodules,
    Connections,
}

impl SectionKind {
    pub fn from_token(kind: &TokenKind) -> Option<SectionKind> {
        match kind {
            TokenKind::Keyword(Keyword::Parameters) => Some(SectionKind::Parameters),
            TokenKind::Keyword(Keyword::Gates) => Some(SectionKind::Gates),
            TokenKind::Keyword(Keyword::Types) => Some(SectionKind::Types),
            TokenKind::Keyword(Keyword::Submodules) => Some(SectionKind::Submodules),
            TokenKind::Keyword(Keyword::Connections) => Some(SectionKind::Connections),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Parameters => "parameters",
            SectionKind::Gates => "gates",
            SectionKind::Types => "types",
            SectionKind::Submodules => "submodules",
            SectionKind::Connections => "connections",
        }
    }
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Parameters(_) => SectionKind::Parameters,
            Section::Gates(_) => SectionKind::Gates,
            Section::Types(_) => SectionKind::Types,
            Section::Submodules(_) => SectionKind::Submodules,
            Section::Connections(_) => SectionKind::Connections,
        }
    }

    /// The span of the section keyword, or of the whole section if implicit.
    pub fn keyword_span(&self) -> Span {
        match self {
            Section::Parameters(s) => s.keyword.unwrap_or(s.span),
            Section::Gates(s) => s.keyword,
            Section::Types(s) => s.keyword,
            Section::Submodules(s) => s.keyword,
            Section::Connections(s) => s.keyword,
        }
    }
}

impl Spanned for Section {
    fn span(&self) -> Span {
        match self {
            Section::Parameters(s) => s.span,
            Section::Gates(s) => s.span,
            Section::Types(s) => s.span,
            Section::Submodules(s) => s.span,
            Section::Connections(s) => s.span,
        }
    }
}

impl Spanned for Body {
    fn span(&self) -> Span {
        self.span
    }
}

impl Body {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn parameters(&self) -> impl Iterator<Item = &ParamItem> {
        self.sections.iter().flat_map(|s| match s {
            Section::Parameters(s) => s.items.as_slice(),
            _ => &[],
        })
    }

    pub fn gates(&self) -> impl Iterator<Item = &GateItem> {
        self.sections.iter().flat_map(|s| match s {
            Section::Gates(s) => s.items.as_slice(),
            _ => &[],
        })
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeItem> {
        self.sections.iter().flat_map(|s| match s {
            Section::Types(s) => s.items.as_slice(),
            _ => &[],
        })
    }

    pub fn submodules(&self) -> impl Iterator<Item = &SubmoduleItem> {
        self.sections.iter().flat_map(|s| match s {
            Section::Submodules(s) => s.items.as_slice(),
            _ => &[],
        })
    }

    pub fn connections(&self) -> impl Iterator<Item = &ConnectionItem> {
        self.sections.iter().flat_map(|s| match s {
            Section::Connections(s) => s.items.as_slice(),
            _ => &[],
        })
    }

    /// Whether any connections section carries `allowunconnected`.
    pub fn allows_unconnected(&self) -> bool {
        self.sections
            .iter()
            .any(|s| matches!(s, Section::Connections(c) if c.allow_unconnected))
    }
}

impl Parse for Body {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let delim = Delimited::parse_with(Delimiter::Brace, input, parse_sections)?;
        Ok(Body {
            span: delim.span(),
            sections: delim.inner,
        })
    }
}

fn at_section_keyword(input: ParseStream<'_>) -> bool {
    matches!(input.peek_kind(), Some(TokenKind::Keyword(kw)) if kw.is_section())
}

fn parse_sections(input: ParseStream<'_>) -> Result<Vec<Section>> {
    let mut sections = Vec::new();

    if !input.ts.is_empty() && !at_section_keyword(input) {
        let start = input.peek_span();
        let items = parse_items(input, SyncPoint::Body, ParamItem::Error)?;
        sections.push(Section::Parameters(ParametersSection {
            keyword: None,
            items,
            span: Span::fromto(start, input.prev_span()),
        }));
    }

    while !input.ts.is_empty() {
        let Some(kind) = input.peek_kind().and_then(SectionKind::from_token) else {
            return Err(input.expected("section keyword"));
        };
        let keyword = input.peek_span();
        input.ts.bump();

        let allow_unconnected = kind == SectionKind::Connections
            && input.eat_keyword(Keyword::AllowUnconnected).is_some();
        Colon::parse(input)?;

        let section = match kind {
            SectionKind::Parameters => Section::Parameters(ParametersSection {
                keyword: Some(keyword),
                items: parse_items(input, SyncPoint::Body, ParamItem::Error)?,
                span: Span::fromto(keyword, input.prev_span()),
            }),
            SectionKind::Gates => Section::Gates(GatesSection {
                keyword,
                items: parse_items(input, SyncPoint::Body, GateItem::Error)?,
                span: Span::fromto(keyword, input.prev_span()),
            }),
            SectionKind::Types => Section::Types(TypesSection {
                keyword,
                items: parse_items(input, SyncPoint::Types, TypeItem::Error)?,
                span: Span::fromto(keyword, input.prev_span()),
            }),
            SectionKind::Submodules => Section::Submodules(SubmodulesSection {
                keyword,
                items: parse_items(input, SyncPoint::Body, SubmoduleItem::Error)?,
                span: Span::fromto(keyword, input.prev_span()),
            }),
            SectionKind::Connections => Section::Connections(ConnectionsSection {
                keyword,
                allow_unconnected,
                items: parse_items(input, SyncPoint::Body, ConnectionItem::Error)?,
                span: Span::fromto(keyword, input.prev_span()),
            }),
        };
        sections.push(section);
    }

    Ok(sections)
}

///
/// Parses items up to the next section keyword or the end of the stream.
/// Items that fail to parse are replaced by an error node in tolerant mode.
///
pub(crate) fn parse_items<T: Parse>(
    input: ParseStream<'_>,
    sync: SyncPoint,
    on_error: fn(ErrorNode) -> T,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    while !input.ts.is_empty() && !at_section_keyword(input) {
        let state = input.ts.state();
        match T::parse(input) {
            Ok(item) => items.push(item),
            Err(e) => {
                let node = input.recover(state, e, sync)?;
                items.push(on_error(node));
            }
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{ParsingErrorContext, TokenStream},
        error::ErrorKind,
        SourceMap,
    };
    use std::rc::Rc;

    #[test]
    fn merged_sections() {
        let mut smap = SourceMap::new();

        // # Case 0
        let asset = smap.load_raw(
            "raw:case0",
            "{ a = 1; gates: input in; parameters: b = 2; gates: output out; connections allowunconnected: }",
        );
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let body = Body::parse(&buf).unwrap();
        let kinds = body.sections.iter().map(|s| s.kind()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Parameters,
                SectionKind::Gates,
                SectionKind::Parameters,
                SectionKind::Gates,
                SectionKind::Connections,
            ]
        );
        assert_eq!(body.parameters().count(), 2);
        assert_eq!(body.gates().count(), 2);
        assert_eq!(body.connections().count(), 0);
        assert!(body.allows_unconnected());
        assert!(matches!(
            &body.sections[0],
            Section::Parameters(ParametersSection { keyword: None, .. })
        ));

        // # Case 1
        let asset = smap.load_raw("raw:case1", "{}");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let body = Body::parse(&buf).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn invalid_sections() {
        let mut smap = SourceMap::new();

        // # Case 0
        let asset = smap.load_raw("raw:case0", "{ gates in; }");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let err = Body::parse(&buf).unwrap_err();
        assert_eq!(err.message, "expected ':', found identifier 'in'");

        // # Case 1
        let asset = smap.load_raw("raw:case1", "(a = 1;)");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let err = Body::parse(&buf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedDelim);
    }

    #[test]
    fn item_recovery() {
        let mut smap = SourceMap::new();
        let ectx = Rc::new(ParsingErrorContext::tolerant());

        let asset = smap.load_raw(
            "raw:case0",
            "{ parameters: int a; int 5; int b; gates: input in; }",
        );
        let ts = TokenStream::with_context(asset, &ectx).unwrap();
        let buf = ParseBuffer::with_context(asset, ts, ectx.clone());

        let body = Body::parse(&buf).unwrap();
        let items = body.parameters().collect::<Vec<_>>();
        assert_eq!(items.len(), 3);
        assert!(matches!(items[1], ParamItem::Error(_)));
        assert_eq!(body.gates().count(), 1);

        let diagnostics = ectx.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "expected identifier, found literal '5'");
    }
}
