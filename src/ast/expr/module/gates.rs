use crate::{
    ast::{
        parse::*, parse_inline_properties, Comment, CommentBlock, Delimited, Delimiter, Expr,
        Ident, Keyword, Property, Semi, TokenKind, TokenTree,
    },
    error::Result,
    Span,
};
use serde::Serialize;
use std::fmt;

///
/// A gate declaration, e.g. `inout ethg[] @labels(EtherFrame);`. Gates without
/// a direction redeclare an inherited gate.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gate {
    pub direction: Option<GateDirection>,
    pub name: Ident,
    pub size: Option<GateSize>,
    pub properties: Vec<Property>,
    pub doc: Option<CommentBlock>,
    pub trailing: Option<Comment>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GateDirection {
    Input,
    Output,
    Inout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GateSize {
    /// `[]`
    Unsized(Span),
    Fixed(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GateItem {
    Gate(Gate),
    Error(ErrorNode),
}

impl Gate {
    pub fn is_vector(&self) -> bool {
        self.size.is_some()
    }
}

impl GateDirection {
    pub fn from_keyword(kw: Keyword) -> Option<GateDirection> {
        match kw {
            Keyword::Input => Some(GateDirection::Input),
            Keyword::Output => Some(GateDirection::Output),
            Keyword::Inout => Some(GateDirection::Inout),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateDirection::Input => "input",
            GateDirection::Output => "output",
            GateDirection::Inout => "inout",
        }
    }
}

impl Parse for Gate {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let start = input.peek_span();

        let direction = match input.peek_kind() {
            Some(TokenKind::Keyword(kw)) => GateDirection::from_keyword(*kw),
            _ => None,
        };
        if direction.is_some() {
            input.ts.bump();
        }

        let name = Ident::parse(input)?;
        let size = match input.ts.peek() {
            Some(TokenTree::Delimited(span, Delimiter::Bracket, inner)) if inner.is_empty() => {
                let span = Span::fromto(span.open, span.close);
                input.ts.bump();
                Some(GateSize::Unsized(span))
            }
            Some(TokenTree::Delimited(_, Delimiter::Bracket, _)) => {
                let delim = Delimited::<Expr>::parse_from(Delimiter::Bracket, input)?;
                Some(GateSize::Fixed(delim.inner))
            }
            _ => None,
        };

        let properties = parse_inline_properties(input)?;
        let semi = Semi::parse(input)?;
        let trailing = input.trailing();

        Ok(Gate {
            direction,
            name,
            size,
            properties,
            doc,
            trailing,
            span: Span::fromto(start, semi.span),
        })
    }
}

impl Parse for GateItem {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        Gate::parse(input).map(GateItem::Gate)
    }
}

impl Spanned for Gate {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for GateItem {
    fn span(&self) -> Span {
        match self {
            GateItem::Gate(gate) => gate.span,
            GateItem::Error(node) => node.span,
        }
    }
}

impl fmt::Display for GateDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::TokenStream, error::ErrorKind, SourceMap};

    #[test]
    fn simple_gates() {
        let mut smap = SourceMap::new();

        // # Case 0
        let asset = smap.load_raw(
            "raw:case0",
            "input in; output out[]; inout ethg[n + 1] @labels(EtherFrame);",
        );
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let gates = (0..3)
            .map(|_| Gate::parse(&buf).unwrap())
            .map(|g| (g.direction, g.name.raw, g.size.is_some(), g.properties.len()))
            .collect::<Vec<_>>();

        assert_eq!(
            gates,
            vec![
                (Some(GateDirection::Input), "in".to_string(), false, 0),
                (Some(GateDirection::Output), "out".to_string(), true, 0),
                (Some(GateDirection::Inout), "ethg".to_string(), true, 1),
            ]
        );

        // # Case 1
        let asset = smap.load_raw("raw:case1", "out[] @loose; // redeclared");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let gate = Gate::parse(&buf).unwrap();
        assert_eq!(gate.direction, None);
        assert!(matches!(gate.size, Some(GateSize::Unsized(_))));
        assert_eq!(
            gate.trailing.map(|c| c.text),
            Some("// redeclared".to_string())
        );
    }

    #[test]
    fn invalid_gates() {
        let mut smap = SourceMap::new();

        // # Case 0
        let asset = smap.load_raw("raw:case0", "input;");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let err = Gate::parse(&buf).unwrap_err();
        assert_eq!(err.message, "expected identifier, found ';'");

        // # Case 1
        let asset = smap.load_raw("raw:case1", "input in[] out;");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let err = Gate::parse(&buf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.message, "expected ';', found identifier 'out'");
    }
}
