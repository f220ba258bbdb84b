use crate::{
    ast::{parse::*, Ident, TokenKind},
    error::Result,
    Span,
};
use serde::Serialize;
use std::fmt;

///
/// A dotted name such as `inet.node.Router`.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DottedName {
    pub segments: Vec<Ident>,
    pub span: Span,
}

impl DottedName {
    pub fn last(&self) -> &Ident {
        &self.segments[self.segments.len() - 1]
    }

    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }
}

impl Parse for DottedName {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let first = Ident::parse(input)?;
        let mut span = first.span;
        let mut segments = vec![first];

        while input.peek_is(&TokenKind::Dot)
            && matches!(input.peek_nth_kind(1), Some(TokenKind::Ident(_)))
        {
            input.ts.bump();
            let ident = Ident::parse(input)?;
            span = Span::fromto(span, ident.span);
            segments.push(ident);
        }

        Ok(DottedName { segments, span })
    }
}

impl Spanned for DottedName {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for DottedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i != 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::TokenStream, SourceMap};

    #[test]
    fn dotted_names() {
        let mut smap = SourceMap::new();

        // # Case 0
        let asset = smap.load_raw("raw:case0", "inet.node.Router");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let name = DottedName::parse(&buf).unwrap();
        assert_eq!(name.segments.len(), 3);
        assert_eq!(name.last(), &"Router");
        assert_eq!(name.to_string(), "inet.node.Router");
        assert_eq!(name.span.len(), 16);

        // # Case 1
        let asset = smap.load_raw("raw:case1", "Router.*");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let name = DottedName::parse(&buf).unwrap();
        assert!(name.is_simple());
        assert!(buf.peek_is(&TokenKind::Dot));
    }
}
