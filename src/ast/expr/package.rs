use crate::{
    ast::{parse::*, CommentBlock, DottedName, Ident, Keyword, Semi, TokenKind},
    error::{ErrorKind, Result},
    Span,
};
use serde::Serialize;
use std::fmt;

///
/// `package inet.node;`
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub name: DottedName,
    pub doc: Option<CommentBlock>,
    pub span: Span,
}

///
/// `import inet.node.*;`
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Import {
    pub spec: ImportSpec,
    pub doc: Option<CommentBlock>,
    pub span: Span,
}

///
/// The dotted, possibly wildcarded name of an import.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpec {
    pub segments: Vec<ImportSegment>,
    pub span: Span,
}

/// One dot-separated segment, e.g. `*Router` in `inet.*Router`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSegment {
    pub fragments: Vec<ImportFragment>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ImportFragment {
    Name(Ident),
    /// `*`, matching within one segment.
    Star(Span),
    /// `**`, matching across segments.
    StarStar(Span),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Wildcard {
    None,
    SingleLevel,
    Recursive,
}

impl ImportSpec {
    pub fn wildcard(&self) -> Wildcard {
        let fragments = self.segments.iter().flat_map(|s| s.fragments.iter());
        let mut wildcard = Wildcard::None;
        for fragment in fragments {
            match fragment {
                ImportFragment::StarStar(_) => return Wildcard::Recursive,
                ImportFragment::Star(_) => wildcard = Wildcard::SingleLevel,
                ImportFragment::Name(_) => {}
            }
        }
        wildcard
    }
}

impl Parse for Package {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let Some(start) = input.eat_keyword(Keyword::Package) else {
            return Err(input.expected("keyword 'package'"));
        };
        let name = DottedName::parse(input)?;
        let semi = Semi::parse(input)?;
        Ok(Package {
            name,
            doc,
            span: Span::fromto(start, semi.span),
        })
    }
}

impl Parse for Import {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let Some(start) = input.eat_keyword(Keyword::Import) else {
            return Err(input.expected("keyword 'import'"));
        };
        let spec = ImportSpec::parse(input)?;
        let semi = Semi::parse(input)?;
        Ok(Import {
            spec,
            doc,
            span: Span::fromto(start, semi.span),
        })
    }
}

impl Parse for ImportSpec {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut segments = vec![ImportSegment::parse(input)?];
        while input.eat(&TokenKind::Dot).is_some() {
            segments.push(ImportSegment::parse(input)?);
        }

        let span = Span::fromto(segments[0].span, segments[segments.len() - 1].span);
        Ok(ImportSpec { segments, span })
    }
}

impl Parse for ImportSegment {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let start = input.peek_span();
        let mut fragments = vec![ImportFragment::parse(input)?];
        while input.is_joint()
            && matches!(
                input.peek_kind(),
                Some(TokenKind::Ident(_) | TokenKind::Star | TokenKind::StarStar)
            )
        {
            fragments.push(ImportFragment::parse(input)?);
        }

        Ok(ImportSegment {
            fragments,
            span: Span::fromto(start, input.prev_span()),
        })
    }
}

impl Parse for ImportFragment {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if let Some(span) = input.eat(&TokenKind::Star) {
            return Ok(ImportFragment::Star(span));
        }
        if let Some(span) = input.eat(&TokenKind::StarStar) {
            return Ok(ImportFragment::StarStar(span));
        }
        match Ident::parse(input) {
            Ok(ident) => Ok(ImportFragment::Name(ident)),
            Err(mut e) => {
                if e.kind == ErrorKind::UnexpectedToken || e.kind == ErrorKind::UnexpectedEOF {
                    e.message = e.message.replacen("identifier", "import name", 1);
                }
                Err(e)
            }
        }
    }
}

impl Spanned for Package {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for Import {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ImportSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i != 0 {
                write!(f, ".")?;
            }
            for fragment in &segment.fragments {
                match fragment {
                    ImportFragment::Name(ident) => write!(f, "{}", ident)?,
                    ImportFragment::Star(_) => write!(f, "*")?,
                    ImportFragment::StarStar(_) => write!(f, "**")?,
                }
            }
        }
        Ok(())
    }
}
