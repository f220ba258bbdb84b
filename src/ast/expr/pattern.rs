use crate::{
    ast::{parse::*, Delimited, Delimiter, Ident, Keyword, Lit, LitKind, TokenKind},
    error::{Error, ErrorKind, Result},
    Span,
};
use serde::Serialize;
use std::fmt;

///
/// A parameter assignment pattern such as `**.host[0..3].app*.typename`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
    /// Whether the pattern ends in `.typename`.
    pub typename: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PatternElement {
    /// A name made of adjacent fragments, optionally indexed.
    Name {
        fragments: Vec<NameFragment>,
        index: Option<PatternIndex>,
        span: Span,
    },
    /// `**`, matching any number of path segments.
    AnyPath(Span),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NameFragment {
    Ident(Ident),
    /// The `channel` keyword.
    Channel(Span),
    /// `*`
    Wildcard(Span),
    /// `$`, joining a gate name and its subgate.
    Dollar(Span),
    /// `{1..3}`
    Range(PatternIndex, Span),
}

///
/// The numeric selector of a pattern element. Open ends are `None`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternIndex {
    /// `[*]`
    Any,
    Single(i64),
    Range { from: Option<i64>, to: Option<i64> },
}

impl Pattern {
    pub fn is_typename_only(&self) -> bool {
        self.elements.is_empty() && self.typename
    }
}

impl Spanned for Pattern {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for PatternElement {
    fn span(&self) -> Span {
        match self {
            PatternElement::Name { span, .. } => *span,
            PatternElement::AnyPath(span) => *span,
        }
    }
}

impl Parse for Pattern {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let start = input.peek_span();
        if input.eat_keyword(Keyword::Typename).is_some() {
            return Ok(Pattern {
                elements: Vec::new(),
                typename: true,
                span: start,
            });
        }

        let mut elements = vec![parse_element(input)?];
        let mut typename = false;
        while input.eat(&TokenKind::Dot).is_some() {
            if input.eat_keyword(Keyword::Typename).is_some() {
                typename = true;
                break;
            }
            elements.push(parse_element(input)?);
        }

        Ok(Pattern {
            elements,
            typename,
            span: Span::fromto(start, input.prev_span()),
        })
    }
}

fn parse_element(input: ParseStream<'_>) -> Result<PatternElement> {
    if let Some(span) = input.eat(&TokenKind::StarStar) {
        return Ok(PatternElement::AnyPath(span));
    }

    let start = input.peek_span();
    let mut fragments = vec![parse_fragment(input)?];
    while input.is_joint() && starts_fragment(input) {
        fragments.push(parse_fragment(input)?);
    }

    let index = if input.peek_delim() == Some(Delimiter::Bracket) {
        let delim = Delimited::parse_with(Delimiter::Bracket, input, |input| {
            if input.eat(&TokenKind::Star).is_some() {
                Ok(PatternIndex::Any)
            } else {
                parse_index(input)
            }
        })?;
        Some(delim.inner)
    } else {
        None
    };

    Ok(PatternElement::Name {
        fragments,
        index,
        span: Span::fromto(start, input.prev_span()),
    })
}

fn starts_fragment(input: ParseStream<'_>) -> bool {
    match input.peek_kind() {
        Some(TokenKind::Ident(_))
        | Some(TokenKind::Keyword(Keyword::Channel))
        | Some(TokenKind::Star)
        | Some(TokenKind::Dollar) => true,
        Some(_) => false,
        None => input.peek_delim() == Some(Delimiter::Brace),
    }
}

fn parse_fragment(input: ParseStream<'_>) -> Result<NameFragment> {
    let span = input.peek_span();
    match input.peek_kind() {
        Some(TokenKind::Ident(_)) => Ident::parse(input).map(NameFragment::Ident),
        Some(TokenKind::Keyword(Keyword::Channel)) => {
            input.ts.bump();
            Ok(NameFragment::Channel(span))
        }
        Some(TokenKind::Star) => {
            input.ts.bump();
            Ok(NameFragment::Wildcard(span))
        }
        Some(TokenKind::Dollar) => {
            input.ts.bump();
            Ok(NameFragment::Dollar(span))
        }
        None if input.peek_delim() == Some(Delimiter::Brace) => {
            let delim = Delimited::parse_with(Delimiter::Brace, input, parse_index)?;
            Ok(NameFragment::Range(delim.inner, delim.span()))
        }
        _ => Err(input.expected("pattern")),
    }
}

/// Parses `n`, `n..m`, `n..` or `..m`.
fn parse_index(input: ParseStream<'_>) -> Result<PatternIndex> {
    if input.eat(&TokenKind::DotDot).is_some() {
        let to = parse_int(input)?;
        return Ok(PatternIndex::Range {
            from: None,
            to: Some(to),
        });
    }

    let from = parse_int(input)?;
    if input.eat(&TokenKind::DotDot).is_none() {
        return Ok(PatternIndex::Single(from));
    }

    let to = if input.ts.is_empty() {
        None
    } else {
        Some(parse_int(input)?)
    };
    Ok(PatternIndex::Range {
        from: Some(from),
        to,
    })
}

fn parse_int(input: ParseStream<'_>) -> Result<i64> {
    match input.peek_kind() {
        Some(TokenKind::Literal(Lit {
            kind: LitKind::Int(v),
            ..
        })) => {
            let v = *v;
            input.ts.bump();
            Ok(v)
        }
        Some(TokenKind::Literal(lit)) => Err(Error::new(
            ErrorKind::UnexpectedToken,
            format!("expected integer index, found literal '{}'", lit),
            lit.span,
        )),
        _ => Err(input.expected("integer index")),
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i != 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", element)?;
        }
        if self.typename {
            if !self.elements.is_empty() {
                write!(f, ".")?;
            }
            write!(f, "typename")?;
        }
        Ok(())
    }
}

impl fmt::Display for PatternElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternElement::AnyPath(_) => write!(f, "**"),
            PatternElement::Name {
                fragments, index, ..
            } => {
                for fragment in fragments {
                    match fragment {
                        NameFragment::Ident(ident) => write!(f, "{}", ident)?,
                        NameFragment::Channel(_) => write!(f, "channel")?,
                        NameFragment::Wildcard(_) => write!(f, "*")?,
                        NameFragment::Dollar(_) => write!(f, "$")?,
                        NameFragment::Range(range, _) => write!(f, "{{{}}}", range)?,
                    }
                }
                if let Some(index) = index {
                    write!(f, "[{}]", index)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for PatternIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternIndex::Any => write!(f, "*"),
            PatternIndex::Single(v) => write!(f, "{}", v),
            PatternIndex::Range { from, to } => {
                if let Some(from) = from {
                    write!(f, "{}", from)?;
                }
                write!(f, "..")?;
                if let Some(to) = to {
                    write!(f, "{}", to)?;
                }
                Ok(())
            }
        }
    }
}
