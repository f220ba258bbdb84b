use crate::{
    ast::{
        parse::*,
        token::{Ident, Keyword, Lit, LitKind, Property, Token, TokenKind, TokenTree},
    },
    error::*,
};

#[macro_use]
mod macros;

mod delim;
mod name;
mod punct;

pub use self::delim::*;
pub use self::name::*;
pub use self::punct::*;

// # Tokens

ast_expect_single_token! {
    pub struct Semi {
        token: TokenKind::Semi,
    }
}

ast_expect_single_token! {
    pub struct Comma {
        token: TokenKind::Comma,
    }
}

ast_expect_single_token! {
    pub struct Colon {
        token: TokenKind::Colon,
    }
}

ast_expect_single_token! {
    pub struct Assign {
        token: TokenKind::Assign,
    }
}

ast_expect_single_token! {
    pub struct DotDot {
        token: TokenKind::DotDot,
    }
}

ast_expect_single_token! {
    pub struct Lt {
        token: TokenKind::Lt,
    }
}

ast_expect_single_token! {
    pub struct Gt {
        token: TokenKind::Gt,
    }
}

ast_expect_single_token! {
    pub struct LikeToken {
        token: TokenKind::Keyword(Keyword::Like),
    }
}

ast_expect_single_token! {
    pub struct IfToken {
        token: TokenKind::Keyword(Keyword::If),
    }
}

ast_expect_single_token! {
    pub struct ForToken {
        token: TokenKind::Keyword(Keyword::For),
    }
}

// # Leaves

impl Parse for Ident {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        match input.ts.peek() {
            Some(TokenTree::Token(
                Token {
                    kind: TokenKind::Ident(ident),
                    ..
                },
                _,
            )) => {
                let ident = ident.clone();
                input.ts.bump();
                Ok(ident)
            }
            Some(TokenTree::Token(
                Token {
                    kind: TokenKind::Keyword(keyword),
                    span,
                    ..
                },
                _,
            )) => Err(Error::new(
                ErrorKind::ExpectedIdentFoundKeyword,
                format!("expected identifier, found keyword '{}'", keyword),
                *span,
            )
            .add_hints(ErrorHint::Note(format!(
                "'{}' is a reserved word and cannot be used as a name",
                keyword
            )))),
            _ => Err(input.expected("identifier")),
        }
    }
}

impl Parse for Lit {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        match input.ts.peek() {
            Some(TokenTree::Token(
                Token {
                    kind: TokenKind::Literal(lit),
                    ..
                },
                _,
            )) => {
                let lit = lit.clone();
                input.ts.bump();
                Ok(lit)
            }
            _ => Err(input.expected("literal")),
        }
    }
}

impl Parse for Property {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        match input.ts.peek() {
            Some(TokenTree::Token(
                Token {
                    kind: TokenKind::Annotation(prop),
                    ..
                },
                _,
            )) => {
                let prop = prop.clone();
                input.ts.bump();
                Ok(prop)
            }
            _ => Err(input.expected("property")),
        }
    }
}

///
/// Parses the properties following a name or a value, e.g. `@unit(s) @mutable`.
///
pub(crate) fn parse_inline_properties(input: ParseStream<'_>) -> Result<Vec<Property>> {
    let mut props = Vec::new();
    while matches!(input.peek_kind(), Some(TokenKind::Annotation(_))) {
        props.push(Property::parse(input)?);
    }
    Ok(props)
}

impl Spanned for Ident {
    fn span(&self) -> crate::Span {
        self.span
    }
}

impl Spanned for Lit {
    fn span(&self) -> crate::Span {
        self.span
    }
}

impl Spanned for Property {
    fn span(&self) -> crate::Span {
        self.span
    }
}

impl Lit {
    ///
    /// A literal spelled as a keyword, e.g. `true` or `nullptr`.
    ///
    pub(crate) fn from_keyword(kw: Keyword) -> Option<LitKind> {
        Some(match kw {
            Keyword::True => LitKind::Bool(true),
            Keyword::False => LitKind::Bool(false),
            Keyword::Undefined => LitKind::Undefined,
            Keyword::Null => LitKind::Null,
            Keyword::Nullptr => LitKind::Nullptr,
            Keyword::Inf => LitKind::Inf,
            Keyword::Nan => LitKind::Nan,
            _ => return None,
        })
    }
}
