use super::{
    cursor::Cursor, Comment, Delimiter, Ident, Keyword, Lit, LitKind, Property, PropertyTags,
    Token, TokenKind, Trivia, TriviaBuilder,
};
use crate::{
    ast::parse::ParsingErrorContext,
    error::{Error, ErrorHint, ErrorKind, Result},
    lexer::{self, LiteralKind},
    Asset, Span,
};
use std::sync::Arc;

///
/// A sequence of token trees, either a whole asset or the contents
/// of one delimited group.
///
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    pub items: Arc<Vec<TokenTree>>,
    /// The closing delimiter, or the end of the asset.
    pub end: Span,
    /// Comments in front of the closing delimiter.
    pub trivia: Arc<Trivia>,
    /// Comments in front of the opening delimiter.
    pub leading: Option<Arc<Trivia>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenTree {
    Token(Token, Spacing),
    Delimited(DelimSpan, Delimiter, TokenStream),
}

impl TokenTree {
    pub fn span(&self) -> Span {
        match self {
            Self::Token(token, _) => token.span,
            Self::Delimited(delim, _, _) => Span::fromto(delim.open, delim.close),
        }
    }

    pub fn trivia(&self) -> Option<&Trivia> {
        match self {
            Self::Token(token, _) => token.trivia(),
            Self::Delimited(_, _, ts) => ts.leading.as_deref(),
        }
    }
}

///
/// Whether a token is directly followed by the next one.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spacing {
    Alone,
    Joint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimSpan {
    pub open: Span,
    pub close: Span,
}

impl TokenStream {
    ///
    /// Builds the token trees of an asset, failing on the first
    /// lexical error.
    ///
    pub fn new(asset: Asset<'_>) -> Result<TokenStream> {
        Self::with_context(asset, &ParsingErrorContext::strict())
    }

    pub fn with_context(asset: Asset<'_>, ectx: &ParsingErrorContext) -> Result<TokenStream> {
        let tokens = lexer::tokenize(asset.source()).collect::<Vec<_>>();
        let mut builder = StreamBuilder {
            cursor: Cursor::new(&tokens, asset),
            ectx,
            trivia: TriviaBuilder::default(),
            open: Vec::new(),
        };
        builder.group(None)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenTree> {
        self.items.iter()
    }

    /// The number of tokens, counting into delimited groups.
    pub fn deep_len(&self) -> usize {
        self.items
            .iter()
            .map(|tree| match tree {
                TokenTree::Token(..) => 1,
                TokenTree::Delimited(_, _, ts) => 2 + ts.deep_len(),
            })
            .sum()
    }
}

struct StreamBuilder<'a, 'e> {
    cursor: Cursor<'a>,
    ectx: &'e ParsingErrorContext,
    trivia: TriviaBuilder,
    open: Vec<Delimiter>,
}

impl StreamBuilder<'_, '_> {
    fn group(&mut self, open: Option<(Delimiter, Span)>) -> Result<TokenStream> {
        use lexer::TokenKind as Raw;

        let mut items = Vec::new();
        loop {
            let Some((token, span)) = self.cursor.next() else {
                if let Some((delim, open_span)) = open {
                    self.ectx.record(
                        Error::new(
                            ErrorKind::MissingDelim,
                            format!("unclosed delimiter '{}'", delim.open_str()),
                            open_span,
                        )
                        .add_hints(ErrorHint::Help(format!(
                            "insert a closing '{}'",
                            delim.close_str()
                        ))),
                    )?;
                }
                let end = self.cursor.asset().end_span();
                return Ok(self.finish_group(items, end));
            };

            match token.kind {
                Raw::Whitespace => self.trivia.whitespace(self.cursor.text(span)),
                Raw::Comment => self.trivia.comment(Comment {
                    text: self.cursor.text(span).trim_end().to_string(),
                    span,
                }),

                Raw::OpenParen => self.delimited(Delimiter::Parenthesis, span, &mut items)?,
                Raw::OpenBrace => self.delimited(Delimiter::Brace, span, &mut items)?,
                Raw::OpenBracket => self.delimited(Delimiter::Bracket, span, &mut items)?,

                Raw::CloseParen | Raw::CloseBrace | Raw::CloseBracket => {
                    let delim = match token.kind {
                        Raw::CloseParen => Delimiter::Parenthesis,
                        Raw::CloseBrace => Delimiter::Brace,
                        _ => Delimiter::Bracket,
                    };

                    match open {
                        Some((d, _)) if d == delim => return Ok(self.finish_group(items, span)),
                        Some((d, open_span)) if self.open.contains(&delim) => {
                            // closes an enclosing group, so this one was never closed
                            self.ectx.record(Error::new(
                                ErrorKind::MissingDelim,
                                format!(
                                    "unclosed delimiter '{}', found '{}'",
                                    d.open_str(),
                                    delim.close_str()
                                ),
                                open_span,
                            ))?;
                            self.cursor.bump_back(1);
                            let end = Span::new(span.pos, 0, span.line, span.column);
                            return Ok(self.finish_group(items, end));
                        }
                        _ => {
                            self.ectx.record(Error::new(
                                ErrorKind::UnexpectedDelim,
                                format!("unexpected closing delimiter '{}'", delim.close_str()),
                                span,
                            ))?;
                        }
                    }
                }

                _ => {
                    let prev_is_operand = matches!(
                        items.last(),
                        Some(TokenTree::Delimited(..))
                            | Some(TokenTree::Token(
                                Token {
                                    kind: TokenKind::Ident(_)
                                        | TokenKind::Keyword(_)
                                        | TokenKind::Literal(_),
                                    ..
                                },
                                _
                            ))
                    );

                    if let Some((kind, span)) = self.token(token, span, prev_is_operand)? {
                        let spacing = match self.cursor.peek(0) {
                            Some(next) if !next.kind.is_trivia() => Spacing::Joint,
                            _ => Spacing::Alone,
                        };
                        let token = Token {
                            kind,
                            span,
                            trivia: self.trivia.take(),
                        };
                        items.push(TokenTree::Token(token, spacing));
                    }
                }
            }
        }
    }

    fn delimited(
        &mut self,
        delim: Delimiter,
        open_span: Span,
        items: &mut Vec<TokenTree>,
    ) -> Result<()> {
        let leading = self.trivia.take();

        self.open.push(delim);
        let mut ts = self.group(Some((delim, open_span)))?;
        self.open.pop();
        ts.leading = leading;

        items.push(TokenTree::Delimited(
            DelimSpan {
                open: open_span,
                close: ts.end,
            },
            delim,
            ts,
        ));
        Ok(())
    }

    fn finish_group(&mut self, items: Vec<TokenTree>, end: Span) -> TokenStream {
        TokenStream {
            items: Arc::new(items),
            end,
            trivia: Arc::new(self.trivia.finish()),
            leading: None,
        }
    }

    /// Records a lexical error and drops the token.
    fn invalid(&mut self, error: Error) -> Result<Option<(TokenKind, Span)>> {
        self.ectx.record(error)?;
        Ok(None)
    }

    fn eat(&mut self, kind: lexer::TokenKind, span: &mut Span) -> bool {
        match self.cursor.peek(0) {
            Some(next) if next.kind == kind => {
                if let Some((_, s)) = self.cursor.next() {
                    *span = Span::fromto(*span, s);
                }
                true
            }
            _ => false,
        }
    }

    fn eat2(&mut self, first: lexer::TokenKind, second: lexer::TokenKind, span: &mut Span) -> bool {
        let matches = self.cursor.peek(0).map(|t| t.kind) == Some(first)
            && self.cursor.peek(1).map(|t| t.kind) == Some(second);
        if matches {
            self.eat(first, span);
            self.eat(second, span);
        }
        matches
    }

    fn token(
        &mut self,
        token: lexer::Token,
        mut span: Span,
        prev_is_operand: bool,
    ) -> Result<Option<(TokenKind, Span)>> {
        use lexer::TokenKind as Raw;

        let text = self.cursor.text(span);
        let kind = match token.kind {
            Raw::Ident => match Keyword::from_ident(text) {
                Some(kw) => TokenKind::Keyword(kw),
                None => TokenKind::Ident(Ident::new(text, span)),
            },
            Raw::InvalidIdent => {
                return self.invalid(
                    Error::new(
                        ErrorKind::InvalidIdent,
                        format!("invalid identifier '{}'", text),
                        span,
                    )
                    .add_hints(ErrorHint::Note(
                        "names may only contain ASCII letters, digits and '_'".to_string(),
                    )),
                )
            }
            Raw::Unknown => {
                return self.invalid(Error::new(
                    ErrorKind::InvalidCharacter,
                    format!("invalid character '{}'", text),
                    span,
                ))
            }
            Raw::At => {
                return self.invalid(Error::new(
                    ErrorKind::InvalidCharacter,
                    "expected a property name after '@'",
                    span,
                ))
            }
            Raw::TagList { .. } => {
                return self.invalid(Error::new(
                    ErrorKind::InvalidCharacter,
                    "tag list without a property",
                    span,
                ))
            }

            Raw::Literal { kind, .. } => match kind {
                LiteralKind::Str { terminated: false } | LiteralKind::Xml { terminated: false } => {
                    self.ectx.record(Error::new(
                        ErrorKind::UnterminatedLiteral,
                        "unterminated literal",
                        span,
                    ))?;
                    let text = text.trim_start_matches(|c| c == '"' || c == '\'');
                    let kind = match kind {
                        LiteralKind::Xml { .. } => LitKind::Xml(text.to_string()),
                        _ => LitKind::Str(text.to_string()),
                    };
                    TokenKind::Literal(Lit::new(kind, span))
                }
                LiteralKind::Int {
                    empty_int: true, ..
                } => {
                    return self.invalid(Error::new(
                        ErrorKind::InvalidLiteral,
                        "missing digits after the integer base prefix",
                        span,
                    ))
                }
                _ => match Lit::from_raw(kind, text, span) {
                    Ok(lit) => TokenKind::Literal(lit),
                    Err(e) => return self.invalid(e),
                },
            },

            Raw::Annotation => {
                let mut prop = Property::from_raw(text, span);

                let mut n = 0;
                while self.cursor.peek(n).map(|t| t.kind) == Some(Raw::Whitespace) {
                    n += 1;
                }
                if let Some(lexer::Token {
                    kind: Raw::TagList { terminated },
                    ..
                }) = self.cursor.peek(n)
                {
                    self.cursor.bump(n);
                    if let Some((_, tspan)) = self.cursor.next() {
                        if !terminated {
                            self.ectx.record(Error::new(
                                ErrorKind::MissingDelim,
                                "unclosed property tag list",
                                tspan,
                            ))?;
                        }
                        prop.tags = Some(PropertyTags::from_raw(self.cursor.text(tspan), tspan));
                        span = Span::fromto(span, tspan);
                        prop.span = span;
                    }
                }
                TokenKind::Annotation(prop)
            }

            Raw::Dot => {
                if self.eat(Raw::Dot, &mut span) {
                    TokenKind::DotDot
                } else {
                    match self.cursor.peek(0) {
                        // ".5", ".5e3" and ".1s" at an operand position
                        Some(lexer::Token {
                            kind:
                                Raw::Literal {
                                    kind:
                                        kind @ (LiteralKind::Int {
                                            base: lexer::Base::Decimal,
                                            ..
                                        }
                                        | LiteralKind::Float),
                                    ..
                                },
                            len,
                        }) if !prev_is_operand
                            && !self
                                .cursor
                                .text(Span::new(span.pos + span.len, len, span.line, span.column))
                                .contains('.') =>
                        {
                            self.cursor.bump(1);
                            span = Span::new(span.pos, span.len + len, span.line, span.column);
                            match Lit::from_raw(kind, self.cursor.text(span), span) {
                                Ok(lit) => TokenKind::Literal(lit),
                                Err(e) => return self.invalid(e),
                            }
                        }
                        _ => TokenKind::Dot,
                    }
                }
            }

            Raw::Eq => {
                if self.eat(Raw::Eq, &mut span) {
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            Raw::Bang => {
                if self.eat(Raw::Eq, &mut span) {
                    TokenKind::Ne
                } else {
                    TokenKind::Bang
                }
            }
            Raw::Lt => {
                if self.eat(Raw::Eq, &mut span) {
                    if self.eat(Raw::Gt, &mut span) {
                        TokenKind::Spaceship
                    } else {
                        TokenKind::Le
                    }
                } else if self.eat2(Raw::Minus, Raw::Minus, &mut span) {
                    if self.eat(Raw::Gt, &mut span) {
                        TokenKind::LSingleArrowR
                    } else {
                        TokenKind::LSingleArrow
                    }
                } else if self.eat(Raw::Lt, &mut span) {
                    TokenKind::Shl
                } else {
                    TokenKind::Lt
                }
            }
            Raw::Gt => {
                if self.eat(Raw::Eq, &mut span) {
                    TokenKind::Ge
                } else if self.eat(Raw::Gt, &mut span) {
                    TokenKind::Shr
                } else {
                    TokenKind::Gt
                }
            }
            Raw::Minus => {
                if self.eat2(Raw::Minus, Raw::Gt, &mut span) {
                    TokenKind::RSingleArrow
                } else {
                    TokenKind::Minus
                }
            }
            Raw::Plus => {
                if self.eat(Raw::Plus, &mut span) {
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                }
            }
            Raw::Star => {
                if self.eat(Raw::Star, &mut span) {
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                }
            }
            Raw::Caret => {
                if self.eat(Raw::Caret, &mut span) {
                    TokenKind::CaretCaret
                } else {
                    TokenKind::Caret
                }
            }
            Raw::And => {
                if self.eat(Raw::And, &mut span) {
                    TokenKind::AndAnd
                } else {
                    TokenKind::And
                }
            }
            Raw::Or => {
                if self.eat(Raw::Or, &mut span) {
                    TokenKind::OrOr
                } else {
                    TokenKind::Or
                }
            }
            Raw::Colon => {
                if self.eat(Raw::Colon, &mut span) {
                    TokenKind::ColonColon
                } else {
                    TokenKind::Colon
                }
            }

            Raw::Semi => TokenKind::Semi,
            Raw::Comma => TokenKind::Comma,
            Raw::Question => TokenKind::Question,
            Raw::Dollar => TokenKind::Dollar,
            Raw::Slash => TokenKind::Slash,
            Raw::Percent => TokenKind::Percent,
            Raw::Tilde => TokenKind::Tilde,
            Raw::Pound => TokenKind::Pound,

            Raw::Comment
            | Raw::Whitespace
            | Raw::OpenParen
            | Raw::CloseParen
            | Raw::OpenBrace
            | Raw::CloseBrace
            | Raw::OpenBracket
            | Raw::CloseBracket => unreachable!("handled by the group builder"),
        };

        Ok(Some((kind, span)))
    }
}
