use super::{cursor::Cursor, *};
use crate::{
    ast::token::{Comment, CommentBlock, Delimiter, Keyword, Token, TokenKind, TokenStream, TokenTree, Trivia},
    error::{Error, ErrorKind},
    Asset,
};
use std::{borrow::Borrow, rc::Rc};

pub type ParseStream<'a> = &'a ParseBuffer<'a>;

#[derive(Debug)]
pub struct ParseBuffer<'a> {
    pub asset: Asset<'a>,
    pub ts: Cursor,
    pub(crate) ectx: Rc<ParsingErrorContext>,
}

impl<'a> ParseBuffer<'a> {
    ///
    /// Creates a strict buffer, where every error aborts the parse.
    ///
    pub fn new(asset: Asset<'a>, ts: impl Borrow<TokenStream>) -> Self {
        Self::with_context(asset, ts, Rc::new(ParsingErrorContext::strict()))
    }

    pub fn with_context(
        asset: Asset<'a>,
        ts: impl Borrow<TokenStream>,
        ectx: Rc<ParsingErrorContext>,
    ) -> Self {
        Self {
            asset,
            ts: Cursor::new(ts.borrow(), None),
            ectx,
        }
    }

    pub fn parse<T: Parse>(&self) -> Result<T> {
        T::parse(self)
    }

    pub fn call<T>(&self, f: fn(ParseStream<'_>) -> Result<T>) -> Result<T> {
        f(self)
    }

    ///
    /// A buffer over the contents of the next delimited group.
    /// The group itself is not consumed.
    ///
    pub fn substream(&self) -> Option<ParseBuffer<'a>> {
        let ts = self.ts.subcursor()?;
        Some(Self {
            ts,
            asset: self.asset,
            ectx: self.ectx.clone(),
        })
    }

    // # Peeking

    pub fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek_nth_kind(0)
    }

    pub fn peek_nth_kind(&self, n: usize) -> Option<&TokenKind> {
        match self.ts.peek_nth(n)? {
            TokenTree::Token(Token { kind, .. }, _) => Some(kind),
            TokenTree::Delimited(..) => None,
        }
    }

    pub fn peek_is(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub fn peek_keyword(&self, kw: Keyword) -> bool {
        self.peek_nth_keyword(0, kw)
    }

    pub fn peek_nth_keyword(&self, n: usize, kw: Keyword) -> bool {
        matches!(self.peek_nth_kind(n), Some(TokenKind::Keyword(k)) if *k == kw)
    }

    pub fn peek_ident(&self) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Ident(_)))
    }

    pub fn peek_delim(&self) -> Option<Delimiter> {
        self.peek_nth_delim(0)
    }

    pub fn peek_nth_delim(&self, n: usize) -> Option<Delimiter> {
        match self.ts.peek_nth(n)? {
            TokenTree::Delimited(_, delim, _) => Some(*delim),
            TokenTree::Token(..) => None,
        }
    }

    /// The span of the next tree, or the end of the stream.
    pub fn peek_span(&self) -> Span {
        self.ts
            .peek()
            .map(|tree| tree.span())
            .unwrap_or_else(|| self.ts.end_span())
    }

    /// The span of the last consumed tree.
    pub fn prev_span(&self) -> Span {
        self.ts
            .prev()
            .map(|tree| tree.span())
            .unwrap_or_else(|| self.peek_span())
    }

    ///
    /// Whether the last consumed tree and the next one are written
    /// without whitespace in between.
    ///
    pub fn is_joint(&self) -> bool {
        match (self.ts.prev(), self.ts.peek()) {
            (Some(prev), Some(next)) => prev.span().is_adjacent_to(next.span()),
            _ => false,
        }
    }

    // # Consuming

    /// Consumes the next token if it is of the given kind.
    pub fn eat(&self, kind: &TokenKind) -> Option<Span> {
        if self.peek_is(kind) {
            let span = self.peek_span();
            self.ts.bump();
            Some(span)
        } else {
            None
        }
    }

    pub fn eat_keyword(&self, kw: Keyword) -> Option<Span> {
        self.eat(&TokenKind::Keyword(kw))
    }

    // # Errors

    ///
    /// An error describing the next tree as unexpected, naming what was
    /// expected instead.
    ///
    pub fn expected(&self, what: &str) -> Error {
        match self.ts.peek() {
            Some(TokenTree::Token(token, _)) => Error::new(
                ErrorKind::UnexpectedToken,
                format!(
                    "expected {}, found {}",
                    what,
                    token.kind.token_kind_err_output()
                ),
                token.span,
            ),
            Some(tree @ TokenTree::Delimited(_, delim, _)) => Error::new(
                ErrorKind::UnexpectedToken,
                format!("expected {}, found {}", what, delim.token_kind_err_output()),
                tree.span(),
            ),
            None => match self.ts.delim() {
                Some(delim) => Error::new(
                    ErrorKind::UnexpectedToken,
                    format!("expected {}, found '{}'", what, delim.close_str()),
                    self.ts.end_span(),
                ),
                None => Error::new(
                    ErrorKind::UnexpectedEOF,
                    format!("expected {}, found end of file", what),
                    self.ts.end_span(),
                ),
            },
        }
    }

    /// Fails if any trees are left in this stream.
    pub fn ensure_empty(&self) -> Result<()> {
        if self.ts.is_empty() {
            Ok(())
        } else {
            let what = match self.ts.delim() {
                Some(delim) => format!("'{}'", delim.close_str()),
                None => "end of file".to_string(),
            };
            Err(self.expected(&what))
        }
    }

    ///
    /// Records an error with the error context. Returns the error
    /// in strict mode.
    ///
    pub fn record(&self, error: Error) -> Result<()> {
        self.ectx.record(error)
    }

    pub fn warn(&self, warning: Error) {
        self.ectx.warn(warning)
    }

    pub fn is_tolerant(&self) -> bool {
        self.ectx.is_tolerant()
    }

    // # Trivia

    /// Comments in front of the next tree, or in front of the stream end.
    pub fn trivia(&self) -> Option<&Trivia> {
        match self.ts.peek() {
            Some(tree) => tree.trivia(),
            None => Some(self.ts.end_trivia()),
        }
    }

    /// The documentation block directly in front of the next tree.
    pub fn doc(&self) -> Option<CommentBlock> {
        self.trivia()?.doc().cloned()
    }

    /// The same-line comment after the last consumed tree.
    pub fn trailing(&self) -> Option<Comment> {
        self.trivia()?.trailing.clone()
    }

    /// Comment blocks in front of the next tree that are not documentation.
    pub fn detached_comments(&self) -> Vec<CommentBlock> {
        self.trivia()
            .map(|t| t.detached().to_vec())
            .unwrap_or_default()
    }
}
