use crate::{lexer::Token, Asset, Span};

///
/// A cursor over the raw tokens of one asset, tracking the
/// byte position of the current token.
///
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    ts: &'a [Token],
    idx: usize,
    span_pos: usize,
    asset: Asset<'a>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(ts: &'a [Token], asset: Asset<'a>) -> Self {
        Self {
            ts,
            idx: 0,
            span_pos: 0,
            asset,
        }
    }

    pub(crate) fn asset(&self) -> Asset<'a> {
        self.asset
    }

    pub(crate) fn next(&mut self) -> Option<(Token, Span)> {
        let token = *self.ts.get(self.idx)?;
        let span = self.asset.span(self.span_pos, token.len);
        self.bump(1);
        Some((token, span))
    }

    pub(crate) fn bump(&mut self, n: usize) {
        for _ in 0..n {
            if let Some(token) = self.ts.get(self.idx) {
                self.span_pos += token.len;
                self.idx += 1;
            }
        }
    }

    pub(crate) fn bump_back(&mut self, n: usize) {
        for _ in 0..n {
            if self.idx > 0 {
                self.idx -= 1;
                self.span_pos -= self.ts[self.idx].len;
            }
        }
    }

    pub(crate) fn peek(&self, offset: usize) -> Option<Token> {
        self.ts.get(self.idx + offset).copied()
    }

    /// The source text of a span.
    pub(crate) fn text(&self, span: Span) -> &'a str {
        self.asset.slice_for(span)
    }
}
