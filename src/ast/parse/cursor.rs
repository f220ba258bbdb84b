use crate::{
    ast::token::{Delimiter, TokenStream, TokenTree, Trivia},
    Span,
};
use std::{cell::Cell, sync::Arc};

#[derive(Debug)]
pub struct Cursor {
    ts: Arc<Vec<TokenTree>>,
    idx: Cell<usize>,
    end: Span,
    trivia: Arc<Trivia>,
    delim: Option<Delimiter>,
}

impl Cursor {
    pub(crate) fn new(ts: &TokenStream, delim: Option<Delimiter>) -> Self {
        Self {
            ts: ts.items.clone(),
            idx: Cell::new(0),
            end: ts.end,
            trivia: ts.trivia.clone(),
            delim,
        }
    }

    pub(crate) fn state(&self) -> usize {
        self.idx.get()
    }

    pub(crate) fn set_state(&self, state: usize) {
        self.idx.set(state);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.idx.get() >= self.ts.len()
    }

    pub(crate) fn peek(&self) -> Option<&TokenTree> {
        self.ts.get(self.idx.get())
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<&TokenTree> {
        self.ts.get(self.idx.get() + n)
    }

    pub(crate) fn prev(&self) -> Option<&TokenTree> {
        self.ts.get(self.idx.get().checked_sub(1)?)
    }

    pub(crate) fn bump(&self) {
        if !self.is_empty() {
            self.idx.set(self.idx.get() + 1)
        }
    }

    pub(crate) fn subcursor(&self) -> Option<Cursor> {
        let TokenTree::Delimited(_, delim, sub) = self.peek()? else {
            return None;
        };
        Some(Cursor::new(sub, Some(*delim)))
    }

    /// The closing delimiter of this stream, or the end of the asset.
    pub(crate) fn end_span(&self) -> Span {
        self.end
    }

    /// Comments between the last tree and the end of this stream.
    pub(crate) fn end_trivia(&self) -> &Trivia {
        &self.trivia
    }

    pub(crate) fn delim(&self) -> Option<Delimiter> {
        self.delim
    }
}
