use super::*;
use crate::{
    ast::token::{Delimiter, Keyword, Token, TokenKind, TokenTree},
    error::Error,
};
use log::trace;
use serde::Serialize;

///
/// A placeholder for a construct that could not be parsed.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorNode {
    pub message: String,
    pub span: Span,
}

impl Spanned for ErrorNode {
    fn span(&self) -> Span {
        self.span
    }
}

///
/// The context in which parsing resumes after an error.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPoint {
    /// Top level items of a file.
    File,
    /// Items of a declaration body.
    Body,
    /// Items of a `types:` section, which may end at the next section.
    Types,
}

impl SyncPoint {
    fn starts_item(&self, tree: &TokenTree) -> bool {
        let TokenTree::Token(Token { kind, .. }, _) = tree else {
            return false;
        };
        match (self, kind) {
            (SyncPoint::File, TokenKind::Annotation(_)) => true,
            (SyncPoint::File, TokenKind::Keyword(kw)) => {
                kw.is_declaration()
                    || matches!(kw, Keyword::Package | Keyword::Import | Keyword::Property)
            }
            (SyncPoint::Body, TokenKind::Keyword(kw)) => kw.is_section(),
            (SyncPoint::Types, _) => {
                SyncPoint::File.starts_item(tree) || SyncPoint::Body.starts_item(tree)
            }
            _ => false,
        }
    }
}

impl ParseBuffer<'_> {
    ///
    /// Records `error` and skips the construct that starts at `state`.
    ///
    /// At least one tree is skipped. Skipping stops after a `;`, after a
    /// `{...}` group or in front of a tree that starts a new item. Once
    /// the error limit is reached the rest of the stream is skipped.
    ///
    pub fn recover(&self, state: usize, error: Error, sync: SyncPoint) -> Result<ErrorNode> {
        let message = error.message.clone();
        self.record(error)?;

        self.ts.set_state(state);
        let start = self.peek_span();
        let mut end = start;
        let mut skipped = 0usize;

        while let Some(tree) = self.ts.peek() {
            let limit = self.ectx.limit_reached();
            if skipped > 0 && !limit && sync.starts_item(tree) {
                break;
            }

            end = tree.span();
            skipped += 1;
            self.ts.bump();

            if limit {
                continue;
            }
            match tree {
                TokenTree::Token(
                    Token {
                        kind: TokenKind::Semi,
                        ..
                    },
                    _,
                ) => break,
                TokenTree::Delimited(_, Delimiter::Brace, _) => break,
                _ => {}
            }
        }

        let span = Span::fromto(start, end);
        trace!(
            "recovered at {}:{} skipping {} trees: {}",
            self.asset.alias(),
            span,
            skipped,
            message
        );

        Ok(ErrorNode { message, span })
    }
}
