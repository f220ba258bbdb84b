use crate::Span;
use serde::Serialize;
use std::sync::Arc;

///
/// Comments collected in front of a token.
///
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Trivia {
    /// A comment on the same line as the previous token.
    pub trailing: Option<Comment>,
    /// Blocks of line comments, separated by blank lines.
    pub blocks: Vec<CommentBlock>,
    /// Whether the last block directly precedes the token.
    pub attached: bool,
}

/// A single line comment, including its `//` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

/// A run of line comments without blank lines in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentBlock {
    pub lines: Vec<Comment>,
    pub span: Span,
}

impl Trivia {
    pub fn is_empty(&self) -> bool {
        self.trailing.is_none() && self.blocks.is_empty()
    }

    /// The documentation block directly attached to the token.
    pub fn doc(&self) -> Option<&CommentBlock> {
        if self.attached {
            self.blocks.last()
        } else {
            None
        }
    }

    /// Comment blocks separated from the token by a blank line.
    pub fn detached(&self) -> &[CommentBlock] {
        if self.attached {
            &self.blocks[..self.blocks.len().saturating_sub(1)]
        } else {
            &self.blocks
        }
    }
}

impl CommentBlock {
    pub(crate) fn new(lines: Vec<Comment>) -> Option<CommentBlock> {
        let first = lines.first()?.span;
        let last = lines.last()?.span;
        Some(CommentBlock {
            span: Span::fromto(first, last),
            lines,
        })
    }

    /// The text of all lines, without the comment markers.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|c| {
                let line = c.text.strip_prefix("//").unwrap_or(&c.text);
                line.strip_prefix(' ').unwrap_or(line).trim_end()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

///
/// Assigns comments to the next significant token while the
/// token stream is built.
///
#[derive(Debug, Default)]
pub(crate) struct TriviaBuilder {
    trailing: Option<Comment>,
    blocks: Vec<CommentBlock>,
    current: Vec<Comment>,
    seen_token: bool,
    newlines_since_token: usize,
    newlines_since_comment: usize,
}

impl TriviaBuilder {
    pub(crate) fn whitespace(&mut self, text: &str) {
        let n = text.matches('\n').count();
        self.newlines_since_token += n;
        self.newlines_since_comment += n;
        if self.newlines_since_comment >= 2 {
            self.flush();
        }
    }

    pub(crate) fn comment(&mut self, comment: Comment) {
        let same_line = self.seen_token && self.newlines_since_token == 0;
        if same_line && self.trailing.is_none() && self.current.is_empty() {
            self.trailing = Some(comment);
        } else {
            self.current.push(comment);
        }
        self.newlines_since_comment = 0;
    }

    fn flush(&mut self) {
        if let Some(block) = CommentBlock::new(std::mem::take(&mut self.current)) {
            self.blocks.push(block);
        }
    }

    ///
    /// Takes the trivia collected for the token about to be emitted.
    ///
    pub(crate) fn take(&mut self) -> Option<Arc<Trivia>> {
        let trivia = self.finish();
        if trivia.is_empty() {
            None
        } else {
            Some(Arc::new(trivia))
        }
    }

    ///
    /// Takes the trivia collected so far, marking the position of a
    /// significant token.
    ///
    pub(crate) fn finish(&mut self) -> Trivia {
        let attached = !self.current.is_empty() && self.newlines_since_comment < 2;
        self.flush();

        let trivia = Trivia {
            trailing: self.trailing.take(),
            blocks: std::mem::take(&mut self.blocks),
            attached,
        };

        self.seen_token = true;
        self.newlines_since_token = 0;
        self.newlines_since_comment = 0;
        trivia
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str) -> Comment {
        Comment {
            text: text.to_string(),
            span: Span::default(),
        }
    }

    #[test]
    fn blocks_break_on_blank_lines() {
        let mut builder = TriviaBuilder::default();
        builder.comment(comment("// license"));
        builder.whitespace("\n\n");
        builder.comment(comment("// doc 1"));
        builder.whitespace("\n");
        builder.comment(comment("// doc 2"));
        builder.whitespace("\n");

        let trivia = builder.finish();
        assert_eq!(trivia.blocks.len(), 2);
        assert_eq!(trivia.detached().len(), 1);
        assert_eq!(trivia.doc().map(|d| d.text()), Some("doc 1\ndoc 2".to_string()));
        assert!(trivia.trailing.is_none());
    }

    #[test]
    fn same_line_comments_trail() {
        let mut builder = TriviaBuilder::default();
        let _ = builder.finish();
        builder.whitespace(" ");
        builder.comment(comment("// trailing"));
        builder.whitespace("\n\n");

        let trivia = builder.finish();
        assert_eq!(trivia.trailing, Some(comment("// trailing")));
        assert!(trivia.blocks.is_empty());
        assert!(trivia.doc().is_none());
    }

    #[test]
    fn separated_block_is_not_doc() {
        let mut builder = TriviaBuilder::default();
        builder.comment(comment("// a"));
        builder.whitespace("\n\n\n");

        let trivia = builder.finish();
        assert!(trivia.doc().is_none());
        assert_eq!(trivia.detached().len(), 1);
    }
}
