use serde::Serialize;
use std::fmt;

///
/// A region of a source asset.
///
/// `pos` and `len` are byte offsets relative to the start of the asset,
/// `line` and `column` are 1-based and describe the first byte.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub(crate) pos: usize,
    pub(crate) len: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Span {
    pub fn new(pos: usize, len: usize, line: usize, column: usize) -> Self {
        Span {
            pos,
            len,
            line,
            column,
        }
    }

    ///
    /// Creates a span starting at `lhs` and ending at the last byte of `rhs`.
    ///
    pub fn fromto(lhs: Span, rhs: Span) -> Self {
        assert!(lhs.pos <= rhs.pos, "A span cannot be created in reverse");
        let len = (rhs.pos + rhs.len).max(lhs.pos + lhs.len) - lhs.pos;
        Self {
            pos: lhs.pos,
            len,
            line: lhs.line,
            column: lhs.column,
        }
    }

    /// A zero-width span directly after `self`, on the same line.
    pub fn after(&self) -> Span {
        Self {
            pos: self.pos + self.len,
            len: 0,
            line: self.line,
            column: self.column + self.len,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn end(&self) -> usize {
        self.pos + self.len
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Whether `next` starts exactly where `self` ends.
    pub fn is_adjacent_to(&self, next: Span) -> bool {
        self.end() == next.pos
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
