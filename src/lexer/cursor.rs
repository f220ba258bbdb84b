use std::str::Chars;

pub(crate) const EOF_CHAR: char = '\0';

///
/// A peekable char iterator over the source of one asset.
///
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    initial_len: usize,
    chars: Chars<'a>,
    prev: char,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Cursor<'a> {
        Cursor {
            initial_len: input.len(),
            chars: input.chars(),
            prev: EOF_CHAR,
        }
    }

    /// The last consumed char, or `EOF_CHAR` at the start.
    pub(crate) fn prev(&self) -> char {
        self.prev
    }

    pub(crate) fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        self.nth_char(1)
    }

    pub(crate) fn nth_char(&self, n: usize) -> char {
        self.chars.clone().nth(n).unwrap_or(EOF_CHAR)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    /// Number of bytes consumed since the last reset.
    pub(crate) fn len_consumed(&self) -> usize {
        self.initial_len - self.chars.as_str().len()
    }

    pub(crate) fn reset_len_consumed(&mut self) {
        self.initial_len = self.chars.as_str().len();
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.prev = c;
        Some(c)
    }

    pub(crate) fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while predicate(self.first()) && !self.is_eof() {
            self.bump();
        }
    }
}
