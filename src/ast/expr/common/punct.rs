use crate::{ast::parse::*, error::Result};

///
/// A sequence of `T` separated by `P`, with an optional trailing `P`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Punctuated<T, P> {
    inner: Vec<(T, P)>,
    last: Option<Box<T>>,
}

impl<T, P> Punctuated<T, P> {
    pub const fn new() -> Self {
        Self {
            inner: Vec::new(),
            last: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.inner.len() + usize::from(self.last.is_some())
    }

    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    pub fn trailing_punct(&self) -> bool {
        self.last.is_none() && !self.inner.is_empty()
    }

    pub fn push_value(&mut self, value: T) {
        debug_assert!(self.last.is_none());
        self.last = Some(Box::new(value));
    }

    pub fn push_punct(&mut self, punct: P) {
        if let Some(last) = self.last.take() {
            self.inner.push((*last, punct))
        }
    }

    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter {
            punct: self,
            idx: 0,
        }
    }

    /// The values, dropping the separators.
    pub fn into_values(self) -> Vec<T> {
        let mut values = self.inner.into_iter().map(|(v, _)| v).collect::<Vec<_>>();
        if let Some(last) = self.last {
            values.push(*last);
        }
        values
    }
}

impl<T, P> Default for Punctuated<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Parse, P: Parse> Parse for Punctuated<T, P> {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut this = Self::new();
        while !input.ts.is_empty() {
            let item = T::parse(input)?;

            if input.ts.is_empty() {
                // no tailing delim needed
                this.push_value(item);
                break;
            } else {
                let delim = P::parse(input)?;
                this.inner.push((item, delim))
            }
        }

        input.ensure_empty()?;
        Ok(this)
    }
}

// # Iter

pub struct Iter<'a, T, P> {
    punct: &'a Punctuated<T, P>,
    idx: usize,
}

impl<'a, T, P> Iterator for Iter<'a, T, P> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        use std::cmp::Ordering::*;
        match self.idx.cmp(&self.punct.inner.len()) {
            Less => {
                self.idx += 1;
                Some(&self.punct.inner[self.idx - 1].0)
            }
            Equal => {
                self.idx += 1;
                self.punct.last.as_deref()
            }
            Greater => None,
        }
    }
}
