use crate::{
    ast::{parse::*, DelimSpan, Delimiter, TokenTree},
    error::*,
    Span,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Delimited<T> {
    pub delim: Delimiter,
    pub delim_span: DelimSpan,
    pub inner: T,
}

impl<T> Spanned for Delimited<T> {
    fn span(&self) -> Span {
        Span::fromto(self.delim_span.open, self.delim_span.close)
    }
}

impl<T> Delimited<T> {
    ///
    /// Parses the contents of the next group with a custom parser. The
    /// contents must be consumed completely.
    ///
    pub fn parse_with(
        delim: Delimiter,
        input: ParseStream<'_>,
        f: impl FnOnce(ParseStream<'_>) -> Result<T>,
    ) -> Result<Delimited<T>> {
        let Some(peek) = input.ts.peek() else {
            let mut err = input.expected(&delim.token_kind_err_output());
            err.kind = ErrorKind::ExpectedDelimited;
            return Err(err);
        };

        let (span, d) = match peek {
            TokenTree::Delimited(span, d, _) => (*span, *d),
            TokenTree::Token(token, _) => {
                return Err(Error::new(
                    ErrorKind::ExpectedDelimited,
                    format!(
                        "expected {}, found {}",
                        delim.token_kind_err_output(),
                        token.kind.token_kind_err_output()
                    ),
                    token.span,
                ));
            }
        };

        if d != delim {
            return Err(Error::new(
                ErrorKind::UnexpectedDelim,
                format!(
                    "expected {}, found {}",
                    delim.token_kind_err_output(),
                    d.token_kind_err_output()
                ),
                Span::fromto(span.open, span.close),
            ));
        }

        let Some(substream) = input.substream() else {
            return Err(input.expected(&delim.token_kind_err_output()));
        };
        input.ts.bump();

        let inner = f(&substream)?;
        substream.ensure_empty()?;

        Ok(Self {
            delim: d,
            delim_span: span,
            inner,
        })
    }
}

impl<T: Parse> Delimited<T> {
    pub fn parse_from(delim: Delimiter, input: ParseStream<'_>) -> Result<Delimited<T>> {
        Self::parse_with(delim, input, T::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Comma, Ident, Lit, LitKind, Punctuated, TokenStream},
        resource::SourceMap,
    };

    #[test]
    fn success_single_token_delimited() {
        let mut smap = SourceMap::new();

        // # Case 0
        let asset = smap.load_raw("raw:case0", "{ ident }");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let item = Delimited::<Ident>::parse_from(Delimiter::Brace, &buf).unwrap();
        assert_eq!(item.delim, Delimiter::Brace);
        assert_eq!(item.inner, "ident");
        assert_eq!(item.span().len(), 9);

        // # Case 1
        let asset = smap.load_raw("raw:case1", "(123)");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let item = Delimited::<Lit>::parse_from(Delimiter::Parenthesis, &buf).unwrap();
        assert_eq!(item.delim, Delimiter::Parenthesis);
        assert_eq!(item.inner.kind, LitKind::Int(123));

        // # Case 2
        let asset = smap.load_raw("raw:case2", "[a, b, c]");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let item =
            Delimited::<Punctuated<Ident, Comma>>::parse_from(Delimiter::Bracket, &buf).unwrap();
        assert_eq!(item.inner.len(), 3);
    }

    #[test]
    fn fail_wrong_delimiters() {
        let mut smap = SourceMap::new();

        // # Case 0
        let asset = smap.load_raw("raw:case0", "( ident )");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let err = Delimited::<Ident>::parse_from(Delimiter::Brace, &buf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedDelim);

        // # Case 1
        let asset = smap.load_raw("raw:case1", "ident");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let err = Delimited::<Ident>::parse_from(Delimiter::Brace, &buf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpectedDelimited);

        // # Case 2
        let asset = smap.load_raw("raw:case2", "{ a b }");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let err = Delimited::<Ident>::parse_from(Delimiter::Brace, &buf).unwrap_err();
        assert_eq!(err.message, "expected '}', found identifier 'b'");
    }
}
