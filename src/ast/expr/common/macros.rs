macro_rules! ast_expect_single_token {
    (
        $vis:vis struct $type:ident {
            token: $token:expr,
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $type {
            $vis span: crate::Span
        }

        impl crate::ast::parse::Parse for $type {
            fn parse(input: crate::ast::parse::ParseStream)
                -> crate::error::Result<$type> {
                let expected: crate::ast::token::TokenKind = $token;
                let Some(peek) = input.ts.peek() else {
                    return Err(input.expected(&expected.token_kind_err_output()));
                };

                if let crate::ast::token::TokenTree::Token(token, _) = peek {
                    if token.kind == expected {
                        let ret = Ok(Self { span: token.span });
                        input.ts.bump();
                        ret
                    } else {
                        Err(input.expected(&expected.token_kind_err_output()))
                    }
                } else {
                    Err(
                        crate::error::Error::new(
                            crate::error::ErrorKind::UnexpectedDelim,
                            format!("expected {}, found delimited group", expected.token_kind_err_output()),
                            peek.span(),
                        )
                    )
                }
            }
        }

        impl crate::ast::parse::Spanned for $type {
            fn span(&self) -> crate::resource::Span {
                self.span
            }
        }
    };
}
