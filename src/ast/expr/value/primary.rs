use super::*;
use crate::{
    ast::{
        expr::common::Delimited, Comma, Delimiter, LitKind, Number, Punctuated, QuantityPart,
        TokenTree,
    },
    error::{Error, ErrorKind},
};

///
/// Parses an atom followed by any number of method calls `.f(args)`.
///
pub(super) fn parse_postfix(input: ParseStream<'_>, restr: Restrictions) -> Result<Expr> {
    let mut expr = parse_primary(input, restr)?;

    while input.peek_is(&TokenKind::Dot) && input.peek_nth_delim(2) == Some(Delimiter::Parenthesis)
    {
        let func = match input.peek_nth_kind(1) {
            Some(TokenKind::Ident(ident)) => {
                let name = QualifiedName {
                    span: ident.span,
                    segments: vec![NameSegment::Name {
                        ident: ident.clone(),
                        index: None,
                        span: ident.span,
                    }],
                };
                FuncName::Name(name)
            }
            Some(TokenKind::Keyword(kw)) if kw.is_cast() => {
                FuncName::Cast(*kw, input.ts.peek_nth(1).map(|t| t.span()).unwrap_or_default())
            }
            _ => break,
        };
        input.ts.bump();
        input.ts.bump();

        let args = parse_args(input)?;
        expr = Expr::Call(Call {
            span: Span::fromto(expr.span(), args.span()),
            receiver: Some(Box::new(expr)),
            func,
            args: args.inner.into_values(),
        });
    }

    Ok(expr)
}

fn parse_args(input: ParseStream<'_>) -> Result<Delimited<Punctuated<Expr, Comma>>> {
    Delimited::parse_from(Delimiter::Parenthesis, input)
}

fn parse_primary(input: ParseStream<'_>, restr: Restrictions) -> Result<Expr> {
    let Some(peek) = input.ts.peek() else {
        return Err(input.expected("expression"));
    };

    let token = match peek {
        TokenTree::Delimited(_, Delimiter::Parenthesis, _) => {
            let delim = Delimited::<Expr>::parse_from(Delimiter::Parenthesis, input)?;
            return Ok(delim.inner);
        }
        TokenTree::Delimited(_, Delimiter::Bracket, _) => {
            let delim = Delimited::<Punctuated<Expr, Comma>>::parse_from(Delimiter::Bracket, input)?;
            return Ok(Expr::Array(ArrayLit {
                span: delim.span(),
                items: delim.inner.into_values(),
            }));
        }
        TokenTree::Delimited(_, Delimiter::Brace, _) => {
            return parse_object_body(input, Vec::new(), None).map(Expr::Object);
        }
        TokenTree::Token(token, _) => token,
    };

    match &token.kind {
        TokenKind::Literal(lit) => {
            let lit = lit.clone();
            input.ts.bump();
            parse_quantity_tail(input, lit).map(Expr::Lit)
        }

        TokenKind::Keyword(kw) => {
            let kw = *kw;
            let span = token.span;
            match kw {
                Keyword::Inf | Keyword::Nan => {
                    input.ts.bump();
                    let kind = Lit::from_keyword(kw).unwrap_or(LitKind::Nan);
                    parse_quantity_tail(input, Lit::new(kind, span)).map(Expr::Lit)
                }
                Keyword::True
                | Keyword::False
                | Keyword::Undefined
                | Keyword::Null
                | Keyword::Nullptr => {
                    input.ts.bump();
                    let kind = Lit::from_keyword(kw).unwrap_or(LitKind::Undefined);
                    Ok(Expr::Lit(Lit::new(kind, span)))
                }

                Keyword::Exists | Keyword::Sizeof => {
                    input.ts.bump();
                    let delim = Delimited::<QualifiedName>::parse_from(Delimiter::Parenthesis, input)?;
                    let op = NameOp {
                        span: Span::fromto(span, delim.span()),
                        name: Some(delim.inner),
                    };
                    Ok(if kw == Keyword::Exists {
                        Expr::Exists(op)
                    } else {
                        Expr::Sizeof(op)
                    })
                }

                Keyword::Index => {
                    input.ts.bump();
                    Ok(Expr::Index(NameOp { name: None, span }))
                }
                Keyword::Typename => {
                    input.ts.bump();
                    Ok(Expr::Typename(NameOp { name: None, span }))
                }

                kw if kw.is_cast() && input.peek_nth_delim(1) == Some(Delimiter::Parenthesis) => {
                    input.ts.bump();
                    let args = parse_args(input)?;
                    Ok(Expr::Call(Call {
                        receiver: None,
                        func: FuncName::Cast(kw, span),
                        span: Span::fromto(span, args.span()),
                        args: args.inner.into_values(),
                    }))
                }

                Keyword::This | Keyword::Parent => parse_name_expr(input, restr),

                _ => Err(input.expected("expression")),
            }
        }

        TokenKind::Ident(_) => parse_name_expr(input, restr),

        _ => Err(input.expected("expression")),
    }
}

///
/// Parses everything that starts with a name: plain names, calls,
/// typed object literals and the `.index`/`.typename` operators.
///
fn parse_name_expr(input: ParseStream<'_>, restr: Restrictions) -> Result<Expr> {
    // typed object literal `a::b::T { ... }`
    if input.peek_ident() && input.peek_nth_kind(1) == Some(&TokenKind::ColonColon) {
        let mut ty = vec![Ident::parse(input)?];
        while input.eat(&TokenKind::ColonColon).is_some() {
            ty.push(Ident::parse(input)?);
            if ty.len() > 4 {
                return Err(Error::new(
                    ErrorKind::UnexpectedToken,
                    "object types have at most four name segments",
                    Span::fromto(ty[0].span, ty[ty.len() - 1].span),
                ));
            }
        }
        return parse_object_body(input, ty, None).map(Expr::Object);
    }

    let name = parse_qualified_name(input)?;

    if input.peek_is(&TokenKind::Dot) {
        let op = match input.peek_nth_kind(1) {
            Some(TokenKind::Keyword(Keyword::Index)) => Some(Keyword::Index),
            Some(TokenKind::Keyword(Keyword::Typename)) => Some(Keyword::Typename),
            _ => None,
        };
        if let Some(op) = op {
            input.ts.bump();
            let end = input.peek_span();
            input.ts.bump();

            let op_expr = NameOp {
                span: Span::fromto(name.span, end),
                name: Some(name),
            };
            return Ok(if op == Keyword::Index {
                Expr::Index(op_expr)
            } else {
                Expr::Typename(op_expr)
            });
        }
    }

    if input.peek_delim() == Some(Delimiter::Parenthesis) {
        let args = parse_args(input)?;
        return Ok(Expr::Call(Call {
            receiver: None,
            span: Span::fromto(name.span, args.span()),
            func: FuncName::Name(name),
            args: args.inner.into_values(),
        }));
    }

    if !restr.no_object_literal && input.peek_delim() == Some(Delimiter::Brace) {
        if let Some(ident) = name.as_ident() {
            let ty = vec![ident.clone()];
            return parse_object_body(input, ty, Some(name.span)).map(Expr::Object);
        }
    }

    Ok(Expr::Name(name))
}

pub(crate) fn parse_qualified_name(input: ParseStream<'_>) -> Result<QualifiedName> {
    let first = parse_name_segment(input)?;
    let mut span = first.span();
    let mut segments = vec![first];

    while input.peek_is(&TokenKind::Dot)
        && matches!(
            input.peek_nth_kind(1),
            Some(TokenKind::Ident(_))
                | Some(TokenKind::Keyword(Keyword::This))
                | Some(TokenKind::Keyword(Keyword::Parent))
        )
        && input.peek_nth_delim(2) != Some(Delimiter::Parenthesis)
    {
        input.ts.bump();
        let segment = parse_name_segment(input)?;
        span = Span::fromto(span, segment.span());
        segments.push(segment);
    }

    Ok(QualifiedName { segments, span })
}

fn parse_name_segment(input: ParseStream<'_>) -> Result<NameSegment> {
    if let Some(span) = input.eat_keyword(Keyword::This) {
        return Ok(NameSegment::This(span));
    }
    if let Some(span) = input.eat_keyword(Keyword::Parent) {
        return Ok(NameSegment::Parent(span));
    }

    let ident = Ident::parse(input).map_err(|e| {
        if e.kind == ErrorKind::ExpectedIdentFoundKeyword {
            e
        } else {
            input.expected("name")
        }
    })?;

    if input.peek_delim() == Some(Delimiter::Bracket) {
        let delim = Delimited::<Expr>::parse_from(Delimiter::Bracket, input)?;
        return Ok(NameSegment::Name {
            span: Span::fromto(ident.span, delim.span()),
            ident,
            index: Some(Box::new(delim.inner)),
        });
    }

    Ok(NameSegment::Name {
        span: ident.span,
        ident,
        index: None,
    })
}

fn parse_object_body(
    input: ParseStream<'_>,
    ty: Vec<Ident>,
    start: Option<Span>,
) -> Result<ObjectLit> {
    let start = start.or_else(|| ty.first().map(|i| i.span));
    let delim = Delimited::<Punctuated<ObjectEntry, Comma>>::parse_from(Delimiter::Brace, input)?;
    Ok(ObjectLit {
        span: Span::fromto(start.unwrap_or(delim.delim_span.open), delim.delim_span.close),
        ty,
        entries: delim.inner.into_values(),
    })
}

pub(super) fn parse_object_key(input: ParseStream<'_>) -> Result<ObjectKey> {
    let start = input.peek_span();
    let negative = input.eat(&TokenKind::Minus).is_some();

    let lit = match input.peek_kind() {
        Some(TokenKind::Ident(ident)) if !negative => {
            let ident = ident.clone();
            input.ts.bump();
            return Ok(ObjectKey::Name(ident));
        }
        Some(TokenKind::Literal(lit)) => {
            let lit = lit.clone();
            if negative && !lit.is_numeric() {
                return Err(input.expected("number"));
            }
            input.ts.bump();
            parse_quantity_tail(input, lit)?
        }
        Some(TokenKind::Keyword(kw)) => {
            let kw = *kw;
            let allowed = if negative {
                kw == Keyword::Inf
            } else {
                matches!(
                    kw,
                    Keyword::Inf
                        | Keyword::Nan
                        | Keyword::True
                        | Keyword::False
                        | Keyword::Null
                        | Keyword::Nullptr
                )
            };
            match Lit::from_keyword(kw) {
                Some(kind) if allowed => {
                    let span = input.peek_span();
                    input.ts.bump();
                    Lit::new(kind, span)
                }
                _ => return Err(input.expected("object key")),
            }
        }
        _ => return Err(input.expected("object key")),
    };

    Ok(ObjectKey::Lit {
        span: Span::fromto(start, lit.span),
        negative,
        lit,
    })
}

///
/// Extends a numeric literal into a quantity if units follow. Pairs
/// separated by whitespace, such as `1h 30min` or `5 s`, are merged.
///
pub(super) fn parse_quantity_tail(input: ParseStream<'_>, lit: Lit) -> Result<Lit> {
    let mut span = lit.span;
    let plain = lit.kind.clone();
    let (mut parts, mut pending) = match lit.kind {
        LitKind::Int(v) => (Vec::new(), Some(Number::Int(v))),
        LitKind::Float(v) => (Vec::new(), Some(Number::Float(v))),
        LitKind::Inf => (Vec::new(), Some(Number::Float(f64::INFINITY))),
        LitKind::Nan => (Vec::new(), Some(Number::Float(f64::NAN))),
        LitKind::Quantity(parts) => (parts, None),
        _ => return Ok(lit),
    };

    loop {
        match pending {
            Some(value) => {
                let Some(TokenKind::Ident(unit)) = input.peek_kind() else {
                    break;
                };
                span = Span::fromto(span, unit.span);
                parts.push(QuantityPart {
                    value,
                    unit: unit.raw.clone(),
                });
                input.ts.bump();
                pending = None;
            }
            None => {
                let followed_by_unit = matches!(input.peek_nth_kind(1), Some(TokenKind::Ident(_)));
                match input.peek_kind() {
                    Some(TokenKind::Literal(Lit {
                        kind: LitKind::Quantity(more),
                        span: s,
                    })) => {
                        span = Span::fromto(span, *s);
                        parts.extend(more.iter().cloned());
                        input.ts.bump();
                    }
                    Some(TokenKind::Literal(Lit {
                        kind: LitKind::Int(v),
                        ..
                    })) if followed_by_unit => {
                        pending = Some(Number::Int(*v));
                        input.ts.bump();
                    }
                    Some(TokenKind::Literal(Lit {
                        kind: LitKind::Float(v),
                        ..
                    })) if followed_by_unit => {
                        pending = Some(Number::Float(*v));
                        input.ts.bump();
                    }
                    Some(TokenKind::Keyword(Keyword::Inf)) if followed_by_unit => {
                        pending = Some(Number::Float(f64::INFINITY));
                        input.ts.bump();
                    }
                    Some(TokenKind::Keyword(Keyword::Nan)) if followed_by_unit => {
                        pending = Some(Number::Float(f64::NAN));
                        input.ts.bump();
                    }
                    _ => break,
                }
            }
        }
    }

    if parts.is_empty() {
        return Ok(Lit::new(plain, span));
    }
    Ok(Lit::new(LitKind::Quantity(parts), span))
}

