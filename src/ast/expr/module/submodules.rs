use crate::{
    ast::{
        parse::*, parse_expr_with, Body, Colon, Comment, CommentBlock, Delimited, Delimiter,
        DottedName, Expr, Gt, Ident, Keyword, LikeToken, Lt, Restrictions, Semi, TokenKind,
    },
    error::Result,
    Span,
};
use serde::Serialize;
use std::fmt;

///
/// A submodule, e.g. `host[n]: <> like IHost if n > 0 { ... }`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submodule {
    pub name: Ident,
    pub size: Option<Expr>,
    pub ty: TypeRef,
    pub condition: Option<Expr>,
    pub body: Option<Body>,
    pub doc: Option<CommentBlock>,
    pub trailing: Option<Comment>,
    pub span: Span,
}

///
/// The type of a submodule or channel: a concrete name or a
/// parametric `<expr> like Interface` reference.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeRef {
    Concrete(DottedName),
    Like(LikeSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LikeSpec {
    pub expr: LikeExpr,
    pub interface: DottedName,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LikeExpr {
    /// `<>`, the type comes from a `typename` assignment.
    Any,
    Expr(Expr),
    /// `<default(expr)>`
    Default(Expr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SubmoduleItem {
    Submodule(Submodule),
    Error(ErrorNode),
}

impl Submodule {
    pub fn is_vector(&self) -> bool {
        self.size.is_some()
    }
}

impl Parse for Submodule {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let name = Ident::parse(input)?;
        let size = if input.peek_delim() == Some(Delimiter::Bracket) {
            Some(Delimited::<Expr>::parse_from(Delimiter::Bracket, input)?.inner)
        } else {
            None
        };

        Colon::parse(input)?;
        let ty = TypeRef::parse(input)?;

        let condition = if input.eat_keyword(Keyword::If).is_some() {
            Some(parse_expr_with(input, Restrictions::CONDITION)?)
        } else {
            None
        };

        let (body, end) = if input.peek_delim() == Some(Delimiter::Brace) {
            let body = Body::parse(input)?;
            let end = input.eat(&TokenKind::Semi).unwrap_or(body.span);
            (Some(body), end)
        } else {
            (None, Semi::parse(input)?.span)
        };
        let trailing = input.trailing();

        Ok(Submodule {
            span: Span::fromto(name.span, end),
            name,
            size,
            ty,
            condition,
            body,
            doc,
            trailing,
        })
    }
}

impl Parse for TypeRef {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.peek_is(&TokenKind::Lt) {
            LikeSpec::parse(input).map(TypeRef::Like)
        } else {
            DottedName::parse(input).map(TypeRef::Concrete)
        }
    }
}

impl Parse for LikeSpec {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let lt = Lt::parse(input)?;
        let expr = if input.peek_is(&TokenKind::Gt) {
            LikeExpr::Any
        } else if input.peek_keyword(Keyword::Default)
            && input.peek_nth_delim(1) == Some(Delimiter::Parenthesis)
        {
            input.ts.bump();
            let delim = Delimited::<Expr>::parse_from(Delimiter::Parenthesis, input)?;
            LikeExpr::Default(delim.inner)
        } else {
            LikeExpr::Expr(parse_expr_with(input, Restrictions::LIKE_EXPR)?)
        };
        Gt::parse(input)?;

        LikeToken::parse(input)?;
        let interface = DottedName::parse(input)?;

        Ok(LikeSpec {
            span: Span::fromto(lt.span, interface.span),
            expr,
            interface,
        })
    }
}

impl Parse for SubmoduleItem {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        Submodule::parse(input).map(SubmoduleItem::Submodule)
    }
}

impl Spanned for Submodule {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for SubmoduleItem {
    fn span(&self) -> Span {
        match self {
            SubmoduleItem::Submodule(submodule) => submodule.span,
            SubmoduleItem::Error(node) => node.span,
        }
    }
}

impl Spanned for TypeRef {
    fn span(&self) -> Span {
        match self {
            TypeRef::Concrete(name) => name.span,
            TypeRef::Like(like) => like.span,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Concrete(name) => write!(f, "{}", name),
            TypeRef::Like(like) => write!(f, "{}", like),
        }
    }
}

impl fmt::Display for LikeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expr {
            LikeExpr::Any => write!(f, "<>")?,
            LikeExpr::Expr(expr) => write!(f, "<{}>", expr)?,
            LikeExpr::Default(expr) => write!(f, "<default({})>", expr)?,
        }
        write!(f, " like {}", self.interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::TokenStream, error::ErrorKind, SourceMap};

    #[test]
    fn concrete_submodules() {
        let mut smap = SourceMap::new();

        // # Case 0
        let asset = smap.load_raw(
            "raw:case0",
            "host[n]: inet.StandardHost if n > 0; // hosts\nrouter: Router { gates: ethg[2]; };",
        );
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let host = Submodule::parse(&buf).unwrap();
        assert_eq!(host.name, "host");
        assert!(host.is_vector());
        assert_eq!(host.ty.to_string(), "inet.StandardHost");
        assert_eq!(host.condition.map(|c| c.to_string()), Some("n > 0".to_string()));
        assert!(host.body.is_none());
        assert_eq!(host.trailing.map(|c| c.text), Some("// hosts".to_string()));

        let router = Submodule::parse(&buf).unwrap();
        assert_eq!(router.name, "router");
        assert_eq!(router.body.as_ref().map(|b| b.gates().count()), Some(1));
        assert!(buf.ts.is_empty());
    }

    #[test]
    fn like_submodules() {
        let mut smap = SourceMap::new();

        // # Case 0
        let asset = smap.load_raw(
            "raw:case0",
            "a: <> like IApp; b: <appType> like IApp; c: <default(\"Sink\")> like IApp; d: <x > 1 ? \"A\" : \"B\"> like IApp;",
        );
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let types = (0..3)
            .map(|_| Submodule::parse(&buf).unwrap().ty.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            types,
            vec![
                "<> like IApp".to_string(),
                "<appType> like IApp".to_string(),
                "<default(\"Sink\")> like IApp".to_string(),
            ]
        );

        // '>' ends the like expression
        let err = Submodule::parse(&buf).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    }

    #[test]
    fn conditions_do_not_take_object_literals() {
        let mut smap = SourceMap::new();

        let asset = smap.load_raw("raw:case0", "a: App if hasApp { x = 1; }");
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let submodule = Submodule::parse(&buf).unwrap();
        assert_eq!(
            submodule.condition.map(|c| c.to_string()),
            Some("hasApp".to_string())
        );
        assert_eq!(
            submodule.body.map(|b| b.parameters().count()),
            Some(1)
        );
    }
}
