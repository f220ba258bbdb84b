use crate::{
    ast::{parse::*, Colon, Ident, Keyword, Lit, TokenKind},
    error::Result,
    Span,
};
use serde::Serialize;

mod display;
mod ops;
mod primary;

pub use self::ops::*;
pub(crate) use self::primary::parse_qualified_name;

#[cfg(test)]
mod tests;

///
/// An expression, as found in parameter values, vector sizes, indices
/// and conditions.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Lit(Lit),
    Name(QualifiedName),
    Call(Call),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Ternary(TernaryExpr),
    Object(ObjectLit),
    Array(ArrayLit),
    /// `exists(name)`
    Exists(NameOp),
    /// `sizeof(name)`
    Sizeof(NameOp),
    /// `index` or `name.index`
    Index(NameOp),
    /// `typename` or `name.typename`
    Typename(NameOp),
}

///
/// A possibly indexed, dotted name such as `parent.host[i].mtu`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifiedName {
    pub segments: Vec<NameSegment>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NameSegment {
    Name {
        ident: Ident,
        index: Option<Box<Expr>>,
        span: Span,
    },
    This(Span),
    Parent(Span),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    /// The receiver of a method-style call `expr.f(args)`.
    pub receiver: Option<Box<Expr>>,
    pub func: FuncName,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FuncName {
    Name(QualifiedName),
    /// A type cast such as `int(x)`.
    Cast(Keyword, Span),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TernaryExpr {
    pub cond: Box<Expr>,
    pub then: Box<Expr>,
    pub otherwise: Box<Expr>,
    pub span: Span,
}

///
/// An object literal `{key: value, ...}`, optionally prefixed by
/// a `::`-qualified type name.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectLit {
    pub ty: Vec<Ident>,
    pub entries: Vec<ObjectEntry>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectEntry {
    pub key: ObjectKey,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObjectKey {
    Name(Ident),
    Lit { negative: bool, lit: Lit, span: Span },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLit {
    pub items: Vec<Expr>,
    pub span: Span,
}

///
/// An operator applied to a name. `name` is absent for the bare
/// `index` and `typename` forms.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameOp {
    pub name: Option<QualifiedName>,
    pub span: Span,
}

///
/// Limits on what an expression may contain at its position.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Restrictions {
    /// `name {` does not start a typed object literal.
    pub no_object_literal: bool,
    /// `>` ends the expression instead of being a comparison.
    pub no_gt: bool,
}

impl Restrictions {
    pub(crate) const NONE: Restrictions = Restrictions {
        no_object_literal: false,
        no_gt: false,
    };

    pub(crate) const CONDITION: Restrictions = Restrictions {
        no_object_literal: true,
        no_gt: false,
    };

    pub(crate) const LIKE_EXPR: Restrictions = Restrictions {
        no_object_literal: false,
        no_gt: true,
    };
}

impl Expr {
    /// The binding strength of the outermost operator.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Ternary(_) => PREC_TERNARY,
            Expr::Binary(b) => b.op.precedence(),
            Expr::Unary(_) => PREC_UNARY,
            _ => PREC_ATOM,
        }
    }

    pub fn as_lit(&self) -> Option<&Lit> {
        match self {
            Expr::Lit(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&QualifiedName> {
        match self {
            Expr::Name(name) => Some(name),
            _ => None,
        }
    }
}

impl QualifiedName {
    /// The identifier of a name with a single, unindexed segment.
    pub fn as_ident(&self) -> Option<&Ident> {
        match self.segments.as_slice() {
            [NameSegment::Name {
                ident,
                index: None,
                ..
            }] => Some(ident),
            _ => None,
        }
    }
}

// # Spanning

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Lit(lit) => lit.span,
            Expr::Name(name) => name.span,
            Expr::Call(call) => call.span,
            Expr::Unary(unary) => unary.span,
            Expr::Binary(binary) => binary.span,
            Expr::Ternary(ternary) => ternary.span,
            Expr::Object(object) => object.span,
            Expr::Array(array) => array.span,
            Expr::Exists(op) | Expr::Sizeof(op) | Expr::Index(op) | Expr::Typename(op) => op.span,
        }
    }
}

impl Spanned for QualifiedName {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for NameSegment {
    fn span(&self) -> Span {
        match self {
            NameSegment::Name { span, .. } => *span,
            NameSegment::This(span) | NameSegment::Parent(span) => *span,
        }
    }
}

impl Spanned for ObjectKey {
    fn span(&self) -> Span {
        match self {
            ObjectKey::Name(ident) => ident.span,
            ObjectKey::Lit { span, .. } => *span,
        }
    }
}

// # Parse

impl Parse for Expr {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        parse_expr_with(input, Restrictions::NONE)
    }
}

impl Parse for QualifiedName {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        parse_qualified_name(input)
    }
}

impl Parse for ObjectEntry {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let key = primary::parse_object_key(input)?;
        Colon::parse(input)?;
        let value = Expr::parse(input)?;
        Ok(ObjectEntry { key, value })
    }
}

pub(crate) fn parse_expr_with(input: ParseStream<'_>, restr: Restrictions) -> Result<Expr> {
    parse_expr_bp(input, 0, restr)
}

///
/// The precedence climbing loop. Operators binding weaker than
/// `min_bp` are left to the caller.
///
fn parse_expr_bp(input: ParseStream<'_>, min_bp: u8, restr: Restrictions) -> Result<Expr> {
    let mut lhs = parse_unary(input, restr)?;

    loop {
        if input.peek_is(&TokenKind::Question) {
            if PREC_TERNARY * 2 < min_bp {
                break;
            }
            input.ts.bump();

            let then = parse_expr_bp(input, 0, restr)?;
            Colon::parse(input)?;
            let otherwise = parse_expr_bp(input, PREC_TERNARY * 2, restr)?;

            lhs = Expr::Ternary(TernaryExpr {
                span: Span::fromto(lhs.span(), otherwise.span()),
                cond: Box::new(lhs),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            });
            continue;
        }

        let Some(op) = input.peek_kind().and_then(BinOp::from_token) else {
            break;
        };
        if restr.no_gt && op == BinOp::Gt {
            break;
        }

        let (l_bp, r_bp) = op.binding_power();
        if l_bp < min_bp {
            break;
        }
        input.ts.bump();

        let rhs = parse_expr_bp(input, r_bp, restr)?;
        lhs = Expr::Binary(BinaryExpr {
            span: Span::fromto(lhs.span(), rhs.span()),
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        });
    }

    Ok(lhs)
}

fn parse_unary(input: ParseStream<'_>, restr: Restrictions) -> Result<Expr> {
    if let Some(op) = input.peek_kind().and_then(UnaryOp::from_token) {
        let start = input.peek_span();
        input.ts.bump();

        let expr = parse_unary(input, restr)?;
        return Ok(Expr::Unary(UnaryExpr {
            op,
            span: Span::fromto(start, expr.span()),
            expr: Box::new(expr),
        }));
    }

    primary::parse_postfix(input, restr)
}
