use crate::{
    ast::{
        parse::*, parse_inline_properties, Comment, CommentBlock, Delimited, Delimiter, Expr,
        Ident, Keyword, Pattern, Property, PropertyStmt, Semi, TokenKind,
    },
    error::{Error, ErrorHint, ErrorKind, Result},
    Span,
};
use serde::Serialize;
use std::fmt;

///
/// A parameter declaration or assignment, e.g. `volatile double delay @unit(s) = 1s;`
/// or `**.app.typename = "Sink";`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub kind: ParamKind,
    /// Properties between the name and the value.
    pub properties: Vec<Property>,
    pub value: Option<ParamValue>,
    /// Properties after the value.
    pub value_properties: Vec<Property>,
    pub doc: Option<CommentBlock>,
    pub trailing: Option<Comment>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParamKind {
    Typed {
        volatile: bool,
        ty: ParamType,
        name: Ident,
    },
    /// Assignment to a parameter declared elsewhere, `name = value`.
    Untyped { name: Ident },
    Pattern(Pattern),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParamType {
    Double,
    Int,
    String,
    Bool,
    Object,
    Xml,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParamValue {
    Expr(Expr),
    /// `default` or `default(expr)`
    Default { expr: Option<Expr>, span: Span },
    Ask(Span),
}

///
/// An entry of a parameters section.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParamItem {
    Param(Parameter),
    Property(PropertyStmt),
    Error(ErrorNode),
}

impl Parameter {
    /// The declared or assigned name. Patterns have none.
    pub fn name(&self) -> Option<&Ident> {
        match &self.kind {
            ParamKind::Typed { name, .. } | ParamKind::Untyped { name } => Some(name),
            ParamKind::Pattern(_) => None,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self.kind, ParamKind::Pattern(_))
    }
}

impl ParamType {
    pub fn from_keyword(kw: Keyword) -> Option<ParamType> {
        Some(match kw {
            Keyword::Double => ParamType::Double,
            Keyword::Int => ParamType::Int,
            Keyword::String => ParamType::String,
            Keyword::Bool => ParamType::Bool,
            Keyword::Object => ParamType::Object,
            Keyword::Xml => ParamType::Xml,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Double => "double",
            ParamType::Int => "int",
            ParamType::String => "string",
            ParamType::Bool => "bool",
            ParamType::Object => "object",
            ParamType::Xml => "xml",
        }
    }
}

impl Parse for Parameter {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let start = input.peek_span();

        let volatile = input.eat_keyword(Keyword::Volatile).is_some();
        let ty = match input.peek_kind() {
            Some(TokenKind::Keyword(kw)) => ParamType::from_keyword(*kw),
            _ => None,
        };

        let kind = if let Some(ty) = ty {
            input.ts.bump();
            let name = Ident::parse(input)?;
            ParamKind::Typed { volatile, ty, name }
        } else if volatile {
            return Err(input.expected("parameter type"));
        } else if input.peek_ident() && ends_untyped_name(input) {
            ParamKind::Untyped {
                name: Ident::parse(input)?,
            }
        } else {
            ParamKind::Pattern(Pattern::parse(input)?)
        };

        let properties = parse_inline_properties(input)?;
        let (value, value_properties) = if input.eat(&TokenKind::Assign).is_some() {
            let value = parse_param_value(input)?;
            (Some(value), parse_inline_properties(input)?)
        } else {
            (None, Vec::new())
        };

        if let (ParamKind::Pattern(pattern), None) = (&kind, &value) {
            return Err(Error::new(
                ErrorKind::MissingParamValue,
                format!("pattern '{}' must be assigned a value", pattern),
                pattern.span,
            )
            .add_hints(ErrorHint::Help(
                "patterns only assign values, e.g. '**.x = 1'".to_string(),
            )));
        }

        let semi = Semi::parse(input)?;
        let trailing = input.trailing();

        Ok(Parameter {
            kind,
            properties,
            value,
            value_properties,
            doc,
            trailing,
            span: Span::fromto(start, semi.span),
        })
    }
}

fn ends_untyped_name(input: ParseStream<'_>) -> bool {
    input.ts.peek_nth(1).is_none()
        || matches!(
            input.peek_nth_kind(1),
            Some(TokenKind::Assign | TokenKind::Semi | TokenKind::Annotation(_))
        )
}

fn parse_param_value(input: ParseStream<'_>) -> Result<ParamValue> {
    if let Some(span) = input.eat_keyword(Keyword::Default) {
        if input.peek_delim() == Some(Delimiter::Parenthesis) {
            let delim = Delimited::<Expr>::parse_from(Delimiter::Parenthesis, input)?;
            return Ok(ParamValue::Default {
                span: Span::fromto(span, delim.delim_span.close),
                expr: Some(delim.inner),
            });
        }
        return Ok(ParamValue::Default { expr: None, span });
    }
    if let Some(span) = input.eat_keyword(Keyword::Ask) {
        return Ok(ParamValue::Ask(span));
    }
    Expr::parse(input).map(ParamValue::Expr)
}

impl Parse for ParamItem {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if matches!(input.peek_kind(), Some(TokenKind::Annotation(_))) {
            PropertyStmt::parse(input).map(ParamItem::Property)
        } else {
            Parameter::parse(input).map(ParamItem::Param)
        }
    }
}

impl Spanned for Parameter {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for ParamItem {
    fn span(&self) -> Span {
        match self {
            ParamItem::Param(param) => param.span,
            ParamItem::Property(prop) => prop.span,
            ParamItem::Error(node) => node.span,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Expr(expr) => write!(f, "{}", expr),
            ParamValue::Default { expr: None, .. } => write!(f, "default"),
            ParamValue::Default {
                expr: Some(expr), ..
            } => write!(f, "default({})", expr),
            ParamValue::Ask(_) => write!(f, "ask"),
        }
    }
}
