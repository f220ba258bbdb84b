use crate::{
    ast::{
        parse::*, Body, CommentBlock, DottedName, Ident, Keyword, ParamItem, Property,
        PropertyDecl, TokenKind,
    },
    error::{Error, ErrorHint, ErrorKind, Result},
    Span,
};
use serde::Serialize;
use std::fmt;

///
/// A type declaration: a channel, a module or network, or an interface.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: Ident,
    pub inheritance: Inheritance,
    pub body: Body,
    pub doc: Option<CommentBlock>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    Channel,
    ChannelInterface,
    Simple,
    Module,
    Network,
    ModuleInterface,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Inheritance {
    None,
    /// `extends` without a base type.
    BareExtends(Span),
    Extends(DottedName),
    Like(Vec<DottedName>),
    ExtendsLike {
        extends: DottedName,
        like: Vec<DottedName>,
    },
    /// The base interfaces of an interface declaration.
    Interfaces(Vec<DottedName>),
}

///
/// An entry of a `types:` section.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeItem {
    Type(TypeDecl),
    PropertyDecl(PropertyDecl),
    Empty(Span),
    Error(ErrorNode),
}

impl TypeKind {
    pub fn from_keyword(kw: Keyword) -> Option<TypeKind> {
        Some(match kw {
            Keyword::Channel => TypeKind::Channel,
            Keyword::ChannelInterface => TypeKind::ChannelInterface,
            Keyword::Simple => TypeKind::Simple,
            Keyword::Module => TypeKind::Module,
            Keyword::Network => TypeKind::Network,
            Keyword::ModuleInterface => TypeKind::ModuleInterface,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Channel => "channel",
            TypeKind::ChannelInterface => "channelinterface",
            TypeKind::Simple => "simple",
            TypeKind::Module => "module",
            TypeKind::Network => "network",
            TypeKind::ModuleInterface => "moduleinterface",
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, TypeKind::ChannelInterface | TypeKind::ModuleInterface)
    }

    pub fn is_channel(&self) -> bool {
        matches!(self, TypeKind::Channel | TypeKind::ChannelInterface)
    }
}

impl TypeDecl {
    /// The base type, or the base interfaces of an interface.
    pub fn extends(&self) -> Vec<&DottedName> {
        self.inheritance.extends()
    }

    /// The interfaces this type implements.
    pub fn like(&self) -> &[DottedName] {
        self.inheritance.like()
    }

    ///
    /// The properties of this type, given as property statements in
    /// its parameters sections.
    ///
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.body.parameters().filter_map(|item| match item {
            ParamItem::Property(stmt) => Some(&stmt.property),
            _ => None,
        })
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties().find(|p| p.name == name)
    }
}

impl Inheritance {
    /// The base type or base interfaces.
    pub fn extends(&self) -> Vec<&DottedName> {
        match self {
            Inheritance::Extends(name) | Inheritance::ExtendsLike { extends: name, .. } => {
                vec![name]
            }
            Inheritance::Interfaces(names) => names.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// The implemented interfaces.
    pub fn like(&self) -> &[DottedName] {
        match self {
            Inheritance::Like(names) | Inheritance::ExtendsLike { like: names, .. } => names,
            _ => &[],
        }
    }
}

fn parse_name_list(input: ParseStream<'_>) -> Result<Vec<DottedName>> {
    let mut names = vec![DottedName::parse(input)?];
    while input.eat(&TokenKind::Comma).is_some() {
        names.push(DottedName::parse(input)?);
    }
    Ok(names)
}

fn parse_inheritance(input: ParseStream<'_>, kind: TypeKind) -> Result<Inheritance> {
    if kind.is_interface() {
        if let Some(span) = input.eat_keyword(Keyword::Like) {
            return Err(Error::new(
                ErrorKind::InvalidInheritance,
                format!("a {} cannot implement interfaces", kind.as_str()),
                span,
            )
            .add_hints(ErrorHint::Help(
                "use 'extends' to inherit from other interfaces".to_string(),
            )));
        }
        return if input.eat_keyword(Keyword::Extends).is_some() {
            parse_name_list(input).map(Inheritance::Interfaces)
        } else {
            Ok(Inheritance::None)
        };
    }

    if let Some(span) = input.eat_keyword(Keyword::Extends) {
        if !input.peek_ident() {
            return Ok(Inheritance::BareExtends(span));
        }
        let extends = DottedName::parse(input)?;
        if input.eat_keyword(Keyword::Like).is_some() {
            let like = parse_name_list(input)?;
            return Ok(Inheritance::ExtendsLike { extends, like });
        }
        return Ok(Inheritance::Extends(extends));
    }

    if input.eat_keyword(Keyword::Like).is_some() {
        return parse_name_list(input).map(Inheritance::Like);
    }
    Ok(Inheritance::None)
}

impl Parse for TypeDecl {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let kind = match input.peek_kind() {
            Some(TokenKind::Keyword(kw)) => TypeKind::from_keyword(*kw),
            _ => None,
        };
        let Some(kind) = kind else {
            return Err(input.expected("type declaration"));
        };
        let start = input.peek_span();
        input.ts.bump();

        let name = Ident::parse(input)?;
        let inheritance = parse_inheritance(input, kind)?;
        let body = Body::parse(input)?;

        Ok(TypeDecl {
            span: Span::fromto(start, body.span),
            kind,
            name,
            inheritance,
            body,
            doc,
        })
    }
}

impl Parse for TypeItem {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if let Some(span) = input.eat(&TokenKind::Semi) {
            return Ok(TypeItem::Empty(span));
        }
        if input.peek_keyword(Keyword::Property) {
            return PropertyDecl::parse(input).map(TypeItem::PropertyDecl);
        }
        TypeDecl::parse(input).map(TypeItem::Type)
    }
}

impl Spanned for TypeDecl {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for TypeItem {
    fn span(&self) -> Span {
        match self {
            TypeItem::Type(decl) => decl.span,
            TypeItem::PropertyDecl(decl) => decl.span,
            TypeItem::Empty(span) => *span,
            TypeItem::Error(node) => node.span,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Inheritance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, names: &[DottedName]) -> fmt::Result {
            for (i, name) in names.iter().enumerate() {
                if i != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", name)?;
            }
            Ok(())
        }

        match self {
            Inheritance::None => Ok(()),
            Inheritance::BareExtends(_) => write!(f, "extends"),
            Inheritance::Extends(name) => write!(f, "extends {}", name),
            Inheritance::Like(names) => {
                write!(f, "like ")?;
                list(f, names)
            }
            Inheritance::ExtendsLike { extends, like } => {
                write!(f, "extends {} like ", extends)?;
                list(f, like)
            }
            Inheritance::Interfaces(names) => {
                write!(f, "extends ")?;
                list(f, names)
            }
        }
    }
}
