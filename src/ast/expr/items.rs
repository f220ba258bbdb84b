use crate::{
    ast::{
        parse::*, CommentBlock, Import, Keyword, Package, PropertyDecl, PropertyStmt, TokenKind,
        TypeDecl,
    },
    error::Result,
    Span,
};
use serde::Serialize;

///
/// The root of the tree of one source unit.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NedFile {
    pub items: Vec<Item>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Item {
    Package(Package),
    Import(Import),
    PropertyDecl(PropertyDecl),
    Property(PropertyStmt),
    Type(TypeDecl),
    /// A stray `;`.
    Empty(Span),
    /// A comment block not attached to any item.
    Comment(CommentBlock),
    Error(ErrorNode),
}

impl NedFile {
    pub fn package(&self) -> Option<&Package> {
        self.items.iter().find_map(|item| match item {
            Item::Package(package) => Some(package),
            _ => None,
        })
    }

    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(import) => Some(import),
            _ => None,
        })
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Type(decl) => Some(decl),
            _ => None,
        })
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types().find(|decl| decl.name == name)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ErrorNode> {
        self.items.iter().filter_map(|item| match item {
            Item::Error(node) => Some(node),
            _ => None,
        })
    }
}

impl Parse for NedFile {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut items = Vec::new();

        while !input.ts.is_empty() {
            if input.ectx.limit_reached() {
                while !input.ts.is_empty() {
                    input.ts.bump();
                }
                break;
            }

            items.extend(input.detached_comments().into_iter().map(Item::Comment));

            let state = input.ts.state();
            match Item::parse(input) {
                Ok(item) => items.push(item),
                Err(e) => {
                    let node = input.recover(state, e, SyncPoint::File)?;
                    items.push(Item::Error(node));
                }
            }
        }

        // comments after the last item
        if let Some(trivia) = input.trivia() {
            items.extend(trivia.blocks.iter().cloned().map(Item::Comment));
        }

        Ok(NedFile {
            items,
            span: input.asset.span(0, input.asset.source().len()),
        })
    }
}

impl Parse for Item {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        match input.peek_kind() {
            Some(TokenKind::Semi) => {
                let span = input.peek_span();
                input.ts.bump();
                Ok(Item::Empty(span))
            }
            Some(TokenKind::Annotation(_)) => PropertyStmt::parse(input).map(Item::Property),
            Some(TokenKind::Keyword(Keyword::Package)) => Package::parse(input).map(Item::Package),
            Some(TokenKind::Keyword(Keyword::Import)) => Import::parse(input).map(Item::Import),
            Some(TokenKind::Keyword(Keyword::Property)) => {
                PropertyDecl::parse(input).map(Item::PropertyDecl)
            }
            Some(TokenKind::Keyword(kw)) if kw.is_declaration() => {
                TypeDecl::parse(input).map(Item::Type)
            }
            _ => Err(input.expected("declaration")),
        }
    }
}

impl Spanned for Item {
    fn span(&self) -> Span {
        match self {
            Item::Package(package) => package.span,
            Item::Import(import) => import.span,
            Item::PropertyDecl(decl) => decl.span,
            Item::Property(stmt) => stmt.span,
            Item::Type(decl) => decl.span,
            Item::Empty(span) => *span,
            Item::Comment(block) => block.span,
            Item::Error(node) => node.span,
        }
    }
}

impl Spanned for NedFile {
    fn span(&self) -> Span {
        self.span
    }
}
