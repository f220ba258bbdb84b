use crate::{
    ast::{
        parse::*, parse_inline_properties, CommentBlock, Delimiter, Keyword, Property, Semi,
        TokenTree,
    },
    error::{Error, ErrorKind, Result},
    Span,
};
use serde::Serialize;

///
/// A property used as a statement, e.g. `@namespace(inet);` at file
/// level or `@display("i=block/app");` inside a parameters section.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyStmt {
    pub property: Property,
    pub doc: Option<CommentBlock>,
    pub span: Span,
}

///
/// `property @statistic[](source; record);`
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    /// Declared with `[]`, allowing indexed uses.
    pub is_array: bool,
    /// The accepted keys, if a key list was given.
    pub keys: Option<Vec<String>>,
    pub properties: Vec<Property>,
    pub doc: Option<CommentBlock>,
    pub span: Span,
}

impl Parse for PropertyStmt {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let property = Property::parse(input)?;
        let semi = Semi::parse(input)?;
        Ok(PropertyStmt {
            span: Span::fromto(property.span, semi.span),
            property,
            doc,
        })
    }
}

impl Parse for PropertyDecl {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let doc = input.doc();
        let Some(start) = input.eat_keyword(Keyword::Property) else {
            return Err(input.expected("keyword 'property'"));
        };

        let header = Property::parse(input)?;
        if let Some(index) = &header.index {
            return Err(Error::new(
                ErrorKind::UnexpectedToken,
                format!("property declarations take '[]' only, found '[{}]'", index),
                header.span,
            ));
        }

        // "@name[]" is not an indexed property name, the group stays separate
        let mut is_array = false;
        if let Some(TokenTree::Delimited(span, Delimiter::Bracket, inner)) = input.ts.peek() {
            if !inner.is_empty() {
                return Err(Error::new(
                    ErrorKind::UnexpectedToken,
                    "property declarations take '[]' only",
                    Span::fromto(span.open, span.close),
                ));
            }
            is_array = true;
            input.ts.bump();
        }

        let mut keys = header
            .tags
            .as_ref()
            .map(|tags| tags.tags.iter().map(|t| t.to_string()).collect::<Vec<_>>());

        if keys.is_none() && input.peek_delim() == Some(Delimiter::Parenthesis) {
            if let Some(TokenTree::Delimited(span, _, _)) = input.ts.peek() {
                let text = input.asset.slice_for(Span::fromto(span.open, span.close));
                let text = &text[1..text.len() - 1];
                keys = Some(
                    text.split(';')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            input.ts.bump();
        }

        let properties = parse_inline_properties(input)?;
        let semi = Semi::parse(input)?;

        Ok(PropertyDecl {
            name: header.name,
            is_array,
            keys,
            properties,
            doc,
            span: Span::fromto(start, semi.span),
        })
    }
}

impl Spanned for PropertyStmt {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for PropertyDecl {
    fn span(&self) -> Span {
        self.span
    }
}
