use super::*;
use crate::ast::{
    Inheritance, Item, NedFile, Property, PropertyDecl, SectionKind, TypeDecl, TypeItem,
    TypeKind,
};

impl Validate for NedFile {
    fn validate(&self, errors: &mut ErrorsMut) {
        self.items.validate(errors)
    }
}

impl Validate for Item {
    fn validate(&self, errors: &mut ErrorsMut) {
        match self {
            Item::PropertyDecl(decl) => decl.validate(errors),
            Item::Property(stmt) => stmt.property.validate(errors),
            Item::Type(decl) => decl.validate(errors),
            Item::Package(_) | Item::Import(_) | Item::Empty(_) => {}
            Item::Comment(_) | Item::Error(_) => {}
        }
    }
}

impl Validate for TypeItem {
    fn validate(&self, errors: &mut ErrorsMut) {
        match self {
            TypeItem::Type(decl) => decl.validate(errors),
            TypeItem::PropertyDecl(decl) => decl.validate(errors),
            TypeItem::Empty(_) | TypeItem::Error(_) => {}
        }
    }
}

impl Validate for PropertyDecl {
    fn validate(&self, errors: &mut ErrorsMut) {
        self.properties.validate(errors)
    }
}

impl Validate for TypeDecl {
    fn validate(&self, errors: &mut ErrorsMut) {
        if let Inheritance::BareExtends(span) = self.inheritance {
            errors.add(
                Error::new(
                    ErrorKind::BareExtends,
                    format!("{} '{}' extends nothing", self.kind, self.name),
                    span,
                )
                .add_hints(ErrorHint::Help(
                    "name a base type after 'extends' or remove it".to_string(),
                )),
            );
        }

        let allowed: &[SectionKind] = match self.kind {
            TypeKind::Channel | TypeKind::ChannelInterface | TypeKind::ModuleInterface => {
                &[SectionKind::Parameters, SectionKind::Gates]
            }
            TypeKind::Simple | TypeKind::Module | TypeKind::Network => &[
                SectionKind::Parameters,
                SectionKind::Gates,
                SectionKind::Types,
                SectionKind::Submodules,
                SectionKind::Connections,
            ],
        };
        let owner = format!("{} '{}'", self.kind, self.name);
        module::check_sections(&self.body, allowed, &owner, errors);

        self.body.validate(errors);
    }
}

impl Validate for Property {
    fn validate(&self, errors: &mut ErrorsMut) {
        if let Some(tags) = &self.tags {
            if tags.is_empty() {
                errors.add(Error::new(
                    ErrorKind::EmptyPropertyTags,
                    format!("property '@{}' has an empty tag list", self.name),
                    tags.span,
                ));
            }
        }
    }
}
