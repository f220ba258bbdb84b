use super::*;
use crate::ast::{
    Body, ChannelSpec, Connection, ConnectionItem, Gate, GateItem, GateRef, ParamItem, Parameter,
    Section, SectionKind, Submodule, SubmoduleItem,
};

///
/// Reports every section of `body` whose kind is not in `allowed`.
///
pub(super) fn check_sections(
    body: &Body,
    allowed: &[SectionKind],
    owner: &str,
    errors: &mut ErrorsMut,
) {
    for section in body.sections.iter() {
        let kind = section.kind();
        if !allowed.contains(&kind) {
            errors.add(
                Error::new(
                    ErrorKind::SectionNotAllowed,
                    format!(
                        "'{}' section is not allowed in {}",
                        kind.as_str(),
                        owner
                    ),
                    section.keyword_span(),
                )
                .add_hints(ErrorHint::Note(format!(
                    "{} may only contain {}",
                    owner,
                    allowed
                        .iter()
                        .map(|k| k.as_str())
                        .collect::<Vec<_>>()
                        .join(" and ")
                ))),
            );
        }
    }
}

impl Validate for Body {
    fn validate(&self, errors: &mut ErrorsMut) {
        for section in self.sections.iter() {
            match section {
                Section::Parameters(s) => s.items.validate(errors),
                Section::Gates(s) => s.items.validate(errors),
                Section::Types(s) => s.items.validate(errors),
                Section::Submodules(s) => s.items.validate(errors),
                Section::Connections(s) => s.items.validate(errors),
            }
        }
    }
}

impl Validate for ParamItem {
    fn validate(&self, errors: &mut ErrorsMut) {
        match self {
            ParamItem::Param(param) => param.validate(errors),
            ParamItem::Property(stmt) => stmt.property.validate(errors),
            ParamItem::Error(_) => {}
        }
    }
}

impl Validate for Parameter {
    fn validate(&self, errors: &mut ErrorsMut) {
        self.properties.validate(errors);
        self.value_properties.validate(errors);
    }
}

impl Validate for GateItem {
    fn validate(&self, errors: &mut ErrorsMut) {
        if let GateItem::Gate(gate) = self {
            gate.validate(errors)
        }
    }
}

impl Validate for Gate {
    fn validate(&self, errors: &mut ErrorsMut) {
        self.properties.validate(errors)
    }
}

impl Validate for SubmoduleItem {
    fn validate(&self, errors: &mut ErrorsMut) {
        if let SubmoduleItem::Submodule(submodule) = self {
            submodule.validate(errors)
        }
    }
}

impl Validate for Submodule {
    fn validate(&self, errors: &mut ErrorsMut) {
        if let Some(body) = &self.body {
            let owner = format!("submodule '{}'", self.name);
            check_sections(
                body,
                &[SectionKind::Parameters, SectionKind::Gates],
                &owner,
                errors,
            );
            body.validate(errors);
        }
    }
}

impl Validate for ConnectionItem {
    fn validate(&self, errors: &mut ErrorsMut) {
        match self {
            ConnectionItem::Connection(conn) => conn.validate(errors),
            ConnectionItem::Group(group) => group.items.validate(errors),
            ConnectionItem::Error(_) => {}
        }
    }
}

impl Validate for Connection {
    fn validate(&self, errors: &mut ErrorsMut) {
        self.lhs.validate(errors);
        self.rhs.validate(errors);
        if let Some(channel) = &self.channel {
            channel.validate(errors)
        }
    }
}

impl Validate for GateRef {
    fn validate(&self, errors: &mut ErrorsMut) {
        let gate = &self.gate;
        if gate.index.is_some() && gate.subgate_index.is_some() {
            errors.add(
                Error::new(
                    ErrorKind::AmbiguousGateIndex,
                    format!("gate '{}' is indexed twice", gate.name),
                    gate.span,
                )
                .add_hints(ErrorHint::Help(format!(
                    "index either '{}' or its subgate",
                    gate.name
                ))),
            );
        }
        if gate.plusplus && gate.is_indexed() {
            errors.add(Error::new(
                ErrorKind::AmbiguousGateIndex,
                format!("gate '{}' is both indexed and extended with '++'", gate.name),
                gate.span,
            ));
        }
    }
}

impl Validate for ChannelSpec {
    fn validate(&self, errors: &mut ErrorsMut) {
        if let Some(body) = &self.body {
            check_sections(body, &[SectionKind::Parameters], "a channel spec", errors);
            body.validate(errors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{NedFile, Parse, ParseBuffer, TokenStream},
        SourceMap,
    };

    fn validate(raw: &str) -> Vec<Error> {
        let mut smap = SourceMap::new();
        let asset = smap.load_raw("raw:validate", raw);
        let ts = TokenStream::new(asset).unwrap();
        let buf = ParseBuffer::new(asset, ts);

        let file = NedFile::parse(&buf).unwrap();
        let mut errors = Errors::new().as_mut();
        file.validate(&mut errors);
        errors.into_inner().into_vec()
    }

    #[test]
    fn submodule_bodies() {
        // # Case 0
        let errors = validate(
            "network N { submodules: a: A { parameters: x = 1; gates: g[2]; } }",
        );
        assert!(errors.is_empty());

        // # Case 1
        let errors = validate("network N { submodules: a: A { submodules: b: B; } }");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "'submodules' section is not allowed in submodule 'a'"
        );
    }

    #[test]
    fn channel_spec_bodies() {
        // # Case 0
        let errors = validate("network N { connections: a.o --> { delay = 1ms; } --> b.i; }");
        assert!(errors.is_empty());

        // # Case 1
        let errors = validate(
            "network N { connections: for i=0..1 { a.o --> C { gates: input x; } --> b.i; } }",
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::SectionNotAllowed);
        assert_eq!(
            errors[0].hints,
            vec![ErrorHint::Note(
                "a channel spec may only contain parameters".to_string()
            )]
        );
    }

    #[test]
    fn nested_types_are_checked() {
        let errors = validate("module M { types: channel C { connections: } }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "'connections' section is not allowed in channel 'C'");
    }

    #[test]
    fn gate_indices() {
        // # Case 0
        let errors = validate("module M { connections: a[0]$i --> b$o[1]; c.g++ --> d.g$i++; }");
        assert!(errors.is_empty());

        // # Case 1
        let errors = validate("module M { connections: a[0]++ --> b++; }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::AmbiguousGateIndex);
        assert!(errors[0].is_warning());
        assert_eq!(
            errors[0].message,
            "gate 'a' is both indexed and extended with '++'"
        );

        // # Case 2
        let errors = validate("module M { connections: a[0]$i[1] --> b; }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "gate 'a' is indexed twice");
        assert_eq!(
            errors[0].hints,
            vec![ErrorHint::Help("index either 'a' or its subgate".to_string())]
        );
    }
}
