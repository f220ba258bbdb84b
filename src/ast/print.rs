use crate::ast::{
    Body, ChannelSpec, Comment, CommentBlock, Connection, ConnectionGroup, ConnectionItem, Gate,
    GateItem, GateSize, Import, Item, NedFile, Package, ParamItem, ParamKind, Parameter, Property,
    PropertyDecl, PropertyStmt, Section, Submodule, SubmoduleItem, TypeDecl, TypeItem,
};
use std::fmt::{self, Display, Write};

const INDENT: &str = "    ";

///
/// Writes canonical source text, one item per line.
///
struct Printer<'a> {
    out: &'a mut dyn Write,
    indent: usize,
}

impl<'a> Printer<'a> {
    fn new(out: &'a mut dyn Write) -> Self {
        Self { out, indent: 0 }
    }

    fn line(&mut self, text: impl Display) -> fmt::Result {
        for _ in 0..self.indent {
            self.out.write_str(INDENT)?;
        }
        writeln!(self.out, "{}", text)
    }

    fn line_with_trailing(&mut self, text: impl Display, trailing: &Option<Comment>) -> fmt::Result {
        match trailing {
            Some(comment) => self.line(format_args!("{} {}", text, comment.text)),
            None => self.line(text),
        }
    }

    fn doc(&mut self, doc: &Option<CommentBlock>) -> fmt::Result {
        if let Some(doc) = doc {
            self.comment(doc)?;
        }
        Ok(())
    }

    fn comment(&mut self, block: &CommentBlock) -> fmt::Result {
        for line in &block.lines {
            self.line(&line.text)?;
        }
        Ok(())
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self) -> fmt::Result) -> fmt::Result {
        self.indent += 1;
        let result = f(self);
        self.indent -= 1;
        result
    }

    fn file(&mut self, file: &NedFile) -> fmt::Result {
        let mut prev: Option<&Item> = None;
        for item in &file.items {
            let compact = matches!(
                (prev, item),
                (Some(Item::Import(_)), Item::Import(_))
                    | (Some(Item::Property(_)), Item::Property(_))
            );
            if prev.is_some() && !compact {
                writeln!(self.out)?;
            }
            self.item(item)?;
            prev = Some(item);
        }
        Ok(())
    }

    fn item(&mut self, item: &Item) -> fmt::Result {
        match item {
            Item::Package(package) => {
                self.doc(&package.doc)?;
                self.line(package)
            }
            Item::Import(import) => {
                self.doc(&import.doc)?;
                self.line(import)
            }
            Item::PropertyDecl(decl) => {
                self.doc(&decl.doc)?;
                self.line(decl)
            }
            Item::Property(stmt) => {
                self.doc(&stmt.doc)?;
                self.line(stmt)
            }
            Item::Type(decl) => self.type_decl(decl),
            Item::Empty(_) => self.line(";"),
            Item::Comment(block) => self.comment(block),
            Item::Error(node) => self.line(format_args!("// error: {}", node.message)),
        }
    }

    fn type_decl(&mut self, decl: &TypeDecl) -> fmt::Result {
        self.doc(&decl.doc)?;
        let inheritance = decl.inheritance.to_string();
        if inheritance.is_empty() {
            self.line(format_args!("{} {}", decl.kind, decl.name))?;
        } else {
            self.line(format_args!("{} {} {}", decl.kind, decl.name, inheritance))?;
        }
        self.line("{")?;
        self.nested(|p| p.sections(&decl.body))?;
        self.line("}")
    }

    fn sections(&mut self, body: &Body) -> fmt::Result {
        for section in &body.sections {
            match section {
                Section::Parameters(s) => match s.keyword {
                    Some(_) => {
                        self.line("parameters:")?;
                        self.nested(|p| s.items.iter().try_for_each(|i| p.param_item(i)))?;
                    }
                    None => s.items.iter().try_for_each(|i| self.param_item(i))?,
                },
                Section::Gates(s) => {
                    self.line("gates:")?;
                    self.nested(|p| s.items.iter().try_for_each(|i| p.gate_item(i)))?;
                }
                Section::Types(s) => {
                    self.line("types:")?;
                    self.nested(|p| s.items.iter().try_for_each(|i| p.type_item(i)))?;
                }
                Section::Submodules(s) => {
                    self.line("submodules:")?;
                    self.nested(|p| s.items.iter().try_for_each(|i| p.submodule_item(i)))?;
                }
                Section::Connections(s) => {
                    if s.allow_unconnected {
                        self.line("connections allowunconnected:")?;
                    } else {
                        self.line("connections:")?;
                    }
                    self.nested(|p| s.items.iter().try_for_each(|i| p.connection_item(i)))?;
                }
            }
        }
        Ok(())
    }

    fn param_item(&mut self, item: &ParamItem) -> fmt::Result {
        match item {
            ParamItem::Param(param) => {
                self.doc(&param.doc)?;
                self.line_with_trailing(param, &param.trailing)
            }
            ParamItem::Property(stmt) => {
                self.doc(&stmt.doc)?;
                self.line(stmt)
            }
            ParamItem::Error(node) => self.line(format_args!("// error: {}", node.message)),
        }
    }

    fn gate_item(&mut self, item: &GateItem) -> fmt::Result {
        match item {
            GateItem::Gate(gate) => {
                self.doc(&gate.doc)?;
                self.line_with_trailing(gate, &gate.trailing)
            }
            GateItem::Error(node) => self.line(format_args!("// error: {}", node.message)),
        }
    }

    fn type_item(&mut self, item: &TypeItem) -> fmt::Result {
        match item {
            TypeItem::Type(decl) => self.type_decl(decl),
            TypeItem::PropertyDecl(decl) => {
                self.doc(&decl.doc)?;
                self.line(decl)
            }
            TypeItem::Empty(_) => self.line(";"),
            TypeItem::Error(node) => self.line(format_args!("// error: {}", node.message)),
        }
    }

    fn submodule_item(&mut self, item: &SubmoduleItem) -> fmt::Result {
        match item {
            SubmoduleItem::Submodule(submodule) => self.submodule(submodule),
            SubmoduleItem::Error(node) => self.line(format_args!("// error: {}", node.message)),
        }
    }

    fn submodule(&mut self, submodule: &Submodule) -> fmt::Result {
        self.doc(&submodule.doc)?;
        let header = SubmoduleHeader(submodule);
        match &submodule.body {
            None => self.line_with_trailing(format_args!("{};", header), &submodule.trailing),
            Some(body) => {
                self.line(format_args!("{} {{", header))?;
                self.nested(|p| p.sections(body))?;
                self.line_with_trailing("}", &submodule.trailing)
            }
        }
    }

    fn connection_item(&mut self, item: &ConnectionItem) -> fmt::Result {
        match item {
            ConnectionItem::Connection(conn) => {
                self.doc(&conn.doc)?;
                self.line_with_trailing(conn, &conn.trailing)
            }
            ConnectionItem::Group(group) => self.group(group),
            ConnectionItem::Error(node) => self.line(format_args!("// error: {}", node.message)),
        }
    }

    fn group(&mut self, group: &ConnectionGroup) -> fmt::Result {
        self.doc(&group.doc)?;
        self.line(format_args!("{} {{", group.header))?;
        self.nested(|p| group.items.iter().try_for_each(|i| p.connection_item(i)))?;
        self.line("}")
    }
}

/// The part of a submodule before its body or `;`.
struct SubmoduleHeader<'a>(&'a Submodule);

impl Display for SubmoduleHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let submodule = self.0;
        write!(f, "{}", submodule.name)?;
        if let Some(size) = &submodule.size {
            write!(f, "[{}]", size)?;
        }
        write!(f, ": {}", submodule.ty)?;
        if let Some(cond) = &submodule.condition {
            write!(f, " if {}", cond)?;
        }
        Ok(())
    }
}

/// A body printed on a single line, as used in channel specs.
struct InlineBody<'a>(&'a Body);

impl Display for InlineBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for section in &self.0.sections {
            match section {
                Section::Parameters(s) => {
                    if s.keyword.is_some() {
                        write!(f, " parameters:")?;
                    }
                    for item in &s.items {
                        match item {
                            ParamItem::Param(param) => write!(f, " {}", param)?,
                            ParamItem::Property(stmt) => write!(f, " {}", stmt)?,
                            ParamItem::Error(_) => {}
                        }
                    }
                }
                Section::Gates(s) => {
                    write!(f, " gates:")?;
                    for item in &s.items {
                        if let GateItem::Gate(gate) = item {
                            write!(f, " {}", gate)?;
                        }
                    }
                }
                // other sections carry multi-line items
                other => write!(f, " {}:", other.kind().as_str())?,
            }
        }
        write!(f, " }}")
    }
}

fn properties(f: &mut fmt::Formatter<'_>, props: &[Property]) -> fmt::Result {
    for prop in props {
        write!(f, " {}", prop)?;
    }
    Ok(())
}

impl Display for NedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).file(self)
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).item(self)
    }
}

impl Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).type_decl(self)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).sections(self)
    }
}

impl Display for Submodule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).submodule(self)
    }
}

impl Display for ConnectionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).group(self)
    }
}

impl Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "package {};", self.name)
    }
}

impl Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import {};", self.spec)
    }
}

impl Display for PropertyStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};", self.property)
    }
}

impl Display for PropertyDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "property @{}", self.name)?;
        if self.is_array {
            write!(f, "[]")?;
        }
        if let Some(keys) = &self.keys {
            write!(f, "({})", keys.join("; "))?;
        }
        properties(f, &self.properties)?;
        write!(f, ";")
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParamKind::Typed { volatile, ty, name } => {
                if *volatile {
                    write!(f, "volatile ")?;
                }
                write!(f, "{} {}", ty, name)?;
            }
            ParamKind::Untyped { name } => write!(f, "{}", name)?,
            ParamKind::Pattern(pattern) => write!(f, "{}", pattern)?,
        }
        properties(f, &self.properties)?;
        if let Some(value) = &self.value {
            write!(f, " = {}", value)?;
            properties(f, &self.value_properties)?;
        }
        write!(f, ";")
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(direction) = self.direction {
            write!(f, "{} ", direction)?;
        }
        write!(f, "{}", self.name)?;
        match &self.size {
            Some(GateSize::Unsized(_)) => write!(f, "[]")?,
            Some(GateSize::Fixed(size)) => write!(f, "[{}]", size)?,
            None => {}
        }
        properties(f, &self.properties)?;
        write!(f, ";")
    }
}

impl Display for ChannelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        match (&self.name, &self.ty) {
            (Some(name), Some(ty)) => parts.push(format!("{}: {}", name, ty)),
            (Some(name), None) => parts.push(format!("{}:", name)),
            (None, Some(ty)) => parts.push(ty.to_string()),
            (None, None) => {}
        }
        if let Some(body) = &self.body {
            parts.push(InlineBody(body).to_string());
        }
        write!(f, "{}", parts.join(" "))
    }
}

impl Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lhs, self.arrow)?;
        if let Some(channel) = &self.channel {
            write!(f, " {} {}", channel, self.arrow)?;
        }
        write!(f, " {}", self.rhs)?;
        for (i, modifier) in self.modifiers.iter().enumerate() {
            if i == 0 {
                write!(f, " {}", modifier)?;
            } else {
                write!(f, ", {}", modifier)?;
            }
        }
        write!(f, ";")
    }
}
