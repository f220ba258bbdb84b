use super::*;
use std::fmt::{self, Display, Formatter};

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Lit(lit) => lit.fmt(f),
            Expr::Name(name) => name.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
            Expr::Ternary(ternary) => ternary.fmt(f),
            Expr::Object(object) => object.fmt(f),
            Expr::Array(array) => array.fmt(f),
            Expr::Exists(op) => write!(f, "exists({})", NameOrEmpty(&op.name)),
            Expr::Sizeof(op) => write!(f, "sizeof({})", NameOrEmpty(&op.name)),
            Expr::Index(op) => match &op.name {
                Some(name) => write!(f, "{}.index", name),
                None => write!(f, "index"),
            },
            Expr::Typename(op) => match &op.name {
                Some(name) => write!(f, "{}.typename", name),
                None => write!(f, "typename"),
            },
        }
    }
}

struct NameOrEmpty<'a>(&'a Option<QualifiedName>);

impl Display for NameOrEmpty<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => name.fmt(f),
            None => Ok(()),
        }
    }
}

/// Prints `expr`, wrapped in parens if `parens` is set.
struct Paren<'a>(&'a Expr, bool);

impl Display for Paren<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.1 {
            write!(f, "({})", self.0)
        } else {
            self.0.fmt(f)
        }
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i != 0 {
                write!(f, ".")?;
            }
            match segment {
                NameSegment::Name { ident, index, .. } => {
                    write!(f, "{}", ident)?;
                    if let Some(index) = index {
                        write!(f, "[{}]", index)?;
                    }
                }
                NameSegment::This(_) => write!(f, "this")?,
                NameSegment::Parent(_) => write!(f, "parent")?,
            }
        }
        Ok(())
    }
}

impl Display for FuncName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FuncName::Name(name) => name.fmt(f),
            FuncName::Cast(kw, _) => kw.fmt(f),
        }
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(receiver) = &self.receiver {
            let parens = receiver.precedence() < PREC_ATOM;
            write!(f, "{}.", Paren(receiver, parens))?;
        }
        write!(f, "{}(", self.func)?;
        write_list(f, &self.args)?;
        write!(f, ")")
    }
}

impl Display for UnaryExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parens = self.expr.precedence() < PREC_UNARY;
        write!(f, "{}{}", self.op, Paren(&self.expr, parens))
    }
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let prec = self.op.precedence();
        let right_assoc = self.op.is_right_assoc();

        let lhs = self.lhs.precedence();
        let lhs_parens = lhs < prec || (lhs == prec && right_assoc);
        let rhs = self.rhs.precedence();
        let rhs_parens = rhs < prec || (rhs == prec && !right_assoc);

        write!(
            f,
            "{} {} {}",
            Paren(&self.lhs, lhs_parens),
            self.op,
            Paren(&self.rhs, rhs_parens)
        )
    }
}

impl Display for TernaryExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let cond_parens = self.cond.precedence() <= PREC_TERNARY;
        write!(
            f,
            "{} ? {} : {}",
            Paren(&self.cond, cond_parens),
            self.then,
            self.otherwise
        )
    }
}

impl Display for ObjectLit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, ident) in self.ty.iter().enumerate() {
            if i != 0 {
                write!(f, "::")?;
            }
            write!(f, "{}", ident)?;
        }
        if !self.ty.is_empty() {
            write!(f, " ")?;
        }

        write!(f, "{{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", entry.key, entry.value)?;
        }
        write!(f, "}}")
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKey::Name(ident) => ident.fmt(f),
            ObjectKey::Lit { negative, lit, .. } => {
                if *negative {
                    write!(f, "-")?;
                }
                lit.fmt(f)
            }
        }
    }
}

impl Display for ArrayLit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        write_list(f, &self.items)?;
        write!(f, "]")
    }
}

fn write_list(f: &mut Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i != 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
