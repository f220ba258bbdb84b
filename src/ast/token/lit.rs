use crate::{
    error::{Error, ErrorKind, Result},
    lexer::LiteralKind,
    Span,
};
use serde::Serialize;
use std::fmt;

///
/// A literal value, as written in the source.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lit {
    pub kind: LitKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LitKind {
    Int(i64),
    Float(f64),
    /// The contents of a string literal, escapes are kept verbatim.
    Str(String),
    /// The contents of an xml literal.
    Xml(String),
    Bool(bool),
    /// One or more `(value, unit)` pairs, e.g. `3h20min`.
    Quantity(Vec<QuantityPart>),
    Undefined,
    Null,
    Nullptr,
    Inf,
    Nan,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Number {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityPart {
    pub value: Number,
    pub unit: String,
}

impl Lit {
    pub fn new(kind: LitKind, span: Span) -> Self {
        Self { kind, span }
    }

    ///
    /// Cooks a raw literal token. `text` is the full token text.
    ///
    pub(crate) fn from_raw(kind: LiteralKind, text: &str, span: Span) -> Result<Lit> {
        let kind = match kind {
            LiteralKind::Str { .. } => LitKind::Str(unquote(text, '"').to_string()),
            LiteralKind::Xml { .. } => LitKind::Xml(unquote(text, '\'').to_string()),
            LiteralKind::Int { .. } | LiteralKind::Float => cook_numeric(text, span)?,
        };
        Ok(Lit { kind, span })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.kind,
            LitKind::Int(_) | LitKind::Float(_) | LitKind::Quantity(_)
        )
    }
}

fn unquote(text: &str, quote: char) -> &str {
    let text = text.strip_prefix(quote).unwrap_or(text);
    text.strip_suffix(quote).unwrap_or(text)
}

///
/// Parses a plain number, a hex number or a chain of numbers and units.
///
pub(crate) fn cook_numeric(text: &str, span: Span) -> Result<LitKind> {
    let Some((value, n)) = parse_number(text) else {
        return Err(Error::new(
            ErrorKind::InvalidLiteral,
            format!("invalid numeric literal '{}'", text),
            span,
        ));
    };

    if n == text.len() {
        return Ok(match value {
            Number::Int(v) => LitKind::Int(v),
            Number::Float(v) => LitKind::Float(v),
        });
    }

    let mut parts = Vec::new();
    let mut value = value;
    let mut rem = &text[n..];
    loop {
        let unit_len = rem
            .find(|c: char| !(c.is_ascii_alphabetic() || c == '_'))
            .unwrap_or(rem.len());
        if unit_len == 0 {
            return Err(Error::new(
                ErrorKind::InvalidLiteral,
                format!("invalid numeric literal '{}'", text),
                span,
            ));
        }

        parts.push(QuantityPart {
            value,
            unit: rem[..unit_len].to_string(),
        });
        rem = &rem[unit_len..];
        if rem.is_empty() {
            return Ok(LitKind::Quantity(parts));
        }

        let Some((next, n)) = parse_number(rem) else {
            return Err(Error::new(
                ErrorKind::InvalidLiteral,
                format!("invalid numeric literal '{}'", text),
                span,
            ));
        };
        if n == rem.len() {
            return Err(Error::new(
                ErrorKind::InvalidQuantity,
                format!("quantity '{}' must end with a unit", text),
                span,
            ));
        }
        value = next;
        rem = &rem[n..];
    }
}

///
/// Parses the number at the start of `text`, returning the value
/// and the number of bytes consumed.
///
fn parse_number(text: &str) -> Option<(Number, usize)> {
    let b = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    if b.len() > 2 && b[0] == b'0' && (b[1] == b'x' || b[1] == b'X') {
        let mut i = 2;
        while i < b.len() && b[i].is_ascii_hexdigit() {
            i += 1;
        }
        let value = i64::from_str_radix(&text[2..i], 16).ok()?;
        return Some((Number::Int(value), i));
    }

    let mut i = digits_from(0);
    let mut is_float = false;
    if i + 1 < b.len() && b[i] == b'.' && b[i + 1].is_ascii_digit() {
        i = digits_from(i + 1);
        is_float = true;
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        if j < b.len() && b[j].is_ascii_digit() {
            i = digits_from(j);
            is_float = true;
        }
    }

    if i == 0 {
        return None;
    }

    let raw = &text[..i];
    if is_float {
        raw.parse::<f64>().ok().map(|v| (Number::Float(v), i))
    } else {
        raw.parse::<i64>().ok().map(|v| (Number::Int(v), i))
    }
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) if v.is_infinite() => write!(f, "inf"),
            Number::Float(v) if v.is_nan() => write!(f, "nan"),
            Number::Float(v) => write!(f, "{:?}", v),
        }
    }
}

impl fmt::Display for LitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LitKind::Int(v) => write!(f, "{}", v),
            LitKind::Float(v) => write!(f, "{}", Number::Float(*v)),
            LitKind::Str(s) => write!(f, "\"{}\"", s),
            LitKind::Xml(s) => write!(f, "'{}'", s),
            LitKind::Bool(b) => write!(f, "{}", b),
            LitKind::Quantity(parts) => {
                // inf and nan are keywords and need separated units
                let spaced = parts.iter().any(|p| !p.value.as_f64().is_finite());
                for (i, part) in parts.iter().enumerate() {
                    if spaced {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{} {}", part.value, part.unit)?;
                    } else {
                        write!(f, "{}{}", part.value, part.unit)?;
                    }
                }
                Ok(())
            }
            LitKind::Undefined => write!(f, "undefined"),
            LitKind::Null => write!(f, "null"),
            LitKind::Nullptr => write!(f, "nullptr"),
            LitKind::Inf => write!(f, "inf"),
            LitKind::Nan => write!(f, "nan"),
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cook(text: &str) -> Result<LitKind> {
        cook_numeric(text, Span::default())
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(cook("42").unwrap(), LitKind::Int(42));
        assert_eq!(cook("0x1F").unwrap(), LitKind::Int(31));
        assert_eq!(cook("2.5").unwrap(), LitKind::Float(2.5));
        assert_eq!(cook("1e3").unwrap(), LitKind::Float(1000.0));
        assert_eq!(cook(".5").unwrap(), LitKind::Float(0.5));

        let err = cook("99999999999999999999").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidLiteral);
    }

    #[test]
    fn quantity_literals() {
        assert_eq!(
            cook("3h20min").unwrap(),
            LitKind::Quantity(vec![
                QuantityPart {
                    value: Number::Int(3),
                    unit: "h".to_string()
                },
                QuantityPart {
                    value: Number::Int(20),
                    unit: "min".to_string()
                },
            ])
        );
        assert_eq!(
            cook(".1s").unwrap(),
            LitKind::Quantity(vec![QuantityPart {
                value: Number::Float(0.1),
                unit: "s".to_string()
            }])
        );

        let err = cook("1s2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidQuantity);
    }

    #[test]
    fn literal_display() {
        assert_eq!(cook("3h20min").unwrap().to_string(), "3h20min");
        assert_eq!(cook("1.5s").unwrap().to_string(), "1.5s");
        assert_eq!(cook("2.0").unwrap().to_string(), "2.0");
        assert_eq!(LitKind::Str("a\\\"b".to_string()).to_string(), "\"a\\\"b\"");
        assert_eq!(LitKind::Float(f64::INFINITY).to_string(), "inf");
    }
}
