use crate::Span;
use serde::Serialize;
use std::{fmt, sync::Arc};

mod annotation;
mod cursor;
mod keyword;
mod lit;
mod stream;
mod trivia;

pub use self::annotation::*;
pub use self::keyword::*;
pub use self::lit::*;
pub use self::stream::*;
pub use self::trivia::*;

///
/// A cooked token: keywords are resolved, literals carry their values
/// and multi-character operators are joined.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub(crate) trivia: Option<Arc<Trivia>>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            trivia: None,
        }
    }

    /// Comments in front of this token.
    pub fn trivia(&self) -> Option<&Trivia> {
        self.trivia.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(Ident),
    Keyword(Keyword),
    Literal(Lit),
    Annotation(Property),

    /// ";"
    Semi,
    /// ","
    Comma,
    /// "."
    Dot,
    /// ".."
    DotDot,
    /// ":"
    Colon,
    /// "::"
    ColonColon,
    /// "?"
    Question,
    /// "$"
    Dollar,
    /// "="
    Assign,
    /// "=="
    EqEq,
    /// "!="
    Ne,
    /// "!"
    Bang,
    /// "<"
    Lt,
    /// "<="
    Le,
    /// ">"
    Gt,
    /// ">="
    Ge,
    /// "<=>"
    Spaceship,
    /// "+"
    Plus,
    /// "++"
    PlusPlus,
    /// "-"
    Minus,
    /// "*"
    Star,
    /// "**"
    StarStar,
    /// "/"
    Slash,
    /// "%"
    Percent,
    /// "^"
    Caret,
    /// "^^"
    CaretCaret,
    /// "&"
    And,
    /// "&&"
    AndAnd,
    /// "|"
    Or,
    /// "||"
    OrOr,
    /// "~"
    Tilde,
    /// "#"
    Pound,
    /// "<<"
    Shl,
    /// ">>"
    Shr,
    /// "-->"
    RSingleArrow,
    /// "<--"
    LSingleArrow,
    /// "<-->"
    LSingleArrowR,
}

impl TokenKind {
    /// The source text of a punctuation token.
    pub fn as_str(&self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            Semi => ";",
            Comma => ",",
            Dot => ".",
            DotDot => "..",
            Colon => ":",
            ColonColon => "::",
            Question => "?",
            Dollar => "$",
            Assign => "=",
            EqEq => "==",
            Ne => "!=",
            Bang => "!",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Spaceship => "<=>",
            Plus => "+",
            PlusPlus => "++",
            Minus => "-",
            Star => "*",
            StarStar => "**",
            Slash => "/",
            Percent => "%",
            Caret => "^",
            CaretCaret => "^^",
            And => "&",
            AndAnd => "&&",
            Or => "|",
            OrOr => "||",
            Tilde => "~",
            Pound => "#",
            Shl => "<<",
            Shr => ">>",
            RSingleArrow => "-->",
            LSingleArrow => "<--",
            LSingleArrowR => "<-->",
            Ident(_) | Keyword(_) | Literal(_) | Annotation(_) => return None,
        })
    }

    ///
    /// A description of the token used in diagnostics.
    ///
    pub fn token_kind_err_output(&self) -> String {
        match self {
            TokenKind::Ident(ident) => format!("identifier '{}'", ident.raw),
            TokenKind::Keyword(kw) => format!("keyword '{}'", kw),
            TokenKind::Literal(lit) => format!("literal '{}'", lit),
            TokenKind::Annotation(prop) => format!("property '@{}'", prop.name),
            other => format!("'{}'", other.as_str().unwrap_or_default()),
        }
    }
}

///
/// A plain name that is not a reserved word.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ident {
    pub raw: String,
    pub span: Span,
}

impl Ident {
    pub fn new(raw: impl Into<String>, span: Span) -> Self {
        Self {
            raw: raw.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq<&str> for Ident {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// "( ... )"
    Parenthesis,
    /// "{ ... }"
    Brace,
    /// "[ ... ]"
    Bracket,
}

impl Delimiter {
    pub fn open_str(&self) -> &'static str {
        match self {
            Delimiter::Parenthesis => "(",
            Delimiter::Brace => "{",
            Delimiter::Bracket => "[",
        }
    }

    pub fn close_str(&self) -> &'static str {
        match self {
            Delimiter::Parenthesis => ")",
            Delimiter::Brace => "}",
            Delimiter::Bracket => "]",
        }
    }

    pub fn token_kind_err_output(&self) -> String {
        format!("'{}...{}'", self.open_str(), self.close_str())
    }
}
