use crate::Span;
use serde::Serialize;
use std::{error, fmt, io};

mod errors;
mod root;

pub use self::errors::*;
pub use self::root::*;

pub type Result<T> = std::result::Result<T, Error>;

///
/// A single diagnostic produced while lexing, parsing or validating
/// a source unit.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    pub hints: Vec<ErrorHint>,
    pub(crate) asset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum ErrorKind {
    // lexical
    InvalidCharacter,
    InvalidIdent,
    UnterminatedLiteral,
    InvalidLiteral,

    // syntactical
    MissingDelim,
    UnexpectedDelim,
    UnexpectedToken,
    UnexpectedEOF,
    ExpectedDelimited,
    ExpectedIdentFoundKeyword,
    InvalidQuantity,
    InvalidInheritance,
    MismatchedArrows,
    MissingParamValue,
    SectionNotAllowed,
    TooManyErrors,

    // semantic
    BareExtends,
    EmptyPropertyTags,
    AmbiguousGateIndex,

    IoError,
}

/// The coarse class of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    LexError,
    SyntaxError,
    SemanticWarning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ErrorHint {
    Note(String),
    Help(String),
}

impl ErrorKind {
    pub fn category(&self) -> Category {
        use ErrorKind::*;
        match self {
            InvalidCharacter | InvalidIdent | UnterminatedLiteral | InvalidLiteral => {
                Category::LexError
            }
            BareExtends | EmptyPropertyTags | AmbiguousGateIndex => Category::SemanticWarning,
            _ => Category::SyntaxError,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.category() {
            Category::SemanticWarning => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            hints: Vec::new(),
            asset: None,
        }
    }

    pub fn map(self, f: impl FnOnce(Error) -> Error) -> Error {
        f(self)
    }

    pub fn add_hints(mut self, hint: impl Into<ErrorHint>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub(crate) fn in_asset(mut self, alias: &str) -> Self {
        if self.asset.is_none() {
            self.asset = Some(alias.to_string());
        }
        self
    }

    pub fn from_io(io: io::Error, alias: &str) -> Self {
        Self {
            kind: ErrorKind::IoError,
            message: io.to_string(),
            span: Span::default(),
            hints: Vec::new(),
            asset: Some(alias.to_string()),
        }
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn byte_offset(&self) -> usize {
        self.span.pos()
    }

    pub fn line(&self) -> usize {
        self.span.line()
    }

    pub fn column(&self) -> usize {
        self.span.column()
    }

    pub fn length(&self) -> usize {
        self.span.len()
    }

    /// The alias of the asset this diagnostic refers to, if known.
    pub fn asset(&self) -> Option<&str> {
        self.asset.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl error::Error for Error {}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Debug>::fmt(self, f)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Debug>::fmt(self, f)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
