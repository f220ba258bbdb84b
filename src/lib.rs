//!
//! A parser front-end for the NED network description language.
//!
//! Source text is lexed into raw tokens, cooked into token trees with
//! comments attached as trivia, and parsed into a spanned syntax tree.
//! Parsing is either strict (the first error aborts) or tolerant
//! (errors become placeholder nodes and parsing resumes).
//!
//! ```
//! let file = ned::parse_str("raw:doc", "simple Node { gates: inout port; }").unwrap();
//! assert_eq!(file.types().count(), 1);
//! ```
//!

pub mod ast;
pub mod error;
pub mod lexer;
pub mod resource;

mod context;

pub use self::context::*;
pub use self::error::{Error, ErrorKind, Result};
pub use self::resource::{Asset, AssetIdentifier, SourceMap, Span};
