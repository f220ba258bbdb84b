use crate::{
    ast::{validate::Validate, NedFile, Parse, ParseBuffer, ParsingErrorContext, TokenStream},
    error::*,
    Asset, SourceMap,
};
use log::debug;
use std::rc::Rc;

/// How the parser reacts to errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The first error aborts the parse.
    Strict,
    /// Errors become placeholder nodes and parsing resumes at the next
    /// statement or block boundary.
    Tolerant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: Mode,
    /// The number of errors after which a tolerant parse gives up.
    pub max_errors: usize,
}

impl ParseOptions {
    pub fn tolerant() -> Self {
        Self {
            mode: Mode::Tolerant,
            ..Self::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Strict,
            max_errors: 64,
        }
    }
}

///
/// A parsed source unit together with everything reported on it.
///
/// In strict mode `diagnostics` holds warnings only.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub file: NedFile,
    pub diagnostics: Vec<Error>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|e| !e.is_warning())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Error> {
        self.diagnostics.iter().filter(|e| e.is_warning())
    }
}

///
/// Lexes, parses and validates one asset.
///
pub fn parse(asset: Asset<'_>, opts: &ParseOptions) -> Result<Parsed> {
    let alias = asset.alias();
    let ectx = Rc::new(ParsingErrorContext::new(opts));

    let ts = TokenStream::with_context(asset, &ectx).map_err(|e| e.in_asset(alias))?;
    let buf = ParseBuffer::with_context(asset, &ts, ectx.clone());
    let file = NedFile::parse(&buf).map_err(|e| e.in_asset(alias))?;

    let mut errors = Errors::new().as_mut();
    file.validate(&mut errors);
    for error in errors.into_inner().into_vec() {
        if error.is_warning() {
            ectx.warn(error);
        } else {
            ectx.record(error).map_err(|e| e.in_asset(alias))?;
        }
    }

    debug!(
        "parsed '{}': {} tokens, {} items",
        alias,
        ts.deep_len(),
        file.items.len()
    );

    let diagnostics = ectx
        .take_diagnostics()
        .into_iter()
        .map(|e| e.in_asset(alias))
        .collect();

    Ok(Parsed { file, diagnostics })
}

///
/// Parses `source` strictly, returning the first error.
///
/// Warnings are dropped, use [`parse`] to inspect them.
///
pub fn parse_str(ident: &str, source: &str) -> Result<NedFile> {
    let mut smap = SourceMap::new();
    let asset = smap.load_raw(ident, source);
    parse(asset, &ParseOptions::default()).map(|parsed| parsed.file)
}

///
/// Parses `source` tolerantly. Never fails: errors are returned as
/// diagnostics next to a tree containing placeholder nodes.
///
pub fn parse_str_tolerant(ident: &str, source: &str) -> Parsed {
    let mut smap = SourceMap::new();
    let asset = smap.load_raw(ident, source);
    match parse(asset, &ParseOptions::tolerant()) {
        Ok(parsed) => parsed,
        Err(error) => Parsed {
            file: NedFile {
                items: Vec::new(),
                span: asset.span(0, asset.len()),
            },
            diagnostics: vec![error],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_parse() {
        let file = parse_str("raw:case1", "package a.b;\nsimple A {}\n").unwrap();
        assert_eq!(file.items.len(), 2);
        assert_eq!(file.package().map(|p| p.name.to_string()), Some("a.b".to_string()));

        let e = parse_str("raw:case2", "simple A { gates: input; }").unwrap_err();
        assert_eq!(e.asset(), Some("case2"));
    }

    #[test]
    fn warnings_are_kept() {
        let mut smap = SourceMap::new();
        let asset = smap.load_raw("raw:case1", "simple A extends {}");
        let parsed = parse(asset, &ParseOptions::default()).unwrap();
        assert!(!parsed.has_errors());
        assert_eq!(parsed.warnings().count(), 1);
        assert_eq!(parsed.diagnostics[0].kind, ErrorKind::BareExtends);
    }

    #[test]
    fn tolerant_parse() {
        let parsed = parse_str_tolerant(
            "raw:case1",
            "simple A {}\nsimple 5 extends B { x = 1; }\nmodule B {}",
        );
        assert_eq!(parsed.file.types().count(), 2);
        assert_eq!(parsed.file.errors().count(), 1);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.has_errors());
    }

    #[test]
    fn error_limit() {
        let mut smap = SourceMap::new();
        let asset = smap.load_raw("raw:case1", "simple 1 {}\nsimple 2 {}\nsimple 3 {}\n");
        let opts = ParseOptions {
            mode: Mode::Tolerant,
            max_errors: 1,
        };
        let parsed = parse(asset, &opts).unwrap();
        assert_eq!(parsed.diagnostics.len(), 2);
        assert_eq!(parsed.diagnostics[1].kind, ErrorKind::TooManyErrors);
    }
}
