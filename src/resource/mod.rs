use std::{
    fs::File,
    io::{Error, ErrorKind, Read, Result},
    path::{Path, PathBuf},
};

mod span;
pub use self::span::*;

#[cfg(test)]
mod tests;

///
/// The owner of all source text handed to the parser.
///
/// Every asset is appended to one shared buffer, but spans produced
/// by the parser are always relative to the asset they belong to.
///
#[derive(Debug, Default)]
pub struct SourceMap {
    pub(crate) buffer: String,
    pub(crate) assets: Vec<SourceMappedAsset>,
}

#[derive(Debug)]
pub(crate) struct SourceMappedAsset {
    pub offset: usize,
    pub len: usize,
    pub ident: AssetIdentifier,
    pub line_pos_mapping: Vec<usize>,
}

///
/// An opaque identifier for a source unit, used only for diagnostics.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetIdentifier {
    Raw { alias: String },
    Root { path: PathBuf, alias: String },
}

impl From<&str> for AssetIdentifier {
    fn from(value: &str) -> Self {
        if let Some(alias) = value.strip_prefix("raw:") {
            return AssetIdentifier::raw(alias);
        }

        let path = PathBuf::from(value);
        AssetIdentifier::Root {
            alias: path.to_string_lossy().to_string(),
            path,
        }
    }
}

impl From<PathBuf> for AssetIdentifier {
    fn from(path: PathBuf) -> Self {
        AssetIdentifier::Root {
            alias: path.to_string_lossy().to_string(),
            path,
        }
    }
}

/// A borrowed view onto one loaded source unit.
#[derive(Debug, Clone, Copy)]
pub struct Asset<'a> {
    map: &'a SourceMap,
    mapping: &'a SourceMappedAsset,
}

impl SourceMap {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            assets: Vec::new(),
        }
    }

    pub fn load_file(&mut self, ident: impl Into<AssetIdentifier>) -> Result<Asset<'_>> {
        let ident = ident.into();
        let mut file = File::open(ident.path()?)?;
        let offset = self.buffer.len();
        let n = file.read_to_string(&mut self.buffer)?;

        Ok(self.register(ident, offset, n))
    }

    pub fn load_raw(&mut self, ident: impl Into<AssetIdentifier>, raw: &str) -> Asset<'_> {
        let ident = ident.into();
        let offset = self.buffer.len();
        self.buffer.push_str(raw);

        self.register(ident, offset, raw.len())
    }

    fn register(&mut self, ident: AssetIdentifier, offset: usize, len: usize) -> Asset<'_> {
        let mapping = SourceMappedAsset::new(ident, offset, len, self);
        self.assets.push(mapping);

        let idx = self.assets.len() - 1;
        Asset {
            map: self,
            mapping: &self.assets[idx],
        }
    }

    pub fn asset(&self, alias: &str) -> Option<Asset<'_>> {
        self.assets
            .iter()
            .find(|a| a.ident.alias() == alias)
            .map(|mapping| Asset { map: self, mapping })
    }

    pub fn assets(&self) -> impl Iterator<Item = Asset<'_>> {
        self.assets.iter().map(|mapping| Asset { map: self, mapping })
    }
}

impl SourceMappedAsset {
    pub(crate) fn new(ident: AssetIdentifier, offset: usize, len: usize, map: &SourceMap) -> Self {
        let data = &map.buffer[offset..(offset + len)];

        // line-start-offset (relative) indexed by line number - 1
        let mut pos = vec![0];
        for (idx, c) in data.char_indices() {
            if c == '\n' {
                pos.push(idx + 1);
            }
        }

        Self {
            ident,
            offset,
            len,
            line_pos_mapping: pos,
        }
    }

    /// The 0-based line index of a relative position.
    pub(crate) fn line_for(&self, pos: usize) -> usize {
        match self.line_pos_mapping.binary_search(&pos) {
            Ok(n) => n,
            Err(n) => n - 1,
        }
    }
}

impl AssetIdentifier {
    pub fn raw(s: &str) -> Self {
        Self::Raw {
            alias: s.to_string(),
        }
    }

    pub fn alias(&self) -> &str {
        match self {
            Self::Raw { alias } | Self::Root { alias, .. } => alias,
        }
    }

    pub fn path(&self) -> Result<&Path> {
        match self {
            Self::Raw { .. } => Err(Error::new(ErrorKind::Other, "asset is not io-bound")),
            Self::Root { path, .. } => Ok(path),
        }
    }
}

impl<'a> Asset<'a> {
    pub fn ident(&self) -> &'a AssetIdentifier {
        &self.mapping.ident
    }

    pub fn alias(&self) -> &'a str {
        self.mapping.ident.alias()
    }

    pub fn source(&self) -> &'a str {
        &self.map.buffer[self.mapping.offset..(self.mapping.offset + self.mapping.len)]
    }

    pub fn len(&self) -> usize {
        self.mapping.len
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.len == 0
    }

    pub fn len_lines(&self) -> usize {
        self.mapping.line_pos_mapping.len()
    }

    /// Creates a span for a relative byte range, resolving line and column.
    pub fn span(&self, pos: usize, len: usize) -> Span {
        let line = self.mapping.line_for(pos);
        let column = pos - self.mapping.line_pos_mapping[line];
        Span::new(pos, len, line + 1, column + 1)
    }

    /// A zero-width span at the end of the asset.
    pub fn end_span(&self) -> Span {
        self.span(self.mapping.len, 0)
    }

    pub fn slice_for(&self, span: Span) -> &'a str {
        let end = span.end().min(self.mapping.len);
        &self.source()[span.pos.min(end)..end]
    }

    /// The full text of the 1-based line `line`, without its line break.
    pub fn line_text(&self, line: usize) -> &'a str {
        let lines = &self.mapping.line_pos_mapping;
        if line == 0 || line > lines.len() {
            return "";
        }
        let start = lines[line - 1];
        let end = lines.get(line).map(|e| e - 1).unwrap_or(self.mapping.len);
        self.source()[start..end.max(start)].trim_end_matches('\r')
    }
}
