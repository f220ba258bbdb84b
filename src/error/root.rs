use std::{
    error, fmt,
    io::{self, Write},
};

use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

use super::{Error, ErrorHint, Errors, Severity};
use crate::resource::{Asset, SourceMap};

pub type RootResult<T> = Result<T, RootError>;

///
/// A set of diagnostics bundled with the sources they refer to,
/// so they can be rendered with source excerpts.
///
pub struct RootError {
    pub errors: Errors,
    pub smap: SourceMap,
}

impl RootError {
    pub fn new(errors: Errors, smap: SourceMap) -> RootError {
        Self { errors, smap }
    }

    pub fn single(error: Error, smap: SourceMap) -> RootError {
        let mut errors = Errors::new();
        errors.list.push_back(error);
        Self { errors, smap }
    }

    /// Renders all diagnostics into `buffer`.
    pub fn render(&self, buffer: &mut Buffer) -> fmt::Result {
        for error in &*self.errors {
            error.fmt(&self.smap, buffer)?;
        }
        Ok(())
    }
}

impl Error {
    fn fmt(&self, smap: &SourceMap, fmt: &mut Buffer) -> fmt::Result {
        self.fmt_title(fmt).map_err(|_| fmt::Error)?;
        self.fmt_span(smap, fmt).map_err(|_| fmt::Error)?;
        self.fmt_hint(fmt).map_err(|_| fmt::Error)?;
        Ok(())
    }

    fn fmt_title(&self, fmt: &mut Buffer) -> io::Result<()> {
        let color = match self.severity() {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };
        fmt.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(fmt, "{}[{}]: ", self.severity(), self.kind as u8)?;

        fmt.reset()?;
        fmt.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(fmt, "{} ({})", self.message, self.kind)?;
        fmt.reset()?;

        Ok(())
    }

    fn fmt_span(&self, smap: &SourceMap, fmt: &mut Buffer) -> io::Result<()> {
        let Some(alias) = self.asset() else { return Ok(()) };
        let asset: Option<Asset<'_>> = smap.asset(alias);

        // File path line
        fmt.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(fmt, "   --> ")?;
        fmt.reset()?;
        writeln!(fmt, "{}:{}", alias, self.span)?;

        let Some(asset) = asset else { return Ok(()) };
        if self.span.line() == 0 {
            return Ok(());
        }

        let text = asset.line_text(self.span.line());

        fmt.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(fmt, "{:>3} | ", self.span.line())?;
        fmt.reset()?;
        writeln!(fmt, "{}", text)?;

        // Marker line, clipped to the excerpt
        let offset = self.span.column().saturating_sub(1);
        let width = text.len().saturating_sub(offset);
        let marks = self.span.len().min(width).max(1);

        fmt.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(fmt, "    | ")?;
        fmt.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(fmt, "{}{}", " ".repeat(offset), "^".repeat(marks))?;
        fmt.reset()?;

        Ok(())
    }

    fn fmt_hint(&self, fmt: &mut Buffer) -> io::Result<()> {
        for hint in &self.hints {
            let (label, text) = match hint {
                ErrorHint::Help(help) => ("help", help),
                ErrorHint::Note(note) => ("note", note),
            };

            fmt.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
            write!(fmt, "    = ")?;

            fmt.reset()?;
            fmt.set_color(ColorSpec::new().set_bold(true))?;
            write!(fmt, "{}: ", label)?;

            fmt.reset()?;
            writeln!(fmt, "{}", text)?;
        }
        Ok(())
    }
}

impl error::Error for RootError {}
impl fmt::Display for RootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stream = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = stream.buffer();
        self.render(&mut buffer)?;
        write!(f, "{}", String::from_utf8_lossy(buffer.as_slice()))
    }
}
impl fmt::Debug for RootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}
