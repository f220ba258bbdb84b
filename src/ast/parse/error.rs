use crate::{
    error::{Error, ErrorKind, Result},
    Mode, ParseOptions,
};
use std::cell::{Cell, RefCell};

///
/// Decides what happens to a diagnostic raised during parsing.
///
/// In strict mode every error aborts the parse. In tolerant mode errors
/// are collected until `max_errors` is reached, after which a single
/// `TooManyErrors` diagnostic is added and all further errors are dropped.
///
#[derive(Debug)]
pub struct ParsingErrorContext {
    mode: Mode,
    max_errors: usize,
    diagnostics: RefCell<Vec<Error>>,
    errors: Cell<usize>,
    limit_reached: Cell<bool>,
}

impl ParsingErrorContext {
    pub fn new(opts: &ParseOptions) -> Self {
        Self {
            mode: opts.mode,
            max_errors: opts.max_errors,
            diagnostics: RefCell::new(Vec::new()),
            errors: Cell::new(0),
            limit_reached: Cell::new(false),
        }
    }

    pub fn strict() -> Self {
        Self::new(&ParseOptions::default())
    }

    pub fn tolerant() -> Self {
        Self::new(&ParseOptions::tolerant())
    }

    pub fn is_tolerant(&self) -> bool {
        self.mode == Mode::Tolerant
    }

    pub fn limit_reached(&self) -> bool {
        self.limit_reached.get()
    }

    ///
    /// Records an error. Returns the error itself in strict mode.
    ///
    pub fn record(&self, error: Error) -> Result<()> {
        if !self.is_tolerant() {
            return Err(error);
        }
        if self.limit_reached.get() {
            return Ok(());
        }

        let n = self.errors.get() + 1;
        self.errors.set(n);
        if n > self.max_errors {
            self.limit_reached.set(true);
            let span = error.span;
            self.diagnostics.borrow_mut().push(Error::new(
                ErrorKind::TooManyErrors,
                format!("aborting after {} errors", self.max_errors),
                span,
            ));
        } else {
            self.diagnostics.borrow_mut().push(error);
        }
        Ok(())
    }

    /// Records a warning. Warnings never abort parsing.
    pub fn warn(&self, warning: Error) {
        self.diagnostics.borrow_mut().push(warning);
    }

    pub fn take_diagnostics(&self) -> Vec<Error> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;

    fn err(msg: &str) -> Error {
        Error::new(ErrorKind::UnexpectedToken, msg, Span::default())
    }

    #[test]
    fn strict_returns_first_error() {
        let ectx = ParsingErrorContext::strict();
        let e = ectx.record(err("first")).unwrap_err();
        assert_eq!(e.message, "first");
        assert!(ectx.take_diagnostics().is_empty());
    }

    #[test]
    fn tolerant_stops_at_limit() {
        let ectx = ParsingErrorContext::new(&ParseOptions {
            mode: Mode::Tolerant,
            max_errors: 2,
        });
        for i in 0..5 {
            assert!(ectx.record(err(&format!("e{}", i))).is_ok());
        }
        assert!(ectx.limit_reached());

        let diag = ectx.take_diagnostics();
        assert_eq!(diag.len(), 3);
        assert_eq!(diag[0].message, "e0");
        assert_eq!(diag[1].message, "e1");
        assert_eq!(diag[2].kind, ErrorKind::TooManyErrors);
    }
}
