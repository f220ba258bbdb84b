use crate::{error::Result, Span};

mod buffer;
mod cursor;
mod error;
mod recover;

pub use self::buffer::*;
pub use self::error::*;
pub use self::recover::*;

pub trait Parse: Sized {
    fn parse(input: ParseStream<'_>) -> Result<Self>;
}

pub trait Spanned {
    fn span(&self) -> Span;
}

impl<T: Spanned> Spanned for Box<T> {
    fn span(&self) -> Span {
        (**self).span()
    }
}
