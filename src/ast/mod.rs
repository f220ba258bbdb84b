pub(crate) mod expr;
pub(crate) mod parse;
pub(crate) mod token;
pub(crate) mod validate;

mod print;

pub use expr::*;
pub use parse::*;
pub use token::*;
pub use validate::*;
