use crate::error::*;

mod items;
mod module;

///
/// A structural check run on a parsed tree. Findings are added to `errors`,
/// the tree itself is never changed.
///
pub trait Validate {
    fn validate(&self, errors: &mut ErrorsMut);
}

impl<T: Validate> Validate for [T] {
    fn validate(&self, errors: &mut ErrorsMut) {
        self.iter().for_each(|item| item.validate(errors))
    }
}
