mod connections;
mod gates;
mod submodules;

pub use self::connections::*;
pub use self::gates::*;
pub use self::submodules::*;
