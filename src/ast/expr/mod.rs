mod body;
mod common;
mod items;
mod module;
mod package;
mod params;
mod pattern;
mod property;
mod types;
mod value;

pub use self::body::*;
pub use self::common::*;
pub use self::items::*;
pub use self::module::*;
pub use self::package::*;
pub use self::params::*;
pub use self::pattern::*;
pub use self::property::*;
pub use self::types::*;
pub use self::value::*;
