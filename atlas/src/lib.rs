mod catalog;
mod orientation;

pub use self::catalog::*;
pub use self::orientation::*;
