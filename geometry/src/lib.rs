mod affine;
mod bounds;
mod euclid;
mod index;
mod point;
mod transform;

pub use self::affine::*;
pub use self::bounds::*;
pub use self::euclid::*;
pub use self::index::*;
pub use self::point::*;
pub use self::transform::*;
