mod proto_tile;
mod wedge;

pub use self::proto_tile::*;
pub use self::wedge::*;
