mod config;
mod error;
mod growth;
mod journal;
mod patch;
mod patch_tile;
mod registry;
mod snapshot;
mod vertex;

pub use self::config::*;
pub use self::error::*;
pub use self::growth::*;
pub use self::patch::*;
pub use self::patch_tile::*;
pub use self::registry::Registry;
pub use self::snapshot::*;
pub use self::vertex::*;
