use crate::{patch_tile::TileId, vertex::VertexId};
use geometry::Point;
use tile::Wedge;

// Contradiction is a violation of the matching rules discovered while placing tiles.
// It's recoverable: the placement that caused it is rolled back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Contradiction {
    EmptyCatalog(VertexId),
    IllegalMerge { survivor: VertexId, absorbed: VertexId, slot: usize },
    SlotTaken { vertex: VertexId, slot: usize },
    Misaligned { tile: TileId, wedge: Wedge, slot: usize },
    Displaced { vertex: VertexId, location: Point, derived: Point },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    Contradiction(Contradiction),
    NoLegalContinuation { vertex: VertexId, retries: usize },
    WrongKind { tile: TileId, wedge: Wedge },
    NotACorner { tile: TileId, vertex: VertexId },
    DeadVertex(VertexId),
    UnknownVertex(VertexId),
    UnknownTile(TileId),
    SlotOutOfRange(usize),
    NoOrientation(TileId),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_contradiction(&self) -> bool {
        matches!(self, Error::Contradiction(_))
    }
}

impl From<Contradiction> for Error {
    fn from(contradiction: Contradiction) -> Self {
        Error::Contradiction(contradiction)
    }
}

impl std::fmt::Display for Contradiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Contradiction::EmptyCatalog(vertex) => write!(f, "no legal figure remains at {}", vertex),
            Contradiction::IllegalMerge { survivor, absorbed, slot } => {
                write!(f, "{} and {} disagree at slot {}", survivor, absorbed, slot)
            }
            Contradiction::SlotTaken { vertex, slot } => write!(f, "slot {} of {} is already filled", slot, vertex),
            Contradiction::Misaligned { tile, wedge, slot } => {
                write!(f, "{} is oriented so that {} can't sit in slot {}", tile, wedge, slot)
            }
            Contradiction::Displaced { vertex, location, derived } => {
                write!(f, "{} is at {} but was derived at {}", vertex, location, derived)
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Contradiction(contradiction) => write!(f, "contradiction: {}", contradiction),
            Error::NoLegalContinuation { vertex, retries } => {
                write!(f, "no legal continuation at {} after {} retries", vertex, retries)
            }
            Error::WrongKind { tile, wedge } => write!(f, "{} is not a {}", tile, wedge.kind()),
            Error::NotACorner { tile, vertex } => write!(f, "{} is not a corner of {}", vertex, tile),
            Error::DeadVertex(vertex) => write!(f, "{} has been merged away", vertex),
            Error::UnknownVertex(vertex) => write!(f, "unknown vertex {}", vertex),
            Error::UnknownTile(tile) => write!(f, "unknown tile {}", tile),
            Error::SlotOutOfRange(slot) => write!(f, "slot {} is out of range", slot),
            Error::NoOrientation(tile) => write!(f, "{} has no orientation yet", tile),
        }
    }
}

impl std::error::Error for Contradiction {}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Contradiction(contradiction) => Some(contradiction),
            _ => None,
        }
    }
}
