use crate::{error::Contradiction, patch_tile::TileId};
use atlas::Catalog;
use geometry::Point;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tile::{Wedge, SLOTS};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// Occupant is the wedge of a tile filling one slot of a vertex
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Occupant {
    pub tile: TileId,
    pub wedge: Wedge,
}

// Vertex is a point where tile corners meet. Its 10 slots record which tile wedges surround it
// and its catalog holds the legal figures still consistent with those wedges. A vertex that was
// merged into another is dead and forwards to its survivor.
#[derive(Clone, Debug)]
pub struct Vertex {
    id: VertexId,
    slots: [Option<Occupant>; SLOTS],
    open: usize,
    catalog: Catalog,
    location: Option<Point>,
    forward: Option<VertexId>,
}

impl Vertex {
    pub fn new(id: VertexId) -> Vertex {
        Vertex {
            id,
            slots: [None; SLOTS],
            open: SLOTS,
            catalog: Catalog::full(),
            location: None,
            forward: None,
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn slots(&self) -> &[Option<Occupant>; SLOTS] {
        &self.slots
    }

    pub fn slot(&self, slot: usize) -> Option<Occupant> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn open(&self) -> usize {
        self.open
    }

    pub fn filled(&self) -> usize {
        SLOTS - self.open
    }

    pub fn is_full(&self) -> bool {
        self.open == 0
    }

    pub fn is_dead(&self) -> bool {
        self.forward.is_some()
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    pub fn location(&self) -> Option<Point> {
        self.location
    }

    pub fn forward(&self) -> Option<VertexId> {
        self.forward
    }

    pub fn fills(&self) -> [Option<Wedge>; SLOTS] {
        let mut fills = [None; SLOTS];
        for (fill, occupant) in fills.iter_mut().zip(self.slots.iter()) {
            *fill = occupant.map(|occupant| occupant.wedge);
        }
        fills
    }

    // tiles lists each tile touching the vertex once, in slot order
    pub fn tiles(&self) -> Vec<TileId> {
        self.slots.iter().flatten().map(|occupant| occupant.tile).unique().collect()
    }

    pub fn open_slots(&self) -> Vec<usize> {
        (0..SLOTS).filter(|slot| self.slots[*slot].is_none()).collect()
    }

    // forced_assignments returns every open slot on whose wedge all remaining figures agree
    pub fn forced_assignments(&self) -> Vec<(usize, Wedge)> {
        self.open_slots()
            .into_iter()
            .filter_map(|slot| self.catalog.agreed_at(slot).map(|wedge| (slot, wedge)))
            .collect()
    }

    pub(crate) fn occupy(&mut self, slot: usize, occupant: Occupant) -> Result<(), Contradiction> {
        if self.slots[slot].is_some() {
            return Err(Contradiction::SlotTaken { vertex: self.id, slot });
        }
        self.slots[slot] = Some(occupant);
        self.open -= 1;
        self.catalog = self.catalog.restrict(slot, occupant.wedge);
        if self.catalog.is_empty() {
            return Err(Contradiction::EmptyCatalog(self.id));
        }
        Ok(())
    }

    // occupy_slots records each of a tile's wedges at its slot
    pub(crate) fn occupy_slots(&mut self, tile: TileId, placements: &[(usize, Wedge)]) -> Result<(), Contradiction> {
        for (slot, wedge) in placements.iter() {
            self.occupy(*slot, Occupant { tile, wedge: *wedge })?;
        }
        Ok(())
    }

    // absorb takes every filled slot of other and narrows the catalog to the figures both allow.
    // Slots filled in both must hold the same occupant, and no tile may touch both vertices.
    pub(crate) fn absorb(&mut self, other: &Vertex) -> Result<(), Contradiction> {
        let ours = self.tiles();
        for (slot, theirs) in other.slots.iter().enumerate() {
            let theirs = match theirs {
                Some(theirs) => theirs,
                None => continue,
            };
            let illegal = match self.slots[slot] {
                Some(ours) => ours != *theirs,
                None => ours.contains(&theirs.tile),
            };
            if illegal {
                return Err(Contradiction::IllegalMerge { survivor: self.id, absorbed: other.id, slot });
            }
            if self.slots[slot].is_none() {
                self.slots[slot] = Some(*theirs);
                self.open -= 1;
            }
        }
        self.catalog = self.catalog.intersection(&other.catalog);
        if self.catalog.is_empty() {
            return Err(Contradiction::EmptyCatalog(self.id));
        }
        Ok(())
    }

    pub(crate) fn set_location(&mut self, location: Point) {
        self.location = Some(location);
    }

    pub(crate) fn set_forward(&mut self, survivor: VertexId) {
        self.forward = Some(survivor);
    }
}
