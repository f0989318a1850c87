use crate::{
    error::{Error, Result},
    vertex::VertexId,
};
use atlas::{orientation, Orientation};
use geometry::Point;
use serde::{Deserialize, Serialize};
use tile::{Kind, Wedge};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TileId(pub usize);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

// PatchTile is one kite or dart placed in a Patch. Its corners are indexed by Corner::index,
// clockwise around the tile. Orientation is fixed by the first wedge placed and never changes.
#[derive(Clone, Debug)]
pub struct PatchTile {
    id: TileId,
    kind: Kind,
    corners: [VertexId; 4],
    orientation: Option<&'static Orientation>,
}

impl PatchTile {
    pub fn new(id: TileId, kind: Kind, corners: [VertexId; 4]) -> PatchTile {
        PatchTile { id, kind, corners, orientation: None }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn corners(&self) -> [VertexId; 4] {
        self.corners
    }

    pub fn orientation(&self) -> Option<&'static Orientation> {
        self.orientation
    }

    pub fn rotation(&self) -> Option<usize> {
        self.orientation.map(|orientation| orientation.rotation)
    }

    fn check_kind(&self, wedge: Wedge) -> Result<()> {
        if wedge.kind() != self.kind {
            return Err(Error::WrongKind { tile: self.id, wedge });
        }
        Ok(())
    }

    pub fn vertex_at(&self, wedge: Wedge) -> Result<VertexId> {
        self.check_kind(wedge)?;
        Ok(self.corners[wedge.corner().index()])
    }

    pub fn corner_index_of(&self, vertex: VertexId) -> Option<usize> {
        self.corners.iter().position(|corner| *corner == vertex)
    }

    // clockwise_of returns the corner at the far end of the tile's clockwise edge out of vertex
    pub fn clockwise_of(&self, vertex: VertexId) -> Option<VertexId> {
        self.corner_index_of(vertex).map(|i| self.corners[(i + 3) % 4])
    }

    // counterclockwise_of returns the corner at the far end of the tile's counter-clockwise edge
    // out of vertex
    pub fn counterclockwise_of(&self, vertex: VertexId) -> Option<VertexId> {
        self.corner_index_of(vertex).map(|i| self.corners[(i + 1) % 4])
    }

    // slot_of returns the slot wedge occupies around its corner, once oriented
    pub fn slot_of(&self, wedge: Wedge) -> Option<usize> {
        if wedge.kind() != self.kind {
            return None;
        }
        self.orientation.map(|orientation| orientation.slot(wedge))
    }

    // set_orientation fixes the rotation which puts wedge in slot. Only the first call has any
    // effect; it reports whether this call was the one that fixed the orientation.
    pub(crate) fn set_orientation(&mut self, wedge: Wedge, slot: usize) -> Result<bool> {
        self.check_kind(wedge)?;
        if self.orientation.is_some() {
            return Ok(false);
        }
        self.orientation = Some(orientation(wedge, slot));
        Ok(true)
    }

    pub(crate) fn replace_vertex(&mut self, old: VertexId, new: VertexId) -> bool {
        let mut replaced = false;
        for corner in self.corners.iter_mut().filter(|corner| **corner == old) {
            *corner = new;
            replaced = true;
        }
        replaced
    }

    // exposures lists, per corner vertex, the slots the tile's wedges fill around it
    pub fn exposures(&self) -> Result<Vec<(VertexId, Vec<(usize, Wedge)>)>> {
        let orientation = self.orientation.ok_or(Error::NoOrientation(self.id))?;
        Ok(self
            .kind
            .corners()
            .iter()
            .map(|corner| {
                let placements = corner.wedges().iter().map(|wedge| (orientation.slot(*wedge), *wedge)).collect();
                (self.corners[corner.index()], placements)
            })
            .collect())
    }

    // derive computes where corner `target` sits given that corner `known` sits at location
    pub fn derive(&self, known: usize, location: &Point, target: usize) -> Option<Point> {
        self.orientation.map(|orientation| orientation.locate(known, location, target))
    }
}

impl std::fmt::Display for PatchTile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.label(), self.id)?;
        if let Some(rotation) = self.rotation() {
            write!(f, "+{}", rotation)?;
        }
        Ok(())
    }
}
