use crate::{
    error::Result,
    patch::Patch,
    patch_tile::TileId,
    vertex::VertexId,
};
use serde::Serialize;
use tile::{Kind, Wedge, SLOTS};

// TileSnapshot is a read-only copy of one tile, for renderers and colorers
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileSnapshot {
    pub id: TileId,
    pub kind: Kind,
    pub rotation: Option<usize>,
    pub corners: [VertexId; 4],
    pub points: [Option<(f64, f64)>; 4],
}

// VertexSnapshot is a read-only copy of one vertex
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VertexSnapshot {
    pub id: VertexId,
    pub location: Option<(f64, f64)>,
    pub open: usize,
    pub figures: usize, // legal figures still possible here
    pub slots: [Option<(TileId, Wedge)>; SLOTS],
}

impl Patch {
    pub fn tile_snapshot(&self, tile: TileId) -> Result<TileSnapshot> {
        let patch_tile = self.tile(tile)?;
        let mut points = [None; 4];
        for (point, corner) in points.iter_mut().zip(self.corner_points(tile)?.iter()) {
            *point = corner.map(|corner| corner.values());
        }
        Ok(TileSnapshot {
            id: tile,
            kind: patch_tile.kind(),
            rotation: patch_tile.rotation(),
            corners: patch_tile.corners(),
            points,
        })
    }

    pub fn vertex_snapshot(&self, vertex: VertexId) -> Result<VertexSnapshot> {
        let vertex = self.vertex(vertex)?;
        let mut slots = [None; SLOTS];
        for (slot, occupant) in slots.iter_mut().zip(vertex.slots().iter()) {
            *slot = occupant.map(|occupant| (occupant.tile, occupant.wedge));
        }
        Ok(VertexSnapshot {
            id: vertex.id(),
            location: vertex.location().map(|location| location.values()),
            open: vertex.open(),
            figures: vertex.catalog().len(),
            slots,
        })
    }

    // tile_snapshots copies every tile that has been placed
    pub fn tile_snapshots(&self) -> Vec<TileSnapshot> {
        self.tiles()
            .iter()
            .filter(|tile| tile.orientation().is_some())
            .filter_map(|tile| self.tile_snapshot(tile.id()).ok())
            .collect()
    }

    // vertex_snapshots copies every live vertex
    pub fn vertex_snapshots(&self) -> Vec<VertexSnapshot> {
        self.live_vertices()
            .into_iter()
            .filter_map(|vertex| self.vertex_snapshot(vertex).ok())
            .collect()
    }
}
