use crate::{
    patch_tile::{PatchTile, TileId},
    registry::Change,
    vertex::{Vertex, VertexId},
};
use std::collections::HashMap;

// Journal records what a Patch looked like at its last checkpoint: how many vertices and tiles
// it had, the first-touch before-image of every older vertex or tile modified since, and every
// registry change made since, in order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Journal {
    pub vertices_len: usize,
    pub tiles_len: usize,
    pub vertices: HashMap<VertexId, Vertex>,
    pub tiles: HashMap<TileId, PatchTile>,
    pub changes: Vec<Change>,
}

impl Journal {
    pub fn new(vertices_len: usize, tiles_len: usize) -> Journal {
        Journal {
            vertices_len,
            tiles_len,
            ..Journal::default()
        }
    }

    // record_vertex keeps vertex's before-image unless it already has one or didn't exist yet
    pub fn record_vertex(&mut self, vertex: &Vertex) {
        if vertex.id().0 < self.vertices_len {
            self.vertices.entry(vertex.id()).or_insert_with(|| vertex.clone());
        }
    }

    pub fn record_tile(&mut self, tile: &PatchTile) {
        if tile.id().0 < self.tiles_len {
            self.tiles.entry(tile.id()).or_insert_with(|| tile.clone());
        }
    }

    pub fn record_change(&mut self, change: Change) {
        self.changes.push(change);
    }
}
