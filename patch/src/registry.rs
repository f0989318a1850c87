use crate::vertex::VertexId;
use geometry::{Point, PointIndex};
use std::collections::BTreeSet;

// Change is one reversible edit to a Registry
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Change {
    Registered(VertexId, Point),
    Unregistered(VertexId, Point),
}

// Registry tracks the live, located vertices of a Patch and finds them by location
#[derive(Clone, Debug)]
pub struct Registry {
    live: BTreeSet<VertexId>,
    index: PointIndex<VertexId>,
}

impl Registry {
    pub fn new(tolerance: f64) -> Registry {
        Registry {
            live: BTreeSet::new(),
            index: PointIndex::new(tolerance),
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn is_live(&self, vertex: VertexId) -> bool {
        self.live.contains(&vertex)
    }

    // live iterates live vertices in id order
    pub fn live(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.live.iter().copied()
    }

    // find returns the live vertex within tolerance of point, if any
    pub fn find(&self, point: &Point) -> Option<VertexId> {
        self.index.find(point).map(|(_, vertex)| *vertex)
    }

    pub(crate) fn apply(&mut self, change: Change) {
        match change {
            Change::Registered(vertex, point) => {
                self.live.insert(vertex);
                self.index.insert(point, vertex);
            }
            Change::Unregistered(vertex, point) => {
                self.live.remove(&vertex);
                self.index.remove(&point);
            }
        }
    }

    pub(crate) fn revert(&mut self, change: Change) {
        match change {
            Change::Registered(vertex, point) => self.apply(Change::Unregistered(vertex, point)),
            Change::Unregistered(vertex, point) => self.apply(Change::Registered(vertex, point)),
        }
    }
}
