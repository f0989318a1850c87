use crate::{
    config::Config,
    error::{Contradiction, Error, Result},
    journal::Journal,
    patch_tile::{PatchTile, TileId},
    registry::{Change, Registry},
    vertex::{Occupant, Vertex, VertexId},
};
use atlas::Catalog;
use geometry::{Point, ORIGIN};
use itertools::Itertools;
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
};
use tile::{Wedge, SLOTS};

// DISPLACEMENT is how far apart two derivations of one vertex may land before the patch is
// geometrically inconsistent
pub const DISPLACEMENT: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Work {
    Merge(VertexId, VertexId), // survivor, absorbed
    Cascade(VertexId),
    Spread(VertexId),
}

// Patch owns every vertex and tile of a growing kite and dart tiling. Vertices and tiles live
// in arenas addressed by id; merged-away vertices stay in the arena and forward to their
// survivors. Changes made by a placement are journaled so that a placement which breaks the
// matching rules can be rolled back.
#[derive(Clone, Debug)]
pub struct Patch {
    config: Config,
    vertices: Vec<Vertex>,
    tiles: Vec<PatchTile>,
    registry: Registry,
    work: VecDeque<Work>,
    journal: Option<Journal>,
}

impl Default for Patch {
    fn default() -> Self {
        Patch::new(Config::default())
    }
}

impl Patch {
    pub fn new(config: Config) -> Patch {
        Patch {
            registry: Registry::new(config.tolerance),
            config,
            vertices: vec![],
            tiles: vec![],
            work: VecDeque::new(),
            journal: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // seed returns the live vertex at point, creating it if there is none
    pub fn seed(&mut self, point: Point) -> VertexId {
        if let Some(vertex) = self.registry.find(&point) {
            return vertex;
        }
        let vertex = self.new_vertex();
        self.vertex_mut(vertex).set_location(point);
        self.change(Change::Registered(vertex, point));
        vertex
    }

    // new_tile creates an unplaced tile of wedge's kind with 4 fresh corner vertices
    pub fn new_tile(&mut self, wedge: Wedge) -> TileId {
        let corners = [self.new_vertex(), self.new_vertex(), self.new_vertex(), self.new_vertex()];
        let id = TileId(self.tiles.len());
        self.tiles.push(PatchTile::new(id, wedge.kind(), corners));
        id
    }

    // attach puts wedge of tile into slot of vertex, merging the tile's corner into vertex and
    // propagating merges and locations until nothing changes. On a contradiction the patch is
    // left exactly as it was.
    pub fn attach(&mut self, vertex: VertexId, tile: TileId, wedge: Wedge, slot: usize) -> Result<()> {
        self.check_placement(vertex, wedge, slot)?;
        if self.tile(tile)?.kind() != wedge.kind() {
            return Err(Error::WrongKind { tile, wedge });
        }
        self.transact(|patch| patch.attach_unchecked(vertex, tile, wedge, slot))
    }

    // place attaches a new tile by wedge into slot of vertex, then fills every forced slot in
    // the patch. On a contradiction the patch is left exactly as it was.
    pub fn place(&mut self, vertex: VertexId, wedge: Wedge, slot: usize) -> Result<TileId> {
        self.place_counted(vertex, wedge, slot).map(|(tile, _)| tile)
    }

    // place_counted is place, also returning how many tiles were forced
    pub(crate) fn place_counted(&mut self, vertex: VertexId, wedge: Wedge, slot: usize) -> Result<(TileId, usize)> {
        self.check_placement(vertex, wedge, slot)?;
        self.transact(|patch| {
            let tile = patch.new_tile(wedge);
            patch.attach_unchecked(vertex, tile, wedge, slot)?;
            let forced = patch.force()?;
            Ok((tile, forced))
        })
    }

    fn check_placement(&self, vertex: VertexId, wedge: Wedge, slot: usize) -> Result<()> {
        if self.resolve(vertex)? != vertex {
            return Err(Error::DeadVertex(vertex));
        }
        if slot >= SLOTS {
            return Err(Error::SlotOutOfRange(slot));
        }
        log::trace!("placing {} into slot {} of {}", wedge, slot, vertex);
        Ok(())
    }

    // transact runs f against a fresh checkpoint, rolling back to it if f fails
    fn transact<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Patch) -> Result<T>,
    {
        self.journal = Some(Journal::new(self.vertices.len(), self.tiles.len()));
        let result = f(self);
        match &result {
            Ok(_) => self.journal = None,
            Err(error) => {
                log::debug!("rolling back: {}", error);
                self.rollback();
            }
        }
        result
    }

    fn rollback(&mut self) {
        self.work.clear();
        let journal = match self.journal.take() {
            Some(journal) => journal,
            None => return,
        };
        for change in journal.changes.iter().rev() {
            self.registry.revert(*change);
        }
        self.vertices.truncate(journal.vertices_len);
        self.tiles.truncate(journal.tiles_len);
        for (id, vertex) in journal.vertices {
            self.vertices[id.0] = vertex;
        }
        for (id, tile) in journal.tiles {
            self.tiles[id.0] = tile;
        }
    }

    fn attach_unchecked(&mut self, vertex: VertexId, tile: TileId, wedge: Wedge, slot: usize) -> Result<()> {
        if self.tile_mut(tile).set_orientation(wedge, slot)? {
            self.expose(tile)?;
        }
        if self.tiles[tile.0].slot_of(wedge) != Some(slot) {
            return Err(Contradiction::Misaligned { tile, wedge, slot }.into());
        }
        let corner = self.tiles[tile.0].vertex_at(wedge)?;
        self.work.push_back(Work::Merge(vertex, corner));
        self.settle()
    }

    // expose fills the slots around each of a newly oriented tile's corners with its wedges
    fn expose(&mut self, tile: TileId) -> Result<()> {
        for (vertex, placements) in self.tiles[tile.0].exposures()? {
            self.vertex_mut(vertex).occupy_slots(tile, &placements)?;
            self.work.push_back(Work::Cascade(vertex));
            if self.vertices[vertex.0].location().is_some() {
                self.work.push_back(Work::Spread(vertex));
            }
        }
        Ok(())
    }

    // settle drains the worklist
    fn settle(&mut self) -> Result<()> {
        while let Some(work) = self.work.pop_front() {
            let result = match work {
                Work::Merge(survivor, absorbed) => self.merge(survivor, absorbed),
                Work::Cascade(vertex) => {
                    self.cascade(vertex);
                    Ok(())
                }
                Work::Spread(vertex) => self.spread(vertex),
            };
            if let Err(error) = result {
                self.work.clear();
                return Err(error);
            }
        }
        Ok(())
    }

    // merge unifies two vertices found to be the same point. The survivor takes the absorbed
    // vertex's slots and every tile pointing at it; the absorbed vertex forwards to the survivor.
    fn merge(&mut self, survivor: VertexId, absorbed: VertexId) -> Result<()> {
        let mut survivor = self.compress(survivor);
        let mut absorbed = self.compress(absorbed);
        if survivor == absorbed {
            return Ok(());
        }
        // a located survivor keeps its registration
        if self.vertices[survivor.0].location().is_none() && self.vertices[absorbed.0].location().is_some() {
            std::mem::swap(&mut survivor, &mut absorbed);
        }

        let before = self.vertices[absorbed.0].clone();
        if let (Some(location), Some(derived)) = (self.vertices[survivor.0].location(), before.location()) {
            if !location.is_near(&derived, DISPLACEMENT) {
                return Err(Contradiction::Displaced { vertex: survivor, location, derived }.into());
            }
        }

        log::debug!("merging {} into {}", absorbed, survivor);
        self.vertex_mut(survivor).absorb(&before)?;
        if let Some(location) = before.location() {
            self.change(Change::Unregistered(absorbed, location));
        }
        self.vertex_mut(absorbed).set_forward(survivor);
        for tile in before.tiles() {
            self.tile_mut(tile).replace_vertex(absorbed, survivor);
        }

        self.work.push_back(Work::Cascade(survivor));
        if self.vertices[survivor.0].location().is_some() {
            self.work.push_back(Work::Spread(survivor));
        }
        Ok(())
    }

    // cascade queues a merge for every pair of different tiles sharing an edge out of vertex:
    // the edge's far ends are one vertex
    fn cascade(&mut self, vertex: VertexId) {
        let vertex = self.root(vertex);
        let slots = *self.vertices[vertex.0].slots();
        for i in 0..SLOTS {
            let (clockwise, counterclockwise) = match (slots[i], slots[(i + 1) % SLOTS]) {
                (Some(clockwise), Some(counterclockwise)) if clockwise.tile != counterclockwise.tile => {
                    (clockwise, counterclockwise)
                }
                _ => continue,
            };
            let a = self.tiles[clockwise.tile.0].corners()[(clockwise.wedge.corner().index() + 1) % 4];
            let b = self.tiles[counterclockwise.tile.0].corners()[(counterclockwise.wedge.corner().index() + 3) % 4];
            if self.root(a) != self.root(b) {
                self.work.push_back(Work::Merge(a, b));
            }
        }
    }

    // spread derives, from vertex's location, the location of every other corner of the tiles
    // around it
    fn spread(&mut self, vertex: VertexId) -> Result<()> {
        let vertex = self.root(vertex);
        let location = match self.vertices[vertex.0].location() {
            Some(location) => location,
            None => return Ok(()),
        };
        let occupants: Vec<Occupant> = self.vertices[vertex.0]
            .slots()
            .iter()
            .flatten()
            .copied()
            .unique_by(|occupant| occupant.tile)
            .collect();

        for occupant in occupants {
            let known = occupant.wedge.corner().index();
            for target in (0..4).filter(|target| *target != known) {
                // re-read the tile on every pass since locating a corner can merge another
                let tile = &self.tiles[occupant.tile.0];
                let corner = tile.corners()[target];
                if let Some(derived) = tile.derive(known, &location, target) {
                    self.locate(corner, derived)?;
                }
            }
        }
        Ok(())
    }

    // locate gives vertex the derived location, merging it into any live vertex already there
    fn locate(&mut self, vertex: VertexId, derived: Point) -> Result<()> {
        let vertex = self.root(vertex);
        if let Some(location) = self.vertices[vertex.0].location() {
            if !location.is_near(&derived, DISPLACEMENT) {
                return Err(Contradiction::Displaced { vertex, location, derived }.into());
            }
            return Ok(());
        }
        if let Some(existing) = self.registry.find(&derived) {
            return self.merge(existing, vertex);
        }
        self.vertex_mut(vertex).set_location(derived);
        self.change(Change::Registered(vertex, derived));
        self.work.push_back(Work::Spread(vertex));
        Ok(())
    }

    // force fills every slot whose wedge all of its vertex's remaining figures agree on,
    // visiting the least open vertices first, until a full pass adds nothing. It returns the
    // number of tiles added.
    pub(crate) fn force(&mut self) -> Result<usize> {
        let mut total = 0;
        loop {
            let mut added = 0;
            let mut queue: BinaryHeap<Reverse<(usize, VertexId)>> = self
                .live_non_full_vertices()
                .into_iter()
                .map(|vertex| Reverse((self.vertices[vertex.0].open(), vertex)))
                .collect();

            while let Some(Reverse((_, vertex))) = queue.pop() {
                // earlier placements in this pass may have merged vertex away
                while !self.vertices[vertex.0].is_dead() {
                    let (slot, wedge) = match self.vertices[vertex.0].forced_assignments().first() {
                        Some(assignment) => *assignment,
                        None => break,
                    };
                    log::trace!("forcing {} into slot {} of {}", wedge, slot, vertex);
                    let tile = self.new_tile(wedge);
                    self.attach_unchecked(vertex, tile, wedge, slot)?;
                    added += 1;
                }
            }

            total += added;
            if added == 0 {
                return Ok(total);
            }
        }
    }

    fn new_vertex(&mut self) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(id));
        id
    }

    fn vertex_mut(&mut self, vertex: VertexId) -> &mut Vertex {
        if let Some(journal) = &mut self.journal {
            journal.record_vertex(&self.vertices[vertex.0]);
        }
        &mut self.vertices[vertex.0]
    }

    fn tile_mut(&mut self, tile: TileId) -> &mut PatchTile {
        if let Some(journal) = &mut self.journal {
            journal.record_tile(&self.tiles[tile.0]);
        }
        &mut self.tiles[tile.0]
    }

    fn change(&mut self, change: Change) {
        self.registry.apply(change);
        if let Some(journal) = &mut self.journal {
            journal.record_change(change);
        }
    }

    fn root(&self, vertex: VertexId) -> VertexId {
        let mut current = vertex;
        while let Some(forward) = self.vertices[current.0].forward() {
            current = forward;
        }
        current
    }

    // compress resolves vertex and points every vertex along the way straight at the survivor
    fn compress(&mut self, vertex: VertexId) -> VertexId {
        let root = self.root(vertex);
        let mut current = vertex;
        while current != root {
            let next = self.vertices[current.0].forward().unwrap_or(root);
            if next != root {
                self.vertex_mut(current).set_forward(root);
            }
            current = next;
        }
        root
    }

    // resolve returns the live vertex that vertex was merged into, or vertex itself
    pub fn resolve(&self, vertex: VertexId) -> Result<VertexId> {
        if vertex.0 >= self.vertices.len() {
            return Err(Error::UnknownVertex(vertex));
        }
        Ok(self.root(vertex))
    }

    // vertex returns the vertex that id currently denotes
    pub fn vertex(&self, vertex: VertexId) -> Result<&Vertex> {
        let vertex = self.resolve(vertex)?;
        Ok(&self.vertices[vertex.0])
    }

    pub fn tile(&self, tile: TileId) -> Result<&PatchTile> {
        self.tiles.get(tile.0).ok_or(Error::UnknownTile(tile))
    }

    pub fn tiles(&self) -> &[PatchTile] {
        &self.tiles
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn live_vertices(&self) -> Vec<VertexId> {
        self.registry.live().collect()
    }

    pub fn live_non_full_vertices(&self) -> Vec<VertexId> {
        self.registry.live().filter(|vertex| !self.vertices[vertex.0].is_full()).collect()
    }

    pub fn find_any_live_non_full_vertex(&self) -> Option<VertexId> {
        self.registry.live().find(|vertex| !self.vertices[vertex.0].is_full())
    }

    // vertex_near returns the live vertex within tolerance of point
    pub fn vertex_near(&self, point: &Point) -> Option<VertexId> {
        self.registry.find(point)
    }

    pub fn clockwise_of(&self, tile: TileId, vertex: VertexId) -> Result<VertexId> {
        let vertex = self.resolve(vertex)?;
        self.tile(tile)?.clockwise_of(vertex).ok_or(Error::NotACorner { tile, vertex })
    }

    pub fn counterclockwise_of(&self, tile: TileId, vertex: VertexId) -> Result<VertexId> {
        let vertex = self.resolve(vertex)?;
        self.tile(tile)?.counterclockwise_of(vertex).ok_or(Error::NotACorner { tile, vertex })
    }

    // corner_points returns the location of each of tile's corners
    pub fn corner_points(&self, tile: TileId) -> Result<[Option<Point>; 4]> {
        let mut points = [None; 4];
        for (point, corner) in points.iter_mut().zip(self.tile(tile)?.corners().iter()) {
            *point = self.vertices[corner.0].location();
        }
        Ok(points)
    }

    // shape_points returns the 4 corner points of every tile whose corners are all located
    pub fn shape_points(&self) -> Vec<[Point; 4]> {
        self.tiles
            .iter()
            .filter_map(|tile| {
                let mut points = [ORIGIN; 4];
                for (point, corner) in points.iter_mut().zip(tile.corners().iter()) {
                    *point = self.vertices[corner.0].location()?;
                }
                Some(points)
            })
            .collect()
    }

    // validate checks that every live vertex agrees with the catalog, the registry and the tiles
    // around it, and that every placed tile's corners sit where its orientation puts them
    pub fn validate(&self) -> std::result::Result<(), String> {
        for id in self.registry.live() {
            let vertex = &self.vertices[id.0];
            if vertex.is_dead() {
                return Err(format!("{} is registered but was merged away", id));
            }
            let location = vertex.location().ok_or_else(|| format!("{} is registered without a location", id))?;
            if self.registry.find(&location) != Some(id) {
                return Err(format!("{} is not indexed at {}", id, location));
            }
            if vertex.open() != vertex.open_slots().len() {
                return Err(format!("{} counts {} open slots but has {}", id, vertex.open(), vertex.open_slots().len()));
            }
            let catalog = vertex.catalog();
            if catalog.is_empty() || catalog.intersection(&Catalog::matching(&vertex.fills())) != catalog {
                return Err(format!("{} has a catalog that disagrees with its slots", id));
            }
            for (slot, occupant) in vertex.slots().iter().enumerate() {
                let occupant = match occupant {
                    Some(occupant) => occupant,
                    None => continue,
                };
                let tile = &self.tiles[occupant.tile.0];
                if tile.vertex_at(occupant.wedge) != Ok(id) {
                    return Err(format!("{} fills slot {} of {} from another corner", tile, slot, id));
                }
                if tile.slot_of(occupant.wedge) != Some(slot) {
                    return Err(format!("{} fills slot {} of {} against its orientation", tile, slot, id));
                }
            }
        }

        for tile in self.tiles.iter().filter(|tile| tile.orientation().is_some()) {
            let corners = tile.corners();
            if let Some(corner) = corners.iter().find(|corner| self.vertices[corner.0].is_dead()) {
                return Err(format!("{} still points at merged away {}", tile, corner));
            }
            let origin = match self.vertices[corners[0].0].location() {
                Some(origin) => origin,
                None => continue,
            };
            for (i, corner) in corners.iter().enumerate().skip(1) {
                let location = match self.vertices[corner.0].location() {
                    Some(location) => location,
                    None => continue,
                };
                let derived = tile.derive(0, &origin, i).unwrap_or(origin);
                if !location.is_near(&derived, DISPLACEMENT) {
                    return Err(format!("{} puts {} at {} but it is at {}", tile, corner, derived, location));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{TileSnapshot, VertexSnapshot};
    use common::approx_eq;
    use geometry::Bounds;
    use rand::{rngs::StdRng, SeedableRng};
    use std::f64::consts::PI;

    // state captures what a rollback has to restore
    fn state(patch: &Patch) -> (Vec<VertexId>, Vec<(usize, Catalog)>, usize, usize) {
        let live = patch.live_vertices();
        let vertices = live
            .iter()
            .map(|vertex| (patch.vertices[vertex.0].open(), patch.vertices[vertex.0].catalog()))
            .collect();
        (live, vertices, patch.tiles.len(), patch.vertices.len())
    }

    #[test]
    fn test_patch_seed() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        assert_eq!(seed, patch.seed(Point(1e-16, 0.)));
        assert_ne!(seed, patch.seed(Point(1e-10, 0.)));
        assert_eq!(2, patch.live_vertices().len());
        assert_eq!(Some(seed), patch.vertex_near(&Point(0., -1e-16)));
        assert_eq!(None, patch.vertex_near(&Point(0.5, 0.)));
    }

    #[test]
    fn test_patch_locate_merges_near_points() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);

        let near = patch.new_vertex();
        patch.locate(near, Point(1e-16, 0.)).unwrap();
        assert_eq!(Ok(seed), patch.resolve(near));

        let far = patch.new_vertex();
        patch.locate(far, Point(1e-10, 0.)).unwrap();
        patch.settle().unwrap();
        assert_eq!(Ok(far), patch.resolve(far));
        assert_eq!(vec![seed, far], patch.live_vertices());
    }

    #[test]
    fn test_patch_attach_dart_at_seed() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        let dart = patch.new_tile(Wedge::D0);
        patch.attach(seed, dart, Wedge::D0, 0).unwrap();

        let vertex = patch.vertex(seed).unwrap();
        assert_eq!(2, vertex.filled());
        assert_eq!(8, vertex.open());
        assert_eq!(Some(Occupant { tile: dart, wedge: Wedge::D0 }), vertex.slot(0));
        assert_eq!(Some(Occupant { tile: dart, wedge: Wedge::D1 }), vertex.slot(1));
        assert_eq!(5, vertex.catalog().len());

        let tile = patch.tile(dart).unwrap();
        assert_eq!(seed, tile.corners()[0]);
        assert_eq!(4, patch.live_vertices().len());

        let points = patch.corner_points(dart).unwrap();
        let tenth = PI / 5.;
        approx_eq!(&Point, &ORIGIN, &points[0].unwrap());
        approx_eq!(&Point, &Point((2. * tenth).cos(), (2. * tenth).sin()), &points[1].unwrap());
        approx_eq!(&Point, &Point(0.5, tenth.tan() / 2.), &points[2].unwrap());
        approx_eq!(&Point, &Point(1., 0.), &points[3].unwrap());
        assert_eq!(Ok(()), patch.validate());
    }

    #[test]
    fn test_patch_neighbors_of_a_corner() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        let dart = patch.place(seed, Wedge::D0, 0).unwrap();
        let corners = patch.tile(dart).unwrap().corners();

        assert_eq!(Ok(corners[3]), patch.clockwise_of(dart, seed));
        assert_eq!(Ok(corners[1]), patch.counterclockwise_of(dart, seed));
        assert_eq!(Ok(corners[2]), patch.clockwise_of(dart, corners[3]));
        assert_eq!(Ok(seed), patch.counterclockwise_of(dart, corners[3]));
    }

    #[test]
    fn test_patch_misuse() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        let kite = patch.new_tile(Wedge::K0);

        assert_eq!(Err(Error::WrongKind { tile: kite, wedge: Wedge::D0 }), patch.attach(seed, kite, Wedge::D0, 0));
        assert_eq!(Err(Error::SlotOutOfRange(10)), patch.attach(seed, kite, Wedge::K0, 10));
        assert_eq!(Err(Error::UnknownVertex(VertexId(99))), patch.place(VertexId(99), Wedge::K0, 0));
        assert_eq!(Err(Error::UnknownTile(TileId(5))), patch.attach(seed, TileId(5), Wedge::K0, 0));

        patch.attach(seed, kite, Wedge::K0, 0).unwrap();
        // the kite's own K vertex was merged into the seed
        let absorbed = VertexId(1);
        assert_eq!(Ok(seed), patch.resolve(absorbed));
        assert_eq!(Err(Error::DeadVertex(absorbed)), patch.place(absorbed, Wedge::K0, 2));

        let other = patch.new_tile(Wedge::D0);
        let stranger = patch.tile(other).unwrap().corners()[0];
        assert_eq!(Err(Error::NotACorner { tile: kite, vertex: stranger }), patch.clockwise_of(kite, stranger));
        assert_eq!(Err(Error::UnknownVertex(VertexId(99))), patch.clockwise_of(kite, VertexId(99)));
    }

    #[test]
    fn test_patch_place_rolls_back() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        patch.place(seed, Wedge::D0, 0).unwrap();
        let before = state(&patch);

        // no figure puts a kite's K corner beside a dart's D corner
        match patch.place(seed, Wedge::K0, 2) {
            Err(Error::Contradiction(_)) => {}
            result => panic!("expected a contradiction, got {:?}", result),
        }
        assert_eq!(before, state(&patch));
        assert!(patch.journal.is_none());
        assert!(patch.work.is_empty());
        assert_eq!(Ok(()), patch.validate());
    }

    #[test]
    fn test_patch_attach_rolls_back_existing_tile() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        patch.place(seed, Wedge::D0, 0).unwrap();
        let kite = patch.new_tile(Wedge::K0);
        let before = state(&patch);

        assert!(patch.attach(seed, kite, Wedge::K0, 2).unwrap_err().is_contradiction());
        assert_eq!(before, state(&patch));
        // the kite was restored to its unplaced self
        assert_eq!(None, patch.tile(kite).unwrap().rotation());
        assert!(patch.tile(kite).unwrap().corners().iter().all(|corner| patch.vertices[corner.0].filled() == 0));
    }

    #[test]
    fn test_patch_attach_misaligned() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        let dart = patch.new_tile(Wedge::D0);
        patch.attach(seed, dart, Wedge::D0, 0).unwrap();
        let before = state(&patch);

        // the dart is already oriented, so its D0 can only ever be in slot 0
        assert_eq!(
            Err(Error::Contradiction(Contradiction::Misaligned { tile: dart, wedge: Wedge::D0, slot: 3 })),
            patch.attach(seed, dart, Wedge::D0, 3)
        );
        assert_eq!(before, state(&patch));
        assert_eq!(Some(0), patch.tile(dart).unwrap().rotation());
        assert_eq!(Ok(()), patch.validate());
    }

    #[test]
    fn test_patch_attach_displaced() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        let far = patch.seed(Point(5., 5.));
        let kite = patch.new_tile(Wedge::K0);
        patch.attach(far, kite, Wedge::K0, 0).unwrap();
        let before = state(&patch);
        let tiles = patch.tile_snapshots();

        // the kite's K corner is already at (5, 5) and can't also be at the origin
        assert_eq!(
            Err(Error::Contradiction(Contradiction::Displaced {
                vertex: seed,
                location: ORIGIN,
                derived: Point(5., 5.)
            })),
            patch.attach(seed, kite, Wedge::K0, 0)
        );
        assert_eq!(before, state(&patch));
        assert_eq!(tiles, patch.tile_snapshots());
        assert_eq!(Ok(far), patch.resolve(far));
        assert_eq!(0, patch.vertex(seed).unwrap().filled());
        assert_eq!(Ok(()), patch.validate());
    }

    // every placement tried on a grown patch either commits a valid patch or leaves the patch
    // exactly as it was
    #[test]
    fn test_patch_place_rolls_back_anywhere() {
        let mut contradictions = 0;
        for seed in 0..4 {
            let mut patch = Patch::new(Config { max_steps: Some(6), max_retries: Some(1000), ..Config::default() });
            patch.seed(ORIGIN);
            let mut rng = StdRng::seed_from_u64(seed);
            patch.grow(&Bounds::centered(&ORIGIN, 3.), &mut rng).unwrap();

            let before: (Vec<VertexSnapshot>, Vec<TileSnapshot>, Vec<VertexId>) =
                (patch.vertex_snapshots(), patch.tile_snapshots(), patch.live_vertices());
            for vertex in patch.live_non_full_vertices() {
                for slot in patch.vertices[vertex.0].open_slots() {
                    for wedge in Wedge::all() {
                        let mut trial = patch.clone();
                        match trial.place(vertex, *wedge, slot) {
                            Ok(_) => assert_eq!(Ok(()), trial.validate()),
                            Err(error) => {
                                assert!(error.is_contradiction(), "{} in slot {} of {}: {}", wedge, slot, vertex, error);
                                contradictions += 1;
                                let after = (trial.vertex_snapshots(), trial.tile_snapshots(), trial.live_vertices());
                                assert_eq!(before, after, "{} in slot {} of {}", wedge, slot, vertex);
                                assert_eq!(patch.vertices.len(), trial.vertices.len());
                                assert!(trial.journal.is_none());
                                assert!(trial.work.is_empty());
                                assert_eq!(Ok(()), trial.validate());
                            }
                        }
                    }
                }
            }
        }
        assert!(contradictions > 0);
    }

    #[test]
    fn test_patch_place_forces() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        patch.place(seed, Wedge::E0, 7).unwrap();

        // a lone E corner forces a kite's M corner beside it
        let vertex = patch.vertex(seed).unwrap();
        let m = [Wedge::M0, Wedge::M1, Wedge::M2, Wedge::M3];
        for (slot, wedge) in [8, 9, 0, 1].iter().zip(m.iter()) {
            assert_eq!(Some(*wedge), vertex.slot(*slot).map(|occupant| occupant.wedge));
        }
        assert!(patch.tiles().len() >= 2);
        assert_eq!(Ok(()), patch.validate());

        // nothing forced is left over
        for vertex in patch.live_non_full_vertices() {
            assert!(patch.vertices[vertex.0].forced_assignments().is_empty());
        }
    }

    // two darts reached through unconnected kites meet at the same point and are merged there
    #[test]
    fn test_patch_geometric_merge() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);

        let kite_1 = patch.new_tile(Wedge::K0);
        patch.attach(seed, kite_1, Wedge::K0, 0).unwrap();
        let dart_1 = patch.new_tile(Wedge::F5);
        let n = patch.tile(kite_1).unwrap().vertex_at(Wedge::N0).unwrap();
        patch.attach(n, dart_1, Wedge::F5, 2).unwrap();

        // sharing an edge with the kite puts the dart's G at the kite's M
        assert_eq!(
            patch.tile(kite_1).unwrap().vertex_at(Wedge::M0),
            patch.tile(dart_1).unwrap().vertex_at(Wedge::G0)
        );

        let kite_2 = patch.new_tile(Wedge::K1);
        patch.attach(seed, kite_2, Wedge::K1, 7).unwrap();
        let dart_2 = patch.new_tile(Wedge::F0);
        let l = patch.tile(kite_2).unwrap().vertex_at(Wedge::L0).unwrap();
        patch.attach(l, dart_2, Wedge::F0, 5).unwrap();

        let e = patch.tile(dart_1).unwrap().vertex_at(Wedge::E0).unwrap();
        let g = patch.tile(dart_2).unwrap().vertex_at(Wedge::G0).unwrap();
        assert_eq!(e, g);

        let vertex = patch.vertex(e).unwrap();
        assert_eq!(2, vertex.filled());
        assert_eq!(Some(Wedge::E0), vertex.slot(1).map(|occupant| occupant.wedge));
        assert_eq!(Some(Wedge::G0), vertex.slot(6).map(|occupant| occupant.wedge));
        let tenth = PI / 5.;
        approx_eq!(&Point, &Point(tenth.cos(), -tenth.sin()), &vertex.location().unwrap());
        assert_eq!(Ok(()), patch.validate());
    }

    #[test]
    fn test_patch_shape_points() {
        let mut patch = Patch::default();
        let seed = patch.seed(ORIGIN);
        let unplaced = patch.new_tile(Wedge::K0);
        let dart = patch.new_tile(Wedge::D0);
        patch.attach(seed, dart, Wedge::D0, 0).unwrap();

        let shapes = patch.shape_points();
        assert_eq!(1, shapes.len());
        approx_eq!(&Point, &Point(1., 0.), &shapes[0][3]);
        assert_eq!([None; 4], patch.corner_points(unplaced).unwrap());
    }

    #[test]
    fn test_patch_find_any_live_non_full_vertex() {
        let mut patch = Patch::default();
        assert_eq!(None, patch.find_any_live_non_full_vertex());
        let seed = patch.seed(ORIGIN);
        assert_eq!(Some(seed), patch.find_any_live_non_full_vertex());
        assert_eq!(vec![seed], patch.live_non_full_vertices());
    }
}
