use geometry::{Euclid, Point, Transformable};
use itertools::izip;
use lazy_static::lazy_static;
use std::f64::consts::TAU;
use tile::{normalize_slot, Kind, ProtoTile, Wedge, SLOTS};

// Orientation is one of a tile kind's 10 rigid rotations: where each corner sits relative to
// corner 0 and which slot each wedge occupies around its own corner.
#[derive(Clone, Debug)]
pub struct Orientation {
    pub kind: Kind,
    pub rotation: usize,
    pub offsets: [Point; 4], // indexed by Corner::index
    pub slots: [usize; SLOTS], // indexed by Wedge::index
}

impl Orientation {
    pub fn offset(&self, corner_index: usize) -> Point {
        self.offsets[corner_index]
    }

    pub fn slot(&self, wedge: Wedge) -> usize {
        self.slots[wedge.index()]
    }

    // locate derives the location of corner `target` given the location of corner `known`
    pub fn locate(&self, known: usize, location: &Point, target: usize) -> Point {
        &(location + &self.offsets[target]) - &self.offsets[known]
    }
}

pub struct OrientationTable {
    orientations: Vec<Orientation>, // indexed by rotation
    rotations: [[usize; SLOTS]; SLOTS], // [Wedge::index][slot] -> rotation
}

impl OrientationTable {
    // new builds all 10 rotations of a kind. Each rotation is applied to the analytic base
    // offsets directly rather than to the previous rotation, so error never accumulates.
    pub fn new(kind: Kind) -> OrientationTable {
        let proto_tile = ProtoTile::new(kind);

        let orientations: Vec<Orientation> = (0..SLOTS)
            .map(|rotation| {
                let rotate = Euclid::Rotate(rotation as f64 * TAU / SLOTS as f64);
                let mut offsets = proto_tile.points;
                for (offset, base) in izip!(offsets.iter_mut(), proto_tile.points.iter()).skip(1) {
                    *offset = base.transform(&rotate);
                }
                let mut slots = proto_tile.slots;
                for slot in slots.iter_mut() {
                    *slot = normalize_slot((*slot + rotation) as isize);
                }
                Orientation { kind, rotation, offsets, slots }
            })
            .collect();

        let mut rotations = [[0; SLOTS]; SLOTS];
        for orientation in orientations.iter() {
            for wedge in kind.wedges().iter() {
                rotations[wedge.index()][orientation.slot(*wedge)] = orientation.rotation;
            }
        }

        OrientationTable { orientations, rotations }
    }

    // get returns the orientation which puts `wedge` in `slot`
    pub fn get(&self, wedge: Wedge, slot: usize) -> &Orientation {
        &self.orientations[self.rotations[wedge.index()][slot % SLOTS]]
    }

    pub fn by_rotation(&self, rotation: usize) -> &Orientation {
        &self.orientations[rotation % SLOTS]
    }
}

lazy_static! {
    static ref DART_ORIENTATIONS: OrientationTable = OrientationTable::new(Kind::Dart);
    static ref KITE_ORIENTATIONS: OrientationTable = OrientationTable::new(Kind::Kite);
}

pub fn orientation_table(kind: Kind) -> &'static OrientationTable {
    match kind {
        Kind::Dart => &DART_ORIENTATIONS,
        Kind::Kite => &KITE_ORIENTATIONS,
    }
}

// orientation returns the orientation of wedge's kind which puts wedge in slot
pub fn orientation(wedge: Wedge, slot: usize) -> &'static Orientation {
    orientation_table(wedge.kind()).get(wedge, slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::approx_eq;
    use geometry::ORIGIN;

    #[test]
    fn test_orientation_puts_wedge_in_slot() {
        for wedge in Wedge::all().iter() {
            for slot in 0..SLOTS {
                let orientation = orientation(*wedge, slot);
                assert_eq!(wedge.kind(), orientation.kind);
                assert_eq!(slot, orientation.slot(*wedge));
            }
        }
    }

    #[test]
    fn test_orientation_rotation_zero_is_the_proto_tile() {
        for kind in Kind::ALL.iter() {
            let proto_tile = ProtoTile::new(*kind);
            let orientation = orientation_table(*kind).by_rotation(0);
            assert_eq!(proto_tile.points, orientation.offsets);
            assert_eq!(proto_tile.slots, orientation.slots);
        }
    }

    #[test]
    fn test_orientation_half_turn() {
        let kite = orientation_table(Kind::Kite);
        let zero = kite.by_rotation(0);
        let half = kite.by_rotation(5);
        assert_eq!(ORIGIN, half.offsets[0]);
        for i in 1..4 {
            approx_eq!(&Point, &-zero.offsets[i], &half.offsets[i]);
        }
        assert_eq!(5, half.slot(Wedge::K0));
        assert_eq!(2, half.slot(Wedge::L0));
    }

    #[test]
    fn test_orientation_preserves_shape() {
        for kind in Kind::ALL.iter() {
            let zero = orientation_table(*kind).by_rotation(0);
            for rotation in 1..SLOTS {
                let rotated = orientation_table(*kind).by_rotation(rotation);
                for i in 0..4 {
                    for j in 0..4 {
                        approx_eq!(
                            f64,
                            (&zero.offsets[i] - &zero.offsets[j]).norm(),
                            (&rotated.offsets[i] - &rotated.offsets[j]).norm()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_orientation_locate() {
        let dart = orientation(Wedge::D0, 0);
        let location = Point(2., -1.);
        // with D known, G lies one long edge along +x
        approx_eq!(&Point, &Point(3., -1.), &dart.locate(0, &location, 3));

        // deriving from a derived corner lands back where it started
        let g = dart.locate(0, &location, 3);
        approx_eq!(&Point, &location, &dart.locate(3, &g, 0));

        // locate agrees with placing the offsets by translation
        let translate = Euclid::Translate((&location - &dart.offset(0)).values());
        for i in 0..4 {
            approx_eq!(&Point, &dart.offset(i).transform(&translate), &dart.locate(0, &location, i));
        }
    }
}
