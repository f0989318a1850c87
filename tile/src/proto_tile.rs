use crate::wedge::{Corner, Kind, Wedge, SLOTS};
use geometry::{Point, ORIGIN};
use std::f64::consts::PI;

// ProtoTile is a tile kind's rotation-zero placement: corner 0 pinned at the origin, corner 3
// one long edge along +x, and the slot each of its wedges occupies around its own corner.
// Slot s spans the directions [s, s+1) tenths of a turn counter-clockwise from +x.
#[derive(Clone, Debug)]
pub struct ProtoTile {
    pub kind: Kind,
    pub points: [Point; 4], // indexed by Corner::index
    pub slots: [usize; SLOTS], // indexed by Wedge::index
}

impl ProtoTile {
    pub fn new(kind: Kind) -> ProtoTile {
        let tenth = PI / 5.;
        let long = Point((2. * tenth).cos(), (2. * tenth).sin());
        match kind {
            Kind::Kite => ProtoTile {
                kind,
                points: [
                    ORIGIN,
                    long,
                    Point(tenth.cos(), tenth.sin()),
                    Point(1., 0.),
                ],
                // K0 K1 L0 L1 M0 M1 M2 M3 N0 N1
                slots: [0, 1, 7, 8, 4, 5, 6, 7, 3, 4],
            },
            Kind::Dart => ProtoTile {
                kind,
                points: [
                    ORIGIN,
                    long,
                    Point(0.5, tenth.tan() / 2.),
                    Point(1., 0.),
                ],
                // D0 D1 E0 F0 F1 F2 F3 F4 F5 G0
                slots: [0, 1, 7, 3, 4, 5, 6, 7, 8, 4],
            },
        }
    }

    pub fn point(&self, corner: Corner) -> Point {
        self.points[corner.index()]
    }

    pub fn slot(&self, wedge: Wedge) -> usize {
        self.slots[wedge.index()]
    }
}
