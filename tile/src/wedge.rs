use serde::{Deserialize, Serialize};

// SLOTS is the number of equal wedges a full turn around a vertex is divided into
pub const SLOTS: usize = 10;

// normalize_slot maps any signed slot offset onto 0..SLOTS
pub fn normalize_slot(slot: isize) -> usize {
    slot.rem_euclid(SLOTS as isize) as usize
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Kind {
    Dart,
    Kite,
}

// Corners are listed per kind in clockwise order around the tile.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Corner {
    D,
    E,
    F,
    G,
    K,
    L,
    M,
    N,
}

// Wedge identifies one tenth-turn of one corner of one tile kind, e.g. F2 is the third
// tenth-turn (counter-clockwise) of a dart's reflex F corner.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Wedge {
    D0,
    D1,
    E0,
    F0,
    F1,
    F2,
    F3,
    F4,
    F5,
    G0,
    K0,
    K1,
    L0,
    L1,
    M0,
    M1,
    M2,
    M3,
    N0,
    N1,
}

static WEDGES: [Wedge; 20] = [
    Wedge::D0, Wedge::D1, Wedge::E0,
    Wedge::F0, Wedge::F1, Wedge::F2, Wedge::F3, Wedge::F4, Wedge::F5,
    Wedge::G0,
    Wedge::K0, Wedge::K1, Wedge::L0, Wedge::L1,
    Wedge::M0, Wedge::M1, Wedge::M2, Wedge::M3,
    Wedge::N0, Wedge::N1,
];

impl Kind {
    pub const ALL: [Kind; 2] = [Kind::Dart, Kind::Kite];

    pub fn label(&self) -> &'static str {
        match self {
            Kind::Dart => "dart",
            Kind::Kite => "kite",
        }
    }

    pub fn corners(&self) -> [Corner; 4] {
        match self {
            Kind::Dart => [Corner::D, Corner::E, Corner::F, Corner::G],
            Kind::Kite => [Corner::K, Corner::L, Corner::M, Corner::N],
        }
    }

    // wedges returns the kind's 10 wedges, ordered by Wedge::index
    pub fn wedges(&self) -> &'static [Wedge] {
        match self {
            Kind::Dart => &WEDGES[0..10],
            Kind::Kite => &WEDGES[10..20],
        }
    }
}

impl Corner {
    pub fn kind(&self) -> Kind {
        match self {
            Corner::D | Corner::E | Corner::F | Corner::G => Kind::Dart,
            Corner::K | Corner::L | Corner::M | Corner::N => Kind::Kite,
        }
    }

    // index is the corner's position in its kind's clockwise corner order
    pub fn index(&self) -> usize {
        match self {
            Corner::D | Corner::K => 0,
            Corner::E | Corner::L => 1,
            Corner::F | Corner::M => 2,
            Corner::G | Corner::N => 3,
        }
    }

    // width is the corner's interior angle in tenths of a turn
    pub fn width(&self) -> usize {
        self.wedges().len()
    }

    pub fn wedges(&self) -> &'static [Wedge] {
        let (start, stop) = match self {
            Corner::D => (0, 2),
            Corner::E => (2, 3),
            Corner::F => (3, 9),
            Corner::G => (9, 10),
            Corner::K => (10, 12),
            Corner::L => (12, 14),
            Corner::M => (14, 18),
            Corner::N => (18, 20),
        };
        &WEDGES[start..stop]
    }
}

impl Wedge {
    pub fn all() -> &'static [Wedge] {
        &WEDGES
    }

    // number is unique across both kinds: 0..20
    pub fn number(&self) -> usize {
        *self as usize
    }

    // index is unique within the wedge's kind: 0..10
    pub fn index(&self) -> usize {
        self.number() % SLOTS
    }

    pub fn kind(&self) -> Kind {
        self.corner().kind()
    }

    pub fn corner(&self) -> Corner {
        match self {
            Wedge::D0 | Wedge::D1 => Corner::D,
            Wedge::E0 => Corner::E,
            Wedge::F0 | Wedge::F1 | Wedge::F2 | Wedge::F3 | Wedge::F4 | Wedge::F5 => Corner::F,
            Wedge::G0 => Corner::G,
            Wedge::K0 | Wedge::K1 => Corner::K,
            Wedge::L0 | Wedge::L1 => Corner::L,
            Wedge::M0 | Wedge::M1 | Wedge::M2 | Wedge::M3 => Corner::M,
            Wedge::N0 | Wedge::N1 => Corner::N,
        }
    }

    // ordinal is the wedge's counter-clockwise position within its corner
    pub fn ordinal(&self) -> usize {
        let corner = self.corner();
        self.number() - corner.wedges()[0].number()
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::fmt::Display for Wedge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}{}", self.corner(), self.ordinal())
    }
}
