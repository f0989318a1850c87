use itertools::Itertools;
use lazy_static::lazy_static;
use tile::{Wedge, SLOTS};

// Figure names the seven ways kites and darts can legally surround a vertex
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Figure {
    Star,
    Sun,
    Ace,
    King,
    Jack,
    Queen,
    Deuce,
}

impl Figure {
    pub const ALL: [Figure; 7] = [
        Figure::Star,
        Figure::Sun,
        Figure::Ace,
        Figure::King,
        Figure::Jack,
        Figure::Queen,
        Figure::Deuce,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Figure::Star => "star",
            Figure::Sun => "sun",
            Figure::Ace => "ace",
            Figure::King => "king",
            Figure::Jack => "jack",
            Figure::Queen => "queen",
            Figure::Deuce => "deuce",
        }
    }

    // wedges is the figure's canonical slot assignment, slot 0 first
    pub fn wedges(&self) -> [Wedge; SLOTS] {
        use Wedge::*;
        match self {
            Figure::Star => [D0, D1, D0, D1, D0, D1, D0, D1, D0, D1],
            Figure::Sun => [K0, K1, K0, K1, K0, K1, K0, K1, K0, K1],
            Figure::Ace => [F0, F1, F2, F3, F4, F5, N0, N1, L0, L1],
            Figure::King => [D0, D1, D0, D1, D0, D1, L0, L1, N0, N1],
            Figure::Jack => [G0, K0, K1, K0, K1, E0, M0, M1, M2, M3],
            Figure::Queen => [D0, D1, L0, L1, N0, N1, L0, L1, N0, N1],
            Figure::Deuce => [M0, M1, M2, M3, M0, M1, M2, M3, G0, E0],
        }
    }
}

impl std::fmt::Display for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Entry is one full legal assignment of the 10 slots around a vertex
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub figure: Figure,
    pub rotation: usize,
    pub wedges: [Wedge; SLOTS],
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}: {}", self.figure, self.rotation, self.wedges.iter().join(" "))
    }
}

fn build_entries() -> Vec<Entry> {
    let mut entries: Vec<Entry> = vec![];
    for figure in Figure::ALL.iter() {
        let base = figure.wedges();
        for rotation in 0..SLOTS {
            let mut wedges = base;
            for (j, wedge) in base.iter().enumerate() {
                wedges[(j + rotation) % SLOTS] = *wedge;
            }
            // symmetric figures repeat themselves under some rotations
            if entries.iter().any(|entry| entry.wedges == wedges) {
                continue;
            }
            entries.push(Entry { figure: *figure, rotation, wedges });
        }
    }
    entries
}

// masks[slot][wedge number] is the set of entries holding that wedge in that slot
fn build_masks(entries: &[Entry]) -> Vec<[u64; 20]> {
    let mut masks = vec![[0_u64; 20]; SLOTS];
    for (i, entry) in entries.iter().enumerate() {
        for (slot, wedge) in entry.wedges.iter().enumerate() {
            masks[slot][wedge.number()] |= 1 << i;
        }
    }
    masks
}

lazy_static! {
    static ref ENTRIES: Vec<Entry> = build_entries();
    static ref MASKS: Vec<[u64; 20]> = build_masks(&ENTRIES);
}

pub fn entries() -> &'static [Entry] {
    &ENTRIES
}

// Catalog is a set of still-possible entries, stored as a bitmask over entries()
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Catalog(u64);

impl Catalog {
    pub fn full() -> Catalog {
        Catalog((1_u64 << ENTRIES.len()) - 1)
    }

    pub fn empty() -> Catalog {
        Catalog(0)
    }

    // matching returns the entries agreeing with every filled slot
    pub fn matching(fills: &[Option<Wedge>]) -> Catalog {
        fills
            .iter()
            .enumerate()
            .fold(Catalog::full(), |catalog, (slot, fill)| match fill {
                Some(wedge) => catalog.restrict(slot, *wedge),
                None => catalog,
            })
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn restrict(&self, slot: usize, wedge: Wedge) -> Catalog {
        Catalog(self.0 & MASKS[slot % SLOTS][wedge.number()])
    }

    pub fn intersection(&self, other: &Catalog) -> Catalog {
        Catalog(self.0 & other.0)
    }

    pub fn indices(&self) -> Indices {
        Indices(self.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Entry> {
        self.indices().map(|i| &ENTRIES[i])
    }

    pub fn nth(&self, n: usize) -> Option<&'static Entry> {
        self.iter().nth(n)
    }

    // agreed_at returns the wedge every entry holds at slot, if they all hold the same one
    pub fn agreed_at(&self, slot: usize) -> Option<Wedge> {
        let mut wedges = self.iter().map(|entry| entry.wedges[slot % SLOTS]);
        let first = wedges.next()?;
        if wedges.all(|wedge| wedge == first) {
            Some(first)
        } else {
            None
        }
    }

    // wedges_at returns the distinct wedges entries hold at slot
    pub fn wedges_at(&self, slot: usize) -> Vec<Wedge> {
        self.iter().map(|entry| entry.wedges[slot % SLOTS]).sorted().dedup().collect()
    }

    pub fn figures(&self) -> Vec<Figure> {
        self.iter().map(|entry| entry.figure).sorted().dedup().collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::full()
    }
}

// Indices walks the set bits of a catalog, lowest first
pub struct Indices(u64);

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let i = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile::Kind;

    #[test]
    fn test_catalog_len() {
        // 2 rotations each of the star and the sun, 10 of every other figure
        assert_eq!(54, entries().len());
        assert_eq!(54, Catalog::full().len());
        assert!(Catalog::empty().is_empty());

        for figure in Figure::ALL.iter() {
            let count = entries().iter().filter(|entry| entry.figure == *figure).count();
            match figure {
                Figure::Star | Figure::Sun => assert_eq!(2, count),
                _ => assert_eq!(10, count),
            }
        }
    }

    #[test]
    fn test_catalog_entries_are_distinct_and_rotated() {
        let all = entries();
        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert_ne!(a.wedges, b.wedges);
            }
            let base = a.figure.wedges();
            for j in 0..SLOTS {
                assert_eq!(base[j], a.wedges[(j + a.rotation) % SLOTS]);
            }
        }
    }

    // every corner in an entry occupies a run of consecutive slots as wide as the corner
    #[test]
    fn test_catalog_entries_are_whole_corners() {
        for entry in entries().iter() {
            let mut slot = 0;
            let start = (0..SLOTS).find(|s| entry.wedges[*s].ordinal() == 0).unwrap();
            while slot < SLOTS {
                let first = entry.wedges[(start + slot) % SLOTS];
                let corner = first.corner();
                for (ordinal, wedge) in corner.wedges().iter().enumerate() {
                    assert_eq!(*wedge, entry.wedges[(start + slot + ordinal) % SLOTS], "{}", entry);
                }
                slot += corner.width();
            }
            assert_eq!(SLOTS, slot);
        }
    }

    #[test]
    fn test_catalog_restrict_dart_d0_at_slot_0() {
        let catalog = Catalog::full().restrict(0, Wedge::D0);
        assert_eq!(5, catalog.len());
        assert_eq!(catalog, catalog.restrict(1, Wedge::D1));
        assert_eq!(vec![Figure::Star, Figure::King, Figure::Queen], catalog.figures());

        assert_eq!(Some(Wedge::D1), catalog.agreed_at(1));
        assert_eq!(None, catalog.agreed_at(2));
        assert_eq!(vec![Wedge::D0, Wedge::L0], catalog.wedges_at(2));
    }

    #[test]
    fn test_catalog_matching() {
        let mut fills = [None; SLOTS];
        assert_eq!(Catalog::full(), Catalog::matching(&fills));

        fills[0] = Some(Wedge::K0);
        fills[1] = Some(Wedge::K1);
        fills[2] = Some(Wedge::K0);
        let catalog = Catalog::matching(&fills);
        assert_eq!(Catalog::full().restrict(0, Wedge::K0).restrict(1, Wedge::K1).restrict(2, Wedge::K0), catalog);
        assert!(catalog.iter().all(|entry| entry.wedges[2] == Wedge::K0));

        // K0 has to be followed by K1
        fills[3] = Some(Wedge::D0);
        assert!(Catalog::matching(&fills).is_empty());
    }

    #[test]
    fn test_catalog_intersection() {
        let darts = Catalog::full().restrict(0, Wedge::D0);
        let kites = Catalog::full().restrict(0, Wedge::K0);
        assert!(darts.intersection(&kites).is_empty());
        assert_eq!(darts, darts.intersection(&Catalog::full()));
    }

    #[test]
    fn test_catalog_iter_and_nth() {
        let catalog = Catalog::full().restrict(3, Wedge::F3);
        assert_eq!(1, catalog.len());
        let entry = catalog.nth(0).unwrap();
        assert_eq!(Figure::Ace, entry.figure);
        assert_eq!(0, entry.rotation);
        assert_eq!(None, catalog.nth(1));
        assert_eq!(vec![entry], catalog.iter().collect::<Vec<_>>());
        assert!(entry.wedges.iter().filter(|wedge| wedge.kind() == Kind::Kite).count() == 4);
    }

    #[test]
    fn test_entry_fmt() {
        assert_eq!("star+0: D0 D1 D0 D1 D0 D1 D0 D1 D0 D1", format!("{}", entries()[0]));
    }
}
