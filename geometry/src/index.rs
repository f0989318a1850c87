use crate::point::{window, Point};
use std::{cmp::Ordering, collections::BTreeMap};

// Coord orders f64 totally so coordinates can key a BTreeMap
#[derive(Clone, Copy, Debug)]
struct Coord(f64);

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coord {}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// PointIndex stores values keyed by exact points and answers "is there already a point here"
// queries within a tolerance. Points are bucketed into columns by x, then ordered by y
// within each column, so a query only visits the columns and rows inside its window.
#[derive(Clone, Debug)]
pub struct PointIndex<V> {
    tolerance: f64,
    columns: BTreeMap<Coord, BTreeMap<Coord, V>>,
    len: usize,
}

impl<V> PointIndex<V> {
    pub fn new(tolerance: f64) -> PointIndex<V> {
        PointIndex {
            tolerance: tolerance.abs(),
            columns: BTreeMap::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // find returns the stored point nearest to `point` among those within tolerance of it
    pub fn find(&self, point: &Point) -> Option<(Point, &V)> {
        // windows are doubled so that a stored point with a slightly larger magnitude,
        // and so a slightly wider window of its own, is still visited
        let dx = 2. * window(point.0, self.tolerance);
        let dy = 2. * window(point.1, self.tolerance);

        let mut nearest: Option<(f64, Point, &V)> = None;
        for (x, column) in self.columns.range(Coord(point.0 - dx)..=Coord(point.0 + dx)) {
            for (y, value) in column.range(Coord(point.1 - dy)..=Coord(point.1 + dy)) {
                let candidate = Point(x.0, y.0);
                if !candidate.is_near(point, self.tolerance) {
                    continue;
                }
                let distance = (&candidate - point).norm_squared();
                match nearest {
                    Some((min, _, _)) if min <= distance => {}
                    _ => nearest = Some((distance, candidate, value)),
                }
            }
        }
        nearest.map(|(_, candidate, value)| (candidate, value))
    }

    pub fn contains_similar(&self, point: &Point) -> bool {
        self.find(point).is_some()
    }

    // insert stores value at exactly point, returning any value previously stored there
    pub fn insert(&mut self, point: Point, value: V) -> Option<V> {
        let previous = self.columns
            .entry(Coord(point.0))
            .or_insert_with(BTreeMap::new)
            .insert(Coord(point.1), value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    // remove deletes the value stored at exactly point
    pub fn remove(&mut self, point: &Point) -> Option<V> {
        let column = self.columns.get_mut(&Coord(point.0))?;
        let removed = column.remove(&Coord(point.1));
        if column.is_empty() {
            self.columns.remove(&Coord(point.0));
        }
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &V)> + '_ {
        self.columns.iter().flat_map(|(x, column)| {
            column.iter().map(move |(y, value)| (Point(x.0, y.0), value))
        })
    }
}
