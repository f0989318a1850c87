use crate::point::Point;

// Bounds is an axis-aligned rectangle given by its low and high corners, both inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub low: Point,
    pub high: Point,
}

impl Bounds {
    pub fn new(low: Point, high: Point) -> Bounds {
        Bounds {
            low: Point(low.0.min(high.0), low.1.min(high.1)),
            high: Point(low.0.max(high.0), low.1.max(high.1)),
        }
    }

    // centered returns the square whose center is `center` and whose half-width is `radius`
    pub fn centered(center: &Point, radius: f64) -> Bounds {
        let offset = Point(radius, radius);
        Bounds::new(center - &offset, center + &offset)
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.is_at_least(&self.low) && point.is_at_most(&self.high)
    }

    pub fn width(&self) -> f64 {
        self.high.0 - self.low.0
    }

    pub fn height(&self) -> f64 {
        self.high.1 - self.low.1
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.low, self.high)
    }
}
