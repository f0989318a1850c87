use crate::{
    affine::{Affine, IDENTITY_AFFINE},
    transform::{Transform, Transformable},
};
use common::fmt_float;
use float_cmp::{ApproxEq, F64Margin};
use std::ops::{Add, Neg, Sub};

pub const ORIGIN: Point = Point(0., 0.);

pub const DISPLAY_PRECISION: u32 = 2;

// Point is compared exactly by PartialEq; use is_near for tolerant comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn norm_squared(&self) -> f64 {
        self.0.powi(2) + self.1.powi(2)
    }

    pub fn values(&self) -> (f64, f64) {
        (self.0, self.1)
    }

    // is_at_least is true when both coordinates are >= those of other
    pub fn is_at_least(&self, other: &Point) -> bool {
        self.0 >= other.0 && self.1 >= other.1
    }

    // is_at_most is true when both coordinates are <= those of other
    pub fn is_at_most(&self, other: &Point) -> bool {
        self.0 <= other.0 && self.1 <= other.1
    }

    // is_near reports whether both coordinates agree within tolerance, where the tolerance
    // is scaled up by the coordinate magnitude once that magnitude exceeds 1
    pub fn is_near(&self, other: &Point, tolerance: f64) -> bool {
        coords_near(self.0, other.0, tolerance) && coords_near(self.1, other.1, tolerance)
    }
}

// window returns the half-width of the tolerance window around a coordinate
pub fn window(coord: f64, tolerance: f64) -> f64 {
    tolerance * coord.abs().max(1.)
}

fn coords_near(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= window(a, tolerance).max(window(b, tolerance))
}

impl Add for &Point {
    type Output = Point;
    fn add(self, other: &Point) -> Self::Output {
        Point(self.0 + other.0, self.1 + other.1)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Self::Output {
        &self + &other
    }
}

impl ApproxEq for Point {
    type Margin = F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        0_f64.approx_eq((&self - &other).norm(), margin)
    }
}

impl ApproxEq for &Point {
    type Margin = F64Margin;

    fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
        0_f64.approx_eq((self - other).norm(), margin)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Self::Output {
        Point(-self.0, -self.1)
    }
}

impl Sub for &Point {
    type Output = Point;
    fn sub(self, other: &Point) -> Self::Output {
        Point(self.0 - other.0, self.1 - other.1)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Self::Output {
        &self - &other
    }
}

impl<'a> Transformable<'a> for Point {
    fn transform<T: Transform>(&self, transform: &'a T) -> Self {
        let lhs = transform.as_affine();
        let rhs = Affine(IDENTITY_AFFINE.0, [self.0, self.1]);
        Point(Affine::mul_1(&lhs, &rhs, 0), Affine::mul_1(&lhs, &rhs, 1))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{}]",
            fmt_float(self.0, DISPLAY_PRECISION),
            fmt_float(self.1, DISPLAY_PRECISION)
        )
    }
}
