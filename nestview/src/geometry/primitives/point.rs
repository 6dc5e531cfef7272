use std::hash::{Hash, Hasher};

use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Transformable;

/// Geometric primitive representing a point, either in world units or in screen pixels
#[derive(Debug, Clone, PartialEq, Copy, Default)]
pub struct Point(pub f64, pub f64);

impl Point {
    #[inline(always)]
    pub fn x(&self) -> f64 {
        self.0
    }

    #[inline(always)]
    pub fn y(&self) -> f64 {
        self.1
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.sq_distance(other).sqrt()
    }

    pub fn sq_distance(&self, other: &Point) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point((self.0 + other.0) / 2.0, (self.1 + other.1) / 2.0)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Point {
        Point(self.0 + dx, self.1 + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

impl Transformable for Point {
    fn transform(&mut self, dt: &DTransformation) -> &mut Self {
        let (sin, cos) = dt.rotation().to_radians().sin_cos();
        let (tx, ty) = dt.translation();
        let Point(x, y) = *self;
        self.0 = cos * x - sin * y + tx;
        self.1 = sin * x + cos * y + ty;
        self
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
        self.1.to_bits().hash(state);
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point(p[0], p[1])
    }
}
