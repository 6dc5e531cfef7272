use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use crate::geometry::Point;

/// Floating point comparison with a tolerance, wrapping [`float_cmp::approx_eq!()`].
/// Coordinates that went through a unit conversion or a world ↔ screen round trip
/// compare equal as `FPA`s.
#[derive(Debug, Clone, Copy)]
pub struct FPA(pub f64);

impl FPA {
    /// Absolute tolerance, covers values near zero
    pub const EPSILON: f64 = 1e-9;
    /// Relative tolerance in units in the last place
    pub const ULPS: i64 = 4;

    /// Compares two points coordinate by coordinate.
    pub fn points_eq(Point(ax, ay): Point, Point(bx, by): Point) -> bool {
        FPA(ax) == FPA(bx) && FPA(ay) == FPA(by)
    }
}

impl<T> From<T> for FPA
where
    T: Into<f64>,
{
    fn from(n: T) -> Self {
        FPA(n.into())
    }
}

impl PartialEq<Self> for FPA {
    fn eq(&self, other: &Self) -> bool {
        float_cmp::approx_eq!(
            f64,
            self.0,
            other.0,
            epsilon = FPA::EPSILON,
            ulps = FPA::ULPS
        )
    }
}

impl PartialOrd<Self> for FPA {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.eq(other) {
            true => Some(Ordering::Equal),
            false => self.0.partial_cmp(&other.0),
        }
    }
}

impl Display for FPA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
