use crate::geometry::GeometryError;
use crate::geometry::primitives::Point;

/// Rounds coordinates to the nearest multiple of a fixed grid size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSnap {
    size: f64,
}

impl GridSnap {
    pub const DEFAULT_SIZE: f64 = 10.0;

    pub fn try_new(size: f64) -> Result<Self, GeometryError> {
        match size.is_finite() && size > 0.0 {
            true => Ok(GridSnap { size }),
            false => Err(GeometryError::InvalidGridSize(size)),
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn snap_value(&self, v: f64) -> f64 {
        (v / self.size).round() * self.size
    }

    pub fn snap(&self, Point(x, y): Point) -> Point {
        Point(self.snap_value(x), self.snap_value(y))
    }
}

impl Default for GridSnap {
    fn default() -> Self {
        GridSnap {
            size: Self::DEFAULT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_nearest_multiple() {
        let grid = GridSnap::default();
        assert_eq!(grid.snap(Point(14.9, 15.0)), Point(10.0, 20.0));
        assert_eq!(grid.snap(Point(-4.0, 96.0)), Point(-0.0, 100.0));
        let fine = GridSnap::try_new(0.5).unwrap();
        assert_eq!(fine.snap(Point(1.26, 1.24)), Point(1.5, 1.0));
    }

    #[test]
    fn rejects_degenerate_grid() {
        assert!(GridSnap::try_new(0.0).is_err());
        assert!(GridSnap::try_new(-1.0).is_err());
        assert!(GridSnap::try_new(f64::NAN).is_err());
    }
}
