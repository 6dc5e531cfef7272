use crate::geometry::GeometryError;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::Point;

///Axis-aligned rectangle, possibly degenerate (zero width or height)
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self, GeometryError> {
        let finite = [x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite());
        if !finite || x_min > x_max || y_min > y_max {
            return Err(GeometryError::InvalidGeometry(format!(
                "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
            )));
        }
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(width: f64, height: f64) -> Result<Self, GeometryError> {
        Rect::try_new(0.0, 0.0, width, height)
    }

    /// Smallest rectangle containing every point of `points`.
    /// An empty sequence has no bounding box and is refused.
    pub fn bounding(points: &[Point]) -> Result<Self, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::InvalidGeometry(
                "cannot compute the bounding box of an empty point set".to_string(),
            ));
        }
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "non-finite coordinate in point set: {p:?}"
            )));
        }
        let (x_min, y_min, x_max, y_max) = points.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x_min, y_min, x_max, y_max), p| {
                (x_min.min(p.0), y_min.min(p.1), x_max.max(p.0), y_max.max(p.1))
            },
        );
        Rect::try_new(x_min, y_min, x_max, y_max)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Boundary-inclusive containment check.
    pub fn contains_point(&self, p: Point) -> bool {
        p.0 >= self.x_min && p.0 <= self.x_max && p.1 >= self.y_min && p.1 <= self.y_max
    }

    /// Returns the four corners of `self`, counter-clockwise starting from (x_min, y_min).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
        ]
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            min_x: self.x_min,
            min_y: self.y_min,
            max_x: self.x_max,
            max_y: self.y_max,
            width: self.width(),
            height: self.height(),
            area: self.area(),
        }
    }
}

impl Shape for Rect {
    fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    fn area(&self) -> f64 {
        self.width() * self.height()
    }

    fn bbox(&self) -> Rect {
        *self
    }
}

/// Extents of a point set as reported to users: bounds, width, height and bounding box area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
    pub area: f64,
}

/// Computes the [`Dimensions`] of a non-empty point sequence.
pub fn dimensions(points: &[Point]) -> Result<Dimensions, GeometryError> {
    Rect::bounding(points).map(|r| r.dimensions())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_of_rectangle_piece() {
        let pts = [Point(0.0, 0.0), Point(50.0, 0.0), Point(50.0, 30.0), Point(0.0, 30.0)];
        let d = dimensions(&pts).unwrap();
        assert_eq!((d.min_x, d.min_y, d.max_x, d.max_y), (0.0, 0.0, 50.0, 30.0));
        assert_eq!((d.width, d.height, d.area), (50.0, 30.0, 1500.0));
    }

    #[test]
    fn empty_point_set_is_invalid() {
        assert!(matches!(
            dimensions(&[]),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn single_point_gives_degenerate_box() {
        let d = dimensions(&[Point(3.0, 4.0)]).unwrap();
        assert_eq!((d.width, d.height, d.area), (0.0, 0.0, 0.0));
    }

    #[test]
    fn containment_includes_boundary() {
        let r = Rect::from_size(200.0, 150.0).unwrap();
        assert!(r.contains_point(Point(200.0, 150.0)));
        assert!(r.contains_point(Point(0.0, 0.0)));
        assert!(!r.contains_point(Point(200.1, 10.0)));
        assert!(!r.contains_point(Point(10.0, -0.1)));
    }
}
