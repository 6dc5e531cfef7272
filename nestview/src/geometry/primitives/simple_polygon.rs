use itertools::Itertools;

use crate::geometry::geo_traits::{Shape, Transformable};
use crate::geometry::primitives::{Point, Rect};
use crate::geometry::{DTransformation, GeometryError, MIN_POLYGON_POINTS};

/// Simple polygon (no holes) defined by an ordered sequence of at least three vertices.
/// No closing duplicate vertex is stored: the last point connects back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct SPolygon {
    points: Vec<Point>,
}

impl SPolygon {
    pub fn try_new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < MIN_POLYGON_POINTS {
            return Err(GeometryError::InvalidGeometry(format!(
                "a polygon needs at least {MIN_POLYGON_POINTS} points, got {}",
                points.len()
            )));
        }
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "non-finite polygon vertex: {p:?}"
            )));
        }
        Ok(SPolygon { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Iterates over the edges of the closed boundary.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.iter().copied().circular_tuple_windows()
    }

    /// Copy of `self` translated so that its bounding box starts at the origin.
    pub fn normalized(&self) -> SPolygon {
        SPolygon {
            points: translate_to_origin(&self.points),
        }
    }

    pub fn is_normalized(&self) -> bool {
        let bbox = self.bbox();
        bbox.x_min == 0.0 && bbox.y_min == 0.0
    }

    /// Copy of `self` rotated by 90° clockwise (screen orientation) around its centroid.
    pub fn rotated_90_cw(&self) -> SPolygon {
        SPolygon {
            points: rotate_90_cw(&self.points),
        }
    }

    /// Copy of `self` with every coordinate multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> SPolygon {
        SPolygon {
            points: self
                .points
                .iter()
                .map(|p| Point(p.0 * factor, p.1 * factor))
                .collect(),
        }
    }

    /// Signed shoelace area, positive for counter-clockwise vertex order in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|(Point(x1, y1), Point(x2, y2))| x1 * y2 - x2 * y1)
            .sum::<f64>()
            / 2.0
    }
}

impl Shape for SPolygon {
    /// Average of the vertices, the reference point for rotations and labels.
    fn centroid(&self) -> Point {
        vertex_average(&self.points)
    }

    fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    fn bbox(&self) -> Rect {
        //vertices are finite and non-empty, so the fold always yields a valid rectangle
        self.points.iter().fold(
            Rect {
                x_min: f64::INFINITY,
                y_min: f64::INFINITY,
                x_max: f64::NEG_INFINITY,
                y_max: f64::NEG_INFINITY,
            },
            |r, p| Rect {
                x_min: r.x_min.min(p.0),
                y_min: r.y_min.min(p.1),
                x_max: r.x_max.max(p.0),
                y_max: r.y_max.max(p.1),
            },
        )
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, dt: &DTransformation) -> &mut Self {
        self.points.iter_mut().for_each(|p| {
            p.transform(dt);
        });
        self
    }
}

/// Translates `points` so that the minimum x and y coordinates become zero.
/// Only a translation is applied: distances and angles between points are preserved.
pub fn normalize(points: &[Point]) -> Result<Vec<Point>, GeometryError> {
    if points.len() < MIN_POLYGON_POINTS {
        return Err(GeometryError::InvalidGeometry(format!(
            "cannot normalize {} points, at least {MIN_POLYGON_POINTS} are required",
            points.len()
        )));
    }
    Rect::bounding(points)?;
    Ok(translate_to_origin(points))
}

/// Rotates every point by 90° clockwise around the vertex average of the set.
/// Clockwise is meant in screen orientation (y-axis pointing down).
pub fn rotate_90_cw(points: &[Point]) -> Vec<Point> {
    if points.is_empty() {
        return vec![];
    }
    let Point(cx, cy) = vertex_average(points);
    points
        .iter()
        .map(|Point(x, y)| {
            let (dx, dy) = (x - cx, y - cy);
            Point(cx - dy, cy + dx)
        })
        .collect()
}

fn vertex_average(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.0, sy + p.1));
    Point(sx / n, sy / n)
}

fn translate_to_origin(points: &[Point]) -> Vec<Point> {
    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    points.iter().map(|p| p.translate(-min_x, -min_y)).collect()
}
