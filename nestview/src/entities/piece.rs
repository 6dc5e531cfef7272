use std::num::NonZeroU32;

use crate::geometry::geo_traits::Shape;
use crate::geometry::{Dimensions, GeometryError, Point, SPolygon};
use crate::units::{self, Unit};
use crate::util::assertions;

/// A named polygon template together with the number of copies to place.
/// The geometry is always stored normalized: its bounding box starts at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    id: String,
    shape: SPolygon,
    quantity: NonZeroU32,
}

impl Piece {
    pub fn new(id: impl Into<String>, shape: SPolygon, quantity: NonZeroU32) -> Self {
        let piece = Piece {
            id: id.into(),
            shape: shape.normalized(),
            quantity,
        };
        debug_assert!(assertions::piece_is_normalized(&piece));
        piece
    }

    /// Builds a piece from raw points, normalizing them.
    /// A quantity of zero is raised to one.
    pub fn try_from_points(
        id: impl Into<String>,
        points: Vec<Point>,
        quantity: u32,
    ) -> Result<Self, GeometryError> {
        let shape = SPolygon::try_new(points)?;
        Ok(Piece::new(id, shape, clamp_quantity(quantity)))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shape(&self) -> &SPolygon {
        &self.shape
    }

    pub fn points(&self) -> &[Point] {
        self.shape.points()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.shape.bbox().dimensions()
    }

    pub fn area(&self) -> f64 {
        self.shape.area()
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = clamp_quantity(quantity);
    }

    pub fn set_shape(&mut self, shape: SPolygon) {
        self.shape = shape.normalized();
    }

    /// Same physical piece expressed in another unit.
    pub fn converted(&self, from: Unit, to: Unit) -> Piece {
        let factor = units::convert(1.0, from, to);
        Piece {
            id: self.id.clone(),
            shape: self.shape.scaled(factor).normalized(),
            quantity: self.quantity,
        }
    }

    /// Rotates the stored geometry by 90° clockwise and re-normalizes it.
    pub fn rotate_90(&mut self) {
        self.shape = self.shape.rotated_90_cw().normalized();
    }
}

fn clamp_quantity(quantity: u32) -> NonZeroU32 {
    NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_normalizes() {
        let piece = Piece::try_from_points(
            "tri",
            vec![Point(100.0, 50.0), Point(140.0, 50.0), Point(120.0, 85.0)],
            2,
        )
        .unwrap();
        assert_eq!(piece.points()[0], Point(0.0, 0.0));
        assert_eq!(piece.points()[2], Point(20.0, 35.0));
        assert_eq!(piece.quantity(), 2);
    }

    #[test]
    fn zero_quantity_is_raised_to_one() {
        let mut piece = Piece::try_from_points(
            "sq",
            vec![Point(0.0, 0.0), Point(15.0, 0.0), Point(15.0, 15.0), Point(0.0, 15.0)],
            0,
        )
        .unwrap();
        assert_eq!(piece.quantity(), 1);
        piece.set_quantity(5);
        assert_eq!(piece.quantity(), 5);
    }

    #[test]
    fn rotation_swaps_dimensions() {
        let mut piece = Piece::try_from_points(
            "rect",
            vec![Point(0.0, 0.0), Point(50.0, 0.0), Point(50.0, 30.0), Point(0.0, 30.0)],
            1,
        )
        .unwrap();
        piece.rotate_90();
        let d = piece.dimensions();
        assert_eq!((d.min_x, d.min_y), (0.0, 0.0));
        assert_eq!((d.width, d.height), (30.0, 50.0));
    }
}
