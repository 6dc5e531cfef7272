use crate::geometry::DTransformation;
use crate::geometry::primitives::{Point, Rect};

/// Trait for types that can be modified by a [`DTransformation`].
pub trait Transformable: Clone {
    /// Applies a transformation to `self`.
    fn transform(&mut self, dt: &DTransformation) -> &mut Self;

    /// Applies a transformation to a clone.
    fn transform_clone(&self, dt: &DTransformation) -> Self {
        let mut clone = self.clone();
        clone.transform(dt);
        clone
    }
}

/// Trait for shared properties of geometric primitives.
pub trait Shape {
    /// Geometric center of the shape
    fn centroid(&self) -> Point;

    /// Area of the interior of the shape
    fn area(&self) -> f64;

    /// Bounding box of the shape
    fn bbox(&self) -> Rect;
}
