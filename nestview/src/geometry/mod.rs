mod d_transformation;

/// Set of traits representing various geometric properties & operations
pub mod geo_traits;

mod grid_snap;

/// Set of geometric primitives - atomic building blocks for the geometry module
pub mod primitives;

mod view_transform;

use thiserror::Error;

#[doc(inline)]
pub use d_transformation::DTransformation;

#[doc(inline)]
pub use grid_snap::GridSnap;

#[doc(inline)]
pub use primitives::{Dimensions, Point, Rect, SPolygon, dimensions, normalize, rotate_90_cw};

#[doc(inline)]
pub use view_transform::{ViewTransform, fit_scale};

/// Minimum number of vertices of a piece boundary.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Conditions under which a geometric computation refuses its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("scale must be finite and strictly positive, got {0}")]
    InvalidScale(f64),
    #[error("grid size must be finite and strictly positive, got {0}")]
    InvalidGridSize(f64),
}
