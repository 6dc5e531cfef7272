mod point;
mod rect;
mod simple_polygon;

#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use rect::{Dimensions, Rect, dimensions};
#[doc(inline)]
pub use simple_polygon::{SPolygon, normalize, rotate_90_cw};
