use std::fmt::{Display, Formatter};

use crate::geometry::Point;

/// Advisory, non-blocking conditions surfaced to the user.
#[derive(Clone, Debug, PartialEq)]
pub enum Warning {
    /// Rotation is enabled but no angle is permitted: pieces can only be placed at 0°.
    EmptyRotationAngles,
    /// A piece does not fit the container in any permitted orientation.
    PieceExceedsContainer {
        piece_id: String,
        piece_width: f64,
        piece_height: f64,
        container_width: f64,
        container_height: f64,
    },
    /// A point was placed or dragged outside the drawing area and was ignored.
    PointOutsideDrawingArea(Point),
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::EmptyRotationAngles => write!(
                f,
                "rotation is enabled but no angle is selected, pieces can only be placed at 0°"
            ),
            Warning::PieceExceedsContainer {
                piece_id,
                piece_width,
                piece_height,
                container_width,
                container_height,
            } => write!(
                f,
                "piece {piece_id:?} ({piece_width:.2} x {piece_height:.2}) is larger than the container ({container_width:.2} x {container_height:.2})"
            ),
            Warning::PointOutsideDrawingArea(Point(x, y)) => write!(
                f,
                "point ({x:.2}, {y:.2}) lies outside the drawing area"
            ),
        }
    }
}
