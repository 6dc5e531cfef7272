use itertools::Itertools;

use crate::entities::Piece;
use crate::geometry::geo_traits::Shape;
use crate::geometry::{Point, Rect, ViewTransform};
use crate::util::FPA;

//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks and tests

pub fn piece_is_normalized(piece: &Piece) -> bool {
    let bbox = piece.shape().bbox();
    FPA(bbox.x_min) == FPA(0.0) && FPA(bbox.y_min) == FPA(0.0)
}

pub fn piece_ids_unique(pieces: &[Piece]) -> bool {
    pieces.iter().map(|p| p.id()).all_unique()
}

pub fn points_approx_eq(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|(p, q)| FPA::points_eq(*p, *q))
}

pub fn view_round_trips(view: &ViewTransform, p: Point) -> bool {
    FPA::points_eq(view.to_world(view.to_screen(p)), p)
}

pub fn points_inside(area: &Rect, points: &[Point]) -> bool {
    points.iter().all(|p| area.contains_point(*p))
}
