use std::time::Duration;

use crate::entities::Piece;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::{DTransformation, GeometryError, Point, Rect, SPolygon};

/// Placement computed by the remote service. Immutable once received.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementResult {
    pub summary: Summary,
    pub bins: Vec<BinResult>,
}

impl PlacementResult {
    /// Builds a result whose summary is derived from its bins.
    pub fn from_bins(bins: Vec<BinResult>) -> Self {
        let summary = Summary::from_bins(&bins);
        PlacementResult { summary, bins }
    }

    pub fn placed_pieces(&self) -> impl Iterator<Item = &PlacedPiece> {
        self.bins.iter().flat_map(|b| b.placed_pieces.iter())
    }

    /// Total container area over all bins.
    pub fn total_area(&self) -> f64 {
        self.bins.iter().map(|b| b.area()).sum()
    }

    /// Container area covered by pieces, derived from each bin's efficiency.
    pub fn used_area(&self) -> f64 {
        self.bins.iter().map(|b| b.used_area()).sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub total_bins: usize,
    pub total_pieces_placed: usize,
    /// Mean material efficiency over all bins, in percent
    pub average_efficiency: f64,
    pub total_execution_time: Duration,
}

impl Summary {
    pub fn from_bins(bins: &[BinResult]) -> Self {
        let average_efficiency = match bins.len() {
            0 => 0.0,
            n => bins.iter().map(|b| b.efficiency).sum::<f64>() / n as f64,
        };
        Summary {
            total_bins: bins.len(),
            total_pieces_placed: bins.iter().map(|b| b.placed_pieces.len()).sum(),
            average_efficiency,
            total_execution_time: bins.iter().map(|b| b.execution_time).sum(),
        }
    }
}

/// A single container instance filled by the service.
#[derive(Clone, Debug, PartialEq)]
pub struct BinResult {
    pub bin_id: usize,
    pub width: f64,
    pub height: f64,
    /// Share of the bin area covered by pieces, in percent
    pub efficiency: f64,
    pub execution_time: Duration,
    pub placed_pieces: Vec<PlacedPiece>,
}

impl BinResult {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn used_area(&self) -> f64 {
        self.area() * self.efficiency / 100.0
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.height,
        }
    }
}

/// One copy of an original piece, positioned inside a bin.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPiece {
    pub id: String,
    pub original_id: String,
    /// 1-based index of this copy among the copies of the original piece
    pub copy_number: u32,
    /// Final boundary in bin coordinates
    pub points: Vec<Point>,
    /// Rotation and offset reported by the service, empty if only final points were sent
    pub d_transf: DTransformation,
}

impl PlacedPiece {
    /// Places a copy of `piece` by rotating its stored geometry and translating it by the offset in `d_transf`.
    pub fn from_original(
        piece: &Piece,
        id: String,
        copy_number: u32,
        d_transf: DTransformation,
    ) -> Self {
        let shape = piece.shape().transform_clone(&d_transf);
        PlacedPiece {
            id,
            original_id: piece.id().to_string(),
            copy_number,
            points: shape.into_points(),
            d_transf,
        }
    }

    /// Short tag drawn on top of the piece: the first letter of the original id followed by
    /// the copy number, e.g. `R2` for the second copy of `rectangle_1`.
    pub fn label(&self) -> String {
        let initial = self
            .original_id
            .split('_')
            .next()
            .and_then(|s| s.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string());
        format!("{initial}{}", self.copy_number)
    }

    pub fn shape(&self) -> Result<SPolygon, GeometryError> {
        SPolygon::try_new(self.points.clone())
    }
}

/// Splits a service-generated copy id such as `rectangle_1_3` into its original id and copy number.
/// Ids without a numeric suffix are treated as the first copy of themselves.
pub fn split_copy_id(id: &str) -> (String, u32) {
    match id.rsplit_once('_') {
        Some((orig, n)) if !orig.is_empty() => match n.parse::<u32>() {
            Ok(n) if n > 0 => (orig.to_string(), n),
            _ => (id.to_string(), 1),
        },
        _ => (id.to_string(), 1),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use super::*;

    fn placed(original_id: &str, copy_number: u32) -> PlacedPiece {
        PlacedPiece {
            id: format!("{original_id}_{copy_number}"),
            original_id: original_id.to_string(),
            copy_number,
            points: vec![Point(0.0, 0.0), Point(1.0, 0.0), Point(1.0, 1.0)],
            d_transf: DTransformation::empty(),
        }
    }

    #[test_case("rectangle_1", 2, "R2")]
    #[test_case("triangle", 1, "T1")]
    #[test_case("", 3, "?3")]
    fn labels(original_id: &str, copy: u32, expected: &str) {
        assert_eq!(placed(original_id, copy).label(), expected);
    }

    #[test_case("rectangle_1_3", ("rectangle_1", 3))]
    #[test_case("square_2", ("square", 2))]
    #[test_case("triangle", ("triangle", 1))]
    #[test_case("piece_x", ("piece_x", 1))]
    #[test_case("_4", ("_4", 1))]
    fn copy_ids(id: &str, expected: (&str, u32)) {
        let (orig, n) = split_copy_id(id);
        assert_eq!((orig.as_str(), n), expected);
    }

    #[test]
    fn placement_from_original_applies_rotation_then_offset() {
        let piece = Piece::try_from_points(
            "rect",
            vec![Point(0.0, 0.0), Point(50.0, 0.0), Point(50.0, 30.0), Point(0.0, 30.0)],
            1,
        )
        .unwrap();
        let dt = DTransformation::try_new(90.0, (30.0, 10.0)).unwrap();
        let pp = PlacedPiece::from_original(&piece, "rect_1".to_string(), 1, dt);
        //(50, 0) rotated by 90° lands on (0, 50), then moved by (30, 10)
        assert!(approx_eq!(f64, pp.points[1].0, 30.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, pp.points[1].1, 60.0, epsilon = 1e-9));
        assert_eq!(pp.original_id, "rect");
    }

    #[test]
    fn summary_and_areas() {
        let bin = |id, eff, n| BinResult {
            bin_id: id,
            width: 200.0,
            height: 150.0,
            efficiency: eff,
            execution_time: Duration::from_millis(250),
            placed_pieces: (1..=n).map(|i| placed("rect", i)).collect(),
        };
        let result = PlacementResult::from_bins(vec![bin(1, 80.0, 3), bin(2, 40.0, 1)]);
        assert_eq!(result.summary.total_bins, 2);
        assert_eq!(result.summary.total_pieces_placed, 4);
        assert_eq!(result.summary.average_efficiency, 60.0);
        assert_eq!(result.summary.total_execution_time, Duration::from_millis(500));
        assert_eq!(result.total_area(), 60000.0);
        assert!(approx_eq!(f64, result.used_area(), 24000.0 + 12000.0, ulps = 4));
        assert_eq!(result.placed_pieces().count(), 4);
    }
}
