use serde::{Deserialize, Serialize};

use crate::entities::Strategy;
use crate::geometry::Point;
use crate::units::Unit;

/// External representation of a [`Point`].
/// Accepted either as an `[x, y]` pair or as an `{"x": .., "y": ..}` object, always written as a pair.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(untagged)]
pub enum ExtPoint {
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

impl From<ExtPoint> for Point {
    fn from(p: ExtPoint) -> Self {
        match p {
            ExtPoint::Pair([x, y]) => Point(x, y),
            ExtPoint::Object { x, y } => Point(x, y),
        }
    }
}

impl From<Point> for ExtPoint {
    fn from(p: Point) -> Self {
        ExtPoint::Pair([p.0, p.1])
    }
}

/// External representation of a [`Piece`](crate::entities::Piece).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPiece {
    /// Unique identifier of the piece
    pub id: String,
    /// Boundary of the piece, without a closing duplicate point
    pub points: Vec<ExtPoint>,
    /// Number of copies to place, 1 if not specified
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Body of the request sent to the nesting service.
/// Dimensions are expressed in `unit`; `bin_width_real` and `bin_height_real` repeat them for
/// services that distinguish drawing dimensions from physical ones.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtNestingRequest {
    pub pieces: Vec<ExtPiece>,
    pub bin_width: f64,
    pub bin_height: f64,
    pub bin_width_real: f64,
    pub bin_height_real: f64,
    pub unit: Unit,
    pub allow_rotation: bool,
    pub rotation_angles: Vec<u16>,
    pub margin: f64,
    pub strategy: Strategy,
}

/// A configuration file: pieces plus any subset of the job settings.
/// Missing settings keep their current value on import.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtConfiguration {
    pub pieces: Vec<ExtPiece>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_width_real: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_height_real: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_rotation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_angles: Option<Vec<u16>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
}

/// A piece library file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPieceList {
    pub shapes: Vec<ExtPiece>,
}

/// Response of the nesting service, in either of the two shapes services produce.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ExtNestingResponse {
    Binned(ExtBinnedResponse),
    Flat(ExtFlatResponse),
}

/// Multi-bin response with a global summary.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtBinnedResponse {
    pub summary: ExtSummary,
    pub bins: Vec<ExtBin>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtSummary {
    pub total_bins: usize,
    pub total_pieces_placed: usize,
    /// Percentage
    pub average_efficiency: f64,
    /// Seconds
    pub total_execution_time: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtBin {
    pub bin_id: usize,
    pub bin_width: f64,
    pub bin_height: f64,
    /// Percentage
    pub material_efficiency: f64,
    /// Seconds
    pub execution_time: f64,
    pub placed_pieces: Vec<ExtPlacedPiece>,
}

/// A placed copy of a piece. Services send either the final `points`, or the offset and
/// rotation (degrees) to apply to the original piece, or both.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacedPiece {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<ExtPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// Single-list response: every placed piece, the number of bins used and the overall utilization.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtFlatResponse {
    pub placed_pieces: Vec<ExtPlacedPiece>,
    pub bins_used: usize,
    /// Percentage
    pub utilization: f64,
    /// Seconds
    pub computation_time: f64,
}
