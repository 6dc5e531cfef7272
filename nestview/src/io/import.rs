use std::time::Duration;

use log::{info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::entities::{
    BinResult, NestingRequest, Piece, PlacedPiece, PlacementResult, RequestError, RotationConfig,
    Session, SessionError, Summary, split_copy_id,
};
use crate::geometry::{DTransformation, GeometryError, Point, SPolygon};
use crate::io::ext_repr::{
    ExtBinnedResponse, ExtConfiguration, ExtFlatResponse, ExtNestingResponse, ExtPiece,
    ExtPieceList, ExtPlacedPiece,
};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unrecognized format, expected a `pieces` or `shapes` array")]
    UnrecognizedFormat,
    #[error("piece {id:?}: {source}")]
    InvalidPiece {
        id: String,
        #[source]
        source: GeometryError,
    },
    #[error("placed piece {0:?} carries no points and matches no requested piece")]
    UnresolvedPlacement(String),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Content of an import file.
#[derive(Clone, Debug, PartialEq)]
pub enum Imported {
    /// Full configuration: pieces and optionally the job settings
    Configuration(ExtConfiguration),
    /// Piece library: pieces only
    Pieces(Vec<ExtPiece>),
}

impl Imported {
    pub fn pieces(&self) -> &[ExtPiece] {
        match self {
            Imported::Configuration(c) => &c.pieces,
            Imported::Pieces(p) => p,
        }
    }
}

/// Parses an import file. A document with a `pieces` array is a configuration, one with a
/// `shapes` array is a piece library; anything else is refused.
pub fn parse_import(json: &str) -> Result<Imported, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    let has_pieces = value.get("pieces").is_some_and(Value::is_array);
    let has_shapes = value.get("shapes").is_some_and(Value::is_array);
    match (has_pieces, has_shapes) {
        (true, _) => Ok(Imported::Configuration(serde_json::from_value(value)?)),
        (false, true) => Ok(Imported::Pieces(
            serde_json::from_value::<ExtPieceList>(value)?.shapes,
        )),
        (false, false) => Err(ImportError::UnrecognizedFormat),
    }
}

pub fn import_piece(ext_piece: &ExtPiece) -> Result<Piece, ImportError> {
    let points = ext_piece.points.iter().map(|&p| Point::from(p)).collect();
    Piece::try_from_points(ext_piece.id.clone(), points, ext_piece.quantity).map_err(|source| {
        ImportError::InvalidPiece {
            id: ext_piece.id.clone(),
            source,
        }
    })
}

pub fn import_pieces(ext_pieces: &[ExtPiece]) -> Result<Vec<Piece>, ImportError> {
    ext_pieces.iter().map(import_piece).collect()
}

/// Loads an import file into `session`.
///
/// A piece library replaces only the pieces. A configuration replaces the pieces and every
/// setting it specifies, in the unit it specifies. Nothing is changed if any part of the
/// file is invalid. Returns the number of pieces imported.
pub fn import_into_session(session: &mut Session, json: &str) -> Result<usize, ImportError> {
    let imported = parse_import(json)?;
    let pieces = import_pieces(imported.pieces())?;
    let n_pieces = pieces.len();
    match imported {
        Imported::Pieces(_) => session.replace_pieces(pieces)?,
        Imported::Configuration(config) => {
            let next = configured_session(session, &config, pieces)?;
            session.replace_with(next)?;
        }
    }
    info!("[IMPORT] imported {n_pieces} pieces");
    Ok(n_pieces)
}

fn configured_session(
    current: &Session,
    config: &ExtConfiguration,
    pieces: Vec<Piece>,
) -> Result<Session, ImportError> {
    let mut next = current.clone();
    if let Some(unit) = config.unit {
        next.set_unit(unit);
    }
    let width = config
        .bin_width_real
        .or(config.bin_width)
        .unwrap_or(next.container().width());
    let height = config
        .bin_height_real
        .or(config.bin_height)
        .unwrap_or(next.container().height());
    next.set_container_size(width, height)?;

    let allow_rotation = config
        .allow_rotation
        .unwrap_or(next.rotation().allow_rotation());
    let rotation = match &config.rotation_angles {
        Some(angles) => RotationConfig::try_new(allow_rotation, angles.iter().copied())?,
        None => RotationConfig::try_new(allow_rotation, next.rotation().angles().iter().copied())?,
    };
    next.set_rotation(rotation);
    if let Some(margin) = config.margin {
        next.set_margin(margin)?;
    }
    if let Some(strategy) = config.strategy {
        next.set_strategy(strategy);
    }
    next.replace_pieces(pieces)?;
    Ok(next)
}

/// Parses a service response and resolves it against the request it answers.
pub fn import_response(
    json: &str,
    request: &NestingRequest,
) -> Result<PlacementResult, ImportError> {
    let ext_response: ExtNestingResponse = serde_json::from_str(json)?;
    import_result(&ext_response, request)
}

pub fn import_result(
    ext_response: &ExtNestingResponse,
    request: &NestingRequest,
) -> Result<PlacementResult, ImportError> {
    match ext_response {
        ExtNestingResponse::Binned(binned) => import_binned(binned, request),
        ExtNestingResponse::Flat(flat) => import_flat(flat, request),
    }
}

fn import_binned(
    binned: &ExtBinnedResponse,
    request: &NestingRequest,
) -> Result<PlacementResult, ImportError> {
    let bins = binned
        .bins
        .iter()
        .map(|ext_bin| {
            Ok(BinResult {
                bin_id: ext_bin.bin_id,
                width: ext_bin.bin_width,
                height: ext_bin.bin_height,
                efficiency: ext_bin.material_efficiency,
                execution_time: secs(ext_bin.execution_time),
                placed_pieces: import_placed_pieces(&ext_bin.placed_pieces, request)?,
            })
        })
        .collect::<Result<Vec<_>, ImportError>>()?;

    let summary = Summary {
        total_bins: binned.summary.total_bins,
        total_pieces_placed: binned.summary.total_pieces_placed,
        average_efficiency: binned.summary.average_efficiency,
        total_execution_time: secs(binned.summary.total_execution_time),
    };
    if summary.total_bins != bins.len() {
        warn!(
            "[IMPORT] summary reports {} bins, response contains {}",
            summary.total_bins,
            bins.len()
        );
    }
    Ok(PlacementResult { summary, bins })
}

/// The flat shape does not say which bin a piece went into: every piece is put in a single
/// bin with the requested container dimensions.
fn import_flat(
    flat: &ExtFlatResponse,
    request: &NestingRequest,
) -> Result<PlacementResult, ImportError> {
    let placed_pieces = import_placed_pieces(&flat.placed_pieces, request)?;
    let execution_time = secs(flat.computation_time);
    let summary = Summary {
        total_bins: flat.bins_used,
        total_pieces_placed: placed_pieces.len(),
        average_efficiency: flat.utilization,
        total_execution_time: execution_time,
    };
    let bin = BinResult {
        bin_id: 1,
        width: request.container.width(),
        height: request.container.height(),
        efficiency: flat.utilization,
        execution_time,
        placed_pieces,
    };
    Ok(PlacementResult {
        summary,
        bins: vec![bin],
    })
}

fn import_placed_pieces(
    ext_placed: &[ExtPlacedPiece],
    request: &NestingRequest,
) -> Result<Vec<PlacedPiece>, ImportError> {
    ext_placed
        .iter()
        .map(|epp| import_placed_piece(epp, request))
        .collect()
}

pub fn import_placed_piece(
    ext_placed: &ExtPlacedPiece,
    request: &NestingRequest,
) -> Result<PlacedPiece, ImportError> {
    let (parsed_id, parsed_copy) = split_copy_id(&ext_placed.id);
    let original_id = ext_placed.original_id.clone().unwrap_or(parsed_id);
    let copy_number = ext_placed.copy_number.unwrap_or(parsed_copy);

    let has_transform =
        ext_placed.x.is_some() || ext_placed.y.is_some() || ext_placed.rotation.is_some();
    let d_transf = match has_transform {
        true => DTransformation::try_new(
            ext_placed.rotation.unwrap_or(0.0),
            (ext_placed.x.unwrap_or(0.0), ext_placed.y.unwrap_or(0.0)),
        )?,
        false => DTransformation::empty(),
    };

    match &ext_placed.points {
        Some(points) => {
            let points = points.iter().map(|&p| Point::from(p)).collect();
            let shape = SPolygon::try_new(points).map_err(|source| ImportError::InvalidPiece {
                id: ext_placed.id.clone(),
                source,
            })?;
            Ok(PlacedPiece {
                id: ext_placed.id.clone(),
                original_id,
                copy_number,
                points: shape.into_points(),
                d_transf,
            })
        }
        None => {
            let original = request
                .pieces
                .iter()
                .find(|p| p.id() == original_id)
                .ok_or_else(|| ImportError::UnresolvedPlacement(ext_placed.id.clone()))?;
            Ok(PlacedPiece::from_original(
                original,
                ext_placed.id.clone(),
                copy_number,
                d_transf,
            ))
        }
    }
}

fn secs(s: f64) -> Duration {
    Duration::try_from_secs_f64(s).unwrap_or_default()
}
