use itertools::Itertools;

use crate::entities::{BinResult, NestingRequest, Piece, PlacedPiece, PlacementResult, Session};
use crate::io::ext_repr::{
    ExtBin, ExtBinnedResponse, ExtConfiguration, ExtNestingRequest, ExtPiece, ExtPieceList,
    ExtPlacedPiece, ExtPoint, ExtSummary,
};

pub fn export_piece(piece: &Piece) -> ExtPiece {
    ExtPiece {
        id: piece.id().to_string(),
        points: piece.points().iter().map(|&p| ExtPoint::from(p)).collect(),
        quantity: piece.quantity(),
    }
}

/// Exports pieces as a piece library (`{"shapes": [...]}`).
pub fn export_pieces(pieces: &[Piece]) -> ExtPieceList {
    ExtPieceList {
        shapes: pieces.iter().map(export_piece).collect(),
    }
}

/// Composes the body sent to the nesting service.
pub fn export_request(request: &NestingRequest) -> ExtNestingRequest {
    let container = &request.container;
    ExtNestingRequest {
        pieces: request.pieces.iter().map(export_piece).collect(),
        bin_width: container.width(),
        bin_height: container.height(),
        bin_width_real: container.width(),
        bin_height_real: container.height(),
        unit: container.unit(),
        allow_rotation: request.rotation.allow_rotation(),
        rotation_angles: request.rotation.angles().iter().copied().collect(),
        margin: request.margin,
        strategy: request.strategy,
    }
}

/// Exports the full configuration of a session, readable again by the importer.
pub fn export_configuration(session: &Session) -> ExtConfiguration {
    let request = export_request(&session.build_request());
    ExtConfiguration {
        pieces: request.pieces,
        bin_width: Some(request.bin_width),
        bin_height: Some(request.bin_height),
        bin_width_real: Some(request.bin_width_real),
        bin_height_real: Some(request.bin_height_real),
        unit: Some(request.unit),
        allow_rotation: Some(request.allow_rotation),
        rotation_angles: Some(request.rotation_angles),
        margin: Some(request.margin),
        strategy: Some(request.strategy),
    }
}

/// Exports a placement result in the multi-bin shape.
pub fn export_result(result: &PlacementResult) -> ExtBinnedResponse {
    ExtBinnedResponse {
        summary: ExtSummary {
            total_bins: result.summary.total_bins,
            total_pieces_placed: result.summary.total_pieces_placed,
            average_efficiency: result.summary.average_efficiency,
            total_execution_time: result.summary.total_execution_time.as_secs_f64(),
        },
        bins: result.bins.iter().map(export_bin).collect_vec(),
    }
}

fn export_bin(bin: &BinResult) -> ExtBin {
    ExtBin {
        bin_id: bin.bin_id,
        bin_width: bin.width,
        bin_height: bin.height,
        material_efficiency: bin.efficiency,
        execution_time: bin.execution_time.as_secs_f64(),
        placed_pieces: bin.placed_pieces.iter().map(export_placed_piece).collect_vec(),
    }
}

fn export_placed_piece(placed: &PlacedPiece) -> ExtPlacedPiece {
    let (x, y, rotation) = match placed.d_transf.is_empty() {
        true => (None, None, None),
        false => {
            let (tx, ty) = placed.d_transf.translation();
            (Some(tx), Some(ty), Some(placed.d_transf.rotation()))
        }
    };
    ExtPlacedPiece {
        id: placed.id.clone(),
        original_id: Some(placed.original_id.clone()),
        copy_number: Some(placed.copy_number),
        points: Some(placed.points.iter().map(|&p| ExtPoint::from(p)).collect()),
        x,
        y,
        rotation,
    }
}
