use log::{debug, info, warn};
use thiserror::Error;

use crate::entities::{
    Container, NestingRequest, Piece, PlacementResult, Preset, RequestError, RotationConfig,
    Strategy,
};
use crate::geometry::{GeometryError, Point, SPolygon};
use crate::units::{self, Unit};
use crate::util::assertions;

/// Identifies the state of a [`Session`] at the moment a request was built.
/// A result is only applied if the session has not changed since.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("a piece with id {0:?} already exists")]
    DuplicateId(String),
    #[error("no piece with id {0:?}")]
    UnknownPiece(String),
    #[error("piece ids cannot be empty")]
    EmptyId,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// The complete, owned configuration of one nesting job: pieces, container, rotation policy,
/// margin, strategy, and the last placement received for it.
///
/// Every mutation of the configuration advances the session's generation, which invalidates
/// [`RequestToken`]s handed out earlier.
#[derive(Clone, Debug)]
pub struct Session {
    pieces: Vec<Piece>,
    container: Container,
    rotation: RotationConfig,
    margin: f64,
    strategy: Strategy,
    result: Option<PlacementResult>,
    generation: u64,
}

impl Session {
    pub fn new(container: Container) -> Self {
        Session {
            pieces: vec![],
            container,
            rotation: RotationConfig::default(),
            margin: 0.0,
            strategy: Strategy::default(),
            result: None,
            generation: 0,
        }
    }

    /// A 200 × 150 mm container with a handful of demonstration pieces.
    pub fn sample() -> Self {
        let mut session = Session::new(Container::default());
        let samples: [(&str, &[(f64, f64)], u32); 4] = [
            (
                "rectangle_1",
                &[(0.0, 0.0), (50.0, 0.0), (50.0, 30.0), (0.0, 30.0)],
                3,
            ),
            ("triangle_1", &[(0.0, 0.0), (40.0, 0.0), (20.0, 35.0)], 2),
            (
                "l_shape",
                &[
                    (0.0, 0.0),
                    (60.0, 0.0),
                    (60.0, 20.0),
                    (20.0, 20.0),
                    (20.0, 50.0),
                    (0.0, 50.0),
                ],
                2,
            ),
            (
                "small_square",
                &[(0.0, 0.0), (15.0, 0.0), (15.0, 15.0), (0.0, 15.0)],
                5,
            ),
        ];
        for (id, points, quantity) in samples {
            let points = points.iter().map(|&p| Point::from(p)).collect();
            if let Ok(piece) = Piece::try_from_points(id, points, quantity) {
                session.pieces.push(piece);
            }
        }
        session
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn unit(&self) -> Unit {
        self.container.unit()
    }

    pub fn rotation(&self) -> &RotationConfig {
        &self.rotation
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn result(&self) -> Option<&PlacementResult> {
        self.result.as_ref()
    }

    /// Number of piece copies over all pieces.
    pub fn total_copies(&self) -> u64 {
        self.pieces.iter().map(|p| p.quantity() as u64).sum()
    }

    /// Resizes the container, keeping the current unit.
    pub fn set_container_size(&mut self, width: f64, height: f64) -> Result<(), SessionError> {
        self.container = Container::try_new(width, height, self.unit())?;
        self.touch();
        Ok(())
    }

    /// Switches the unit of the session. Pieces, container and margin are converted so that
    /// their physical size is unchanged.
    pub fn set_unit(&mut self, unit: Unit) {
        let from = self.unit();
        if from == unit {
            return;
        }
        self.pieces = self.pieces.iter().map(|p| p.converted(from, unit)).collect();
        self.container = self.container.in_unit(unit);
        self.margin = units::convert(self.margin, from, unit);
        info!("[SESSION] unit changed from {from} to {unit}");
        self.touch();
    }

    pub fn set_rotation(&mut self, rotation: RotationConfig) {
        self.rotation = rotation;
        self.touch();
    }

    pub fn set_allow_rotation(&mut self, allow: bool) {
        self.rotation.set_allow_rotation(allow);
        self.touch();
    }

    pub fn toggle_angle(&mut self, angle: u16) -> Result<(), SessionError> {
        self.rotation.toggle_angle(angle)?;
        self.touch();
        Ok(())
    }

    pub fn set_margin(&mut self, margin: f64) -> Result<(), SessionError> {
        if !(margin.is_finite() && margin >= 0.0) {
            return Err(RequestError::InvalidMargin(margin).into());
        }
        self.margin = margin;
        self.touch();
        Ok(())
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
        self.touch();
    }

    /// Smallest `shape_{n}` identifier not used by any piece.
    pub fn next_piece_id(&self) -> String {
        self.unused_id("shape", 1)
    }

    pub fn add_piece(&mut self, piece: Piece) -> Result<(), SessionError> {
        validate_id(piece.id())?;
        if self.piece(piece.id()).is_some() {
            return Err(SessionError::DuplicateId(piece.id().to_string()));
        }
        debug!(
            "[SESSION] added piece {} ({} points, qty {})",
            piece.id(),
            piece.shape().n_points(),
            piece.quantity()
        );
        self.pieces.push(piece);
        self.touch();
        debug_assert!(assertions::piece_ids_unique(&self.pieces));
        Ok(())
    }

    /// Adds a piece built from a preset, converted to the session's unit.
    /// The piece is named after the preset, suffixed if that name is taken.
    pub fn add_preset(&mut self, preset: &Preset, quantity: u32) -> Result<&Piece, SessionError> {
        let id = match self.piece(preset.id) {
            None => preset.id.to_string(),
            Some(_) => self.unused_id(preset.id, 2),
        };
        let piece = preset.to_piece(id, self.unit(), quantity)?;
        self.add_piece(piece)?;
        Ok(self.last_piece())
    }

    pub fn rename_piece(&mut self, id: &str, new_id: &str) -> Result<(), SessionError> {
        let new_id = new_id.trim();
        validate_id(new_id)?;
        if new_id != id && self.piece(new_id).is_some() {
            return Err(SessionError::DuplicateId(new_id.to_string()));
        }
        self.piece_mut(id)?.set_id(new_id.to_string());
        self.touch();
        Ok(())
    }

    /// Sets the number of copies of a piece; zero is raised to one.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> Result<(), SessionError> {
        self.piece_mut(id)?.set_quantity(quantity);
        self.touch();
        Ok(())
    }

    /// Replaces the geometry of a piece. The points are normalized before they are stored.
    pub fn replace_geometry(&mut self, id: &str, points: Vec<Point>) -> Result<(), SessionError> {
        let shape = SPolygon::try_new(points)?;
        self.piece_mut(id)?.set_shape(shape);
        self.touch();
        Ok(())
    }

    pub fn rotate_piece(&mut self, id: &str) -> Result<(), SessionError> {
        self.piece_mut(id)?.rotate_90();
        self.touch();
        Ok(())
    }

    /// Inserts a copy of a piece right after it, with `_copy` appended to its id.
    pub fn duplicate_piece(&mut self, id: &str) -> Result<&Piece, SessionError> {
        let idx = self.index_of(id)?;
        let base = format!("{id}_copy");
        let new_id = match self.piece(&base) {
            None => base,
            Some(_) => self.unused_id(&base, 2),
        };
        let mut copy = self.pieces[idx].clone();
        copy.set_id(new_id);
        self.pieces.insert(idx + 1, copy);
        self.touch();
        debug_assert!(assertions::piece_ids_unique(&self.pieces));
        Ok(&self.pieces[idx + 1])
    }

    pub fn remove_piece(&mut self, id: &str) -> Result<Piece, SessionError> {
        let idx = self.index_of(id)?;
        let piece = self.pieces.remove(idx);
        self.touch();
        Ok(piece)
    }

    pub fn clear_pieces(&mut self) {
        info!("[SESSION] cleared {} pieces", self.pieces.len());
        self.pieces.clear();
        self.touch();
    }

    /// Replaces the whole piece collection. All ids must be non-empty and unique,
    /// otherwise nothing is changed.
    pub fn replace_pieces(&mut self, pieces: Vec<Piece>) -> Result<(), SessionError> {
        check_ids(&pieces)?;
        self.pieces = pieces;
        self.touch();
        Ok(())
    }

    /// Replaces the configuration with `other`'s, keeping this session's generation counter
    /// so outstanding tokens are invalidated. The stored result is dropped.
    pub fn replace_with(&mut self, other: Session) -> Result<(), SessionError> {
        check_ids(&other.pieces)?;
        let generation = self.generation;
        *self = Session {
            result: None,
            generation,
            ..other
        };
        self.touch();
        Ok(())
    }

    /// Snapshot of the current configuration as a request.
    pub fn build_request(&self) -> NestingRequest {
        NestingRequest {
            pieces: self.pieces.clone(),
            container: self.container,
            rotation: self.rotation.clone(),
            margin: self.margin,
            strategy: self.strategy,
        }
    }

    /// Whether submission should be offered: there is at least one piece and no blocking condition.
    pub fn can_submit(&self) -> bool {
        !self.pieces.is_empty() && self.build_request().validate().is_ok()
    }

    /// Token to hand back together with the result of a request built now.
    pub fn request_token(&self) -> RequestToken {
        RequestToken {
            generation: self.generation,
        }
    }

    /// Stores `result` if the session has not changed since `token` was issued.
    /// Returns whether the result was applied.
    pub fn apply_result(&mut self, token: RequestToken, result: PlacementResult) -> bool {
        match token.generation == self.generation {
            true => {
                info!(
                    "[SESSION] applied result: {} bins, {} pieces placed",
                    result.summary.total_bins, result.summary.total_pieces_placed
                );
                self.result = Some(result);
                true
            }
            false => {
                warn!(
                    "[SESSION] discarded stale result (generation {} != {})",
                    token.generation, self.generation
                );
                false
            }
        }
    }

    pub fn clear_result(&mut self) {
        self.result = None;
    }

    fn touch(&mut self) {
        self.generation += 1;
    }

    fn index_of(&self, id: &str) -> Result<usize, SessionError> {
        self.pieces
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| SessionError::UnknownPiece(id.to_string()))
    }

    fn piece_mut(&mut self, id: &str) -> Result<&mut Piece, SessionError> {
        let idx = self.index_of(id)?;
        Ok(&mut self.pieces[idx])
    }

    fn last_piece(&self) -> &Piece {
        &self.pieces[self.pieces.len() - 1]
    }

    fn unused_id(&self, base: &str, start: u64) -> String {
        (start..)
            .map(|n| format!("{base}_{n}"))
            .find(|id| self.piece(id).is_none())
            .unwrap_or_else(|| base.to_string())
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Container::default())
    }
}

fn validate_id(id: &str) -> Result<(), SessionError> {
    match id.trim().is_empty() {
        true => Err(SessionError::EmptyId),
        false => Ok(()),
    }
}

fn check_ids(pieces: &[Piece]) -> Result<(), SessionError> {
    for (i, piece) in pieces.iter().enumerate() {
        validate_id(piece.id())?;
        if pieces[..i].iter().any(|p| p.id() == piece.id()) {
            return Err(SessionError::DuplicateId(piece.id().to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BinResult, Summary};

    fn square(id: &str, side: f64) -> Piece {
        Piece::try_from_points(
            id,
            vec![Point(0.0, 0.0), Point(side, 0.0), Point(side, side), Point(0.0, side)],
            1,
        )
        .unwrap()
    }

    fn empty_result() -> PlacementResult {
        PlacementResult::from_bins(Vec::<BinResult>::new())
    }

    #[test]
    fn ids_are_unique() {
        let mut session = Session::default();
        session.add_piece(square("a", 10.0)).unwrap();
        assert_eq!(
            session.add_piece(square("a", 5.0)),
            Err(SessionError::DuplicateId("a".to_string()))
        );
        session.add_piece(square("b", 5.0)).unwrap();
        assert!(session.rename_piece("b", "a").is_err());
        assert_eq!(session.rename_piece("b", "  "), Err(SessionError::EmptyId));
        session.rename_piece("b", " c ").unwrap();
        assert!(session.piece("c").is_some());
    }

    #[test]
    fn next_piece_id_skips_taken_ids() {
        let mut session = Session::default();
        assert_eq!(session.next_piece_id(), "shape_1");
        session.add_piece(square("shape_1", 10.0)).unwrap();
        session.add_piece(square("shape_3", 10.0)).unwrap();
        assert_eq!(session.next_piece_id(), "shape_2");
    }

    #[test]
    fn duplicate_inserts_after_original() {
        let mut session = Session::default();
        session.add_piece(square("a", 10.0)).unwrap();
        session.add_piece(square("b", 10.0)).unwrap();
        assert_eq!(session.duplicate_piece("a").unwrap().id(), "a_copy");
        assert_eq!(session.duplicate_piece("a").unwrap().id(), "a_copy_2");
        let ids = session.pieces().iter().map(|p| p.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "a_copy_2", "a_copy", "b"]);
    }

    #[test]
    fn quantity_and_geometry_edits() {
        let mut session = Session::default();
        session.add_piece(square("a", 10.0)).unwrap();
        session.set_quantity("a", 0).unwrap();
        assert_eq!(session.piece("a").unwrap().quantity(), 1);
        session
            .replace_geometry("a", vec![Point(5.0, 5.0), Point(25.0, 5.0), Point(15.0, 20.0)])
            .unwrap();
        assert_eq!(session.piece("a").unwrap().points()[0], Point(0.0, 0.0));
        assert!(matches!(
            session.replace_geometry("a", vec![Point(0.0, 0.0)]),
            Err(SessionError::Geometry(_))
        ));
        assert_eq!(
            session.set_quantity("zz", 2),
            Err(SessionError::UnknownPiece("zz".to_string()))
        );
    }

    #[test]
    fn unit_change_preserves_physical_size() {
        let mut session = Session::default();
        session.add_piece(square("a", 50.0)).unwrap();
        session.set_margin(5.0).unwrap();
        session.set_unit(Unit::Cm);
        assert_eq!(session.unit(), Unit::Cm);
        assert_eq!(session.container().width(), 20.0);
        assert_eq!(session.piece("a").unwrap().dimensions().width, 5.0);
        assert_eq!(session.margin(), 0.5);
    }

    #[test]
    fn submit_requires_pieces() {
        let mut session = Session::default();
        assert!(!session.can_submit());
        session.add_piece(square("a", 10.0)).unwrap();
        assert!(session.can_submit());
        session.clear_pieces();
        assert!(!session.can_submit());
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut session = Session::sample();
        let token = session.request_token();
        session.clear_pieces();
        assert!(!session.apply_result(token, empty_result()));
        assert!(session.result().is_none());

        let token = session.request_token();
        assert!(session.apply_result(token, empty_result()));
        assert_eq!(
            session.result().map(|r| r.summary.clone()),
            Some(Summary::from_bins(&[]))
        );
    }

    #[test]
    fn replacing_the_configuration_invalidates_tokens() {
        let mut session = Session::sample();
        let token = session.request_token();
        session.replace_with(Session::default()).unwrap();
        assert!(session.pieces().is_empty());
        assert!(!session.apply_result(token, empty_result()));
    }

    #[test]
    fn presets_get_unique_ids() {
        let mut session = Session::default();
        let preset = Preset::find("square").unwrap();
        assert_eq!(session.add_preset(preset, 4).unwrap().id(), "square");
        assert_eq!(session.add_preset(preset, 1).unwrap().id(), "square_2");
    }

    #[test]
    fn sample_session_is_submittable() {
        let session = Session::sample();
        assert_eq!(session.pieces().len(), 4);
        assert_eq!(session.total_copies(), 12);
        assert!(session.can_submit());
    }
}
