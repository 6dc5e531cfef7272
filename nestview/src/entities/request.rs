use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{Container, Piece, Warning};

/// Packing algorithm run by the remote service. Opaque to the client beyond its wire name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    BottomLeft,
    BestFit,
    GeneticAlgorithm,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::BottomLeft,
        Strategy::BestFit,
        Strategy::GeneticAlgorithm,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::BottomLeft => "bottom_left",
            Strategy::BestFit => "best_fit",
            Strategy::GeneticAlgorithm => "genetic_algorithm",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Strategy::BottomLeft => "Bottom-left",
            Strategy::BestFit => "Best fit",
            Strategy::GeneticAlgorithm => "Genetic algorithm",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Strategy::BottomLeft => "Bottom-left corner (fast, balanced)",
            Strategy::BestFit => "Best fit (slower, tighter packing)",
            Strategy::GeneticAlgorithm => "Genetic algorithm (slowest, searches for the best layout)",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown strategy {0:?}, expected one of bottom_left, best_fit, genetic_algorithm")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Strategy::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Whether pieces may be rotated, and by which angles (degrees, in `[0, 360)`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotationConfig {
    allow_rotation: bool,
    angles: BTreeSet<u16>,
}

impl RotationConfig {
    pub const DEFAULT_ANGLES: [u16; 4] = [0, 90, 180, 270];

    pub fn try_new(
        allow_rotation: bool,
        angles: impl IntoIterator<Item = u16>,
    ) -> Result<Self, RequestError> {
        let angles = angles.into_iter().collect::<BTreeSet<_>>();
        if let Some(&a) = angles.iter().find(|&&a| a >= 360) {
            return Err(RequestError::InvalidAngle(a));
        }
        Ok(RotationConfig {
            allow_rotation,
            angles,
        })
    }

    pub fn disabled() -> Self {
        RotationConfig {
            allow_rotation: false,
            angles: BTreeSet::new(),
        }
    }

    pub fn allow_rotation(&self) -> bool {
        self.allow_rotation
    }

    /// Angles as configured, including when rotation is disabled.
    pub fn angles(&self) -> &BTreeSet<u16> {
        &self.angles
    }

    /// Angles the service may actually use: only 0° when rotation is disabled or no angle is set.
    pub fn effective_angles(&self) -> Vec<u16> {
        match self.allow_rotation && !self.angles.is_empty() {
            true => self.angles.iter().copied().collect(),
            false => vec![0],
        }
    }

    /// Whether any permitted angle is a quarter or three-quarter turn.
    pub fn allows_quarter_turn(&self) -> bool {
        self.allow_rotation && self.angles.iter().any(|a| a % 180 == 90)
    }

    pub fn set_allow_rotation(&mut self, allow: bool) {
        self.allow_rotation = allow;
    }

    pub fn toggle_angle(&mut self, angle: u16) -> Result<(), RequestError> {
        if angle >= 360 {
            return Err(RequestError::InvalidAngle(angle));
        }
        if !self.angles.remove(&angle) {
            self.angles.insert(angle);
        }
        Ok(())
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        RotationConfig {
            allow_rotation: true,
            angles: BTreeSet::from(Self::DEFAULT_ANGLES),
        }
    }
}

/// Conditions that make a request unsuitable for submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("the request contains no pieces")]
    NoPieces,
    #[error("margin must be finite and non-negative, got {0}")]
    InvalidMargin(f64),
    #[error("rotation angle {0} is outside [0, 360)")]
    InvalidAngle(u16),
}

/// Everything the remote service needs to compute a placement.
#[derive(Clone, Debug, PartialEq)]
pub struct NestingRequest {
    pub pieces: Vec<Piece>,
    pub container: Container,
    pub rotation: RotationConfig,
    pub margin: f64,
    pub strategy: Strategy,
}

impl NestingRequest {
    /// Checks whether the request can be submitted.
    /// Blocking conditions are returned as errors, advisory ones as warnings.
    pub fn validate(&self) -> Result<Vec<Warning>, RequestError> {
        if self.pieces.is_empty() {
            return Err(RequestError::NoPieces);
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(RequestError::InvalidMargin(self.margin));
        }
        let mut warnings = vec![];
        if self.rotation.allow_rotation() && self.rotation.angles().is_empty() {
            warnings.push(Warning::EmptyRotationAngles);
        }
        let quarter_turn = self.rotation.allows_quarter_turn();
        for piece in &self.pieces {
            let d = piece.dimensions();
            if !self.container.fits(d.width, d.height, quarter_turn) {
                warnings.push(Warning::PieceExceedsContainer {
                    piece_id: piece.id().to_string(),
                    piece_width: d.width,
                    piece_height: d.height,
                    container_width: self.container.width(),
                    container_height: self.container.height(),
                });
            }
        }
        Ok(warnings)
    }

    /// Number of piece copies the service is asked to place.
    pub fn total_copies(&self) -> u64 {
        self.pieces.iter().map(|p| p.quantity() as u64).sum()
    }

    /// Sum of the areas of all requested copies.
    pub fn total_piece_area(&self) -> f64 {
        self.pieces
            .iter()
            .map(|p| p.area() * p.quantity() as f64)
            .sum()
    }
}
