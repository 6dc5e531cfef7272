use std::fmt::{Display, Formatter};

use crate::entities::Piece;
use crate::geometry::{GeometryError, Point};
use crate::units::{self, Unit};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetCategory {
    Basic,
    Common,
    Industrial,
}

impl Display for PresetCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PresetCategory::Basic => "basic shapes",
            PresetCategory::Common => "common objects",
            PresetCategory::Industrial => "industrial",
        })
    }
}

/// A ready-made piece template. Points are in millimeters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PresetCategory,
    pub description: &'static str,
    pub points: &'static [(f64, f64)],
    pub default_quantity: u32,
}

impl Preset {
    pub fn find(id: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|p| p.id == id)
    }

    /// Presets whose name or description contains `term` (case-insensitive),
    /// optionally restricted to one category.
    pub fn search(
        term: &str,
        category: Option<PresetCategory>,
    ) -> impl Iterator<Item = &'static Preset> {
        let term = term.trim().to_lowercase();
        PRESETS.iter().filter(move |p| {
            let matches_term = p.name.to_lowercase().contains(&term)
                || p.description.to_lowercase().contains(&term);
            matches_term && category.is_none_or(|c| p.category == c)
        })
    }

    /// Geometry of the preset expressed in `unit`.
    pub fn points_in(&self, unit: Unit) -> Vec<Point> {
        self.points
            .iter()
            .map(|&(x, y)| Point(units::from_base(x, unit), units::from_base(y, unit)))
            .collect()
    }

    /// Builds a piece named `id` from this preset, with coordinates converted to `unit`.
    pub fn to_piece(
        &self,
        id: impl Into<String>,
        unit: Unit,
        quantity: u32,
    ) -> Result<Piece, GeometryError> {
        Piece::try_from_points(id, self.points_in(unit), quantity)
    }
}

pub static PRESETS: &[Preset] = &[
    Preset {
        id: "rectangle",
        name: "Rectangle",
        category: PresetCategory::Basic,
        description: "Plain rectangle",
        points: &[(0.0, 0.0), (50.0, 0.0), (50.0, 30.0), (0.0, 30.0)],
        default_quantity: 3,
    },
    Preset {
        id: "square",
        name: "Square",
        category: PresetCategory::Basic,
        description: "Perfect square",
        points: &[(0.0, 0.0), (25.0, 0.0), (25.0, 25.0), (0.0, 25.0)],
        default_quantity: 4,
    },
    Preset {
        id: "triangle",
        name: "Triangle",
        category: PresetCategory::Basic,
        description: "Isosceles triangle",
        points: &[(0.0, 0.0), (40.0, 0.0), (20.0, 35.0)],
        default_quantity: 3,
    },
    Preset {
        id: "octagon",
        name: "Octagon",
        category: PresetCategory::Basic,
        description: "Octagon approximating a circle",
        points: &[
            (15.0, 0.0),
            (25.0, 0.0),
            (35.0, 10.0),
            (35.0, 20.0),
            (25.0, 30.0),
            (15.0, 30.0),
            (5.0, 20.0),
            (5.0, 10.0),
        ],
        default_quantity: 2,
    },
    Preset {
        id: "l_shape",
        name: "L shape",
        category: PresetCategory::Basic,
        description: "Classic L profile",
        points: &[
            (0.0, 0.0),
            (60.0, 0.0),
            (60.0, 20.0),
            (20.0, 20.0),
            (20.0, 50.0),
            (0.0, 50.0),
        ],
        default_quantity: 2,
    },
    Preset {
        id: "t_shape",
        name: "T shape",
        category: PresetCategory::Basic,
        description: "T profile",
        points: &[
            (0.0, 0.0),
            (60.0, 0.0),
            (60.0, 15.0),
            (35.0, 15.0),
            (35.0, 50.0),
            (25.0, 50.0),
            (25.0, 15.0),
            (0.0, 15.0),
        ],
        default_quantity: 2,
    },
    Preset {
        id: "envelope",
        name: "Envelope",
        category: PresetCategory::Common,
        description: "Standard DL envelope",
        points: &[(0.0, 0.0), (110.0, 0.0), (110.0, 220.0), (0.0, 220.0)],
        default_quantity: 5,
    },
    Preset {
        id: "business_card",
        name: "Business card",
        category: PresetCategory::Common,
        description: "Standard business card",
        points: &[(0.0, 0.0), (85.0, 0.0), (85.0, 55.0), (0.0, 55.0)],
        default_quantity: 10,
    },
    Preset {
        id: "label",
        name: "Label",
        category: PresetCategory::Common,
        description: "Rectangular label with chamfered corners",
        points: &[
            (5.0, 0.0),
            (45.0, 0.0),
            (50.0, 5.0),
            (50.0, 15.0),
            (45.0, 20.0),
            (5.0, 20.0),
            (0.0, 15.0),
            (0.0, 5.0),
        ],
        default_quantity: 8,
    },
    Preset {
        id: "box_template",
        name: "Box template",
        category: PresetCategory::Common,
        description: "Unfolded box net",
        points: &[
            (0.0, 30.0),
            (30.0, 30.0),
            (30.0, 0.0),
            (60.0, 0.0),
            (60.0, 30.0),
            (90.0, 30.0),
            (90.0, 60.0),
            (60.0, 60.0),
            (60.0, 90.0),
            (30.0, 90.0),
            (30.0, 60.0),
            (0.0, 60.0),
        ],
        default_quantity: 1,
    },
    Preset {
        id: "hexagon",
        name: "Hexagon",
        category: PresetCategory::Industrial,
        description: "Regular hexagon",
        points: &[
            (15.0, 0.0),
            (35.0, 0.0),
            (45.0, 17.0),
            (35.0, 35.0),
            (15.0, 35.0),
            (5.0, 17.0),
        ],
        default_quantity: 3,
    },
    Preset {
        id: "trapezoid",
        name: "Trapezoid",
        category: PresetCategory::Industrial,
        description: "Isosceles trapezoid",
        points: &[(10.0, 0.0), (40.0, 0.0), (50.0, 30.0), (0.0, 30.0)],
        default_quantity: 2,
    },
    Preset {
        id: "parallelogram",
        name: "Parallelogram",
        category: PresetCategory::Industrial,
        description: "Slanted parallelogram",
        points: &[(0.0, 0.0), (40.0, 0.0), (50.0, 25.0), (10.0, 25.0)],
        default_quantity: 2,
    },
];
