use crate::geometry::{GeometryError, Rect};
use crate::units::{self, Unit};

/// Rectangular bin into which pieces are packed, expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    width: f64,
    height: f64,
    unit: Unit,
}

impl Container {
    pub fn try_new(width: f64, height: f64, unit: Unit) -> Result<Self, GeometryError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        match positive(width) && positive(height) {
            true => Ok(Container {
                width,
                height,
                unit,
            }),
            false => Err(GeometryError::InvalidGeometry(format!(
                "container dimensions must be strictly positive, got {width} x {height}"
            ))),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The container as a world rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Size of the container on a surface drawing `px_per_unit` pixels per world unit.
    pub fn pixel_size(&self, px_per_unit: f64) -> (f64, f64) {
        (self.width * px_per_unit, self.height * px_per_unit)
    }

    /// Same physical container expressed in another unit.
    pub fn in_unit(&self, unit: Unit) -> Container {
        Container {
            width: units::convert(self.width, self.unit, unit),
            height: units::convert(self.height, self.unit, unit),
            unit,
        }
    }

    /// Whether a `width` × `height` box fits, optionally also after a quarter turn.
    pub fn fits(&self, width: f64, height: f64, quarter_turn_allowed: bool) -> bool {
        let upright = width <= self.width && height <= self.height;
        let turned = quarter_turn_allowed && height <= self.width && width <= self.height;
        upright || turned
    }
}

impl Default for Container {
    fn default() -> Self {
        Container {
            width: 200.0,
            height: 150.0,
            unit: Unit::default(),
        }
    }
}
