use std::fmt::Display;

use ordered_float::NotNan;

use crate::geometry::GeometryError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy)]
/// [Proper rigid transformation](https://en.wikipedia.org/wiki/Rigid_transformation),
/// decomposed into a rotation around the origin followed by a translation.
pub struct DTransformation {
    /// The rotation in degrees
    pub rotation: NotNan<f64>,
    /// The translation in the x and y-axis
    pub translation: (NotNan<f64>, NotNan<f64>),
}

impl DTransformation {
    pub fn try_new(rotation: f64, translation: (f64, f64)) -> Result<Self, GeometryError> {
        let not_nan = |v: f64, what: &str| {
            NotNan::new(v).map_err(|_| GeometryError::InvalidGeometry(format!("{what} is NaN")))
        };
        Ok(Self {
            rotation: not_nan(rotation, "rotation")?,
            translation: (
                not_nan(translation.0, "translation.x")?,
                not_nan(translation.1, "translation.y")?,
            ),
        })
    }

    pub const fn empty() -> Self {
        const _0: NotNan<f64> = unsafe { NotNan::new_unchecked(0.0) };
        Self {
            rotation: _0,
            translation: (_0, _0),
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation.into()
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.translation.0.into(), self.translation.1.into())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

impl Default for DTransformation {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for DTransformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r: {:.3}°, t: ({:.3}, {:.3})",
            self.rotation.into_inner(),
            self.translation.0.into_inner(),
            self.translation.1.into_inner()
        )
    }
}
