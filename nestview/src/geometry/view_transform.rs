use crate::geometry::GeometryError;
use crate::geometry::primitives::Point;

/// Uniform scale plus origin offset mapping world coordinates onto a rendering surface.
/// The same transform is used to capture pointer input and to draw, so what was drawn
/// and what is displayed as placed always line up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    origin: Point,
    scale: f64,
}

impl ViewTransform {
    pub fn try_new(origin: Point, scale: f64) -> Result<Self, GeometryError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(GeometryError::InvalidScale(scale));
        }
        if !origin.is_finite() {
            return Err(GeometryError::InvalidGeometry(format!(
                "non-finite view origin: {origin:?}"
            )));
        }
        Ok(ViewTransform { origin, scale })
    }

    pub const fn identity() -> Self {
        ViewTransform {
            origin: Point(0.0, 0.0),
            scale: 1.0,
        }
    }

    /// Transform that fits a `container_width` × `container_height` world rectangle into the
    /// available surface, offset by `origin`. See [`fit_scale`].
    pub fn fit(
        origin: Point,
        available_width: f64,
        available_height: f64,
        container_width: f64,
        container_height: f64,
    ) -> Result<Self, GeometryError> {
        let scale = fit_scale(
            available_width,
            available_height,
            container_width,
            container_height,
        )?;
        ViewTransform::try_new(origin, scale)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline(always)]
    pub fn to_screen(&self, Point(x, y): Point) -> Point {
        Point(self.origin.0 + x * self.scale, self.origin.1 + y * self.scale)
    }

    #[inline(always)]
    pub fn to_world(&self, Point(x, y): Point) -> Point {
        Point(
            (x - self.origin.0) / self.scale,
            (y - self.origin.1) / self.scale,
        )
    }

    /// Converts a world length (stroke width, font size, ...) to screen pixels.
    pub fn length_to_screen(&self, length: f64) -> f64 {
        length * self.scale
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform::identity()
    }
}

/// Largest scale at which the container fits the available surface, capped at 1:1.
///
/// Computes `min(available_width / container_width, available_height / container_height, 1.0)`.
pub fn fit_scale(
    available_width: f64,
    available_height: f64,
    container_width: f64,
    container_height: f64,
) -> Result<f64, GeometryError> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !(positive(container_width) && positive(container_height)) {
        return Err(GeometryError::InvalidGeometry(format!(
            "container dimensions must be strictly positive, got {container_width} x {container_height}"
        )));
    }
    let scale = f64::min(
        f64::min(
            available_width / container_width,
            available_height / container_height,
        ),
        1.0,
    );
    match positive(scale) {
        true => Ok(scale),
        false => Err(GeometryError::InvalidScale(scale)),
    }
}
