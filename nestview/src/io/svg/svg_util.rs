use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::Path;
use svg::node::element::path::Data;
use thiserror::Error;

use crate::geometry::{Point, Rect};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Width of the drawing surface in pixels
    #[serde(default = "default_surface_width")]
    pub surface_width: f64,
    ///Height of the drawing surface in pixels
    #[serde(default = "default_surface_height")]
    pub surface_height: f64,
    ///Free space around the container in pixels
    #[serde(default = "default_padding")]
    pub padding: f64,
    ///Draw the abbreviated piece labels on top of each placed piece
    #[serde(default = "default_true")]
    pub labels: bool,
    ///Print dimensions and efficiency above the container
    #[serde(default = "default_true")]
    pub header: bool,
}

fn default_surface_width() -> f64 {
    800.0
}

fn default_surface_height() -> f64 {
    600.0
}

fn default_padding() -> f64 {
    20.0
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
            padding: default_padding(),
            labels: true,
            header: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgLayoutTheme {
    pub stroke_width: f64,
    pub background: Color,
    pub container_fill: Color,
    pub container_stroke: Color,
    pub piece_opacity: f64,
    pub label_color: Color,
    pub grid_color: Color,
    /// Fill colors assigned to placed pieces by index, cycling
    pub palette: Vec<Color>,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::pastel()
    }
}

impl SvgLayoutTheme {
    pub const PASTEL_PALETTE: [Color; 10] = [
        Color(0xFF, 0x6B, 0x6B),
        Color(0x4E, 0xCD, 0xC4),
        Color(0x45, 0xB7, 0xD1),
        Color(0x96, 0xCE, 0xB4),
        Color(0xFF, 0xEA, 0xA7),
        Color(0xDD, 0xA0, 0xDD),
        Color(0x98, 0xD8, 0xC8),
        Color(0xF7, 0xDC, 0x6F),
        Color(0xBB, 0x8F, 0xCE),
        Color(0x85, 0xC1, 0xE9),
    ];

    pub fn pastel() -> Self {
        SvgLayoutTheme {
            stroke_width: 1.0,
            background: Color(0xFF, 0xFF, 0xFF),
            container_fill: Color(0xF9, 0xFA, 0xFB),
            container_stroke: Color(0x37, 0x41, 0x51),
            piece_opacity: 0.8,
            label_color: Color(0x1F, 0x29, 0x37),
            grid_color: Color(0xE5, 0xE7, 0xEB),
            palette: Self::PASTEL_PALETTE.to_vec(),
        }
    }

    pub fn gray() -> Self {
        SvgLayoutTheme {
            stroke_width: 1.5,
            background: Color(0xFF, 0xFF, 0xFF),
            container_fill: Color(0xD3, 0xD3, 0xD3),
            container_stroke: Color(0x00, 0x00, 0x00),
            piece_opacity: 0.9,
            label_color: Color(0x00, 0x00, 0x00),
            grid_color: Color(0xBB, 0xBB, 0xBB),
            palette: vec![Color(0x7A, 0x7A, 0x7A), Color(0x9A, 0x9A, 0x9A)],
        }
    }

    /// Fill color of the placed piece at `index`. Falls back to gray on an empty palette.
    pub fn piece_fill(&self, index: usize) -> Color {
        match self.palette.is_empty() {
            true => Color(0x7A, 0x7A, 0x7A),
            false => self.palette[index % self.palette.len()],
        }
    }
}

pub fn change_brightness(color: Color, fraction: f32) -> Color {
    let Color(r, g, b) = color;
    let scale = |c: u8| (c as f32 * fraction).clamp(0.0, 255.0) as u8;
    Color(scale(r), scale(g), scale(b))
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid color {0:?}, expected #RRGGBB")]
pub struct InvalidColor(pub String);

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| InvalidColor(s.to_string()))
        };
        match hex.len() {
            6 => Ok(Color(channel(0)?, channel(2)?, channel(4)?)),
            _ => Err(InvalidColor(s.to_string())),
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(DeError::custom)
    }
}

pub fn xy(Point(x, y): Point) -> (f32, f32) {
    (x as f32, y as f32)
}

/// Closed path through `points`, which are expected in screen coordinates.
pub fn polygon_data(points: &[Point]) -> Data {
    let mut iter = points.iter();
    let mut data = match iter.next() {
        Some(first) => Data::new().move_to(xy(*first)),
        None => return Data::new(),
    };
    for p in iter {
        data = data.line_to(xy(*p));
    }
    data.close()
}

/// Open path through `points`, for polygons still being drawn.
pub fn polyline_data(points: &[Point]) -> Data {
    let mut iter = points.iter();
    let mut data = match iter.next() {
        Some(first) => Data::new().move_to(xy(*first)),
        None => return Data::new(),
    };
    for p in iter {
        data = data.line_to(xy(*p));
    }
    data
}

pub fn aa_rect_data(rect: Rect) -> Data {
    polygon_data(&rect.corners())
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_parse_and_print() {
        let c: Color = "#4ECDC4".parse().unwrap();
        assert_eq!(c, Color(0x4E, 0xCD, 0xC4));
        assert_eq!(c.to_string(), "#4ECDC4");
        assert_eq!("ff6b6b".parse::<Color>(), Ok(Color(0xFF, 0x6B, 0x6B)));
        assert!("#12345".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
    }

    #[test]
    fn palette_cycles() {
        let theme = SvgLayoutTheme::default();
        assert_eq!(theme.piece_fill(0), theme.piece_fill(10));
        assert_ne!(theme.piece_fill(0), theme.piece_fill(1));
    }

    #[test]
    fn brightness_saturates() {
        assert_eq!(change_brightness(Color(200, 100, 0), 2.0), Color(255, 200, 0));
        assert_eq!(change_brightness(Color(200, 100, 0), 0.5), Color(100, 50, 0));
    }

    #[test]
    fn options_fill_missing_fields() {
        let options: SvgDrawOptions = serde_json::from_str(r#"{"labels": false}"#).unwrap();
        assert!(!options.labels);
        assert_eq!(options.surface_width, 800.0);
        assert_eq!(options.theme, SvgLayoutTheme::default());
    }
}
