use enum_map::{Enum, EnumMap, enum_map};
use iced_core::Color;
use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

/// How the sampled points of a curve are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointMode {
    /// Each finite sample is a dot.
    Points,
    /// Adjacent finite samples are joined; non-finite samples break the line.
    #[default]
    Polyline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    pub color: Color,
    pub stroke_width: f32,
    pub point_mode: PointMode,
    pub cap: StrokeCap,
    /// Screen pixels between two samples.
    pub pixel_step: f32,
}

impl CurveStyle {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            stroke_width: 1.0,
            point_mode: PointMode::default(),
            cap: StrokeCap::default(),
            pixel_step: 1.0,
        }
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_point_mode(mut self, mode: PointMode) -> Self {
        self.point_mode = mode;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_pixel_step(mut self, step: f32) -> Self {
        self.pixel_step = step;
        self
    }
}

/// Significance level of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridTier {
    Fine,
    Major,
    Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLineStyle {
    #[serde(with = "hex_color")]
    pub color: Color,
    pub width: f32,
    pub opacity: f32,
    #[serde(default)]
    pub dash: Option<Vec<f32>>,
}

impl GridLineStyle {
    fn solid(opacity: f32) -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            opacity,
            dash: None,
        }
    }

    /// Line color with the tier opacity folded into alpha.
    pub fn stroke_color(&self) -> Color {
        Color {
            a: self.color.a * self.opacity.clamp(0.0, 1.0),
            ..self.color
        }
    }
}

pub fn default_grid_styles() -> EnumMap<GridTier, GridLineStyle> {
    enum_map! {
        GridTier::Fine => GridLineStyle::solid(0.05),
        GridTier::Major => GridLineStyle::solid(0.1),
        GridTier::Axis => GridLineStyle::solid(1.0),
    }
}

/// Parses `#rrggbb` (or `rrggbb`) into an opaque color.
pub fn parse_hex(hex: &str) -> Result<Color, palette::rgb::FromHexError> {
    let rgb: Srgb<u8> = hex.trim().parse()?;
    Ok(Color::from_rgb8(rgb.red, rgb.green, rgb.blue))
}

pub fn to_hex(color: Color) -> String {
    let [r, g, b, _] = color.into_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// `count` colors spread evenly around the hue circle, starting at `offset` degrees.
pub fn spread_hues(count: usize, offset: f32) -> Vec<Color> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;

    (0..count)
        .map(|i| {
            let hsv: Hsv = Hsv::new(offset + step * i as f32, 0.85, 0.85);
            let rgb: Srgb = Srgb::from_color(hsv);
            Color::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

pub mod hex_color {
    use iced_core::Color;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::to_hex(*color).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        super::parse_hex(&hex)
            .map_err(|err| serde::de::Error::custom(format!("invalid color {hex:?}: {err}")))
    }
}
