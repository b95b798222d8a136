use std::path::Path;
use std::{fs, io};

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::equation::BuiltinEquation;
use crate::grid::GridSpacing;
use crate::mapper::Scale;
use crate::plot::{Plot, PlotEntry};
use crate::style::{
    self, CurveStyle, GridLineStyle, GridTier, PointMode, StrokeCap, default_grid_styles,
};
use crate::view::{ScaleMode, ViewState};

/// Hue of the first generated curve color, in degrees.
const GENERATED_HUE_OFFSET: f32 = 210.0;

/// Smallest accepted distance between curve samples.
pub const MIN_PIXEL_STEP: f32 = 0.01;
/// Smallest accepted distance between grid lines of one tier.
pub const MIN_GRID_SPACING_PX: f32 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid color {value:?}: {source}")]
    InvalidColor {
        value: String,
        #[source]
        source: palette::rgb::FromHexError,
    },
    #[error("{field} must be finite and positive, got {value}")]
    InvalidValue { field: &'static str, value: f32 },
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        value: f32,
        min: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Initial pixels per unit (x axis, and y axis in shared mode).
    pub unit_to_pixels: f32,
    /// Initial y scale in independent mode; falls back to `unit_to_pixels`.
    pub unit_to_pixels_y: Option<f32>,
    pub scale_mode: ScaleMode,
    /// Where world (0, 0) sits before panning, as a fraction of the viewport.
    pub center_ratio: [f32; 2],
    pub zoom_animation: ZoomAnimation,
    pub grid: GridConfig,
    pub equations: Vec<CurveSpec>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            unit_to_pixels: 100.0,
            unit_to_pixels_y: None,
            scale_mode: ScaleMode::default(),
            center_ratio: [0.5, 0.5],
            zoom_animation: ZoomAnimation::default(),
            grid: GridConfig::default(),
            equations: vec![
                CurveSpec::new(BuiltinEquation::Identity, "#0000ff"),
                CurveSpec::new(BuiltinEquation::Square, "#ff0000"),
                CurveSpec::new(BuiltinEquation::Sin, "#00ffff"),
                CurveSpec::new(BuiltinEquation::Cos, "#00ff00"),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomAnimation {
    pub enabled: bool,
    /// Spring stiffness in radians per second; higher settles faster.
    pub angular_frequency: f32,
}

impl Default for ZoomAnimation {
    fn default() -> Self {
        Self {
            enabled: true,
            angular_frequency: 18.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub spacing: GridSpacing,
    pub styles: EnumMap<GridTier, GridLineStyle>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: GridSpacing::default(),
            styles: default_grid_styles(),
        }
    }
}

/// A catalog equation and how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSpec {
    pub function: BuiltinEquation,
    #[serde(default)]
    pub name: Option<String>,
    /// `#rrggbb`; generated from the entry index when absent.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default)]
    pub point_mode: PointMode,
    #[serde(default)]
    pub cap: StrokeCap,
    #[serde(default = "default_pixel_step")]
    pub pixel_step: f32,
}

fn default_stroke_width() -> f32 {
    1.0
}

fn default_pixel_step() -> f32 {
    1.0
}

impl CurveSpec {
    pub fn new(function: BuiltinEquation, color: &str) -> Self {
        Self {
            function,
            name: None,
            color: Some(color.to_string()),
            stroke_width: default_stroke_width(),
            point_mode: PointMode::default(),
            cap: StrokeCap::default(),
            pixel_step: default_pixel_step(),
        }
    }
}

impl GraphConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!(
            "Loaded graph config from {} ({} equations)",
            path.display(),
            config.equations.len()
        );
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.initial_scale();
        positive("unit_to_pixels", scale.x)?;
        positive("unit_to_pixels_y", scale.y)?;
        at_least(
            "grid.spacing.fine_px",
            self.grid.spacing.fine_px,
            MIN_GRID_SPACING_PX,
        )?;
        at_least(
            "grid.spacing.major_px",
            self.grid.spacing.major_px,
            MIN_GRID_SPACING_PX,
        )?;
        if self.zoom_animation.enabled {
            positive(
                "zoom_animation.angular_frequency",
                self.zoom_animation.angular_frequency,
            )?;
        }

        for spec in &self.equations {
            at_least("equations.pixel_step", spec.pixel_step, MIN_PIXEL_STEP)?;
            positive("equations.stroke_width", spec.stroke_width)?;
        }

        Ok(())
    }

    pub fn initial_scale(&self) -> Scale {
        match self.scale_mode {
            ScaleMode::Shared => Scale::uniform(self.unit_to_pixels),
            ScaleMode::Independent => Scale::new(
                self.unit_to_pixels,
                self.unit_to_pixels_y.unwrap_or(self.unit_to_pixels),
            ),
        }
    }

    pub fn view_state(&self) -> Result<ViewState, ConfigError> {
        let scale = self.initial_scale();
        ViewState::new(scale, self.scale_mode).ok_or(ConfigError::InvalidValue {
            field: "unit_to_pixels",
            value: scale.x.min(scale.y),
        })
    }

    pub fn plot(&self) -> Result<Plot, ConfigError> {
        let generated = style::spread_hues(self.equations.len(), GENERATED_HUE_OFFSET);

        let entries = self
            .equations
            .iter()
            .zip(generated)
            .map(|(spec, fallback)| -> Result<PlotEntry, ConfigError> {
                let color = match &spec.color {
                    Some(hex) => {
                        style::parse_hex(hex).map_err(|source| ConfigError::InvalidColor {
                            value: hex.clone(),
                            source,
                        })?
                    }
                    None => fallback,
                };

                let style = CurveStyle::new(color)
                    .with_stroke_width(spec.stroke_width)
                    .with_point_mode(spec.point_mode)
                    .with_cap(spec.cap)
                    .with_pixel_step(spec.pixel_step);

                let name = spec
                    .name
                    .clone()
                    .unwrap_or_else(|| spec.function.to_string());

                Ok(PlotEntry::new(name, spec.function, style))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Plot::new(entries))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

fn at_least(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    positive(field, value)?;
    if value < min {
        return Err(ConfigError::BelowMinimum { field, value, min });
    }
    Ok(())
}
