use iced_core::{Point, Size, Vector};
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Pixels per world unit, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub const fn uniform(pixels_per_unit: f32) -> Self {
        Self {
            x: pixels_per_unit,
            y: pixels_per_unit,
        }
    }

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_valid(self) -> bool {
        is_valid_scale(self.x) && is_valid_scale(self.y)
    }
}

pub(crate) fn is_valid_scale(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Screen position of world (0, 0): `viewport * center_ratio + pan`.
pub fn origin(viewport: Size, center_ratio: [f32; 2], pan: Vector) -> Point {
    Point::new(
        viewport.width * center_ratio[0] + pan.x,
        viewport.height * center_ratio[1] + pan.y,
    )
}

/// Maps between world coordinates (y up) and screen pixels (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    origin: Point,
    scale: Scale,
}

impl CoordinateMapper {
    pub fn new(origin: Point, scale: Scale) -> Result<Self, DomainError> {
        if !scale.is_valid() {
            return Err(DomainError::InvalidScale(scale.x, scale.y));
        }
        Ok(Self { origin, scale })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    #[inline]
    pub fn world_to_screen(&self, wx: f32, wy: f32) -> Point {
        Point::new(
            self.origin.x + wx * self.scale.x,
            self.origin.y - wy * self.scale.y,
        )
    }

    #[inline]
    pub fn screen_to_world(&self, sx: f32, sy: f32) -> Point {
        Point::new(
            (sx - self.origin.x) / self.scale.x,
            (self.origin.y - sy) / self.scale.y,
        )
    }

    #[inline]
    pub fn screen_x_to_world(&self, sx: f32) -> f32 {
        (sx - self.origin.x) / self.scale.x
    }

    #[inline]
    pub fn world_y_to_screen(&self, wy: f32) -> f32 {
        self.origin.y - wy * self.scale.y
    }
}
