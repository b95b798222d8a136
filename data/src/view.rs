use std::sync::LazyLock;

use iced_core::{Point, Size, Vector};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::mapper::{self, Scale, is_valid_scale};

/// Multiplier applied by one zoom step.
pub const ZOOM_FACTOR: f32 = 2.0;

pub const DEFAULT_UNIT_TO_PIXELS: f32 = 100.0;

/// Draft text may only ever contain digits and dots.
static SCALE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\d.]*$").expect("scale text pattern compiles")
});

/// Whether the two axes share one scale or zoom independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    #[default]
    Shared,
    Independent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    In,
    Out,
}

/// Axis targeted by a zoom or scale edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    Both,
    X,
    Y,
}

impl ScaleAxis {
    fn touches_x(self) -> bool {
        matches!(self, ScaleAxis::Both | ScaleAxis::X)
    }

    fn touches_y(self) -> bool {
        matches!(self, ScaleAxis::Both | ScaleAxis::Y)
    }
}

/// Pan and zoom of one graph, plus the text currently typed into the scale fields.
///
/// The committed [`Scale`] is always finite and positive; draft text is kept
/// separately and only committed when it parses to a usable value.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pan: Vector,
    scale: Scale,
    initial_scale: Scale,
    mode: ScaleMode,
    draft_x: String,
    draft_y: String,
}

impl ViewState {
    /// Returns `None` when `initial` is not a usable scale.
    pub fn new(initial: Scale, mode: ScaleMode) -> Option<Self> {
        if !initial.is_valid() {
            return None;
        }
        let initial = match mode {
            ScaleMode::Shared => Scale::uniform(initial.x),
            ScaleMode::Independent => initial,
        };

        Some(Self {
            pan: Vector::new(0.0, 0.0),
            scale: initial,
            initial_scale: initial,
            mode,
            draft_x: initial.x.to_string(),
            draft_y: initial.y.to_string(),
        })
    }

    pub fn pan(&self) -> Vector {
        self.pan
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    /// Text shown in the scale field of `axis`. `Both` reads the x field.
    pub fn draft_text(&self, axis: ScaleAxis) -> &str {
        match axis {
            ScaleAxis::Both | ScaleAxis::X => &self.draft_x,
            ScaleAxis::Y => &self.draft_y,
        }
    }

    pub fn origin(&self, viewport: Size, center_ratio: [f32; 2]) -> Point {
        mapper::origin(viewport, center_ratio, self.pan)
    }

    pub fn drag(&mut self, delta: Vector) {
        self.pan = self.pan + delta;
    }

    /// Multiplies or divides the targeted scale by [`ZOOM_FACTOR`].
    ///
    /// Returns `false` and leaves the state untouched if the result would
    /// not be a usable scale.
    pub fn zoom(&mut self, step: ZoomStep, axis: ScaleAxis) -> bool {
        let axis = self.effective_axis(axis);
        let apply = |value: f32| match step {
            ZoomStep::In => value * ZOOM_FACTOR,
            ZoomStep::Out => value / ZOOM_FACTOR,
        };

        let mut next = self.scale;
        if axis.touches_x() {
            next.x = apply(next.x);
        }
        if axis.touches_y() {
            next.y = apply(next.y);
        }

        if !next.is_valid() {
            log::debug!("zoom {step:?} on {axis:?} rejected: {next:?}");
            return false;
        }

        self.scale = next;
        self.refresh_drafts(axis);
        true
    }

    /// Handles an edit of the scale field of `axis`.
    ///
    /// Edits containing anything but digits and dots are dropped. Otherwise
    /// the draft is updated, and the scale is committed if the draft parses
    /// to a finite nonzero value. Returns whether the scale changed.
    pub fn edit_scale_text(&mut self, axis: ScaleAxis, text: &str) -> bool {
        if !SCALE_TEXT.is_match(text) {
            log::debug!("scale text {text:?} rejected");
            return false;
        }
        let axis = self.effective_axis(axis);

        if axis.touches_x() {
            self.draft_x = text.to_string();
        }
        if axis.touches_y() {
            self.draft_y = text.to_string();
        }

        let Some(value) = parse_scale(text) else {
            return false;
        };

        let mut next = self.scale;
        if axis.touches_x() {
            next.x = value;
        }
        if axis.touches_y() {
            next.y = value;
        }

        let changed = next != self.scale;
        self.scale = next;
        changed
    }

    /// Back to zero pan and the initial scale.
    pub fn reset(&mut self) {
        self.pan = Vector::new(0.0, 0.0);
        self.scale = self.initial_scale;
        self.refresh_drafts(ScaleAxis::Both);
    }

    fn effective_axis(&self, axis: ScaleAxis) -> ScaleAxis {
        match self.mode {
            ScaleMode::Shared => ScaleAxis::Both,
            ScaleMode::Independent => axis,
        }
    }

    fn refresh_drafts(&mut self, axis: ScaleAxis) {
        if axis.touches_x() {
            self.draft_x = self.scale.x.to_string();
        }
        if axis.touches_y() {
            self.draft_y = self.scale.y.to_string();
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        let scale = Scale::uniform(DEFAULT_UNIT_TO_PIXELS);
        Self {
            pan: Vector::new(0.0, 0.0),
            scale,
            initial_scale: scale,
            mode: ScaleMode::Shared,
            draft_x: scale.x.to_string(),
            draft_y: scale.y.to_string(),
        }
    }
}

/// A finite, nonzero, non-negative decimal, or `None`.
pub fn parse_scale(text: &str) -> Option<f32> {
    text.parse::<f32>().ok().filter(|v| is_valid_scale(*v))
}
