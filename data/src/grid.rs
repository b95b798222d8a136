//! Grid line positions and axis labels for one frame.
//!
//! Grid lines are spaced at a fixed number of screen pixels per tier, so
//! their density stays constant at every zoom level. Labels show the world
//! value that falls under each major line.

use iced_core::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::DomainError;
use crate::mapper::CoordinateMapper;

/// Labels with a magnitude below this keep their fractional digits.
pub const LABEL_ROUNDING_THRESHOLD: f32 = 1000.0;
pub const LABEL_DECIMALS: usize = 5;

/// Distance between a label and the line it annotates.
pub const LABEL_GAP_PX: f32 = 4.0;

/// Upper bound on lines per tier and dimension; a denser tier is rejected.
pub const MAX_GRID_LINES: usize = 1 << 16;

/// A tier line closer than this to the origin is treated as the axis line.
const ORIGIN_EPSILON_PX: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpacing {
    pub fine_px: f32,
    pub major_px: f32,
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self {
            fine_px: 25.0,
            major_px: 100.0,
        }
    }
}

/// Positions of every line of one tier that is visible along one dimension.
///
/// Yields `offset + k * step` for `k = 0, 1, ..` while the position is below
/// `length`, with `offset = origin mod step` wrapped into `[0, step)`.
pub fn grid_lines(
    origin: f32,
    length: f32,
    step: f32,
    exclude_origin: bool,
) -> Result<Vec<f32>, DomainError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(DomainError::InvalidStep(step));
    }
    if !origin.is_finite() || !(length > 0.0) {
        return Ok(Vec::new());
    }

    let mut offset = origin.rem_euclid(step);
    if offset >= step {
        offset -= step;
    }

    let count = ((length - offset) / step).ceil().max(0.0);
    if !(count <= MAX_GRID_LINES as f32) {
        return Err(DomainError::InvalidStep(step));
    }
    let count = count as usize;
    let mut lines = Vec::with_capacity(count);

    for k in 0..count {
        let position = offset + k as f32 * step;
        if position >= length {
            break;
        }
        if exclude_origin && (position - origin).abs() < ORIGIN_EPSILON_PX {
            continue;
        }
        lines.push(position);
    }

    Ok(lines)
}

/// The axis (world zero) line, if it lies inside `[0, length]`.
pub fn axis_line(origin: f32, length: f32) -> Option<f32> {
    (0.0..=length).contains(&origin).then_some(origin)
}

/// Formats a label value: up to [`LABEL_DECIMALS`] decimals below
/// [`LABEL_ROUNDING_THRESHOLD`], a rounded integer above it.
pub fn format_label(value: f32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.abs() >= LABEL_ROUNDING_THRESHOLD {
        return format!("{:.0}", value.round());
    }

    let fixed = format!("{:.*}", LABEL_DECIMALS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Start coordinate of a label of size `extent` next to `anchor`.
///
/// The label goes after the anchor unless it would overflow `length`, in which
/// case it flips to the other side. It never starts before 0.
pub fn place_label(anchor: f32, extent: f32, gap: f32, length: f32) -> f32 {
    let after = anchor + gap;
    if after + extent > length {
        (anchor - gap - extent).max(0.0)
    } else {
        after
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Vertical lines, placed along the x axis.
    X,
    /// Horizontal lines, placed along the y axis.
    Y,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisLines {
    pub fine: Vec<f32>,
    pub major: Vec<f32>,
    pub axis: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLabel {
    pub dimension: Dimension,
    pub text: String,
    /// Top-left corner of the label box.
    pub position: Point,
    pub size: Size,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    /// Positions along screen x of vertical lines.
    pub vertical: AxisLines,
    /// Positions along screen y of horizontal lines.
    pub horizontal: AxisLines,
    pub labels: Vec<GridLabel>,
}

impl GridLayout {
    /// Lays out both dimensions. `measure` reports the on-screen size of a label.
    pub fn compute<M>(
        mapper: &CoordinateMapper,
        viewport: Size,
        spacing: GridSpacing,
        measure: M,
    ) -> Result<Self, DomainError>
    where
        M: Fn(&str) -> Size,
    {
        let origin = mapper.origin();
        let scale = mapper.scale();

        let vertical = AxisLines {
            fine: grid_lines(origin.x, viewport.width, spacing.fine_px, true)?,
            major: grid_lines(origin.x, viewport.width, spacing.major_px, true)?,
            axis: axis_line(origin.x, viewport.width),
        };
        let horizontal = AxisLines {
            fine: grid_lines(origin.y, viewport.height, spacing.fine_px, true)?,
            major: grid_lines(origin.y, viewport.height, spacing.major_px, true)?,
            axis: axis_line(origin.y, viewport.height),
        };

        // off-screen axes pin their labels to the nearest edge
        let x_label_anchor = origin.y.clamp(0.0, viewport.height);
        let y_label_anchor = origin.x.clamp(0.0, viewport.width);

        let mut labels = Vec::with_capacity(vertical.major.len() + horizontal.major.len());

        for &x in &vertical.major {
            let text = format_label((x - origin.x) / scale.x);
            let size = measure(&text);
            labels.push(GridLabel {
                dimension: Dimension::X,
                position: Point::new(
                    place_label(x, size.width, LABEL_GAP_PX, viewport.width),
                    place_label(x_label_anchor, size.height, LABEL_GAP_PX, viewport.height),
                ),
                text,
                size,
            });
        }

        for &y in &horizontal.major {
            let text = format_label((origin.y - y) / scale.y);
            let size = measure(&text);
            labels.push(GridLabel {
                dimension: Dimension::Y,
                position: Point::new(
                    place_label(y_label_anchor, size.width, LABEL_GAP_PX, viewport.width),
                    place_label(y, size.height, LABEL_GAP_PX, viewport.height),
                ),
                text,
                size,
            });
        }

        Ok(Self {
            vertical,
            horizontal,
            labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Scale;

    fn measure(text: &str) -> Size {
        Size::new(text.chars().count() as f32 * 7.0, 12.0)
    }

    #[test]
    fn lines_start_at_wrapped_origin_offset() {
        let lines = grid_lines(430.0, 300.0, 100.0, false).unwrap();
        assert_eq!(lines, vec![30.0, 130.0, 230.0]);
    }

    #[test]
    fn negative_origin_wraps_into_step() {
        let lines = grid_lines(-170.0, 300.0, 100.0, false).unwrap();
        assert_eq!(lines, vec![30.0, 130.0, 230.0]);
    }

    #[test]
    fn origin_line_is_left_to_the_axis() {
        let lines = grid_lines(200.0, 450.0, 100.0, true).unwrap();
        assert_eq!(lines, vec![0.0, 100.0, 300.0, 400.0]);

        let with_origin = grid_lines(200.0, 450.0, 100.0, false).unwrap();
        assert_eq!(with_origin, vec![0.0, 100.0, 200.0, 300.0, 400.0]);
    }

    #[test]
    fn lines_stay_inside_viewport_for_extreme_pan() {
        for origin in [-1.0e7, -12_345.5, 0.0, 99_999.0, 1.0e7] {
            let lines = grid_lines(origin, 640.0, 25.0, true).unwrap();
            assert!(lines.iter().all(|p| (0.0..640.0).contains(p)), "{origin}");
            assert!(lines.windows(2).all(|w| w[0] < w[1]));
            assert!(lines.len() <= 26);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = grid_lines(123.4, 987.0, 25.0, true).unwrap();
        let b = grid_lines(123.4, 987.0, 25.0, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_step_is_a_domain_error() {
        assert_eq!(
            grid_lines(0.0, 100.0, 0.0, true),
            Err(DomainError::InvalidStep(0.0))
        );
        assert!(grid_lines(0.0, 100.0, -5.0, true).is_err());
        assert!(grid_lines(0.0, 100.0, f32::NAN, true).is_err());
    }

    #[test]
    fn empty_viewport_has_no_lines() {
        assert!(grid_lines(10.0, 0.0, 25.0, true).unwrap().is_empty());
        assert!(grid_lines(f32::NAN, 100.0, 25.0, true).unwrap().is_empty());
    }

    #[test]
    fn axis_line_only_when_visible() {
        assert_eq!(axis_line(0.0, 100.0), Some(0.0));
        assert_eq!(axis_line(100.0, 100.0), Some(100.0));
        assert_eq!(axis_line(-0.5, 100.0), None);
        assert_eq!(axis_line(100.5, 100.0), None);
    }

    #[test]
    fn labels_are_trimmed_or_rounded() {
        assert_eq!(format_label(0.25), "0.25");
        assert_eq!(format_label(2.0), "2");
        assert_eq!(format_label(-3.5), "-3.5");
        assert_eq!(format_label(1.0 / 3.0), "0.33333");
        assert_eq!(format_label(-0.000_001), "0");
        assert_eq!(format_label(999.5), "999.5");
        assert_eq!(format_label(1234.6), "1235");
        assert_eq!(format_label(-1500.4), "-1500");
    }

    #[test]
    fn label_flips_before_overflowing() {
        assert_eq!(place_label(10.0, 20.0, 4.0, 100.0), 14.0);
        // 94 + 20 > 100
        assert_eq!(place_label(90.0, 20.0, 4.0, 100.0), 66.0);
        assert_eq!(place_label(76.0, 20.0, 4.0, 100.0), 80.0);
    }

    #[test]
    fn label_wider_than_either_side_starts_at_zero() {
        assert_eq!(place_label(30.0, 90.0, 4.0, 100.0), 0.0);
        assert_eq!(place_label(0.0, 200.0, 4.0, 100.0), 0.0);
    }

    #[test]
    fn tier_too_dense_for_the_viewport_is_rejected() {
        assert_eq!(
            grid_lines(400.0, 800.0, 1e-30, true),
            Err(DomainError::InvalidStep(1e-30))
        );
        assert_eq!(grid_lines(0.0, 800.0, 1.0, false).unwrap().len(), 800);
    }

    #[test]
    fn layout_labels_world_values_at_major_lines() {
        let mapper =
            CoordinateMapper::new(Point::new(400.0, 300.0), Scale::uniform(100.0)).unwrap();
        let viewport = Size::new(800.0, 600.0);

        let layout = GridLayout::compute(&mapper, viewport, GridSpacing::default(), measure)
            .unwrap();

        assert_eq!(layout.vertical.axis, Some(400.0));
        assert_eq!(layout.horizontal.axis, Some(300.0));
        assert_eq!(
            layout.vertical.major,
            vec![0.0, 100.0, 200.0, 300.0, 500.0, 600.0, 700.0]
        );
        assert_eq!(layout.vertical.fine.len(), 31);

        let x_labels: Vec<&str> = layout
            .labels
            .iter()
            .filter(|l| l.dimension == Dimension::X)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(x_labels, vec!["-4", "-3", "-2", "-1", "1", "2", "3"]);

        // screen y grows downward, so the top line is the largest value
        let y_labels: Vec<&str> = layout
            .labels
            .iter()
            .filter(|l| l.dimension == Dimension::Y)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(y_labels, vec!["3", "2", "1", "-1", "-2"]);
    }

    #[test]
    fn labels_pin_to_edge_when_axis_is_off_screen() {
        let mapper =
            CoordinateMapper::new(Point::new(-500.0, 900.0), Scale::uniform(50.0)).unwrap();
        let viewport = Size::new(400.0, 300.0);

        let layout = GridLayout::compute(&mapper, viewport, GridSpacing::default(), measure)
            .unwrap();

        assert_eq!(layout.vertical.axis, None);
        assert_eq!(layout.horizontal.axis, None);

        for label in &layout.labels {
            assert!(label.position.x >= 0.0);
            assert!(label.position.x + label.size.width <= viewport.width);
            assert!(label.position.y >= 0.0);
            assert!(label.position.y + label.size.height <= viewport.height);
        }
    }
}
