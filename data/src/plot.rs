use std::fmt;
use std::sync::Arc;

use iced_core::{Point, Size, Vector};

use crate::DomainError;
use crate::equation::Equation;
use crate::grid::{GridLayout, GridSpacing};
use crate::mapper::{self, CoordinateMapper, Scale};
use crate::sampler::sample_curve;
use crate::style::CurveStyle;

/// One equation and the style it is drawn with.
#[derive(Clone)]
pub struct PlotEntry {
    pub name: String,
    pub equation: Arc<dyn Equation + Send + Sync>,
    pub style: CurveStyle,
}

impl PlotEntry {
    pub fn new<E>(name: impl Into<String>, equation: E, style: CurveStyle) -> Self
    where
        E: Equation + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            equation: Arc::new(equation),
            style,
        }
    }
}

impl fmt::Debug for PlotEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotEntry")
            .field("name", &self.name)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Entries in draw order; later entries paint over earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Plot {
    entries: Vec<PlotEntry>,
}

impl Plot {
    pub fn new(entries: Vec<PlotEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: PlotEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[PlotEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    pub points: Vec<Point>,
    pub style: CurveStyle,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFrame {
    pub mapper: CoordinateMapper,
    pub grid: GridLayout,
    pub curves: Vec<SampledCurve>,
}

impl PlotFrame {
    /// Derives the origin from `pan` and the viewport, then lays out the grid
    /// and samples every entry.
    pub fn compute<M>(
        plot: &Plot,
        pan: Vector,
        scale: Scale,
        viewport: Size,
        center_ratio: [f32; 2],
        spacing: GridSpacing,
        measure: M,
    ) -> Result<Self, DomainError>
    where
        M: Fn(&str) -> Size,
    {
        let origin = mapper::origin(viewport, center_ratio, pan);
        let mapper = CoordinateMapper::new(origin, scale)?;

        let grid = GridLayout::compute(&mapper, viewport, spacing, measure)?;

        let curves = plot
            .entries()
            .iter()
            .map(|entry| -> Result<SampledCurve, DomainError> {
                let points = sample_curve(
                    entry.equation.as_ref(),
                    &mapper,
                    viewport.width,
                    entry.style.pixel_step,
                )?;
                Ok(SampledCurve {
                    points,
                    style: entry.style,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            mapper,
            grid,
            curves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced_core::Color;

    fn measure(text: &str) -> Size {
        Size::new(text.len() as f32 * 7.0, 12.0)
    }

    fn plot() -> Plot {
        Plot::new(vec![
            PlotEntry::new("x", |x: f32| x, CurveStyle::new(Color::BLACK)),
            PlotEntry::new(
                "x²",
                |x: f32| x * x,
                CurveStyle::new(Color::WHITE).with_pixel_step(10.0),
            ),
        ])
    }

    #[test]
    fn curves_follow_entry_order_and_step() {
        let frame = PlotFrame::compute(
            &plot(),
            Vector::new(0.0, 0.0),
            Scale::uniform(100.0),
            Size::new(200.0, 100.0),
            [0.5, 0.5],
            GridSpacing::default(),
            measure,
        )
        .unwrap();

        assert_eq!(frame.mapper.origin(), Point::new(100.0, 50.0));
        assert_eq!(frame.curves.len(), 2);
        assert_eq!(frame.curves[0].style.color, Color::BLACK);
        assert_eq!(frame.curves[0].points.len(), 201);
        assert_eq!(frame.curves[1].points.len(), 21);

        // x² at world x = 1 (screen x = 200) is one unit above the origin
        let last = frame.curves[1].points.last().unwrap();
        assert_eq!(*last, Point::new(200.0, -50.0));
    }

    #[test]
    fn pan_moves_the_origin() {
        let frame = PlotFrame::compute(
            &Plot::default(),
            Vector::new(30.0, -10.0),
            Scale::uniform(100.0),
            Size::new(800.0, 600.0),
            [0.5, 0.5],
            GridSpacing::default(),
            measure,
        )
        .unwrap();

        assert_eq!(frame.mapper.origin(), Point::new(430.0, 290.0));
        assert_eq!(frame.grid.vertical.axis, Some(430.0));
        assert!(frame.grid.vertical.major.contains(&30.0));
        assert!(frame.curves.is_empty());
    }

    #[test]
    fn invalid_curve_step_fails_the_frame() {
        let mut plot = plot();
        plot.push(PlotEntry::new(
            "bad",
            |x: f32| x,
            CurveStyle::new(Color::BLACK).with_pixel_step(0.0),
        ));

        let result = PlotFrame::compute(
            &plot,
            Vector::new(0.0, 0.0),
            Scale::uniform(100.0),
            Size::new(200.0, 100.0),
            [0.5, 0.5],
            GridSpacing::default(),
            measure,
        );

        assert_eq!(result, Err(DomainError::InvalidStep(0.0)));
    }
}
