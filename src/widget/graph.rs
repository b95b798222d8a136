pub mod zoom;

use data::config::GridConfig;
use data::grid::{AxisLines, GridLabel, GridLayout};
use data::plot::SampledCurve;
use data::sampler::{finite_runs, is_finite_point};
use data::{GridLineStyle, GridTier, Plot, PlotFrame, PointMode, Scale, StrokeCap};
use iced::widget::canvas::{self, LineCap, LineDash, Path, Stroke};
use iced::{Alignment, Color, Point, Rectangle, Renderer, Size, Theme, Vector, mouse};

use crate::style;

#[derive(Debug, Clone, Copy)]
pub enum Message {
    Dragged(Vector),
}

#[derive(Debug, Default)]
pub enum Interaction {
    #[default]
    None,
    Panning {
        last_position: Point,
    },
}

/// Grid, axes, labels and curves of one plot, drawn at the displayed scale.
pub struct GraphCanvas<'a> {
    pub cache: &'a canvas::Cache,
    pub plot: &'a Plot,
    pub grid: &'a GridConfig,
    pub pan: Vector,
    pub scale: Scale,
    pub center_ratio: [f32; 2],
}

impl canvas::Program<Message> for GraphCanvas<'_> {
    type State = Interaction;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let p = cursor.position_over(bounds)?;
                *state = Interaction::Panning { last_position: p };
                None
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                *state = Interaction::None;
                None
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if let Interaction::Panning { last_position } = state {
                    let delta = *position - *last_position;
                    *last_position = *position;

                    Some(canvas::Action::publish(Message::Dragged(delta)).and_capture())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let label_color = theme.extended_palette().background.base.text;

        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let layout = match PlotFrame::compute(
                self.plot,
                self.pan,
                self.scale,
                bounds.size(),
                self.center_ratio,
                self.grid.spacing,
                style::label_size,
            ) {
                Ok(layout) => layout,
                Err(err) => {
                    log::error!("Skipping graph frame: {err}");
                    return;
                }
            };

            draw_grid(frame, &layout.grid, self.grid, bounds.size());

            for curve in &layout.curves {
                draw_curve(frame, curve);
            }

            for label in &layout.grid.labels {
                draw_label(frame, label, label_color);
            }
        });

        vec![geometry]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match state {
            Interaction::Panning { .. } => mouse::Interaction::Grabbing,
            Interaction::None if cursor.is_over(bounds) => mouse::Interaction::Grab,
            Interaction::None => mouse::Interaction::default(),
        }
    }
}

fn draw_grid(frame: &mut canvas::Frame, grid: &GridLayout, config: &GridConfig, size: Size) {
    let tiers = |lines: &AxisLines| -> [(GridTier, Vec<f32>); 3] {
        [
            (GridTier::Fine, lines.fine.clone()),
            (GridTier::Major, lines.major.clone()),
            (GridTier::Axis, lines.axis.into_iter().collect()),
        ]
    };

    // fine lines first so major lines and axes paint over them
    for ((tier, xs), (_, ys)) in tiers(&grid.vertical)
        .into_iter()
        .zip(tiers(&grid.horizontal))
    {
        if xs.is_empty() && ys.is_empty() {
            continue;
        }

        let path = Path::new(|builder| {
            for x in &xs {
                builder.move_to(Point::new(*x, 0.0));
                builder.line_to(Point::new(*x, size.height));
            }
            for y in &ys {
                builder.move_to(Point::new(0.0, *y));
                builder.line_to(Point::new(size.width, *y));
            }
        });

        frame.stroke(&path, grid_stroke(&config.styles[tier]));
    }
}

fn grid_stroke(style: &GridLineStyle) -> Stroke<'_> {
    let mut stroke = Stroke::default()
        .with_color(style.stroke_color())
        .with_width(style.width);

    if let Some(segments) = &style.dash {
        stroke.line_dash = LineDash {
            segments,
            offset: 0,
        };
    }
    stroke
}

/// What one curve puts on screen after dropping non-finite samples.
#[derive(Debug, PartialEq)]
enum CurveMarks<'a> {
    /// One subpath per finite run.
    Polyline(Vec<&'a [Point]>),
    Dots(Vec<Point>),
}

fn curve_marks(curve: &SampledCurve) -> CurveMarks<'_> {
    match curve.style.point_mode {
        PointMode::Polyline => CurveMarks::Polyline(finite_runs(&curve.points).collect()),
        PointMode::Points => CurveMarks::Dots(
            curve
                .points
                .iter()
                .copied()
                .filter(is_finite_point)
                .collect(),
        ),
    }
}

fn draw_curve(frame: &mut canvas::Frame, curve: &SampledCurve) {
    let style = curve.style;

    match curve_marks(curve) {
        CurveMarks::Polyline(runs) => {
            let path = Path::new(|builder| {
                for run in &runs {
                    let Some((first, rest)) = run.split_first() else {
                        continue;
                    };
                    builder.move_to(*first);
                    for point in rest {
                        builder.line_to(*point);
                    }
                }
            });

            let mut stroke = Stroke::default()
                .with_color(style.color)
                .with_width(style.stroke_width);
            stroke.line_cap = line_cap(style.cap);

            frame.stroke(&path, stroke);
        }
        CurveMarks::Dots(points) => {
            let diameter = style.stroke_width.max(1.0);

            let path = Path::new(|builder| {
                for point in &points {
                    match style.cap {
                        StrokeCap::Round => builder.circle(*point, diameter / 2.0),
                        StrokeCap::Butt | StrokeCap::Square => builder.rectangle(
                            *point - Vector::new(diameter / 2.0, diameter / 2.0),
                            Size::new(diameter, diameter),
                        ),
                    }
                }
            });

            frame.fill(&path, style.color);
        }
    }
}

fn line_cap(cap: StrokeCap) -> LineCap {
    match cap {
        StrokeCap::Butt => LineCap::Butt,
        StrokeCap::Round => LineCap::Round,
        StrokeCap::Square => LineCap::Square,
    }
}

fn draw_label(frame: &mut canvas::Frame, label: &GridLabel, color: Color) {
    frame.fill_text(canvas::Text {
        content: label.text.clone(),
        position: label.position,
        color,
        size: style::LABEL_TEXT_SIZE.into(),
        font: style::LABEL_FONT,
        align_x: Alignment::Start.into(),
        align_y: Alignment::Start.into(),
        ..Default::default()
    });
}
