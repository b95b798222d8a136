use iced_core::Point;

use crate::DomainError;
use crate::equation::Equation;
use crate::mapper::CoordinateMapper;

/// Upper bound on samples per curve; a finer step is rejected.
pub const MAX_SAMPLES: usize = 1 << 20;

/// Samples `equation` across `[0, width]` in screen space.
///
/// Screen x advances by `pixel_step`; the right edge is always the last
/// sample, even when it falls short of a full step. Non-finite results are
/// kept as-is so the caller decides how to render gaps.
pub fn sample_curve<E>(
    equation: &E,
    mapper: &CoordinateMapper,
    width: f32,
    pixel_step: f32,
) -> Result<Vec<Point>, DomainError>
where
    E: Equation + ?Sized,
{
    if !pixel_step.is_finite() || pixel_step <= 0.0 {
        return Err(DomainError::InvalidStep(pixel_step));
    }
    let width = if width.is_finite() { width.max(0.0) } else { 0.0 };

    let steps = (width / pixel_step).ceil();
    if !(steps < MAX_SAMPLES as f32) {
        return Err(DomainError::InvalidStep(pixel_step));
    }
    let steps = steps as usize;
    let mut points = Vec::with_capacity(steps + 1);

    let mut sample = |sx: f32| {
        let wx = mapper.screen_x_to_world(sx);
        let wy = equation.evaluate(wx);
        points.push(Point::new(sx, mapper.world_y_to_screen(wy)));
    };

    for k in 0..steps {
        let sx = k as f32 * pixel_step;
        if sx >= width {
            break;
        }
        sample(sx);
    }
    sample(width);

    Ok(points)
}

pub fn is_finite_point(point: &Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

/// Maximal runs of finite points; a non-finite point ends the current run.
pub fn finite_runs(points: &[Point]) -> impl Iterator<Item = &[Point]> {
    points
        .split(|p| !is_finite_point(p))
        .filter(|run| !run.is_empty())
}
