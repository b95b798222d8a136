pub mod config;
pub mod equation;
pub mod grid;
pub mod log;
pub mod mapper;
pub mod plot;
pub mod sampler;
pub mod style;
pub mod view;

pub use config::GraphConfig;
pub use equation::{BuiltinEquation, Equation};
pub use mapper::{CoordinateMapper, Scale};
pub use plot::{Plot, PlotEntry, PlotFrame};
pub use style::{CurveStyle, GridLineStyle, GridTier, PointMode, StrokeCap};
pub use view::{ScaleAxis, ScaleMode, ViewState, ZoomStep};

use std::path::PathBuf;

const APP_DIR: &str = "equation-graph";

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("scale must be finite and positive, got ({0}, {1})")]
    InvalidScale(f32, f32),
    #[error("step must be finite and positive, got {0}")]
    InvalidStep(f32),
}

pub fn data_path(file: &str) -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(file)
}
