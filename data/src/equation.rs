use serde::{Deserialize, Serialize};

/// A pure scalar function that can be plotted.
///
/// Any `Fn(f32) -> f32` is an equation. Out-of-domain inputs may return
/// NaN or an infinity; callers treat those as gaps, not errors.
pub trait Equation {
    fn evaluate(&self, x: f32) -> f32;
}

impl<F> Equation for F
where
    F: Fn(f32) -> f32,
{
    fn evaluate(&self, x: f32) -> f32 {
        self(x)
    }
}

/// Closed-form functions that a configuration file can refer to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinEquation {
    Identity,
    Square,
    Cube,
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Abs,
    Reciprocal,
}

impl BuiltinEquation {
    pub const ALL: [Self; 11] = [
        Self::Identity,
        Self::Square,
        Self::Cube,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Exp,
        Self::Ln,
        Self::Sqrt,
        Self::Abs,
        Self::Reciprocal,
    ];
}

impl Equation for BuiltinEquation {
    fn evaluate(&self, x: f32) -> f32 {
        match self {
            Self::Identity => x,
            Self::Square => x * x,
            Self::Cube => x * x * x,
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
            Self::Sqrt => x.sqrt(),
            Self::Abs => x.abs(),
            Self::Reciprocal => 1.0 / x,
        }
    }
}

impl std::fmt::Display for BuiltinEquation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Identity => "x",
            Self::Square => "x²",
            Self::Cube => "x³",
            Self::Sin => "sin x",
            Self::Cos => "cos x",
            Self::Tan => "tan x",
            Self::Exp => "eˣ",
            Self::Ln => "ln x",
            Self::Sqrt => "√x",
            Self::Abs => "|x|",
            Self::Reciprocal => "1/x",
        };
        write!(f, "{label}")
    }
}
