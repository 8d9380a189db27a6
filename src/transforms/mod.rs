//! The transform library.
//!
//! Every transform maps index-aligned `(x, y, θ)` sequences to a new `(x, y)`
//! pair of the same length. Parameters are bound when the value is built and
//! validated there, so applying a transform can only fail on mismatched
//! input lengths.

pub mod path_trace;
pub mod spiral;
pub mod spirograph;
pub mod standard;

use crate::errors::{PatternError, Result, Warning};

pub use path_trace::PathTrace;
pub use spiral::{
    Spiral, SpiralOscillator, VariableNgonSpiral, VariableSpiral, VariableTriangleSpiral,
};
pub use spirograph::{
    CyclogonMode, EllipticalSpirograph, PolygonSpirograph, RectangleSpirograph, Spirograph,
    TrochoidMode,
};
pub use standard::{
    CircularMotion, LinearTranslation, MysteryLines, NonLinearPaperRotation, PaperRotation,
    Placement, RateFunction,
};

/// A pair of coordinate sequences
pub type Coords = (Vec<f64>, Vec<f64>);

/// A mapping plus its bound parameters.
#[derive(Debug, Clone)]
pub enum Transform {
    Spiral(Spiral),
    SpiralOscillator(SpiralOscillator),
    VariableSpiral(VariableSpiral),
    VariableTriangleSpiral(VariableTriangleSpiral),
    /// Law-of-cosines polygon construction; reports diagnostics, see
    /// [`VariableNgonSpiral::warnings`]
    VariableNgonSpiral(VariableNgonSpiral),
    Spirograph(Spirograph),
    EllipticalSpirograph(EllipticalSpirograph),
    PolygonSpirograph(PolygonSpirograph),
    RectangleSpirograph(RectangleSpirograph),
    CircularMotion(CircularMotion),
    LinearTranslation(LinearTranslation),
    PaperRotation(PaperRotation),
    NonLinearPaperRotation(NonLinearPaperRotation),
    MysteryLines(MysteryLines),
    PathTrace(PathTrace),
    Placement(Placement),
}

impl Transform {
    /// Short stable name of the mapping kind
    pub fn kind(&self) -> &'static str {
        match self {
            Transform::Spiral(_) => "spiral",
            Transform::SpiralOscillator(_) => "spiral_oscillator",
            Transform::VariableSpiral(_) => "variable_spiral",
            Transform::VariableTriangleSpiral(_) => "variable_triangle_spiral",
            Transform::VariableNgonSpiral(_) => "variable_ngon_spiral",
            Transform::Spirograph(_) => "spirograph",
            Transform::EllipticalSpirograph(_) => "elliptical_spirograph",
            Transform::PolygonSpirograph(_) => "polygon_spirograph",
            Transform::RectangleSpirograph(_) => "rectangle_spirograph",
            Transform::CircularMotion(_) => "circular_motion",
            Transform::LinearTranslation(_) => "linear_translation",
            Transform::PaperRotation(_) => "paper_rotation",
            Transform::NonLinearPaperRotation(_) => "paper_rotation_non_linear",
            Transform::MysteryLines(_) => "mystery_lines",
            Transform::PathTrace(_) => "svg_path",
            Transform::Placement(_) => "placement",
        }
    }

    pub fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Result<Coords> {
        if x.len() != theta.len() || y.len() != theta.len() {
            return Err(PatternError::invalid(
                "coordinates",
                format!(
                    "x ({}), y ({}) and theta ({}) must have equal length",
                    x.len(),
                    y.len(),
                    theta.len()
                ),
            ));
        }

        let out = match self {
            Transform::Spiral(t) => t.apply(x, y, theta),
            Transform::SpiralOscillator(t) => t.apply(x, y, theta),
            Transform::VariableSpiral(t) => t.apply(x, y, theta),
            Transform::VariableTriangleSpiral(t) => t.apply(x, y, theta),
            Transform::VariableNgonSpiral(t) => t.apply(x, y, theta),
            Transform::Spirograph(t) => t.apply(x, y, theta),
            Transform::EllipticalSpirograph(t) => t.apply(x, y, theta),
            Transform::PolygonSpirograph(t) => t.apply(x, y, theta),
            Transform::RectangleSpirograph(t) => t.apply(x, y, theta),
            Transform::CircularMotion(t) => t.apply(x, y, theta),
            Transform::LinearTranslation(t) => t.apply(x, y, theta),
            Transform::PaperRotation(t) => t.apply(x, y, theta),
            Transform::NonLinearPaperRotation(t) => t.apply(x, y, theta),
            Transform::MysteryLines(t) => t.apply(x, y, theta),
            Transform::PathTrace(t) => t.apply(x, y, theta),
            Transform::Placement(t) => t.apply(x, y, theta),
        };
        debug_assert_eq!(out.0.len(), theta.len());
        Ok(out)
    }

    /// Non-fatal problems known once the parameters are bound
    pub fn diagnostics(&self) -> Vec<Warning> {
        match self {
            Transform::VariableNgonSpiral(t) => t.warnings(),
            _ => Vec::new(),
        }
    }
}

macro_rules! impl_from_params {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Transform {
                fn from(params: $variant) -> Self {
                    Transform::$variant(params)
                }
            }
        )*
    };
}

impl_from_params!(
    Spiral,
    SpiralOscillator,
    VariableSpiral,
    VariableTriangleSpiral,
    VariableNgonSpiral,
    Spirograph,
    EllipticalSpirograph,
    PolygonSpirograph,
    RectangleSpirograph,
    CircularMotion,
    LinearTranslation,
    PaperRotation,
    NonLinearPaperRotation,
    MysteryLines,
    PathTrace,
    Placement,
);

/// Last element of θ, the end of the sweep. Empty input has nothing to
/// normalise, so the value is never read.
pub(crate) fn theta_max(theta: &[f64]) -> f64 {
    theta.last().copied().unwrap_or(0.0)
}

/// `r(θ) = start·θ + (end - start)/(2·θmax)·θ²`, the quadratic sweep of the
/// spiral rate from `start` to `end`.
pub(crate) fn variable_radius(theta: &[f64], start_rate: f64, end_rate: f64) -> Vec<f64> {
    let theta_max = theta_max(theta);
    let delta_rate = end_rate - start_rate;
    theta
        .iter()
        .map(|&t| start_rate * t + (delta_rate / (2.0 * theta_max)) * t * t)
        .collect()
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PatternError::invalid(name, format!("must be finite, got {value}")))
    }
}

pub(crate) fn require_nonzero(name: &'static str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value == 0.0 {
        Err(PatternError::invalid(name, "must not be zero"))
    } else {
        Ok(())
    }
}
