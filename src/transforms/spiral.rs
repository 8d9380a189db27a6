//! Spirals driven directly by θ: fixed-rate, oscillating and variable-rate,
//! plus the polygon-bounded variants of the variable-rate spiral.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::{require_finite, variable_radius, Coords};
use crate::errors::{PatternError, Result, Warning};
use crate::math_utils::{distance, floor_mod, lerp};

/// Relative closing error above which an n-gon is reported as open
const CLOSURE_TOLERANCE: f64 = 1e-6;

/// `r = 1 + rate·θ`, traced on an ellipse with semi-axes `a`, `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spiral {
    pub rate: f64,
    pub a: f64,
    pub b: f64,
}

impl Spiral {
    pub fn new(rate: f64) -> Result<Self> {
        Self::elliptical(rate, 1.0, 1.0)
    }

    pub fn elliptical(rate: f64, a: f64, b: f64) -> Result<Self> {
        require_finite("spiral_rate", rate)?;
        require_finite("a", a)?;
        require_finite("b", b)?;
        Ok(Self { rate, a, b })
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        x.iter()
            .zip(y)
            .zip(theta)
            .map(|((&x, &y), &t)| {
                let r = 1.0 + self.rate * t;
                let (s, c) = t.sin_cos();
                (x + self.a * r * c, y + self.b * r * s)
            })
            .unzip()
    }
}

/// A spiral that breathes in and out: `r = rate + rate·sin(frequency·θ)`.
///
/// The amplitude equals the rate, so `r` never drops below zero; `offset`
/// (the `const` term) shifts the whole radius and may push it negative.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralOscillator {
    pub rate: f64,
    pub frequency: f64,
    pub offset: f64,
    pub a: f64,
    pub b: f64,
}

impl SpiralOscillator {
    pub fn new(rate: f64, frequency: f64) -> Result<Self> {
        Self::with_offset(rate, frequency, 0.0)
    }

    pub fn with_offset(rate: f64, frequency: f64, offset: f64) -> Result<Self> {
        require_finite("spiral_rate", rate)?;
        require_finite("frequency", frequency)?;
        require_finite("const", offset)?;
        Ok(Self {
            rate,
            frequency,
            offset,
            a: 1.0,
            b: 1.0,
        })
    }

    pub fn with_axes(mut self, a: f64, b: f64) -> Result<Self> {
        require_finite("a", a)?;
        require_finite("b", b)?;
        self.a = a;
        self.b = b;
        Ok(self)
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        let amplitude = self.rate;
        x.iter()
            .zip(y)
            .zip(theta)
            .map(|((&x, &y), &t)| {
                let r = self.rate + amplitude * (self.frequency * t).sin() + self.offset;
                let (s, c) = t.sin_cos();
                (x + self.a * r * c, y + self.b * r * s)
            })
            .unzip()
    }
}

/// Spiral whose growth rate moves from `start_rate` to `end_rate` across the
/// whole sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpiral {
    pub start_rate: f64,
    pub end_rate: f64,
    pub a: f64,
    pub b: f64,
}

impl VariableSpiral {
    pub fn new(start_rate: f64, end_rate: f64) -> Result<Self> {
        Self::elliptical(start_rate, end_rate, 1.0, 1.0)
    }

    pub fn elliptical(start_rate: f64, end_rate: f64, a: f64, b: f64) -> Result<Self> {
        require_finite("start_rate", start_rate)?;
        require_finite("end_rate", end_rate)?;
        require_finite("a", a)?;
        require_finite("b", b)?;
        Ok(Self {
            start_rate,
            end_rate,
            a,
            b,
        })
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        let r = variable_radius(theta, self.start_rate, self.end_rate);
        x.iter()
            .zip(y)
            .zip(theta.iter().zip(&r))
            .map(|((&x, &y), (&t, &r))| {
                let (s, c) = t.sin_cos();
                (x + self.a * r * c, y + self.b * r * s)
            })
            .unzip()
    }
}

/// Variable-rate spiral bent onto a triangle outline.
///
/// Each turn of θ walks the three edges once, a third of a turn per edge.
/// `side2` is carried for symmetry with the n-gon form; the vertex layout
/// only reads `side1` and `side3`. The incoming coordinates are replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableTriangleSpiral {
    pub start_rate: f64,
    pub end_rate: f64,
    pub side1: f64,
    pub side2: f64,
    pub side3: f64,
}

impl VariableTriangleSpiral {
    pub fn new(start_rate: f64, end_rate: f64, sides: [f64; 3]) -> Result<Self> {
        require_finite("start_rate", start_rate)?;
        require_finite("end_rate", end_rate)?;
        for side in sides {
            require_finite("side", side)?;
        }
        Ok(Self {
            start_rate,
            end_rate,
            side1: sides[0],
            side2: sides[1],
            side3: sides[2],
        })
    }

    fn vertices(&self) -> [(f64, f64); 3] {
        let half_sqrt3 = 3f64.sqrt() / 2.0;
        [
            (0.0, 1.0),
            (-self.side1 * half_sqrt3, -0.5 * self.side1),
            (self.side3 * half_sqrt3, -0.5 * self.side3),
        ]
    }

    pub(crate) fn apply(&self, _x: &[f64], _y: &[f64], theta: &[f64]) -> Coords {
        let vertices = self.vertices();
        let r = variable_radius(theta, self.start_rate, self.end_rate);
        trace_polygon(&vertices, theta, &r)
    }
}

/// Variable-rate spiral on an n-gon built from side lengths.
///
/// Vertices come from a law-of-cosines walk that does not, in general,
/// produce a polygon whose last vertex returns to the first. The output is
/// still produced; [`VariableNgonSpiral::warnings`] reports the instability
/// and the closing gap.
///
/// Side lengths must be finite and positive. Zero or negative sides are
/// rejected at construction rather than warned about: the law of cosines
/// divides by each adjacent pair, so such sets have no vertices to report
/// on.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableNgonSpiral {
    pub start_rate: f64,
    pub end_rate: f64,
    side_lengths: Vec<f64>,
    vertices: Vec<(f64, f64)>,
}

impl VariableNgonSpiral {
    pub fn new(start_rate: f64, end_rate: f64, side_lengths: Vec<f64>) -> Result<Self> {
        require_finite("start_rate", start_rate)?;
        require_finite("end_rate", end_rate)?;
        if side_lengths.is_empty() {
            return Err(PatternError::invalid(
                "side_lengths",
                "need at least one side",
            ));
        }
        if let Some(bad) = side_lengths.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(PatternError::invalid(
                "side_lengths",
                format!("sides must be positive, got {bad}"),
            ));
        }
        let vertices = law_of_cosines_vertices(&side_lengths);
        Ok(Self {
            start_rate,
            end_rate,
            side_lengths,
            vertices,
        })
    }

    pub fn side_lengths(&self) -> &[f64] {
        &self.side_lengths
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// Distance by which the closing edge misses the first side length
    pub fn closing_gap(&self) -> f64 {
        let n = self.vertices.len();
        let closing = distance(self.vertices[n - 1], self.vertices[0]);
        (closing - self.side_lengths[0]).abs()
    }

    pub fn warnings(&self) -> Vec<Warning> {
        let mut warnings = vec![Warning::ExperimentalGeometry {
            sides: self.side_lengths.len(),
        }];
        let gap = self.closing_gap();
        if gap > CLOSURE_TOLERANCE * self.side_lengths[0].max(1.0) {
            warnings.push(Warning::PolygonNotClosed { gap });
        }
        warnings
    }

    pub(crate) fn apply(&self, _x: &[f64], _y: &[f64], theta: &[f64]) -> Coords {
        let r = variable_radius(theta, self.start_rate, self.end_rate);
        trace_polygon(&self.vertices, theta, &r)
    }
}

/// Walk from `(0, 1)` heading straight up, turning by the law-of-cosines
/// angle between each pair of adjacent sides.
fn law_of_cosines_vertices(side_lengths: &[f64]) -> Vec<(f64, f64)> {
    let n = side_lengths.len();
    let mut vertices = Vec::with_capacity(n);
    let mut current = (0.0, 1.0);
    vertices.push(current);

    let mut heading = FRAC_PI_2;
    for i in 1..n {
        let side_a = side_lengths[i - 1];
        let side_b = side_lengths[i];
        let side_c = side_lengths[(i + 1) % n];

        let cos_angle = (side_a * side_a + side_b * side_b - side_c * side_c) / (2.0 * side_a * side_b);
        let internal_angle = cos_angle.clamp(-1.0, 1.0).acos();
        heading -= internal_angle;

        current = (
            current.0 + side_b * heading.cos(),
            current.1 + side_b * heading.sin(),
        );
        vertices.push(current);
    }
    vertices
}

/// Map each θ onto the polygon outline and scale the boundary point by `r`.
fn trace_polygon(vertices: &[(f64, f64)], theta: &[f64], r: &[f64]) -> Coords {
    let n = vertices.len();
    let segment_angle = TAU / n as f64;
    theta
        .iter()
        .zip(r)
        .map(|(&t, &r)| {
            let norm_angle = floor_mod(t, TAU);
            let scaled = norm_angle / segment_angle;
            // norm_angle can round up to TAU itself
            let side_index = (scaled.floor() as usize).min(n - 1);
            let local = scaled - side_index as f64;
            let start = vertices[side_index];
            let end = vertices[(side_index + 1) % n];
            let (px, py) = lerp(start, end, local);
            (r * px, r * py)
        })
        .unzip()
}
