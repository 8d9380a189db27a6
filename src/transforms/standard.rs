//! Motions of the drawing surface (circling, drifting, turning) and the
//! final placement of a finished pattern.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use euclid::default::{Point2D, Transform2D, Vector2D};
use euclid::Angle;
use serde::Deserialize;

use super::{require_finite, theta_max, Coords};
use crate::errors::{PatternError, Result};
use crate::math_utils::rotate;

/// The paper circles under the pen: `radius·(cos, sin)(speed·θ)` is added.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularMotion {
    pub radius: f64,
    pub speed: f64,
}

impl Default for CircularMotion {
    fn default() -> Self {
        Self {
            radius: 50.0,
            speed: 0.01,
        }
    }
}

impl CircularMotion {
    pub fn new(radius: f64, speed: f64) -> Result<Self> {
        require_finite("radius", radius)?;
        require_finite("speed", speed)?;
        Ok(Self { radius, speed })
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        x.iter()
            .zip(y)
            .zip(theta)
            .map(|((&x, &y), &t)| {
                let (s, c) = (self.speed * t).sin_cos();
                (x + self.radius * c, y + self.radius * s)
            })
            .unzip()
    }
}

/// The paper drifts `total_distance` along a fixed direction over the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTranslation {
    pub total_distance: f64,
    /// Direction of travel, radians
    pub angle: f64,
}

impl LinearTranslation {
    pub fn new(total_distance: f64, angle_degrees: f64) -> Result<Self> {
        require_finite("total_distance", total_distance)?;
        require_finite("movement_angle_degrees", angle_degrees)?;
        Ok(Self {
            total_distance,
            angle: angle_degrees.to_radians(),
        })
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        let theta_max = theta_max(theta);
        let (s, c) = self.angle.sin_cos();
        x.iter()
            .zip(y)
            .zip(theta)
            .map(|((&x, &y), &t)| {
                let p = t / theta_max;
                (x + p * self.total_distance * c, y + p * self.total_distance * s)
            })
            .unzip()
    }
}

/// The paper turns at a constant rate, reaching `total_rotation` at the end
/// of the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperRotation {
    /// Radians
    pub total_rotation: f64,
}

impl PaperRotation {
    pub fn new(degrees: f64) -> Result<Self> {
        require_finite("degrees", degrees)?;
        Ok(Self {
            total_rotation: degrees.to_radians(),
        })
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        let theta_max = theta_max(theta);
        x.iter()
            .zip(y)
            .zip(theta)
            .map(|((&x, &y), &t)| rotate(x, y, (t / theta_max) * self.total_rotation))
            .unzip()
    }
}

/// Shape of the paper's rotation over normalised progress `p` in `[0, 1]`.
#[derive(Clone)]
pub enum RateFunction {
    Linear,
    Quadratic,
    Sinusoidal,
    /// Any mapping of progress; results are clipped to `[0, 1]`
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl RateFunction {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        RateFunction::Custom(Arc::new(f))
    }

    /// Fraction of the total rotation reached at progress `p`
    pub fn shape(&self, p: f64) -> f64 {
        match self {
            RateFunction::Linear => p,
            RateFunction::Quadratic => p * p,
            RateFunction::Sinusoidal => (p * FRAC_PI_2).sin(),
            RateFunction::Custom(f) => f(p).clamp(0.0, 1.0),
        }
    }
}

impl fmt::Debug for RateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateFunction::Linear => write!(f, "Linear"),
            RateFunction::Quadratic => write!(f, "Quadratic"),
            RateFunction::Sinusoidal => write!(f, "Sinusoidal"),
            RateFunction::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl FromStr for RateFunction {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(RateFunction::Linear),
            "quadratic" => Ok(RateFunction::Quadratic),
            "sinusoidal" => Ok(RateFunction::Sinusoidal),
            other => Err(PatternError::invalid(
                "rotation_rate_function",
                format!("`{other}`, use 'linear', 'quadratic', 'sinusoidal', or provide a function"),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for RateFunction {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Paper rotation whose rate follows a [`RateFunction`].
#[derive(Debug, Clone)]
pub struct NonLinearPaperRotation {
    /// Radians
    pub total_rotation: f64,
    pub rate: RateFunction,
}

impl NonLinearPaperRotation {
    pub fn new(degrees: f64, rate: RateFunction) -> Result<Self> {
        require_finite("degrees", degrees)?;
        Ok(Self {
            total_rotation: degrees.to_radians(),
            rate,
        })
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        let theta_max = theta_max(theta);
        x.iter()
            .zip(y)
            .zip(theta)
            .map(|((&x, &y), &t)| {
                let phi = self.rate.shape(t / theta_max) * self.total_rotation;
                rotate(x, y, phi)
            })
            .unzip()
    }
}

/// Oscillating radius applied with `sin θ` on both axes.
///
/// Unlike [`super::SpiralOscillator`] this never draws a circle: both axes
/// move together, so the output collapses onto the diagonal `y - x = const`.
#[derive(Debug, Clone, PartialEq)]
pub struct MysteryLines {
    pub rate: f64,
    pub frequency: f64,
}

impl MysteryLines {
    pub fn new(rate: f64, frequency: f64) -> Result<Self> {
        require_finite("spiral_rate", rate)?;
        require_finite("frequency", frequency)?;
        Ok(Self { rate, frequency })
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        let amplitude = self.rate;
        x.iter()
            .zip(y)
            .zip(theta)
            .map(|((&x, &y), &t)| {
                let r = self.rate + amplitude * (self.frequency * t).sin();
                let s = t.sin();
                (x + r * s, y + r * s)
            })
            .unzip()
    }
}

/// Final translate/scale/rotate of a finished pattern.
///
/// Scaling happens first (independently per axis), then a counterclockwise
/// rotation by `rotation_angle` degrees, then the offset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub x_offset: f64,
    pub y_offset: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Degrees, counterclockwise
    pub rotation_angle: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation_angle: 0.0,
        }
    }
}

impl Placement {
    pub fn offset(x_offset: f64, y_offset: f64) -> Self {
        Self {
            x_offset,
            y_offset,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_angle = degrees;
        self
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        require_finite("x_offset", self.x_offset)?;
        require_finite("y_offset", self.y_offset)?;
        require_finite("scale_x", self.scale_x)?;
        require_finite("scale_y", self.scale_y)?;
        require_finite("rotation_angle", self.rotation_angle)
    }

    pub fn to_transform(&self) -> Transform2D<f64> {
        Transform2D::scale(self.scale_x, self.scale_y)
            .then_rotate(Angle::degrees(self.rotation_angle))
            .then_translate(Vector2D::new(self.x_offset, self.y_offset))
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], _theta: &[f64]) -> Coords {
        self.apply_points(x, y)
    }

    pub fn apply_points(&self, x: &[f64], y: &[f64]) -> Coords {
        let matrix = self.to_transform();
        x.iter()
            .zip(y)
            .map(|(&x, &y)| {
                let p = matrix.transform_point(Point2D::new(x, y));
                (p.x, p.y)
            })
            .unzip()
    }
}
