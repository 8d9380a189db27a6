//! Rolling-element curves: a circle, ellipse or polygon rolling inside or
//! outside a fixed circle, and a gear rolling around a rectangle.

use std::f64::consts::PI;
use std::str::FromStr;

use serde::Deserialize;

use super::{require_finite, require_nonzero, Coords};
use crate::errors::{PatternError, Result};
use crate::math_utils::{floor_mod, gcd};

/// Whether the rolling circle runs inside or outside the fixed circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TrochoidMode {
    Hypotrochoid,
    Epitrochoid,
}

impl FromStr for TrochoidMode {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hypotrochoid" => Ok(TrochoidMode::Hypotrochoid),
            "epitrochoid" => Ok(TrochoidMode::Epitrochoid),
            other => Err(PatternError::invalid(
                "mode",
                format!("`{other}`, use 'hypotrochoid' or 'epitrochoid'"),
            )),
        }
    }
}

impl TryFrom<String> for TrochoidMode {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Polygon rolling inside or outside the fixed circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CyclogonMode {
    Hypocyclogon,
    Epicyclogon,
}

impl FromStr for CyclogonMode {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hypocyclogon" => Ok(CyclogonMode::Hypocyclogon),
            "epicyclogon" => Ok(CyclogonMode::Epicyclogon),
            other => Err(PatternError::invalid(
                "mode",
                format!("`{other}`, use 'hypocyclogon' or 'epicyclogon'"),
            )),
        }
    }
}

impl TryFrom<String> for CyclogonMode {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Classic spirograph: pen at distance `d` from the centre of a circle of
/// radius `r` rolling on a fixed circle of radius `big_r`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spirograph {
    pub big_r: f64,
    pub r: f64,
    pub d: f64,
    pub mode: TrochoidMode,
}

impl Spirograph {
    pub fn new(big_r: f64, r: f64, d: f64, mode: TrochoidMode) -> Result<Self> {
        require_finite("R", big_r)?;
        require_nonzero("r", r)?;
        require_finite("d", d)?;
        Ok(Self { big_r, r, d, mode })
    }

    /// Same as [`Spirograph::new`] with the mode given by name
    pub fn with_mode(big_r: f64, r: f64, d: f64, mode: &str) -> Result<Self> {
        Self::new(big_r, r, d, mode.parse()?)
    }

    /// Number of θ turns after which the curve retraces itself, when both
    /// radii are whole numbers.
    pub fn closing_rotations(&self) -> Option<u64> {
        let whole = |v: f64| v > 0.0 && v.fract() == 0.0 && v < u64::MAX as f64;
        if !(whole(self.big_r) && whole(self.r)) {
            return None;
        }
        let (big_r, r) = (self.big_r as u64, self.r as u64);
        Some(r / gcd(big_r, r))
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        trochoid(x, y, theta, self.big_r, self.r, (self.d, self.d), self.mode)
    }
}

/// Spirograph with an ellipse as the rolling element. `r` is the ellipse's
/// characteristic radius, `a` and `b` its semi-axes.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalSpirograph {
    pub big_r: f64,
    pub r: f64,
    pub d: f64,
    pub a: f64,
    pub b: f64,
    pub mode: TrochoidMode,
}

impl EllipticalSpirograph {
    pub fn new(big_r: f64, r: f64, d: f64, a: f64, b: f64, mode: TrochoidMode) -> Result<Self> {
        require_finite("R", big_r)?;
        require_nonzero("r", r)?;
        require_finite("d", d)?;
        require_finite("a", a)?;
        require_finite("b", b)?;
        Ok(Self {
            big_r,
            r,
            d,
            a,
            b,
            mode,
        })
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        let pen = (self.d * self.a / self.r, self.d * self.b / self.r);
        trochoid(x, y, theta, self.big_r, self.r, pen, self.mode)
    }
}

fn trochoid(
    x: &[f64],
    y: &[f64],
    theta: &[f64],
    big_r: f64,
    r: f64,
    (pen_x, pen_y): (f64, f64),
    mode: TrochoidMode,
) -> Coords {
    x.iter()
        .zip(y)
        .zip(theta)
        .map(|((&x, &y), &t)| {
            let (s, c) = t.sin_cos();
            match mode {
                TrochoidMode::Hypotrochoid => {
                    let k = (big_r - r) / r * t;
                    (
                        x + (big_r - r) * c + pen_x * k.cos(),
                        y + (big_r - r) * s - pen_y * k.sin(),
                    )
                }
                TrochoidMode::Epitrochoid => {
                    let k = (big_r + r) / r * t;
                    (
                        x + (big_r + r) * c - pen_x * k.cos(),
                        y + (big_r + r) * s - pen_y * k.sin(),
                    )
                }
            }
        })
        .unzip()
}

/// A regular `n`-gon rolling on the fixed circle. The polygon's effective
/// radius is derived from `big_r` and `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSpirograph {
    pub big_r: f64,
    pub sides: u32,
    pub d: f64,
    pub mode: CyclogonMode,
}

impl PolygonSpirograph {
    pub fn new(big_r: f64, sides: u32, d: f64, mode: CyclogonMode) -> Result<Self> {
        require_nonzero("R", big_r)?;
        require_finite("d", d)?;
        if sides < 3 {
            return Err(PatternError::invalid(
                "n",
                format!("a rolling polygon needs at least 3 sides, got {sides}"),
            ));
        }
        Ok(Self {
            big_r,
            sides,
            d,
            mode,
        })
    }

    /// Rolling radius: `R·s/(1+s)` inside, `R·s/(1-s)` outside, `s = sin(π/n)`
    pub fn rolling_radius(&self) -> f64 {
        let s = (PI / self.sides as f64).sin();
        match self.mode {
            CyclogonMode::Hypocyclogon => self.big_r * (s / (1.0 + s)),
            CyclogonMode::Epicyclogon => self.big_r * (s / (1.0 - s)),
        }
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        let r = self.rolling_radius();
        let centre_r = match self.mode {
            CyclogonMode::Hypocyclogon => self.big_r - r,
            CyclogonMode::Epicyclogon => self.big_r + r,
        };
        let ratio = centre_r / r;
        let corner = 2.0 * PI / self.sides as f64;

        x.iter()
            .zip(y)
            .zip(theta)
            .map(|((&x, &y), &t)| {
                let psi = ratio * t;
                let phi = t * ratio - psi * corner;
                let (s, c) = t.sin_cos();
                (
                    x + centre_r * c + self.d * phi.cos(),
                    y + centre_r * s + self.d * phi.sin(),
                )
            })
            .unzip()
    }
}

/// A gear of `gear_radius` rolling around a `width` × `height` rectangle,
/// with the pen `tracing_point_dist` from the gear centre.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleSpirograph {
    pub width: f64,
    pub height: f64,
    pub gear_radius: f64,
    pub tracing_point_dist: f64,
}

impl RectangleSpirograph {
    pub fn new(width: f64, height: f64, gear_radius: f64, tracing_point_dist: f64) -> Result<Self> {
        require_finite("rect_width", width)?;
        require_finite("rect_height", height)?;
        require_nonzero("gear_radius", gear_radius)?;
        require_finite("tracing_point_dist", tracing_point_dist)?;
        if width < 0.0 || height < 0.0 || width + height <= 0.0 {
            return Err(PatternError::invalid(
                "rect_width",
                format!("rectangle {width} x {height} has no perimeter"),
            ));
        }
        Ok(Self {
            width,
            height,
            gear_radius,
            tracing_point_dist,
        })
    }

    /// Gear centre after travelling `distance` along the perimeter, starting
    /// at the top-left corner and going clockwise.
    pub fn centre_at(&self, distance: f64) -> (f64, f64) {
        let (w, h) = (self.width, self.height);
        let s = floor_mod(distance, 2.0 * (w + h));
        if s < w {
            (-w / 2.0 + s, h / 2.0)
        } else if s < w + h {
            (w / 2.0, h / 2.0 - (s - w))
        } else if s < 2.0 * w + h {
            (w / 2.0 - (s - (w + h)), -h / 2.0)
        } else {
            (-w / 2.0, -h / 2.0 + (s - (2.0 * w + h)))
        }
    }

    pub(crate) fn apply(&self, x: &[f64], y: &[f64], theta: &[f64]) -> Coords {
        x.iter()
            .zip(y)
            .zip(theta)
            .map(|((&x, &y), &t)| {
                let (cx, cy) = self.centre_at(self.gear_radius * t);
                let gear_rotation = t * (self.width + self.height) / self.gear_radius;
                let (s, c) = gear_rotation.sin_cos();
                (
                    x + cx + self.tracing_point_dist * c,
                    y + cy + self.tracing_point_dist * s,
                )
            })
            .unzip()
    }
}
