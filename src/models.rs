use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use palette::Srgb;
use serde::Deserialize;

use crate::angle::DEFAULT_RESOLUTION;
use crate::chain::TransformChain;
use crate::errors::{PatternError, Result};
use crate::path::SvgPath;
use crate::pattern::PatternInstance;
use crate::presets::PresetRegistry;
use crate::transforms::path_trace::DEFAULT_TABLE_SAMPLES;
use crate::transforms::{
    CircularMotion, CyclogonMode, EllipticalSpirograph, LinearTranslation, MysteryLines,
    NonLinearPaperRotation, PaperRotation, PathTrace, Placement, PolygonSpirograph, RateFunction,
    RectangleSpirograph, Spiral, SpiralOscillator, Spirograph, Transform, TrochoidMode,
    VariableNgonSpiral, VariableSpiral, VariableTriangleSpiral,
};

/// Ordered pen positions of one pattern
pub type Polyline = Vec<(f64, f64)>;

#[derive(Debug, Clone, Copy)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            width: 0.5,
        }
    }
}

impl StrokeStyle {
    /// Normalised `#rrggbb` form of the configured colour
    pub fn hex_color(&self) -> Result<String> {
        let rgb = Srgb::<u8>::from_str(self.color.trim()).map_err(|e| {
            PatternError::invalid("stroke.color", format!("`{}`: {e}", self.color))
        })?;
        Ok(format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue))
    }

    /// Check the width and return the normalised colour
    pub fn validate(&self) -> Result<String> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(PatternError::invalid(
                "stroke.width",
                format!("must be positive, got {}", self.width),
            ));
        }
        self.hex_color()
    }
}

/// Polylines sharing one stroke, ready for the renderer.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    pub polylines: Vec<Polyline>,
    pub stroke: StrokeStyle,
}

/// A scene file: which patterns to draw and how.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub resolution: usize,
    pub stroke: StrokeStyle,
    /// Where SVG assets are looked up; relative paths resolve against the
    /// scene file's directory
    pub assets_dir: PathBuf,
    pub patterns: Vec<PatternEntry>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            stroke: StrokeStyle::default(),
            assets_dir: PathBuf::from("assets"),
            patterns: Vec::new(),
        }
    }
}

impl SceneConfig {
    /// Resolve every entry. Entries are independent; one failing does not
    /// stop the others from resolving.
    pub fn instances(&self, registry: &PresetRegistry) -> Vec<Result<PatternInstance>> {
        self.patterns
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.instance(index, registry))
            .collect()
    }
}

/// Either a preset name or an inline chain, plus its placement.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatternEntry {
    pub preset: Option<String>,
    pub name: Option<String>,
    pub rotations: Option<u32>,
    pub transforms: Option<Vec<TransformSpec>>,
    pub placement: Placement,
}

impl PatternEntry {
    pub fn preset(name: &str, placement: Placement) -> Self {
        Self {
            preset: Some(name.to_string()),
            placement,
            ..Self::default()
        }
    }

    pub fn instance(&self, index: usize, registry: &PresetRegistry) -> Result<PatternInstance> {
        let chain = match (&self.preset, &self.transforms) {
            (Some(preset), None) => registry.get(preset)?,
            (None, Some(specs)) => {
                let rotations = self.rotations.ok_or_else(|| {
                    PatternError::invalid("rotations", "inline patterns must set `rotations`")
                })?;
                let transforms = specs
                    .iter()
                    .map(|spec| spec.bind(registry.assets_dir()))
                    .collect::<Result<Vec<_>>>()?;
                TransformChain::new(rotations, transforms)?
            }
            (Some(_), Some(_)) => {
                return Err(PatternError::invalid(
                    "patterns",
                    format!("entry {index} sets both `preset` and `transforms`"),
                ))
            }
            (None, None) => {
                return Err(PatternError::invalid(
                    "patterns",
                    format!("entry {index} needs a `preset` or `transforms`"),
                ))
            }
        };

        let name = self
            .name
            .clone()
            .or_else(|| self.preset.clone())
            .unwrap_or_else(|| format!("pattern-{index}"));
        Ok(PatternInstance::new(name, chain).placed(self.placement))
    }
}

fn one() -> f64 {
    1.0
}

fn default_radius() -> f64 {
    CircularMotion::default().radius
}

fn default_speed() -> f64 {
    CircularMotion::default().speed
}

fn default_samples() -> usize {
    DEFAULT_TABLE_SAMPLES
}

/// Serialized form of a transform, tagged by `kind`. Field names follow the
/// parameter names used in scene files.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformSpec {
    Spiral {
        spiral_rate: f64,
        #[serde(default = "one")]
        a: f64,
        #[serde(default = "one")]
        b: f64,
    },
    SpiralOscillator {
        spiral_rate: f64,
        frequency: f64,
        #[serde(default, rename = "const")]
        offset: f64,
        #[serde(default = "one")]
        a: f64,
        #[serde(default = "one")]
        b: f64,
    },
    VariableSpiral {
        start_rate: f64,
        end_rate: f64,
        #[serde(default = "one")]
        a: f64,
        #[serde(default = "one")]
        b: f64,
    },
    VariableTriangleSpiral {
        start_rate: f64,
        end_rate: f64,
        #[serde(default = "one")]
        side1: f64,
        #[serde(default = "one")]
        side2: f64,
        #[serde(default = "one")]
        side3: f64,
    },
    VariableNgonSpiral {
        start_rate: f64,
        end_rate: f64,
        side_lengths: Vec<f64>,
    },
    Spirograph {
        #[serde(rename = "R")]
        big_r: f64,
        r: f64,
        d: f64,
        mode: TrochoidMode,
    },
    EllipticalSpirograph {
        #[serde(rename = "R")]
        big_r: f64,
        r: f64,
        d: f64,
        a: f64,
        b: f64,
        mode: TrochoidMode,
    },
    PolygonSpirograph {
        #[serde(rename = "R")]
        big_r: f64,
        n: u32,
        d: f64,
        mode: CyclogonMode,
    },
    RectangleSpirograph {
        rect_width: f64,
        rect_height: f64,
        gear_radius: f64,
        tracing_point_dist: f64,
    },
    CircularMotion {
        #[serde(default = "default_radius")]
        radius: f64,
        #[serde(default = "default_speed")]
        speed: f64,
    },
    LinearTranslation {
        total_distance: f64,
        movement_angle_degrees: f64,
    },
    PaperRotation {
        degrees: f64,
    },
    PaperRotationNonLinear {
        degrees: f64,
        rotation_rate_function: RateFunction,
    },
    MysteryLines {
        spiral_rate: f64,
        frequency: f64,
    },
    SvgPath {
        path: PathBuf,
        #[serde(default = "one")]
        scale: f64,
        #[serde(default)]
        offset_x: f64,
        #[serde(default)]
        offset_y: f64,
        #[serde(default = "default_samples")]
        samples: usize,
    },
    Placement(Placement),
}

impl TransformSpec {
    /// Validate the parameters and bind them into a [`Transform`]. Relative
    /// SVG paths resolve against `assets_dir`.
    pub fn bind(&self, assets_dir: &Path) -> Result<Transform> {
        let transform: Transform = match self {
            TransformSpec::Spiral { spiral_rate, a, b } => {
                Spiral::elliptical(*spiral_rate, *a, *b)?.into()
            }
            TransformSpec::SpiralOscillator {
                spiral_rate,
                frequency,
                offset,
                a,
                b,
            } => SpiralOscillator::with_offset(*spiral_rate, *frequency, *offset)?
                .with_axes(*a, *b)?
                .into(),
            TransformSpec::VariableSpiral {
                start_rate,
                end_rate,
                a,
                b,
            } => VariableSpiral::elliptical(*start_rate, *end_rate, *a, *b)?.into(),
            TransformSpec::VariableTriangleSpiral {
                start_rate,
                end_rate,
                side1,
                side2,
                side3,
            } => VariableTriangleSpiral::new(*start_rate, *end_rate, [*side1, *side2, *side3])?
                .into(),
            TransformSpec::VariableNgonSpiral {
                start_rate,
                end_rate,
                side_lengths,
            } => VariableNgonSpiral::new(*start_rate, *end_rate, side_lengths.clone())?.into(),
            TransformSpec::Spirograph { big_r, r, d, mode } => {
                Spirograph::new(*big_r, *r, *d, *mode)?.into()
            }
            TransformSpec::EllipticalSpirograph {
                big_r,
                r,
                d,
                a,
                b,
                mode,
            } => EllipticalSpirograph::new(*big_r, *r, *d, *a, *b, *mode)?.into(),
            TransformSpec::PolygonSpirograph { big_r, n, d, mode } => {
                PolygonSpirograph::new(*big_r, *n, *d, *mode)?.into()
            }
            TransformSpec::RectangleSpirograph {
                rect_width,
                rect_height,
                gear_radius,
                tracing_point_dist,
            } => RectangleSpirograph::new(*rect_width, *rect_height, *gear_radius, *tracing_point_dist)?
                .into(),
            TransformSpec::CircularMotion { radius, speed } => {
                CircularMotion::new(*radius, *speed)?.into()
            }
            TransformSpec::LinearTranslation {
                total_distance,
                movement_angle_degrees,
            } => LinearTranslation::new(*total_distance, *movement_angle_degrees)?.into(),
            TransformSpec::PaperRotation { degrees } => PaperRotation::new(*degrees)?.into(),
            TransformSpec::PaperRotationNonLinear {
                degrees,
                rotation_rate_function,
            } => NonLinearPaperRotation::new(*degrees, rotation_rate_function.clone())?.into(),
            TransformSpec::MysteryLines {
                spiral_rate,
                frequency,
            } => MysteryLines::new(*spiral_rate, *frequency)?.into(),
            TransformSpec::SvgPath {
                path,
                scale,
                offset_x,
                offset_y,
                samples,
            } => {
                let svg = SvgPath::load(assets_dir.join(path))?;
                PathTrace::with_samples(Arc::new(svg), *samples)?
                    .with_placement(*scale, *offset_x, *offset_y)?
                    .into()
            }
            TransformSpec::Placement(placement) => {
                placement.validate()?;
                (*placement).into()
            }
        };
        Ok(transform)
    }
}
