//! Named reference patterns.
//!
//! The registry is built once and never mutated. Each entry is a builder so
//! that patterns depending on an SVG asset only touch the filesystem when
//! they are asked for, and a missing asset fails only that pattern.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::chain::TransformChain;
use crate::errors::{PatternError, Result};
use crate::models::{PatternEntry, SceneConfig};
use crate::path::SvgPath;
use crate::transforms::{
    CircularMotion, LinearTranslation, NonLinearPaperRotation, PaperRotation, PathTrace,
    Placement, RateFunction, RectangleSpirograph, Spiral, SpiralOscillator, Spirograph,
    TrochoidMode, MysteryLines, VariableNgonSpiral, VariableSpiral, VariableTriangleSpiral,
};

/// SVG used by the path-tracing presets, looked up in the assets directory
pub const SVG_ASSET: &str = "single_vector.svg";

pub type PresetBuilder = fn(&Path) -> Result<TransformChain>;

#[derive(Debug, Clone)]
pub struct PresetRegistry {
    assets_dir: PathBuf,
    presets: BTreeMap<&'static str, PresetBuilder>,
}

impl PresetRegistry {
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.presets.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn get(&self, name: &str) -> Result<TransformChain> {
        let build = self
            .presets
            .get(name)
            .ok_or_else(|| PatternError::UnknownPreset(name.to_string()))?;
        build(&self.assets_dir)
    }
}

pub fn registry(assets_dir: impl Into<PathBuf>) -> PresetRegistry {
    let entries: [(&'static str, PresetBuilder); 15] = [
        ("croissant", croissant),
        ("tube", tube),
        ("simple_pent_transform", simple_pent_transform),
        ("meta_spiral", meta_spiral),
        ("transform_set_2", svg_trace_spirograph),
        ("triangle_test", triangle_test),
        ("classic_spirograph", classic_spirograph),
        ("rectangle_spirograph", rectangle_spirograph),
        ("n_gon_test", n_gon_test),
        ("scramble", svg_trace_spirograph),
        ("x_ray_shell", x_ray_shell),
        ("banana", banana),
        ("another_simple_shell", another_simple_shell),
        ("create_simple_snail_pattern", simple_snail),
        ("create_sparse_shell_pattern", sparse_shell),
    ];
    PresetRegistry {
        assets_dir: assets_dir.into(),
        presets: entries.into_iter().collect(),
    }
}

/// Names of every preset, sorted. Needs no assets directory or scene.
pub fn preset_names() -> Vec<&'static str> {
    registry(PathBuf::new()).names().collect()
}

/// The four-pattern composition drawn when no scene file is given.
pub fn demo_scene() -> SceneConfig {
    SceneConfig {
        patterns: vec![
            PatternEntry::preset(
                "banana",
                Placement::offset(1000.0, 0.0)
                    .with_scale(1.2, 1.2)
                    .with_rotation(15.0),
            ),
            PatternEntry::preset("triangle_test", Placement::default()),
            PatternEntry::preset("meta_spiral", Placement::offset(2900.0, 0.0)),
            PatternEntry::preset(
                "x_ray_shell",
                Placement::offset(-4900.0, 0.0).with_scale(3.0, 3.0),
            ),
        ],
        ..SceneConfig::default()
    }
}

fn hypotrochoid(big_r: f64, r: f64, d: f64) -> Result<Spirograph> {
    Spirograph::new(big_r, r, d, TrochoidMode::Hypotrochoid)
}

fn croissant(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        235,
        vec![
            SpiralOscillator::new(390.0, 0.00212)?.into(),
            CircularMotion::new(1050.0, 0.0016)?.into(),
            PaperRotation::new(200.0)?.into(),
        ],
    )
}

fn tube(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        200,
        vec![
            MysteryLines::new(390.0, 0.00312)?.into(),
            CircularMotion::new(950.0, 0.0046)?.into(),
        ],
    )
}

fn simple_pent_transform(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        60,
        vec![
            hypotrochoid(500.0, 200.0, 500.0)?.into(),
            Spiral::new(0.9)?.into(),
            CircularMotion::new(100.0, 0.01)?.into(),
            PaperRotation::new(30.0)?.into(),
        ],
    )
}

fn meta_spiral(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        200,
        vec![
            VariableSpiral::elliptical(0.01, 1.1, 1.0, 1.0)?.into(),
            CircularMotion::new(950.0, 0.006)?.into(),
        ],
    )
}

/// Shared by `transform_set_2` and `scramble`, which use the same chain.
fn svg_trace_spirograph(assets_dir: &Path) -> Result<TransformChain> {
    let path = SvgPath::load(assets_dir.join(SVG_ASSET))?;
    TransformChain::new(
        130,
        vec![
            PathTrace::new(Arc::new(path))?.into(),
            hypotrochoid(500.0, 200.0, 500.0)?.into(),
            CircularMotion::new(100.0, 0.001)?.into(),
            LinearTranslation::new(400.0, 45.0)?.into(),
            NonLinearPaperRotation::new(70.0, RateFunction::Quadratic)?.into(),
        ],
    )
}

fn triangle_test(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        230,
        vec![
            VariableTriangleSpiral::new(0.9, 0.01, [1.0, 3.0, 3.0])?.into(),
            LinearTranslation::new(4000.0, 45.0)?.into(),
            PaperRotation::new(70.0)?.into(),
            CircularMotion::new(100.0, 0.015)?.into(),
        ],
    )
}

fn classic_spirograph(_: &Path) -> Result<TransformChain> {
    TransformChain::new(30, vec![hypotrochoid(600.0, 171.0, 400.0)?.into()])
}

fn rectangle_spirograph(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        120,
        vec![
            RectangleSpirograph::new(30.0, 30.0, 15.0, 10.0)?.into(),
            PaperRotation::new(70.0)?.into(),
            LinearTranslation::new(3000.0, 45.0)?.into(),
            Spiral::new(0.1)?.into(),
        ],
    )
}

fn n_gon_test(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        230,
        vec![
            VariableNgonSpiral::new(0.9, 0.01, vec![1.0, 3.0, 3.0, 3.0, 3.0])?.into(),
            LinearTranslation::new(4000.0, 45.0)?.into(),
            PaperRotation::new(70.0)?.into(),
            CircularMotion::new(100.0, 0.015)?.into(),
        ],
    )
}

fn x_ray_shell(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        250,
        vec![
            hypotrochoid(500.0, 200.0, 500.0)?.into(),
            VariableSpiral::new(0.01, 0.9)?.into(),
            CircularMotion::new(100.0, 0.001)?.into(),
            SpiralOscillator::new(30.0, 0.035)?.into(),
            LinearTranslation::new(700.0, 45.0)?.into(),
            NonLinearPaperRotation::new(90.0, RateFunction::Quadratic)?.into(),
        ],
    )
}

fn banana(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        230,
        vec![
            SpiralOscillator::with_offset(390.0, 0.00212, -300.0)?.into(),
            CircularMotion::new(3050.0, 0.0016)?.into(),
        ],
    )
}

fn simple_snail(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        200,
        vec![
            VariableSpiral::new(0.01, 1.1)?.into(),
            CircularMotion::new(950.0, 0.006)?.into(),
        ],
    )
}

fn another_simple_shell(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        200,
        vec![
            SpiralOscillator::new(390.0, 0.00312)?.into(),
            CircularMotion::new(950.0, 0.0046)?.into(),
        ],
    )
}

fn sparse_shell(_: &Path) -> Result<TransformChain> {
    TransformChain::new(
        50,
        vec![
            Spiral::new(0.9)?.into(),
            LinearTranslation::new(690.0, 45.0)?.into(),
            hypotrochoid(500.0, 200.0, 500.0)?.into(),
            CircularMotion::new(100.0, 0.01)?.into(),
            NonLinearPaperRotation::new(60.0, RateFunction::Quadratic)?.into(),
        ],
    )
}
