//! Externally authored vector paths.
//!
//! A [`PathProvider`] answers two questions about a path: its total length and
//! the point at a native parameter in `[0, 1]`. The native parameter is not
//! uniform in arclength; [`crate::transforms::PathTrace`] resamples it.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg, Point};
use resvg::usvg;
use tiny_skia::PathSegment;

use crate::errors::{PatternError, Result};

const ARCLEN_ACCURACY: f64 = 1e-6;

pub trait PathProvider: Debug + Send + Sync {
    /// Total arclength
    fn length(&self) -> f64;

    /// Position at native parameter `t`, clamped to `[0, 1]`
    fn point_at(&self, t: f64) -> (f64, f64);

    /// Arclength from the start to native parameter `t`
    fn length_to(&self, t: f64) -> f64;
}

/// The first path of an SVG document, as Bézier segments.
///
/// The native parameter picks a segment by its share of the total length and
/// then evaluates that segment at its own Bézier parameter. Element
/// transforms are not applied.
#[derive(Debug, Clone)]
pub struct SvgPath {
    origin: PathBuf,
    segments: Vec<PathSeg>,
    /// Cumulative length at the end of each segment
    ends: Vec<f64>,
}

impl SvgPath {
    /// Load the first `<path>` (or shape converted to one) from an SVG file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| PatternError::ResourceLoad {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        Self::from_svg_data(&data, path)
    }

    /// Parse an in-memory SVG document; `origin` names it in errors.
    pub fn from_svg_data(data: &[u8], origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let tree = usvg::Tree::from_data(data, &usvg::Options::default()).map_err(|e| {
            PatternError::ResourceLoad {
                path: origin.clone(),
                source: Box::new(e),
            }
        })?;

        let Some(first) = first_path(tree.root()) else {
            return Err(PatternError::EmptyPath(origin));
        };

        let mut bez = BezPath::new();
        for segment in first.data().segments() {
            match segment {
                PathSegment::MoveTo(p) => bez.move_to(to_point(p)),
                PathSegment::LineTo(p) => bez.line_to(to_point(p)),
                PathSegment::QuadTo(p1, p2) => bez.quad_to(to_point(p1), to_point(p2)),
                PathSegment::CubicTo(p1, p2, p3) => {
                    bez.curve_to(to_point(p1), to_point(p2), to_point(p3))
                }
                PathSegment::Close => bez.close_path(),
            }
        }
        Self::from_bez_path(&bez, origin)
    }

    /// Build from the contents of an SVG `d` attribute.
    pub fn from_path_data(d: &str) -> Result<Self> {
        let origin = PathBuf::from("<path data>");
        let bez = BezPath::from_svg(d).map_err(|e| PatternError::ResourceLoad {
            path: origin.clone(),
            source: Box::new(e),
        })?;
        Self::from_bez_path(&bez, origin)
    }

    pub fn from_bez_path(bez: &BezPath, origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let segments: Vec<PathSeg> = bez.segments().collect();

        let mut ends = Vec::with_capacity(segments.len());
        let mut total = 0.0;
        for segment in &segments {
            total += segment.arclen(ARCLEN_ACCURACY);
            ends.push(total);
        }

        if !(total.is_finite() && total > 0.0) {
            return Err(PatternError::EmptyPath(origin));
        }
        log::debug!(
            "loaded path from {:?}: {} segments, length {:.3}",
            origin,
            segments.len(),
            total
        );
        Ok(Self {
            origin,
            segments,
            ends,
        })
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl PathProvider for SvgPath {
    fn length(&self) -> f64 {
        self.ends[self.ends.len() - 1]
    }

    fn point_at(&self, t: f64) -> (f64, f64) {
        let (idx, local) = self.locate(t);
        let p = self.segments[idx].eval(local);
        (p.x, p.y)
    }

    fn length_to(&self, t: f64) -> f64 {
        let (idx, local) = self.locate(t);
        let before = if idx == 0 { 0.0 } else { self.ends[idx - 1] };
        if local >= 1.0 {
            return self.ends[idx];
        }
        if local <= 0.0 {
            return before;
        }
        before + self.segments[idx].subsegment(0.0..local).arclen(ARCLEN_ACCURACY)
    }
}

impl SvgPath {
    /// Segment index and local Bézier parameter for native parameter `t`
    fn locate(&self, t: f64) -> (usize, f64) {
        let target = t.clamp(0.0, 1.0) * self.length();
        let idx = self
            .ends
            .partition_point(|&end| end < target)
            .min(self.segments.len() - 1);
        let start = if idx == 0 { 0.0 } else { self.ends[idx - 1] };
        let span = self.ends[idx] - start;
        let local = if span > 0.0 {
            ((target - start) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (idx, local)
    }
}

fn first_path(group: &usvg::Group) -> Option<&usvg::Path> {
    for node in group.children() {
        match node {
            usvg::Node::Path(path) => return Some(path.as_ref()),
            usvg::Node::Group(child) => {
                if let Some(path) = first_path(child) {
                    return Some(path);
                }
            }
            _ => {}
        }
    }
    None
}

fn to_point(p: tiny_skia::Point) -> Point {
    Point::new(p.x as f64, p.y as f64)
}
