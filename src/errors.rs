//! Errors and non-fatal diagnostics raised while building or rendering patterns

use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// A parameter is outside the closed set or range a transform accepts
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// A resource (SVG file) could not be read or parsed
    #[error("failed to load {path:?}: {source}")]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The resource loaded, but holds no path with positive length
    #[error("no usable path found in {0:?}")]
    EmptyPath(PathBuf),
    #[error("unknown pattern preset `{0}`")]
    UnknownPreset(String),
}

impl PatternError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PatternError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = PatternError> = std::result::Result<T, E>;

/// Geometry that still renders but is known to be unreliable
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The law-of-cosines polygon construction is experimental
    ExperimentalGeometry { sides: usize },
    /// The constructed polygon does not return to its first vertex
    PolygonNotClosed { gap: f64 },
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::ExperimentalGeometry { sides } => write!(
                f,
                "(ExperimentalGeometry) {sides}-gon spiral vertices are unstable, verify the geometry closes"
            ),
            Warning::PolygonNotClosed { gap } => write!(
                f,
                "(PolygonNotClosed) closing edge misses its side length by {gap:.6}"
            ),
        }
    }
}
