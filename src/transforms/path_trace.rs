use std::sync::Arc;

use super::{require_finite, theta_max, Coords};
use crate::errors::{PatternError, Result};
use crate::math_utils::interp;
use crate::path::PathProvider;

pub const DEFAULT_TABLE_SAMPLES: usize = 10_000;

/// Trace a vector path at constant speed.
///
/// Progress `θ/θmax` becomes a target arclength, which is turned back into
/// the provider's native parameter through a table of the provider's
/// arclength, built once at construction. The incoming coordinates are
/// replaced.
#[derive(Debug, Clone)]
pub struct PathTrace {
    provider: Arc<dyn PathProvider>,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    table: Arc<ArclengthTable>,
}

/// Native parameter samples and the arclength reached at each.
#[derive(Debug)]
struct ArclengthTable {
    params: Vec<f64>,
    lengths: Vec<f64>,
}

impl ArclengthTable {
    fn build(provider: &dyn PathProvider, samples: usize) -> Self {
        let last = (samples - 1) as f64;
        let params: Vec<f64> = (0..samples).map(|k| k as f64 / last).collect();

        let mut lengths: Vec<f64> = params.iter().map(|&t| provider.length_to(t)).collect();
        lengths[samples - 1] = provider.length();
        // per-sample arclength error can break monotonicity; interp needs it
        for i in 1..lengths.len() {
            lengths[i] = lengths[i].max(lengths[i - 1]);
        }

        Self { params, lengths }
    }

    #[cfg(test)]
    pub(crate) fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    fn param_at_length(&self, length: f64) -> f64 {
        interp(length, &self.lengths, &self.params)
    }
}

impl PathTrace {
    pub fn new(provider: Arc<dyn PathProvider>) -> Result<Self> {
        Self::with_samples(provider, DEFAULT_TABLE_SAMPLES)
    }

    /// Build with an explicit arclength table resolution.
    pub fn with_samples(provider: Arc<dyn PathProvider>, samples: usize) -> Result<Self> {
        if samples < 2 {
            return Err(PatternError::invalid(
                "samples",
                format!("need at least 2 table samples, got {samples}"),
            ));
        }
        let length = provider.length();
        if !(length.is_finite() && length > 0.0) {
            return Err(PatternError::invalid(
                "svg_path",
                format!("path length must be positive, got {length}"),
            ));
        }

        let table = Arc::new(ArclengthTable::build(provider.as_ref(), samples));
        Ok(Self {
            provider,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            table,
        })
    }

    pub fn with_placement(mut self, scale: f64, offset_x: f64, offset_y: f64) -> Result<Self> {
        require_finite("scale", scale)?;
        require_finite("offset_x", offset_x)?;
        require_finite("offset_y", offset_y)?;
        self.scale = scale;
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        Ok(self)
    }

    pub fn provider(&self) -> &dyn PathProvider {
        self.provider.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn table_lengths(&self) -> &[f64] {
        self.table.lengths()
    }

    pub(crate) fn apply(&self, _x: &[f64], _y: &[f64], theta: &[f64]) -> Coords {
        let theta_max = theta_max(theta);
        let total_length = self.provider.length();
        theta
            .iter()
            .map(|&t| {
                let target = (t / theta_max) * total_length;
                let native = self.table.param_at_length(target);
                let (px, py) = self.provider.point_at(native);
                (px * self.scale + self.offset_x, py * self.scale + self.offset_y)
            })
            .unzip()
    }
}
