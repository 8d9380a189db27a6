use std::f64::consts::TAU;

use crate::errors::{PatternError, Result};

/// Sampling density used by the reference drawings
pub const DEFAULT_RESOLUTION: usize = 50_000;

/// Evenly spaced angle samples from `0` to `2π·rotations`, both ends included.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleSequence {
    values: Vec<f64>,
    rotations: f64,
}

impl AngleSequence {
    pub fn new(rotations: f64, resolution: usize) -> Result<Self> {
        if !rotations.is_finite() || rotations <= 0.0 {
            return Err(PatternError::invalid(
                "rotations",
                format!("must be a positive number, got {rotations}"),
            ));
        }
        if resolution < 2 {
            return Err(PatternError::invalid(
                "resolution",
                format!("need at least 2 samples, got {resolution}"),
            ));
        }

        let end = TAU * rotations;
        let step = end / (resolution - 1) as f64;
        let mut values: Vec<f64> = (0..resolution).map(|i| i as f64 * step).collect();
        // pin the end point instead of trusting i * step
        values[resolution - 1] = end;

        Ok(Self { values, rotations })
    }

    pub fn with_default_resolution(rotations: f64) -> Result<Self> {
        Self::new(rotations, DEFAULT_RESOLUTION)
    }

    pub fn rotations(&self) -> f64 {
        self.rotations
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `2π·rotations`
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}

impl AsRef<[f64]> for AngleSequence {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
