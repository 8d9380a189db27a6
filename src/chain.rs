use crate::errors::{PatternError, Result, Warning};
use crate::transforms::{Coords, Transform};

/// An ordered list of transforms plus the number of θ turns to sweep.
///
/// Order is part of the pattern: the transforms do not commute in general.
#[derive(Debug, Clone)]
pub struct TransformChain {
    rotations: u32,
    transforms: Vec<Transform>,
}

impl TransformChain {
    pub fn new(rotations: u32, transforms: Vec<Transform>) -> Result<Self> {
        if rotations == 0 {
            return Err(PatternError::invalid(
                "rotations",
                "a pattern needs at least one rotation",
            ));
        }
        Ok(Self {
            rotations,
            transforms,
        })
    }

    /// Append a transform, consuming the chain
    pub fn then(mut self, transform: impl Into<Transform>) -> Self {
        self.transforms.push(transform.into());
        self
    }

    pub fn rotations(&self) -> u32 {
        self.rotations
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn diagnostics(&self) -> Vec<Warning> {
        self.transforms.iter().flat_map(Transform::diagnostics).collect()
    }

    pub fn run(&self, theta: &[f64]) -> Result<Coords> {
        run_chain(&self.transforms, theta)
    }
}

/// Start from the origin and fold the transforms left to right, θ fixed.
pub fn run_chain(transforms: &[Transform], theta: &[f64]) -> Result<Coords> {
    let init = (vec![0.0; theta.len()], vec![0.0; theta.len()]);
    transforms.iter().try_fold(init, |(x, y), transform| {
        log::trace!("applying {} to {} samples", transform.kind(), theta.len());
        transform.apply(&x, &y, theta)
    })
}
