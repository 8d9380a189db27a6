use std::time::Instant;

use crate::angle::AngleSequence;
use crate::chain::TransformChain;
use crate::errors::{Result, Warning};
use crate::models::Polyline;
use crate::transforms::Placement;

/// One chain plus where to put its output.
#[derive(Debug, Clone)]
pub struct PatternInstance {
    pub name: String,
    pub chain: TransformChain,
    pub placement: Placement,
}

impl PatternInstance {
    pub fn new(name: impl Into<String>, chain: TransformChain) -> Self {
        Self {
            name: name.into(),
            chain,
            placement: Placement::default(),
        }
    }

    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPattern {
    pub name: String,
    pub polyline: Polyline,
    pub warnings: Vec<Warning>,
}

/// θ sweep, transform chain, then placement.
pub fn render_pattern(instance: &PatternInstance, resolution: usize) -> Result<RenderedPattern> {
    let started = Instant::now();
    instance.placement.validate()?;

    let warnings = instance.chain.diagnostics();
    for warning in &warnings {
        log::warn!("pattern `{}`: {}", instance.name, warning);
    }

    let theta = AngleSequence::new(instance.chain.rotations() as f64, resolution)?;
    let (x, y) = instance.chain.run(theta.as_slice())?;
    let (x, y) = instance.placement.apply_points(&x, &y);
    let polyline: Polyline = x.into_iter().zip(y).collect();

    log::debug!(
        "rendered `{}`: {} transforms, {} points in {:?}",
        instance.name,
        instance.chain.transforms().len(),
        polyline.len(),
        started.elapsed()
    );

    Ok(RenderedPattern {
        name: instance.name.clone(),
        polyline,
        warnings,
    })
}

/// Render independent patterns. A failure only affects its own entry.
pub fn render_all(instances: &[PatternInstance], resolution: usize) -> Vec<Result<RenderedPattern>> {
    #[cfg(feature = "parallel")]
    let results: Vec<_> = {
        use rayon::prelude::*;
        instances
            .par_iter()
            .map(|instance| render_pattern(instance, resolution))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = instances
        .iter()
        .map(|instance| render_pattern(instance, resolution))
        .collect();

    for (instance, result) in instances.iter().zip(&results) {
        if let Err(e) = result {
            log::warn!("pattern `{}` failed: {}", instance.name, e);
        }
    }
    results
}
