//! Reporting utilities: per-point residuals and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{FittedModel, SampleSet};
use crate::error::AppError;

/// Observed vs fitted value at one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residual {
    pub x: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    pub residual: f64,
}

/// Compute fitted values and residuals for each sample.
pub fn compute_residuals(samples: &SampleSet, model: &FittedModel) -> Result<Vec<Residual>, AppError> {
    let mut out = Vec::with_capacity(samples.len());
    for (x, y_obs) in samples.iter() {
        let y_fit = model.predict(x);
        if !y_fit.is_finite() {
            return Err(AppError::new(
                4,
                format!("Non-finite {} prediction at x = {x}.", model.kind.display_name()),
            ));
        }
        out.push(Residual {
            x,
            y_obs,
            y_fit,
            residual: y_obs - y_fit,
        });
    }
    Ok(out)
}
