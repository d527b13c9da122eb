//! Fit orchestration and best-model selection.
//!
//! The orchestrator fits each requested model kind in the fixed evaluation order
//! and computes its quality metrics:
//!
//! - a kind that cannot be fit is recorded in `Report::skipped` and the run goes on
//! - the best model is the one with the highest finite R²
//! - ties keep the earliest kind in evaluation order
//! - if nothing can be ranked, `Report::best` is `None`
//!
//! Only an empty sample set fails the whole run.

use tracing::{debug, info};

use crate::domain::{ModelKind, ModelReport, Report, SampleSet};
use crate::error::FitError;
use crate::fit::fitter::fit_model;
use crate::fit::metrics::compute_metrics;

/// Fit all six model kinds.
pub fn approximate(samples: &SampleSet) -> Result<Report, FitError> {
    approximate_with(samples, &ModelKind::ALL)
}

/// Fit the given model kinds.
///
/// `kinds` selects which models to attempt; they are always run in evaluation
/// order and duplicates are ignored.
pub fn approximate_with(samples: &SampleSet, kinds: &[ModelKind]) -> Result<Report, FitError> {
    if samples.is_empty() {
        return Err(FitError::EmptyInput);
    }

    let mut fits = Vec::new();
    let mut skipped = Vec::new();

    for kind in ModelKind::ALL.into_iter().filter(|k| kinds.contains(k)) {
        match fit_model(kind, samples) {
            Ok(model) => {
                let metrics = compute_metrics(samples, &model);
                debug!(
                    model = kind.display_name(),
                    coefficients = ?model.coefficients,
                    r_squared = metrics.r_squared,
                    sigma = metrics.sigma,
                    "fitted model"
                );
                fits.push(ModelReport { model, metrics });
            }
            Err(err) => {
                debug!(model = kind.display_name(), error = %err, "model skipped");
                skipped.push((kind, err));
            }
        }
    }

    let best = select_best(&fits);
    match best {
        Some(kind) => info!(model = kind.display_name(), "best approximation selected"),
        None => info!("no model could be ranked"),
    }

    Ok(Report { fits, skipped, best })
}

/// Pick the fit with the highest finite R².
///
/// `fits` must be in evaluation order; a strictly greater R² is required to
/// replace the current best, so ties favour the earlier kind.
pub fn select_best(fits: &[ModelReport]) -> Option<ModelKind> {
    let mut best: Option<&ModelReport> = None;
    for fit in fits {
        let r2 = fit.metrics.r_squared;
        if !r2.is_finite() {
            continue;
        }
        match best {
            Some(current) if r2 <= current.metrics.r_squared => {}
            _ => best = Some(fit),
        }
    }
    best.map(ModelReport::kind)
}
