//! Shared "fit pipeline" logic.
//!
//! Keeping this in one place avoids duplicating the core workflow
//! (ingest -> fit every model -> select best) between the CLI and tests.

use tracing::info;

use crate::domain::{FitConfig, ModelKind, Report};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_points};

/// All computed outputs of a single `approx fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub report: Report,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    // 1) Read points.
    let ingest = load_points(&config.input)?;
    info!(
        points = ingest.samples.len(),
        skipped_rows = ingest.row_errors.len(),
        "loaded points"
    );

    // 2) Fit the requested models and select the best one.
    let kinds: &[ModelKind] = if config.models.is_empty() {
        &ModelKind::ALL
    } else {
        &config.models
    };
    let report = crate::fit::approximate_with(&ingest.samples, kinds)?;

    Ok(RunOutput { ingest, report })
}
