//! Synthetic sample generation from a known model.
//!
//! Used by `approx sample` to produce demo data sets and by tests to check that
//! fitters recover the generating coefficients.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{SampleConfig, SampleSet};
use crate::error::AppError;
use crate::models::predict;

/// Generate `config.count` noisy samples of `config.model`.
///
/// x values are drawn uniformly from `[x_min, x_max]` and sorted; y values are the
/// model prediction plus Gaussian noise with standard deviation `config.noise`.
/// Points where the model is undefined (e.g. logarithmic at `x <= 0`) are redrawn.
pub fn generate_sample(config: &SampleConfig) -> Result<SampleSet, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    if config.coefficients.len() != config.model.coeff_len() {
        return Err(AppError::new(
            2,
            format!(
                "{} needs {} coefficients, got {}.",
                config.model.display_name(),
                config.model.coeff_len(),
                config.coefficients.len()
            ),
        ));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be a finite, non-negative number."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let max_attempts = config.count.saturating_mul(100);
    let mut attempts = 0usize;
    let mut points = Vec::with_capacity(config.count);

    while points.len() < config.count {
        attempts += 1;
        if attempts > max_attempts {
            return Err(AppError::new(
                2,
                format!(
                    "{} is undefined on most of [{}, {}].",
                    config.model.display_name(),
                    config.x_min,
                    config.x_max
                ),
            ));
        }

        let x = rng.gen_range(config.x_min..=config.x_max);
        let y = predict(config.model, x, &config.coefficients) + normal.sample(&mut rng);
        if y.is_finite() {
            points.push((x, y));
        }
    }

    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(SampleSet::from_pairs(&points)?)
}

/// Format samples as `x y` lines (the text ingest format).
pub fn format_points(samples: &SampleSet) -> String {
    let mut out = String::new();
    for (x, y) in samples.iter() {
        out.push_str(&format!("{x:.6} {y:.6}\n"));
    }
    out
}
