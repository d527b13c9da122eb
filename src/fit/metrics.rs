//! Goodness-of-fit metrics for a fitted model.
//!
//! Given samples `(x_i, y_i)` and predictions `ŷ_i = f(x_i)`:
//!
//! - `S = Σ (y_i - ŷ_i)²`
//! - `σ = sqrt(S / n)`
//! - `R² = 1 - S / S_t`, with `S_t = Σ (y_i - ȳ)²` and `R² = 0` when `S_t = 0`
//! - `r = corr(y, ŷ)`

use crate::domain::{FittedModel, QualityMetrics, SampleSet};
use crate::math::{correlation, mean};

/// Compute quality metrics for `model` over every sample.
pub fn compute_metrics(samples: &SampleSet, model: &FittedModel) -> QualityMetrics {
    let y = samples.y();
    let predicted: Vec<f64> = samples.x().iter().map(|&x| model.predict(x)).collect();
    let n = samples.len();

    let s: f64 = y
        .iter()
        .zip(&predicted)
        .map(|(yi, fi)| (yi - fi).powi(2))
        .sum();
    let sigma = (s / n as f64).sqrt();

    let y_mean = mean(y);
    let s_t: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let r_squared = if s_t == 0.0 { 0.0 } else { 1.0 - s / s_t };

    let r = correlation(y, &predicted);

    QualityMetrics {
        sigma,
        r_squared,
        s,
        r,
        n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelKind;

    #[test]
    fn perfect_fit_has_zero_residual() {
        let samples = SampleSet::new(vec![0.0, 1.0, 2.0], vec![2.0, 5.0, 8.0]).unwrap();
        let model = FittedModel::new(ModelKind::Linear, vec![2.0, 3.0]).unwrap();
        let m = compute_metrics(&samples, &model);
        assert_eq!(m.s, 0.0);
        assert_eq!(m.sigma, 0.0);
        assert_eq!(m.r_squared, 1.0);
        assert!((m.r - 1.0).abs() < 1e-12);
        assert_eq!(m.n, 3);
    }

    #[test]
    fn hand_computed_metrics() {
        // Residuals: 1, -1, 1, -1 -> S = 4, σ = 1.
        let samples = SampleSet::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, -1.0, 1.0, -1.0]).unwrap();
        let model = FittedModel::new(ModelKind::Linear, vec![0.0, 0.0]).unwrap();
        let m = compute_metrics(&samples, &model);
        assert_eq!(m.s, 4.0);
        assert_eq!(m.sigma, 1.0);
        // S_t = 4 as well.
        assert_eq!(m.r_squared, 0.0);
        // Constant prediction -> correlation undefined -> 0.
        assert_eq!(m.r, 0.0);
    }

    #[test]
    fn constant_y_gives_zero_r_squared() {
        let samples = SampleSet::new(vec![1.0, 2.0, 3.0], vec![4.0, 4.0, 4.0]).unwrap();
        let model = FittedModel::new(ModelKind::Linear, vec![3.0, 0.5]).unwrap();
        let m = compute_metrics(&samples, &model);
        assert_eq!(m.r_squared, 0.0);
        assert!(m.s > 0.0);
    }

    #[test]
    fn r_squared_can_be_negative_for_bad_models() {
        let samples = SampleSet::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();
        let model = FittedModel::new(ModelKind::Linear, vec![10.0, -1.0]).unwrap();
        let m = compute_metrics(&samples, &model);
        assert!(m.r_squared < 0.0);
    }

    #[test]
    fn undefined_prediction_propagates_as_non_finite() {
        let samples = SampleSet::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();
        let model = FittedModel::new(ModelKind::Logarithmic, vec![1.0, 1.0]).unwrap();
        let m = compute_metrics(&samples, &model);
        assert!(m.s.is_nan());
        assert!(!m.is_finite());
    }
}
