//! Least-squares fitters, one per model kind.
//!
//! - Linear: closed form from centred sums, so large x offsets keep full precision.
//! - Quadratic / cubic: normal equations built from power sums of the centred and
//!   scaled x, solved by [`solve_linear_system`], then expanded back to powers of x.
//! - Exponential / logarithmic / power: linearized with `ln`, fitted as linear,
//!   then back-transformed. Samples outside the log domain are dropped pairwise
//!   before fitting.
//!
//! Every fitter returns `Err` when the model cannot be fit to the data; the
//! orchestrator treats that as "skip this model".

use nalgebra::{DMatrix, DVector};

use crate::domain::{FittedModel, ModelKind, SampleSet};
use crate::error::FitError;
use crate::math::solve_linear_system;

/// Transform-based fitters need at least this many samples inside the domain.
const MIN_VALID_SAMPLES: usize = 2;

/// Fit a single model kind to the samples.
pub fn fit_model(kind: ModelKind, samples: &SampleSet) -> Result<FittedModel, FitError> {
    match kind {
        ModelKind::Linear => fit_linear(samples),
        ModelKind::Quadratic => fit_polynomial(samples, ModelKind::Quadratic),
        ModelKind::Cubic => fit_polynomial(samples, ModelKind::Cubic),
        ModelKind::Exponential => fit_exponential(samples),
        ModelKind::Logarithmic => fit_logarithmic(samples),
        ModelKind::Power => fit_power(samples),
    }
}

/// `f(x) = a + b·x`.
pub fn fit_linear(samples: &SampleSet) -> Result<FittedModel, FitError> {
    let (a, b) = linear_least_squares(samples.x(), samples.y())?;
    FittedModel::new(ModelKind::Linear, vec![a, b])
}

/// `f(x) = a + b·x + c·x²` or `f(x) = a + b·x + c·x² + d·x³`.
pub fn fit_polynomial(samples: &SampleSet, kind: ModelKind) -> Result<FittedModel, FitError> {
    debug_assert!(matches!(kind, ModelKind::Quadratic | ModelKind::Cubic));
    let k = kind.coeff_len();

    let distinct = count_distinct(samples.x());
    if distinct < k {
        return Err(FitError::Underdetermined { distinct, k });
    }

    // Fit in t = (x - centre) / scale, which keeps the power sums near 1.
    let centre = crate::math::mean(samples.x());
    let scale = samples.x().iter().fold(0.0_f64, |acc, &x| acc.max((x - centre).abs()));
    let t: Vec<f64> = samples.x().iter().map(|&x| (x - centre) / scale).collect();

    let (a, b) = normal_equations(&t, samples.y(), k);
    let beta = solve_linear_system(&a, &b)?;
    FittedModel::new(kind, expand_shifted(beta.as_slice(), centre, scale))
}

/// `f(x) = a·e^(b·x)`, fitted as `ln y = ln a + b·x` over samples with `y > 0`.
pub fn fit_exponential(samples: &SampleSet) -> Result<FittedModel, FitError> {
    let (x, ln_y) = samples.filter_map_pairs(|_, y| y > 0.0, |x, y| (x, y.ln()));
    ensure_enough_valid(x.len())?;

    let (intercept, slope) = linear_least_squares(&x, &ln_y)?;
    FittedModel::new(ModelKind::Exponential, vec![intercept.exp(), slope])
}

/// `f(x) = a + b·ln x`, fitted over samples with `x > 0`.
pub fn fit_logarithmic(samples: &SampleSet) -> Result<FittedModel, FitError> {
    let (ln_x, y) = samples.filter_map_pairs(|x, _| x > 0.0, |x, y| (x.ln(), y));
    ensure_enough_valid(ln_x.len())?;

    let (a, b) = linear_least_squares(&ln_x, &y)?;
    FittedModel::new(ModelKind::Logarithmic, vec![a, b])
}

/// `f(x) = a·x^b`, fitted as `ln y = ln a + b·ln x` over samples with `x > 0, y > 0`.
pub fn fit_power(samples: &SampleSet) -> Result<FittedModel, FitError> {
    let (ln_x, ln_y) = samples.filter_map_pairs(|x, y| x > 0.0 && y > 0.0, |x, y| (x.ln(), y.ln()));
    ensure_enough_valid(ln_x.len())?;

    let (intercept, slope) = linear_least_squares(&ln_x, &ln_y)?;
    FittedModel::new(ModelKind::Power, vec![intercept.exp(), slope])
}

/// Closed-form simple linear regression; returns `(intercept, slope)`.
fn linear_least_squares(x: &[f64], y: &[f64]) -> Result<(f64, f64), FitError> {
    if count_distinct(x) < 2 {
        return Err(FitError::SingularMatrix { n: 2 });
    }

    let x_mean = crate::math::mean(x);
    let y_mean = crate::math::mean(y);
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        sxx += dx * dx;
        sxy += dx * (yi - y_mean);
    }

    // n·Σx² − (Σx)² = n·Σ(x − x̄)²; zero only when every x is the same.
    if sxx == 0.0 || !sxx.is_finite() {
        return Err(FitError::SingularMatrix { n: 2 });
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    Ok((intercept, slope))
}

/// Turn coefficients of `Σ β_j·((x − c)/s)^j` into coefficients of `Σ a_m·x^m`.
fn expand_shifted(beta: &[f64], centre: f64, scale: f64) -> Vec<f64> {
    let mut coeffs = vec![0.0; beta.len()];
    for (j, &bj) in beta.iter().enumerate() {
        let bj = bj / scale.powi(j as i32);
        // (x − c)^j = Σ_m C(j, m)·x^m·(−c)^(j − m)
        let mut binom = 1.0;
        for (m, coeff) in coeffs.iter_mut().enumerate().take(j + 1) {
            *coeff += bj * binom * (-centre).powi((j - m) as i32);
            binom = binom * (j - m) as f64 / (m + 1) as f64;
        }
    }
    coeffs
}

/// Build the `k x k` normal equations for a polynomial with `k` coefficients.
///
/// `A[i][j] = Σ x^(i+j)`, `B[i] = Σ x^i · y`.
fn normal_equations(x: &[f64], y: &[f64], k: usize) -> (DMatrix<f64>, DVector<f64>) {
    let mut power_sums = vec![0.0; 2 * k - 1];
    let mut moments = DVector::zeros(k);

    for (&xi, &yi) in x.iter().zip(y) {
        let mut p = 1.0;
        for (e, sum) in power_sums.iter_mut().enumerate() {
            *sum += p;
            if e < k {
                moments[e] += p * yi;
            }
            p *= xi;
        }
    }

    let a = DMatrix::from_fn(k, k, |i, j| power_sums[i + j]);
    (a, moments)
}

fn count_distinct(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

fn ensure_enough_valid(valid: usize) -> Result<(), FitError> {
    if valid < MIN_VALID_SAMPLES {
        return Err(FitError::InsufficientValidSamples {
            valid,
            required: MIN_VALID_SAMPLES,
        });
    }
    Ok(())
}
