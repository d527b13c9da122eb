//! Model evaluation for the six regression kinds.
//!
//! Evaluation is a pure function of `(kind, x, coefficients)`, cheap enough to
//! sample a curve at plotting density.

use crate::domain::ModelKind;

/// Predict `f(x)` for the given model kind.
///
/// Logarithmic models return NaN for `x <= 0` instead of panicking; callers such
/// as the plotters skip non-finite values.
///
/// # Panics
/// Panics if `coeffs` is shorter than `kind.coeff_len()`. Fitted models always
/// carry the right number of coefficients.
pub fn predict(kind: ModelKind, x: f64, coeffs: &[f64]) -> f64 {
    match kind {
        ModelKind::Linear => coeffs[0] + coeffs[1] * x,
        ModelKind::Quadratic => coeffs[0] + x * (coeffs[1] + x * coeffs[2]),
        ModelKind::Cubic => coeffs[0] + x * (coeffs[1] + x * (coeffs[2] + x * coeffs[3])),
        ModelKind::Exponential => coeffs[0] * (coeffs[1] * x).exp(),
        ModelKind::Logarithmic => {
            if x > 0.0 {
                coeffs[0] + coeffs[1] * x.ln()
            } else {
                f64::NAN
            }
        }
        ModelKind::Power => coeffs[0] * x.powf(coeffs[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomials_evaluate_in_ascending_powers() {
        assert_eq!(predict(ModelKind::Linear, 2.0, &[1.0, 3.0]), 7.0);
        assert_eq!(predict(ModelKind::Quadratic, 2.0, &[1.0, 2.0, 3.0]), 17.0);
        assert_eq!(predict(ModelKind::Cubic, -1.0, &[1.0, -1.0, 0.0, 2.0]), 0.0);
    }

    #[test]
    fn exponential_and_power() {
        let y = predict(ModelKind::Exponential, 2.0, &[2.0, 0.5]);
        assert!((y - 2.0 * 1.0_f64.exp()).abs() < 1e-12);
        assert!((predict(ModelKind::Power, 4.0, &[3.0, 1.5]) - 24.0).abs() < 1e-12);
    }

    #[test]
    fn logarithmic_outside_domain_is_nan() {
        assert!(predict(ModelKind::Logarithmic, 0.0, &[1.0, 2.0]).is_nan());
        assert!(predict(ModelKind::Logarithmic, -3.0, &[1.0, 2.0]).is_nan());
        assert_eq!(predict(ModelKind::Logarithmic, 1.0, &[1.0, 2.0]), 1.0);
    }
}
