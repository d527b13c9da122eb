//! Descriptive statistics shared by the fitters and the metrics calculator.
//!
//! Degenerate inputs never raise errors here: an empty slice has mean 0, and a
//! correlation that cannot be computed (length mismatch, zero variance) is 0.

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient of `x` and `y`.
///
/// Returns `0.0` when the lengths differ or either sequence has zero variance.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() {
        return 0.0;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_basic() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-15);
    }

    #[test]
    fn correlation_with_itself_is_one() {
        let x = [0.3, 1.7, 2.2, 5.0, -1.0];
        assert!((correlation(&x, &x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_with_negated_is_minus_one() {
        let x = [1.0, 2.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| -3.0 * v + 1.0).collect();
        assert!((correlation(&x, &y) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_with_constant_is_zero() {
        let x = [1.0, 2.0, 3.0];
        let c = [4.0, 4.0, 4.0];
        assert_eq!(correlation(&x, &c), 0.0);
        assert_eq!(correlation(&c, &x), 0.0);
    }

    #[test]
    fn correlation_of_mismatched_lengths_is_zero() {
        assert_eq!(correlation(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn correlation_matches_hand_value() {
        let r = correlation(&[1.0, 2.0, 3.0], &[2.0, 4.0, 7.0]);
        assert!((r - 0.9933992677987827).abs() < 1e-12);
    }
}
