//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON / text
//! - reloaded later for plotting

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Paired observations `(x[i], y[i])`.
///
/// Both sequences have the same length and contain only finite values. An empty
/// set is representable; the orchestrator rejects it before fitting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleSet")]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Unchecked wire form of [`SampleSet`]; deserialization goes through [`SampleSet::new`].
#[derive(Deserialize)]
struct RawSampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TryFrom<RawSampleSet> for SampleSet {
    type Error = FitError;

    fn try_from(raw: RawSampleSet) -> Result<Self, Self::Error> {
        SampleSet::new(raw.x, raw.y)
    }
}

impl SampleSet {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, FitError> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch { x: x.len(), y: y.len() });
        }
        if let Some(index) = x.iter().zip(&y).position(|(a, b)| !(a.is_finite() && b.is_finite())) {
            return Err(FitError::NonFiniteInput { index });
        }
        Ok(Self { x, y })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, FitError> {
        let (x, y) = pairs.iter().copied().unzip();
        Self::new(x, y)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Keep only the pairs accepted by `keep`, then map each survivor through `map`.
    ///
    /// A pair is always kept or dropped as a whole. `map` must produce finite
    /// values for every kept pair (e.g. `ln` applied after a positivity filter).
    pub fn filter_map_pairs(
        &self,
        keep: impl Fn(f64, f64) -> bool,
        map: impl Fn(f64, f64) -> (f64, f64),
    ) -> (Vec<f64>, Vec<f64>) {
        self.iter().filter(|&(x, y)| keep(x, y)).map(|(x, y)| map(x, y)).unzip()
    }

    /// Summary stats, or `None` for an empty set.
    pub fn stats(&self) -> Option<DatasetStats> {
        if self.is_empty() {
            return None;
        }
        let (x_min, x_max) = min_max(&self.x);
        let (y_min, y_max) = min_max(&self.y);
        Some(DatasetStats {
            n_points: self.len(),
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Summary stats about the points used for fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Regression model kind.
///
/// Declaration order is the fixed evaluation order; best-model ties go to the
/// earlier kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Linear,
    Quadratic,
    Cubic,
    Exponential,
    Logarithmic,
    Power,
}

impl ModelKind {
    /// All kinds in evaluation order.
    pub const ALL: [ModelKind; 6] = [
        ModelKind::Linear,
        ModelKind::Quadratic,
        ModelKind::Cubic,
        ModelKind::Exponential,
        ModelKind::Logarithmic,
        ModelKind::Power,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Linear => "Linear",
            ModelKind::Quadratic => "Polynomial (degree 2)",
            ModelKind::Cubic => "Polynomial (degree 3)",
            ModelKind::Exponential => "Exponential",
            ModelKind::Logarithmic => "Logarithmic",
            ModelKind::Power => "Power",
        }
    }

    /// Formula template; coefficients are named `a`, `b`, `c`, `d` in order.
    pub fn formula(self) -> &'static str {
        match self {
            ModelKind::Linear => "f(x) = a + b*x",
            ModelKind::Quadratic => "f(x) = a + b*x + c*x^2",
            ModelKind::Cubic => "f(x) = a + b*x + c*x^2 + d*x^3",
            ModelKind::Exponential => "f(x) = a * exp(b*x)",
            ModelKind::Logarithmic => "f(x) = a + b*ln(x)",
            ModelKind::Power => "f(x) = a * x^b",
        }
    }

    /// Number of coefficients the model carries.
    pub fn coeff_len(self) -> usize {
        match self {
            ModelKind::Linear => 2,
            ModelKind::Quadratic => 3,
            ModelKind::Cubic => 4,
            ModelKind::Exponential | ModelKind::Logarithmic | ModelKind::Power => 2,
        }
    }

    /// Position in the fixed evaluation order.
    pub fn order(self) -> usize {
        self as usize
    }
}

/// A fitted model: its kind plus the coefficient tuple.
///
/// Evaluation goes through [`crate::models::predict`]; the struct holds no
/// closures, so it can be compared, cloned and serialized freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFittedModel")]
pub struct FittedModel {
    pub kind: ModelKind,
    pub coefficients: Vec<f64>,
}

#[derive(Deserialize)]
struct RawFittedModel {
    kind: ModelKind,
    coefficients: Vec<f64>,
}

impl TryFrom<RawFittedModel> for FittedModel {
    type Error = FitError;

    fn try_from(raw: RawFittedModel) -> Result<Self, Self::Error> {
        FittedModel::new(raw.kind, raw.coefficients)
    }
}

impl FittedModel {
    /// Build a fitted model, checking the coefficient count and finiteness.
    pub fn new(kind: ModelKind, coefficients: Vec<f64>) -> Result<Self, FitError> {
        if coefficients.len() != kind.coeff_len() {
            return Err(FitError::CoefficientCount {
                expected: kind.coeff_len(),
                got: coefficients.len(),
            });
        }
        if !coefficients.iter().all(|c| c.is_finite()) {
            return Err(FitError::NonFiniteCoefficients);
        }
        Ok(Self { kind, coefficients })
    }

    /// Evaluate the model at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        crate::models::predict(self.kind, x, &self.coefficients)
    }

    /// Coefficients rounded to `decimals` places (for display).
    pub fn rounded_coefficients(&self, decimals: u32) -> Vec<f64> {
        let factor = 10f64.powi(decimals as i32);
        self.coefficients
            .iter()
            .map(|c| (c * factor).round() / factor)
            .collect()
    }
}

/// Goodness-of-fit diagnostics for one model.
///
/// Values may be NaN or infinite when the model is undefined at some sample
/// (e.g. logarithmic at `x <= 0`); such fits are reported but never ranked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Residual standard deviation `sqrt(S / n)`.
    #[serde(with = "nan_as_null")]
    pub sigma: f64,
    /// Coefficient of determination.
    #[serde(with = "nan_as_null")]
    pub r_squared: f64,
    /// Residual sum of squares.
    #[serde(with = "nan_as_null")]
    pub s: f64,
    /// Pearson correlation between observed and predicted y.
    #[serde(with = "nan_as_null")]
    pub r: f64,
    pub n: usize,
}

impl QualityMetrics {
    pub fn is_finite(&self) -> bool {
        self.sigma.is_finite() && self.r_squared.is_finite() && self.s.is_finite() && self.r.is_finite()
    }
}

/// One successful fit inside a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReport {
    pub model: FittedModel,
    pub metrics: QualityMetrics,
}

impl ModelReport {
    pub fn kind(&self) -> ModelKind {
        self.model.kind
    }
}

/// Outcome of one approximation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Successful fits, in evaluation order.
    pub fits: Vec<ModelReport>,
    /// Kinds that could not be fit, and why.
    pub skipped: Vec<(ModelKind, FitError)>,
    /// Highest finite R²; `None` when nothing could be ranked.
    pub best: Option<ModelKind>,
}

impl Report {
    pub fn get(&self, kind: ModelKind) -> Option<&ModelReport> {
        self.fits.iter().find(|f| f.kind() == kind)
    }

    pub fn best_fit(&self) -> Option<&ModelReport> {
        self.best.and_then(|kind| self.get(kind))
    }
}

/// Options for `approx fit`.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: InputSource,
    /// Kinds to attempt (evaluation order is always the fixed one).
    pub models: Vec<ModelKind>,
    /// Decimal places for displayed coefficients.
    pub decimals: u32,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Number of evenly spaced points used to sample each fitted curve.
    pub grid_points: usize,
    /// Print a residual table for the best model.
    pub residuals: bool,

    pub save_report: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
    pub svg: Option<PathBuf>,
}

/// Where the sample points come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Text or CSV file (`-` for stdin).
    File(PathBuf),
    /// Inline `x1 y1 x2 y2 ...` list.
    Manual(String),
}

/// Options for `approx sample`.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub model: ModelKind,
    pub coefficients: Vec<f64>,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of the additive Gaussian noise.
    pub noise: f64,
    pub seed: u64,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated: chrono::DateTime<chrono::Local>,
    pub points: SampleSet,
    pub fits: Vec<CurveFit>,
    pub best: Option<ModelKind>,
}

/// One fitted model with its metrics and a precomputed grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFit {
    pub model: FittedModel,
    pub metrics: QualityMetrics,
    pub grid: CurveGrid,
}

/// Sampled curve; `None` where the model is undefined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<Option<f64>>,
}

/// Serialize non-finite floats as JSON `null` and read `null` back as NaN.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_rejects_mismatched_lengths() {
        let err = SampleSet::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert_eq!(err, FitError::LengthMismatch { x: 2, y: 1 });
    }

    #[test]
    fn sample_set_rejects_non_finite_values() {
        let err = SampleSet::new(vec![1.0, 2.0], vec![1.0, f64::NAN]).unwrap_err();
        assert_eq!(err, FitError::NonFiniteInput { index: 1 });
    }

    #[test]
    fn filtering_keeps_pairs_together() {
        let samples = SampleSet::new(vec![-1.0, 1.0, 2.0, 3.0], vec![5.0, 2.0, 4.0, 6.0]).unwrap();
        let (x, y) = samples.filter_map_pairs(|x, _| x > 0.0, |x, y| (x, y));
        assert_eq!(x, vec![1.0, 2.0, 3.0]);
        assert_eq!(y, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn stats_cover_both_axes() {
        let samples = SampleSet::from_pairs(&[(3.0, -1.0), (-2.0, 4.0), (0.5, 0.0)]).unwrap();
        let stats = samples.stats().unwrap();
        assert_eq!(stats.n_points, 3);
        assert_eq!((stats.x_min, stats.x_max), (-2.0, 3.0));
        assert_eq!((stats.y_min, stats.y_max), (-1.0, 4.0));
        assert!(SampleSet::default().stats().is_none());
    }

    #[test]
    fn rounded_coefficients_use_requested_precision() {
        let model = FittedModel::new(ModelKind::Linear, vec![1.584909, -0.126954]).unwrap();
        assert_eq!(model.rounded_coefficients(4), vec![1.5849, -0.127]);
        assert_eq!(model.rounded_coefficients(1), vec![1.6, -0.1]);
    }

    #[test]
    fn fitted_model_rejects_non_finite_coefficients() {
        let err = FittedModel::new(ModelKind::Power, vec![f64::INFINITY, 1.0]).unwrap_err();
        assert_eq!(err, FitError::NonFiniteCoefficients);
    }

    #[test]
    fn kinds_are_listed_in_evaluation_order() {
        for (i, kind) in ModelKind::ALL.iter().enumerate() {
            assert_eq!(kind.order(), i);
        }
    }

    #[test]
    fn non_finite_metrics_round_trip_through_null() {
        let metrics = QualityMetrics { sigma: f64::NAN, r_squared: 0.5, s: f64::INFINITY, r: 0.1, n: 3 };
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("\"sigma\":null"));
        let back: QualityMetrics = serde_json::from_str(&json).unwrap();
        assert!(back.sigma.is_nan());
        assert!(back.s.is_nan());
        assert_eq!(back.r_squared, 0.5);
    }

    #[test]
    fn fitted_model_checks_coefficient_count() {
        let err = FittedModel::new(ModelKind::Cubic, vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, FitError::CoefficientCount { expected: 4, got: 2 });
    }

    #[test]
    fn deserialization_validates_samples_and_models() {
        let samples: SampleSet = serde_json::from_str(r#"{"x":[1.0,2.0],"y":[3.0,4.0]}"#).unwrap();
        assert_eq!(samples.len(), 2);
        assert!(serde_json::from_str::<SampleSet>(r#"{"x":[1.0,2.0],"y":[3.0]}"#).is_err());

        let model: FittedModel = serde_json::from_str(r#"{"kind":"linear","coefficients":[1.0,2.0]}"#).unwrap();
        assert_eq!(model.kind, ModelKind::Linear);
        assert!(serde_json::from_str::<FittedModel>(r#"{"kind":"cubic","coefficients":[1.0,2.0]}"#).is_err());
    }
}
