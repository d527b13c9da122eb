//! Plotting: terminal (ASCII) and SVG renderings of a run.
//!
//! Both renderers share the same preparation steps:
//! - the x range spans the data (`[min(x), max(x)]`, widened if degenerate)
//! - each model is sampled at evenly spaced points over that range
//! - sampled curves are split into drawable segments, dropping points that are
//!   undefined (NaN/inf) or far outside the data's y range

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;

use crate::domain::{FittedModel, ModelKind, SampleSet};

/// Default number of points used to sample each fitted curve.
pub const DEFAULT_GRID_POINTS: usize = 500;

/// Fraction of the data's y span added above and below for the plot window.
const Y_PAD_FRAC: f64 = 0.25;

/// Sample `model` at `n` evenly spaced points over `[x_min, x_max]` (n >= 2).
pub fn sample_curve(model: &FittedModel, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_min + u * (x_max - x_min);
            (x, model.predict(x))
        })
        .collect()
}

/// Split a sampled curve into runs of drawable points.
///
/// A point is drawable when its y value is finite and inside `[y_min, y_max]`.
/// Non-drawable points break the curve, so no line is drawn across them.
pub fn split_segments(points: &[(f64, f64)], y_min: f64, y_max: f64) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for &(x, y) in points {
        if y.is_finite() && y >= y_min && y <= y_max {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Plot x range: the data span, widened when all x are equal.
pub fn x_range(samples: &SampleSet) -> (f64, f64) {
    let Some(stats) = samples.stats() else {
        return (0.0, 1.0);
    };
    widen_if_flat(stats.x_min, stats.x_max)
}

/// Plot y window: the data span padded on both sides.
pub fn y_window(samples: &SampleSet) -> (f64, f64) {
    let Some(stats) = samples.stats() else {
        return (0.0, 1.0);
    };
    let (lo, hi) = widen_if_flat(stats.y_min, stats.y_max);
    let pad = (hi - lo) * Y_PAD_FRAC;
    (lo - pad, hi + pad)
}

fn widen_if_flat(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < 1e-9 {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

/// Single-character marker used for a model in terminal plots.
pub fn model_symbol(kind: ModelKind) -> char {
    match kind {
        ModelKind::Linear => 'L',
        ModelKind::Quadratic => 'Q',
        ModelKind::Cubic => 'C',
        ModelKind::Exponential => 'E',
        ModelKind::Logarithmic => 'G',
        ModelKind::Power => 'P',
    }
}

/// Colour used for a model in SVG charts.
pub fn model_color_name(kind: ModelKind) -> &'static str {
    match kind {
        ModelKind::Linear => "red",
        ModelKind::Quadratic => "green",
        ModelKind::Cubic => "blue",
        ModelKind::Exponential => "orange",
        ModelKind::Logarithmic => "purple",
        ModelKind::Power => "cyan",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_curve_spans_range_inclusive() {
        let model = FittedModel::new(ModelKind::Linear, vec![1.0, 2.0]).unwrap();
        let pts = sample_curve(&model, 0.0, 4.0, 5);
        assert_eq!(pts, vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0), (4.0, 9.0)]);
        assert_eq!(sample_curve(&model, 0.0, 1.0, 0).len(), 2);
    }

    #[test]
    fn split_segments_breaks_on_undefined_and_out_of_range() {
        let pts = [
            (0.0, f64::NAN),
            (1.0, 1.0),
            (2.0, 2.0),
            (3.0, 100.0),
            (4.0, 3.0),
            (5.0, f64::INFINITY),
        ];
        let segs = split_segments(&pts, 0.0, 10.0);
        assert_eq!(segs, vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(4.0, 3.0)]]);
    }

    #[test]
    fn ranges_widen_when_flat() {
        let samples = SampleSet::new(vec![2.0, 2.0], vec![1.0, 3.0]).unwrap();
        assert_eq!(x_range(&samples), (1.5, 2.5));
        assert_eq!(y_window(&samples), (0.5, 3.5));
    }
}
