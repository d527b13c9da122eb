//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a run:
//! - the input points
//! - every fitted model (kind + coefficients) with its quality metrics
//! - a precomputed grid per model for quick plotting
//! - the best model, if any
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveFile, CurveFit, CurveGrid, Report, SampleSet};
use crate::error::AppError;
use crate::plot::sample_curve;

/// Assemble a curve file from a finished run.
pub fn build_curve_file(report: &Report, samples: &SampleSet, grid_points: usize) -> CurveFile {
    let (x_min, x_max) = samples
        .stats()
        .map(|s| (s.x_min, s.x_max))
        .unwrap_or((0.0, 1.0));

    let fits = report
        .fits
        .iter()
        .map(|fit| {
            let (x, y): (Vec<f64>, Vec<f64>) =
                sample_curve(&fit.model, x_min, x_max, grid_points).into_iter().unzip();
            CurveFit {
                model: fit.model.clone(),
                metrics: fit.metrics,
                grid: CurveGrid {
                    x,
                    y: y.into_iter().map(|v| v.is_finite().then_some(v)).collect(),
                },
            }
        })
        .collect();

    CurveFile {
        tool: "approx".to_string(),
        generated: chrono::Local::now(),
        points: samples.clone(),
        fits,
        best: report.best,
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}
