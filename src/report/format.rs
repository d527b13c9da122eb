//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (the saved report is exactly this text)

use crate::domain::{ModelReport, Report};
use crate::io::ingest::IngestedData;
use crate::report::Residual;

const COEFF_NAMES: [char; 4] = ['a', 'b', 'c', 'd'];
const SEPARATOR_WIDTH: usize = 30;

/// Format the full run summary: dataset stats, every fit, skipped models, best model.
pub fn format_run_summary(data: &IngestedData, report: &Report, decimals: u32) -> String {
    let mut out = String::new();

    out.push_str("=== approx - least-squares approximation ===\n");
    out.push_str(&format!(
        "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        data.stats.n_points, data.stats.x_min, data.stats.x_max, data.stats.y_min, data.stats.y_max
    ));
    if !data.row_errors.is_empty() {
        out.push_str(&format!(
            "Skipped {} of {} rows:\n",
            data.row_errors.len(),
            data.rows_read
        ));
        for err in &data.row_errors {
            out.push_str(&format!("  line {}: {}\n", err.line, err.message));
        }
    }
    out.push('\n');

    out.push_str(&format_report(report, decimals));
    out
}

/// Format every fit, the skipped models and the best-model line.
pub fn format_report(report: &Report, decimals: u32) -> String {
    let mut out = String::new();

    for fit in &report.fits {
        out.push_str(&format_model(fit, decimals));
        out.push('\n');
    }

    if !report.skipped.is_empty() {
        out.push_str("Not fitted:\n");
        for (kind, reason) in &report.skipped {
            out.push_str(&format!("  {}: {reason}\n", kind.display_name()));
        }
        out.push('\n');
    }

    out.push_str(&format_best(report));
    out
}

/// Format one fitted model.
pub fn format_model(fit: &ModelReport, decimals: u32) -> String {
    let kind = fit.kind();
    let m = &fit.metrics;
    let coeffs: Vec<String> = fit
        .model
        .rounded_coefficients(decimals)
        .iter()
        .zip(COEFF_NAMES)
        .map(|(c, name)| format!("{name} = {c}"))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("{}:\n", kind.display_name()));
    out.push_str(&format!("*  Function: {}\n", kind.formula()));
    out.push_str(&format!("*  Coefficients: {}\n", coeffs.join(", ")));
    out.push_str(&format!("*  Standard deviation: sigma = {:.5}\n", m.sigma));
    out.push_str(&format!("*  Coefficient of determination: R^2 = {:.5}\n", m.r_squared));
    out.push_str(&format!("*  Deviation measure: S = {:.5}\n", m.s));
    out.push_str(&format!("*  Pearson correlation: r = {:.16}\n", m.r));
    if !m.is_finite() {
        out.push_str("*  (model undefined at some points; not ranked)\n");
    }
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');
    out
}

/// Format the best-model line, distinguishing "no model".
pub fn format_best(report: &Report) -> String {
    match report.best_fit() {
        Some(fit) => format!(
            "Best approximation: {} (R^2 = {:.5})\n",
            fit.kind().display_name(),
            fit.metrics.r_squared
        ),
        None if report.fits.is_empty() => "Best approximation: none (no model could be fit)\n".to_string(),
        None => "Best approximation: none (no fitted model has a finite R^2)\n".to_string(),
    }
}

/// Format a residual table (x, observed, fitted, squared residual).
pub fn format_residual_table(residuals: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:>4} {:>12} {:>12} {:>12} {:>14}", "i", "x", "y", "f(x)", "(f(x)-y)^2").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<4} {:-<12} {:-<12} {:-<12} {:-<14}", "", "", "", "", "").trim_end());
    out.push('\n');

    for (i, r) in residuals.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:>12.4} {:>12.4} {:>12.4} {:>14.6}\n",
            i + 1,
            r.x,
            r.y_obs,
            r.y_fit,
            r.residual * r.residual
        ));
    }

    let s: f64 = residuals.iter().map(|r| r.residual * r.residual).sum();
    out.push_str(&format!("Sum of squared residuals: {s:.5}\n"));
    out
}
