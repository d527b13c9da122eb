//! SVG chart of a run using `plotters`.
//!
//! The chart shows the data as black dots and every fitted model as a coloured
//! line over `[min(x), max(x)]`; the best model is drawn thicker. No text is
//! drawn, so no font support is needed. The terminal report carries the legend.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::{ModelKind, Report, SampleSet};
use crate::error::AppError;
use crate::plot::{sample_curve, split_segments, x_range, y_window};

/// Default chart size in pixels.
pub const SVG_SIZE: (u32, u32) = (800, 600);

const ORANGE: RGBColor = RGBColor(255, 165, 0);
const PURPLE: RGBColor = RGBColor(128, 0, 128);

fn model_color(kind: ModelKind) -> RGBColor {
    match kind {
        ModelKind::Linear => RED,
        ModelKind::Quadratic => GREEN,
        ModelKind::Cubic => BLUE,
        ModelKind::Exponential => ORANGE,
        ModelKind::Logarithmic => PURPLE,
        ModelKind::Power => CYAN,
    }
}

/// Write an SVG chart of the samples and all fitted models.
pub fn write_svg_plot(
    path: &Path,
    samples: &SampleSet,
    report: &Report,
    size: (u32, u32),
    grid_points: usize,
) -> Result<(), AppError> {
    let (x_min, x_max) = x_range(samples);
    let (y_min, y_max) = y_window(samples);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(draw_error)?;

    chart
        .plotting_area()
        .draw(&Rectangle::new([(x_min, y_min), (x_max, y_max)], BLACK.stroke_width(1)))
        .map_err(draw_error)?;

    if y_min < 0.0 && y_max > 0.0 {
        chart
            .draw_series(LineSeries::new([(x_min, 0.0), (x_max, 0.0)], BLACK.mix(0.3).stroke_width(1)))
            .map_err(draw_error)?;
    }

    for fit in &report.fits {
        let width = if report.best == Some(fit.kind()) { 3 } else { 1 };
        let style = model_color(fit.kind()).stroke_width(width);
        let curve = sample_curve(&fit.model, x_min, x_max, grid_points);
        for segment in split_segments(&curve, y_min, y_max) {
            chart
                .draw_series(LineSeries::new(segment, style))
                .map_err(draw_error)?;
        }
    }

    chart
        .draw_series(samples.iter().map(|p| Circle::new(p, 3, BLACK.filled())))
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    Ok(())
}

fn draw_error(e: impl std::fmt::Display) -> AppError {
    AppError::new(4, format!("Failed to draw SVG plot: {e}"))
}
