//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - fitted curves: one letter per model (see [`model_symbol`])

use crate::domain::{CurveFile, ModelKind, Report, SampleSet};
use crate::plot::{model_symbol, sample_curve, split_segments, x_range, y_window};

/// A curve to draw: symbol, legend label and sampled points.
struct Trace {
    symbol: char,
    label: String,
    points: Vec<(f64, f64)>,
}

/// Render a plot for an in-memory run.
pub fn render_ascii_plot(samples: &SampleSet, report: &Report, width: usize, height: usize) -> String {
    let (x_min, x_max) = x_range(samples);
    let traces: Vec<Trace> = report
        .fits
        .iter()
        .map(|fit| Trace {
            symbol: model_symbol(fit.kind()),
            label: legend_label(fit.kind(), report.best),
            points: sample_curve(&fit.model, x_min, x_max, width.max(2)),
        })
        .collect();

    render_plot(samples, &traces, width, height)
}

/// Render a plot from a saved curve JSON file (points plus precomputed grids).
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    let traces: Vec<Trace> = curve
        .fits
        .iter()
        .map(|fit| Trace {
            symbol: model_symbol(fit.model.kind),
            label: legend_label(fit.model.kind, curve.best),
            points: fit
                .grid
                .x
                .iter()
                .zip(&fit.grid.y)
                .map(|(&x, y)| (x, y.unwrap_or(f64::NAN)))
                .collect(),
        })
        .collect();

    render_plot(&curve.points, &traces, width, height)
}

fn legend_label(kind: ModelKind, best: Option<ModelKind>) -> String {
    if best == Some(kind) {
        format!("{} (best)", kind.display_name())
    } else {
        kind.display_name().to_string()
    }
}

fn render_plot(samples: &SampleSet, traces: &[Trace], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(samples);
    let (y_min, y_max) = y_window(samples);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curves first (so points can overlay).
    for trace in traces {
        for segment in split_segments(&trace.points, y_min, y_max) {
            draw_curve(&mut grid, &segment, trace.symbol, (x_min, x_max), (y_min, y_max));
        }
    }

    for (x, y) in samples.iter() {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    // Build final string. We include a small header with ranges and a legend.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n"
    ));

    let mut legend = vec!["o = data".to_string()];
    legend.extend(traces.iter().map(|t| format!("{} = {}", t.symbol, t.label)));
    out.push_str(&format!("Legend: {}\n", legend.join(", ")));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], ch: char, x_span: (f64, f64), y_span: (f64, f64)) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_span.0, x_span.1, width);
        let row = map_y(y, y_span.0, y_span.1, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, ch);
        } else if grid[row][col] == ' ' {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FittedModel, ModelReport, QualityMetrics};

    fn linear_report() -> Report {
        Report {
            fits: vec![ModelReport {
                model: FittedModel::new(ModelKind::Linear, vec![0.0, 1.0]).unwrap(),
                metrics: QualityMetrics { sigma: 0.0, r_squared: 1.0, s: 0.0, r: 1.0, n: 3 },
            }],
            skipped: Vec::new(),
            best: Some(ModelKind::Linear),
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let samples = SampleSet::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();

        let txt = render_ascii_plot(&samples, &linear_report(), 10, 5);
        let expected = concat!(
            "Plot: x=[0.000, 2.000] | y=[-0.500, 2.500]\n",
            "Legend: o = data, L = Linear (best)\n",
            "          \n",
            "       LLo\n",
            "   LLoL   \n",
            "oLL       \n",
            "          \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn undefined_curve_points_are_not_drawn() {
        let samples = SampleSet::new(vec![-1.0, 1.0], vec![0.0, 0.0]).unwrap();
        let report = Report {
            fits: vec![ModelReport {
                model: FittedModel::new(ModelKind::Logarithmic, vec![0.0, 0.0]).unwrap(),
                metrics: QualityMetrics { sigma: f64::NAN, r_squared: f64::NAN, s: f64::NAN, r: 0.0, n: 2 },
            }],
            skipped: Vec::new(),
            best: None,
        };

        let txt = render_ascii_plot(&samples, &report, 11, 5);
        let rows: Vec<&str> = txt.lines().skip(2).collect();
        // The log curve only exists for x > 0: the left half stays empty apart from the data point.
        for row in &rows {
            let left: String = row.chars().take(5).collect();
            assert!(!left.contains('G'), "unexpected curve in left half: {row:?}");
        }
        assert!(rows.iter().any(|r| r.contains('G')));
        assert!(txt.contains("G = Logarithmic\n"));
    }
}
