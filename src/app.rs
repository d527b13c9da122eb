//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads points
//! - runs fitting + model selection
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{Command, FitArgs, PlotArgs, SampleArgs};
use crate::domain::{FitConfig, InputSource, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `approx` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    let summary = crate::report::format_run_summary(&run.ingest, &run.report, config.decimals);
    println!("{summary}");

    if config.residuals {
        if let Some(best) = run.report.best_fit() {
            let residuals = crate::report::compute_residuals(&run.ingest.samples, &best.model)?;
            println!("Residuals ({}):", best.kind().display_name());
            println!("{}", crate::report::format_residual_table(&residuals));
        }
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.ingest.samples,
            &run.report,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.save_report {
        crate::io::export::write_report_text(path, &summary)?;
        info!(path = %path.display(), "saved report");
    }
    if let Some(path) = &config.export_curve {
        let curve = crate::io::curve::build_curve_file(&run.report, &run.ingest.samples, config.grid_points);
        crate::io::curve::write_curve_json(path, &curve)?;
        info!(path = %path.display(), "exported curves");
    }
    if let Some(path) = &config.svg {
        crate::plot::write_svg_plot(
            path,
            &run.ingest.samples,
            &run.report,
            crate::plot::SVG_SIZE,
            config.grid_points,
        )?;
        let colors: Vec<String> = run
            .report
            .fits
            .iter()
            .map(|fit| format!("{} = {}", crate::plot::model_color_name(fit.kind()), fit.kind().display_name()))
            .collect();
        println!("SVG written to {} (black = data, {})", path.display(), colors.join(", "));
    }

    if run.report.best.is_none() {
        return Err(AppError::new(3, "No model could be fit to the given points."));
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);

    println!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let samples = crate::data::generate_sample(&config)?;
    let text = crate::data::format_points(&samples);

    match &args.out {
        Some(path) => {
            crate::io::export::write_report_text(path, &text)?;
            info!(path = %path.display(), points = samples.len(), "wrote sample");
        }
        None => print!("{text}"),
    }
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    let input = match (&args.file, &args.points) {
        (Some(path), None) => InputSource::File(path.clone()),
        (None, Some(points)) => InputSource::Manual(points.clone()),
        _ => return Err(AppError::new(2, "Provide exactly one of --file or --points.")),
    };
    if args.grid_points < 2 {
        return Err(AppError::new(2, "--grid-points must be at least 2."));
    }

    Ok(FitConfig {
        input,
        models: args.only.clone(),
        decimals: args.decimals,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        grid_points: args.grid_points,
        residuals: args.residuals,
        save_report: args.save.clone(),
        export_curve: args.export_curve.clone(),
        svg: args.svg.clone(),
    })
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        model: args.model,
        coefficients: args.coeffs.clone(),
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn fit_args(argv: &[&str]) -> FitArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Fit(args) => args,
            other => panic!("expected fit, got {other:?}"),
        }
    }

    #[test]
    fn fit_config_from_flags() {
        let args = fit_args(&["approx", "fit", "-f", "points.txt", "--no-plot", "--residuals", "--svg", "out.svg"]);
        let config = fit_config_from_args(&args).unwrap();

        assert_eq!(config.input, InputSource::File("points.txt".into()));
        assert!(config.models.is_empty());
        assert!(!config.plot);
        assert!(config.residuals);
        assert_eq!(config.decimals, 4);
        assert_eq!(config.svg.as_deref(), Some(std::path::Path::new("out.svg")));
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let args = fit_args(&["approx", "fit", "-p", "1 2 3 4", "--grid-points", "1"]);
        assert_eq!(fit_config_from_args(&args).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn plot_is_on_unless_disabled() {
        let on = fit_config_from_args(&fit_args(&["approx", "fit", "-p", "1 2 3 4"])).unwrap();
        assert!(on.plot);
        assert!(Cli::try_parse_from(["approx", "fit", "-p", "1 2 3 4", "--plot"]).is_err());
    }
}
