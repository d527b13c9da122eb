//! Command-line parsing for the `approx` least-squares approximation tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the math/fitting code.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

use crate::domain::ModelKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "approx", version, about = "Least-squares approximation of 2-D point sets")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit every model to a point set, print metrics and the best model, optionally plot/export.
    Fit(FitArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Generate a noisy sample of a known model (text `x y` lines).
    Sample(SampleArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "points"])))]
pub struct FitArgs {
    /// Points file: whitespace-separated `x y` lines or CSV (`-` reads stdin).
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Inline points: "x1 y1 x2 y2 ...".
    #[arg(short = 'p', long, value_name = "LIST", allow_hyphen_values = true)]
    pub points: Option<String>,

    /// Fit only these models (comma-separated). Default: all six.
    #[arg(long, value_enum, value_delimiter = ',')]
    pub only: Vec<ModelKind>,

    /// Decimal places for displayed coefficients.
    #[arg(short = 'd', long, default_value_t = 4)]
    pub decimals: u32,

    /// Skip the terminal plot (shown by default).
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Evenly spaced points per curve in exports and the SVG plot.
    #[arg(long, default_value_t = crate::plot::DEFAULT_GRID_POINTS)]
    pub grid_points: usize,

    /// Print the residual table of the best model.
    #[arg(long)]
    pub residuals: bool,

    /// Save the text report to a file.
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Export points + fitted curves to JSON.
    #[arg(long = "export-curve", value_name = "PATH")]
    pub export_curve: Option<PathBuf>,

    /// Write an SVG chart of the points and fitted curves.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `approx fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Model used to generate y values.
    #[arg(short = 'm', long, value_enum)]
    pub model: ModelKind,

    /// Model coefficients, comma-separated (a,b[,c[,d]]).
    #[arg(short = 'c', long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub coeffs: Vec<f64>,

    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub count: usize,

    /// Lower end of the x range.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Upper end of the x range.
    #[arg(long, default_value_t = 4.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Standard deviation of the Gaussian noise added to y.
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write points to a file instead of stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_requires_an_input() {
        assert!(Cli::try_parse_from(["approx", "fit"]).is_err());
        assert!(Cli::try_parse_from(["approx", "fit", "-f", "a.txt", "-p", "1 2"]).is_err());
    }

    #[test]
    fn fit_parses_model_subset_and_flags() {
        let cli = Cli::try_parse_from([
            "approx", "-vv", "fit", "--points", "-1 2 3 4", "--only", "cubic,linear", "--no-plot", "--decimals", "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.points.as_deref(), Some("-1 2 3 4"));
        assert_eq!(args.only, vec![ModelKind::Cubic, ModelKind::Linear]);
        assert!(args.no_plot);
        assert_eq!(args.decimals, 2);
        assert_eq!(args.grid_points, 500);
    }

    #[test]
    fn sample_parses_negative_coefficients() {
        let cli = Cli::try_parse_from(["approx", "sample", "--model", "quadratic", "--coeffs", "1,-2.5,0.5"]).unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.model, ModelKind::Quadratic);
        assert_eq!(args.coeffs, vec![1.0, -2.5, 0.5]);
        assert_eq!(args.count, 50);
        assert_eq!(args.seed, 42);
    }
}
