//! Command-line parsing for the polynomial regression canvas.
//!
//! Argument parsing and command dispatch stay apart from the fitting and view
//! code: this module only turns flags (and `POLY_*` environment variables)
//! into domain values.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::session::DEFAULT_POINTS;
use crate::data::{ScatterConfig, generate_scatter};
use crate::domain::{
    DEFAULT_GRAPH_STEP, DEFAULT_LERP_WEIGHT, DEFAULT_ORDER, DEFAULT_POINT_RADIUS,
    DEFAULT_POINT_SPACING, PointPos, ViewSettings,
};
use crate::error::AppError;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "poly", version, about = "Interactive polynomial regression in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit points with the mouse and watch the fitted curve follow (default).
    Tui(TuiArgs),
    /// Fit once and print the equation, predictions and an ASCII plot.
    Fit(FitArgs),
}

/// Options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct SessionArgs {
    /// Polynomial order (degree).
    #[arg(short = 'n', long, env = "POLY_ORDER", default_value_t = DEFAULT_ORDER)]
    pub order: usize,

    /// Fraction of the remaining coefficient gap closed per frame, in [0, 1].
    #[arg(long, env = "POLY_LERP_WEIGHT", default_value_t = DEFAULT_LERP_WEIGHT)]
    pub lerp_weight: f64,

    /// World units per point-space unit.
    #[arg(long, env = "POLY_POINT_SPACING", default_value_t = DEFAULT_POINT_SPACING)]
    pub point_spacing: f64,

    /// World units between curve samples.
    #[arg(long, default_value_t = DEFAULT_GRAPH_STEP)]
    pub graph_step: f64,

    /// Point marker radius in world units.
    #[arg(long, default_value_t = DEFAULT_POINT_RADIUS)]
    pub point_radius: f64,

    /// A point as `x,y` (repeatable). Replaces the default points.
    #[arg(short = 'p', long = "point", value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub points: Vec<PointPos>,

    /// Start without points.
    #[arg(long, conflicts_with_all = ["points", "random"])]
    pub empty: bool,

    /// Start with N random points around a hidden low-degree polynomial.
    #[arg(long, value_name = "N", conflicts_with = "points")]
    pub random: Option<usize>,

    /// Seed for random points.
    #[arg(long, env = "POLY_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Write logs to this file.
    #[arg(long, env = "POLY_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl SessionArgs {
    pub fn settings(&self) -> ViewSettings {
        ViewSettings {
            order: self.order,
            lerp_weight: self.lerp_weight,
            point_spacing: self.point_spacing,
            graph_step: self.graph_step,
            point_radius: self.point_radius,
        }
    }

    /// Scatter settings for `--random` and for later regeneration.
    pub fn scatter(&self) -> ScatterConfig {
        ScatterConfig {
            count: self.random.unwrap_or(ScatterConfig::default().count),
            seed: self.seed,
            ..ScatterConfig::default()
        }
    }

    /// Points the session starts with.
    pub fn initial_points(&self) -> Result<Vec<PointPos>, AppError> {
        if self.empty {
            return Ok(Vec::new());
        }
        if self.random.is_some() {
            return Ok(generate_scatter(&self.scatter())?.points);
        }
        if !self.points.is_empty() {
            return Ok(self.points.clone());
        }
        Ok(DEFAULT_POINTS.map(PointPos::from).to_vec())
    }
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Frame period in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub tick_ms: u64,

    /// Camera follow rate in (0, 1]; 1 snaps to the target every frame.
    #[arg(long, default_value_t = 1.0)]
    pub camera_follow: f64,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Print the fitted value at this x (repeatable).
    #[arg(long = "at", value_name = "X", allow_negative_numbers = true)]
    pub at: Vec<f64>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Parse `x,y` into a point-space position.
pub fn parse_point(s: &str) -> Result<PointPos, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid x in `{s}`: {e}"))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid y in `{s}`: {e}"))?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(format!("point `{s}` must be finite"));
    }
    Ok(PointPos::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_accepts_spaces_and_negatives() {
        assert_eq!(parse_point("3,4"), Ok(PointPos::new(3.0, 4.0)));
        assert_eq!(parse_point(" -1.5 , 2e1 "), Ok(PointPos::new(-1.5, 20.0)));
    }

    #[test]
    fn parse_point_rejects_malformed_input() {
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("1,NaN").is_err());
        assert!(parse_point("1,inf").is_err());
    }

    #[test]
    fn fit_command_collects_points_and_abscissas() {
        let cli = Cli::try_parse_from([
            "poly", "fit", "-p", "0,1", "-p", "1,3", "--order", "1", "--at", "-2", "--at", "0.5",
        ])
        .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.session.order, 1);
        assert_eq!(args.at, vec![-2.0, 0.5]);
        assert_eq!(
            args.session.initial_points().unwrap(),
            vec![PointPos::new(0.0, 1.0), PointPos::new(1.0, 3.0)]
        );
    }

    #[test]
    fn default_points_unless_empty() {
        let cli = Cli::try_parse_from(["poly", "tui"]).unwrap();
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(args.session.initial_points().unwrap().len(), DEFAULT_POINTS.len());
        assert_eq!(args.tick_ms, 16);
        assert!(args.session.settings().validate().is_ok());

        let cli = Cli::try_parse_from(["poly", "tui", "--empty"]).unwrap();
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert!(args.session.initial_points().unwrap().is_empty());
    }

    #[test]
    fn random_points_are_seeded() {
        let cli = Cli::try_parse_from(["poly", "fit", "--random", "9", "--seed", "3"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let a = args.session.initial_points().unwrap();
        let b = args.session.initial_points().unwrap();
        assert_eq!(a.len(), 9);
        assert_eq!(a, b);
    }

    #[test]
    fn random_conflicts_with_explicit_points() {
        assert!(Cli::try_parse_from(["poly", "fit", "--random", "3", "-p", "1,1"]).is_err());
    }
}
