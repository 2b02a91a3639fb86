//! Top-level application orchestration.
//!
//! `src/main.rs` is tiny; this module is the real entry point that:
//! - loads `.env` and parses CLI arguments
//! - initialises logging
//! - runs the interactive canvas or the one-shot fit

use std::fs::OpenOptions;
use std::path::Path;

use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Command, FitArgs, TuiArgs};
use crate::error::AppError;
use crate::fit::PolynomialRegression;

pub mod scene;
pub mod session;

/// Entry point for the `poly` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `poly` and `poly -n 3` behave like `poly tui ...`. Clap needs the
    // subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Fit(args) => handle_fit(args),
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    // The terminal belongs to the UI: log to a file or not at all.
    if let Some(path) = &args.session.log_file {
        init_file_logging(path)?;
    }
    crate::tui::run(args)
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    match &args.session.log_file {
        Some(path) => init_file_logging(path)?,
        None => init_stderr_logging(),
    }

    let settings = args.session.settings();
    settings.validate()?;

    let points = crate::domain::PointSet::from_positions(args.session.initial_points()?);
    let regression =
        PolynomialRegression::with_points(points.positions(), settings.order, settings.lerp_weight)?;
    info!(
        "fit: points={} order={} degenerate={}",
        points.len(),
        settings.order,
        regression.is_degenerate()
    );

    println!("{}", crate::report::format_run_summary(&points, &regression));

    let residuals = crate::report::compute_residuals(&points, &regression);
    if !residuals.is_empty() {
        println!("{}", crate::report::format_residual_table(&residuals));
    }

    if !args.at.is_empty() {
        println!("{}", crate::report::format_predictions(&regression, &args.at));
    }

    if !args.no_plot {
        let positions: Vec<_> = points.positions().collect();
        let plot = crate::plot::render_ascii_plot(
            &positions,
            regression.coefficients(),
            args.width,
            args.height,
        );
        println!("{plot}");
    }

    Ok(())
}

fn logger() -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp_micros();
    builder
}

fn init_file_logging(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| AppError::new(2, format!("Cannot open log file {}: {e}", path.display())))?;

    logger()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| AppError::new(4, format!("Logger init failed: {e}")))
}

fn init_stderr_logging() {
    // Only warnings by default so stdout stays the report.
    let mut builder = logger();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Warn);
    }
    builder.try_init().ok();
}

/// Rewrite argv so `poly` defaults to `poly tui`.
///
/// Rules:
/// - `poly`                      -> `poly tui`
/// - `poly -n 3 ...`             -> `poly tui -n 3 ...`
/// - `poly --help/--version/-h`  -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "tui");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
