//! Vista CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use vista::VistaError;
use vista_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Panics get miette's report format too
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);

    info!("Starting Vista");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = vista_cli::run(&args) {
        report(&err);
        process::exit(1);
    }

    info!("Completed successfully");
}

/// Start `env_logger`, with `--log-level` taking precedence over `RUST_LOG`.
fn init_logging(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(log_level:?; "Logger initialized");
}

/// Render every diagnostic of `err` as its own miette report.
fn report(err: &VistaError) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }
}
