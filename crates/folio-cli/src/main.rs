//! Folio CLI entry point.

use std::{io, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use folio_cli::{Args, error_adapter::render_report};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Folio");
    debug!(args:?; "Parsed arguments");

    match folio_cli::run(&args, &mut io::stdout()) {
        Ok(report) => {
            print!("{report}");
            if args.strict && !report.is_success() {
                error!("No document was produced");
                process::exit(1);
            }
        }
        Err(err) => {
            let reporter = miette::GraphicalReportHandler::new();
            error!("{}", render_report(&reporter, &err));
            process::exit(1);
        }
    }

    info!("Completed");
}
