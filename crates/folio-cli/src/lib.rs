//! CLI logic for the Folio diagram document tool.
//!
//! This module loads configuration, applies command-line overrides and
//! drives one [`Pipeline`] run in the requested directory.

pub mod error_adapter;
pub mod report;

mod args;
mod config;

pub use args::Args;
pub use report::{Preamble, Report};

use std::{io::Write, path::Path};

use log::info;

use folio::{FolioError, Pipeline};

/// Run the Folio CLI application
///
/// Writes the diagram descriptions in `args.dir` and prints the [`Preamble`]
/// to `progress`, then renders the diagrams and composes the PDF. Skipped
/// stages are part of the returned [`Report`], not errors.
///
/// # Errors
///
/// Returns `FolioError` for:
/// - Configuration loading and validation errors
/// - Unreadable diagram sources
/// - File I/O errors, including failures writing to `progress`
/// - Undecodable rendered images
pub fn run(args: &Args, progress: &mut impl Write) -> Result<Report, FolioError> {
    info!(dir = args.dir, output:? = args.output; "Generating diagram document");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(program) = &args.renderer {
        app_config = app_config.with_renderer_program(program);
    }
    if let Some(output) = &args.output {
        app_config = app_config.with_output(output);
    }

    let pipeline = Pipeline::new(app_config);
    let renderer = pipeline.config().renderer();

    let prepared = pipeline.prepare(Path::new(&args.dir))?;
    let sources = prepared.source_paths();
    write!(progress, "{}", Preamble::new(&sources, renderer))?;
    progress.flush()?;

    let outcome = prepared.finish()?;
    info!(success = outcome.is_success(); "Run finished");

    Ok(Report::new(outcome, sources, renderer))
}
