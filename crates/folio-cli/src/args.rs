//! Command-line argument definitions for the Folio CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the artifact directory, configuration
//! file selection, renderer and output overrides, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Folio diagram document tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory receiving descriptions, images and the PDF
    #[arg(short, long, default_value = ".")]
    pub dir: String,

    /// PDF file name, overriding the configured one
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Renderer program, overriding the configured one
    #[arg(long)]
    pub renderer: Option<String>,

    /// Exit with a non-zero status when no document was produced
    #[arg(long)]
    pub strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
