//! Error types for Folio operations.
//!
//! This module provides the main error type [`FolioError`]. Only fatal
//! conditions are errors: a missing or failing renderer and missing PDF
//! support are reported through [`RunOutcome`](crate::RunOutcome) instead.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::compose::ComposeError;

/// The main error type for Folio operations.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read diagram source `{}`: {err}", .path.display())]
    DiagramSource {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),
}
