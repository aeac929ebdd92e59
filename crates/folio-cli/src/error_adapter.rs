//! Error adapter for converting FolioError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan};

use folio::{FolioError, compose::ComposeError};

/// Adapter giving a [`FolioError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a FolioError);

impl ErrorAdapter<'_> {
    fn help_text(&self) -> Option<&'static str> {
        match self.0 {
            FolioError::Io(_) => Some("check that the output directory exists and is writable"),
            FolioError::Config(_) => Some(
                "valid sections are [renderer], [document], [layout] and [[diagrams]]; \
                 run with --log-level info to see which file was loaded",
            ),
            FolioError::DiagramSource { .. } => {
                Some("relative `source` paths are resolved against the directory of the configuration file")
            }
            FolioError::Compose(ComposeError::Image { .. }) => {
                Some("the rendered image may be truncated; delete it and run again")
            }
            FolioError::Compose(_) => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FolioError::Io(_) => "folio::io",
            FolioError::Config(_) => "folio::config",
            FolioError::DiagramSource { .. } => "folio::diagram_source",
            FolioError::Compose(_) => "folio::compose",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Render `err` as a multi-line miette report.
pub fn render_report(reporter: &GraphicalReportHandler, err: &FolioError) -> String {
    let mut writer = String::new();
    if reporter
        .render_report(&mut writer, &ErrorAdapter(err))
        .is_err()
    {
        // Fall back to the plain message
        return err.to_string();
    }
    writer
}
