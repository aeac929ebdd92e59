//! Human-readable output printed on stdout.
//!
//! [`Preamble`] is printed as soon as the descriptions are on disk, so the
//! user sees progress while the renderer runs. [`Report`] follows once the
//! run is over and, when a stage was skipped, tells the user how to finish
//! the job by hand.

use std::{
    fmt::{self, Write as _},
    path::{Path, PathBuf},
};

use folio::{RunOutcome, config::RendererConfig, render::RenderError};

const INSTALL_HINT: &str = "npm install -g @mermaid-js/mermaid-cli";
const REBUILD_HINT: &str = "cargo install folio-cli --features pdf";
const ONLINE_EDITOR: &str = "https://mermaid.live/";

/// Progress lines printed once the descriptions are written, before the
/// renderer runs.
#[derive(Debug)]
pub struct Preamble<'a> {
    sources: &'a [PathBuf],
    program: &'a str,
}

impl<'a> Preamble<'a> {
    pub fn new(sources: &'a [PathBuf], renderer: &'a RendererConfig) -> Self {
        Self {
            sources,
            program: renderer.program(),
        }
    }
}

impl fmt::Display for Preamble<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Description files written:")?;
        for source in self.sources {
            writeln!(f, "   - {}", source.display())?;
        }
        writeln!(f, "Generating diagrams with `{}`...", self.program)?;
        writeln!(f)?;
        writeln!(f, "Note: rendering requires @mermaid-js/mermaid-cli")?;
        writeln!(f, "Install with: {INSTALL_HINT}")?;
        writeln!(f)
    }
}

/// Outcome of a CLI run together with what is needed to describe it.
#[derive(Debug)]
pub struct Report {
    outcome: RunOutcome,
    sources: Vec<PathBuf>,
    width: u32,
    height: u32,
}

impl Report {
    /// Creates a report for `outcome`.
    ///
    /// `sources` are the description files written by the run, in page order.
    pub fn new(outcome: RunOutcome, sources: Vec<PathBuf>, renderer: &RendererConfig) -> Self {
        Self {
            outcome,
            sources,
            width: renderer.width(),
            height: renderer.height(),
        }
    }

    /// Returns the pipeline outcome.
    pub fn outcome(&self) -> &RunOutcome {
        &self.outcome
    }

    /// Returns true when a document was written.
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    fn write_manual_steps(&self, out: &mut String) -> fmt::Result {
        let names: Vec<_> = self.sources.iter().map(|path| file_name(path)).collect();

        let mut steps = vec![format!("Visit {ONLINE_EDITOR}")];
        if let Some((first, rest)) = names.split_first() {
            steps.push(format!("Copy content from {first}"));
            steps.push(format!("Export as PNG ({}x{})", self.width, self.height));
            if !rest.is_empty() {
                steps.push(format!("Repeat for {}", rest.join(", ")));
            }
        }
        steps.push("Combine into PDF using any PDF tool".to_string());

        writeln!(out, "Manual steps:")?;
        for (index, step) in steps.iter().enumerate() {
            writeln!(out, "   {}. {step}", index + 1)?;
        }
        Ok(())
    }

    fn write_outcome(&self, out: &mut String) -> fmt::Result {
        match &self.outcome {
            RunOutcome::Completed {
                images,
                document: Some(document),
                pages,
            } => {
                writeln!(out, "PNG diagrams generated successfully")?;
                writeln!(
                    out,
                    "PDF created: {} ({} pages)",
                    document.display(),
                    pages.len()
                )?;
                writeln!(out)?;
                writeln!(out, "Complete! Files generated:")?;
                for image in images {
                    writeln!(out, "   - {}", image.path().display())?;
                }
                writeln!(out, "   - {}", document.display())
            }
            RunOutcome::Completed { document: None, .. } => {
                writeln!(out, "PNG diagrams generated successfully")?;
                writeln!(out, "No rendered images were found; no PDF was written")?;
                writeln!(out)?;
                self.write_manual_steps(out)
            }
            RunOutcome::RenderFailed { reason, .. } => {
                writeln!(out, "Error: {reason}")?;
                if let RenderError::ToolMissing { .. } = reason {
                    writeln!(out, "Install with: {INSTALL_HINT}")?;
                }
                writeln!(out)?;
                writeln!(out, "Alternative: use the online Mermaid editor.")?;
                self.write_manual_steps(out)
            }
            RunOutcome::ComposeUnavailable { images } => {
                writeln!(out, "PNG diagrams generated successfully")?;
                writeln!(out, "PDF support is not compiled into this build")?;
                writeln!(out, "Rebuild with: {REBUILD_HINT}")?;
                writeln!(out)?;
                writeln!(out, "Files generated:")?;
                for image in images {
                    writeln!(out, "   - {}", image.path().display())?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_outcome(&mut out)?;
        f.write_str(&out)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
