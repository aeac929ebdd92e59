//! Folio - render diagram descriptions and bind them into a PDF.
//!
//! A run has three strictly sequential stages:
//!
//! 1. **Emit**: each diagram description is written to `<name>.mmd`.
//! 2. **Render**: an external renderer rasterizes each description to
//!    `page<N>-<name>.png`. The first failure abandons the stage.
//! 3. **Compose**: every rendered image that exists becomes one titled,
//!    centered page of a single PDF document.
//!
//! Stage failures that a user can act on (renderer missing, renderer error,
//! PDF support not compiled in) are returned as a [`RunOutcome`]; only
//! filesystem and configuration problems are [`FolioError`]s.

pub mod compose;
pub mod config;
pub mod diagram;
pub mod emit;
pub mod render;

mod error;
#[cfg(feature = "pdf")]
mod pdf;

pub use folio_core::{color, font, geometry, page, placement};

pub use error::FolioError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use compose::{ComposeError, PageComposer, PageEntry};
use config::AppConfig;
use diagram::DiagramSet;
use render::{MermaidCli, RenderError, RenderJob, RenderedImage, Renderer};

/// What a pipeline run produced.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every diagram rendered and the composer ran.
    Completed {
        /// Rendered images in page order.
        images: Vec<RenderedImage>,
        /// Written document, or `None` when no image could be composed.
        document: Option<PathBuf>,
        /// Titles of the composed pages.
        pages: Vec<String>,
    },
    /// Rendering failed; nothing was composed.
    RenderFailed {
        reason: RenderError,
        /// Description files that were written and can be rendered by hand.
        sources: Vec<PathBuf>,
    },
    /// Every diagram rendered, but this build cannot produce PDF output.
    ComposeUnavailable { images: Vec<RenderedImage> },
}

impl RunOutcome {
    /// Returns true when a document was written.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Completed {
                document: Some(_),
                ..
            }
        )
    }
}

/// Runs the emit, render and compose stages.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use folio::{Pipeline, config::AppConfig};
///
/// let pipeline = Pipeline::new(AppConfig::default());
/// let outcome = pipeline.run(Path::new(".")).expect("I/O failure");
/// println!("success: {}", outcome.is_success());
/// ```
pub struct Pipeline {
    config: AppConfig,
    renderer: Box<dyn Renderer>,
    diagrams: Option<DiagramSet>,
}

impl Pipeline {
    /// Creates a pipeline that renders with the Mermaid CLI configured in `config`.
    pub fn new(config: AppConfig) -> Self {
        let renderer = Box::new(MermaidCli::new(config.renderer()));
        Self {
            config,
            renderer,
            diagrams: None,
        }
    }

    /// Replaces the renderer.
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Replaces the diagram set that would otherwise be loaded from the configuration.
    pub fn with_diagrams(mut self, diagrams: DiagramSet) -> Self {
        self.diagrams = Some(diagrams);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolves the diagram set this pipeline will process.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::DiagramSource`] if a configured source cannot be read.
    pub fn diagrams(&self) -> Result<DiagramSet, FolioError> {
        match &self.diagrams {
            Some(diagrams) => Ok(diagrams.clone()),
            None => DiagramSet::load(&self.config),
        }
    }

    /// Runs all stages with every artifact placed in `dir`.
    ///
    /// Equivalent to [`prepare`](Self::prepare) followed by
    /// [`PreparedRun::finish`].
    ///
    /// # Errors
    ///
    /// Returns [`FolioError`] for invalid configuration, unreadable diagram
    /// sources, filesystem failures and undecodable images.
    pub fn run(&self, dir: &Path) -> Result<RunOutcome, FolioError> {
        self.prepare(dir)?.finish()
    }

    /// Validates the configuration and writes the diagram descriptions.
    ///
    /// Nothing is rendered yet; the returned [`PreparedRun`] knows which
    /// description files exist so callers can report them before the
    /// renderer starts.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError`] for invalid configuration, unreadable diagram
    /// sources and filesystem failures.
    pub fn prepare(&self, dir: &Path) -> Result<PreparedRun<'_>, FolioError> {
        self.config.validate()?;
        let diagrams = self.diagrams()?;
        let composer = PageComposer::from_config(&self.config)?;

        fs::create_dir_all(dir)?;

        info!(count = diagrams.len(), dir = dir.display().to_string(); "Writing diagram descriptions");
        let jobs = emit::emit_descriptions(&diagrams, dir)?;

        Ok(PreparedRun {
            pipeline: self,
            composer,
            dir: dir.to_path_buf(),
            jobs,
        })
    }
}

/// A run whose descriptions are on disk, waiting to be rendered and composed.
pub struct PreparedRun<'a> {
    pipeline: &'a Pipeline,
    composer: PageComposer,
    dir: PathBuf,
    jobs: Vec<RenderJob>,
}

impl PreparedRun<'_> {
    /// Returns the render jobs in page order.
    pub fn jobs(&self) -> &[RenderJob] {
        &self.jobs
    }

    /// Returns the written description files in page order.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.jobs
            .iter()
            .map(|job| job.source_path().to_path_buf())
            .collect()
    }

    /// Renders every description and composes the document.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError`] for filesystem failures and undecodable images.
    pub fn finish(self) -> Result<RunOutcome, FolioError> {
        info!(program = self.pipeline.config.renderer().program(); "Rendering diagrams");
        let images = match render::render_all(self.pipeline.renderer.as_ref(), &self.jobs) {
            Ok(images) => images,
            Err(reason) => {
                warn!(err:% = reason; "Skipping document composition");
                return Ok(RunOutcome::RenderFailed {
                    reason,
                    sources: self.source_paths(),
                });
            }
        };

        let entries: Vec<_> = images
            .iter()
            .map(|image| PageEntry::new(image.path(), image.title()))
            .collect();

        info!(pages = entries.len(); "Composing document");
        let document = match self.composer.compose(&entries) {
            Ok(document) => document,
            Err(ComposeError::Unavailable) => {
                return Ok(RunOutcome::ComposeUnavailable { images });
            }
            Err(err) => return Err(err.into()),
        };

        if document.page_count() == 0 {
            warn!("No rendered images found; document not written");
            return Ok(RunOutcome::Completed {
                images,
                document: None,
                pages: Vec::new(),
            });
        }

        let output = self.dir.join(self.pipeline.config.document().output());
        document.write_to(&output)?;
        debug!(bytes = document.bytes().len(); "Document flushed");
        info!(path = output.display().to_string(), pages = document.page_count(); "Document written");

        Ok(RunOutcome::Completed {
            images,
            document: Some(output),
            pages: document.titles().to_vec(),
        })
    }
}
