//! Invocation of the external diagram renderer.
//!
//! The [`Renderer`] trait turns one description file into one raster image.
//! [`MermaidCli`] implements it by running the Mermaid CLI (`mmdc`) as a
//! blocking subprocess. [`render_all`] drives a renderer over every job and
//! stops at the first failure: either every image is rendered or the whole
//! stage fails.

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::RendererConfig;

/// Errors reported by a [`Renderer`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer `{program}` was not found on the command search path")]
    ToolMissing { program: String },

    #[error("renderer failed on `{diagram}` ({}){}", exit_summary(.code), stderr_suffix(.stderr))]
    Failed {
        diagram: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to start renderer `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

fn exit_summary(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// One description file to rasterize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    name: String,
    title: String,
    source_path: PathBuf,
    image_path: PathBuf,
}

impl RenderJob {
    /// Creates a job reading `source_path` and writing `image_path`.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        source_path: impl Into<PathBuf>,
        image_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            source_path: source_path.into(),
            image_path: image_path.into(),
        }
    }

    /// Returns the diagram name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the page title for the rendered image.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description file path.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Returns the image path the renderer writes to.
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }
}

/// A successfully rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    path: PathBuf,
    title: String,
}

impl RenderedImage {
    /// Returns the image path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the page title for this image.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Rasterizes diagram descriptions.
pub trait Renderer {
    /// Renders `job`'s description file into its image path.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the renderer is unavailable or reports failure.
    fn render(&self, job: &RenderJob) -> Result<(), RenderError>;
}

/// The Mermaid command-line renderer.
///
/// Invoked as `<program> -i <input> -o <output> -w <width> -H <height> -b <background>`.
#[derive(Debug, Clone)]
pub struct MermaidCli {
    program: String,
    width: u32,
    height: u32,
    background: String,
}

impl MermaidCli {
    /// Creates a renderer from the renderer configuration section.
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            program: config.program().to_string(),
            width: config.width(),
            height: config.height(),
            background: config.background().to_string(),
        }
    }

    /// Returns the program that will be executed.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the argument list for `job`.
    pub fn args(&self, job: &RenderJob) -> Vec<OsString> {
        vec![
            "-i".into(),
            job.source_path().as_os_str().to_owned(),
            "-o".into(),
            job.image_path().as_os_str().to_owned(),
            "-w".into(),
            self.width.to_string().into(),
            "-H".into(),
            self.height.to_string().into(),
            "-b".into(),
            self.background.clone().into(),
        ]
    }
}

impl Renderer for MermaidCli {
    fn render(&self, job: &RenderJob) -> Result<(), RenderError> {
        debug!(
            program = self.program,
            input = job.source_path().display().to_string(),
            output = job.image_path().display().to_string();
            "Invoking renderer"
        );

        let output = match Command::new(&self.program).args(self.args(job)).output() {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(RenderError::ToolMissing {
                    program: self.program.clone(),
                });
            }
            Err(source) => {
                return Err(RenderError::Spawn {
                    program: self.program.clone(),
                    source,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(diagram = job.name(), stdout = stdout.trim(); "Renderer output");
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(RenderError::Failed {
                diagram: job.name().to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Renders every job in order, stopping at the first failure.
///
/// The image files are not checked after a successful render; the page
/// composer skips any that are missing.
///
/// # Errors
///
/// Returns the first [`RenderError`]; later jobs are not attempted.
pub fn render_all(
    renderer: &dyn Renderer,
    jobs: &[RenderJob],
) -> Result<Vec<RenderedImage>, RenderError> {
    let mut images = Vec::with_capacity(jobs.len());

    for job in jobs {
        if let Err(err) = renderer.render(job) {
            warn!(diagram = job.name(), err:% = err; "Rendering failed");
            return Err(err);
        }

        info!(diagram = job.name(), image = job.image_path().display().to_string(); "Diagram rendered");
        images.push(RenderedImage {
            path: job.image_path().to_path_buf(),
            title: job.title().to_string(),
        });
    }

    Ok(images)
}
