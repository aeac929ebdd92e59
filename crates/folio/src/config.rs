//! Configuration types for Folio runs.
//!
//! This module provides the configuration structures that control how the
//! renderer is invoked, how pages are laid out and which diagrams make up the
//! document. All types implement [`serde::Deserialize`] for loading from
//! external sources, and every field falls back to a default when absent.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`RendererConfig`] - External renderer program and its raster settings.
//! - [`DocumentConfig`] - Output file, paper size and document title.
//! - [`LayoutConfig`] - Margins and title styling on each page.
//! - [`DiagramConfig`] - A diagram description loaded from disk.
//!
//! # Example
//!
//! ```
//! # use folio::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.renderer().program(), "mmdc");
//! assert!(config.validate().is_ok());
//! ```

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use folio_core::{color::Color, font::StandardFont, page::PageSize, placement::PlacementRules};

use crate::FolioError;

/// Top-level configuration combining renderer, document, layout and diagram settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Renderer configuration section.
    #[serde(default)]
    renderer: RendererConfig,

    /// Document configuration section.
    #[serde(default)]
    document: DocumentConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Diagrams replacing the built-in set; empty keeps the built-in set.
    #[serde(default)]
    diagrams: Vec<DiagramConfig>,
}

impl AppConfig {
    /// Returns the renderer configuration.
    pub fn renderer(&self) -> &RendererConfig {
        &self.renderer
    }

    /// Returns the document configuration.
    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the configured diagrams.
    pub fn diagrams(&self) -> &[DiagramConfig] {
        &self.diagrams
    }

    /// Replaces the renderer program.
    pub fn with_renderer_program(mut self, program: impl Into<String>) -> Self {
        self.renderer.program = program.into();
        self
    }

    /// Replaces the output document path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.document.output = output.into();
        self
    }

    /// Replaces the diagram list.
    pub fn with_diagrams(mut self, diagrams: Vec<DiagramConfig>) -> Self {
        self.diagrams = diagrams;
        self
    }

    /// Resolves relative diagram source paths against `base`.
    ///
    /// Configuration loaders call this with the directory of the file the
    /// configuration was read from. Absolute paths are left untouched.
    pub fn with_source_base(mut self, base: &Path) -> Self {
        for diagram in &mut self.diagrams {
            if diagram.source.is_relative() {
                diagram.source = base.join(&diagram.source);
            }
        }
        self
    }

    /// Checks values that deserialize fine but cannot produce a document.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), FolioError> {
        let renderer = &self.renderer;
        if renderer.program.trim().is_empty() {
            return Err(FolioError::Config(
                "renderer program must not be empty".to_string(),
            ));
        }
        if renderer.width == 0 || renderer.height == 0 {
            return Err(FolioError::Config(format!(
                "render size must be positive, got {}x{}",
                renderer.width, renderer.height
            )));
        }
        if renderer.background != "transparent" {
            Color::new(&renderer.background)
                .map_err(|err| FolioError::Config(format!("renderer background: {err}")))?;
        }

        self.layout.title_color()?;

        let layout = &self.layout;
        let page = self.document.page_size.size();
        if !layout.margin.is_finite() || layout.margin < 0.0 {
            return Err(FolioError::Config(format!(
                "margin must be non-negative, got {}",
                layout.margin
            )));
        }
        if layout.margin >= page.width().min(page.height()) {
            return Err(FolioError::Config(format!(
                "margin {} leaves no room on a {} page",
                layout.margin, self.document.page_size
            )));
        }
        if !layout.title_font_size.is_finite() || layout.title_font_size <= 0.0 {
            return Err(FolioError::Config(format!(
                "title font size must be positive, got {}",
                layout.title_font_size
            )));
        }

        if self.document.output.as_os_str().is_empty() {
            return Err(FolioError::Config(
                "document output path must not be empty".to_string(),
            ));
        }

        let mut names = HashSet::with_capacity(self.diagrams.len());
        for diagram in &self.diagrams {
            validate_diagram_name(&diagram.name)?;
            // Names map one-to-one onto `<name>.mmd` files
            if !names.insert(diagram.name.as_str()) {
                return Err(FolioError::Config(format!(
                    "diagram name `{}` is used more than once",
                    diagram.name
                )));
            }
        }

        Ok(())
    }
}

fn validate_diagram_name(name: &str) -> Result<(), FolioError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(FolioError::Config(format!(
            "invalid diagram name `{name}`: names become file names and must not contain path separators"
        )));
    }
    Ok(())
}

/// External renderer settings.
///
/// Defaults match the Mermaid CLI invocation
/// `mmdc -i <in> -o <out> -w 1200 -H 1600 -b white`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    program: String,
    width: u32,
    height: u32,
    background: String,
}

impl RendererConfig {
    /// Returns the renderer program name or path.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the background color passed to the renderer.
    pub fn background(&self) -> &str {
        &self.background
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "mmdc".to_string(),
            width: 1200,
            height: 1600,
            background: "white".to_string(),
        }
    }
}

/// Output document settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    output: PathBuf,
    page_size: PageSize,
    title: Option<String>,
}

impl DocumentConfig {
    /// Returns the output path, relative to the working directory unless absolute.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns the paper size used for every page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the document metadata title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("CCF-Website-Structure.pdf"),
            page_size: PageSize::Letter,
            title: Some("CCF Website Structure".to_string()),
        }
    }
}

/// Page layout settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Total margin per axis, split evenly between both sides.
    margin: f32,
    /// Distance from the top edge to the title baseline.
    title_offset: f32,
    title_font: StandardFont,
    title_font_size: f32,
    title_color: String,
}

impl LayoutConfig {
    /// Returns the placement rules derived from margin and title offset.
    pub fn rules(&self) -> PlacementRules {
        PlacementRules::new(self.margin, self.title_offset)
    }

    /// Returns the font used for page titles.
    pub fn title_font(&self) -> StandardFont {
        self.title_font
    }

    /// Returns the title font size in points.
    pub fn title_font_size(&self) -> f32 {
        self.title_font_size
    }

    /// Returns the parsed title [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Config`] if the configured color string cannot be parsed.
    pub fn title_color(&self) -> Result<Color, FolioError> {
        Color::new(&self.title_color)
            .map_err(|err| FolioError::Config(format!("title color: {err}")))
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: PlacementRules::DEFAULT_MARGIN,
            title_offset: PlacementRules::DEFAULT_TITLE_OFFSET,
            title_font: StandardFont::HelveticaBold,
            title_font_size: 16.0,
            title_color: "black".to_string(),
        }
    }
}

/// A diagram description stored in a file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagramConfig {
    /// File stem for the description and image files.
    name: String,
    /// Title drawn above the diagram.
    title: String,
    /// Path to the diagram description.
    source: PathBuf,
}

impl DiagramConfig {
    /// Creates a diagram entry.
    pub fn new(name: impl Into<String>, title: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            source: source.into(),
        }
    }

    /// Returns the diagram name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the source path.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> AppConfig {
        toml::from_str(toml_src).expect("valid TOML config")
    }

    #[test]
    fn test_defaults_match_mermaid_cli_invocation() {
        let config = AppConfig::default();
        assert_eq!(config.renderer().program(), "mmdc");
        assert_eq!(config.renderer().width(), 1200);
        assert_eq!(config.renderer().height(), 1600);
        assert_eq!(config.renderer().background(), "white");
        assert_eq!(
            config.document().output(),
            Path::new("CCF-Website-Structure.pdf")
        );
        assert_eq!(config.document().page_size(), PageSize::Letter);
        assert_eq!(config.layout().rules(), PlacementRules::default());
        assert_eq!(config.layout().title_font(), StandardFont::HelveticaBold);
        assert_eq!(config.layout().title_font_size(), 16.0);
        assert!(config.diagrams().is_empty());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = parse("");
        assert_eq!(config.renderer().program(), "mmdc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = parse(
            r#"
            [renderer]
            width = 800

            [document]
            page_size = "a4"

            [layout]
            title_font = "Courier-Bold"
            "#,
        );
        assert_eq!(config.renderer().width(), 800);
        assert_eq!(config.renderer().height(), 1600);
        assert_eq!(config.document().page_size(), PageSize::A4);
        assert_eq!(config.layout().title_font(), StandardFont::CourierBold);
        assert_eq!(config.layout().title_font_size(), 16.0);
    }

    #[test]
    fn test_diagram_entries() {
        let config = parse(
            r#"
            [[diagrams]]
            name = "flow"
            title = "Flow"
            source = "docs/flow.mmd"
            "#,
        );
        assert_eq!(
            config.diagrams(),
            &[DiagramConfig::new("flow", "Flow", "docs/flow.mmd")]
        );
    }

    #[test]
    fn test_unknown_page_size_fails_to_parse() {
        let result = toml::from_str::<AppConfig>("[document]\npage_size = \"b5\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let config = parse("[renderer]\nheight = 0");
        assert!(matches!(config.validate(), Err(FolioError::Config(_))));
    }

    #[test]
    fn test_validate_background() {
        assert!(parse("[renderer]\nbackground = \"transparent\"").validate().is_ok());
        assert!(parse("[renderer]\nbackground = \"#F0F0F0\"").validate().is_ok());
        assert!(parse("[renderer]\nbackground = \"plaid\"").validate().is_err());
    }

    #[test]
    fn test_validate_title_color() {
        assert!(parse("[layout]\ntitle_color = \"nope\"").validate().is_err());
    }

    #[test]
    fn test_validate_margin() {
        assert!(parse("[layout]\nmargin = -1.0").validate().is_err());
        assert!(parse("[layout]\nmargin = 612.0").validate().is_err());
        assert!(parse("[layout]\nmargin = 0.0").validate().is_ok());
    }

    #[test]
    fn test_validate_diagram_names() {
        let config =
            AppConfig::default().with_diagrams(vec![DiagramConfig::new("../up", "Up", "up.mmd")]);
        assert!(config.validate().is_err());

        let config = AppConfig::default().with_diagrams(vec![DiagramConfig::new("", "Empty", "e.mmd")]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_repeated_diagram_name() {
        let config = AppConfig::default().with_diagrams(vec![
            DiagramConfig::new("a", "First", "one.mmd"),
            DiagramConfig::new("b", "Second", "two.mmd"),
            DiagramConfig::new("a", "Third", "three.mmd"),
        ]);

        match config.validate() {
            Err(FolioError::Config(message)) => assert!(message.contains("`a`")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_source_base_applies_to_relative_paths_only() {
        let absolute = std::env::temp_dir().join("abs.mmd");
        let config = AppConfig::default()
            .with_diagrams(vec![
                DiagramConfig::new("rel", "Relative", "docs/rel.mmd"),
                DiagramConfig::new("abs", "Absolute", absolute.clone()),
            ])
            .with_source_base(Path::new("project/folio"));

        assert_eq!(
            config.diagrams()[0].source(),
            Path::new("project/folio/docs/rel.mmd")
        );
        assert_eq!(config.diagrams()[1].source(), absolute);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_renderer_program("/opt/mmdc")
            .with_output("out.pdf");
        assert_eq!(config.renderer().program(), "/opt/mmdc");
        assert_eq!(config.document().output(), Path::new("out.pdf"));
    }
}
