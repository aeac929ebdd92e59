//! Page composition: one titled page per rendered image.
//!
//! The composer accumulates every page in memory and serializes the
//! document once; nothing touches the output path until
//! [`ComposedDocument::write_to`] is called.
//!
//! PDF output needs the `pdf` cargo feature. Without it,
//! [`PageComposer::compose`] returns [`ComposeError::Unavailable`] and the
//! caller skips the stage.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use folio_core::{
    color::Color, font::StandardFont, geometry::Size, page::PageSize,
    placement::{PlacementError, PlacementRules},
};

use crate::{FolioError, config::AppConfig};

/// Errors produced while composing pages.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("failed to decode image `{}`: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("cannot place image `{}`: {source}", .path.display())]
    Placement {
        path: PathBuf,
        #[source]
        source: PlacementError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("PDF support is not compiled in")]
    Unavailable,
}

/// One page to compose: an image and the title drawn above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    image_path: PathBuf,
    title: String,
}

impl PageEntry {
    pub fn new(image_path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            title: title.into(),
        }
    }

    /// Returns the image path.
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    /// Returns the page title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Title styling and margins shared by all pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStyle {
    rules: PlacementRules,
    font: StandardFont,
    font_size: f32,
    color: Color,
}

impl PageStyle {
    pub fn new(rules: PlacementRules, font: StandardFont, font_size: f32, color: Color) -> Self {
        Self {
            rules,
            font,
            font_size,
            color,
        }
    }

    /// Returns the placement rules.
    pub fn rules(&self) -> PlacementRules {
        self.rules
    }

    /// Returns the title font.
    pub fn font(&self) -> StandardFont {
        self.font
    }

    /// Returns the title font size in points.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the title fill color.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Default for PageStyle {
    fn default() -> Self {
        Self::new(
            PlacementRules::default(),
            StandardFont::HelveticaBold,
            16.0,
            Color::default(),
        )
    }
}

/// A fully composed document held in memory.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    bytes: Vec<u8>,
    titles: Vec<String>,
}

impl ComposedDocument {
    /// Returns the serialized document.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of pages.
    pub fn page_count(&self) -> usize {
        self.titles.len()
    }

    /// Returns the page titles in page order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Writes the document to `path` in one go.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from writing the file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, &self.bytes)
    }
}

/// Lays out rendered images on fixed-size pages.
#[derive(Debug, Clone)]
pub struct PageComposer {
    page_size: PageSize,
    style: PageStyle,
    document_title: Option<String>,
}

impl PageComposer {
    /// Creates a composer for pages of `page_size`.
    pub fn new(page_size: PageSize, style: PageStyle) -> Self {
        Self {
            page_size,
            style,
            document_title: None,
        }
    }

    /// Creates a composer from the document and layout sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Config`] if the title color is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, FolioError> {
        let layout = config.layout();
        let style = PageStyle::new(
            layout.rules(),
            layout.title_font(),
            layout.title_font_size(),
            layout.title_color()?,
        );

        let mut composer = Self::new(config.document().page_size(), style);
        if let Some(title) = config.document().title() {
            composer = composer.with_document_title(title);
        }
        Ok(composer)
    }

    /// Sets the title stored in the document metadata.
    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = Some(title.into());
        self
    }

    /// Returns the page dimensions in points.
    pub fn page_size(&self) -> Size {
        self.page_size.size()
    }

    /// Composes one page per entry whose image exists.
    ///
    /// Entries whose image file is missing are skipped with a warning. The
    /// result may therefore have fewer pages than `entries`, down to zero.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError`] if an existing image cannot be decoded or
    /// placed, or [`ComposeError::Unavailable`] without the `pdf` feature.
    #[cfg(feature = "pdf")]
    pub fn compose(&self, entries: &[PageEntry]) -> Result<ComposedDocument, ComposeError> {
        use image::GenericImageView;
        use log::{debug, info, warn};

        use folio_core::placement;

        use crate::pdf::{PdfBuilder, RasterImage, TitleStyle};

        let page_size = self.page_size();
        let mut builder = PdfBuilder::new(page_size, self.style.font());
        if let Some(title) = &self.document_title {
            builder.set_document_title(title);
        }

        let title_style = TitleStyle::from(&self.style);
        let mut titles = Vec::with_capacity(entries.len());

        for entry in entries {
            let path = entry.image_path();
            if !path.exists() {
                warn!(path = path.display().to_string(); "Image not found, skipping page");
                continue;
            }

            let image = image::open(path).map_err(|err| ComposeError::Image {
                path: path.to_path_buf(),
                source: Box::new(err),
            })?;
            let (width, height) = image.dimensions();
            debug!(path = path.display().to_string(), width, height; "Image decoded");

            let placement = placement::place(
                Size::new(width as f32, height as f32),
                page_size,
                self.style.rules(),
            )
            .map_err(|source| ComposeError::Placement {
                path: path.to_path_buf(),
                source,
            })?;

            let raster = RasterImage::from_image(&image)?;
            builder.add_page(entry.title(), &title_style, placement, &raster);
            titles.push(entry.title().to_string());
        }

        info!(pages = titles.len(); "Document composed");

        Ok(ComposedDocument {
            bytes: builder.finish(),
            titles,
        })
    }

    /// Composes one page per entry whose image exists.
    ///
    /// # Errors
    ///
    /// Always returns [`ComposeError::Unavailable`]: this build has no PDF support.
    #[cfg(not(feature = "pdf"))]
    pub fn compose(&self, _entries: &[PageEntry]) -> Result<ComposedDocument, ComposeError> {
        log::warn!(page_size = self.page_size.name(); "PDF support not compiled in");
        Err(ComposeError::Unavailable)
    }
}
