//! Diagram descriptions and the sets they are grouped in.
//!
//! A [`Diagram`] is opaque text in the renderer's input syntax, plus the name
//! used for its files and the title drawn above it. Folio never inspects the
//! text; it is written to disk and handed to the renderer as-is.

use std::fs;

use log::debug;

use crate::{FolioError, config::AppConfig};

const SITEMAP_SOURCE: &str = include_str!("../assets/sitemap.mmd");
const HOMEPAGE_SOURCE: &str = include_str!("../assets/homepage.mmd");

/// File extension of diagram description files.
pub const SOURCE_EXTENSION: &str = "mmd";

/// File extension of rendered images.
pub const IMAGE_EXTENSION: &str = "png";

/// A named diagram description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    name: String,
    title: String,
    source: String,
}

impl Diagram {
    /// Creates a diagram from its name, page title and description text.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            source: source.into(),
        }
    }

    /// Returns the diagram name, used as the file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// File name of the description, e.g. `sitemap.mmd`.
    pub fn source_file_name(&self) -> String {
        format!("{}.{SOURCE_EXTENSION}", self.name)
    }

    /// File name of the rendered image for the page at 1-based `position`,
    /// e.g. `page1-sitemap.png`.
    pub fn image_file_name(&self, position: usize) -> String {
        format!("page{position}-{}.{IMAGE_EXTENSION}", self.name)
    }
}

/// Ordered diagrams, one page each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSet {
    diagrams: Vec<Diagram>,
}

impl DiagramSet {
    /// Creates a set from diagrams in page order.
    pub fn new(diagrams: Vec<Diagram>) -> Self {
        Self { diagrams }
    }

    /// The bundled site structure map and homepage wireframe.
    pub fn builtin() -> Self {
        Self::new(vec![
            Diagram::new(
                "sitemap",
                "Color Cocktail Factory - Site Structure Map",
                SITEMAP_SOURCE,
            ),
            Diagram::new(
                "homepage",
                "Homepage Structure - Above Fold to Footer",
                HOMEPAGE_SOURCE,
            ),
        ])
    }

    /// Loads the diagrams named in `config`, or the built-in set when none are configured.
    ///
    /// Relative source paths are read as given; see [`AppConfig::with_source_base`].
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::DiagramSource`] if a source file cannot be read.
    pub fn load(config: &AppConfig) -> Result<Self, FolioError> {
        if config.diagrams().is_empty() {
            debug!("Using built-in diagram set");
            return Ok(Self::builtin());
        }

        let diagrams = config
            .diagrams()
            .iter()
            .map(|entry| {
                debug!(name = entry.name(), path = entry.source().display().to_string(); "Loading diagram source");
                let source = fs::read_to_string(entry.source()).map_err(|err| {
                    FolioError::DiagramSource {
                        path: entry.source().to_path_buf(),
                        err,
                    }
                })?;
                Ok(Diagram::new(entry.name(), entry.title(), source))
            })
            .collect::<Result<Vec<_>, FolioError>>()?;

        Ok(Self::new(diagrams))
    }

    /// Returns an iterator over the diagrams in page order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagram> {
        self.diagrams.iter()
    }

    /// Returns the number of diagrams.
    pub fn len(&self) -> usize {
        self.diagrams.len()
    }

    /// Returns true if the set has no diagrams.
    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::config::DiagramConfig;

    use super::*;

    #[test]
    fn test_builtin_set() {
        let set = DiagramSet::builtin();
        let names: Vec<_> = set.iter().map(Diagram::name).collect();
        assert_eq!(names, ["sitemap", "homepage"]);

        let titles: Vec<_> = set.iter().map(Diagram::title).collect();
        assert_eq!(
            titles,
            [
                "Color Cocktail Factory - Site Structure Map",
                "Homepage Structure - Above Fold to Footer",
            ]
        );
    }

    #[test]
    fn test_builtin_sources_are_mermaid_graphs() {
        for diagram in DiagramSet::builtin().iter() {
            assert!(diagram.source().trim_start().starts_with("graph TB"));
        }
    }

    #[test]
    fn test_file_names() {
        let diagram = Diagram::new("sitemap", "Map", "graph TB");
        assert_eq!(diagram.source_file_name(), "sitemap.mmd");
        assert_eq!(diagram.image_file_name(1), "page1-sitemap.png");
    }

    #[test]
    fn test_load_without_entries_is_builtin() {
        let set = DiagramSet::load(&AppConfig::default()).unwrap();
        assert_eq!(set, DiagramSet::builtin());
    }

    #[test]
    fn test_load_reads_sources() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "graph LR\n  A --> B\n").unwrap();

        let config = AppConfig::default().with_diagrams(vec![DiagramConfig::new(
            "flow",
            "Flow",
            file.path(),
        )]);
        let set = DiagramSet::load(&config).unwrap();

        assert_eq!(set.len(), 1);
        let diagram = set.iter().next().unwrap();
        assert_eq!(diagram.name(), "flow");
        assert_eq!(diagram.source(), "graph LR\n  A --> B\n");
    }

    #[test]
    fn test_load_missing_source() {
        let config = AppConfig::default().with_diagrams(vec![DiagramConfig::new(
            "gone",
            "Gone",
            "/nonexistent/folio/gone.mmd",
        )]);
        let err = DiagramSet::load(&config).unwrap_err();
        assert!(matches!(err, FolioError::DiagramSource { .. }));
    }
}
