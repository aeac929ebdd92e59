//! Configuration file discovery for the CLI.
//!
//! Lookup order: `--config`, then `folio/config.toml` in the current
//! directory, then `config.toml` in the platform configuration directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use folio::{FolioError, config::AppConfig};

/// Relative path of the project-local configuration file.
const LOCAL_CONFIG: &str = "folio/config.toml";

/// File name looked up in the platform configuration directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration `{}`: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for FolioError {
    fn from(err: ConfigError) -> Self {
        FolioError::Config(err.to_string())
    }
}

/// Find and load the run configuration.
///
/// An explicit path must exist. Otherwise the first existing file among
/// `folio/config.toml` and the platform configuration directory is used,
/// and the built-in defaults apply when neither exists.
///
/// Relative `[[diagrams]]` source paths are resolved against the directory
/// of the file they were read from.
///
/// # Errors
///
/// Returns [`FolioError::Config`] when the explicit file is missing or a
/// file fails to parse, and [`FolioError::Io`] when it cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, FolioError> {
    if let Some(path) = explicit_path {
        return load_config_file(path.as_ref(), "explicit");
    }

    for (origin, candidate) in candidate_paths() {
        if candidate.exists() {
            return load_config_file(&candidate, origin);
        }
        debug!(origin, path = candidate.display().to_string(); "Configuration file not found");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Implicit configuration locations in lookup order.
fn candidate_paths() -> Vec<(&'static str, PathBuf)> {
    let mut candidates = vec![("local", PathBuf::from(LOCAL_CONFIG))];
    match ProjectDirs::from("com", "folio", "folio") {
        Some(dirs) => candidates.push(("system", dirs.config_dir().join(CONFIG_FILE_NAME))),
        None => debug!("Could not determine platform-specific config directory"),
    }
    candidates
}

fn load_config_file(path: &Path, origin: &str) -> Result<AppConfig, FolioError> {
    info!(origin, path = path.display().to_string(); "Loading configuration");

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        Err(err) => return Err(err.into()),
    };

    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.with_source_base(base))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use folio::page::PageSize;

    use super::*;

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(
            &path,
            "[renderer]\nprogram = \"npx-mmdc\"\n\n[document]\npage_size = \"a4\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.renderer().program(), "npx-mmdc");
        assert_eq!(config.renderer().width(), 1200);
        assert_eq!(config.document().page_size(), PageSize::A4);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();

        match err {
            FolioError::Config(message) => assert!(message.contains("absent.toml")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_diagram_sources_resolve_next_to_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(
            &path,
            "[[diagrams]]\nname = \"flow\"\ntitle = \"Flow\"\nsource = \"diagrams/flow.mmd\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(
            config.diagrams()[0].source(),
            dir.path().join("diagrams/flow.mmd")
        );
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[renderer\nprogram = 1").unwrap();

        let err = load_config(Some(&path)).unwrap_err();

        match err {
            FolioError::Config(message) => {
                assert!(message.starts_with("Failed to parse TOML configuration"));
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }
}
