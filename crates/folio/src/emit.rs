//! Writes diagram descriptions to disk for the renderer.

use std::{fs, io, path::Path};

use log::{debug, info};

use crate::{diagram::DiagramSet, render::RenderJob};

/// Writes every diagram's description to `dir/<name>.mmd`, overwriting
/// existing files, and returns one render job per diagram in page order.
///
/// # Errors
///
/// Returns the first I/O error encountered; files written before it stay on disk.
pub fn emit_descriptions(diagrams: &DiagramSet, dir: &Path) -> io::Result<Vec<RenderJob>> {
    let mut jobs = Vec::with_capacity(diagrams.len());

    for (index, diagram) in diagrams.iter().enumerate() {
        let source_path = dir.join(diagram.source_file_name());
        let image_path = dir.join(diagram.image_file_name(index + 1));

        debug!(path = source_path.display().to_string(); "Writing diagram description");
        fs::write(&source_path, diagram.source())?;

        jobs.push(RenderJob::new(
            diagram.name(),
            diagram.title(),
            source_path,
            image_path,
        ));
    }

    info!(count = jobs.len(); "Diagram descriptions written");
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::diagram::Diagram;

    use super::*;

    #[test]
    fn test_writes_one_file_per_diagram() {
        let dir = tempdir().unwrap();
        let set = DiagramSet::new(vec![
            Diagram::new("a", "A", "graph TB\n  X"),
            Diagram::new("b", "B", "graph LR\n  Y"),
        ]);

        let jobs = emit_descriptions(&set, dir.path()).unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].source_path(), dir.path().join("a.mmd"));
        assert_eq!(jobs[0].image_path(), dir.path().join("page1-a.png"));
        assert_eq!(jobs[1].image_path(), dir.path().join("page2-b.png"));
        assert_eq!(jobs[1].title(), "B");
        assert_eq!(
            fs::read_to_string(dir.path().join("b.mmd")).unwrap(),
            "graph LR\n  Y"
        );
    }

    #[test]
    fn test_overwrites_existing_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mmd"), "stale contents that are longer").unwrap();

        let set = DiagramSet::new(vec![Diagram::new("a", "A", "fresh")]);
        emit_descriptions(&set, dir.path()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("a.mmd")).unwrap(), "fresh");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let set = DiagramSet::new(vec![Diagram::new("a", "A", "x")]);
        assert!(emit_descriptions(&set, &missing).is_err());
    }
}
