//! Input file discovery for batch runs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::config::DiscoveryConfig;

/// List the files under `dir` accepted by `config`.
///
/// Order is the directory enumeration order unless `sort_by_name` is set.
/// Entries that cannot be inspected are skipped with a warning.
pub fn discover(dir: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(dir, config, &mut files)?;

    if config.sort_by_name {
        files.sort();
    }

    debug!("Discovered {} input files in {}", files.len(), dir.display());
    Ok(files)
}

fn walk(dir: &Path, config: &DiscoveryConfig, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if file_type.is_dir() {
            if config.recursive {
                walk(&path, config, files)?;
            }
        } else if config.matches(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn names(dir: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(dir).unwrap().display().to_string())
            .collect()
    }

    #[test]
    fn test_only_pdf_files_are_listed() {
        let dir = tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "README", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let config = DiscoveryConfig {
            sort_by_name: true,
            ..Default::default()
        };
        let files = discover(dir.path(), &config).unwrap();
        assert_eq!(names(dir.path(), &files), vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_case_sensitive_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.PDF"), b"x").unwrap();
        fs::write(dir.path().join("b.pdf"), b"x").unwrap();

        let config = DiscoveryConfig {
            case_sensitive: true,
            ..Default::default()
        };
        let files = discover(dir.path(), &config).unwrap();
        assert_eq!(names(dir.path(), &files), vec!["b.pdf"]);
    }

    #[test]
    fn test_subdirectories_need_recursive() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("2024")).unwrap();
        fs::write(dir.path().join("2024").join("jan.pdf"), b"x").unwrap();
        fs::write(dir.path().join("top.pdf"), b"x").unwrap();

        let flat = discover(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(names(dir.path(), &flat), vec!["top.pdf"]);

        let config = DiscoveryConfig {
            recursive: true,
            sort_by_name: true,
            ..Default::default()
        };
        let nested = discover(dir.path(), &config).unwrap();
        assert_eq!(nested.len(), 2);
        assert!(nested.contains(&dir.path().join("2024").join("jan.pdf")));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let result = discover(&dir.path().join("nope"), &DiscoveryConfig::default());
        assert!(result.is_err());
    }
}
