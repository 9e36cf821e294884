use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::ScanConfig;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cannot read directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// List the files directly inside `dir` whose name ends in `.<extension>`.
///
/// Matching is case-sensitive and hidden files are skipped, as a shell glob
/// would. Symlinks to regular files are listed. Subdirectories are not
/// descended into.
pub fn list_images(dir: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    let suffix = format!(".{}", config.extension);

    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    if config.sorted {
        walker = walker.sort_by_file_name();
    }

    let mut images = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;

        // Follows symlinks; dangling links are skipped.
        if !entry.path().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || !name.ends_with(&suffix) {
            continue;
        }

        images.push(entry.into_path());
    }

    log::debug!("Found {} *{} files in {}", images.len(), suffix, dir.display());
    Ok(images)
}
