//! Source file discovery.
//!
//! Walks a repository, prunes excluded directories, keeps files whose names
//! match the include patterns, and reads them as UTF-8. Unreadable and
//! non-text files are skipped with a warning rather than failing the run.

use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("path does not exist: {0}")]
    RootNotFound(PathBuf),
}

/// A discovered file and its full text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

/// Lists every file under `root` selected by `scan`, sorted by path.
///
/// Exclusion is applied to path components below `root` only, so scanning a
/// checkout that itself lives under e.g. `build/` still works.
///
/// # Errors
///
/// Returns [`DiscoveryError::RootNotFound`] if `root` does not exist.
pub fn discover_files(root: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::RootNotFound(root.to_path_buf()));
    }

    let files = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, scan))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| scan.matches_file_name(&e.file_name().to_string_lossy()))
        .map(DirEntry::into_path)
        .collect();

    Ok(files)
}

/// Reads `path` as UTF-8 text, returning `None` (and logging) on failure.
pub fn read_source(path: &Path) -> Option<SourceFile> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(file = %path.display(), "could not read file: {e}");
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(content) => Some(SourceFile {
            path: path.to_path_buf(),
            content,
        }),
        Err(_) => {
            tracing::warn!(file = %path.display(), "skipping non-UTF-8 file");
            None
        }
    }
}

fn is_excluded(entry: &DirEntry, scan: &ScanConfig) -> bool {
    // The root itself is never excluded, whatever its name.
    entry.depth() > 0 && scan.is_excluded(&entry.file_name().to_string_lossy())
}
