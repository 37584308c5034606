//! Validation orchestration.
//!
//! [`run_audit`] is the main entry-point: it discovers files under a root,
//! validates each one in parallel via [rayon], and aggregates the per-file
//! outcomes into a [`ValidationReport`].

use crate::annotation;
use crate::config::Config;
use crate::discovery::{self, DiscoveryError};
use crate::finding::{FileReport, ValidationReport};
use rayon::prelude::*;
use std::path::Path;

/// Validates every annotation block under `root`.
///
/// # Pipeline
///
/// 1. Discovers files with [`discovery::discover_files`].
/// 2. Reads and validates them **in parallel**. Each file is independent;
///    workers share nothing.
/// 3. Drops files that could not be read as text.
/// 4. Aggregates the remainder, in discovery order, into a
///    [`ValidationReport`].
///
/// # Errors
///
/// Returns [`DiscoveryError::RootNotFound`] when `root` does not exist.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use oxidized_provenance::{audit, config::Config};
///
/// let config = Config::load(None).unwrap();
/// let report = audit::run_audit(Path::new("."), &config).unwrap();
///
/// std::process::exit(if report.valid { 0 } else { 1 });
/// ```
pub fn run_audit(root: &Path, config: &Config) -> Result<ValidationReport, DiscoveryError> {
    tracing::debug!(
        root = %root.display(),
        file_patterns = ?config.scan.file_patterns,
        exclude_patterns = ?config.scan.exclude_patterns,
        "scanning repository"
    );

    let paths = discovery::discover_files(root, &config.scan)?;

    let reports: Vec<FileReport> = paths
        .par_iter()
        .filter_map(|path| discovery::read_source(path))
        .map(|source| {
            let outcome = annotation::validate_file(&source.path, &source.content);
            if !outcome.errors.is_empty() {
                tracing::debug!(
                    file = %source.path.display(),
                    errors = outcome.errors.len(),
                    "annotation errors found"
                );
            }
            FileReport::new(source.path, outcome)
        })
        .collect();

    Ok(ValidationReport::from_files(root, reports))
}
