use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::checker::Checker;
use crate::config::Config;
use crate::error::Error;
use crate::report::Reporter;
use crate::types::{ExternalLink, posix_display};

/// Fail fast on a root that is missing or, for directories, cannot be listed.
///
/// # Errors
///
/// Returns `Error::RootUnavailable` naming the root.
fn ensure_root_is_readable(root: &Path) -> Result<(), Error> {
    let unavailable = |source| return Error::RootUnavailable { path: root.to_path_buf(), source };
    let metadata = std::fs::metadata(root).map_err(unavailable)?;
    if metadata.is_dir() {
        std::fs::read_dir(root).map_err(unavailable)?;
    }
    return Ok(());
}

/// Whether a walk entry is a markdown document the config wants scanned.
fn is_scannable_document(entry: &DirEntry, root: &Path, config: &Config) -> bool {
    if !entry.file_type().is_file() {
        return false;
    }
    let path = entry.path();
    let Some(ext) = path.extension().and_then(|e| return e.to_str()) else {
        return false;
    };
    if !config.is_document_extension(ext) {
        return false;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    return config.should_scan(&posix_display(relative));
}

/// Walk every root in order and check each markdown document found.
/// Returns the external links collected across all roots.
///
/// Unlistable directories and unreadable documents go to the reporter and
/// the walk continues with the rest of the tree.
///
/// # Errors
///
/// Returns `Error::RootUnavailable` if a root is missing or is a directory
/// that cannot be listed. Roots are verified before any document is checked.
pub fn scan(
    roots: &[PathBuf],
    config: &Config,
    checker: &Checker,
    reporter: &mut dyn Reporter,
) -> Result<Vec<ExternalLink>, Error> {
    for root in roots {
        ensure_root_is_readable(root)?;
    }

    let mut external = Vec::new();
    for root in roots {
        external.extend(scan_root(root, config, checker, reporter));
    }

    tracing::debug!(roots = roots.len(), external = external.len(), "scan finished");
    return Ok(external);
}

/// Walk one root in file-name order so output is stable across runs.
fn scan_root(root: &Path, config: &Config, checker: &Checker, reporter: &mut dyn Reporter) -> Vec<ExternalLink> {
    let mut external = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Err(e) => {
                reporter.scan_error(&Error::Walk(e));
                continue;
            },
            Ok(entry) => entry,
        };

        if entry.file_type().is_dir() {
            tracing::info!(dir = %posix_display(entry.path()), "entering directory");
            continue;
        }

        if !is_scannable_document(&entry, root, config) {
            continue;
        }

        tracing::info!(file = %posix_display(entry.path()), "checking file");
        match checker.check_document(entry.path(), reporter) {
            Err(e) => reporter.scan_error(&e),
            Ok(links) => external.extend(links),
        }
    }

    return external;
}
