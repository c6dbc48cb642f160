//! Deletion of matched artifacts.

use super::size::path_size;
use super::types::{DeletionResult, MatchSet};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Matched paths, deduplicated, deepest first.
///
/// Path string length stands in for depth: a child always sorts before
/// its parent.
pub fn deletion_order(matches: &MatchSet) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut paths: Vec<PathBuf> = matches
        .paths()
        .filter(|path| seen.insert(path.as_path()))
        .cloned()
        .collect();
    paths.sort_by(|a, b| {
        b.as_os_str()
            .len()
            .cmp(&a.as_os_str().len())
            .then_with(|| a.cmp(b))
    });
    paths
}

/// Remove every matched item. Failures are collected per item and never stop
/// the remaining removals.
pub fn delete_all(matches: &MatchSet) -> DeletionResult {
    let mut result = DeletionResult::default();

    for path in deletion_order(matches) {
        result.freed += path_size(&path);
        match remove_path(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed"),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "removal failed");
                result.errors.push((path, e.to_string()));
            }
        }
    }

    result
}

fn remove_path(path: &Path) -> io::Result<()> {
    // Already gone with an ancestor directory.
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
