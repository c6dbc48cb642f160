//! Scan root detection.

use std::path::{Path, PathBuf};

/// Nearest ancestor of `start` (inclusive) containing a `.git` directory,
/// or `start` itself when there is none.
pub fn find_repo_root(start: &Path) -> PathBuf {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

    start
        .ancestors()
        .find(|dir| dir.join(".git").is_dir())
        .map(Path::to_path_buf)
        .unwrap_or(start)
}
