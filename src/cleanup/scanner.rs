//! Single-pass artifact scan.
//!
//! The walk is depth-first and sorted by name. Version-control metadata is
//! never entered. A directory matching a rule is recorded once and its
//! contents are never visited, so nothing beneath it is matched or counted
//! twice. That holds even when an exclude glob drops the directory: the
//! exclusion protects the whole subtree.
//!
//! Symlinks are never followed and never match directory rules, so a linked
//! `node_modules` (pnpm, workspaces) is left alone. A symlink can still match
//! a file rule; deleting it removes only the link.

use super::rules::RuleSet;
use super::size::path_size;
use super::types::MatchSet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Metadata directories of version-control systems.
pub const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn", ".jj"];

/// Scan `root` and group every artifact found by category.
pub fn scan(root: &Path, rules: &RuleSet) -> MatchSet {
    let mut matches = MatchSet::default();
    let mut matched_dirs: HashSet<PathBuf> = HashSet::new();

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy();
        let path = entry.path();

        if entry.file_type().is_dir() {
            if VCS_DIRS.contains(&name.as_ref()) {
                walker.skip_current_dir();
                continue;
            }
            let Some(category) = rules.match_dir(&name) else {
                continue;
            };
            walker.skip_current_dir();

            if rules.is_excluded(path) {
                tracing::debug!(path = %path.display(), "excluded matched directory");
                continue;
            }
            if has_matched_ancestor(path, &matched_dirs) {
                continue;
            }
            matched_dirs.insert(path.to_path_buf());
            matches.add(category, path.to_path_buf(), path_size(path));
            tracing::debug!(category, path = %path.display(), "matched directory");
        } else if let Some(category) = rules.match_file(&name) {
            if rules.is_excluded(path) || has_matched_ancestor(path, &matched_dirs) {
                continue;
            }
            matches.add(category, path.to_path_buf(), path_size(path));
            tracing::debug!(category, path = %path.display(), "matched file");
        }
    }

    matches
}

fn has_matched_ancestor(path: &Path, matched_dirs: &HashSet<PathBuf>) -> bool {
    path.ancestors()
        .skip(1)
        .any(|ancestor| matched_dirs.contains(ancestor))
}
