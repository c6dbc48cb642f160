//! Per-repository sync summary types.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// What the sync pass did (or found) for one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncAction {
    /// Local clone is missing; the clone step handles it.
    ToClone,
    /// The remote's default branch could not be determined.
    NoDefaultBranch,
    /// Report-only pass: status collected, nothing updated.
    Checked,
    /// Local default branch is ahead or diverged, or the update failed.
    Skipped,
    /// Default branch was fast-forwarded.
    Pulled,
    /// Default branch already matches the remote.
    UpToDate,
}

impl SyncAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncAction::ToClone => "to-clone",
            SyncAction::NoDefaultBranch => "no-default-branch",
            SyncAction::Checked => "checked",
            SyncAction::Skipped => "skipped",
            SyncAction::Pulled => "pulled",
            SyncAction::UpToDate => "up-to-date",
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local branch with commits its upstream does not have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AheadBranch {
    pub branch: String,
    pub ahead: u32,
}

/// Status of one repository after the clone/sync pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSyncSummary {
    pub name: String,
    pub slug: String,
    pub path: String,
    pub default_branch: Option<String>,
    pub current_branch: Option<String>,
    pub ahead_main: u32,
    pub behind_main: u32,
    pub dirty: bool,
    pub ahead_branches: Vec<AheadBranch>,
    pub action: SyncAction,
    pub error: Option<String>,
}

impl RepoSyncSummary {
    /// Fresh summary with no status collected yet.
    pub fn new(name: &str, slug: &str, path: &Path, action: SyncAction) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            path: path.display().to_string(),
            default_branch: None,
            current_branch: None,
            ahead_main: 0,
            behind_main: 0,
            dirty: false,
            ahead_branches: Vec::new(),
            action,
            error: None,
        }
    }
}
