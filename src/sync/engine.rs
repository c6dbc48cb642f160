//! Per-repository sync state machine.
//!
//! For an existing clone the engine detects the remote's default branch,
//! compares the local branch against `origin/<default>` and, when asked to,
//! fast-forwards it. Local work is never rewritten: a branch that is ahead or
//! has diverged is reported and left alone.

use super::inspect::{
    REMOTE, ahead_behind, branch_exists, current_branch, detect_default_branch, is_dirty,
    list_ahead_branches, update_remote_branch,
};
use super::types::{RepoSyncSummary, SyncAction};
use crate::bitbucket::RepositoryDescriptor;
use crate::git::{GitRunner, display_command};
use std::path::Path;

/// How a sync pass treats each repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Fast-forward default branches that are strictly behind.
    pub perform_pull: bool,
    /// Print the fast-forward command instead of running it.
    pub dry_run: bool,
}

/// What to do with a default branch given its ahead/behind counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastForwardDecision {
    /// Local has unpushed commits (ahead or diverged); never overwritten.
    KeepLocal,
    UpToDate,
    /// Strictly behind: safe to fast-forward.
    Advance,
}

pub fn decide(ahead: u32, behind: u32) -> FastForwardDecision {
    match (ahead, behind) {
        (a, _) if a > 0 => FastForwardDecision::KeepLocal,
        (0, 0) => FastForwardDecision::UpToDate,
        _ => FastForwardDecision::Advance,
    }
}

/// Collect the status of one repository and optionally fast-forward it.
pub fn summarize_repo(
    git: &dyn GitRunner,
    repo: &RepositoryDescriptor,
    dest_dir: &Path,
    options: SyncOptions,
) -> RepoSyncSummary {
    let path = dest_dir.join(&repo.slug);
    let mut summary = RepoSyncSummary::new(&repo.name, &repo.slug, &path, SyncAction::ToClone);

    if !path.exists() {
        return summary;
    }

    let default_branch = detect_default_branch(git, &path);
    let current = current_branch(git, &path);
    summary.default_branch = default_branch.clone();
    summary.current_branch = current.clone();

    match default_branch {
        Some(default) => {
            if options.perform_pull {
                update_remote_branch(git, &path, &default);
            }

            let remote_ref = format!("{}/{}", REMOTE, default);
            let (ahead, behind) = if branch_exists(git, &path, &default) {
                ahead_behind(git, &path, &default, &remote_ref)
            } else {
                (0, 0)
            };
            summary.ahead_main = ahead;
            summary.behind_main = behind;

            if options.perform_pull {
                let (action, error) = fast_forward_default(
                    git,
                    &path,
                    &default,
                    current.as_deref(),
                    (ahead, behind),
                    options.dry_run,
                );
                summary.action = action;
                summary.error = error;
            } else {
                summary.action = SyncAction::Checked;
            }
        }
        None => summary.action = SyncAction::NoDefaultBranch,
    }

    summary.dirty = is_dirty(git, &path);
    summary.ahead_branches = list_ahead_branches(git, &path);

    tracing::debug!(slug = %repo.slug, action = %summary.action, "repository summarized");
    summary
}

/// Fast-forward `default_branch` from origin when it is strictly behind.
///
/// When the branch is checked out this is `pull --ff-only`; otherwise the
/// local ref is advanced with `fetch origin <b>:<b>` without touching the
/// working tree. A failed update is reported as `skipped` with git's message.
pub fn fast_forward_default(
    git: &dyn GitRunner,
    repo_dir: &Path,
    default_branch: &str,
    current: Option<&str>,
    (ahead, behind): (u32, u32),
    dry_run: bool,
) -> (SyncAction, Option<String>) {
    match decide(ahead, behind) {
        FastForwardDecision::KeepLocal => return (SyncAction::Skipped, None),
        FastForwardDecision::UpToDate => return (SyncAction::UpToDate, None),
        FastForwardDecision::Advance => {}
    }

    let update_refspec = format!("{0}:{0}", default_branch);
    let args: Vec<&str> = if current == Some(default_branch) {
        vec!["pull", "--ff-only", REMOTE, default_branch]
    } else {
        vec!["fetch", "-q", REMOTE, update_refspec.as_str()]
    };

    if dry_run {
        println!("[DRY RUN] {}", display_command(Some(repo_dir), &args));
        return (SyncAction::Pulled, None);
    }

    let output = git.run(repo_dir, &args);
    if output.success() {
        (SyncAction::Pulled, None)
    } else {
        (SyncAction::Skipped, Some(output.error_text().to_string()))
    }
}
