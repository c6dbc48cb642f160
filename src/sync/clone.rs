//! Clone missing repositories, refresh the remote of existing ones.

use super::inspect::REMOTE;
use crate::bitbucket::RepositoryDescriptor;
use crate::git::{GitRunner, display_command};
use std::fs;
use std::path::Path;

/// Result of the clone/update step for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    /// Fresh clone created.
    Cloned,
    /// Existing clone had its origin URL (and possibly refs) refreshed.
    Updated,
    /// Dry run: commands were printed, nothing executed.
    Planned,
    /// The API listed no SSH or HTTPS clone link.
    NoCloneUrl,
    /// A git command failed; the message is attached to the repository's summary.
    Failed(String),
}

/// Clone `repo` into `dest_dir/<slug>`, or point an existing clone at the
/// current URL. With `refresh_remote`, existing clones also fetch and prune
/// their `origin` remote-tracking refs.
pub fn clone_or_update(
    git: &dyn GitRunner,
    repo: &RepositoryDescriptor,
    dest_dir: &Path,
    dry_run: bool,
    refresh_remote: bool,
) -> CloneOutcome {
    let Some(clone_url) = repo.clone_url() else {
        eprintln!("No clone URL for {} ({})", repo.name, repo.slug);
        return CloneOutcome::NoCloneUrl;
    };

    let target = dest_dir.join(&repo.slug);
    if target.exists() {
        update_existing(git, &target, clone_url, dry_run, refresh_remote)
    } else {
        clone_fresh(git, &target, dest_dir, clone_url, dry_run)
    }
}

fn update_existing(
    git: &dyn GitRunner,
    target: &Path,
    clone_url: &str,
    dry_run: bool,
    refresh_remote: bool,
) -> CloneOutcome {
    let set_url = ["remote", "set-url", REMOTE, clone_url];
    let refresh = ["fetch", "-q", "-p", REMOTE];

    if dry_run {
        println!("[DRY RUN] {}", display_command(Some(target), &set_url));
        if refresh_remote {
            println!("[DRY RUN] {}", display_command(Some(target), &refresh));
        }
        return CloneOutcome::Planned;
    }

    if let Err(e) = git.run_checked(target, &set_url) {
        return CloneOutcome::Failed(e.to_string());
    }
    if refresh_remote {
        let output = git.run(target, &refresh);
        if !output.success() {
            tracing::warn!(
                repo = %target.display(),
                error = %output.error_text(),
                "remote refresh failed"
            );
        }
    }
    CloneOutcome::Updated
}

fn clone_fresh(
    git: &dyn GitRunner,
    target: &Path,
    dest_dir: &Path,
    clone_url: &str,
    dry_run: bool,
) -> CloneOutcome {
    let target_str = target.to_string_lossy();
    let args = ["clone", "-q", clone_url, target_str.as_ref()];

    if dry_run {
        println!("[DRY RUN] {}", display_command(None, &args));
        return CloneOutcome::Planned;
    }

    if let Err(e) = fs::create_dir_all(dest_dir) {
        return CloneOutcome::Failed(format!(
            "failed to create destination directory '{}': {}",
            dest_dir.display(),
            e
        ));
    }

    match git.run_checked(dest_dir, &args) {
        Ok(_) => CloneOutcome::Cloned,
        Err(e) => CloneOutcome::Failed(e.to_string()),
    }
}
