//! Implementation of the `bb-clone` command.
//!
//! Lists the workspace's repositories for the requested projects, clones the
//! missing ones and points existing clones at the current URL. With
//! `--sync-default` each clone's default branch is fast-forwarded when it is
//! strictly behind origin; `--report` prints per-repository status.
//!
//! # Safety
//!
//! - Never pushes, merges or rebases
//! - A default branch that is ahead of or diverged from origin is left alone
//! - `--dry-run` prints every mutating git command instead of running it

pub mod clone;
pub mod engine;
pub mod inspect;
pub mod report;
pub mod types;

#[cfg(test)]
mod tests;

use crate::bitbucket::{BitbucketClient, ProjectFilter, RepositoryDescriptor};
use crate::cli::{CloneArgs, ReportFormat, normalize_list};
use crate::config::CloneSettings;
use crate::error::{Result, ToolError};
use crate::git::{GitRunner, SystemGit};
use clone::{CloneOutcome, clone_or_update};
use engine::{SyncOptions, summarize_repo};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use types::{AheadBranch, RepoSyncSummary, SyncAction};

/// Execute the `bb-clone` command.
pub fn cmd_clone(args: CloneArgs) -> Result<()> {
    let settings = CloneSettings::from_env()?;
    let projects = normalize_list(&args.projects);
    let dest_dir = resolve_dest(&args.dest)?;

    let client = BitbucketClient::from_settings(&settings);
    let repos = client
        .list_repositories(&settings.workspace, &ProjectFilter::new(&projects))
        .map_err(|e| ToolError::Api(format!("Failed to list repositories: {}", e)))?;
    tracing::debug!(count = repos.len(), workspace = %settings.workspace, "repositories listed");

    if args.list {
        println!("{}", render_listing(&repos)?);
        return Ok(());
    }

    let summaries = run_clone_and_sync(&SystemGit, &args, &repos, &dest_dir);
    if let Some(summaries) = summaries {
        match args.report {
            Some(ReportFormat::Json) => println!("{}", report::render_json(&summaries)?),
            _ => println!("{}", report::render_text(&summaries)),
        }
    }

    Ok(())
}

/// Clone/update every repository, then build summaries when a report or a
/// sync pass was requested.
pub fn run_clone_and_sync(
    git: &dyn GitRunner,
    args: &CloneArgs,
    repos: &[RepositoryDescriptor],
    dest_dir: &Path,
) -> Option<Vec<RepoSyncSummary>> {
    let mut clone_errors: HashMap<&str, String> = HashMap::new();
    for repo in repos {
        // Heavy fetching is left to the sync pass, which refreshes only the default branch.
        if let CloneOutcome::Failed(error) = clone_or_update(git, repo, dest_dir, args.dry_run, false)
        {
            eprintln!("Failed to clone or update {}: {}", repo.slug, error);
            clone_errors.insert(repo.slug.as_str(), error);
        }
    }

    if args.report.is_none() && !args.sync_default {
        return None;
    }

    let options = SyncOptions {
        perform_pull: args.sync_default,
        dry_run: args.dry_run,
    };
    let summaries = repos
        .iter()
        .map(|repo| {
            let mut summary = summarize_repo(git, repo, dest_dir, options);
            if summary.error.is_none() {
                summary.error = clone_errors.remove(repo.slug.as_str());
            }
            summary
        })
        .collect();
    Some(summaries)
}

/// Pretty JSON for `--list`.
pub fn render_listing(repos: &[RepositoryDescriptor]) -> Result<String> {
    serde_json::to_string_pretty(repos)
        .map_err(|e| ToolError::UserError(format!("failed to render repository list: {}", e)))
}

/// Expand `~` and make `dest` absolute.
pub fn resolve_dest(dest: &str) -> Result<PathBuf> {
    let expanded = if dest == "~" || dest.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| {
            ToolError::UserError(format!("cannot expand '{}': home directory is unknown", dest))
        })?;
        match dest.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => home,
        }
    } else {
        PathBuf::from(dest)
    };

    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let cwd = std::env::current_dir().map_err(|e| {
        ToolError::UserError(format!("cannot resolve '{}': {}", dest, e))
    })?;
    Ok(cwd.join(expanded))
}
