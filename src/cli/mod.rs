//! CLI argument parsing for both binaries.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the argument structures; the implementations
//! are in the `cleanup` and `sync` modules.

use clap::{Parser, ValueEnum};

/// Find and remove generated artifacts from the current repository.
///
/// Scans the enclosing git repository (or the current directory when there is
/// none) for ephemeral folders and files: Terraform caches, node_modules and
/// build output, Python caches, editor junk. Terraform state, lock files and
/// tfvars are never touched. Optional "risky" entries (venv/, .idea/, .vscode/
/// ...) are only considered with --include-risky.
#[derive(Parser, Debug, Default)]
#[command(name = "repo-cleanup")]
#[command(author, version, about, long_about = None)]
pub struct CleanupArgs {
    /// Skip the dry-run notice and prompt to delete everything found.
    #[arg(long)]
    pub yes: bool,

    /// Include optional directories like venv/, .vscode/, .idea/.
    #[arg(long)]
    pub include_risky: bool,

    /// Comma-separated list of categories to include (e.g. 'Terraform,Node/JS').
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Comma-separated glob(s) to exclude (matched against name or full path).
    #[arg(long, value_delimiter = ',')]
    pub exclude_glob: Vec<String>,
}

impl CleanupArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Clone Bitbucket repositories by project key, with optional sync and report.
///
/// Requires BB_WORKSPACE and one credential set: BITBUCKET_USERNAME +
/// BITBUCKET_API_TOKEN, BITBUCKET_ACCESS_TOKEN, or BB_USERNAME +
/// BB_APP_PASSWORD.
#[derive(Parser, Debug)]
#[command(name = "bb-clone")]
#[command(author, version, about, long_about = None)]
pub struct CloneArgs {
    /// Comma-separated project keys, e.g. DEVOPS,PLATFORM.
    #[arg(long, required = true, value_delimiter = ',')]
    pub projects: Vec<String>,

    /// Destination directory for clones (`~` is expanded).
    #[arg(long)]
    pub dest: String,

    /// Print actions without executing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Only list repositories (as JSON) and exit.
    #[arg(long)]
    pub list: bool,

    /// Fast-forward the default branch when it is strictly behind origin.
    #[arg(long)]
    pub sync_default: bool,

    /// Print a repository sync report in the chosen format.
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,
}

impl CloneArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Output format of the sync report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Trim comma-split values and drop the empty ones.
pub fn normalize_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
