//! Implementation of the `repo-cleanup` command.
//!
//! Finds generated artifacts in the enclosing repository and, after
//! confirmation, deletes them:
//! - Terraform caches and plans, never state, lock files or tfvars
//! - Node/JS dependencies and build output
//! - Python caches, Gradle and Cargo build directories
//! - OS and editor junk
//! - Optionally (`--include-risky`) virtualenvs and IDE settings
//!
//! # Safety
//!
//! - Nothing is deleted without an explicit `y`/`yes` answer
//! - Version-control metadata directories are never scanned
//! - Excluded directories keep their whole subtree

pub mod display;
pub mod execution;
pub mod locate;
pub mod rules;
pub mod scanner;
pub mod size;
pub mod types;


use crate::cli::{CleanupArgs, normalize_list};
use crate::error::{Result, ToolError};
use std::io::{self, BufRead, Write};
use std::path::Path;

use display::print_report;
use execution::delete_all;
use locate::find_repo_root;
use rules::{RULES, RuleFilter, RuleSet};
use scanner::scan;
use size::human_size;
use types::MatchSet;

/// Execute the `repo-cleanup` command from the current directory.
pub fn cmd_cleanup(args: CleanupArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| {
        ToolError::UserError(format!("failed to determine current directory: {}", e))
    })?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_cleanup(&args, &cwd, &mut stdin.lock(), &mut stdout.lock())
}

/// Scan from `start`, report, prompt on `input` and delete on confirmation.
///
/// # Behavior
///
/// - No matches: prints the report and returns without prompting
/// - Without `--yes`: prints the dry-run notice, then still offers deletion
/// - Any answer other than `y`/`yes` (or EOF) aborts
/// - Per-item deletion failures are listed and turn into
///   [`ToolError::DeletionFailed`]
pub fn run_cleanup(
    args: &CleanupArgs,
    start: &Path,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let filter = RuleFilter {
        include_risky: args.include_risky,
        only_categories: normalize_list(&args.only),
        exclude_globs: normalize_list(&args.exclude_glob),
    };
    let rules = RuleSet::compile(RULES, &filter)?;

    let root = find_repo_root(start);
    writeln!(out, "Scanning: {}", root.display()).map_err(output_error)?;
    tracing::debug!(root = %root.display(), "scan started");

    let matches = scan(&root, &rules);
    print_report(out, &matches).map_err(output_error)?;

    if matches.is_empty() {
        return Ok(());
    }

    let prompt = if args.yes {
        format!(
            "Delete ALL of the above ({})? [y/N]: ",
            human_size(matches.total_size())
        )
    } else {
        writeln!(out, "Dry run only. Re-run with --yes to enable deletion.").map_err(output_error)?;
        "Proceed to delete ALL found items now? [y/N]: ".to_string()
    };

    if !confirm(&prompt, input, out)? {
        writeln!(out, "Aborted. Nothing was deleted.").map_err(output_error)?;
        return Ok(());
    }

    delete_and_report(&matches, out)
}

/// Delete every match and print the outcome, listing failed items.
///
/// Returns [`ToolError::DeletionFailed`] when any item could not be removed.
pub fn delete_and_report(matches: &MatchSet, out: &mut impl Write) -> Result<()> {
    let result = delete_all(matches);
    writeln!(out).map_err(output_error)?;
    writeln!(out, "Deleted. Space freed: {}", human_size(result.freed)).map_err(output_error)?;

    if result.errors.is_empty() {
        return Ok(());
    }

    writeln!(out).map_err(output_error)?;
    writeln!(out, "Some items failed to delete:").map_err(output_error)?;
    for (path, error) in &result.errors {
        writeln!(out, "  - {}: {}", path.display(), error).map_err(output_error)?;
    }
    Err(ToolError::DeletionFailed(result.errors.len()))
}

/// Print `prompt` and read one answer; only `y` or `yes` confirms.
fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{}", prompt).map_err(output_error)?;
    out.flush().map_err(output_error)?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .map_err(|e| ToolError::UserError(format!("failed to read answer: {}", e)))?;
    if read == 0 {
        writeln!(out).map_err(output_error)?;
        return Ok(false);
    }

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn output_error(e: io::Error) -> ToolError {
    ToolError::UserError(format!("failed to write output: {}", e))
}
