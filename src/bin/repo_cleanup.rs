//! Entry point for `repo-cleanup`.
//!
//! Parses arguments, runs the scan/prompt/delete flow and maps errors to
//! exit codes.

use repo_chores::cleanup::cmd_cleanup;
use repo_chores::cli::CleanupArgs;
use repo_chores::exit_codes;
use repo_chores::logging::init_tracing;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let args = CleanupArgs::parse_args();

    match cmd_cleanup(args) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
