//! Entry point for `bb-clone`.
//!
//! Parses arguments, lists/clones/syncs the requested projects and maps
//! errors to exit codes (2 for missing configuration, 1 otherwise).

use repo_chores::cli::CloneArgs;
use repo_chores::exit_codes;
use repo_chores::logging::init_tracing;
use repo_chores::sync::cmd_clone;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let args = CloneArgs::parse_args();

    match cmd_clone(args) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // User-actionable message on stderr, stdout stays clean for reports.
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
