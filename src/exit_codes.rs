//! Exit code constants shared by both binaries.
//!
//! - 0: Success (including a declined deletion or nothing to do)
//! - 1: Failure (listing failed, deletion errors, bad arguments)
//! - 2: Configuration error (missing environment variables)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Runtime failure: repository listing failed, some deletions failed, bad input.
pub const FAILURE: i32 = 1;

/// Required environment configuration is missing.
pub const CONFIG_ERROR: i32 = 2;
