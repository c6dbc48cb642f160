//! Error types for repo-chores.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for both tools.
///
/// Each variant maps to a specific process exit code.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Required environment configuration is missing.
    #[error("{0}")]
    Config(String),

    /// User provided invalid arguments (bad glob, unusable path).
    #[error("{0}")]
    UserError(String),

    /// The hosting API could not be queried.
    #[error("{0}")]
    Api(String),

    /// A git subprocess that must succeed did not.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// Deletion finished but some items could not be removed.
    #[error("{0} item(s) failed to delete")]
    DeletionFailed(usize),
}

impl ToolError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::Config(_) => exit_codes::CONFIG_ERROR,
            ToolError::UserError(_) => exit_codes::FAILURE,
            ToolError::Api(_) => exit_codes::FAILURE,
            ToolError::GitError(_) => exit_codes::FAILURE,
            ToolError::DeletionFailed(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for repo-chores operations.
pub type Result<T> = std::result::Result<T, ToolError>;
