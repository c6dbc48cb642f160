//! Environment-driven settings for the `bb-clone` tool.
//!
//! All lookups go through an injectable function so resolution can be tested
//! without touching the process environment.

use crate::bitbucket::auth::Credentials;
use crate::error::{Result, ToolError};

/// Workspace slug the repositories are listed from.
pub const ENV_WORKSPACE: &str = "BB_WORKSPACE";

/// Optional override of the API base URL.
pub const ENV_API_URL: &str = "BITBUCKET_API_URL";

/// Default Bitbucket Cloud REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.bitbucket.org/2.0";

/// Resolved configuration for a `bb-clone` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneSettings {
    pub workspace: String,
    pub credentials: Credentials,
    pub api_url: String,
}

impl CloneSettings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings using `lookup` to read variables.
    ///
    /// Empty values count as unset. The workspace is checked before the
    /// credentials, so a run missing both reports the workspace first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let workspace = get(ENV_WORKSPACE)
            .ok_or_else(|| ToolError::Config(format!("Missing env var: {}", ENV_WORKSPACE)))?;
        let credentials = Credentials::resolve(&get)?;
        let api_url = get(ENV_API_URL)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            workspace,
            credentials,
            api_url,
        })
    }
}
