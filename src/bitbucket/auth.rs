//! Credential resolution for the Bitbucket API.
//!
//! Three schemes are supported, tried in this order:
//!
//! 1. `BITBUCKET_USERNAME` + `BITBUCKET_API_TOKEN`: Atlassian API token, basic auth.
//! 2. `BITBUCKET_ACCESS_TOKEN`: workspace/project/repository access token, bearer auth.
//! 3. `BB_USERNAME` + `BB_APP_PASSWORD`: legacy app password, basic auth.

use crate::error::{Result, ToolError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub const ENV_API_USERNAME: &str = "BITBUCKET_USERNAME";
pub const ENV_API_TOKEN: &str = "BITBUCKET_API_TOKEN";
pub const ENV_ACCESS_TOKEN: &str = "BITBUCKET_ACCESS_TOKEN";
pub const ENV_APP_USERNAME: &str = "BB_USERNAME";
pub const ENV_APP_PASSWORD: &str = "BB_APP_PASSWORD";

/// One of the supported credential schemes.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Account email plus Atlassian API token.
    ApiToken { username: String, token: String },
    /// Access token sent as a bearer token.
    AccessToken(String),
    /// Legacy username plus app password.
    AppPassword { username: String, password: String },
}

// Secrets must never end up in logs or panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiToken { username, .. } => f
                .debug_struct("ApiToken")
                .field("username", username)
                .finish_non_exhaustive(),
            Credentials::AccessToken(_) => f.write_str("AccessToken(..)"),
            Credentials::AppPassword { username, .. } => f
                .debug_struct("AppPassword")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

impl Credentials {
    /// Pick the first complete credential set visible through `get`.
    ///
    /// `get` must already treat empty values as unset.
    pub fn resolve<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let (Some(username), Some(token)) = (get(ENV_API_USERNAME), get(ENV_API_TOKEN)) {
            return Ok(Credentials::ApiToken { username, token });
        }

        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            return Ok(Credentials::AccessToken(token));
        }

        if let (Some(username), Some(password)) = (get(ENV_APP_USERNAME), get(ENV_APP_PASSWORD)) {
            return Ok(Credentials::AppPassword { username, password });
        }

        Err(ToolError::Config(format!(
            "Missing authentication. Set {} and {}, or {}, or {} and {}.",
            ENV_API_USERNAME, ENV_API_TOKEN, ENV_ACCESS_TOKEN, ENV_APP_USERNAME, ENV_APP_PASSWORD
        )))
    }

    /// Value of the `Authorization` header for this scheme.
    pub fn authorization_header(&self) -> String {
        match self {
            Credentials::ApiToken { username, token } => basic(username, token),
            Credentials::AccessToken(token) => format!("Bearer {}", token),
            Credentials::AppPassword { username, password } => basic(username, password),
        }
    }

    /// Short scheme name for diagnostics.
    pub fn scheme(&self) -> &'static str {
        match self {
            Credentials::ApiToken { .. } => "api-token",
            Credentials::AccessToken(_) => "access-token",
            Credentials::AppPassword { .. } => "app-password",
        }
    }
}

fn basic(username: &str, secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, secret)))
}
