//! Paginated repository listing.
//!
//! Bitbucket returns repositories a page at a time; each page carries the
//! absolute URL of the next one. [`Pages`] turns that into a lazy iterator
//! which stops after the last page or after the first error. It is not
//! restartable: every fetch depends on the link returned by the previous one.

use super::auth::Credentials;
use super::types::{ApiRepository, Page, RepositoryDescriptor};
use crate::config::CloneSettings;
use crate::error::{Result, ToolError};
use std::collections::HashSet;
use std::time::Duration;

/// Timeout applied to every listing request.
pub const LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size requested from the API (its maximum).
pub const PAGE_LEN: &str = "100";

/// Blocking client for the Bitbucket Cloud REST API.
pub struct BitbucketClient {
    agent: ureq::Agent,
    api_url: String,
    authorization: String,
}

impl BitbucketClient {
    pub fn new(api_url: impl Into<String>, credentials: &Credentials) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(LIST_TIMEOUT).build();
        Self {
            agent,
            api_url: api_url.into(),
            authorization: credentials.authorization_header(),
        }
    }

    pub fn from_settings(settings: &CloneSettings) -> Self {
        tracing::debug!(scheme = settings.credentials.scheme(), "using Bitbucket credentials");
        Self::new(settings.api_url.clone(), &settings.credentials)
    }

    /// List every repository of `workspace` whose project passes `filter`.
    pub fn list_repositories(
        &self,
        workspace: &str,
        filter: &ProjectFilter,
    ) -> Result<Vec<RepositoryDescriptor>> {
        let url = format!("{}/repositories/{}", self.api_url, workspace);
        let pages = Pages::new(url, |url, first| self.fetch_page(url, first));
        collect_matching(pages, filter)
    }

    fn fetch_page(&self, url: &str, first: bool) -> Result<Page> {
        tracing::debug!(url, "fetching repository page");

        let mut request = self
            .agent
            .get(url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json");
        // `next` links already carry the query string.
        if first {
            request = request.query("pagelen", PAGE_LEN);
        }

        match request.call() {
            Ok(response) => response.into_json::<Page>().map_err(|e| {
                ToolError::Api(format!("invalid repository page from {}: {}", url, e))
            }),
            Err(ureq::Error::Status(code, _)) => {
                if let Some(hint) = auth_hint(code) {
                    eprintln!("{}", hint);
                }
                Err(status_error(code, url))
            }
            Err(ureq::Error::Transport(transport)) => Err(ToolError::Api(format!(
                "request to {} failed: {}",
                url, transport
            ))),
        }
    }
}

/// Scope hint printed when the API rejects the credentials.
pub fn auth_hint(status: u16) -> Option<String> {
    match status {
        401 | 403 => Some(format!(
            "Bitbucket API returned {}. Ensure your token has repository:read and project:read and is a Workspace Access Token.",
            status
        )),
        _ => None,
    }
}

/// Error for a non-2xx listing response.
pub fn status_error(status: u16, url: &str) -> ToolError {
    ToolError::Api(format!("HTTP {} returned by {}", status, url))
}

/// Lazy sequence of repository pages following `next` links.
pub struct Pages<F> {
    next_url: Option<String>,
    first: bool,
    fetch: F,
}

impl<F> Pages<F>
where
    F: FnMut(&str, bool) -> Result<Page>,
{
    /// `fetch` receives the page URL and whether it is the first request.
    pub fn new(start_url: String, fetch: F) -> Self {
        Self {
            next_url: Some(start_url),
            first: true,
            fetch,
        }
    }
}

impl<F> Iterator for Pages<F>
where
    F: FnMut(&str, bool) -> Result<Page>,
{
    type Item = Result<Vec<ApiRepository>>;

    fn next(&mut self) -> Option<Self::Item> {
        let url = self.next_url.take()?;
        let first = std::mem::replace(&mut self.first, false);

        match (self.fetch)(&url, first) {
            Ok(page) => {
                self.next_url = page.next.filter(|next| !next.is_empty());
                Some(Ok(page.values))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Case-insensitive set of project keys. Empty means "every project".
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    keys: HashSet<String>,
}

impl ProjectFilter {
    pub fn new<S: AsRef<str>>(keys: &[S]) -> Self {
        let keys = keys
            .iter()
            .map(|k| k.as_ref().trim().to_uppercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keys }
    }

    pub fn matches(&self, project_key: Option<&str>) -> bool {
        if self.keys.is_empty() {
            return true;
        }
        let key = project_key.unwrap_or_default().to_uppercase();
        self.keys.contains(&key)
    }
}

/// Drain `pages`, keeping repositories that pass `filter`; stops at the first error.
pub fn collect_matching<I>(pages: I, filter: &ProjectFilter) -> Result<Vec<RepositoryDescriptor>>
where
    I: Iterator<Item = Result<Vec<ApiRepository>>>,
{
    let mut repos = Vec::new();
    for page in pages {
        for repo in page? {
            if filter.matches(repo.project_key()) {
                repos.push(RepositoryDescriptor::from(repo));
            }
        }
    }
    Ok(repos)
}
