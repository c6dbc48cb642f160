//! API response types and the flattened repository descriptor.

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub values: Vec<ApiRepository>,
    /// Absolute URL of the following page, absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

/// Repository object as returned by `GET /repositories/{workspace}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub project: Option<ApiProject>,
    #[serde(default)]
    pub links: ApiLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiProject {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiLinks {
    #[serde(default)]
    pub clone: Vec<ApiCloneLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCloneLink {
    pub name: String,
    pub href: String,
}

impl ApiRepository {
    /// Project key as reported by the API, if any.
    pub fn project_key(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.key.as_deref())
    }

    fn clone_link(&self, name: &str) -> Option<String> {
        self.links
            .clone
            .iter()
            .find(|link| link.name == name)
            .map(|link| link.href.clone())
    }
}

/// Repository as used by the clone and sync steps, and as printed by `--list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub slug: String,
    pub project: Option<String>,
    pub ssh: Option<String>,
    pub https: Option<String>,
}

impl RepositoryDescriptor {
    /// Clone URL to use: SSH when available, else HTTPS.
    pub fn clone_url(&self) -> Option<&str> {
        self.ssh.as_deref().or(self.https.as_deref())
    }
}

impl From<ApiRepository> for RepositoryDescriptor {
    fn from(repo: ApiRepository) -> Self {
        let project = repo.project_key().map(str::to_string);
        let ssh = repo.clone_link("ssh");
        let https = repo.clone_link("https");
        Self {
            name: repo.name,
            slug: repo.slug,
            project,
            ssh,
            https,
        }
    }
}
