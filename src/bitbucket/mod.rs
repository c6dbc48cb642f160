//! Bitbucket Cloud API access: credentials, response types and the
//! paginated repository lister.

pub mod auth;
pub mod client;
pub mod types;

pub use auth::Credentials;
pub use client::{BitbucketClient, ProjectFilter};
pub use types::RepositoryDescriptor;
