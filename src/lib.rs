//! repo-chores: two small maintenance tools for working trees.
//!
//! - `repo-cleanup` scans a repository for generated artifacts (dependency
//!   caches, build output, editor junk) and optionally deletes them.
//! - `bb-clone` lists Bitbucket Cloud repositories by project key, clones or
//!   refreshes them locally, and can fast-forward their default branches.
//!
//! Both binaries are thin wrappers around the command functions exported here.

pub mod bitbucket;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod logging;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;
