//! The provider contract shared with the release host.
//!
//! The host parses commits, computes the next version and renders the
//! changelog. A provider only answers questions about the remote repository
//! and publishes the result.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Raw key/value configuration handed over by the host.
pub type ProviderConfig = HashMap<String, String>;

/// Repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub owner: String,
    pub repo: String,
    pub default_branch: String,
    pub private: bool,
}

/// A commit as seen by the host before any conventional-commit parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    pub raw_message: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// An existing version tag resolved to the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub sha: String,
    pub version: Version,
}

/// Everything needed to publish a new release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateReleaseConfig {
    pub changelog: String,
    pub new_version: String,
    pub prerelease: bool,
    pub branch: String,
    pub sha: String,
}

/// Operations a release host can ask of a hosting provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Configure the provider. Must succeed before any remote operation.
    async fn init(&mut self, config: &ProviderConfig) -> Result<(), ProviderError>;

    async fn info(&self) -> Result<RepositoryInfo, ProviderError>;

    /// Commits reachable from `to_sha`, stopping before `from_sha`.
    ///
    /// An empty `from_sha` means the whole history (first release).
    async fn commits(&self, from_sha: &str, to_sha: &str) -> Result<Vec<RawCommit>, ProviderError>;

    /// Version tags, optionally filtered by a regular expression on the tag name.
    async fn releases(&self, pattern: &str) -> Result<Vec<Release>, ProviderError>;

    async fn create_release(&self, release: &CreateReleaseConfig) -> Result<(), ProviderError>;

    fn name(&self) -> &'static str;

    fn version(&self) -> &'static str;
}
