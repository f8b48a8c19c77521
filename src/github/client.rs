//! The GitHub repository handle and its provider implementation.

use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use tracing::{debug, info};

use crate::config::GitHubConfig;
use crate::error::ProviderError;
use crate::provider::{
    CreateReleaseConfig, Provider, ProviderConfig, RawCommit, Release, RepositoryInfo,
};

use super::models::RepositoryPayload;
use super::retry::with_retry;
use super::{commits, release, tags};

/// Reported to the host as the provider name.
pub const PROVIDER_NAME: &str = "GitHub";

/// A configured client bound to one repository.
pub(crate) struct Connection {
    pub(crate) client: Octocrab,
    pub(crate) config: GitHubConfig,
}

impl Connection {
    pub(crate) fn repo_route(&self, suffix: &str) -> String {
        format!("/repos/{}/{}{}", self.config.owner, self.config.repo, suffix)
    }
}

/// GitHub implementation of [`Provider`].
///
/// Starts out unconfigured; [`Provider::init`] or [`GitHubRepository::with_client`]
/// bind it to a repository.
#[derive(Default)]
pub struct GitHubRepository {
    connection: Option<Connection>,
}

impl GitHubRepository {
    /// Build the octocrab client for the given settings.
    pub fn connect(config: GitHubConfig) -> Result<Self, ProviderError> {
        // Reads are retried by `with_retry`; writes must never be re-sent.
        let mut builder = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .personal_token(config.token.clone());

        if let Some(base) = config.api_base_url() {
            debug!(base_url = %base, "Using GitHub Enterprise API");
            builder = builder
                .base_uri(base)
                .map_err(|e| ProviderError::Client(Box::new(e)))?;
        }

        let client = builder
            .build()
            .map_err(|e| ProviderError::Client(Box::new(e)))?;

        Ok(Self::with_client(config, client))
    }

    /// Use a pre-configured octocrab client.
    ///
    /// This allows dependency injection for testing with mock servers.
    pub fn with_client(config: GitHubConfig, client: Octocrab) -> Self {
        Self {
            connection: Some(Connection { client, config }),
        }
    }

    /// Settings in effect, if initialized.
    pub fn config(&self) -> Option<&GitHubConfig> {
        self.connection.as_ref().map(|c| &c.config)
    }

    fn connection(&self) -> Result<&Connection, ProviderError> {
        self.connection.as_ref().ok_or(ProviderError::NotInitialized)
    }
}

#[async_trait]
impl Provider for GitHubRepository {
    async fn init(&mut self, config: &ProviderConfig) -> Result<(), ProviderError> {
        let config = GitHubConfig::from_map(config)?;
        info!(
            owner = %config.owner,
            repo = %config.repo,
            enterprise = config.enterprise_host.is_some(),
            compare_commits = config.compare_commits,
            "Initializing GitHub provider"
        );
        *self = Self::connect(config)?;
        Ok(())
    }

    async fn info(&self) -> Result<RepositoryInfo, ProviderError> {
        let conn = self.connection()?;
        let route = conn.repo_route("");

        let payload: RepositoryPayload = with_retry(&conn.config.retry, "get repository", || {
            conn.client.get(&route, None::<&()>)
        })
        .await
        .map_err(|e| ProviderError::api("get repository", e))?;

        Ok(RepositoryInfo {
            owner: payload.owner.map(|o| o.login).unwrap_or_default(),
            repo: payload.name,
            default_branch: payload.default_branch,
            private: payload.private,
        })
    }

    async fn commits(&self, from_sha: &str, to_sha: &str) -> Result<Vec<RawCommit>, ProviderError> {
        commits::fetch_commits(self.connection()?, from_sha, to_sha).await
    }

    async fn releases(&self, pattern: &str) -> Result<Vec<Release>, ProviderError> {
        tags::fetch_releases(self.connection()?, pattern).await
    }

    async fn create_release(&self, release: &CreateReleaseConfig) -> Result<(), ProviderError> {
        release::create_release(self.connection()?, release).await
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
