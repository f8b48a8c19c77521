//! Provider configuration resolved from the host's key/value map.

use std::env;
use std::time::Duration;

use crate::error::ProviderError;
use crate::github::auth::resolve_token;
use crate::github::retry::RetryPolicy;
use crate::provider::ProviderConfig;

const KEY_ENTERPRISE_HOST: &str = "github_enterprise_host";
const KEY_SLUG: &str = "slug";
const KEY_TOKEN: &str = "token";
const KEY_COMPARE_COMMITS: &str = "github_use_compare_commits";
const KEY_STRIP_V_TAG_PREFIX: &str = "strip_v_tag_prefix";
const KEY_REQUEST_RETRIES: &str = "github_request_retries";

/// Fully resolved settings for a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub enterprise_host: Option<String>,
    pub compare_commits: bool,
    pub strip_v_tag_prefix: bool,
    pub retry: RetryPolicy,
}

impl GitHubConfig {
    /// Resolve settings from the host configuration, falling back to the
    /// environment for the host, slug and token.
    pub fn from_map(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let enterprise_host = lookup(config, KEY_ENTERPRISE_HOST)
            .or_else(|| env_var("GITHUB_ENTERPRISE_HOST"));
        let slug = lookup(config, KEY_SLUG)
            .or_else(|| env_var("GITHUB_REPOSITORY"))
            .unwrap_or_default();
        let token = resolve_token(lookup(config, KEY_TOKEN).as_deref())?;

        let (owner, repo) = parse_slug(&slug)?;

        let compare_commits = config.get(KEY_COMPARE_COMMITS).map(String::as_str) == Some("true");

        let strip_v_tag_prefix = match lookup(config, KEY_STRIP_V_TAG_PREFIX) {
            Some(value) => parse_bool(&value).ok_or(ProviderError::InvalidBool {
                key: KEY_STRIP_V_TAG_PREFIX,
                value,
            })?,
            None => false,
        };

        let mut retry = RetryPolicy::default();
        if let Some(value) = lookup(config, KEY_REQUEST_RETRIES) {
            retry.max_attempts = value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ProviderError::InvalidNumber {
                    key: KEY_REQUEST_RETRIES,
                    value,
                })?;
        }

        Ok(Self {
            owner,
            repo,
            token,
            enterprise_host,
            compare_commits,
            strip_v_tag_prefix,
            retry,
        })
    }

    /// Minimal settings for a client built elsewhere.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: String::new(),
            enterprise_host: None,
            compare_commits: false,
            strip_v_tag_prefix: false,
            retry: RetryPolicy::default(),
        }
    }

    /// API base URL for GitHub Enterprise, `None` for github.com.
    pub fn api_base_url(&self) -> Option<String> {
        self.enterprise_host
            .as_ref()
            .map(|host| format!("https://{}/api/v3/", host))
    }

    pub fn with_compare_commits(mut self, enabled: bool) -> Self {
        self.compare_commits = enabled;
        self
    }

    pub fn with_strip_v_tag_prefix(mut self, enabled: bool) -> Self {
        self.strip_v_tag_prefix = enabled;
        self
    }

    pub fn with_retry(mut self, max_attempts: u32, initial_interval: Duration) -> Self {
        self.retry = RetryPolicy {
            max_attempts: max_attempts.max(1),
            initial_interval,
            ..self.retry
        };
        self
    }
}

fn lookup(config: &ProviderConfig, key: &str) -> Option<String> {
    config.get(key).filter(|v| !v.is_empty()).cloned()
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Split `owner/repo` (or a GitHub remote URL) into its parts.
pub fn parse_slug(slug: &str) -> Result<(String, String), ProviderError> {
    let invalid = || ProviderError::InvalidSlug(slug.to_string());

    let path = if let Some((_, rest)) = slug.split_once("://") {
        // https://host/owner/repo
        rest.split_once('/').map(|(_, path)| path).ok_or_else(invalid)?
    } else if let Some(rest) = slug.strip_prefix("git@") {
        // git@host:owner/repo
        rest.split_once(':').map(|(_, path)| path).ok_or_else(invalid)?
    } else {
        slug
    };

    let path = path.strip_suffix(".git").unwrap_or(path);
    let mut parts = path.split('/');

    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(invalid()),
    }
}

/// Boolean spellings accepted by the release host.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
