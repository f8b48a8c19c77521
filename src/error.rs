//! Error types for the provider using thiserror.

use thiserror::Error;

/// Errors from configuring or talking to the GitHub provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("github token missing")]
    TokenMissing,

    #[error("invalid slug")]
    InvalidSlug(String),

    #[error("failed to set property {key}: invalid boolean '{value}'")]
    InvalidBool { key: &'static str, value: String },

    #[error("failed to set property {key}: '{value}' is not a positive integer")]
    InvalidNumber { key: &'static str, value: String },

    #[error("provider is not initialized, call init first")]
    NotInitialized,

    #[error("Failed to build GitHub client: {0}")]
    Client(#[source] Box<octocrab::Error>),

    #[error("GitHub API request failed ({operation}): {}", describe(.source))]
    Api {
        operation: &'static str,
        #[source]
        source: Box<octocrab::Error>,
    },

    #[error("invalid tag pattern '{pattern}': {source}")]
    InvalidTagPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("invalid version '{0}'")]
    InvalidVersion(String),
}

impl ProviderError {
    /// Wrap an octocrab error with the operation that produced it.
    pub fn api(operation: &'static str, source: octocrab::Error) -> Self {
        ProviderError::Api {
            operation,
            source: Box::new(source),
        }
    }

    /// HTTP status reported by GitHub, if this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderError::Api { source, .. } => github_status(source),
            _ => None,
        }
    }
}

/// Extract the HTTP status code from an octocrab error returned by GitHub.
pub(crate) fn github_status(err: &octocrab::Error) -> Option<u16> {
    match err {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

/// Status and message for GitHub errors, whose own `Display` is only "GitHub".
fn describe(err: &octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            format!("{}: {}", source.status_code, source.message)
        }
        other => other.to_string(),
    }
}
