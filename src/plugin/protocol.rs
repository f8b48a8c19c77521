//! Line-delimited JSON messages exchanged with the release host.
//!
//! Each request is one JSON object on one line:
//!
//! ```text
//! {"method": "commits", "params": {"from_sha": "abc", "to_sha": "def"}}
//! ```
//!
//! Each reply is one line, either `{"result": ...}` or `{"error": "..."}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::{CreateReleaseConfig, ProviderConfig};

/// A parsed request from the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum Request {
    /// Configure the provider.
    Init {
        #[serde(default)]
        config: ProviderConfig,
    },

    /// Repository metadata.
    Info,

    /// Commits between two SHAs.
    Commits {
        #[serde(default)]
        from_sha: String,
        #[serde(default)]
        to_sha: String,
    },

    /// Version tags, optionally filtered.
    Releases {
        #[serde(default)]
        pattern: String,
    },

    /// Publish a release.
    CreateRelease(CreateReleaseConfig),

    Name,

    Version,
}

impl Request {
    /// Parse a request from a line of input.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }

    /// Wire name of the method, for logging.
    pub fn method(&self) -> &'static str {
        match self {
            Request::Init { .. } => "init",
            Request::Info => "info",
            Request::Commits { .. } => "commits",
            Request::Releases { .. } => "releases",
            Request::CreateRelease(_) => "create_release",
            Request::Name => "name",
            Request::Version => "version",
        }
    }
}

/// The answer to a single request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    Result(Value),
    Error(String),
}

impl Reply {
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}
