//! Wire payloads for the GitHub REST endpoints the provider talks to.
//!
//! Only the fields the provider reads are modelled, and every field tolerates
//! absence so that trimmed-down or Enterprise responses still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Account {
    pub login: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryPayload {
    pub name: String,
    pub owner: Option<Account>,
    pub default_branch: String,
    pub private: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommitDetail {
    pub message: String,
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
}

/// One entry of `GET /repos/{owner}/{repo}/commits` or of a comparison.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryCommit {
    pub sha: String,
    pub commit: CommitDetail,
    pub author: Option<Account>,
    pub committer: Option<Account>,
}

/// `GET /repos/{owner}/{repo}/compare/{base}...{head}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Comparison {
    pub total_commits: Option<u64>,
    pub commits: Vec<RepositoryCommit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// `GET /repos/{owner}/{repo}/git/matching-refs/tags`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Reference {
    #[serde(rename = "ref")]
    pub name: String,
    pub object: GitObject,
}

/// `GET /repos/{owner}/{repo}/git/tags/{sha}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnnotatedTag {
    pub tag: String,
    pub object: GitObject,
}

/// `POST /repos/{owner}/{repo}/git/refs`
#[derive(Debug, Clone, Serialize)]
pub struct NewReference<'a> {
    #[serde(rename = "ref")]
    pub name: String,
    pub sha: &'a str,
}

/// `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, Serialize)]
pub struct NewRelease<'a> {
    pub tag_name: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub target_commitish: &'a str,
    pub body: &'a str,
    pub prerelease: bool,
}

/// Pagination query parameters.
#[derive(Debug, Clone, Serialize)]
pub struct PageParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
    pub per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}
