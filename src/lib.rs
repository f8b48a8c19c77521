//! provider-github - GitHub provider plugin for release hosts.
//!
//! # Overview
//!
//! A release host (semantic-release style) parses commits, computes versions
//! and renders changelogs. This crate answers the repository-side questions
//! for GitHub and GitHub Enterprise: which commits lie between two points,
//! which version tags exist, and how to publish a new release.

pub mod config;
pub mod error;
pub mod github;
pub mod plugin;
pub mod provider;
pub mod version;

// Re-export commonly used types
pub use config::GitHubConfig;
pub use error::ProviderError;
pub use github::GitHubRepository;
pub use provider::{
    CreateReleaseConfig, Provider, ProviderConfig, RawCommit, Release, RepositoryInfo,
};
