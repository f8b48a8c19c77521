//! GitHub API operations using octocrab.

pub mod auth;
pub mod client;
mod commits;
pub mod models;
mod release;
pub mod retry;
mod tags;

pub use auth::resolve_token;
pub use client::{GitHubRepository, PROVIDER_NAME};
pub use retry::RetryPolicy;

/// Page size for every paginated listing (GitHub's maximum).
const PER_PAGE: u8 = 100;

/// Safety limit to prevent endless pagination.
const MAX_PAGES: u32 = 1000;
