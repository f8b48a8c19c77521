//! GitHub token detection.
//!
//! Resolution order:
//! 1. `token` from the host configuration
//! 2. GITHUB_TOKEN environment variable
//! 3. GH_TOKEN environment variable

use std::env;

use crate::error::ProviderError;

/// Resolve the GitHub token, preferring an explicitly configured one.
pub fn resolve_token(configured: Option<&str>) -> Result<String, ProviderError> {
    if let Some(token) = configured.filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = env::var(var) {
            if !token.is_empty() {
                return Ok(token);
            }
        }
    }

    Err(ProviderError::TokenMissing)
}
