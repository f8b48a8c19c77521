//! Exponential backoff retry for GitHub read requests.

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::warn;

use crate::error::github_status;

/// Defaults: 3 attempts, base 1s, max 30s.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const INITIAL_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 30;

/// How often and how patiently a read request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_interval: Duration::from_secs(INITIAL_INTERVAL_SECS),
            max_interval: Duration::from_secs(MAX_INTERVAL_SECS),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_interval,
            initial_interval: self.initial_interval,
            max_interval: self.max_interval,
            max_elapsed_time: None, // attempts are counted manually
            ..Default::default()
        }
    }
}

/// Whether GitHub may answer differently if asked again.
pub fn is_transient(err: &octocrab::Error) -> bool {
    match github_status(err) {
        Some(429 | 500..=599) => true,
        Some(403) => match err {
            octocrab::Error::GitHub { source, .. } => {
                source.message.to_lowercase().contains("rate limit")
            }
            _ => false,
        },
        _ => false,
    }
}

/// Run a read request, retrying transient failures with exponential backoff.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut request: F,
) -> octocrab::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = octocrab::Result<T>>,
{
    let mut backoff = policy.backoff();
    let mut attempts = 0;

    loop {
        attempts += 1;

        match request().await {
            Ok(value) => return Ok(value),
            Err(e) if attempts < policy.max_attempts && is_transient(&e) => {
                let wait = backoff.next_backoff().unwrap_or(policy.max_interval);
                warn!(
                    operation,
                    attempt = attempts,
                    wait_ms = wait.as_millis() as u64,
                    error = %e,
                    "Transient GitHub error, retrying"
                );
                tokio::time::sleep(wait).await;
            }
            Err(e) => return Err(e),
        }
    }
}
