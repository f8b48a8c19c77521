//! provider-github - plugin entry point.
//!
//! The host spawns this binary and talks to it over stdin/stdout, one JSON
//! request per line. Logs go to stderr so they never corrupt the protocol.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use provider_github::GitHubRepository;
use provider_github::plugin::serve;

/// Serve the GitHub provider to a release host over stdio.
#[derive(Parser, Debug)]
#[command(name = "provider-github")]
#[command(about = "Serve the GitHub provider to a release host over stdio")]
#[command(version)]
struct Cli {
    /// Log filter such as "debug" or "provider_github=trace" (defaults to RUST_LOG, then "warn")
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level).context("Invalid --log-level filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting provider-github");

    let mut provider = GitHubRepository::default();
    serve(&mut provider, tokio::io::stdin(), tokio::io::stdout())
        .await
        .context("Plugin session failed")?;

    Ok(())
}
