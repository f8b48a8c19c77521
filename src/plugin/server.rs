//! Request loop serving a [`Provider`] to the release host.

use serde::Serialize;
use serde_json::Value;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::provider::Provider;

use super::protocol::{Reply, Request};

/// Answer requests read from `reader` until an empty line or EOF.
///
/// Malformed requests get an error reply; the session continues.
pub async fn serve<P, R, W>(provider: &mut P, reader: R, mut writer: W) -> io::Result<()>
where
    P: Provider + ?Sized,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            debug!("Empty line, ending session");
            break;
        }

        let reply = match Request::parse(&line) {
            Ok(request) => dispatch(provider, request).await,
            Err(e) => {
                warn!(error = %e, "Malformed request");
                Reply::Error(format!("invalid request: {}", e))
            }
        };

        let mut out = serde_json::to_string(&reply)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Run a single request against the provider.
pub async fn dispatch<P>(provider: &mut P, request: Request) -> Reply
where
    P: Provider + ?Sized,
{
    let method = request.method();
    debug!(method, "Handling request");

    let reply = match request {
        Request::Init { config } => to_reply(provider.init(&config).await),
        Request::Info => to_reply(provider.info().await),
        Request::Commits { from_sha, to_sha } => {
            to_reply(provider.commits(&from_sha, &to_sha).await)
        }
        Request::Releases { pattern } => to_reply(provider.releases(&pattern).await),
        Request::CreateRelease(config) => to_reply(provider.create_release(&config).await),
        Request::Name => Reply::Result(Value::from(provider.name())),
        Request::Version => Reply::Result(Value::from(provider.version())),
    };

    if let Reply::Error(message) = &reply {
        warn!(method, error = %message, "Request failed");
    }
    reply
}

fn to_reply<T: Serialize>(result: Result<T, ProviderError>) -> Reply {
    match result {
        Ok(value) => match serde_json::to_value(value) {
            Ok(value) => Reply::Result(value),
            Err(e) => Reply::Error(format!("failed to encode result: {}", e)),
        },
        Err(e) => Reply::Error(e.to_string()),
    }
}
