//! Publishing a new release: tag reference plus GitHub release.

use tracing::{debug, info};

use crate::error::ProviderError;
use crate::provider::CreateReleaseConfig;
use crate::version::{parse_version, tag_for};

use super::client::Connection;
use super::models::{NewReference, NewRelease};

/// Create the tag (unless GitHub will create it from the branch) and the release.
///
/// Writes are not retried: a failed POST may still have taken effect.
pub(crate) async fn create_release(
    conn: &Connection,
    release: &CreateReleaseConfig,
) -> Result<(), ProviderError> {
    let version = parse_version(&release.new_version)
        .ok_or_else(|| ProviderError::InvalidVersion(release.new_version.clone()))?;

    let tag = tag_for(&release.new_version, conn.config.strip_v_tag_prefix);
    let prerelease = release.prerelease || !version.pre.is_empty();

    if release.branch != release.sha {
        let reference = NewReference {
            name: format!("refs/tags/{}", tag),
            sha: &release.sha,
        };
        debug!(reference = %reference.name, sha = %release.sha, "Creating tag reference");

        let _: serde_json::Value = conn
            .client
            .post(conn.repo_route("/git/refs"), Some(&reference))
            .await
            .map_err(|e| ProviderError::api("create tag", e))?;
    }

    let body = NewRelease {
        tag_name: &tag,
        name: &tag,
        target_commitish: &release.branch,
        body: &release.changelog,
        prerelease,
    };

    let _: serde_json::Value = conn
        .client
        .post(conn.repo_route("/releases"), Some(&body))
        .await
        .map_err(|e| ProviderError::api("create release", e))?;

    info!(tag = %tag, prerelease, "Created GitHub release");
    Ok(())
}
