//! Version tag enumeration with annotated-tag resolution.

use octocrab::Page;
use regex_lite::Regex;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::provider::Release;
use crate::version::parse_version;

use super::client::Connection;
use super::models::{AnnotatedTag, PageParams, Reference};
use super::retry::with_retry;
use super::{MAX_PAGES, PER_PAGE};

const TAG_PREFIX: &str = "refs/tags/";
const OPERATION: &str = "list tags";

/// List every tag that parses as a version, optionally filtered by `pattern`.
///
/// A repository without any tags answers 404, which yields an empty list.
pub(crate) async fn fetch_releases(
    conn: &Connection,
    pattern: &str,
) -> Result<Vec<Release>, ProviderError> {
    let filter = if pattern.is_empty() {
        None
    } else {
        Some(
            Regex::new(pattern).map_err(|source| ProviderError::InvalidTagPattern {
                pattern: pattern.to_string(),
                source,
            })?,
        )
    };

    let route = conn.repo_route("/git/matching-refs/tags");
    let params = PageParams {
        sha: None,
        per_page: PER_PAGE,
        page: None,
    };

    let first: octocrab::Result<Page<Reference>> =
        with_retry(&conn.config.retry, OPERATION, || {
            conn.client.get(&route, Some(&params))
        })
        .await;

    let mut page = match first {
        Ok(page) => page,
        Err(e) => return keep_on_not_found(Vec::new(), e),
    };

    let mut releases = Vec::new();
    let mut pages = 1;

    loop {
        for reference in std::mem::take(&mut page.items) {
            if let Some(release) = resolve(conn, reference, filter.as_ref()).await {
                releases.push(release);
            }
        }

        let next = with_retry(&conn.config.retry, OPERATION, || {
            conn.client.get_page::<Reference>(&page.next)
        })
        .await;

        page = match next {
            Ok(Some(next)) => next,
            Ok(None) => break,
            Err(e) => return keep_on_not_found(releases, e),
        };

        pages += 1;
        if pages > MAX_PAGES {
            warn!(
                "Reached {}-page safety limit while listing tags for {}/{}",
                MAX_PAGES, conn.config.owner, conn.config.repo
            );
            break;
        }
    }

    debug!(count = releases.len(), "Resolved version tags");
    Ok(releases)
}

/// A 404 from the tag listing means there is nothing (more) to list.
fn keep_on_not_found(
    releases: Vec<Release>,
    err: octocrab::Error,
) -> Result<Vec<Release>, ProviderError> {
    let err = ProviderError::api(OPERATION, err);
    if err.status_code() == Some(404) {
        debug!(count = releases.len(), "Tag listing answered 404");
        return Ok(releases);
    }
    Err(err)
}

/// Turn a tag reference into a release, or `None` if it does not qualify.
async fn resolve(conn: &Connection, reference: Reference, filter: Option<&Regex>) -> Option<Release> {
    let tag = reference
        .name
        .strip_prefix(TAG_PREFIX)
        .unwrap_or(&reference.name);

    if filter.is_some_and(|re| !re.is_match(tag)) {
        return None;
    }

    let Some(version) = parse_version(tag) else {
        debug!(tag, "Skipping tag that is not a version");
        return None;
    };

    let sha = match reference.object.kind.as_str() {
        "commit" => reference.object.sha.clone(),
        "tag" => dereference_tag(conn, tag, &reference.object.sha).await?,
        other => {
            debug!(tag, kind = other, "Skipping tag that does not point at a commit");
            return None;
        }
    };

    Some(Release { sha, version })
}

/// Follow an annotated tag object to the commit it tags.
async fn dereference_tag(conn: &Connection, tag: &str, tag_sha: &str) -> Option<String> {
    let route = conn.repo_route(&format!("/git/tags/{}", tag_sha));

    let annotated: AnnotatedTag = match with_retry(&conn.config.retry, "get tag", || {
        conn.client.get(&route, None::<&()>)
    })
    .await
    {
        Ok(annotated) => annotated,
        Err(e) => {
            debug!(tag, error = %e, "Could not resolve annotated tag, skipping");
            return None;
        }
    };

    if annotated.object.kind != "commit" {
        debug!(
            tag,
            kind = %annotated.object.kind,
            "Annotated tag does not point at a commit, skipping"
        );
        return None;
    }

    Some(annotated.object.sha)
}
