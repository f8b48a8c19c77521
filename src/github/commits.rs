//! Commit enumeration, either by listing history or by comparing two commits.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use octocrab::Page;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::provider::RawCommit;

use super::client::Connection;
use super::models::{Account, Comparison, PageParams, RepositoryCommit, Signature};
use super::retry::with_retry;
use super::{MAX_PAGES, PER_PAGE};

/// Fetch the commits between `from_sha` (exclusive) and `to_sha`.
pub(crate) async fn fetch_commits(
    conn: &Connection,
    from_sha: &str,
    to_sha: &str,
) -> Result<Vec<RawCommit>, ProviderError> {
    // The first release has no base to compare against and wants everything.
    if conn.config.compare_commits && !from_sha.is_empty() {
        fetch_compared(conn, from_sha, to_sha).await
    } else {
        fetch_listed(conn, from_sha, to_sha).await
    }
}

/// Walk the commit list from `to_sha` until `from_sha` shows up.
async fn fetch_listed(
    conn: &Connection,
    from_sha: &str,
    to_sha: &str,
) -> Result<Vec<RawCommit>, ProviderError> {
    const OPERATION: &str = "list commits";

    let route = conn.repo_route("/commits");
    let params = PageParams {
        sha: Some(to_sha).filter(|s| !s.is_empty()),
        per_page: PER_PAGE,
        page: None,
    };

    let mut page: Page<RepositoryCommit> = with_retry(&conn.config.retry, OPERATION, || {
        conn.client.get(&route, Some(&params))
    })
    .await
    .map_err(|e| ProviderError::api(OPERATION, e))?;

    let mut all_commits = Vec::new();
    let mut pages = 1;

    loop {
        for commit in std::mem::take(&mut page.items) {
            if !from_sha.is_empty() && commit.sha == from_sha {
                debug!(
                    from = from_sha,
                    count = all_commits.len(),
                    "Reached base commit"
                );
                return Ok(all_commits);
            }
            all_commits.push(to_raw_commit(commit));
        }

        let next = with_retry(&conn.config.retry, OPERATION, || {
            conn.client.get_page::<RepositoryCommit>(&page.next)
        })
        .await
        .map_err(|e| ProviderError::api(OPERATION, e))?;

        page = match next {
            Some(next) => next,
            None => break,
        };

        pages += 1;
        if pages > MAX_PAGES {
            warn!(
                "Reached {}-page safety limit while listing commits for {}/{}",
                MAX_PAGES, conn.config.owner, conn.config.repo
            );
            break;
        }
    }

    Ok(all_commits)
}

/// Use the compare endpoint, which already limits the result to the range.
async fn fetch_compared(
    conn: &Connection,
    from_sha: &str,
    to_sha: &str,
) -> Result<Vec<RawCommit>, ProviderError> {
    const OPERATION: &str = "compare commits";

    let route = conn.repo_route(&format!("/compare/{}...{}", from_sha, to_sha));
    let mut all_commits = Vec::new();
    let mut page = 1u32;

    loop {
        let params = PageParams {
            sha: None,
            per_page: PER_PAGE,
            page: Some(page),
        };

        let comparison: Comparison = with_retry(&conn.config.retry, OPERATION, || {
            conn.client.get(&route, Some(&params))
        })
        .await
        .map_err(|e| ProviderError::api(OPERATION, e))?;

        let received = comparison.commits.len();
        all_commits.extend(comparison.commits.into_iter().map(to_raw_commit));

        let more = received == usize::from(PER_PAGE)
            && comparison
                .total_commits
                .is_none_or(|total| (all_commits.len() as u64) < total);
        if !more {
            break;
        }

        page += 1;
        if page > MAX_PAGES {
            warn!(
                "Reached {}-page safety limit while comparing {}...{}",
                MAX_PAGES, from_sha, to_sha
            );
            break;
        }
    }

    debug!(
        from = from_sha,
        to = to_sha,
        count = all_commits.len(),
        "Compared commits"
    );
    Ok(all_commits)
}

fn to_raw_commit(commit: RepositoryCommit) -> RawCommit {
    let mut annotations = BTreeMap::new();

    annotate_account(&mut annotations, "author", commit.author.as_ref());
    annotate_signature(&mut annotations, "author", commit.commit.author.as_ref());
    annotate_account(&mut annotations, "committer", commit.committer.as_ref());
    annotate_signature(&mut annotations, "committer", commit.commit.committer.as_ref());

    RawCommit {
        sha: commit.sha,
        raw_message: commit.commit.message,
        annotations,
    }
}

fn annotate_account(out: &mut BTreeMap<String, String>, role: &str, account: Option<&Account>) {
    out.insert(
        format!("{role}_login"),
        account.map(|a| a.login.clone()).unwrap_or_default(),
    );
}

/// Zero time, in the same format as real dates, for signatures without one.
const ZERO_DATE: &str = "0001-01-01T00:00:00Z";

fn annotate_signature(
    out: &mut BTreeMap<String, String>,
    role: &str,
    signature: Option<&Signature>,
) {
    let (name, email) = signature
        .map(|sig| (sig.name.clone(), sig.email.clone()))
        .unwrap_or_default();
    let date = signature
        .and_then(|sig| sig.date)
        .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| ZERO_DATE.to_string());

    out.insert(format!("{role}_name"), name);
    out.insert(format!("{role}_email"), email);
    out.insert(format!("{role}_date"), date);
}
