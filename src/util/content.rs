//! Best-effort retrieval of a submission's README from the raw content host.
//!
//! Failures here never fail the pipeline: a timeout, connection error, or
//! non-success status all degrade to `None` and the submission proceeds
//! without self-reported content.

use std::time::Duration;

use tracing::instrument;

use crate::util::env::Var;
use crate::var;

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the raw-content URL for a participant's submission folder on a
/// given branch.
pub fn readme_url(base: &str, username: &str, repo: &str, branch: &str, folder: &str) -> String {
    format!("{base}/{username}/{repo}/{branch}/{folder}/README.md")
}

#[instrument]
pub async fn fetch_readme_from(url: &str) -> Option<String> {
    let client = match reqwest::Client::builder().timeout(FETCH_TIMEOUT).build() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = ?e, "could not build content fetch client");
            return None;
        }
    };

    let res = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(error = ?e, "readme fetch failed");
            return None;
        }
    };

    if !res.status().is_success() {
        tracing::debug!(status = %res.status(), "readme fetch returned non-success");
        return None;
    }

    match res.text().await {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(error = ?e, "readme body read failed");
            None
        }
    }
}

/// Fetches the README for a submission using the configured content host and
/// course repository name.
#[instrument]
pub async fn fetch_readme(username: &str, branch: &str, folder: &str) -> Option<String> {
    let base = var!(Var::ContentHostBase).await.ok()?;
    let repo = var!(Var::CourseRepoName).await.ok()?;

    let url = readme_url(base, username, repo, branch, folder);
    fetch_readme_from(&url).await
}
