pub mod dispatch;

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::constants::{BRANCH_REF_PREFIX, GITHUB_PUSH_EVENT};
use crate::db::prelude::SubmissionId;

/// Value of the `X-GitHub-Event` header. Anything that is not a push is
/// acknowledged-and-ignored so the sender does not schedule delivery
/// retries.
#[derive(Debug)]
pub enum GithubEvent {
    Push,
    Other(String),
}

impl From<&str> for GithubEvent {
    fn from(value: &str) -> Self {
        match value {
            GITHUB_PUSH_EVENT => Self::Push,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Typed view of the push payload. The wire shape is loosely typed, so
/// everything business logic needs is optional here and checked explicitly
/// in the dispatcher before any processing.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,

    #[serde(default)]
    pub repository: Option<RepositoryInfo>,

    #[serde(default)]
    pub head_commit: Option<HeadCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryInfo {
    #[serde(default)]
    pub owner: Option<OwnerInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerInfo {
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadCommit {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub modified: Vec<String>,

    #[serde(default)]
    pub added: Vec<String>,
}

impl PushEvent {
    pub fn owner_login(&self) -> Option<&str> {
        self.repository
            .as_ref()
            .and_then(|r| r.owner.as_ref())
            .and_then(|o| o.login.as_deref())
    }

    pub fn commit_sha(&self) -> Option<&str> {
        self.head_commit.as_ref().and_then(|c| c.id.as_deref())
    }

    /// Branch name with the `refs/heads/` prefix stripped; `None` when the
    /// payload carries no ref (the content fetch then degrades).
    pub fn branch(&self) -> Option<&str> {
        self.git_ref
            .as_deref()
            .map(|r| r.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(r))
    }

    /// Modified files first, then added. Classification priority does not
    /// depend on this ordering.
    pub fn changed_files(&self) -> Vec<String> {
        let Some(commit) = &self.head_commit else {
            return Vec::new();
        };

        commit
            .modified
            .iter()
            .chain(commit.added.iter())
            .cloned()
            .collect()
    }
}

/// Terminal states of the push pipeline that map to a 200 response. Benign
/// misses (unknown participant, unrecognized folder, unknown assignment,
/// non-push event) acknowledge the delivery without processing it.
#[derive(Debug)]
pub enum PushOutcome {
    Ignored(&'static str),
    Accepted {
        submission_id: SubmissionId,
        points_earned: i32,
    },
}

#[derive(Serialize)]
struct IgnoredResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct AcceptedResponse {
    success: bool,
    submission_id: SubmissionId,
    points_earned: i32,
}

impl IntoResponse for PushOutcome {
    fn into_response(self) -> Response {
        match self {
            PushOutcome::Ignored(message) => Json(IgnoredResponse { message }).into_response(),
            PushOutcome::Accepted {
                submission_id,
                points_earned,
            } => Json(AcceptedResponse {
                success: true,
                submission_id,
                points_earned,
            })
            .into_response(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE_PUSH: &str = r#"{
        "ref": "refs/heads/main",
        "repository": { "owner": { "login": "octocat" } },
        "head_commit": {
            "id": "abc123",
            "message": "day 2 solution",
            "url": "https://github.com/octocat/repo/commit/abc123",
            "modified": ["day-02-agentic-framework/solution.py"],
            "added": ["day-02-agentic-framework/README.md"]
        }
    }"#;

    #[test]
    fn test_parse_push_event() {
        let event: PushEvent = serde_json::from_str(SAMPLE_PUSH).unwrap();

        assert_eq!(event.owner_login(), Some("octocat"));
        assert_eq!(event.commit_sha(), Some("abc123"));
        assert_eq!(event.branch(), Some("main"));
        assert_eq!(
            event.changed_files(),
            vec![
                "day-02-agentic-framework/solution.py".to_string(),
                "day-02-agentic-framework/README.md".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_sparse_payload() {
        let event: PushEvent = serde_json::from_str("{}").unwrap();

        assert_eq!(event.owner_login(), None);
        assert_eq!(event.commit_sha(), None);
        assert_eq!(event.branch(), None);
        assert!(event.changed_files().is_empty());
    }

    #[test]
    fn test_branch_without_heads_prefix_passes_through() {
        let event: PushEvent = serde_json::from_str(r#"{"ref": "main"}"#).unwrap();
        assert_eq!(event.branch(), Some("main"));
    }

    #[test]
    fn test_event_kind_from_header() {
        assert!(matches!(GithubEvent::from("push"), GithubEvent::Push));
        assert!(matches!(GithubEvent::from("ping"), GithubEvent::Other(_)));
    }
}
