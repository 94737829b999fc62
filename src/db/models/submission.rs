use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assignment::AssignmentId;
use super::participant::ParticipantId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct SubmissionId(pub Uuid);

/// Base submissions table model. At most one row per
/// (participant, assignment); a re-push overwrites in place, no history is
/// retained.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Submission {
    pub id: SubmissionId,
    pub participant_id: ParticipantId,
    pub assignment_id: AssignmentId,
    pub commit_sha: String,
    pub commit_message: Option<String>,
    pub commit_url: Option<String>,
    pub readme_content: Option<String>,
    pub self_rating: Option<i32>,
    pub points_earned: i32,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

/// Everything the webhook pipeline knows about a submission before the
/// upsert assigns an id and timestamp.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub participant_id: ParticipantId,
    pub assignment_id: AssignmentId,
    pub commit_sha: String,
    pub commit_message: Option<String>,
    pub commit_url: Option<String>,
    pub readme_content: Option<String>,
    pub self_rating: Option<i32>,
    pub points_earned: i32,
}

impl From<Uuid> for SubmissionId {
    fn from(value: Uuid) -> Self {
        SubmissionId(value)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
