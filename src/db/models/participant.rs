use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct ParticipantId(pub Uuid);

/// Base participants table model. Created at onboarding, referenced by every
/// other entity, never deleted in normal flow.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Participant {
    pub id: ParticipantId,
    pub github_username: String,
    pub email: String,
    pub role: Option<String>,
    pub is_admin: bool,
    pub is_mentor: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Uuid> for ParticipantId {
    fn from(value: Uuid) -> Self {
        ParticipantId(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
