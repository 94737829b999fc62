use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct AssignmentId(pub Uuid);

/// Static grading reference data, keyed by submission-folder name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: AssignmentId,
    pub folder_name: String,
    pub day: i32,

    /// "in_class" or "homework".
    #[sqlx(rename = "type")]
    pub kind: String,
    pub max_points: Option<i32>,
    pub due_at: Option<DateTime<Utc>>,
}

impl From<Uuid> for AssignmentId {
    fn from(value: Uuid) -> Self {
        AssignmentId(value)
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
