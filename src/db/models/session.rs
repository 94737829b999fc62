use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::participant::ParticipantId;

/// Base tutor_sessions table model. One row per
/// (participant, date, day, role-context); re-logging the same key
/// overwrites the counters rather than accumulating.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TutorSession {
    pub id: Uuid,
    pub participant_id: ParticipantId,
    pub session_date: NaiveDate,
    pub day_number: i32,
    pub role_context: Option<String>,
    pub message_count: i32,
    pub question_count: i32,
    pub session_duration_minutes: Option<i32>,
    pub depth_score: Option<i32>,
    pub iteration_count: i32,
    pub topic: Option<String>,
    pub insights_captured: Vec<String>,
    pub tutor_model: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a tutor-session upsert; the row key
/// (today's date + the fields below) and timestamps are filled in by the
/// repository.
#[derive(Debug, Clone)]
pub struct NewTutorSession {
    pub participant_id: ParticipantId,
    pub day_number: i32,
    pub role_context: Option<String>,
    pub message_count: i32,
    pub question_count: i32,
    pub session_duration_minutes: Option<i32>,
    pub depth_score: Option<i32>,
    pub iteration_count: i32,
    pub topic: Option<String>,
    pub insights_captured: Vec<String>,
    pub tutor_model: Option<String>,
}

/// Base role_expo_interactions table model. One row per
/// (participant, role code, interaction type), marking a micro-activity
/// complete.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RoleExpoInteraction {
    pub id: Uuid,
    pub participant_id: ParticipantId,
    pub role_code: String,
    pub interaction_type: String,
    pub notes: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// Validated input for a role-expo interaction upsert.
#[derive(Debug, Clone)]
pub struct NewRoleInteraction {
    pub participant_id: ParticipantId,
    pub role_code: String,
    pub interaction_type: String,
    pub notes: Option<String>,
}
