use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::api::server::{AppState, JsonResult, RouteError};
use crate::api::validate::{
    RoleExpoPayload, TutorSessionPayload, validate_role_expo, validate_tutor_session,
};
use crate::constants::ROLE_CATALOG_SIZE;
use crate::db::prelude::*;

/// Discriminator for the session-logging endpoint; anything other than
/// `role_expo` is treated as a regular tutor session, matching the default.
const TYPE_ROLE_EXPO: &str = "role_expo";

#[derive(Serialize)]
pub struct SessionLogged {
    pub success: bool,
    pub session: TutorSession,
}

#[derive(Serialize)]
pub struct RoleExpoLogged {
    pub success: bool,
    pub interaction: RoleExpoInteraction,
    pub roles_explored: i64,
    pub all_roles_complete: bool,
}

#[instrument(skip(state, body))]
pub async fn log_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, RouteError> {
    let kind = body
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("session")
        .to_string();

    if kind == TYPE_ROLE_EXPO {
        let payload: RoleExpoPayload =
            serde_json::from_value(body).map_err(RouteError::MalformedEvent)?;
        let interaction = validate_role_expo(payload).map_err(RouteError::Validation)?;

        let repo = SessionRepository::new(state.db_pool);
        let row = repo.upsert_role_interaction(&interaction).await?;
        let roles_explored = repo.distinct_role_count(&interaction.participant_id).await?;

        Ok(Json(RoleExpoLogged {
            success: true,
            interaction: row,
            roles_explored,
            all_roles_complete: roles_explored >= ROLE_CATALOG_SIZE as i64,
        })
        .into_response())
    } else {
        let payload: TutorSessionPayload =
            serde_json::from_value(body).map_err(RouteError::MalformedEvent)?;
        let session = validate_tutor_session(payload).map_err(RouteError::Validation)?;

        let row = SessionRepository::new(state.db_pool)
            .upsert_session(&session)
            .await?;

        Ok(Json(SessionLogged {
            success: true,
            session: row,
        })
        .into_response())
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub participant_id: Option<Uuid>,
    pub day: Option<i32>,
}

#[derive(Serialize)]
pub struct SessionHistory {
    pub sessions: Vec<TutorSession>,
    pub role_interactions: Vec<RoleExpoInteraction>,
    pub summary: SessionSummary,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub total_sessions: usize,
    pub total_messages: i64,
    pub total_questions: i64,
    pub avg_depth_score: String,
    pub roles_explored: usize,
}

#[instrument(skip(state))]
pub async fn session_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> JsonResult<SessionHistory> {
    let participant_id = params
        .participant_id
        .map(ParticipantId)
        .ok_or(RouteError::MissingParam("participant_id"))?;

    let repo = SessionRepository::new(state.db_pool);
    let sessions = repo.sessions_for(&participant_id, params.day).await?;
    let role_interactions = repo.interactions_for(&participant_id).await?;

    let summary = summarize(&sessions, &role_interactions);

    Ok(Json(SessionHistory {
        sessions,
        role_interactions,
        summary,
    }))
}

/// Derived statistics over a participant's session history. The depth
/// average only considers sessions that carry a depth score and degrades to
/// `"0.00"` when none do.
pub fn summarize(
    sessions: &[TutorSession],
    interactions: &[RoleExpoInteraction],
) -> SessionSummary {
    let total_messages = sessions.iter().map(|s| i64::from(s.message_count)).sum();
    let total_questions = sessions.iter().map(|s| i64::from(s.question_count)).sum();

    let depth_scores: Vec<i32> = sessions.iter().filter_map(|s| s.depth_score).collect();
    let avg_depth = if depth_scores.is_empty() {
        0.0
    } else {
        f64::from(depth_scores.iter().sum::<i32>()) / depth_scores.len() as f64
    };

    let distinct_roles: HashSet<&str> = interactions.iter().map(|r| r.role_code.as_str()).collect();

    SessionSummary {
        total_sessions: sessions.len(),
        total_messages,
        total_questions,
        avg_depth_score: format!("{avg_depth:.2}"),
        roles_explored: distinct_roles.len(),
    }
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn session(messages: i32, questions: i32, depth: Option<i32>) -> TutorSession {
        TutorSession {
            id: Uuid::new_v4(),
            participant_id: ParticipantId(Uuid::new_v4()),
            session_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            day_number: 4,
            role_context: None,
            message_count: messages,
            question_count: questions,
            session_duration_minutes: None,
            depth_score: depth,
            iteration_count: 0,
            topic: None,
            insights_captured: Vec::new(),
            tutor_model: None,
            updated_at: Utc::now(),
        }
    }

    fn interaction(role: &str, kind: &str) -> RoleExpoInteraction {
        RoleExpoInteraction {
            id: Uuid::new_v4(),
            participant_id: ParticipantId(Uuid::new_v4()),
            role_code: role.to_string(),
            interaction_type: kind.to_string(),
            notes: None,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_counts_and_avg() {
        let sessions = vec![
            session(10, 2, Some(4)),
            session(5, 1, Some(3)),
            session(7, 0, None),
        ];
        let interactions = vec![
            interaction("AI-SE", "mini_challenge"),
            interaction("AI-SE", "reflection"),
            interaction("FDE", "ai_tutor"),
        ];

        let summary = summarize(&sessions, &interactions);

        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.total_messages, 22);
        assert_eq!(summary.total_questions, 3);
        // mean over the two scored sessions only
        assert_eq!(summary.avg_depth_score, "3.50");
        assert_eq!(summary.roles_explored, 2);
    }

    #[test]
    fn test_summary_no_depth_scores() {
        let sessions = vec![session(1, 1, None)];
        let summary = summarize(&sessions, &[]);

        assert_eq!(summary.avg_depth_score, "0.00");
    }

    #[test]
    fn test_summary_empty_history() {
        let summary = summarize(&[], &[]);

        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.total_messages, 0);
        assert_eq!(summary.avg_depth_score, "0.00");
        assert_eq!(summary.roles_explored, 0);
    }
}
