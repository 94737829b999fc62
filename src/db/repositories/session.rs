use sqlx::{Pool, Postgres, Result as SqlxResult};
use tracing::instrument;

use crate::db::models::participant::ParticipantId;
use crate::db::models::session::{
    NewRoleInteraction, NewTutorSession, RoleExpoInteraction, TutorSession,
};

#[derive(Debug)]
pub struct SessionRepository {
    pool: &'static Pool<Postgres>,
}

impl SessionRepository {
    pub fn new(pool: &'static Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert-or-overwrite keyed on
    /// (participant_id, session_date, day_number, role_context), with
    /// session_date pinned to today. Re-logging the same key replaces the
    /// counters, it does not accumulate.
    #[instrument(skip(self, session))]
    pub async fn upsert_session(&self, session: &NewTutorSession) -> SqlxResult<TutorSession> {
        match sqlx::query_as::<_, TutorSession>(
            r#"
            INSERT INTO tutor_sessions (
                participant_id,
                session_date,
                day_number,
                role_context,
                message_count,
                question_count,
                session_duration_minutes,
                depth_score,
                iteration_count,
                topic,
                insights_captured,
                tutor_model,
                updated_at
            )
            VALUES ($1, CURRENT_DATE, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
            ON CONFLICT (participant_id, session_date, day_number, role_context)
            DO UPDATE SET
                message_count = EXCLUDED.message_count,
                question_count = EXCLUDED.question_count,
                session_duration_minutes = EXCLUDED.session_duration_minutes,
                depth_score = EXCLUDED.depth_score,
                iteration_count = EXCLUDED.iteration_count,
                topic = EXCLUDED.topic,
                insights_captured = EXCLUDED.insights_captured,
                tutor_model = EXCLUDED.tutor_model,
                updated_at = NOW()
            RETURNING
                id,
                participant_id,
                session_date,
                day_number,
                role_context,
                message_count,
                question_count,
                session_duration_minutes,
                depth_score,
                iteration_count,
                topic,
                insights_captured,
                tutor_model,
                updated_at
            "#,
        )
        .bind(&session.participant_id)
        .bind(session.day_number)
        .bind(&session.role_context)
        .bind(session.message_count)
        .bind(session.question_count)
        .bind(session.session_duration_minutes)
        .bind(session.depth_score)
        .bind(session.iteration_count)
        .bind(&session.topic)
        .bind(&session.insights_captured)
        .bind(&session.tutor_model)
        .fetch_one(self.pool)
        .await
        {
            Ok(row) => Ok(row),
            Err(e) => {
                tracing::error!(error = ?e, "failure during tutor session upsert");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn sessions_for(
        &self,
        participant_id: &ParticipantId,
        day: Option<i32>,
    ) -> SqlxResult<Vec<TutorSession>> {
        let base = r#"
            SELECT
                id,
                participant_id,
                session_date,
                day_number,
                role_context,
                message_count,
                question_count,
                session_duration_minutes,
                depth_score,
                iteration_count,
                topic,
                insights_captured,
                tutor_model,
                updated_at
            FROM tutor_sessions
            WHERE participant_id = $1
        "#;

        match day {
            Some(day) => {
                sqlx::query_as::<_, TutorSession>(&format!(
                    "{base} AND day_number = $2 ORDER BY session_date DESC"
                ))
                .bind(participant_id)
                .bind(day)
                .fetch_all(self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, TutorSession>(&format!("{base} ORDER BY session_date DESC"))
                    .bind(participant_id)
                    .fetch_all(self.pool)
                    .await
            }
        }
    }

    /// Insert-or-overwrite keyed on
    /// (participant_id, role_code, interaction_type).
    #[instrument(skip(self, interaction))]
    pub async fn upsert_role_interaction(
        &self,
        interaction: &NewRoleInteraction,
    ) -> SqlxResult<RoleExpoInteraction> {
        match sqlx::query_as::<_, RoleExpoInteraction>(
            r#"
            INSERT INTO role_expo_interactions (
                participant_id,
                role_code,
                interaction_type,
                notes,
                completed_at
            )
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (participant_id, role_code, interaction_type)
            DO UPDATE SET
                notes = EXCLUDED.notes,
                completed_at = NOW()
            RETURNING
                id,
                participant_id,
                role_code,
                interaction_type,
                notes,
                completed_at
            "#,
        )
        .bind(&interaction.participant_id)
        .bind(&interaction.role_code)
        .bind(&interaction.interaction_type)
        .bind(&interaction.notes)
        .fetch_one(self.pool)
        .await
        {
            Ok(row) => Ok(row),
            Err(e) => {
                tracing::error!(error = ?e, "failure during role interaction upsert");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn interactions_for(
        &self,
        participant_id: &ParticipantId,
    ) -> SqlxResult<Vec<RoleExpoInteraction>> {
        sqlx::query_as::<_, RoleExpoInteraction>(
            r#"
            SELECT
                id,
                participant_id,
                role_code,
                interaction_type,
                notes,
                completed_at
            FROM role_expo_interactions
            WHERE participant_id = $1
            ORDER BY completed_at DESC
            "#,
        )
        .bind(participant_id)
        .fetch_all(self.pool)
        .await
    }

    /// Count of distinct role codes the participant has interacted with,
    /// for the all-roles-complete progress flag.
    #[instrument(skip(self))]
    pub async fn distinct_role_count(&self, participant_id: &ParticipantId) -> SqlxResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT role_code)
            FROM role_expo_interactions
            WHERE participant_id = $1
            "#,
        )
        .bind(participant_id)
        .fetch_one(self.pool)
        .await
    }
}
