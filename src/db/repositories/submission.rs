use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Result as SqlxResult};
use tracing::instrument;

use crate::db::models::participant::ParticipantId;
use crate::db::models::submission::{NewSubmission, Submission};

#[derive(Debug)]
pub struct SubmissionRepository {
    pool: &'static Pool<Postgres>,
}

impl SubmissionRepository {
    pub fn new(pool: &'static Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert-or-overwrite keyed on (participant_id, assignment_id). A
    /// re-push replaces the previous submission in place; no history is
    /// retained.
    #[instrument(skip(self, submission))]
    pub async fn upsert(&self, submission: &NewSubmission) -> SqlxResult<Submission> {
        match sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                participant_id,
                assignment_id,
                commit_sha,
                commit_message,
                commit_url,
                readme_content,
                self_rating,
                points_earned,
                status,
                submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'submitted', NOW())
            ON CONFLICT (participant_id, assignment_id)
            DO UPDATE SET
                commit_sha = EXCLUDED.commit_sha,
                commit_message = EXCLUDED.commit_message,
                commit_url = EXCLUDED.commit_url,
                readme_content = EXCLUDED.readme_content,
                self_rating = EXCLUDED.self_rating,
                points_earned = EXCLUDED.points_earned,
                status = EXCLUDED.status,
                submitted_at = NOW()
            RETURNING
                id,
                participant_id,
                assignment_id,
                commit_sha,
                commit_message,
                commit_url,
                readme_content,
                self_rating,
                points_earned,
                status,
                submitted_at
            "#,
        )
        .bind(&submission.participant_id)
        .bind(&submission.assignment_id)
        .bind(&submission.commit_sha)
        .bind(&submission.commit_message)
        .bind(&submission.commit_url)
        .bind(&submission.readme_content)
        .bind(submission.self_rating)
        .bind(submission.points_earned)
        .fetch_one(self.pool)
        .await
        {
            Ok(row) => Ok(row),
            Err(e) => {
                tracing::error!(error = ?e, "failure during submission upsert");
                Err(e)
            }
        }
    }

    /// All of a participant's submission timestamps, oldest first, so the
    /// achievement evaluator has a well-defined "most recent" entry.
    #[instrument(skip(self))]
    pub async fn history_for(
        &self,
        participant_id: &ParticipantId,
    ) -> SqlxResult<Vec<DateTime<Utc>>> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT submitted_at
            FROM submissions
            WHERE participant_id = $1
            ORDER BY submitted_at ASC
            "#,
        )
        .bind(participant_id)
        .fetch_all(self.pool)
        .await
    }
}
