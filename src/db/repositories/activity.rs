use sqlx::{Pool, Postgres, Result as SqlxResult};
use tracing::instrument;

use crate::db::models::achievement::ActivityAction;
use crate::db::models::participant::ParticipantId;

/// Append-only audit trail. Rows are never updated or deleted by the
/// pipeline.
#[derive(Debug)]
pub struct ActivityLogRepository {
    pool: &'static Pool<Postgres>,
}

impl ActivityLogRepository {
    pub fn new(pool: &'static Pool<Postgres>) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, details))]
    pub async fn append(
        &self,
        participant_id: &ParticipantId,
        action: ActivityAction,
        details: serde_json::Value,
    ) -> SqlxResult<()> {
        match sqlx::query(
            r#"
            INSERT INTO activity_log (participant_id, action, details, created_at)
            VALUES ($1, $2, $3, NOW())
            "#,
        )
        .bind(participant_id)
        .bind(action.as_str())
        .bind(details)
        .execute(self.pool)
        .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(error = ?e, "failure during activity append");
                Err(e)
            }
        }
    }
}
