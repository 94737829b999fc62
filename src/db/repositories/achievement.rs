use std::collections::HashSet;

use serde_json::json;
use sqlx::{Pool, Postgres, Result as SqlxResult};
use tracing::instrument;

use crate::db::models::achievement::{Achievement, ActivityAction};
use crate::db::models::participant::ParticipantId;
use crate::db::repositories::Tx;

#[derive(Debug)]
pub struct AchievementRepository {
    pool: &'static Pool<Postgres>,
}

impl AchievementRepository {
    pub fn new(pool: &'static Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Catalog lookup by code. A miss means the catalog has not been seeded
    /// with this badge; the caller skips awarding rather than failing.
    #[instrument(skip(self))]
    pub async fn get_by_code(&self, code: &str) -> SqlxResult<Option<Achievement>> {
        sqlx::query_as::<_, Achievement>(
            r#"
            SELECT id, code, points_bonus
            FROM achievements
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await
    }

    /// The set of codes a participant has already earned, fetched up front
    /// so the evaluator can early-exit without a write attempt per rule.
    #[instrument(skip(self))]
    pub async fn earned_codes(&self, participant_id: &ParticipantId) -> SqlxResult<HashSet<String>> {
        let codes = sqlx::query_scalar::<_, String>(
            r#"
            SELECT a.code
            FROM participant_achievements pa
            JOIN achievements a ON a.id = pa.achievement_id
            WHERE pa.participant_id = $1
            "#,
        )
        .bind(participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(codes.into_iter().collect())
    }

    /// Awards one badge: join row plus activity-log entry in a single
    /// transaction. When the join row already exists (lost race), the
    /// activity entry is skipped too so the log never double-reports.
    #[instrument(skip(self, achievement), fields(code = %achievement.code))]
    pub async fn award(
        &self,
        participant_id: &ParticipantId,
        achievement: &Achievement,
    ) -> SqlxResult<bool> {
        let participant_id = *participant_id;
        let achievement = achievement.clone();

        Tx::with_tx(self.pool, |mut tx| async move {
            let result = async {
                let inserted = tx
                    .insert_participant_achievement(&participant_id, &achievement.id)
                    .await?;

                if inserted {
                    tx.insert_activity(
                        &participant_id,
                        ActivityAction::Achievement,
                        json!({ "achievement_code": achievement.code }),
                    )
                    .await?;
                }

                Ok(inserted)
            }
            .await;

            (tx, result)
        })
        .await
    }
}
