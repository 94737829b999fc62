use sqlx::{Pool, Postgres, Result as SqlxResult, Transaction};
use tracing::instrument;

use crate::db::models::achievement::{AchievementId, ActivityAction};
use crate::db::models::participant::ParticipantId;

pub mod achievement;
pub mod activity;
pub mod assignment;
pub mod participant;
pub mod session;
pub mod submission;

pub struct Tx<'a> {
    inner: Option<Transaction<'a, Postgres>>,
}

impl<'a> Tx<'a> {
    /// Runs `f` inside a transaction, committing on `Ok` and dropping (and
    /// therefore rolling back) on `Err`.
    #[instrument(skip(pool, f))]
    pub async fn with_tx<F, Fut, T>(pool: &'static Pool<Postgres>, f: F) -> SqlxResult<T>
    where
        F: FnOnce(Tx<'a>) -> Fut,
        Fut: Future<Output = (Tx<'a>, SqlxResult<T>)>,
    {
        let tx = Self::begin(pool).await?;
        let (mut tx, result) = f(tx).await;

        match result {
            Ok(val) => {
                tx.commit().await?;
                Ok(val)
            }
            Err(e) => {
                tracing::trace!(error = ?e, "transacted query failure");
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    #[instrument(skip(pool))]
    pub async fn begin(pool: &'static Pool<Postgres>) -> SqlxResult<Self> {
        let inner = pool.begin().await?;
        Ok(Self { inner: Some(inner) })
    }

    #[instrument(skip(self))]
    pub async fn commit(&mut self) -> SqlxResult<()> {
        if let Some(tx) = self.inner.take() {
            tx.commit().await
        } else {
            Err(sqlx::Error::Protocol(
                "Transaction already completed".into(),
            ))
        }
    }

    #[instrument(skip(self))]
    pub async fn rollback(&mut self) -> SqlxResult<()> {
        if let Some(tx) = self.inner.take() {
            tx.rollback().await
        } else {
            Err(sqlx::Error::Protocol(
                "Transaction already completed".into(),
            ))
        }
    }

    fn inner_mut(&mut self) -> SqlxResult<&mut Transaction<'a, Postgres>> {
        self.inner
            .as_mut()
            .ok_or_else(|| sqlx::Error::Protocol("Transaction already completed".into()))
    }

    /// Inserts an earned-badge join row. `ON CONFLICT DO NOTHING` is the
    /// real at-most-once guard: two concurrent evaluations can both pass the
    /// in-process earned-set check, and only the constraint keeps the award
    /// single. Returns whether a row was actually written.
    #[instrument(skip(self))]
    pub async fn insert_participant_achievement(
        &mut self,
        participant_id: &ParticipantId,
        achievement_id: &AchievementId,
    ) -> SqlxResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO participant_achievements (participant_id, achievement_id, earned_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (participant_id, achievement_id)
            DO NOTHING
            "#,
        )
        .bind(participant_id)
        .bind(achievement_id)
        .execute(&mut **self.inner_mut()?)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Appends to the activity log; this table is never updated or deleted
    /// by the pipeline.
    #[instrument(skip(self, details))]
    pub async fn insert_activity(
        &mut self,
        participant_id: &ParticipantId,
        action: ActivityAction,
        details: serde_json::Value,
    ) -> SqlxResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_log (participant_id, action, details, created_at)
            VALUES ($1, $2, $3, NOW())
            "#,
        )
        .bind(participant_id)
        .bind(action.as_str())
        .bind(details)
        .execute(&mut **self.inner_mut()?)
        .await?;

        Ok(())
    }
}
