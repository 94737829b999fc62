use sqlx::{Pool, Postgres, Result as SqlxResult};
use tracing::instrument;

use crate::db::models::participant::Participant;

#[derive(Debug)]
pub struct ParticipantRepository {
    pool: &'static Pool<Postgres>,
}

impl ParticipantRepository {
    pub fn new(pool: &'static Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Resolves a pushing user to a registered participant. `None` is the
    /// benign "unknown participant" outcome - events from unregistered
    /// users are dropped by design.
    #[instrument(skip(self))]
    pub async fn get_by_github_username(&self, username: &str) -> SqlxResult<Option<Participant>> {
        sqlx::query_as::<_, Participant>(
            r#"
            SELECT
                id,
                github_username,
                email,
                role,
                is_admin,
                is_mentor,
                created_at
            FROM participants
            WHERE github_username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await
    }
}
