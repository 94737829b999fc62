use sqlx::{Pool, Postgres, Result as SqlxResult};
use tracing::instrument;

use crate::db::models::assignment::Assignment;

#[derive(Debug)]
pub struct AssignmentRepository {
    pool: &'static Pool<Postgres>,
}

impl AssignmentRepository {
    pub fn new(pool: &'static Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Exact-equality lookup of an assignment by its submission-folder key.
    /// A miss is the benign "unknown assignment" outcome.
    #[instrument(skip(self))]
    pub async fn get_by_folder(&self, folder: &str) -> SqlxResult<Option<Assignment>> {
        sqlx::query_as::<_, Assignment>(
            r#"
            SELECT
                id,
                folder_name,
                day,
                type,
                max_points,
                due_at
            FROM assignments
            WHERE folder_name = $1
            "#,
        )
        .bind(folder)
        .fetch_optional(self.pool)
        .await
    }
}
