use std::sync::LazyLock;

use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::util::env::{self, Var};
use crate::var;

pub mod models;
pub mod repositories;

pub mod prelude {
    pub use crate::db::PgError;
    pub use crate::db::db_pool;

    pub use crate::db::models::achievement::{Achievement, AchievementId, ActivityAction};
    pub use crate::db::models::assignment::{Assignment, AssignmentId};
    pub use crate::db::models::participant::{Participant, ParticipantId};
    pub use crate::db::models::session::{
        NewRoleInteraction, NewTutorSession, RoleExpoInteraction, TutorSession,
    };
    pub use crate::db::models::submission::{NewSubmission, Submission, SubmissionId};

    pub use crate::db::repositories::Tx;
    pub use crate::db::repositories::achievement::AchievementRepository;
    pub use crate::db::repositories::activity::ActivityLogRepository;
    pub use crate::db::repositories::assignment::AssignmentRepository;
    pub use crate::db::repositories::participant::ParticipantRepository;
    pub use crate::db::repositories::session::SessionRepository;
    pub use crate::db::repositories::submission::SubmissionRepository;
}

static DB_POOL: LazyLock<OnceCell<Db>> = LazyLock::new(OnceCell::new);
pub async fn db_pool() -> PgResult<&'static PgPool> {
    Ok(&DB_POOL
        .get_or_try_init(|| async { Db::new_pool().await })
        .await?
        .pool)
}

struct Db {
    pool: PgPool,
}

impl Db {
    pub async fn new_pool() -> PgResult<Self> {
        let db_url = var!(Var::DatabaseUrl).await?;
        let pool = sqlx::PgPool::connect(db_url).await?;

        Ok(Self { pool })
    }
}

pub type PgResult<T> = core::result::Result<T, PgError>;

#[derive(Debug, Error)]
pub enum PgError {
    #[error(transparent)]
    SqlxError(#[from] sqlx::Error),

    #[error("{0}")]
    EnvError(#[from] env::EnvErr),
}
