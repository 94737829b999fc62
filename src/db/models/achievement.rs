use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct AchievementId(pub Uuid);

/// Catalog entry for an earnable badge.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Achievement {
    pub id: AchievementId,
    pub code: String,
    pub points_bonus: i32,
}

/// Actions recorded in the append-only activity log.
#[derive(Debug, Clone, Copy)]
pub enum ActivityAction {
    Submission,
    Achievement,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Submission => "submission",
            ActivityAction::Achievement => "achievement",
        }
    }
}

impl From<Uuid> for AchievementId {
    fn from(value: Uuid) -> Self {
        AchievementId(value)
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
