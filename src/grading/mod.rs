//! Pure submission-grading logic: folder classification, point awards,
//! self-rating extraction, and the achievement rule set. Everything here is
//! side-effect free; persistence lives in `crate::db`.

pub mod achievements;
pub mod classify;
pub mod points;
pub mod rating;
