use chrono::{DateTime, Utc};

use crate::constants::{DEFAULT_MAX_POINTS, LATE_PENALTY_FACTOR};

/// Derives the point award for a submission event.
///
/// Full value when the event lands at or before the due timestamp (or when
/// the assignment has no due date at all); a flat 50% floor otherwise. No
/// partial-credit curve beyond that split.
pub fn points_for(
    max_points: Option<i32>,
    due_at: Option<DateTime<Utc>>,
    observed_at: DateTime<Utc>,
) -> i32 {
    let max = max_points.unwrap_or(DEFAULT_MAX_POINTS);

    match due_at {
        Some(due) if due < observed_at => (f64::from(max) * LATE_PENALTY_FACTOR).floor() as i32,
        _ => max,
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    fn ts(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, 0, 0).unwrap()
    }

    #[test]
    fn test_on_time_full_points() {
        assert_eq!(points_for(Some(100), Some(ts(18)), ts(12)), 100);
    }

    #[test]
    fn test_exactly_at_due_counts_as_on_time() {
        assert_eq!(points_for(Some(100), Some(ts(18)), ts(18)), 100);
    }

    #[test]
    fn test_late_half_points() {
        assert_eq!(points_for(Some(100), Some(ts(12)), ts(18)), 50);
    }

    #[test]
    fn test_late_odd_max_floors() {
        assert_eq!(points_for(Some(15), Some(ts(12)), ts(18)), 7);
    }

    #[test]
    fn test_no_due_date_full_points() {
        assert_eq!(points_for(Some(100), None, ts(23)), 100);
    }

    #[test]
    fn test_missing_max_uses_default() {
        assert_eq!(points_for(None, None, ts(12)), DEFAULT_MAX_POINTS);
        assert_eq!(points_for(None, Some(ts(6)), ts(12)), 7);
    }
}
