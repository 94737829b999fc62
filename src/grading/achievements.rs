//! Achievement rule set.
//!
//! The evaluator is a pure function over a participant's submission history
//! summary and their already-earned codes; awarding (catalog lookup, row
//! insertion, activity logging) happens in the repository layer. The earned
//! set gate here is an early exit only - the unique constraint on
//! `participant_achievements` is what actually guarantees at-most-once under
//! concurrent evaluation.

use std::collections::HashSet;

use chrono::{DateTime, Local, Timelike, Utc};

use crate::constants::{
    EARLY_BIRD, EARLY_BIRD_BEFORE_HOUR, FIRST_BLOOD, NIGHT_OWL, NIGHT_OWL_FROM_HOUR, STREAK_3,
    STREAK_5,
};

/// Local wall-clock hour of a stored submission timestamp, for the
/// early-bird / night-owl rules.
pub fn local_hour(ts: DateTime<Utc>) -> u32 {
    ts.with_timezone(&Local).hour()
}

/// Computes the codes a participant newly qualifies for.
///
/// Rules are evaluated independently; several codes can fire from one event.
/// `latest_hour` is the local hour of the most recent submission in the whole
/// history - not necessarily the event that triggered this evaluation. A
/// late-night entry at the end of the history can therefore earn `night_owl`
/// on a later unrelated daytime check; a test below pins that behavior.
pub fn newly_qualified(
    total_submissions: usize,
    latest_hour: Option<u32>,
    earned: &HashSet<String>,
) -> Vec<&'static str> {
    let mut awards = Vec::new();

    if total_submissions == 1 && !earned.contains(FIRST_BLOOD) {
        awards.push(FIRST_BLOOD);
    }

    if total_submissions >= 3 && !earned.contains(STREAK_3) {
        awards.push(STREAK_3);
    }
    if total_submissions >= 5 && !earned.contains(STREAK_5) {
        awards.push(STREAK_5);
    }

    if let Some(hour) = latest_hour {
        if hour < EARLY_BIRD_BEFORE_HOUR && !earned.contains(EARLY_BIRD) {
            awards.push(EARLY_BIRD);
        }
        if hour >= NIGHT_OWL_FROM_HOUR && !earned.contains(NIGHT_OWL) {
            awards.push(NIGHT_OWL);
        }
    }

    awards
}

#[cfg(test)]
mod test {
    use super::*;

    fn earned(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_first_blood_on_first_submission() {
        assert_eq!(
            newly_qualified(1, Some(12), &earned(&[])),
            vec![FIRST_BLOOD]
        );
    }

    #[test]
    fn test_first_blood_only_at_exactly_one() {
        assert!(newly_qualified(0, None, &earned(&[])).is_empty());
        assert!(!newly_qualified(2, Some(12), &earned(&[])).contains(&FIRST_BLOOD));
    }

    #[test]
    fn test_streaks_fire_at_thresholds() {
        assert_eq!(newly_qualified(3, Some(12), &earned(&[])), vec![STREAK_3]);
        assert_eq!(
            newly_qualified(5, Some(12), &earned(&[])),
            vec![STREAK_3, STREAK_5]
        );
    }

    #[test]
    fn test_rules_are_independent() {
        // a fifth submission at 23:00 with nothing earned fires three codes
        assert_eq!(
            newly_qualified(5, Some(23), &earned(&[])),
            vec![STREAK_3, STREAK_5, NIGHT_OWL]
        );
    }

    #[test]
    fn test_earned_codes_never_reissued() {
        let already = earned(&[FIRST_BLOOD, STREAK_3, STREAK_5, EARLY_BIRD, NIGHT_OWL]);

        assert!(newly_qualified(1, Some(5), &already).is_empty());
        assert!(newly_qualified(5, Some(23), &already).is_empty());
    }

    #[test]
    fn test_idempotent_across_reruns() {
        let mut state = earned(&[]);
        let first = newly_qualified(3, Some(8), &state);
        assert_eq!(first, vec![STREAK_3, EARLY_BIRD]);

        for code in &first {
            state.insert(code.to_string());
        }

        // unchanged history, second run awards nothing
        assert!(newly_qualified(3, Some(8), &state).is_empty());
    }

    #[test]
    fn test_hour_boundaries() {
        assert_eq!(newly_qualified(2, Some(8), &earned(&[])), vec![EARLY_BIRD]);
        assert!(newly_qualified(2, Some(9), &earned(&[])).is_empty());
        assert!(newly_qualified(2, Some(21), &earned(&[])).is_empty());
        assert_eq!(newly_qualified(2, Some(22), &earned(&[])), vec![NIGHT_OWL]);
    }

    /// Pins the quirk described on [`newly_qualified`]: the hour rules key
    /// off the most recent submission in the history, so a daytime event
    /// still earns `night_owl` when the latest stored submission was
    /// late-night.
    #[test]
    fn test_awards_from_latest_submission_hour_only() {
        let codes = newly_qualified(4, Some(23), &earned(&[FIRST_BLOOD, STREAK_3]));
        assert_eq!(codes, vec![NIGHT_OWL]);
    }
}
